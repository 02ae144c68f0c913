use hasm::{msg::Msg, util, Error, SymbolMap};
use indexmap::IndexMap;
use std::process::ExitCode;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input files, assembled as one program in the given order
    #[clap(default_value = "Main.asm")]
    input: Vec<String>,

    /// Output file
    #[clap(short, long, default_value = "Main.hack")]
    output: String,

    /// Dump assembly listing
    #[clap(short, long)]
    dump: bool,

    /// Write labels and variables to a YAML file
    #[clap(short, long)]
    symbols: Option<String>,
}

fn main() -> ExitCode {
    use clap::Parser;

    let args: Args = Args::parse();
    println!("Hack Assembler");

    let mut files: IndexMap<String, Vec<String>> = IndexMap::new();
    match run(&args, &mut files) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            err.print_diag(&files);
            if let Error::DuplicateLabel(name) = err.kind() {
                note_first_definition(&files, name);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, files: &mut IndexMap<String, Vec<String>>) -> Result<(), Error> {
    println!("1. Read Files");
    let mut sources = vec![];
    for path in &args.input {
        println!("  < {}", path);
        let text =
            std::fs::read_to_string(path).map_err(|e| Error::FileOpen(path.clone(), e))?;
        files.insert(path.clone(), text.lines().map(str::to_string).collect());
        sources.push((path.clone(), text));
    }

    println!("2. Resolve Symbols & Generate Binary");
    let assembled = hasm::assemble_files(&sources)?;
    if assembled.code.is_empty() {
        Msg::Warn("No instructions in input".to_string()).print();
    }
    println!("  > {}", &args.output);
    std::fs::write(&args.output, assembled.to_text())
        .map_err(|e| Error::FileWrite(args.output.clone(), e))?;

    if let Some(path) = &args.symbols {
        println!("  > {}", path);
        let map = SymbolMap::generate(&assembled.symbols);
        let yaml = serde_yaml::to_string(&map).map_err(Error::SymbolMap)?;
        std::fs::write(path, yaml).map_err(|e| Error::FileWrite(path.clone(), e))?;
    }

    if args.dump {
        util::print_dump(&assembled);
    }
    Ok(())
}

fn note_first_definition(files: &IndexMap<String, Vec<String>>, name: &str) {
    let decl = format!("({})", name);
    for (file, lines) in files {
        for (idx, raw) in lines.iter().enumerate() {
            let code = raw.split("//").next().unwrap_or("");
            let code: String = code.chars().filter(|ch| !ch.is_whitespace()).collect();
            if code == decl {
                Msg::Note("First defined here".to_string()).diag(file, idx + 1, raw);
                return;
            }
        }
    }
}

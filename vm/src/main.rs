use color_print::cprintln;
use std::{path::Path, process::ExitCode};
use vmtr::{Config, Error};

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
    /// Input .vm files or directories
    #[clap(default_value = ".")]
    input: Vec<String>,

    /// Output file [default: <input>.asm]
    #[clap(short, long)]
    output: Option<String>,

    /// Translator config (YAML)
    #[clap(short, long)]
    config: Option<String>,

    /// Dump generated assembly
    #[clap(short, long)]
    dump: bool,
}

fn main() -> ExitCode {
    use clap::Parser;

    let args: Args = Args::parse();
    println!("VM Translator");

    let mut units = vec![];
    match run(&args, &mut units) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let source = err.location().and_then(|(file, _)| {
                units
                    .iter()
                    .find(|(name, _)| format!("{}.vm", name) == file)
                    .map(|(_, text)| text.as_str())
            });
            err.print_diag(source);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, units: &mut Vec<(String, String)>) -> Result<(), Error> {
    let config = match &args.config {
        Some(path) => {
            println!("  < {}", path);
            Config::load(path)?
        }
        None => Config::default(),
    };

    println!("1. Read Files");
    *units = vmtr::read_units(&args.input)?;
    for (name, _) in units.iter() {
        println!("  < {}.vm", name);
    }

    println!("2. Translate & Link");
    let asm = vmtr::translate(units, &config)?;
    let output = args.output.clone().unwrap_or_else(|| default_output(&args.input));
    println!("  > {}", output);
    std::fs::write(&output, &asm).map_err(|e| Error::FileWrite(output.clone(), e))?;

    if args.dump {
        for line in asm.lines() {
            if line.starts_with("//") {
                cprintln!("<dim>{}</>", line);
            } else if line.starts_with('(') {
                cprintln!("<g>{}</>", line);
            } else {
                println!("    {}", line);
            }
        }
    }
    Ok(())
}

/// `dir/dir.asm` for a directory, `file.asm` beside a file.
fn default_output(input: &[String]) -> String {
    let first = input.first().map(String::as_str).unwrap_or(".");
    let path = Path::new(first);
    let path = if path.is_dir() {
        let dir = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let name = dir
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "Main".to_string());
        dir.join(name).with_extension("asm")
    } else {
        path.with_extension("asm")
    };
    path.display().to_string()
}

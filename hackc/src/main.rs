use color_print::cprintln;
use hackc::Error;
use std::{path::Path, process::ExitCode};

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
    /// Input .jack file or directory
    #[clap(default_value = ".")]
    input: String,

    /// Output directory [default: beside the input]
    #[clap(short, long)]
    output: Option<String>,

    /// Translator config (YAML)
    #[clap(short, long)]
    config: Option<String>,

    /// Also write the intermediate .vm and .asm files
    #[clap(long)]
    keep_vm: bool,

    /// Write all artifacts as one YAML report
    #[clap(short, long)]
    report: Option<String>,

    /// Print every unit's intermediate code
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    use clap::Parser;

    let args: Args = Args::parse();
    println!("Hack Compiler");

    let mut sources = vec![];
    match run(&args, &mut sources) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            err.print_diag(&sources);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, sources: &mut Vec<(String, String)>) -> Result<(), Error> {
    let config = match &args.config {
        Some(path) => {
            println!("  < {}", path);
            vmtr::Config::load(path)?
        }
        None => vmtr::Config::default(),
    };

    println!("1. Read Files");
    *sources = jackc::read_sources(&args.input)?;
    for (file, _) in sources.iter() {
        println!("  < {}", file);
    }

    println!("2. Compile & Link & Assemble");
    let artifacts = hackc::build(sources, &config)?;
    if args.verbose {
        for (class, text) in &artifacts.vm {
            cprintln!("<g>{}.vm</>", class);
            for line in text.lines() {
                println!("    {}", line);
            }
        }
    }

    println!("3. Write Files");
    let (dir, stem) = output_dir(&args.input, args.output.as_deref());
    let write = |name: String, text: &str| -> Result<(), Error> {
        let path = dir.join(name).display().to_string();
        println!("  > {}", path);
        std::fs::write(&path, text).map_err(|e| Error::FileWrite(path.clone(), e))
    };
    if args.keep_vm {
        for (class, text) in &artifacts.vm {
            write(format!("{}.vm", class), text)?;
        }
        write(format!("{}.asm", stem), &artifacts.asm)?;
    }
    write(format!("{}.hack", stem), &artifacts.hack)?;

    if let Some(path) = &args.report {
        println!("  > {}", path);
        std::fs::write(path, artifacts.to_yaml()?)
            .map_err(|e| Error::FileWrite(path.clone(), e))?;
    }
    Ok(())
}

/// Output directory and program name for an input file or directory.
fn output_dir(input: &str, output: Option<&str>) -> (std::path::PathBuf, String) {
    let path = Path::new(input);
    let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let (parent, stem) = if path.is_dir() {
        (path.clone(), path.file_name())
    } else {
        (
            path.parent().map(Path::to_path_buf).unwrap_or_default(),
            path.file_stem(),
        )
    };
    let stem = stem
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "Main".to_string());
    let dir = output.map(Path::new).map(Path::to_path_buf).unwrap_or(parent);
    (dir, stem)
}

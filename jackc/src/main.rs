use color_print::cprintln;
use jackc::Error;
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

    /// Print generated intermediate code
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    use clap::Parser;

    let args: Args = Args::parse();
    println!("Jack Compiler");

    let mut sources = vec![];
    match run(&args, &mut sources) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let source = err
                .loc()
                .and_then(|loc| sources.iter().find(|(file, _)| *file == loc.file))
                .map(|(_, source)| source.as_str())
                .unwrap_or("");
            err.print_diag(source);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, sources: &mut Vec<(String, String)>) -> Result<(), Error> {
    println!("1. Read Files");
    *sources = jackc::read_sources(&args.input)?;
    for (file, _) in sources.iter() {
        println!("  < {}", file);
    }

    println!("2. Compile");
    for (file, source) in sources.iter() {
        let compiled = jackc::compile(file, source)?;
        let output = Path::new(file).with_extension("vm").display().to_string();
        println!("  > {}", output);
        std::fs::write(&output, compiled.to_text())
            .map_err(|e| Error::FileWrite(output.clone(), e))?;

        if args.verbose {
            for inst in &compiled.code {
                match inst {
                    vmtr::Inst::Function(..) => cprintln!("<g>{}</>", inst),
                    _ => println!("    {}", inst),
                }
            }
        }
    }
    Ok(())
}

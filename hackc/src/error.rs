use color_print::cprintln;
use indexmap::IndexMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Compile(#[from] jackc::Error),

    #[error("{0}")]
    Translate(#[from] vmtr::Error),

    #[error("{0}")]
    Assemble(#[from] hasm::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Report(#[source] serde_yaml::Error),
}

impl Error {
    /// `sources` are the `(file, text)` inputs of the build.
    pub fn print_diag(&self, sources: &[(String, String)]) {
        match self {
            Error::Compile(err) => {
                let source = err
                    .loc()
                    .and_then(|loc| sources.iter().find(|(file, _)| *file == loc.file))
                    .map(|(_, text)| text.as_str())
                    .unwrap_or("");
                err.print_diag(source);
            }
            Error::Translate(err) => err.print_diag(None),
            Error::Assemble(err) => err.print_diag(&IndexMap::new()),
            _ => cprintln!("<red,bold>error</>: {}", self),
        }
    }
}

use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown command: `{0}`")]
    UnknownCommand(String),

    #[error("Unknown segment: `{0}`")]
    UnknownSegment(String),

    #[error("Invalid index: `{0}`")]
    InvalidIndex(String),

    #[error("Invalid name: `{0}`")]
    InvalidName(String),

    #[error("`{command}` takes {expected} field(s), found {found}")]
    FieldCount {
        command: String,
        expected: usize,
        found: usize,
    },

    #[error("Cannot pop to the constant segment")]
    PopConstant,

    #[error("Index {index} out of range for segment `{segment}`")]
    SegmentRange { segment: String, index: u16 },

    #[error("{source}")]
    At {
        file: String,
        line: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("Entry unit `{entry}` is missing from a program of {units} units")]
    MissingEntry { entry: String, units: usize },

    #[error("No .vm files in `{0}`")]
    NoInput(String),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Invalid config file: {0}")]
    Config(String, #[source] serde_yaml::Error),
}

impl Error {
    /// Attach the source location (`line` is 0-based).
    pub fn at(self, file: &str, line: usize) -> Self {
        match self {
            Error::At { .. } => self,
            err => Error::At {
                file: file.to_string(),
                line,
                source: Box::new(err),
            },
        }
    }

    pub fn kind(&self) -> &Error {
        match self {
            Error::At { source, .. } => source.kind(),
            err => err,
        }
    }

    /// Location as `(file, 1-based line)`.
    pub fn location(&self) -> Option<(&str, usize)> {
        match self {
            Error::At { file, line, .. } => Some((file, line + 1)),
            _ => None,
        }
    }

    fn help(&self) -> Option<&'static str> {
        match self.kind() {
            Error::UnknownSegment(_) => Some(
                "segments are `constant`, `local`, `argument`, `this`, `that`, `static`, `temp` and `pointer`",
            ),
            Error::PopConstant => Some("`constant` can only be pushed"),
            Error::SegmentRange { .. } => Some("`pointer` takes 0..1 and `temp` takes 0..7"),
            Error::MissingEntry { .. } => {
                Some("add the entry unit, or set `bootstrap: never` in the config")
            }
            _ => None,
        }
    }

    /// `source` is the text of the unit the error was found in.
    pub fn print_diag(&self, source: Option<&str>) {
        cprintln!("<red,bold>error</>: {}", self);
        if let Error::At { file, line, .. } = self {
            let raw = source.and_then(|text| text.lines().nth(*line)).unwrap_or("");
            cprintln!("   <blue>--></> <underline>{}:{}</>", file, line + 1);
            cprintln!(" <blue>{:>4} |</> {}", line + 1, raw.trim());
        }
        if let Some(help) = self.help() {
            cprintln!("<green,bold>help</>: {}", help);
        }
    }
}

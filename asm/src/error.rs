use crate::msg::Msg;
use indexmap::IndexMap;
use strum::Display;
use thiserror::Error;

/// Field of an instruction an unknown mnemonic was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    Dest,
    Comp,
    Jump,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown {field} mnemonic: `{mnemonic}`")]
    Encoding { field: Field, mnemonic: String },

    #[error("Address out of range: `{0}` (max 32767)")]
    AddressOutOfRange(String),

    #[error("Label `{label}` would be bound to {addr}, past the last instruction address 32767")]
    LabelOutOfRange { label: String, addr: u16 },

    #[error("Program does not fit in 32768 instruction words")]
    ProgramTooLarge,

    #[error("Invalid symbol: `{0}`")]
    InvalidSymbol(String),

    #[error("Syntax Error: Cannot parse `{0}`")]
    SyntaxError(String),

    #[error("Re-defined label: `{0}`")]
    DuplicateLabel(String),

    #[error("No memory left for variable: `{0}`")]
    OutOfMemory(String),

    #[error("{source}")]
    At {
        file: String,
        line: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Failed to serialize symbol map")]
    SymbolMap(#[source] serde_yaml::Error),
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

    /// The error without its location.
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

    /// Hint on the Hack syntax or memory map the error ran into.
    fn help(&self) -> Option<&'static str> {
        match self.kind() {
            Error::Encoding { field: Field::Dest, .. } => {
                Some("destinations are `M`, `D`, `MD`, `A`, `AM`, `AD` or `AMD`")
            }
            Error::Encoding { field: Field::Comp, .. } => {
                Some("computations combine `0`, `1`, `D`, `A` and `M`, e.g. `D+1`, `M-D`, `D|A`")
            }
            Error::Encoding { field: Field::Jump, .. } => {
                Some("jumps are `JGT`, `JEQ`, `JGE`, `JLT`, `JNE`, `JLE` or `JMP`")
            }
            Error::AddressOutOfRange(_) => Some("an A-instruction loads a 15-bit value"),
            Error::LabelOutOfRange { .. } | Error::ProgramTooLarge => {
                Some("instruction memory holds addresses 0..32767")
            }
            Error::OutOfMemory(_) => Some("variables are allocated from 16 up to SCREEN (16384)"),
            _ => None,
        }
    }

    /// Print the error with the offending line of `files` and a hint.
    pub fn print_diag(&self, files: &IndexMap<String, Vec<String>>) {
        let msg = Msg::Error(self.to_string());
        match self.location() {
            Some((file, line)) => {
                let raw = files
                    .get(file)
                    .and_then(|lines| lines.get(line - 1))
                    .map(String::as_str)
                    .unwrap_or("");
                msg.diag(file, line, raw);
            }
            None => msg.print(),
        }
        if let Some(help) = self.help() {
            Msg::Note(help.to_string()).print();
        }
    }
}

use crate::grammer::token::{Token, TokenKind};
use color_print::cprintln;
use std::fmt;
use thiserror::Error;

/// Source position without lifetime
#[derive(Debug, Clone, PartialEq)]
pub struct Loc {
    pub file: String,
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.row, self.col)
    }
}

// Token information without lifetime
#[derive(Debug, Clone, PartialEq)]
pub struct TokenInfo {
    pub kind: TokenKind,
    pub loc: Loc,
}

impl fmt::Display for TokenInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` ({}) at {}", self.kind, self.kind.category(), self.loc)
    }
}

impl<'a> From<&Token<'a>> for TokenInfo {
    fn from(token: &Token<'a>) -> Self {
        TokenInfo {
            kind: token.kind.clone(),
            loc: Loc {
                file: token.pos.file.to_string(),
                row: token.pos.row,
                col: token.pos.col,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    // Lex errors
    #[error("Unexpected character `{0}` at {1}")]
    UnexpectedChar(char, Loc),

    #[error("Unterminated string constant at {0}")]
    UnterminatedString(Loc),

    #[error("Unterminated comment at {0}")]
    UnterminatedComment(Loc),

    #[error("Integer constant `{0}` exceeds 32767 at {1}")]
    IntegerOverflow(String, Loc),

    // Parse errors
    #[error("Syntax error in {production}: expected {expected}, found {found}")]
    Syntax {
        production: &'static str,
        expected: String,
        found: TokenInfo,
    },

    #[error("Unexpected end of file in {production}: expected {expected}")]
    UnexpectedEOF {
        production: &'static str,
        expected: String,
    },

    #[error("Unit must start with `class`, found {0}")]
    Structural(TokenInfo),

    #[error("Empty unit: {0}")]
    EmptyUnit(String),

    // Scope errors
    #[error("Unknown symbol `{name}` in {scope}{}", at(.token))]
    UnknownSymbol {
        name: String,
        scope: String,
        token: Option<TokenInfo>,
    },

    #[error("Duplicate symbol `{name}` in {scope}{}", at(.token))]
    DuplicateSymbol {
        name: String,
        scope: String,
        token: Option<TokenInfo>,
    },

    #[error("`{name}` takes {expected} argument(s), given {found}{}", at(.token))]
    ArgumentCount {
        name: String,
        expected: u16,
        found: u16,
        token: Option<TokenInfo>,
    },

    // File errors
    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("No .jack files in `{0}`")]
    NoInput(String),
}

fn at(token: &Option<TokenInfo>) -> String {
    match token {
        Some(token) => format!(" at {}", token.loc),
        None => String::new(),
    }
}

impl Error {
    /// Attach the offending token to a scope error raised without one.
    pub fn with_token(self, token: &Token) -> Self {
        match self {
            Error::UnknownSymbol { name, scope, token: None } => Error::UnknownSymbol {
                name,
                scope,
                token: Some(token.into()),
            },
            Error::DuplicateSymbol { name, scope, token: None } => Error::DuplicateSymbol {
                name,
                scope,
                token: Some(token.into()),
            },
            Error::ArgumentCount {
                name,
                expected,
                found,
                token: None,
            } => Error::ArgumentCount {
                name,
                expected,
                found,
                token: Some(token.into()),
            },
            err => err,
        }
    }

    pub fn loc(&self) -> Option<&Loc> {
        match self {
            Error::UnexpectedChar(_, loc)
            | Error::UnterminatedString(loc)
            | Error::UnterminatedComment(loc)
            | Error::IntegerOverflow(_, loc) => Some(loc),
            Error::Syntax { found, .. } | Error::Structural(found) => Some(&found.loc),
            Error::UnknownSymbol { token, .. }
            | Error::DuplicateSymbol { token, .. }
            | Error::ArgumentCount { token, .. } => token.as_ref().map(|token| &token.loc),
            _ => None,
        }
    }

    /// Print error with the offending source line and a caret under the token.
    pub fn print_diag(&self, source: &str) {
        cprintln!("<red,bold>error</>: {}", self);
        let Some(loc) = self.loc() else {
            return;
        };
        let line = source.lines().nth(loc.row.saturating_sub(1)).unwrap_or("");
        cprintln!("     <blue>--></> <underline>{}</>", loc);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", loc.row, line);
        cprintln!(
            "      <blue>|</> {}<red,bold>^</>",
            " ".repeat(loc.col.saturating_sub(1))
        );
    }
}

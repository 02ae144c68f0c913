use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bootstrap {
    /// When the entry unit is part of the program. Several units
    /// without it are an error.
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial stack pointer.
    pub stack_base: u16,
    /// Unit placed first in the linked program.
    pub entry_unit: String,
    /// Function the bootstrap calls.
    pub entry_function: String,
    pub bootstrap: Bootstrap,
    pub halt_loop: bool,
    /// Precede each translated instruction with a comment.
    pub annotate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            stack_base: 256,
            entry_unit: "Sys".to_string(),
            entry_function: "Sys.init".to_string(),
            bootstrap: Bootstrap::Auto,
            halt_loop: true,
            annotate: true,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
        Self::parse(path, &text)
    }

    pub fn parse(name: &str, text: &str) -> Result<Self, Error> {
        serde_yaml::from_str(text).map_err(|e| Error::Config(name.to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml() {
        let config = Config::parse("t.yaml", "stack_base: 300\nbootstrap: never\n").unwrap();
        assert_eq!(config.stack_base, 300);
        assert_eq!(config.bootstrap, Bootstrap::Never);
        assert_eq!(config.entry_function, "Sys.init");
        assert!(config.halt_loop);
    }

    #[test]
    fn bad_yaml() {
        assert!(matches!(
            Config::parse("t.yaml", "bootstrap: sometimes\n"),
            Err(Error::Config(..))
        ));
    }
}

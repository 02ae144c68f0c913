//! Compiler from Jack source to the stack-machine intermediate language.

pub mod compile;
pub mod error;
pub mod grammer;
pub mod scope;

pub use compile::Compiled;
pub use error::Error;

use grammer::lexer::Lexer;

/// Compile one source unit. `file` names the unit in diagnostics.
pub fn compile(file: &str, source: &str) -> Result<Compiled, Error> {
    let tokens = Lexer::new(file, source).parse()?;
    compile::compile(file, &tokens)
}

/// Collect `.jack` inputs as `(path, source)` pairs. A directory
/// contributes its `.jack` files in name order.
pub fn read_sources(path: &str) -> Result<Vec<(String, String)>, Error> {
    use std::path::{Path, PathBuf};

    let root = Path::new(path);
    let files: Vec<PathBuf> = if root.is_dir() {
        let entries = std::fs::read_dir(root).map_err(|e| Error::FileOpen(path.to_string(), e))?;
        let mut found: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "jack"))
            .collect();
        if found.is_empty() {
            return Err(Error::NoInput(path.to_string()));
        }
        found.sort();
        found
    } else {
        vec![root.to_path_buf()]
    };

    files
        .iter()
        .map(|file| -> Result<(String, String), Error> {
            let name = file.display().to_string();
            let source =
                std::fs::read_to_string(file).map_err(|e| Error::FileOpen(name.clone(), e))?;
            Ok((name, source))
        })
        .collect()
}

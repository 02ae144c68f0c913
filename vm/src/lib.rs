//! Translator from the stack-machine intermediate language to Hack
//! assembly.

pub mod config;
pub mod error;
pub mod inst;
pub mod link;
pub mod parser;
pub mod writer;

pub use config::{Bootstrap, Config};
pub use error::Error;
pub use inst::Inst;
pub use link::{translate, translate_unit};
pub use writer::CodeWriter;

/// Collect `.vm` inputs as `(unit name, text)` pairs. A directory
/// contributes its `.vm` files in name order.
pub fn read_units(paths: &[String]) -> Result<Vec<(String, String)>, Error> {
    use std::path::{Path, PathBuf};

    let mut files: Vec<PathBuf> = vec![];
    for path in paths {
        let path = Path::new(path);
        if path.is_dir() {
            let entries = std::fs::read_dir(path)
                .map_err(|e| Error::FileOpen(path.display().to_string(), e))?;
            let mut found: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok().map(|entry| entry.path()))
                .filter(|p| p.extension().is_some_and(|ext| ext == "vm"))
                .collect();
            if found.is_empty() {
                return Err(Error::NoInput(path.display().to_string()));
            }
            found.sort();
            files.extend(found);
        } else {
            files.push(path.to_path_buf());
        }
    }

    files
        .iter()
        .map(|path| -> Result<(String, String), Error> {
            let name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .unwrap_or_default();
            let text = std::fs::read_to_string(path)
                .map_err(|e| Error::FileOpen(path.display().to_string(), e))?;
            Ok((name, text))
        })
        .collect()
}

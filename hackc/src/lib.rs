//! Whole pipeline from Jack source units to Hack binary text.
//!
//! Every unit is compiled to intermediate code, the units are linked
//! into one assembly program, and the program is assembled.

pub mod error;

pub use error::Error;

use serde::Serialize;

/// Everything one build produces.
#[derive(Debug, Clone, Serialize)]
pub struct Artifacts {
    /// `(class name, intermediate text)` per unit, in input order.
    pub vm: Vec<(String, String)>,
    pub asm: String,
    pub hack: String,
    pub symbols: hasm::SymbolMap,
}

impl Artifacts {
    pub fn to_yaml(&self) -> Result<String, Error> {
        serde_yaml::to_string(self).map_err(Error::Report)
    }
}

/// Build `(file, source)` units with the given linker settings.
pub fn build(sources: &[(String, String)], config: &vmtr::Config) -> Result<Artifacts, Error> {
    let vm = sources
        .iter()
        .map(|(file, source)| -> Result<(String, String), Error> {
            let compiled = jackc::compile(file, source)?;
            Ok((compiled.class.clone(), compiled.to_text()))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let asm = vmtr::translate(&vm, config)?;
    let assembled = hasm::assemble_files(&[("out.asm".to_string(), asm.clone())])?;

    Ok(Artifacts {
        vm,
        asm,
        hack: assembled.to_text(),
        symbols: hasm::SymbolMap::generate(&assembled.symbols),
    })
}

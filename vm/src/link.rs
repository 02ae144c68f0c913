use arch::Stmt;

use crate::{
    config::{Bootstrap, Config},
    error::Error,
    parser,
    writer::{self, CodeWriter, BOOT_UNIT},
};

/// Translate one unit into assembly statements, paired with the
/// instruction each group came from.
pub fn translate_unit(unit: &str, text: &str) -> Result<Vec<(String, Vec<Stmt>)>, Error> {
    let file = format!("{}.vm", unit);
    let mut writer = CodeWriter::new(unit);
    parser::parse(text)
        .iter()
        .map(|line| -> Result<(String, Vec<Stmt>), Error> {
            let inst = CodeWriter::decode(line).map_err(|err| err.at(&file, line.idx))?;
            Ok((inst.to_string(), writer.write(&inst)))
        })
        .collect()
}

/// Link `(unit name, intermediate text)` pairs into one assembly program.
///
/// The entry unit goes first, the others keep their given order. With
/// `Bootstrap::Auto` a program of several units must contain the entry
/// unit; a lone unit without it runs standalone.
pub fn translate(units: &[(String, String)], config: &Config) -> Result<String, Error> {
    let has_entry = units.iter().any(|(name, _)| *name == config.entry_unit);
    let bootstrap = match config.bootstrap {
        Bootstrap::Always => true,
        Bootstrap::Never => false,
        Bootstrap::Auto if has_entry => true,
        Bootstrap::Auto if units.len() <= 1 => false,
        Bootstrap::Auto => {
            return Err(Error::MissingEntry {
                entry: config.entry_unit.clone(),
                units: units.len(),
            })
        }
    };

    let mut out = String::new();
    let mut emit = |comment: Option<&str>, stmts: &[Stmt]| {
        if let (true, Some(comment)) = (config.annotate, comment) {
            out.push_str(&format!("// {}\n", comment));
        }
        for stmt in stmts {
            out.push_str(&format!("{}\n", stmt));
        }
    };

    if bootstrap {
        let code = CodeWriter::new(BOOT_UNIT).bootstrap(config.stack_base, &config.entry_function);
        emit(Some("bootstrap"), &code);
        if config.halt_loop {
            emit(Some("halt"), &writer::halt());
        }
    }

    let ordered = units
        .iter()
        .filter(|(name, _)| *name == config.entry_unit)
        .chain(units.iter().filter(|(name, _)| *name != config.entry_unit));
    for (name, text) in ordered {
        for (inst, stmts) in translate_unit(name, text)? {
            emit(Some(inst.as_str()), &stmts);
        }
    }

    if !bootstrap && config.halt_loop {
        emit(Some("halt"), &writer::halt());
    }
    Ok(out)
}

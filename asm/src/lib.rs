//! Two-pass assembler for the Hack platform.
//!
//! The first pass binds every `(LABEL)` to the address of the next real
//! instruction. The second resolves A-instruction operands, allocating
//! variables from address 16 in order of first appearance, and encodes
//! each instruction as a 16-bit word.

pub mod error;
pub mod msg;
pub mod parser;
pub mod symbols;
pub mod util;

use arch::{Addr, Inst, MAX_ADDR};

pub use error::Error;
pub use parser::Line;
pub use symbols::{SymbolMap, SymbolTable};

/// One encoded instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    /// Index into [`Assembled::lines`].
    pub line: usize,
    pub inst: Inst<u16>,
    pub bin: u16,
}

/// Result of assembling a program.
#[derive(Debug, Clone)]
pub struct Assembled {
    pub lines: Vec<Line>,
    /// Encoded instructions in address order.
    pub code: Vec<Word>,
    pub symbols: SymbolTable,
}

impl Assembled {
    pub fn words(&self) -> impl Iterator<Item = u16> + '_ {
        self.code.iter().map(|word| word.bin)
    }

    /// One line of 16 `0`/`1` characters per instruction.
    pub fn to_text(&self) -> String {
        self.words().map(|word| format!("{:016b}\n", word)).collect()
    }
}

/// Bind labels. Every label and instruction must fit the 15-bit
/// instruction address space.
pub fn first_pass(lines: &[Line]) -> Result<SymbolTable, Error> {
    let mut table = SymbolTable::new();
    let mut pc: u16 = 0;
    for line in lines {
        if let Some(name) = line.label() {
            if pc > MAX_ADDR {
                return Err(Error::LabelOutOfRange {
                    label: name.to_string(),
                    addr: pc,
                }
                .at(&line.file, line.idx));
            }
            table
                .define_label(name, pc)
                .map_err(|err| err.at(&line.file, line.idx))?;
        }
        if line.inst().is_some() {
            pc = pc
                .checked_add(1)
                .filter(|next| *next <= MAX_ADDR + 1)
                .ok_or_else(|| Error::ProgramTooLarge.at(&line.file, line.idx))?;
        }
    }
    Ok(table)
}

pub fn second_pass(lines: &[Line], table: &mut SymbolTable) -> Result<Vec<Word>, Error> {
    let mut code = vec![];
    for (idx, line) in lines.iter().enumerate() {
        let Some(inst) = line.inst() else {
            continue;
        };
        let encode = |table: &mut SymbolTable| -> Result<Word, Error> {
            let inst = inst.clone().resolve(|addr| match addr {
                Addr::Lit(val) => Ok(val),
                Addr::Sym(name) => table.resolve(&name),
            })?;
            let bin = inst
                .to_bin()
                .ok_or_else(|| Error::AddressOutOfRange(inst.to_string()))?;
            Ok(Word {
                line: idx,
                inst,
                bin,
            })
        };
        code.push(encode(table).map_err(|err| err.at(&line.file, line.idx))?);
    }
    Ok(code)
}

pub fn assemble_lines(lines: Vec<Line>) -> Result<Assembled, Error> {
    let mut symbols = first_pass(&lines)?;
    let code = second_pass(&lines, &mut symbols)?;
    Ok(Assembled {
        lines,
        code,
        symbols,
    })
}

/// Assemble `(file name, text)` sources as one program, in the given order.
pub fn assemble_files(files: &[(String, String)]) -> Result<Assembled, Error> {
    let mut lines = vec![];
    for (name, text) in files {
        lines.extend(parser::parse(name, text)?);
    }
    assemble_lines(lines)
}

/// Assembly text to binary text.
pub fn assemble(text: &str) -> Result<String, Error> {
    let lines = parser::parse("<input>", text)?;
    Ok(assemble_lines(lines)?.to_text())
}

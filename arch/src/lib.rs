//! Instruction set of the Hack platform.
//!
//! `op` holds the three mnemonic tables of a C-instruction, `reg` the
//! calling-convention pointers, `inst` the instruction model with its 16-bit
//! encoding and `symbols` the predefined symbol table.

pub mod inst;
pub mod op;
pub mod reg;
pub mod symbols;

pub use inst::{Addr, Inst, Stmt};
pub use op::{Comp, Dest, Jump};
pub use reg::Reg;

/// Largest value an A-instruction can load (15 bits).
pub const MAX_ADDR: u16 = 0x7FFF;

/// Base address of the memory-mapped screen.
pub const SCREEN: u16 = 0x4000;

/// Address of the memory-mapped keyboard.
pub const KBD: u16 = 0x6000;

/// First address handed out to assembler variables.
pub const VAR_BASE: u16 = 16;

/// Base address of the `temp` segment (R5..R12).
pub const TEMP_BASE: u16 = 5;

/// Number of slots in the `temp` segment.
pub const TEMP_SIZE: u16 = 8;

use crate::{
    op::{Comp, Dest, Jump},
    reg::Reg,
    MAX_ADDR,
};
use color_print::cformat;
use std::fmt;

/// Operand of an A-instruction before symbol resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Addr {
    Lit(u16),
    Sym(String),
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Addr::Lit(val) => write!(f, "{}", val),
            Addr::Sym(name) => write!(f, "{}", name),
        }
    }
}

impl From<Reg> for Addr {
    fn from(reg: Reg) -> Self {
        Addr::Sym(reg.to_string())
    }
}

impl From<u16> for Addr {
    fn from(val: u16) -> Self {
        Addr::Lit(val)
    }
}

impl From<String> for Addr {
    fn from(name: String) -> Self {
        Addr::Sym(name)
    }
}

impl From<&str> for Addr {
    fn from(name: &str) -> Self {
        Addr::Sym(name.to_string())
    }
}

/// A machine instruction. `A` is the operand type of an A-instruction:
/// [`Addr`] before symbol resolution, `u16` after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst<A> {
    A(A),
    C(Dest, Comp, Jump),
}

impl<A> Inst<A> {
    /// Replace the A-instruction operand, leaving C-instructions untouched.
    pub fn resolve<B, E, F>(self, mut f: F) -> Result<Inst<B>, E>
    where
        F: FnMut(A) -> Result<B, E>,
    {
        match self {
            Inst::A(addr) => Ok(Inst::A(f(addr)?)),
            Inst::C(dest, comp, jump) => Ok(Inst::C(dest, comp, jump)),
        }
    }
}

impl Inst<Addr> {
    pub fn at(addr: impl Into<Addr>) -> Self {
        Inst::A(addr.into())
    }

    /// `dest=comp`
    pub fn set(dest: Dest, comp: Comp) -> Self {
        Inst::C(dest, comp, Jump::Null)
    }

    /// `comp;jump`
    pub fn jump(comp: Comp, jump: Jump) -> Self {
        Inst::C(Dest::Null, comp, jump)
    }
}

impl Inst<u16> {
    /// Encode as a 16-bit word: `0vvvvvvvvvvvvvvv` or `111accccccdddjjj`.
    /// An A-instruction operand wider than 15 bits has no encoding.
    pub fn to_bin(&self) -> Option<u16> {
        match self {
            Inst::A(val) if *val > MAX_ADDR => None,
            Inst::A(val) => Some(*val),
            Inst::C(dest, comp, jump) => {
                let comp: u8 = (*comp).into();
                let dest: u8 = (*dest).into();
                let jump: u8 = (*jump).into();
                Some(0b111 << 13 | (comp as u16) << 6 | (dest as u16) << 3 | jump as u16)
            }
        }
    }

    /// Decode a 16-bit word. Fails on a C-instruction whose computation
    /// bits are not in the table.
    pub fn from_bin(word: u16) -> Option<Self> {
        if word & 0x8000 == 0 {
            return Some(Inst::A(word));
        }
        let comp = Comp::try_from(((word >> 6) & 0x7F) as u8).ok()?;
        let dest = Dest::try_from(((word >> 3) & 0x7) as u8).ok()?;
        let jump = Jump::try_from((word & 0x7) as u8).ok()?;
        Some(Inst::C(dest, comp, jump))
    }
}

impl<A: fmt::Display> fmt::Display for Inst<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inst::A(addr) => write!(f, "@{}", addr),
            Inst::C(dest, comp, jump) => {
                if *dest != Dest::Null {
                    write!(f, "{}=", dest)?;
                }
                write!(f, "{}", comp)?;
                if *jump != Jump::Null {
                    write!(f, ";{}", jump)?;
                }
                Ok(())
            }
        }
    }
}

impl<A: fmt::Display> Inst<A> {
    pub fn cformat(&self) -> String {
        match self {
            Inst::A(addr) => cformat!("<y>@{}</>", addr),
            Inst::C(dest, comp, jump) => {
                let dest = match dest {
                    Dest::Null => String::new(),
                    dest => cformat!("<b>{}</>=", dest),
                };
                let jump = match jump {
                    Jump::Null => String::new(),
                    jump => cformat!(";<r>{}</>", jump),
                };
                format!("{}{}{}", dest, comp, jump)
            }
        }
    }
}

/// One line of an assembly program: a real instruction or a label
/// declaration, which occupies no address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Inst(Inst<Addr>),
    Label(String),
}

impl Stmt {
    pub fn label(name: impl Into<String>) -> Self {
        Stmt::Label(name.into())
    }
}

impl From<Inst<Addr>> for Stmt {
    fn from(inst: Inst<Addr>) -> Self {
        Stmt::Inst(inst)
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Inst(inst) => write!(f, "{}", inst),
            Stmt::Label(name) => write!(f, "({})", name),
        }
    }
}

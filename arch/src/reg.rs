use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Memory-mapped registers of the stack-machine calling convention, plus the
/// scratch registers the translator is free to clobber.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoPrimitive,
    TryFromPrimitive,
    EnumString,
    Display,
    EnumIter,
)]
#[repr(u16)]
pub enum Reg {
    SP = 0,
    LCL = 1,
    ARG = 2,
    THIS = 3,
    THAT = 4,
    R13 = 13,
    R14 = 14,
    R15 = 15,
}

impl Reg {
    pub fn addr(self) -> u16 {
        self.into()
    }
}

#[test]
fn test() {
    assert_eq!(Reg::SP.addr(), 0);
    assert_eq!(Reg::THAT.addr(), 4);
    assert_eq!(Reg::R13.to_string(), "R13");
    assert_eq!("ARG".parse::<Reg>(), Ok(Reg::ARG));
    assert!("R16".parse::<Reg>().is_err());
}

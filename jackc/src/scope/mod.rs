pub mod class;
pub mod local;

pub use class::ClassScope;
pub use local::Local;

use strum::{Display, EnumString};
use vmtr::inst::Segment;

/// Storage class of a declared variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Kind {
    Static,
    Field,
    Argument,
    Local,
}

impl Kind {
    pub fn segment(self) -> Segment {
        match self {
            Kind::Static => Segment::Static,
            Kind::Field => Segment::This,
            Kind::Argument => Segment::Argument,
            Kind::Local => Segment::Local,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub ty: String,
    pub kind: Kind,
    pub index: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SubroutineKind {
    Constructor,
    Function,
    Method,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub kind: SubroutineKind,
    pub ret: String,
    /// Declared parameters, without the receiver.
    pub n_args: u16,
    pub n_locals: u16,
}

impl Signature {
    /// Argument count at the call site, receiver included.
    pub fn arity(&self) -> u16 {
        match self.kind {
            SubroutineKind::Method => self.n_args + 1,
            _ => self.n_args,
        }
    }
}

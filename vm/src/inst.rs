use std::fmt;
use strum::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ArithOp {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

impl ArithOp {
    pub fn is_unary(self) -> bool {
        matches!(self, ArithOp::Neg | ArithOp::Not)
    }

    pub fn is_compare(self) -> bool {
        matches!(self, ArithOp::Eq | ArithOp::Gt | ArithOp::Lt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Segment {
    Constant,
    Local,
    Argument,
    This,
    That,
    Static,
    Temp,
    Pointer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Push,
    Pop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
pub enum BranchKind {
    #[strum(serialize = "label")]
    Label,
    #[strum(serialize = "goto")]
    Goto,
    #[strum(serialize = "if-goto")]
    IfGoto,
}

/// One stack-machine instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst {
    Arith(ArithOp),
    Mem(Direction, Segment, u16),
    Branch(BranchKind, String),
    Function(String, u16),
    Call(String, u16),
    Return,
}

impl Inst {
    pub fn push(segment: Segment, index: u16) -> Self {
        Inst::Mem(Direction::Push, segment, index)
    }

    pub fn pop(segment: Segment, index: u16) -> Self {
        Inst::Mem(Direction::Pop, segment, index)
    }

    pub fn label(name: impl Into<String>) -> Self {
        Inst::Branch(BranchKind::Label, name.into())
    }

    pub fn goto(name: impl Into<String>) -> Self {
        Inst::Branch(BranchKind::Goto, name.into())
    }

    pub fn if_goto(name: impl Into<String>) -> Self {
        Inst::Branch(BranchKind::IfGoto, name.into())
    }

    pub fn call(name: impl Into<String>, n_args: u16) -> Self {
        Inst::Call(name.into(), n_args)
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inst::Arith(op) => write!(f, "{}", op),
            Inst::Mem(dir, seg, idx) => write!(f, "{} {} {}", dir, seg, idx),
            Inst::Branch(kind, name) => write!(f, "{} {}", kind, name),
            Inst::Function(name, n_locals) => write!(f, "function {} {}", name, n_locals),
            Inst::Call(name, n_args) => write!(f, "call {} {}", name, n_args),
            Inst::Return => write!(f, "return"),
        }
    }
}

/// Intermediate text, one instruction per line.
pub fn render(code: &[Inst]) -> String {
    code.iter().map(|inst| format!("{}\n", inst)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_form() {
        let code = vec![
            Inst::Function("Main.main".into(), 2),
            Inst::push(Segment::Constant, 7),
            Inst::pop(Segment::Local, 1),
            Inst::Arith(ArithOp::Add),
            Inst::if_goto("LOOP"),
            Inst::call("Math.multiply", 2),
            Inst::Return,
        ];
        assert_eq!(
            render(&code),
            "function Main.main 2\npush constant 7\npop local 1\nadd\nif-goto LOOP\ncall Math.multiply 2\nreturn\n"
        );
    }

    #[test]
    fn mnemonics() {
        assert_eq!("if-goto".parse::<BranchKind>(), Ok(BranchKind::IfGoto));
        assert_eq!("pointer".parse::<Segment>(), Ok(Segment::Pointer));
        assert_eq!("neg".parse::<ArithOp>(), Ok(ArithOp::Neg));
        assert!("mul".parse::<ArithOp>().is_err());
        assert!(ArithOp::Not.is_unary());
        assert!(ArithOp::Lt.is_compare());
    }
}

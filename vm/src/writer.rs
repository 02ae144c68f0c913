use arch::{
    symbols::is_symbol, Addr, Comp, Dest, Inst as Asm, Jump, Reg, Stmt, MAX_ADDR, TEMP_BASE,
    TEMP_SIZE,
};
use itertools::chain;

use crate::{
    error::Error,
    inst::{ArithOp, BranchKind, Direction, Inst, Segment},
    parser::Line,
};

/// Label of the terminal loop.
pub const HALT: &str = "$halt";

/// Unit name used for the bootstrap's own labels.
pub const BOOT_UNIT: &str = "$boot";

fn at(addr: impl Into<Addr>) -> Stmt {
    Asm::at(addr).into()
}

fn set(dest: Dest, comp: Comp) -> Stmt {
    Asm::set(dest, comp).into()
}

fn jump(comp: Comp, jump: Jump) -> Stmt {
    Asm::jump(comp, jump).into()
}

/// `*SP = D; SP++`
fn push_d() -> [Stmt; 5] {
    [
        at(Reg::SP),
        set(Dest::A, Comp::M),
        set(Dest::M, Comp::D),
        at(Reg::SP),
        set(Dest::M, Comp::MPlusOne),
    ]
}

/// `SP--; D = *SP`
fn pop_d() -> [Stmt; 3] {
    [
        at(Reg::SP),
        set(Dest::AM, Comp::MMinusOne),
        set(Dest::D, Comp::M),
    ]
}

fn base(segment: Segment) -> Option<Reg> {
    match segment {
        Segment::Local => Some(Reg::LCL),
        Segment::Argument => Some(Reg::ARG),
        Segment::This => Some(Reg::THIS),
        Segment::That => Some(Reg::THAT),
        _ => None,
    }
}

/// Translates stack-machine instructions of one unit into assembly.
///
/// Comparison and return-address labels are numbered per writer and
/// prefixed with the unit name, so units can be concatenated freely.
#[derive(Debug)]
pub struct CodeWriter {
    unit: String,
    compares: usize,
    calls: usize,
}

impl CodeWriter {
    pub fn new(unit: &str) -> Self {
        CodeWriter {
            unit: unit.to_string(),
            compares: 0,
            calls: 0,
        }
    }

    /// Check a parsed line and turn it into an instruction.
    pub fn decode(line: &Line) -> Result<Inst, Error> {
        let fields: Vec<&str> = line.fields.iter().map(String::as_str).collect();
        let Some((&command, args)) = fields.split_first() else {
            return Err(Error::UnknownCommand(String::new()));
        };

        let arity = |expected: usize| {
            if args.len() == expected {
                Ok(())
            } else {
                Err(Error::FieldCount {
                    command: command.to_string(),
                    expected,
                    found: args.len(),
                })
            }
        };
        let index = |s: &str| s.parse::<u16>().map_err(|_| Error::InvalidIndex(s.to_string()));
        let name = |s: &str| {
            if is_symbol(s) {
                Ok(s.to_string())
            } else {
                Err(Error::InvalidName(s.to_string()))
            }
        };

        if let Ok(op) = command.parse::<ArithOp>() {
            arity(0)?;
            return Ok(Inst::Arith(op));
        }
        if let Ok(dir) = command.parse::<Direction>() {
            arity(2)?;
            let segment: Segment = args[0]
                .parse()
                .map_err(|_| Error::UnknownSegment(args[0].to_string()))?;
            let idx = index(args[1])?;
            let limit = match segment {
                Segment::Constant => MAX_ADDR,
                Segment::Pointer => 1,
                Segment::Temp => TEMP_SIZE - 1,
                _ => u16::MAX,
            };
            if dir == Direction::Pop && segment == Segment::Constant {
                return Err(Error::PopConstant);
            }
            if idx > limit {
                return Err(Error::SegmentRange {
                    segment: segment.to_string(),
                    index: idx,
                });
            }
            return Ok(Inst::Mem(dir, segment, idx));
        }
        if let Ok(kind) = command.parse::<BranchKind>() {
            arity(1)?;
            return Ok(Inst::Branch(kind, name(args[0])?));
        }
        match command {
            "function" => {
                arity(2)?;
                Ok(Inst::Function(name(args[0])?, index(args[1])?))
            }
            "call" => {
                arity(2)?;
                Ok(Inst::Call(name(args[0])?, index(args[1])?))
            }
            "return" => {
                arity(0)?;
                Ok(Inst::Return)
            }
            _ => Err(Error::UnknownCommand(command.to_string())),
        }
    }

    pub fn write(&mut self, inst: &Inst) -> Vec<Stmt> {
        match inst {
            Inst::Arith(op) => self.arith(*op),
            Inst::Mem(Direction::Push, segment, idx) => self.push(*segment, *idx),
            Inst::Mem(Direction::Pop, segment, idx) => self.pop(*segment, *idx),
            Inst::Branch(kind, name) => {
                let target = format!("{}${}", self.unit, name);
                match kind {
                    BranchKind::Label => vec![Stmt::Label(target)],
                    BranchKind::Goto => vec![at(target), jump(Comp::Zero, Jump::JMP)],
                    BranchKind::IfGoto => {
                        chain!(pop_d(), [at(target), jump(Comp::D, Jump::JNE)]).collect()
                    }
                }
            }
            Inst::Function(name, n_locals) => chain!(
                [Stmt::label(name.clone())],
                (0..*n_locals).flat_map(|_| {
                    [
                        at(Reg::SP),
                        set(Dest::A, Comp::M),
                        set(Dest::M, Comp::Zero),
                        at(Reg::SP),
                        set(Dest::M, Comp::MPlusOne),
                    ]
                })
            )
            .collect(),
            Inst::Call(name, n_args) => self.call(name, *n_args),
            Inst::Return => self.ret(),
        }
    }

    /// `SP = stack_base; call entry 0`
    pub fn bootstrap(&mut self, stack_base: u16, entry: &str) -> Vec<Stmt> {
        chain!(
            [
                at(stack_base),
                set(Dest::D, Comp::A),
                at(Reg::SP),
                set(Dest::M, Comp::D),
            ],
            self.call(entry, 0)
        )
        .collect()
    }

    fn arith(&mut self, op: ArithOp) -> Vec<Stmt> {
        let binary = |comp: Comp| -> Vec<Stmt> {
            chain!(pop_d(), [set(Dest::A, Comp::AMinusOne), set(Dest::M, comp)]).collect()
        };
        let unary = |comp: Comp| vec![at(Reg::SP), set(Dest::A, Comp::MMinusOne), set(Dest::M, comp)];
        match op {
            ArithOp::Add => binary(Comp::DPlusM),
            ArithOp::Sub => binary(Comp::MMinusD),
            ArithOp::And => binary(Comp::DAndM),
            ArithOp::Or => binary(Comp::DOrM),
            ArithOp::Neg => unary(Comp::NegM),
            ArithOp::Not => unary(Comp::NotM),
            ArithOp::Eq => self.compare(Jump::JEQ),
            ArithOp::Gt => self.compare(Jump::JGT),
            ArithOp::Lt => self.compare(Jump::JLT),
        }
    }

    /// `x - y` decides the jump; true is `-1`, false is `0`.
    fn compare(&mut self, cond: Jump) -> Vec<Stmt> {
        let n = self.compares;
        self.compares += 1;
        let on_true = format!("{}.TRUE.{}", self.unit, n);
        let end = format!("{}.END.{}", self.unit, n);
        chain!(
            pop_d(),
            [
                at(Reg::SP),
                set(Dest::AM, Comp::MMinusOne),
                set(Dest::D, Comp::MMinusD),
                at(on_true.clone()),
                jump(Comp::D, cond),
                at(Reg::SP),
                set(Dest::A, Comp::M),
                set(Dest::M, Comp::Zero),
                at(end.clone()),
                jump(Comp::Zero, Jump::JMP),
                Stmt::Label(on_true),
                at(Reg::SP),
                set(Dest::A, Comp::M),
                set(Dest::M, Comp::NegOne),
                Stmt::Label(end),
                at(Reg::SP),
                set(Dest::M, Comp::MPlusOne),
            ]
        )
        .collect()
    }

    /// Address of a fixed-location segment slot.
    fn direct(&self, segment: Segment, idx: u16) -> Addr {
        match segment {
            Segment::Temp => Addr::Lit(TEMP_BASE + idx),
            Segment::Pointer if idx == 0 => Reg::THIS.into(),
            Segment::Pointer => Reg::THAT.into(),
            _ => Addr::Sym(format!("{}.{}", self.unit, idx)),
        }
    }

    fn push(&self, segment: Segment, idx: u16) -> Vec<Stmt> {
        let load: Vec<Stmt> = match (segment, base(segment)) {
            (Segment::Constant, _) => vec![at(idx), set(Dest::D, Comp::A)],
            (_, Some(reg)) => vec![
                at(idx),
                set(Dest::D, Comp::A),
                at(reg),
                set(Dest::A, Comp::DPlusM),
                set(Dest::D, Comp::M),
            ],
            (segment, None) => vec![at(self.direct(segment, idx)), set(Dest::D, Comp::M)],
        };
        chain!(load, push_d()).collect()
    }

    fn pop(&self, segment: Segment, idx: u16) -> Vec<Stmt> {
        match base(segment) {
            Some(reg) => chain!(
                [
                    at(idx),
                    set(Dest::D, Comp::A),
                    at(reg),
                    set(Dest::D, Comp::DPlusM),
                    at(Reg::R13),
                    set(Dest::M, Comp::D),
                ],
                pop_d(),
                [at(Reg::R13), set(Dest::A, Comp::M), set(Dest::M, Comp::D)]
            )
            .collect(),
            None => chain!(
                pop_d(),
                [at(self.direct(segment, idx)), set(Dest::M, Comp::D)]
            )
            .collect(),
        }
    }

    fn call(&mut self, name: &str, n_args: u16) -> Vec<Stmt> {
        let ret = format!("{}.RETURN.{}", self.unit, self.calls);
        self.calls += 1;
        chain!(
            [at(ret.clone()), set(Dest::D, Comp::A)],
            push_d(),
            [Reg::LCL, Reg::ARG, Reg::THIS, Reg::THAT]
                .into_iter()
                .flat_map(|reg| chain!([at(reg), set(Dest::D, Comp::M)], push_d())),
            [
                // ARG = SP - 5 - n_args
                at(Reg::SP),
                set(Dest::D, Comp::M),
                at(5u16),
                set(Dest::D, Comp::DMinusA),
                at(n_args),
                set(Dest::D, Comp::DMinusA),
                at(Reg::ARG),
                set(Dest::M, Comp::D),
                // LCL = SP
                at(Reg::SP),
                set(Dest::D, Comp::M),
                at(Reg::LCL),
                set(Dest::M, Comp::D),
                at(name),
                jump(Comp::Zero, Jump::JMP),
                Stmt::Label(ret),
            ]
        )
        .collect()
    }

    fn ret(&self) -> Vec<Stmt> {
        chain!(
            [
                // R13 = frame, R14 = return address
                at(Reg::LCL),
                set(Dest::D, Comp::M),
                at(Reg::R13),
                set(Dest::M, Comp::D),
                at(5u16),
                set(Dest::A, Comp::DMinusA),
                set(Dest::D, Comp::M),
                at(Reg::R14),
                set(Dest::M, Comp::D),
            ],
            pop_d(),
            [
                at(Reg::ARG),
                set(Dest::A, Comp::M),
                set(Dest::M, Comp::D),
                at(Reg::ARG),
                set(Dest::D, Comp::MPlusOne),
                at(Reg::SP),
                set(Dest::M, Comp::D),
            ],
            [Reg::THAT, Reg::THIS, Reg::ARG, Reg::LCL]
                .into_iter()
                .flat_map(|reg| {
                    [
                        at(Reg::R13),
                        set(Dest::AM, Comp::MMinusOne),
                        set(Dest::D, Comp::M),
                        at(reg),
                        set(Dest::M, Comp::D),
                    ]
                }),
            [at(Reg::R14), set(Dest::A, Comp::M), jump(Comp::Zero, Jump::JMP)]
        )
        .collect()
    }
}

/// Endless loop parking the CPU once the program is done.
pub fn halt() -> Vec<Stmt> {
    vec![
        Stmt::label(HALT),
        at(HALT),
        jump(Comp::Zero, Jump::JMP),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn decode(text: &str) -> Result<Inst, Error> {
        CodeWriter::decode(&parse(text)[0])
    }

    #[test]
    fn decode_valid() {
        assert_eq!(decode("push local 3").unwrap(), Inst::push(Segment::Local, 3));
        assert_eq!(decode("pop pointer 1").unwrap(), Inst::pop(Segment::Pointer, 1));
        assert_eq!(decode("if-goto END").unwrap(), Inst::if_goto("END"));
        assert_eq!(decode("function Main.main 2").unwrap(), Inst::Function("Main.main".into(), 2));
        assert_eq!(decode("return").unwrap(), Inst::Return);
        assert_eq!(decode("not").unwrap(), Inst::Arith(ArithOp::Not));
    }

    #[test]
    fn decode_invalid() {
        assert!(matches!(decode("mul"), Err(Error::UnknownCommand(_))));
        assert!(matches!(decode("push heap 0"), Err(Error::UnknownSegment(_))));
        assert!(matches!(decode("push local x"), Err(Error::InvalidIndex(_))));
        assert!(matches!(decode("push local -1"), Err(Error::InvalidIndex(_))));
        assert!(matches!(decode("pop constant 0"), Err(Error::PopConstant)));
        assert!(matches!(decode("push pointer 2"), Err(Error::SegmentRange { .. })));
        assert!(matches!(decode("pop temp 8"), Err(Error::SegmentRange { .. })));
        assert!(matches!(decode("push constant 32768"), Err(Error::SegmentRange { .. })));
        assert!(matches!(decode("add 1"), Err(Error::FieldCount { expected: 0, found: 1, .. })));
        assert!(matches!(decode("call Foo.bar"), Err(Error::FieldCount { .. })));
        assert!(matches!(decode("goto 1abc"), Err(Error::InvalidName(_))));
    }

    #[test]
    fn labels_are_unique_per_site() {
        let mut writer = CodeWriter::new("Foo");
        let first = writer.write(&Inst::Arith(ArithOp::Eq));
        let second = writer.write(&Inst::Arith(ArithOp::Eq));
        assert!(first.contains(&Stmt::label("Foo.TRUE.0")));
        assert!(second.contains(&Stmt::label("Foo.TRUE.1")));

        let call = writer.write(&Inst::call("Bar.baz", 1));
        assert_eq!(call.last(), Some(&Stmt::label("Foo.RETURN.0")));
        let call = writer.write(&Inst::call("Bar.baz", 1));
        assert_eq!(call.last(), Some(&Stmt::label("Foo.RETURN.1")));
    }

    #[test]
    fn unit_scoped_names() {
        let mut writer = CodeWriter::new("Foo");
        assert_eq!(writer.write(&Inst::label("LOOP")), vec![Stmt::label("Foo$LOOP")]);
        let text: Vec<String> = writer
            .write(&Inst::push(Segment::Static, 3))
            .iter()
            .map(|stmt| stmt.to_string())
            .collect();
        assert_eq!(text[0], "@Foo.3");
    }
}

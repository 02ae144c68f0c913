use super::func::FuncCompiler;
use crate::{
    error::Error,
    grammer::token::{Token, TokenKind},
    optional, repeat,
    scope::{Signature, SubroutineKind},
};
use itertools::chain;
use vmtr::inst::{ArithOp, Inst, Segment};

fn binary(kind: &TokenKind) -> Option<Inst> {
    let inst = match kind {
        TokenKind::Plus => Inst::Arith(ArithOp::Add),
        TokenKind::Minus => Inst::Arith(ArithOp::Sub),
        TokenKind::Ampasand => Inst::Arith(ArithOp::And),
        TokenKind::Pipe => Inst::Arith(ArithOp::Or),
        TokenKind::LAngle => Inst::Arith(ArithOp::Lt),
        TokenKind::RAngle => Inst::Arith(ArithOp::Gt),
        TokenKind::Equal => Inst::Arith(ArithOp::Eq),
        TokenKind::Star => Inst::call("Math.multiply", 2),
        TokenKind::Slash => Inst::call("Math.divide", 2),
        _ => return None,
    };
    Some(inst)
}

/// Argument count must agree with a known signature.
fn check_arity(name: &str, sig: &Signature, found: u16, token: &Token) -> Result<(), Error> {
    if sig.n_args == found {
        return Ok(());
    }
    Err(Error::ArgumentCount {
        name: name.to_string(),
        expected: sig.n_args,
        found,
        token: None,
    }
    .with_token(token))
}

impl<'p, 't, 'a, 'c> FuncCompiler<'p, 't, 'a, 'c> {
    /// `term { op term }`, evaluated left to right without precedence.
    pub(super) fn expression(&mut self) -> Result<Vec<Inst>, Error> {
        self.p.enter("expression");
        let mut code = self.term()?;
        while let Some(op) = self.p.peek().and_then(|token| binary(&token.kind)) {
            self.p.next();
            code.extend(self.term()?);
            code.push(op);
        }
        self.p.leave();
        Ok(code)
    }

    fn term(&mut self) -> Result<Vec<Inst>, Error> {
        self.p.enter("term");
        let Some(token) = self.p.peek() else {
            return Err(self.p.unexpected("term"));
        };
        let code = match &token.kind {
            TokenKind::Number(num) => {
                self.p.next();
                vec![Inst::push(Segment::Constant, *num)]
            }
            TokenKind::Text(text) => {
                self.p.next();
                string(text)
            }
            TokenKind::KwTrue => {
                self.p.next();
                vec![
                    Inst::push(Segment::Constant, 0),
                    Inst::push(Segment::Constant, 1),
                    Inst::Arith(ArithOp::Sub),
                ]
            }
            TokenKind::KwFalse | TokenKind::KwNull => {
                self.p.next();
                vec![Inst::push(Segment::Constant, 0)]
            }
            TokenKind::KwThis => {
                self.p.next();
                vec![Inst::push(Segment::Pointer, 0)]
            }
            TokenKind::LParen => {
                self.p.next();
                let inner = self.expression()?;
                self.p.expect(TokenKind::RParen)?;
                inner
            }
            TokenKind::Minus | TokenKind::Tilde => {
                self.p.next();
                let op = match token.kind {
                    TokenKind::Minus => ArithOp::Neg,
                    _ => ArithOp::Not,
                };
                chain!(self.term()?, [Inst::Arith(op)]).collect()
            }
            TokenKind::Ident(_) => match self.p.peek_nth(1).map(|token| &token.kind) {
                Some(TokenKind::LBracket) => self.array_read()?,
                Some(TokenKind::Period | TokenKind::LParen) => self.call()?,
                _ => {
                    let (name, token) = self.p.ident()?;
                    let var = self.variable(&name, token)?;
                    vec![Inst::push(var.kind.segment(), var.index)]
                }
            },
            _ => return Err(self.p.unexpected("term")),
        };
        self.p.leave();
        Ok(code)
    }

    /// `name [ expression ]`
    fn array_read(&mut self) -> Result<Vec<Inst>, Error> {
        let (name, token) = self.p.ident()?;
        let var = self.variable(&name, token)?;
        self.p.expect(TokenKind::LBracket)?;
        let index = self.expression()?;
        self.p.expect(TokenKind::RBracket)?;
        Ok(chain!(
            [Inst::push(var.kind.segment(), var.index)],
            index,
            [
                Inst::Arith(ArithOp::Add),
                Inst::pop(Segment::Pointer, 1),
                Inst::push(Segment::That, 0)
            ]
        )
        .collect())
    }

    /// `( [expression {, expression}] )`, returning the code and the count.
    fn arguments(&mut self) -> Result<(Vec<Inst>, u16), Error> {
        self.p.expect(TokenKind::LParen)?;
        self.p.enter("expressionList");
        let args = repeat!(self.p, self.expression(), TokenKind::Comma, TokenKind::RParen);
        self.p.leave();
        self.p.expect(TokenKind::RParen)?;
        let n = args.len() as u16;
        Ok((args.into_iter().flatten().collect(), n))
    }

    /// `subroutineCall`: `name ( args )` | `(var | Class) . name ( args )`
    pub(super) fn call(&mut self) -> Result<Vec<Inst>, Error> {
        self.p.enter("subroutineCall");
        let (name, token) = self.p.ident()?;
        let class = self.local.class();

        let code = if optional!(self.p, TokenKind::Period).is_some() {
            let (sub, sub_token) = self.p.ident()?;
            match self.local.lookup(&name).cloned() {
                // Method on an object held in a variable
                Some(var) => {
                    let (args, n) = self.arguments()?;
                    if var.ty == class.name() {
                        if let Some(sig) = class.signature(&sub) {
                            check_arity(&sub, sig, n, sub_token)?;
                        }
                    }
                    chain!(
                        [Inst::push(var.kind.segment(), var.index)],
                        args,
                        [Inst::call(format!("{}.{}", var.ty, sub), n + 1)]
                    )
                    .collect()
                }
                // Function or constructor of a class
                None => {
                    let (args, n) = self.arguments()?;
                    if name == class.name() {
                        if let Some(sig) = class.signature(&sub) {
                            check_arity(&sub, sig, n, sub_token)?;
                        }
                    }
                    chain!(args, [Inst::call(format!("{}.{}", name, sub), n)]).collect()
                }
            }
        } else {
            let Some(sig) = class.signature(&name) else {
                return Err(Error::UnknownSymbol {
                    name,
                    scope: format!("class {}", class.name()),
                    token: None,
                }
                .with_token(token));
            };
            let (args, n) = self.arguments()?;
            check_arity(&name, sig, n, token)?;
            let receiver = match sig.kind {
                SubroutineKind::Method => vec![Inst::push(Segment::Pointer, 0)],
                _ => vec![],
            };
            chain!(
                receiver,
                args,
                [Inst::call(format!("{}.{}", class.name(), name), sig.arity())]
            )
            .collect()
        };
        self.p.leave();
        Ok(code)
    }
}

/// `String.new(len)` followed by one `appendChar` per character.
fn string(text: &str) -> Vec<Inst> {
    let chars: Vec<u16> = text.chars().map(|ch| ch as u16).collect();
    chain!(
        [
            Inst::push(Segment::Constant, chars.len() as u16),
            Inst::call("String.new", 1)
        ],
        chars.into_iter().flat_map(|ch| {
            [
                Inst::push(Segment::Constant, ch),
                Inst::call("String.appendChar", 2),
            ]
        })
    )
    .collect()
}

use crate::{
    error::Error,
    grammer::{
        parsercore::Parser,
        token::{Token, TokenKind},
    },
    optional, repeat,
    scope::{ClassScope, Entry, Kind, Local, SubroutineKind},
};
use itertools::chain;
use vmtr::inst::{ArithOp, Inst, Segment};

/// Code generator for one subroutine, driving the shared parser.
pub struct FuncCompiler<'p, 't, 'a, 'c> {
    pub(super) p: &'p mut Parser<'t, 'a>,
    pub(super) local: Local<'c>,
    if_count: usize,
    while_count: usize,
}

/// `subroutineDec`
pub fn subroutine(p: &mut Parser, class: &ClassScope) -> Result<Vec<Inst>, Error> {
    p.enter("subroutineDec");
    let kind = match p.next().map(|token| &token.kind) {
        Some(TokenKind::KwConstructor) => SubroutineKind::Constructor,
        Some(TokenKind::KwMethod) => SubroutineKind::Method,
        _ => SubroutineKind::Function,
    };
    p.return_type()?;
    let (name, _) = p.ident()?;

    let mut compiler = FuncCompiler {
        local: Local::fork(class, &name, kind),
        p,
        if_count: 0,
        while_count: 0,
    };
    compiler.parameters()?;
    let code = compiler.body()?;
    compiler.p.leave();
    Ok(code)
}

impl<'p, 't, 'a, 'c> FuncCompiler<'p, 't, 'a, 'c> {
    /// `( [type name {, type name}] )`
    fn parameters(&mut self) -> Result<(), Error> {
        self.p.expect(TokenKind::LParen)?;
        self.p.enter("parameterList");
        repeat!(self.p, self.declare(Kind::Argument), TokenKind::Comma, TokenKind::RParen);
        self.p.leave();
        self.p.expect(TokenKind::RParen)?;
        Ok(())
    }

    fn declare(&mut self, kind: Kind) -> Result<(), Error> {
        let ty = self.p.type_name()?;
        let (name, token) = self.p.ident()?;
        self.local
            .define(&name, &ty, kind)
            .map_err(|err| err.with_token(token))?;
        Ok(())
    }

    /// `var type name {, name} ;`
    fn var_dec(&mut self) -> Result<(), Error> {
        self.p.enter("varDec");
        let ty = self.p.type_name()?;
        let names = repeat!(self.p, self.p.ident(), TokenKind::Comma, TokenKind::Semicolon);
        for (name, token) in names {
            self.local
                .define(&name, &ty, Kind::Local)
                .map_err(|err| err.with_token(token))?;
        }
        self.p.expect(TokenKind::Semicolon)?;
        self.p.leave();
        Ok(())
    }

    /// `{ varDec* statements }`
    fn body(&mut self) -> Result<Vec<Inst>, Error> {
        self.p.enter("subroutineBody");
        self.p.expect(TokenKind::LCurly)?;
        while optional!(self.p, TokenKind::KwVar).is_some() {
            self.var_dec()?;
        }

        let class = self.local.class();
        let prologue = match self.local.kind() {
            SubroutineKind::Constructor => vec![
                Inst::push(Segment::Constant, class.var_count(Kind::Field)),
                Inst::call("Memory.alloc", 1),
                Inst::pop(Segment::Pointer, 0),
            ],
            SubroutineKind::Method => vec![
                Inst::push(Segment::Argument, 0),
                Inst::pop(Segment::Pointer, 0),
            ],
            SubroutineKind::Function => vec![],
        };
        let head = Inst::Function(
            self.local.name().to_string(),
            self.local.var_count(Kind::Local),
        );

        let stmts = self.statements()?;
        self.p.expect(TokenKind::RCurly)?;
        self.p.leave();
        Ok(chain!([head], prologue, stmts).collect())
    }
}

// ----------------------------------------------------------------------------
// Statements
// ----------------------------------------------------------------------------

impl<'p, 't, 'a, 'c> FuncCompiler<'p, 't, 'a, 'c> {
    pub(super) fn statements(&mut self) -> Result<Vec<Inst>, Error> {
        self.p.enter("statements");
        let stmts = repeat!(self.p, self.statement(), TokenKind::RCurly);
        self.p.leave();
        Ok(stmts.into_iter().flatten().collect())
    }

    fn statement(&mut self) -> Result<Vec<Inst>, Error> {
        match self.p.peek().map(|token| &token.kind) {
            Some(TokenKind::KwLet) => self.let_stmt(),
            Some(TokenKind::KwIf) => self.if_stmt(),
            Some(TokenKind::KwWhile) => self.while_stmt(),
            Some(TokenKind::KwDo) => self.do_stmt(),
            Some(TokenKind::KwReturn) => self.return_stmt(),
            _ => Err(self.p.unexpected("statement")),
        }
    }

    fn block(&mut self) -> Result<Vec<Inst>, Error> {
        self.p.expect(TokenKind::LCurly)?;
        let stmts = self.statements()?;
        self.p.expect(TokenKind::RCurly)?;
        Ok(stmts)
    }

    /// `( expression )`
    fn condition(&mut self) -> Result<Vec<Inst>, Error> {
        self.p.expect(TokenKind::LParen)?;
        let cond = self.expression()?;
        self.p.expect(TokenKind::RParen)?;
        Ok(cond)
    }

    fn label(&self, kind: &str, n: usize) -> String {
        format!("{}${}.{}", self.local.name(), kind, n)
    }

    pub(super) fn variable(&self, name: &str, token: &Token) -> Result<Entry, Error> {
        self.local
            .resolve(name)
            .cloned()
            .map_err(|err| err.with_token(token))
    }

    /// `let name [ [ expression ] ] = expression ;`
    fn let_stmt(&mut self) -> Result<Vec<Inst>, Error> {
        self.p.enter("letStatement");
        self.p.expect(TokenKind::KwLet)?;
        let (name, token) = self.p.ident()?;
        let var = self.variable(&name, token)?;

        let code = if optional!(self.p, TokenKind::LBracket).is_some() {
            // Address is computed and left on the stack before the value.
            let index = self.expression()?;
            self.p.expect(TokenKind::RBracket)?;
            self.p.expect(TokenKind::Equal)?;
            let value = self.expression()?;
            chain!(
                [Inst::push(var.kind.segment(), var.index)],
                index,
                [Inst::Arith(ArithOp::Add)],
                value,
                [
                    Inst::pop(Segment::Temp, 0),
                    Inst::pop(Segment::Pointer, 1),
                    Inst::push(Segment::Temp, 0),
                    Inst::pop(Segment::That, 0),
                ]
            )
            .collect()
        } else {
            self.p.expect(TokenKind::Equal)?;
            let value = self.expression()?;
            chain!(value, [Inst::pop(var.kind.segment(), var.index)]).collect()
        };
        self.p.expect(TokenKind::Semicolon)?;
        self.p.leave();
        Ok(code)
    }

    /// `if ( expression ) { statements } [ else { statements } ]`
    fn if_stmt(&mut self) -> Result<Vec<Inst>, Error> {
        self.p.enter("ifStatement");
        self.p.expect(TokenKind::KwIf)?;
        let n = self.if_count;
        self.if_count += 1;
        let (l_true, l_false, l_end) = (
            self.label("IF_TRUE", n),
            self.label("IF_FALSE", n),
            self.label("IF_END", n),
        );

        let cond = self.condition()?;
        let then = self.block()?;
        let other = match optional!(self.p, TokenKind::KwElse) {
            Some(_) => self.block()?,
            None => vec![],
        };
        self.p.leave();

        Ok(chain!(
            cond,
            [
                Inst::if_goto(&l_true),
                Inst::goto(&l_false),
                Inst::label(&l_true)
            ],
            then,
            [Inst::goto(&l_end), Inst::label(&l_false)],
            other,
            [Inst::label(&l_end)]
        )
        .collect())
    }

    /// `while ( expression ) { statements }`
    fn while_stmt(&mut self) -> Result<Vec<Inst>, Error> {
        self.p.enter("whileStatement");
        self.p.expect(TokenKind::KwWhile)?;
        let n = self.while_count;
        self.while_count += 1;
        let (l_cond, l_begin, l_end) = (
            self.label("WHILE_COND", n),
            self.label("WHILE_BEGIN", n),
            self.label("WHILE_END", n),
        );

        let cond = self.condition()?;
        let body = self.block()?;
        self.p.leave();

        Ok(chain!(
            [Inst::label(&l_cond)],
            cond,
            [
                Inst::if_goto(&l_begin),
                Inst::goto(&l_end),
                Inst::label(&l_begin)
            ],
            body,
            [Inst::goto(&l_cond), Inst::label(&l_end)]
        )
        .collect())
    }

    /// `do subroutineCall ;`
    fn do_stmt(&mut self) -> Result<Vec<Inst>, Error> {
        self.p.enter("doStatement");
        self.p.expect(TokenKind::KwDo)?;
        let call = self.call()?;
        self.p.expect(TokenKind::Semicolon)?;
        self.p.leave();
        Ok(chain!(call, [Inst::pop(Segment::Temp, 0)]).collect())
    }

    /// `return [ expression ] ;`
    fn return_stmt(&mut self) -> Result<Vec<Inst>, Error> {
        self.p.enter("returnStatement");
        self.p.expect(TokenKind::KwReturn)?;
        let value = match optional!(self.p, TokenKind::Semicolon) {
            Some(_) => vec![Inst::push(Segment::Constant, 0)],
            None => {
                let value = self.expression()?;
                self.p.expect(TokenKind::Semicolon)?;
                value
            }
        };
        self.p.leave();
        Ok(chain!(value, [Inst::Return]).collect())
    }
}

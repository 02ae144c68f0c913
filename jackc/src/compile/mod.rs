//! Syntax-directed code generation: one pass over the tokens, after a
//! pre-pass that collects the class scope.

pub mod expr;
pub mod func;
pub mod prepass;

use crate::{
    check,
    error::Error,
    grammer::{
        parsercore::Parser,
        token::{Token, TokenKind},
    },
    optional, repeat,
};
use vmtr::inst::Inst;

/// Intermediate code of one class.
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    pub class: String,
    pub code: Vec<Inst>,
}

impl Compiled {
    pub fn to_text(&self) -> String {
        vmtr::inst::render(&self.code)
    }
}

/// `class name { classVarDec* subroutineDec* }`
pub fn compile(file: &str, tokens: &[Token]) -> Result<Compiled, Error> {
    match tokens.first() {
        None => return Err(Error::EmptyUnit(file.to_string())),
        Some(token) if token.kind != TokenKind::KwClass => {
            return Err(Error::Structural(token.into()))
        }
        Some(_) => {}
    }
    let class = prepass::collect(tokens)?;

    let mut p = Parser::new(tokens);
    p.enter("class");
    p.expect(TokenKind::KwClass)?;
    p.ident()?;
    p.expect(TokenKind::LCurly)?;

    // Declarations were bound by the pre-pass.
    while optional!(p, TokenKind::KwStatic | TokenKind::KwField).is_some() {
        p.enter("classVarDec");
        p.type_name()?;
        repeat!(p, p.ident(), TokenKind::Comma, TokenKind::Semicolon);
        p.expect(TokenKind::Semicolon)?;
        p.leave();
    }

    let mut code = vec![];
    while check!(
        p,
        TokenKind::KwConstructor | TokenKind::KwFunction | TokenKind::KwMethod
    ) {
        code.extend(func::subroutine(&mut p, &class)?);
    }
    p.expect(TokenKind::RCurly)?;
    p.leave();

    if !p.is_eof() {
        return Err(p.unexpected("end of file"));
    }
    Ok(Compiled {
        class: class.name().to_string(),
        code,
    })
}

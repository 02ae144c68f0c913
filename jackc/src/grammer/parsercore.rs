use super::token::{Token, TokenKind};
use crate::error::Error;

/// Cursor over a token slice with the enclosing-production stack used in
/// syntax errors.
pub struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    cursor: usize,
    productions: Vec<&'static str>,
}

impl<'t, 'a> Parser<'t, 'a> {
    pub fn new(tokens: &'t [Token<'a>]) -> Self {
        Parser {
            tokens,
            cursor: 0,
            productions: vec![],
        }
    }

    /// Enter a grammar production
    pub fn enter(&mut self, production: &'static str) {
        self.productions.push(production);
    }

    /// Leave the current grammar production
    pub fn leave(&mut self) {
        self.productions.pop();
    }

    pub fn production(&self) -> &'static str {
        self.productions.last().copied().unwrap_or("unit")
    }

    pub fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }
}

impl<'t, 'a> Parser<'t, 'a> {
    /// Peek : Watch next token without consuming it
    pub fn peek(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.cursor)
    }

    /// Watch the token `n` ahead of the next one
    pub fn peek_nth(&self, n: usize) -> Option<&'t Token<'a>> {
        self.tokens.get(self.cursor + n)
    }

    /// Next : Consume next token and return it
    pub fn next(&mut self) -> Option<&'t Token<'a>> {
        let token = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        Some(token)
    }

    /// Peek and check next token is match with condition
    pub fn check_if<F: Fn(&Token) -> bool>(&self, cond: F) -> bool {
        self.peek().is_some_and(|token| cond(token))
    }

    /// Consume if next token is match with condition
    pub fn consume_if<F: Fn(&Token) -> bool>(&mut self, cond: F) -> Option<&'t Token<'a>> {
        if self.check_if(cond) {
            self.next()
        } else {
            None
        }
    }

    /// Error for the next token, which is not `expected`
    pub fn unexpected(&self, expected: &str) -> Error {
        match self.peek() {
            Some(token) => Error::Syntax {
                production: self.production(),
                expected: expected.to_string(),
                found: token.into(),
            },
            None => Error::UnexpectedEOF {
                production: self.production(),
                expected: expected.to_string(),
            },
        }
    }

    /// Next token must be match with condition
    pub fn expect_tobe<F: Fn(&Token) -> bool>(
        &mut self,
        cond: F,
        expected: &str,
    ) -> Result<&'t Token<'a>, Error> {
        match self.consume_if(cond) {
            Some(token) => Ok(token),
            None => Err(self.unexpected(expected)),
        }
    }

    /// Next token must be exactly `kind`
    pub fn expect(&mut self, kind: TokenKind) -> Result<&'t Token<'a>, Error> {
        let expected = format!("`{}`", kind);
        self.expect_tobe(|token| token.kind == kind, &expected)
    }

    /// Next token must be an identifier
    pub fn ident(&mut self) -> Result<(String, &'t Token<'a>), Error> {
        let token = self.expect_tobe(|token| matches!(token.kind, TokenKind::Ident(_)), "identifier")?;
        match &token.kind {
            TokenKind::Ident(name) => Ok((name.clone(), token)),
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// `int` | `char` | `boolean` | className
    pub fn type_name(&mut self) -> Result<String, Error> {
        let token = self.expect_tobe(
            |token| {
                matches!(
                    token.kind,
                    TokenKind::KwInt | TokenKind::KwChar | TokenKind::KwBoolean | TokenKind::Ident(_)
                )
            },
            "type",
        )?;
        Ok(token.kind.text())
    }

    /// `void` | type
    pub fn return_type(&mut self) -> Result<String, Error> {
        match self.consume_if(|token| token.kind == TokenKind::KwVoid) {
            Some(token) => Ok(token.kind.text()),
            None => self.type_name(),
        }
    }
}

#[macro_export]
macro_rules! check {
    ($parser:expr, $kind:pat) => {
        $parser.check_if(|token| matches!(&token.kind, $kind))
    };
}

#[macro_export]
macro_rules! optional {
    ($parser:expr, $trigger:pat) => {
        $parser.consume_if(|token| matches!(&token.kind, $trigger))
    };
}

/// Parse repeated elements with optional delimiters
/// 3 args: { element } terminal (no delimiter)
/// 4 args: [ element { delimiter element } ] terminal (with delimiter)
#[macro_export]
macro_rules! repeat {
    // Without delimiter: { element } terminal
    ($parser:expr, $elem:expr, $terminal:pat) => {{
        let mut items = Vec::new();
        while !$crate::check!($parser, $terminal) {
            items.push($elem?);
        }
        items
    }};

    // With delimiter: [ element { delimiter element } ] terminal
    ($parser:expr, $elem:expr, $delimiter:pat, $terminal:pat) => {{
        let mut items = Vec::new();
        if !$crate::check!($parser, $terminal) {
            items.push($elem?);
            while $crate::optional!($parser, $delimiter).is_some() {
                items.push($elem?);
            }
        }
        items
    }};
}

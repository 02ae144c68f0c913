use super::token::{Pos, Token, TokenKind};
use crate::error::{Error, Loc};
use std::iter::Peekable;
use std::str::Chars;

pub struct Lexer<'a> {
    file: &'a str,
    iter: Peekable<Chars<'a>>,
    row: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(file: &'a str, code: &'a str) -> Self {
        Self {
            file,
            iter: code.chars().peekable(),
            row: 1,
            col: 1,
        }
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

impl<'a> Lexer<'a> {
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.iter.clone().nth(n)
    }

    fn consume(&mut self) -> Option<char> {
        let ch = self.iter.next()?;
        if ch == '\n' {
            self.row += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn pos(&self) -> Pos<'a> {
        Pos {
            file: self.file,
            row: self.row,
            col: self.col,
        }
    }

    fn loc(&self, pos: &Pos) -> Loc {
        Loc {
            file: pos.file.to_string(),
            row: pos.row,
            col: pos.col,
        }
    }
}

// ----------------------------------------------------------------------------
// Lexer
// ----------------------------------------------------------------------------

impl<'a> Lexer<'a> {
    /// Tokenize the whole unit. Comments are dropped.
    pub fn parse(mut self) -> Result<Vec<Token<'a>>, Error> {
        let mut tokens = Vec::new();
        while let Some(ch0) = self.peek_nth(0) {
            // 0. Skip whitespaces
            if ch0.is_whitespace() {
                self.consume();
                continue;
            }

            let pos = self.pos();

            // 1. Comments
            if ch0 == '/' {
                match self.peek_nth(1) {
                    Some('/') => {
                        while !matches!(self.peek_nth(0), None | Some('\n')) {
                            self.consume();
                        }
                        continue;
                    }
                    Some('*') => {
                        self.skip_block_comment(&pos)?;
                        continue;
                    }
                    _ => {}
                }
            }

            // 2. Symbol
            if let Some(kind) = symbol(ch0) {
                self.consume();
                tokens.push(Token::new(kind, pos));
                continue;
            }

            // 3. Integer constant
            if ch0.is_ascii_digit() {
                let kind = self.parse_number(&pos)?;
                tokens.push(Token::new(kind, pos));
                continue;
            }

            // 4. String constant
            if ch0 == '"' {
                let kind = self.parse_text(&pos)?;
                tokens.push(Token::new(kind, pos));
                continue;
            }

            // 5. Identifier or keyword
            if ch0.is_ascii_alphabetic() || ch0 == '_' {
                let kind = self.parse_word();
                tokens.push(Token::new(kind, pos));
                continue;
            }

            return Err(Error::UnexpectedChar(ch0, self.loc(&pos)));
        }
        Ok(tokens)
    }

    fn skip_block_comment(&mut self, pos: &Pos) -> Result<(), Error> {
        self.consume(); // consume '/'
        self.consume(); // consume '*'
        loop {
            match self.consume() {
                Some('*') if self.peek_nth(0) == Some('/') => {
                    self.consume();
                    return Ok(());
                }
                Some(_) => {}
                None => return Err(Error::UnterminatedComment(self.loc(pos))),
            }
        }
    }

    fn parse_word(&mut self) -> TokenKind {
        let mut lexeme = String::new();
        while let Some(ch) = self.peek_nth(0) {
            if !(ch.is_ascii_alphanumeric() || ch == '_') {
                break;
            }
            lexeme.push(ch);
            self.consume();
        }
        match keyword(&lexeme) {
            Some(kind) => kind,
            None => TokenKind::Ident(lexeme),
        }
    }

    // Text: no escapes, no newlines
    fn parse_text(&mut self, pos: &Pos) -> Result<TokenKind, Error> {
        self.consume(); // consume '"'
        let mut lexeme = String::new();
        loop {
            match self.peek_nth(0) {
                Some('"') => {
                    self.consume();
                    return Ok(TokenKind::Text(lexeme));
                }
                Some('\n') | None => return Err(Error::UnterminatedString(self.loc(pos))),
                Some(ch) if (ch as u32) > 0x7FFF => {
                    let loc = Loc {
                        col: self.col,
                        row: self.row,
                        file: self.file.to_string(),
                    };
                    return Err(Error::UnexpectedChar(ch, loc));
                }
                Some(ch) => {
                    lexeme.push(ch);
                    self.consume();
                }
            }
        }
    }

    fn parse_number(&mut self, pos: &Pos) -> Result<TokenKind, Error> {
        let mut lexeme = String::new();
        while let Some(ch) = self.peek_nth(0).filter(char::is_ascii_digit) {
            lexeme.push(ch);
            self.consume();
        }
        match lexeme.parse::<u16>() {
            Ok(num) if num <= 32767 => Ok(TokenKind::Number(num)),
            _ => Err(Error::IntegerOverflow(lexeme, self.loc(pos))),
        }
    }
}

fn symbol(ch: char) -> Option<TokenKind> {
    match ch {
        '{' => Some(TokenKind::LCurly),
        '}' => Some(TokenKind::RCurly),
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        '[' => Some(TokenKind::LBracket),
        ']' => Some(TokenKind::RBracket),
        '.' => Some(TokenKind::Period),
        ',' => Some(TokenKind::Comma),
        ';' => Some(TokenKind::Semicolon),
        '+' => Some(TokenKind::Plus),
        '-' => Some(TokenKind::Minus),
        '*' => Some(TokenKind::Star),
        '/' => Some(TokenKind::Slash),
        '&' => Some(TokenKind::Ampasand),
        '|' => Some(TokenKind::Pipe),
        '<' => Some(TokenKind::LAngle),
        '>' => Some(TokenKind::RAngle),
        '=' => Some(TokenKind::Equal),
        '~' => Some(TokenKind::Tilde),
        _ => None,
    }
}

fn keyword(s: &str) -> Option<TokenKind> {
    match s {
        "class" => Some(TokenKind::KwClass),
        "constructor" => Some(TokenKind::KwConstructor),
        "function" => Some(TokenKind::KwFunction),
        "method" => Some(TokenKind::KwMethod),
        "field" => Some(TokenKind::KwField),
        "static" => Some(TokenKind::KwStatic),
        "var" => Some(TokenKind::KwVar),
        "int" => Some(TokenKind::KwInt),
        "char" => Some(TokenKind::KwChar),
        "boolean" => Some(TokenKind::KwBoolean),
        "void" => Some(TokenKind::KwVoid),
        "true" => Some(TokenKind::KwTrue),
        "false" => Some(TokenKind::KwFalse),
        "null" => Some(TokenKind::KwNull),
        "this" => Some(TokenKind::KwThis),
        "let" => Some(TokenKind::KwLet),
        "do" => Some(TokenKind::KwDo),
        "if" => Some(TokenKind::KwIf),
        "else" => Some(TokenKind::KwElse),
        "while" => Some(TokenKind::KwWhile),
        "return" => Some(TokenKind::KwReturn),
        _ => None,
    }
}

use std::fmt;
use strum::Display;

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub pos: Pos<'a>,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, pos: Pos<'a>) -> Self {
        Token { kind, pos }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Symbols
    LCurly,    // '{'
    RCurly,    // '}'
    LParen,    // '('
    RParen,    // ')'
    LBracket,  // '['
    RBracket,  // ']'
    Period,    // '.'
    Comma,     // ','
    Semicolon, // ';'
    Plus,      // '+'
    Minus,     // '-'
    Star,      // '*'
    Slash,     // '/'
    Ampasand,  // '&'
    Pipe,      // '|'
    LAngle,    // '<'
    RAngle,    // '>'
    Equal,     // '='
    Tilde,     // '~'

    // Keywords
    KwClass,       // "class"
    KwConstructor, // "constructor"
    KwFunction,    // "function"
    KwMethod,      // "method"
    KwField,       // "field"
    KwStatic,      // "static"
    KwVar,         // "var"
    KwInt,         // "int"
    KwChar,        // "char"
    KwBoolean,     // "boolean"
    KwVoid,        // "void"
    KwTrue,        // "true"
    KwFalse,       // "false"
    KwNull,        // "null"
    KwThis,        // "this"
    KwLet,         // "let"
    KwDo,          // "do"
    KwIf,          // "if"
    KwElse,        // "else"
    KwWhile,       // "while"
    KwReturn,      // "return"

    // Identifier
    Ident(String),

    // Literals
    Number(u16),
    Text(String),
}

/// Lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "camelCase")]
pub enum TokenType {
    Keyword,
    Symbol,
    IntegerConstant,
    StringConstant,
    Identifier,
}

impl TokenKind {
    pub fn category(&self) -> TokenType {
        use TokenKind::*;
        match self {
            Ident(_) => TokenType::Identifier,
            Number(_) => TokenType::IntegerConstant,
            Text(_) => TokenType::StringConstant,
            LCurly | RCurly | LParen | RParen | LBracket | RBracket | Period | Comma
            | Semicolon | Plus | Minus | Star | Slash | Ampasand | Pipe | LAngle | RAngle
            | Equal | Tilde => TokenType::Symbol,
            _ => TokenType::Keyword,
        }
    }

    pub fn text(&self) -> String {
        use TokenKind::*;
        let s = match self {
            Ident(name) => return name.clone(),
            Number(num) => return num.to_string(),
            Text(text) => return format!("\"{}\"", text),
            LCurly => "{",
            RCurly => "}",
            LParen => "(",
            RParen => ")",
            LBracket => "[",
            RBracket => "]",
            Period => ".",
            Comma => ",",
            Semicolon => ";",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Ampasand => "&",
            Pipe => "|",
            LAngle => "<",
            RAngle => ">",
            Equal => "=",
            Tilde => "~",
            KwClass => "class",
            KwConstructor => "constructor",
            KwFunction => "function",
            KwMethod => "method",
            KwField => "field",
            KwStatic => "static",
            KwVar => "var",
            KwInt => "int",
            KwChar => "char",
            KwBoolean => "boolean",
            KwVoid => "void",
            KwTrue => "true",
            KwFalse => "false",
            KwNull => "null",
            KwThis => "this",
            KwLet => "let",
            KwDo => "do",
            KwIf => "if",
            KwElse => "else",
            KwWhile => "while",
            KwReturn => "return",
        };
        s.to_string()
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// 1-based position of the first character of a token.
#[derive(Debug, Clone, PartialEq)]
pub struct Pos<'a> {
    pub file: &'a str,
    pub row: usize,
    pub col: usize,
}

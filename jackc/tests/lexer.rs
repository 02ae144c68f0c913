use jackc::{
    error::Error,
    grammer::{
        lexer::Lexer,
        token::{TokenKind, TokenType},
    },
};

fn assert(code: &str, expect: &[TokenKind]) {
    let tokens = Lexer::new("Main.jack", code).parse().unwrap();
    let kinds: Vec<TokenKind> = tokens.into_iter().map(|token| token.kind).collect();
    assert_eq!(kinds, expect);
}

macro_rules! case {
    ($name:ident, $code:expr, $expect:expr) => {
        #[test]
        fn $name() {
            assert($code, &$expect);
        }
    };
}

use TokenKind::*;

fn id(name: &str) -> TokenKind {
    Ident(name.to_string())
}

case!(empty, "", []);

case!(
    let_statement,
    "let x = x + 1;",
    [KwLet, id("x"), Equal, id("x"), Plus, Number(1), Semicolon]
);

case!(
    comments_are_dropped,
    "// line\n/* block\n spanning */ do /** doc */ Main.run();",
    [KwDo, id("Main"), Period, id("run"), LParen, RParen, Semicolon]
);

case!(
    string_keeps_spaces,
    "\"Hello, world // not a comment\"",
    [Text("Hello, world // not a comment".to_string())]
);

case!(
    keyword_prefix_is_identifier,
    "classy do_it _x1",
    [id("classy"), id("do_it"), id("_x1")]
);

case!(
    adjacent_symbols,
    "a[i]=~(-b);",
    [
        id("a"), LBracket, id("i"), RBracket, Equal, Tilde, LParen, Minus, id("b"), RParen,
        Semicolon
    ]
);

case!(largest_integer, "32767", [Number(32767)]);

#[test]
fn positions_are_one_based() {
    let tokens = Lexer::new("Main.jack", "class Main {\n  field int x;\n}")
        .parse()
        .unwrap();
    let field = &tokens[3];
    assert_eq!(field.kind, KwField);
    assert_eq!((field.pos.row, field.pos.col), (2, 3));
}

#[test]
fn categories() {
    assert_eq!(KwWhile.category(), TokenType::Keyword);
    assert_eq!(Semicolon.category(), TokenType::Symbol);
    assert_eq!(Number(3).category(), TokenType::IntegerConstant);
    assert_eq!(Text("s".into()).category(), TokenType::StringConstant);
    assert_eq!(id("x").category(), TokenType::Identifier);
    assert_eq!(TokenType::IntegerConstant.to_string(), "integerConstant");
}

fn assert_err(code: &str) -> Error {
    let err = Lexer::new("Main.jack", code).parse().unwrap_err();
    println!("{}", err);
    err
}

#[test]
fn integer_overflow() {
    assert!(matches!(assert_err("32768"), Error::IntegerOverflow(..)));
}

#[test]
fn unterminated_string() {
    assert!(matches!(
        assert_err("let s = \"abc\n\";"),
        Error::UnterminatedString(_)
    ));
}

#[test]
fn unterminated_comment() {
    assert!(matches!(
        assert_err("/* never closed"),
        Error::UnterminatedComment(_)
    ));
}

#[test]
fn unexpected_char() {
    match assert_err("let x = 1 # 2;") {
        Error::UnexpectedChar(ch, loc) => {
            assert_eq!(ch, '#');
            assert_eq!((loc.row, loc.col), (1, 11));
        }
        err => panic!("unexpected error: {}", err),
    }
}

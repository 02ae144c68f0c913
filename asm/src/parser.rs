use arch::{
    symbols::is_symbol,
    Addr, Comp, Dest, Inst, Jump, Stmt, MAX_ADDR,
};

use crate::error::{Error, Field};

// ----------------------------------------------------------------------------
// Line

/// One source line. Blank and comment-only lines are kept with `stmt: None`
/// so the listing can show them.
#[derive(Debug, Clone)]
pub struct Line {
    pub file: String,
    pub idx: usize,
    pub stmt: Option<Stmt>,
    pub comment: Option<String>,
}

impl Line {
    pub fn parse(file: &str, idx: usize, raw: &str) -> Result<Line, Error> {
        let (code, comment) = match raw.split_once("//") {
            Some((code, comment)) => (code, Some(comment.to_string())),
            None => (raw, None),
        };
        let stmt = parse_stmt(code).map_err(|err| err.at(file, idx))?;
        Ok(Line {
            file: file.to_string(),
            idx,
            stmt,
            comment,
        })
    }

    pub fn inst(&self) -> Option<&Inst<Addr>> {
        match &self.stmt {
            Some(Stmt::Inst(inst)) => Some(inst),
            _ => None,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match &self.stmt {
            Some(Stmt::Label(name)) => Some(name),
            _ => None,
        }
    }
}

/// Parse every line of `text`.
pub fn parse(file: &str, text: &str) -> Result<Vec<Line>, Error> {
    text.lines()
        .enumerate()
        .map(|(idx, raw)| Line::parse(file, idx, raw))
        .collect()
}

// ----------------------------------------------------------------------------
// Statement

/// Parse a line with its comment already removed.
pub fn parse_stmt(code: &str) -> Result<Option<Stmt>, Error> {
    let code: String = code.chars().filter(|ch| !ch.is_whitespace()).collect();
    if code.is_empty() {
        return Ok(None);
    }

    if let Some(rest) = code.strip_prefix('(') {
        let name = rest
            .strip_suffix(')')
            .ok_or_else(|| Error::SyntaxError(code.clone()))?;
        if !is_symbol(name) {
            return Err(Error::InvalidSymbol(name.to_string()));
        }
        return Ok(Some(Stmt::Label(name.to_string())));
    }

    if let Some(operand) = code.strip_prefix('@') {
        return Ok(Some(Stmt::Inst(Inst::A(parse_addr(operand)?))));
    }

    Ok(Some(Stmt::Inst(parse_compute(&code)?)))
}

fn parse_addr(operand: &str) -> Result<Addr, Error> {
    match operand.chars().next() {
        Some(head) if head.is_ascii_digit() => {
            if !operand.chars().all(|ch| ch.is_ascii_digit()) {
                return Err(Error::InvalidSymbol(operand.to_string()));
            }
            match operand.parse::<u32>() {
                Ok(val) if val <= MAX_ADDR as u32 => Ok(Addr::Lit(val as u16)),
                _ => Err(Error::AddressOutOfRange(operand.to_string())),
            }
        }
        _ if is_symbol(operand) => Ok(Addr::Sym(operand.to_string())),
        _ => Err(Error::InvalidSymbol(operand.to_string())),
    }
}

/// `dest=comp;jump`, where `dest=` and `;jump` are optional.
fn parse_compute(code: &str) -> Result<Inst<Addr>, Error> {
    let (dest, rest) = code.split_once('=').unwrap_or(("", code));
    let (comp, jump) = rest.split_once(';').unwrap_or((rest, ""));

    macro_rules! field {
        ($Type:ident, $field:expr, $text:expr) => {
            $Type::parse($text).ok_or_else(|| Error::Encoding {
                field: $field,
                mnemonic: $text.to_string(),
            })?
        };
    }

    if code.starts_with('=') {
        return Err(Error::SyntaxError(code.to_string()));
    }

    Ok(Inst::C(
        field!(Dest, Field::Dest, dest),
        field!(Comp, Field::Comp, comp),
        field!(Jump, Field::Jump, jump),
    ))
}

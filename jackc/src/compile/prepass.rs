use crate::{
    check,
    error::Error,
    grammer::{
        parsercore::Parser,
        token::{Token, TokenKind},
    },
    optional, repeat,
    scope::{ClassScope, Kind, Signature, SubroutineKind},
};

/// Build the class scope in one linear scan: class variables and the
/// signature of every subroutine, with bodies skipped.
pub fn collect(tokens: &[Token]) -> Result<ClassScope, Error> {
    let mut p = Parser::new(tokens);
    p.enter("class");
    p.expect(TokenKind::KwClass)?;
    let (name, _) = p.ident()?;
    p.expect(TokenKind::LCurly)?;

    let mut class = ClassScope::new(&name);
    while let Some(token) = optional!(p, TokenKind::KwStatic | TokenKind::KwField) {
        let kind = match token.kind {
            TokenKind::KwStatic => Kind::Static,
            _ => Kind::Field,
        };
        for (var, token, ty) in var_names(&mut p)? {
            class
                .define(&var, &ty, kind)
                .map_err(|err| err.with_token(token))?;
        }
    }

    while check!(
        p,
        TokenKind::KwConstructor | TokenKind::KwFunction | TokenKind::KwMethod
    ) {
        let (sub, token, sig) = signature(&mut p)?;
        class
            .register(&sub, sig)
            .map_err(|err| err.with_token(token))?;
    }
    Ok(class)
}

/// `type name {, name} ;`
fn var_names<'t, 'a>(
    p: &mut Parser<'t, 'a>,
) -> Result<Vec<(String, &'t Token<'a>, String)>, Error> {
    let ty = p.type_name()?;
    let names = repeat!(p, p.ident(), TokenKind::Comma, TokenKind::Semicolon);
    p.expect(TokenKind::Semicolon)?;
    Ok(names
        .into_iter()
        .map(|(name, token)| (name, token, ty.clone()))
        .collect())
}

fn signature<'t, 'a>(
    p: &mut Parser<'t, 'a>,
) -> Result<(String, &'t Token<'a>, Signature), Error> {
    let kind = match p.next().map(|token| &token.kind) {
        Some(TokenKind::KwConstructor) => SubroutineKind::Constructor,
        Some(TokenKind::KwMethod) => SubroutineKind::Method,
        _ => SubroutineKind::Function,
    };
    let ret = p.return_type()?;
    let (name, token) = p.ident()?;

    p.expect(TokenKind::LParen)?;
    let params = repeat!(
        p,
        p.type_name().and_then(|_| p.ident()),
        TokenKind::Comma,
        TokenKind::RParen
    );
    p.expect(TokenKind::RParen)?;

    p.expect(TokenKind::LCurly)?;
    let mut n_locals = 0;
    while optional!(p, TokenKind::KwVar).is_some() {
        n_locals += var_names(p)?.len() as u16;
    }
    skip_block(p)?;

    let sig = Signature {
        kind,
        ret,
        n_args: params.len() as u16,
        n_locals,
    };
    Ok((name, token, sig))
}

/// Skip to just past the `}` closing an already opened block.
fn skip_block(p: &mut Parser) -> Result<(), Error> {
    let mut depth = 1;
    while depth > 0 {
        match p.next().map(|token| &token.kind) {
            Some(TokenKind::LCurly) => depth += 1,
            Some(TokenKind::RCurly) => depth -= 1,
            Some(_) => {}
            None => return Err(p.unexpected("`}`")),
        }
    }
    Ok(())
}

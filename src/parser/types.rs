use crate::{
    ast::{ast::VarDecl, types::Type},
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
};

use super::{
    lookups::{type_for_keyword, TYPE_NAMES},
    parser::Parser,
};

/// type = "integer" | "real" | "boolean" | "string" | "char" .
pub fn parse_type(parser: &mut Parser) -> Result<Type, Error> {
    let token = parser.expect(TYPE_NAMES)?;

    // `expect` only accepts type keywords
    Ok(type_for_keyword(token.kind).unwrap_or(Type::Error))
}

/// ident-list = IDENT { "," IDENT } .
pub fn parse_ident_list(parser: &mut Parser) -> Result<Vec<Token>, Error> {
    let mut names = vec![parser.expect(&[TokenKind::Identifier])?];
    while parser.match_any(&[TokenKind::Comma]) {
        names.push(parser.expect(&[TokenKind::Identifier])?);
    }

    Ok(names)
}

/// var-decl = ident-list ":" type .
///
/// Produces one declaration per name, all sharing the type.
pub fn parse_var_decls(parser: &mut Parser) -> Result<Vec<VarDecl>, Error> {
    let names = parse_ident_list(parser)?;
    parser.expect(&[TokenKind::Colon])?;
    let ty = parse_type(parser)?;

    Ok(names
        .into_iter()
        .map(|name| VarDecl { name, ty })
        .collect())
}

/// paramlist = "(" [ var-decl { ";" var-decl } ] ")" .
pub fn parse_params_list(parser: &mut Parser) -> Result<Vec<VarDecl>, Error> {
    let mut params = vec![];

    parser.expect(&[TokenKind::OpenParen])?;
    while parser.peek(&[TokenKind::Identifier]) {
        params.extend(parse_var_decls(parser)?);
        parser.match_any(&[TokenKind::Semicolon]);
    }
    parser.expect(&[TokenKind::CloseParen])?;

    Ok(params)
}

use crate::{
    ast::expressions::Expr,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    lookups::{
        COMPARISON_OPERATORS, EQUALITY_OPERATORS, FACTOR_OPERATORS, LITERALS, TERM_OPERATORS,
        UNARY_OPERATORS,
    },
    parser::Parser,
};

/// expression = equality .
pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_equality(parser)
}

/// equality = comparison [ ( "=" | "<>" ) comparison ] .
///
/// At most one operator: `a = b = c` does not parse.
pub fn parse_equality(parser: &mut Parser) -> Result<Expr, Error> {
    let mut expr = parse_comparison(parser)?;
    if parser.match_any(EQUALITY_OPERATORS) {
        let operator = parser.previous().clone();
        expr = Expr::binary(expr, operator, parse_comparison(parser)?);
    }

    Ok(expr)
}

/// comparison = term [ ( "<" | "<=" | ">" | ">=" ) term ] .
pub fn parse_comparison(parser: &mut Parser) -> Result<Expr, Error> {
    let mut expr = parse_term(parser)?;
    if parser.match_any(COMPARISON_OPERATORS) {
        let operator = parser.previous().clone();
        expr = Expr::binary(expr, operator, parse_term(parser)?);
    }

    Ok(expr)
}

/// term = factor { ( "+" | "-" | "or" ) factor } .
pub fn parse_term(parser: &mut Parser) -> Result<Expr, Error> {
    let mut expr = parse_factor(parser)?;
    while parser.match_any(TERM_OPERATORS) {
        let operator = parser.previous().clone();
        expr = Expr::binary(expr, operator, parse_factor(parser)?);
    }

    Ok(expr)
}

/// factor = unary { ( "*" | "/" | "and" | "mod" ) unary } .
pub fn parse_factor(parser: &mut Parser) -> Result<Expr, Error> {
    let mut expr = parse_unary(parser)?;
    while parser.match_any(FACTOR_OPERATORS) {
        let operator = parser.previous().clone();
        expr = Expr::binary(expr, operator, parse_unary(parser)?);
    }

    Ok(expr)
}

/// unary = ( "+" | "-" | "not" ) unary | primary .
pub fn parse_unary(parser: &mut Parser) -> Result<Expr, Error> {
    if parser.match_any(UNARY_OPERATORS) {
        let operator = parser.previous().clone();
        return Ok(Expr::unary(operator, parse_unary(parser)?));
    }

    parse_primary(parser)
}

/// primary = IDENT arglist | IDENT | literal | "(" expression ")" .
pub fn parse_primary(parser: &mut Parser) -> Result<Expr, Error> {
    if parser.match_any(&[TokenKind::Identifier]) {
        let name = parser.previous().clone();
        if parser.peek(&[TokenKind::OpenParen]) {
            return Ok(Expr::fn_call(name, parse_arg_list(parser)?));
        }
        return Ok(Expr::identifier(name));
    }

    if parser.match_any(LITERALS) {
        return Ok(Expr::literal(parser.previous().clone()));
    }

    let error = ErrorImpl::ExpectedExpression {
        found: parser.current_token().to_string(),
    };
    parser.expect_error(TokenKind::OpenParen, error)?;
    let expr = parse_expr(parser)?;
    parser.expect(&[TokenKind::CloseParen])?;

    Ok(expr)
}

/// arglist = "(" [ expression { "," expression } ] ")" .
pub fn parse_arg_list(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    let mut args = vec![];

    parser.expect(&[TokenKind::OpenParen])?;
    if !parser.peek(&[TokenKind::CloseParen]) {
        args.push(parse_expr(parser)?);
    }
    while parser.match_any(&[TokenKind::Comma]) {
        args.push(parse_expr(parser)?);
    }
    parser.expect(&[TokenKind::CloseParen])?;

    Ok(args)
}

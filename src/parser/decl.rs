use tracing::trace;

use crate::{
    ast::{
        ast::{Block, ConstDecl, Declarations, FuncProcDecl},
        types::Type,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    expr::parse_expr,
    parser::Parser,
    stmt::parse_compound_stmt,
    types::{parse_params_list, parse_type, parse_var_decls},
};

/// block = declarations compound-stmt .
pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    let declarations = parse_declarations(parser)?;
    let body = parse_compound_stmt(parser)?;

    Ok(Block { declarations, body })
}

/// declarations = [ const-decls ] [ var-decls ] { procfn-decl } .
pub fn parse_declarations(parser: &mut Parser) -> Result<Declarations, Error> {
    let mut declarations = Declarations::default();

    if parser.match_any(&[TokenKind::Const]) {
        loop {
            declarations.consts.push(parse_const_decl(parser)?);
            if !parser.peek(&[TokenKind::Identifier]) {
                break;
            }
        }
    }

    if parser.match_any(&[TokenKind::Var]) {
        loop {
            declarations.vars.extend(parse_var_decls(parser)?);
            parser.expect(&[TokenKind::Semicolon])?;
            if !parser.peek(&[TokenKind::Identifier]) {
                break;
            }
        }
    }

    while parser.match_any(&[TokenKind::Function, TokenKind::Procedure]) {
        declarations.funcs.push(parse_func_proc_decl(parser)?);
    }

    Ok(declarations)
}

/// const-decl = IDENT "=" expression ";" .
fn parse_const_decl(parser: &mut Parser) -> Result<ConstDecl, Error> {
    let name = parser.expect(&[TokenKind::Identifier])?;
    parser.expect(&[TokenKind::Equals])?;
    let value = parse_expr(parser)?;
    parser.expect(&[TokenKind::Semicolon])?;

    Ok(ConstDecl { name, value })
}

/// procfn-decl = ( "function" IDENT paramlist ":" type | "procedure" IDENT paramlist ) ";" block ";" .
///
/// The introducing keyword has already been consumed.
fn parse_func_proc_decl(parser: &mut Parser) -> Result<FuncProcDecl, Error> {
    let is_function = parser.previous().kind == TokenKind::Function;
    let name = parser.expect(&[TokenKind::Identifier])?;
    trace!(name = %name.value, is_function, "parsing routine declaration");

    let params = parse_params_list(parser)?;

    let return_type = if is_function {
        parser.expect(&[TokenKind::Colon])?;
        parse_type(parser)?
    } else {
        Type::Void
    };

    parser.expect(&[TokenKind::Semicolon])?;
    let block = parse_block(parser)?;
    parser.expect(&[TokenKind::Semicolon])?;

    Ok(FuncProcDecl {
        name,
        params,
        return_type,
        block,
    })
}

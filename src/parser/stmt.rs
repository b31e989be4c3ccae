use tracing::trace;

use crate::{
    ast::statements::{
        AssignStmt, CallStmt, CompoundStmt, ForStmt, IfStmt, ReadStmt, RepeatUntilStmt, Stmt,
        WhileStmt, WriteStmt,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_arg_list, parse_expr},
    parser::Parser,
    types::parse_ident_list,
};

/// statement = write-stmt | read-stmt | assign-stmt | call-stmt | if-stmt |
///             while-stmt | repeat-stmt | for-stmt | compound-stmt .
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    trace!(token = %parser.current_token(), "parsing statement");

    if parser.match_any(&[TokenKind::Write, TokenKind::Writeln]) {
        return parse_write_stmt(parser);
    }
    if parser.match_any(&[TokenKind::Identifier]) {
        return if parser.match_any(&[TokenKind::Assign]) {
            parse_assign_stmt(parser)
        } else {
            parse_call_stmt(parser)
        };
    }
    if parser.match_any(&[TokenKind::Read]) {
        return parse_read_stmt(parser);
    }
    if parser.match_any(&[TokenKind::If]) {
        return parse_if_stmt(parser);
    }
    if parser.match_any(&[TokenKind::While]) {
        return parse_while_stmt(parser);
    }
    if parser.match_any(&[TokenKind::Repeat]) {
        return parse_repeat_stmt(parser);
    }
    if parser.match_any(&[TokenKind::For]) {
        return parse_for_stmt(parser);
    }
    if parser.peek(&[TokenKind::Begin]) {
        return Ok(Stmt::Compound(parse_compound_stmt(parser)?));
    }

    Err(parser.unexpected())
}

/// compound-stmt = "begin" [ statement { ";" statement } ] "end" .
///
/// Separators are optional, so a `;` right before `end` is accepted.
pub fn parse_compound_stmt(parser: &mut Parser) -> Result<CompoundStmt, Error> {
    parser.expect(&[TokenKind::Begin])?;

    let mut body = vec![];
    while !parser.match_any(&[TokenKind::End]) {
        body.push(parse_stmt(parser)?);
        parser.match_any(&[TokenKind::Semicolon]);
    }

    Ok(CompoundStmt { body })
}

/// write-stmt = ( "writeln" | "write" ) arglist .
fn parse_write_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let newline = parser.previous().kind == TokenKind::Writeln;
    let args = parse_arg_list(parser)?;

    Ok(Stmt::Write(WriteStmt { newline, args }))
}

/// assign-stmt = IDENT ":=" expression .
///
/// Both the identifier and `:=` have been consumed.
fn parse_assign_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let name = parser.previous_previous().clone();
    let value = parse_expr(parser)?;

    Ok(Stmt::Assign(AssignStmt { name, value }))
}

/// call-stmt = IDENT arglist .
fn parse_call_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let name = parser.previous().clone();
    let args = parse_arg_list(parser)?;

    Ok(Stmt::Call(CallStmt { name, args }))
}

/// read-stmt = "read" "(" ident-list ")" .
fn parse_read_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(&[TokenKind::OpenParen])?;
    let targets = parse_ident_list(parser)?;
    parser.expect(&[TokenKind::CloseParen])?;

    Ok(Stmt::Read(ReadStmt { targets }))
}

/// if-stmt = "if" expression "then" statement [ "else" statement ] .
fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let condition = parse_expr(parser)?;
    parser.expect(&[TokenKind::Then])?;
    let then_body = Box::new(parse_stmt(parser)?);

    // A separator between the branches is tolerated
    parser.match_any(&[TokenKind::Semicolon]);

    let else_body = if parser.match_any(&[TokenKind::Else]) {
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    Ok(Stmt::If(IfStmt {
        condition,
        then_body,
        else_body,
    }))
}

/// while-stmt = "while" expression "do" statement .
fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let condition = parse_expr(parser)?;
    parser.expect(&[TokenKind::Do])?;
    let body = Box::new(parse_stmt(parser)?);

    Ok(Stmt::While(WhileStmt { condition, body }))
}

/// repeat-stmt = "repeat" statement { ";" statement } "until" expression .
fn parse_repeat_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let mut body = vec![];
    loop {
        body.push(parse_stmt(parser)?);
        parser.match_any(&[TokenKind::Semicolon]);
        if parser.match_any(&[TokenKind::Until]) {
            break;
        }
    }
    let condition = parse_expr(parser)?;

    Ok(Stmt::RepeatUntil(RepeatUntilStmt { body, condition }))
}

/// for-stmt = "for" IDENT ":=" expression ( "to" | "downto" ) expression "do" statement .
fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let variable = parser.expect(&[TokenKind::Identifier])?;
    parser.expect(&[TokenKind::Assign])?;
    let start = parse_expr(parser)?;

    let ascending = parser.match_any(&[TokenKind::To]);
    if !ascending {
        parser.expect(&[TokenKind::Downto])?;
    }

    let end = parse_expr(parser)?;
    parser.expect(&[TokenKind::Do])?;
    let body = Box::new(parse_stmt(parser)?);

    Ok(Stmt::For(ForStmt {
        variable,
        ascending,
        start,
        end,
        body,
    }))
}

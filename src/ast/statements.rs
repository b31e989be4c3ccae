use std::slice::{Iter, IterMut};

use crate::lexer::tokens::Token;

use super::expressions::Expr;

/// Statement Types
///
/// One variant per statement form; every pass matches on it exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Compound(CompoundStmt),
    Assign(AssignStmt),
    Write(WriteStmt),
    Read(ReadStmt),
    If(IfStmt),
    While(WhileStmt),
    RepeatUntil(RepeatUntilStmt),
    For(ForStmt),
    Call(CallStmt),
}

/// `begin stmt; stmt; ... end`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundStmt {
    pub body: Vec<Stmt>,
}

impl CompoundStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
    pub fn iter_mut(&mut self) -> IterMut<'_, Stmt> {
        self.body.iter_mut()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub name: Token,
    pub value: Expr,
}

/// `write(...)` or, when `newline` is set, `writeln(...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteStmt {
    pub newline: bool,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadStmt {
    pub targets: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: Box<Stmt>,
    pub else_body: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepeatUntilStmt {
    pub body: Vec<Stmt>,
    pub condition: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub variable: Token,
    /// `to` when set, `downto` otherwise.
    pub ascending: bool,
    pub start: Expr,
    pub end: Expr,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallStmt {
    pub name: Token,
    pub args: Vec<Expr>,
}

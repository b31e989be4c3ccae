use crate::lexer::tokens::Token;

use super::{expressions::Expr, statements::CompoundStmt, types::Type};

/// Root of the tree: `program NAME; block .`
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub name: Token,
    pub block: Block,
}

/// Declarations followed by the block's body.
///
/// Every block opens a fresh lexical scope during type analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub declarations: Declarations,
    pub body: CompoundStmt,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Declarations {
    pub consts: Vec<ConstDecl>,
    pub vars: Vec<VarDecl>,
    pub funcs: Vec<FuncProcDecl>,
}

impl Declarations {
    pub fn is_empty(&self) -> bool {
        self.consts.is_empty() && self.vars.is_empty() && self.funcs.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: Token,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub name: Token,
    pub value: Expr,
}

/// A function, or a procedure when `return_type` is `Type::Void`.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncProcDecl {
    pub name: Token,
    pub params: Vec<VarDecl>,
    pub return_type: Type,
    pub block: Block,
}

impl FuncProcDecl {
    pub fn is_procedure(&self) -> bool {
        self.return_type == Type::Void
    }
}

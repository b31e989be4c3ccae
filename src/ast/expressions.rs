use crate::lexer::tokens::Token;

use super::types::Type;

/// An expression node together with its resolved type.
///
/// `ty` stays `None` until the type checker visits the node.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: Option<Type>,
}

/// Expression Types
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Token),
    Identifier(Token),
    Unary {
        operator: Token,
        operand: Box<Expr>,
    },
    Binary {
        operator: Token,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    FnCall {
        name: Token,
        args: Vec<Expr>,
    },
    /// Implicit conversion to the node's `ty`; only the type checker creates these.
    TypeCast(Box<Expr>),
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Expr { kind, ty: None }
    }

    pub fn literal(token: Token) -> Self {
        Expr::new(ExprKind::Literal(token))
    }

    pub fn identifier(token: Token) -> Self {
        Expr::new(ExprKind::Identifier(token))
    }

    pub fn unary(operator: Token, operand: Expr) -> Self {
        Expr::new(ExprKind::Unary {
            operator,
            operand: Box::new(operand),
        })
    }

    pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::new(ExprKind::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn fn_call(name: Token, args: Vec<Expr>) -> Self {
        Expr::new(ExprKind::FnCall { name, args })
    }

    /// Replaces this node, in place, with a cast to `target` that owns the original.
    pub fn wrap_in_cast(&mut self, target: Type) {
        let kind = std::mem::replace(&mut self.kind, ExprKind::Literal(Token::default()));
        let inner = Expr { kind, ty: self.ty };
        self.kind = ExprKind::TypeCast(Box::new(inner));
        self.ty = Some(target);
    }

    pub fn is_cast(&self) -> bool {
        matches!(self.kind, ExprKind::TypeCast(_))
    }
}

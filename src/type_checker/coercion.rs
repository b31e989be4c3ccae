//! Typing and coercion rules for operators and assignments.
//!
//! Both binary tables are keyed on the operand types as they were before any
//! cast was inserted.

use crate::{ast::types::Type, lexer::tokens::TokenKind};

/// Result type of `left op right`, or `Type::Error` when the operands are invalid.
pub fn binary_result_type(operator: TokenKind, left: Type, right: Type) -> Type {
    use TokenKind::{
        And, Equals, Greater, GreaterEquals, Less, LessEquals, Minus, Mod, NotEquals, Or, Plus,
        Slash, Star,
    };

    let numeric = left.is_numeric() && right.is_numeric();
    let same = left == right;

    match operator {
        Plus | Minus | Star | Slash if numeric => {
            if same {
                left
            } else {
                Type::Real
            }
        }
        Plus if left == Type::String || right == Type::String => Type::String,
        Mod if left == Type::Integer && same => Type::Integer,
        Less | LessEquals | Greater | GreaterEquals
            if numeric || (same && matches!(left, Type::String | Type::Char)) =>
        {
            Type::Boolean
        }
        Equals | NotEquals if numeric || same => Type::Boolean,
        And | Or if same && matches!(left, Type::Integer | Type::Boolean) => left,
        _ => Type::Error,
    }
}

/// Casts to apply to the (left, right) operands of a valid binary expression.
///
/// An `Integer` beside a `Real` becomes `Real`; anything beside a `String`
/// becomes `String`.
pub fn binary_operand_casts(left: Type, right: Type) -> (Option<Type>, Option<Type>) {
    match (left, right) {
        (Type::Integer, Type::Real) => (Some(Type::Real), None),
        (Type::Real, Type::Integer) => (None, Some(Type::Real)),
        (Type::String, right) if right != Type::String => (None, Some(Type::String)),
        (left, Type::String) if left != Type::String => (Some(Type::String), None),
        _ => (None, None),
    }
}

/// Outcome of converting a value to a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// The value already has the target type.
    Exact,
    /// The value needs a cast to the target type.
    Cast(Type),
    Invalid,
}

/// Assignment and argument passing rule.
///
/// The only widening conversions are integer to real, char to integer and
/// char to string.
pub fn assignment_coercion(source: Type, target: Type) -> Coercion {
    if source == target {
        return Coercion::Exact;
    }

    match (source, target) {
        (Type::Integer, Type::Real) | (Type::Char, Type::Integer) | (Type::Char, Type::String) => {
            Coercion::Cast(target)
        }
        _ => Coercion::Invalid,
    }
}

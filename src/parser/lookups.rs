//! Token sets shared by the grammar rules.
//!
//! Operator precedence is encoded by rule nesting, loosest first:
//! equality, comparison, term, factor, unary, primary.

use crate::{ast::types::Type, lexer::tokens::TokenKind};

pub const EQUALITY_OPERATORS: &[TokenKind] = &[TokenKind::Equals, TokenKind::NotEquals];

pub const COMPARISON_OPERATORS: &[TokenKind] = &[
    TokenKind::Less,
    TokenKind::LessEquals,
    TokenKind::Greater,
    TokenKind::GreaterEquals,
];

pub const TERM_OPERATORS: &[TokenKind] = &[TokenKind::Plus, TokenKind::Minus, TokenKind::Or];

pub const FACTOR_OPERATORS: &[TokenKind] = &[
    TokenKind::Star,
    TokenKind::Slash,
    TokenKind::And,
    TokenKind::Mod,
];

pub const UNARY_OPERATORS: &[TokenKind] = &[TokenKind::Plus, TokenKind::Minus, TokenKind::Not];

pub const LITERALS: &[TokenKind] = &[
    TokenKind::IntegerLiteral,
    TokenKind::RealLiteral,
    TokenKind::BooleanLiteral,
    TokenKind::CharLiteral,
    TokenKind::StringLiteral,
];

pub const TYPE_NAMES: &[TokenKind] = &[
    TokenKind::Integer,
    TokenKind::Real,
    TokenKind::Boolean,
    TokenKind::String,
    TokenKind::Char,
];

/// Maps a type keyword to the type it names.
pub fn type_for_keyword(kind: TokenKind) -> Option<Type> {
    match kind {
        TokenKind::Integer => Some(Type::Integer),
        TokenKind::Real => Some(Type::Real),
        TokenKind::Boolean => Some(Type::Boolean),
        TokenKind::String => Some(Type::String),
        TokenKind::Char => Some(Type::Char),
        _ => None,
    }
}

//! Value types of the language.
//!
//! Promotion only ever goes from `Integer` to `Real`; the remaining implicit
//! conversions (`Char` to `Integer` or `String`) apply to assignments and
//! arguments only.

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Integer,
    Real,
    Boolean,
    String,
    Char,
    /// The "no value" type of statements and procedures.
    Void,
    Error,
}

impl Type {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Integer | Type::Real)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Type::Integer => "integer",
            Type::Real => "real",
            Type::Boolean => "boolean",
            Type::String => "string",
            Type::Char => "char",
            Type::Void => "void",
            Type::Error => "error",
        };
        write!(f, "{}", name)
    }
}

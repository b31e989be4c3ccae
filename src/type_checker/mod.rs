//! Semantic analysis.
//!
//! Resolves every name against a chain of lexical scopes, computes the type
//! of each expression and inserts the implicit conversions the language
//! allows. Analysis stops at the first error.

pub mod coercion;
pub mod symbols;
pub mod type_checker;

#[cfg(test)]
mod tests;

//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive descent parser that transforms a stream
//! of tokens into a `Program` node. It handles:
//!
//! - Declarations (constants, variables, functions and procedures)
//! - Statements (assignment, calls, I/O, control flow, compound blocks)
//! - Expressions, with precedence encoded by rule nesting
//! - Fail-fast error reporting with the offending source line
//!
//! Each grammar rule is one function; the rule is quoted in its doc comment.

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

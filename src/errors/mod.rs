//! The failure value shared by the parser and the type checker.
//!
//! Every error knows where it happened and, for the caret diagnostic, its
//! name and an optional tip.

pub mod errors;

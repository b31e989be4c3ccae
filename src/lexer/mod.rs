//! Token source for the parser.
//!
//! `Lexer` walks the input with an ordered table of anchored regexes and hands
//! out one token per call. Keywords match in any letter case, comments and
//! whitespace are dropped, and malformed input becomes an `Error` token so the
//! parser decides how to report it.

pub mod lexer;
pub mod tokens;

//! Read-only views of a (possibly annotated) program tree.
//!
//! - `printer` turns the tree back into Pascal source
//! - `xml` dumps the tree, with resolved types, as XML

pub mod printer;
pub mod xml;

#[cfg(test)]
mod tests;

/// Syntax tree produced by the parser and annotated by the type checker.
///
/// - ast: program, block and declaration nodes
/// - expressions: expression nodes with their resolved type slot
/// - statements: one enum variant per statement form
/// - types: value types of the language
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;

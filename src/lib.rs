#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod render;
pub mod type_checker;

extern crate regex;

/// A 1-based line/column location inside a named source file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(line: u32, column: u32, file: Rc<String>) -> Self {
        Position { line, column, file }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Returns the text of the given 1-based line, without its line terminator.
pub fn get_line_at_position(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source
        .split('\n')
        .nth(line as usize - 1)
        .map(|text| text.trim_end_matches('\r'))
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line_at_position() {
        let source = "Hello, world!\nprogram T;\r\n\nTesting { }\n";

        assert_eq!(super::get_line_at_position(source, 1), Some("Hello, world!"));
        assert_eq!(super::get_line_at_position(source, 2), Some("program T;"));
        assert_eq!(super::get_line_at_position(source, 4), Some("Testing { }"));
        assert_eq!(super::get_line_at_position(source, 0), None);
        assert_eq!(super::get_line_at_position(source, 9), None);
    }

    #[test]
    fn test_render_diagnostic() {
        use crate::parser::parser::parse_source;

        let source = "program T;\nbegin\n  x := ;\nend.";
        let error = parse_source(source, "final.pas").unwrap_err();
        let rendered = super::render_diagnostic(&error, source);

        assert_eq!(
            rendered,
            "Error: ExpectedExpression (Expressions start with an identifier, a literal, an operator or `(`)\n\
             -> final.pas\n  |\n3 | x := ;\n  | -----^"
        );
    }
}

/// Formats an error as a caret diagnostic.
///
/// ```text
/// Error: UnknownVariable (message)
/// -> final.pas
///    |
/// 20 | x := 1;
///    | ^
/// ```
///
/// The offending line comes from the error itself when the parser captured it,
/// otherwise it is looked up in `source`.
pub fn render_diagnostic(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let line_text = error
        .get_source_line()
        .map(String::from)
        .or_else(|| get_line_at_position(source, position.line).map(String::from))
        .unwrap_or_default();

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    let mut output = String::new();
    if let ErrorTip::None = error.get_tip() {
        output.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        output.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    output.push_str(&format!("-> {}\n", position.file));
    output.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    output.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let column = (position.column as usize).max(1);
    let arrows = column.saturating_sub(removed_whitespace).max(1);

    output.push_str(&format!("{:>padding$} {:->arrows$}", "|", "^"));
    output
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

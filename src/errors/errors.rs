use std::fmt::Display;

use thiserror::Error;

use crate::{ast::types::Type, Position};

/// The single failure value of a compilation pass.
///
/// Both passes are fail-fast: the first error found is the only one reported.
/// The details are boxed so a `Result<_, Error>` stays one pointer wide.
#[derive(Error, Debug, Clone, PartialEq)]
#[error(transparent)]
pub struct Error {
    details: Box<ErrorDetails>,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{position}: {internal_error}")]
struct ErrorDetails {
    internal_error: ErrorImpl,
    position: Position,
    source_line: Option<String>,
}

/// Which pass produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Semantic,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            details: Box::new(ErrorDetails {
                internal_error: error_impl,
                position,
                source_line: None,
            }),
        }
    }

    /// Attaches the full text of the offending source line.
    pub fn with_source_line(mut self, line: Option<String>) -> Self {
        self.details.source_line = line;
        self
    }

    pub fn get_position(&self) -> &Position {
        &self.details.position
    }

    pub fn get_source_line(&self) -> Option<&str> {
        self.details.source_line.as_deref()
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.details.internal_error
    }

    pub fn get_message(&self) -> String {
        self.details.internal_error.to_string()
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.details.internal_error {
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedEndOfInput
            | ErrorImpl::LexicalError { .. }
            | ErrorImpl::ExpectedToken { .. }
            | ErrorImpl::ExpectedExpression { .. } => ErrorKind::Syntax,
            ErrorImpl::NameAlreadyExists { .. }
            | ErrorImpl::UnknownVariable { .. }
            | ErrorImpl::FunctionNotFound { .. }
            | ErrorImpl::InvalidOperands { .. }
            | ErrorImpl::InvalidType { .. }
            | ErrorImpl::ArgumentCountMismatch { .. }
            | ErrorImpl::UnknownReadTarget { .. }
            | ErrorImpl::ConstantAssignment { .. } => ErrorKind::Semantic,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.details.internal_error {
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedEndOfInput => "UnexpectedEndOfInput",
            ErrorImpl::LexicalError { .. } => "LexicalError",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ErrorImpl::NameAlreadyExists { .. } => "NameAlreadyExists",
            ErrorImpl::UnknownVariable { .. } => "UnknownVariable",
            ErrorImpl::FunctionNotFound { .. } => "FunctionNotFound",
            ErrorImpl::InvalidOperands { .. } => "InvalidOperands",
            ErrorImpl::InvalidType { .. } => "InvalidType",
            ErrorImpl::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            ErrorImpl::UnknownReadTarget { .. } => "UnknownReadTarget",
            ErrorImpl::ConstantAssignment { .. } => "ConstantAssignment",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.details.internal_error {
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected {}, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedEndOfInput => ErrorTip::Suggestion(String::from(
                "The file ended early, is an `end.` missing?",
            )),
            ErrorImpl::LexicalError { message } => ErrorTip::Suggestion(message.clone()),
            ErrorImpl::ExpectedToken { expected, found } => {
                ErrorTip::Suggestion(format!("Expecting {}, found {}", expected, found))
            }
            ErrorImpl::ExpectedExpression { .. } => ErrorTip::Suggestion(String::from(
                "Expressions start with an identifier, a literal, an operator or `(`",
            )),
            ErrorImpl::NameAlreadyExists { name } => ErrorTip::Suggestion(format!(
                "`{}` is already declared in this block",
                name
            )),
            ErrorImpl::UnknownVariable { name } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", name))
            }
            ErrorImpl::FunctionNotFound { name } => ErrorTip::Suggestion(format!(
                "`{}` is not a declared function or procedure",
                name
            )),
            ErrorImpl::InvalidOperands { .. } => ErrorTip::None,
            ErrorImpl::InvalidType { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::ArgumentCountMismatch {
                expected, received, ..
            } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::UnknownReadTarget { name } => {
                ErrorTip::Suggestion(format!("Declare `{}` as a variable first", name))
            }
            ErrorImpl::ConstantAssignment { name } => {
                ErrorTip::Suggestion(format!("`{}` is a constant", name))
            }
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("Unexpected {token}")]
    UnexpectedToken { token: String },
    #[error("Unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("{message}")]
    LexicalError { message: String },
    #[error("Expecting one of {{{expected}}}")]
    ExpectedToken { expected: String, found: String },
    #[error("Expecting identifier or literal")]
    ExpectedExpression { found: String },
    #[error("Name \"{name}\" already exists")]
    NameAlreadyExists { name: String },
    #[error("Unknown variable \"{name}\"")]
    UnknownVariable { name: String },
    #[error("Function \"{name}\" not found")]
    FunctionNotFound { name: String },
    #[error("Invalid operands: {left} {operator} {right}")]
    InvalidOperands {
        operator: String,
        left: Type,
        right: Type,
    },
    #[error("Invalid type: cannot convert {received} to {expected}")]
    InvalidType { expected: Type, received: Type },
    #[error("\"{function}\" takes {expected} arguments but {received} were supplied")]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("Name \"{name}\" does not exist in the current context")]
    UnknownReadTarget { name: String },
    #[error("Cannot assign to constant \"{name}\"")]
    ConstantAssignment { name: String },
}

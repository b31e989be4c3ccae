//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct, its token handling helpers and
//! the `program` production. The parser is recursive descent: one function per
//! grammar rule, spread over the `decl`, `stmt`, `expr` and `types` modules.
//!
//! It keeps one token of lookahead plus the two most recently consumed tokens,
//! which lets a rule decide its shape after consuming an identifier and the
//! token that follows it.

use std::rc::Rc;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind, TokenSource},
    },
};

use super::decl::parse_block;

/// The main parser structure that maintains parsing state.
pub struct Parser<'a> {
    /// Where tokens are pulled from, one at a time
    source: Box<dyn TokenSource + 'a>,
    /// The lookahead token
    token: Token,
    /// The most recently consumed token
    previous: Token,
    /// The token consumed before `previous`
    previous_previous: Token,
}

impl<'a> Parser<'a> {
    /// Creates a new Parser and primes the lookahead.
    pub fn new(source: impl TokenSource + 'a) -> Self {
        let mut source: Box<dyn TokenSource + 'a> = Box::new(source);
        let token = source.next_token();

        Parser {
            source,
            previous: token.clone(),
            previous_previous: token.clone(),
            token,
        }
    }

    /// Returns the lookahead token without consuming it.
    pub fn current_token(&self) -> &Token {
        &self.token
    }

    /// Returns the kind of the lookahead token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.token.kind
    }

    /// The most recently consumed token.
    pub fn previous(&self) -> &Token {
        &self.previous
    }

    /// The token consumed just before [`Parser::previous`].
    pub fn previous_previous(&self) -> &Token {
        &self.previous_previous
    }

    /// Like [`Parser::match_any`], but never consumes.
    pub fn peek(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.token.kind)
    }

    /// Consumes the lookahead token when its kind is one of `kinds`.
    ///
    /// Returns false and leaves the parser untouched otherwise.
    pub fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        if !self.peek(kinds) {
            return false;
        }

        let next = self.source.next_token();
        let consumed = std::mem::replace(&mut self.token, next);
        self.previous_previous = std::mem::replace(&mut self.previous, consumed);
        true
    }

    /// Consumes a token of one of the given kinds or fails with an
    /// "expecting one of" error.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) with the consumed token if the lookahead matches.
    pub fn expect(&mut self, kinds: &[TokenKind]) -> Result<Token, Error> {
        if self.match_any(kinds) {
            return Ok(self.previous.clone());
        }

        if self.token.kind == TokenKind::Error {
            return Err(self.unexpected());
        }

        let expected = kinds
            .iter()
            .map(|kind| kind.to_string())
            .collect::<Vec<String>>()
            .join(", ");
        Err(self.error(ErrorImpl::ExpectedToken {
            expected,
            found: self.token.to_string(),
        }))
    }

    /// Expects a token of the specified kind with a custom error.
    pub fn expect_error(&mut self, kind: TokenKind, error: ErrorImpl) -> Result<Token, Error> {
        if self.match_any(&[kind]) {
            Ok(self.previous.clone())
        } else if self.token.kind == TokenKind::Error {
            Err(self.unexpected())
        } else {
            Err(self.error(error))
        }
    }

    /// Builds an error located at the lookahead token.
    pub fn error(&self, error: ErrorImpl) -> Error {
        let position = self.token.span.start.clone();
        let line = self.source.line_text(position.line);
        Error::new(error, position).with_source_line(line)
    }

    /// The error for a lookahead token no rule accepts here.
    ///
    /// Lexer error tokens are reported with the lexer's own text.
    pub fn unexpected(&self) -> Error {
        match self.token.kind {
            TokenKind::Error => self.error(ErrorImpl::LexicalError {
                message: self.token.value.clone(),
            }),
            TokenKind::Eof => self.error(ErrorImpl::UnexpectedEndOfInput),
            _ => self.error(ErrorImpl::UnexpectedToken {
                token: self.token.to_string(),
            }),
        }
    }

    pub fn file_name(&self) -> Rc<String> {
        self.source.file_name()
    }
}

/// program = "program" IDENT ";" block "." .
pub fn parse_program(parser: &mut Parser) -> Result<Program, Error> {
    parser.expect(&[TokenKind::Program])?;
    let name = parser.expect(&[TokenKind::Identifier])?;
    parser.expect(&[TokenKind::Semicolon])?;

    let block = parse_block(parser)?;
    parser.expect(&[TokenKind::Period])?;

    Ok(Program { name, block })
}

/// Parses a whole program from a token source.
///
/// This is the main entry point for parsing. Parsing stops at the first error;
/// any token left after the closing `.` is an error too.
pub fn parse(source: impl TokenSource) -> Result<Program, Error> {
    let mut parser = Parser::new(source);
    let program = parse_program(&mut parser)?;

    if parser.current_token_kind() != TokenKind::Eof {
        return Err(parser.unexpected());
    }

    tracing::debug!(
        file = %parser.file_name(),
        program = %program.name.value,
        "parsed program"
    );
    Ok(program)
}

/// Lexes and parses `source` in one go.
pub fn parse_source(source: &str, file: &str) -> Result<Program, Error> {
    parse(Lexer::new(source.to_string(), Some(file.to_string())))
}

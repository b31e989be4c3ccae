use std::{collections::VecDeque, rc::Rc};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{get_line_at_position, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, TokenSource, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(regex: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(regex).expect("lexer patterns are valid regular expressions"),
        handler,
    }
}

lazy_static! {
    /// Tried in order against the remaining input; the first match wins.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern(r"^\s+", skip_handler),
        pattern(r"^//[^\n]*", skip_handler),
        pattern(r"^\{[^}]*\}", skip_handler),
        pattern(r"^\{", unterminated_comment_handler),
        pattern(r"^\(\*(?s:.*?)\*\)", skip_handler),
        pattern(r"^\(\*", unterminated_comment_handler),
        pattern(r"^[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", real_handler),
        pattern(r"^[0-9]+", integer_handler),
        pattern(r"^'(?:[^'\n]|'')*'", string_handler),
        pattern(r"^'[^\n]*", unterminated_string_handler),
        pattern(r"^[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        pattern(r"^:=", MK_DEFAULT_HANDLER!(TokenKind::Assign, ":=")),
        pattern(r"^<>", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "<>")),
        pattern(r"^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern(r"^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern(r"^<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern(r"^>", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern(r"^=", MK_DEFAULT_HANDLER!(TokenKind::Equals, "=")),
        pattern(r"^\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern(r"^-", MK_DEFAULT_HANDLER!(TokenKind::Minus, "-")),
        pattern(r"^\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern(r"^/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern(r"^\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern(r"^\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern(r"^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern(r"^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern(r"^:", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        pattern(r"^\.", MK_DEFAULT_HANDLER!(TokenKind::Period, ".")),
    ];
}

/// Regex driven tokenizer that produces tokens on demand.
///
/// Lexical problems never stop the lexer; they surface as `TokenKind::Error`
/// tokens carrying the diagnostic text.
pub struct Lexer {
    pending: VecDeque<Token>,
    source: String,
    pos: usize,
    line: u32,
    column: u32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pending: VecDeque::new(),
            source,
            pos: 0,
            line: 1,
            column: 1,
            file: file_name,
        }
    }

    /// Moves past `n` bytes of input, keeping line and column current.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for c in self.source[self.pos..end].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
    }

    pub fn push(&mut self, token: Token) {
        self.pending.push_back(token);
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column, Rc::clone(&self.file))
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn matched_len(&self, regex: &Regex) -> usize {
        regex.find(self.remainder()).map(|m| m.end()).unwrap_or(0)
    }

    fn push_error(&mut self, message: String, start: Position) {
        let span = Span {
            start,
            end: self.position(),
        };
        self.push(MK_TOKEN!(TokenKind::Error, message, span));
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Token {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return token;
            }

            if self.at_eof() {
                let position = self.position();
                return MK_TOKEN!(
                    TokenKind::Eof,
                    String::from("EOF"),
                    Span {
                        start: position.clone(),
                        end: position
                    }
                );
            }

            let matched = PATTERNS
                .iter()
                .find(|pattern| pattern.regex.is_match(self.remainder()));

            match matched {
                Some(pattern) => (pattern.handler)(self, &pattern.regex),
                None => {
                    let start = self.position();
                    let c = self.at().unwrap_or_default();
                    self.advance_n(c.len_utf8());
                    self.push_error(format!("Unrecognised character '{}'", c), start);
                }
            }
        }
    }

    fn file_name(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    fn line_text(&self, line: u32) -> Option<String> {
        get_line_at_position(&self.source, line).map(String::from)
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = lexer.matched_len(regex);
    lexer.advance_n(len);
}

fn unterminated_comment_handler(lexer: &mut Lexer, _regex: &Regex) {
    let start = lexer.position();
    let len = lexer.remainder().len();
    lexer.advance_n(len);
    lexer.push_error(String::from("Unterminated comment"), start);
}

fn unterminated_string_handler(lexer: &mut Lexer, regex: &Regex) {
    let start = lexer.position();
    let len = lexer.matched_len(regex);
    lexer.advance_n(len);
    lexer.push_error(String::from("Unterminated string literal"), start);
}

fn number_token(lexer: &mut Lexer, regex: &Regex, kind: TokenKind) {
    let start = lexer.position();
    let len = lexer.matched_len(regex);
    let matched = lexer.remainder()[..len].to_string();
    lexer.advance_n(len);

    let span = Span {
        start,
        end: lexer.position(),
    };
    lexer.push(MK_TOKEN!(kind, matched, span));
}

fn integer_handler(lexer: &mut Lexer, regex: &Regex) {
    number_token(lexer, regex, TokenKind::IntegerLiteral);
}

fn real_handler(lexer: &mut Lexer, regex: &Regex) {
    number_token(lexer, regex, TokenKind::RealLiteral);
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) {
    let start = lexer.position();
    let len = lexer.matched_len(regex);
    let literal = lexer.remainder()[1..len - 1].replace("''", "'");
    lexer.advance_n(len);

    let kind = if literal.chars().count() == 1 {
        TokenKind::CharLiteral
    } else {
        TokenKind::StringLiteral
    };

    let span = Span {
        start,
        end: lexer.position(),
    };
    lexer.push(MK_TOKEN!(kind, literal, span));
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let start = lexer.position();
    let len = lexer.matched_len(regex);
    let value = lexer.remainder()[..len].to_string();
    lexer.advance_n(len);

    let kind = RESERVED_LOOKUP
        .get(value.to_ascii_lowercase().as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);

    let span = Span {
        start,
        end: lexer.position(),
    };
    lexer.push(MK_TOKEN!(kind, value, span));
}

/// Lexes the whole input, returning every token up to and including `Eof`.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

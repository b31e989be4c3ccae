use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display, rc::Rc};

use crate::Span;

lazy_static! {
    /// Reserved words, keyed by their lowercase spelling.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("program", TokenKind::Program);
        map.insert("var", TokenKind::Var);
        map.insert("const", TokenKind::Const);
        map.insert("function", TokenKind::Function);
        map.insert("procedure", TokenKind::Procedure);
        map.insert("begin", TokenKind::Begin);
        map.insert("end", TokenKind::End);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("do", TokenKind::Do);
        map.insert("repeat", TokenKind::Repeat);
        map.insert("until", TokenKind::Until);
        map.insert("for", TokenKind::For);
        map.insert("to", TokenKind::To);
        map.insert("downto", TokenKind::Downto);
        map.insert("write", TokenKind::Write);
        map.insert("writeln", TokenKind::Writeln);
        map.insert("read", TokenKind::Read);
        map.insert("not", TokenKind::Not);
        map.insert("and", TokenKind::And);
        map.insert("or", TokenKind::Or);
        map.insert("mod", TokenKind::Mod);
        map.insert("integer", TokenKind::Integer);
        map.insert("real", TokenKind::Real);
        map.insert("boolean", TokenKind::Boolean);
        map.insert("string", TokenKind::String);
        map.insert("char", TokenKind::Char);
        map.insert("true", TokenKind::BooleanLiteral);
        map.insert("false", TokenKind::BooleanLiteral);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
pub enum TokenKind {
    #[default]
    Eof,
    Error,
    Identifier,

    IntegerLiteral,
    RealLiteral,
    BooleanLiteral,
    StringLiteral,
    CharLiteral,

    OpenParen,
    CloseParen,
    Comma,
    Semicolon,
    Colon,
    Period,

    Assign,        // :=
    Equals,        // =
    NotEquals,     // <>
    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Plus,
    Minus,
    Star,
    Slash,

    // Reserved
    Program,
    Var,
    Const,
    Function,
    Procedure,
    Begin,
    End,
    If,
    Then,
    Else,
    While,
    Do,
    Repeat,
    Until,
    For,
    To,
    Downto,
    Write,
    Writeln,
    Read,
    Not,
    And,
    Or,
    Mod,
    Integer,
    Real,
    Boolean,
    String,
    Char,
}

impl TokenKind {
    /// The spelling used for this kind in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Eof => "end of input",
            TokenKind::Error => "error",
            TokenKind::Identifier => "identifier",
            TokenKind::IntegerLiteral => "integer literal",
            TokenKind::RealLiteral => "real literal",
            TokenKind::BooleanLiteral => "boolean literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::CharLiteral => "char literal",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::Period => "'.'",
            TokenKind::Assign => "':='",
            TokenKind::Equals => "'='",
            TokenKind::NotEquals => "'<>'",
            TokenKind::Less => "'<'",
            TokenKind::LessEquals => "'<='",
            TokenKind::Greater => "'>'",
            TokenKind::GreaterEquals => "'>='",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Program => "'program'",
            TokenKind::Var => "'var'",
            TokenKind::Const => "'const'",
            TokenKind::Function => "'function'",
            TokenKind::Procedure => "'procedure'",
            TokenKind::Begin => "'begin'",
            TokenKind::End => "'end'",
            TokenKind::If => "'if'",
            TokenKind::Then => "'then'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::Do => "'do'",
            TokenKind::Repeat => "'repeat'",
            TokenKind::Until => "'until'",
            TokenKind::For => "'for'",
            TokenKind::To => "'to'",
            TokenKind::Downto => "'downto'",
            TokenKind::Write => "'write'",
            TokenKind::Writeln => "'writeln'",
            TokenKind::Read => "'read'",
            TokenKind::Not => "'not'",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::Mod => "'mod'",
            TokenKind::Integer => "'integer'",
            TokenKind::Real => "'real'",
            TokenKind::Boolean => "'boolean'",
            TokenKind::String => "'string'",
            TokenKind::Char => "'char'",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_one_of_many(&[
            TokenKind::Identifier,
            TokenKind::IntegerLiteral,
            TokenKind::RealLiteral,
            TokenKind::BooleanLiteral,
            TokenKind::StringLiteral,
            TokenKind::CharLiteral,
        ]) {
            write!(f, "{} `{}`", self.kind, self.value)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    pub fn line(&self) -> u32 {
        self.span.start.line
    }

    pub fn column(&self) -> u32 {
        self.span.start.column
    }
}

/// A pull-based supply of tokens, the only input the parser depends on.
///
/// Once exhausted, a source keeps returning `Eof` tokens.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;

    /// Name of the file the tokens come from.
    fn file_name(&self) -> Rc<String>;

    /// Full text of the given 1-based source line, when known.
    fn line_text(&self, line: u32) -> Option<String>;
}

/// A token source over tokens that were produced up front.
pub struct TokenStream {
    tokens: std::vec::IntoIter<Token>,
    last: Token,
    file: Rc<String>,
    lines: Vec<String>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>, file: Rc<String>) -> Self {
        TokenStream {
            tokens: tokens.into_iter(),
            last: Token::default(),
            file,
            lines: vec![],
        }
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.lines = source.lines().map(String::from).collect();
        self
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Token {
        match self.tokens.next() {
            Some(token) => {
                self.last = token.clone();
                token
            }
            None => Token {
                kind: TokenKind::Eof,
                value: String::from("EOF"),
                span: Span {
                    start: self.last.span.end.clone(),
                    end: self.last.span.end.clone(),
                },
            },
        }
    }

    fn file_name(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    fn line_text(&self, line: u32) -> Option<String> {
        if line == 0 {
            return None;
        }
        self.lines.get(line as usize - 1).cloned()
    }
}

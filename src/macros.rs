//! Token building shorthands for the lexer's pattern table.

/// Builds a `Token` from its kind, text and span.
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::IntegerLiteral, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Handler for a pattern that always matches the same text, such as `:=`.
///
/// Emits one token of `$kind` spanning `$value` and moves the lexer past it.
///
/// ```ignore
/// pattern(r"^:=", MK_DEFAULT_HANDLER!(TokenKind::Assign, ":="))
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| {
            let start = lexer.position();
            lexer.advance_n($value.len());
            let span = Span {
                start,
                end: lexer.position(),
            };
            lexer.push(MK_TOKEN!($kind, String::from($value), span));
        }
    };
}

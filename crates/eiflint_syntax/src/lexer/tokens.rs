//! Token types for the lexer

use eiflint_core::lang::escapes::{self, ESCAPE_CHAR, NUMERIC_WRAPPER, PLACEHOLDER};
use eiflint_core::lang::keywords::{self, KeywordId};
use eiflint_core::lang::operators::{self, OperatorId};
use eiflint_core::lang::punctuation::{self, PunctuationId};

use crate::source::{SourceLocation, Span};

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Token types.
///
/// Whitespace and line breaks are not tokens: layout is recovered from [`Token::loc`]. Comments are kept because
/// clause categories and routine header comments are read from them.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    Ident(String),
    /// Integer literal as written (`1_000`, `0xFF`).
    Integer(String),
    /// Real literal as written (`3.14`, `1.0e-3`).
    Real(String),
    String(Literal),
    Char(Literal),

    /// Text after `--`, up to the end of the line.
    Comment(String),
    /// A character the lexer cannot classify.
    Unknown(char),

    Eof,
}

impl TokenKind {
    /// Short human-readable description used in syntax errors.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Keyword(k) => format!("`{}`", keywords::as_str(*k)),
            TokenKind::Operator(o) => format!("`{}`", operators::as_str(*o)),
            TokenKind::Punctuation(p) => format!("`{}`", punctuation::as_str(*p)),
            TokenKind::Ident(name) => format!("identifier `{name}`"),
            TokenKind::Integer(text) | TokenKind::Real(text) => format!("number `{text}`"),
            TokenKind::String(_) => "string literal".to_string(),
            TokenKind::Char(_) => "character literal".to_string(),
            TokenKind::Comment(_) => "comment".to_string(),
            TokenKind::Unknown(c) => format!("unexpected character `{}`", c.escape_debug()),
            TokenKind::Eof => "end of file".to_string(),
        }
    }
}

/// A token with its source position and the exact text it was lexed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub loc: SourceLocation,
    pub lexeme: String,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, loc: SourceLocation, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            loc,
            lexeme: lexeme.into(),
        }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TokenKind::Comment(_))
    }

    /// Identifier text, if this is an identifier.
    pub fn ident(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        }
    }
}

// ============================================================================
// LITERALS
// ============================================================================

/// One run of a string or character literal body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralPiece {
    /// Characters taken as written.
    Text(String),
    /// `%N`, `%%`, ...
    Named { code: char, value: char },
    /// `%/code/` where `code` is the text between the wrappers.
    Numeric { code: String, value: char },
    /// A `%`, line break, indentation, `%` sequence joining two physical lines.
    Wrap(String),
    /// A malformed escape, kept as written. Its value is [`PLACEHOLDER`].
    Invalid { raw: String },
}

/// A string or character literal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Literal {
    pub pieces: Vec<LiteralPiece>,
    /// `"[ ... ]"` form: taken as written, no escapes.
    pub verbatim: bool,
    /// `false` when the closing delimiter is missing.
    pub terminated: bool,
}

impl Literal {
    /// Resolved value with escapes decoded and malformed escapes replaced by the placeholder.
    pub fn value(&self) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                LiteralPiece::Text(text) => out.push_str(text),
                LiteralPiece::Named { value, .. } | LiteralPiece::Numeric { value, .. } => out.push(*value),
                LiteralPiece::Wrap(_) => {}
                LiteralPiece::Invalid { .. } => out.push(PLACEHOLDER),
            }
        }
        out
    }

    /// Body text as it appears between the delimiters.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                LiteralPiece::Text(text) => out.push_str(text),
                LiteralPiece::Named { code, .. } => {
                    out.push(ESCAPE_CHAR);
                    out.push(*code);
                }
                LiteralPiece::Numeric { code, .. } => {
                    out.push(ESCAPE_CHAR);
                    out.push(NUMERIC_WRAPPER);
                    out.push_str(code);
                    out.push(NUMERIC_WRAPPER);
                }
                LiteralPiece::Wrap(raw) | LiteralPiece::Invalid { raw } => out.push_str(raw),
            }
        }
        out
    }

    /// `true` if any escape failed to decode.
    pub fn has_invalid_escape(&self) -> bool {
        self.pieces.iter().any(|p| matches!(p, LiteralPiece::Invalid { .. }))
    }

    pub(super) fn push_char(&mut self, c: char) {
        if let Some(LiteralPiece::Text(text)) = self.pieces.last_mut() {
            text.push(c);
        } else {
            self.pieces.push(LiteralPiece::Text(c.to_string()));
        }
    }
}

/// Render `value` as a literal body. Control characters, quotes and `%` use their named escape.
///
/// ## Examples
/// ```rust
/// use eiflint_syntax::lexer::tokens::escape_text;
///
/// assert_eq!(escape_text("50%\n"), "50%%%N");
/// ```
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        let needs_escape = c.is_control() || matches!(c, ESCAPE_CHAR | '"' | '\'');
        match escapes::code_for(c) {
            Some(code) if needs_escape => {
                out.push(ESCAPE_CHAR);
                out.push(code);
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_and_render_of_mixed_literal() {
        let literal = Literal {
            pieces: vec![
                LiteralPiece::Text("a".into()),
                LiteralPiece::Named { code: 'N', value: '\n' },
                LiteralPiece::Numeric {
                    code: "0x41".into(),
                    value: 'A',
                },
                LiteralPiece::Invalid { raw: "%Z".into() },
            ],
            verbatim: false,
            terminated: true,
        };
        assert_eq!(literal.value(), "a\nA\u{FFFD}");
        assert_eq!(literal.render(), "a%N%/0x41/%Z");
        assert!(literal.has_invalid_escape());
    }

    #[test]
    fn escape_text_only_escapes_unprintables_and_delimiters() {
        assert_eq!(escape_text("say \"hi\"\t"), "say %\"hi%\"%T");
        assert_eq!(escape_text("[x] @ #"), "[x] @ #");
    }
}

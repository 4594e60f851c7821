//! Lexer for the checked language
//!
//! Handles tokenization including:
//! - Keywords (class, feature, require, ensure, once, agent, etc.) and the reserved entities
//!   (`Current`, `Result`, `Void`, ...)
//! - Identifiers, integer and real literals
//! - String and character literals with the `%` escape grammar, including `%`-newline-`%` line wrapping and
//!   verbatim `"[ ... ]"` strings
//! - Operators and punctuation, including the symbolic quantifiers `∀`, `∃` and `¦`
//! - `--` comments, kept as tokens
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token, Literal)
//! - `literals` - String/character scanning and escape decoding
//! - `numbers` - Numeric literal scanning
//! - `indent` - Leading-whitespace check (`tab-expected`)
//!
//! ## Notes
//! - Lexing never fails. Malformed escapes resolve to the placeholder character and produce an `invalid-escape`
//!   diagnostic; unknown characters become [`TokenKind::Unknown`] tokens; unterminated literals are flagged on
//!   their [`Literal`]. The parser turns the last two into `syntax-error` diagnostics.
//! - Whitespace is not emitted. Indentation violations are recorded on the side as `tab-expected` diagnostics.

mod indent;
mod literals;
mod numbers;
pub mod tokens;

pub use tokens::{Literal, LiteralPiece, Token, TokenKind};

use eiflint_core::lang::keywords;
use eiflint_core::lang::operators::OperatorId;
use eiflint_core::lang::punctuation::PunctuationId;

use crate::diagnostics::Diagnostic;
use crate::source::{SourceBuffer, Span};

// ============================================================================
// LEXER STATE
// ----------------------------------------------------------------------------
// [Start of line] → check leading blanks (tab-expected) → [Inside line]
//                                                               ↓
//                                          skip blanks, scan one token per call
//                                                               ↓
//                                                see '\n' → [Start of line]
// ============================================================================

/// Lexer over one [`SourceBuffer`].
///
/// The lexer is lazy: it implements [`Iterator`] and scans one token per call. The last token is always
/// [`TokenKind::Eof`]. Diagnostics raised while scanning accumulate on the lexer and are taken with
/// [`Lexer::into_diagnostics`].
pub struct Lexer<'a> {
    source: &'a SourceBuffer,
    text: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    at_line_start: bool,
    finished: bool,
    diagnostics: Vec<Diagnostic>,
}

/// Output of [`lex`]: the full token sequence plus lexer diagnostics.
#[derive(Debug, Clone)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source buffer.
    pub fn new(source: &'a SourceBuffer) -> Self {
        let text = source.text();
        Self {
            source,
            text,
            chars: text.char_indices().peekable(),
            current_pos: 0,
            at_line_start: true,
            finished: false,
            diagnostics: Vec::new(),
        }
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    /// Character `n` positions after the next one (`peek_nth(0)` is `peek()`).
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.text[self.current_pos..].chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.current_pos = pos + c.len_utf8();
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Advance until `current_pos` reaches byte offset `target`.
    fn advance_to(&mut self, target: usize) {
        while self.current_pos < target {
            if self.advance().is_none() {
                break;
            }
        }
    }

    fn make_token(&self, kind: TokenKind, start: usize) -> Token {
        let span = Span::new(start, self.current_pos);
        Token::new(kind, span, self.source.location(start), &self.text[start..self.current_pos])
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self, start: usize) -> Token {
        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof, start);
        };

        let kind = match c {
            '-' => {
                if self.peek() == Some('-') {
                    return self.scan_comment(start);
                }
                if self.match_char('>') {
                    TokenKind::Punctuation(PunctuationId::Arrow)
                } else {
                    TokenKind::Operator(OperatorId::Minus)
                }
            }

            '"' => return self.scan_string(start),
            '\'' => return self.scan_char(start),

            '0'..='9' => return self.scan_number(start, c),
            _ if is_ident_start(c) => return self.scan_identifier(start),

            ':' => self.compound(PunctuationId::Colon, '=', OperatorId::Assign),
            '?' => self.compound(PunctuationId::Question, '=', OperatorId::AssignAttempt),
            '.' => {
                if self.match_char('.') {
                    TokenKind::Operator(OperatorId::DotDot)
                } else {
                    TokenKind::Punctuation(PunctuationId::Dot)
                }
            }
            '/' => {
                if self.match_char('=') {
                    TokenKind::Operator(OperatorId::NotEq)
                } else if self.match_char('~') {
                    TokenKind::Operator(OperatorId::NotTilde)
                } else if self.match_char('/') {
                    TokenKind::Operator(OperatorId::SlashSlash)
                } else {
                    TokenKind::Operator(OperatorId::Slash)
                }
            }
            '\\' => {
                if self.match_char('\\') {
                    TokenKind::Operator(OperatorId::BackslashBackslash)
                } else {
                    TokenKind::Unknown('\\')
                }
            }
            '<' => self.relational(OperatorId::Lt, OperatorId::LtEq),
            '>' => self.relational(OperatorId::Gt, OperatorId::GtEq),
            '=' => TokenKind::Operator(OperatorId::Eq),
            '~' => TokenKind::Operator(OperatorId::Tilde),
            '+' => TokenKind::Operator(OperatorId::Plus),
            '*' => TokenKind::Operator(OperatorId::Star),
            '^' => TokenKind::Operator(OperatorId::Caret),
            '∀' => TokenKind::Operator(OperatorId::ForAll),
            '∃' => TokenKind::Operator(OperatorId::Exists),
            '¦' => TokenKind::Operator(OperatorId::BrokenBar),

            ',' => TokenKind::Punctuation(PunctuationId::Comma),
            ';' => TokenKind::Punctuation(PunctuationId::Semicolon),
            '!' => TokenKind::Punctuation(PunctuationId::Bang),
            '$' => TokenKind::Punctuation(PunctuationId::Dollar),
            '(' => TokenKind::Punctuation(PunctuationId::LParen),
            ')' => TokenKind::Punctuation(PunctuationId::RParen),
            '[' => TokenKind::Punctuation(PunctuationId::LBracket),
            ']' => TokenKind::Punctuation(PunctuationId::RBracket),
            '{' => TokenKind::Punctuation(PunctuationId::LBrace),
            '}' => TokenKind::Punctuation(PunctuationId::RBrace),

            other => TokenKind::Unknown(other),
        };
        self.make_token(kind, start)
    }

    /// `simple`, or `compound` when followed by `next`.
    fn compound(&mut self, simple: PunctuationId, next: char, compound: OperatorId) -> TokenKind {
        if self.match_char(next) {
            TokenKind::Operator(compound)
        } else {
            TokenKind::Punctuation(simple)
        }
    }

    fn relational(&mut self, strict: OperatorId, or_equal: OperatorId) -> TokenKind {
        if self.match_char('=') {
            TokenKind::Operator(or_equal)
        } else {
            TokenKind::Operator(strict)
        }
    }

    // ========================================================================
    // Identifier and comment scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) -> Token {
        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }
        let name = &self.text[start..self.current_pos];
        let kind = match keywords::from_str(name) {
            Some(id) => TokenKind::Keyword(id),
            None => TokenKind::Ident(name.to_string()),
        };
        self.make_token(kind, start)
    }

    /// Scan `-- text` to the end of the line. Called with the first `-` consumed.
    fn scan_comment(&mut self, start: usize) -> Token {
        self.advance();
        let body_start = self.current_pos;
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
        let body = self.text[body_start..self.current_pos].trim_end_matches('\r');
        self.check_comment_escapes(body_start, body);
        self.make_token(TokenKind::Comment(body.to_string()), start)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if self.at_line_start {
                self.scan_indentation();
            }
            match self.peek() {
                None => {
                    if self.finished {
                        return None;
                    }
                    self.finished = true;
                    return Some(self.make_token(TokenKind::Eof, self.current_pos));
                }
                Some('\n') => {
                    self.advance();
                    self.at_line_start = true;
                }
                Some(' ' | '\t' | '\r' | '\u{c}' | '\u{feff}') => {
                    self.advance();
                }
                Some(_) => {
                    let start = self.current_pos;
                    return Some(self.scan_token(start));
                }
            }
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Lex a whole source buffer.
#[tracing::instrument(skip_all, fields(file = source.name(), source_len = source.text().len()))]
pub fn lex(source: &SourceBuffer) -> Lexed {
    let mut lexer = Lexer::new(source);
    let tokens: Vec<Token> = lexer.by_ref().collect();
    let diagnostics = lexer.into_diagnostics();
    tracing::debug!(tokens = tokens.len(), diagnostics = diagnostics.len(), "lexed");
    Lexed { tokens, diagnostics }
}

// ============================================================================
// TESTS
// ============================================================================

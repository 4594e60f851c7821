//! String and character literal scanning
//!
//! Handles the `%` escape grammar, `%`-newline-`%` line wrapping and verbatim strings.

use eiflint_core::lang::escapes::{self, ESCAPE_CHAR, NUMERIC_WRAPPER, NumericEscapeError};
use eiflint_core::lang::rules::RuleId;

use super::Lexer;
use super::tokens::{Literal, LiteralPiece, Token, TokenKind};
use crate::diagnostics::Diagnostic;
use crate::source::Span;

// ============================================================================
// Escape sequence handling
// ============================================================================

/// Result of decoding one escape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Escape {
    Named { code: char, value: char },
    Numeric { code: String, value: char },
    /// `raw` includes the leading `%`.
    Invalid { raw: String, fault: EscapeFault },
}

/// Why an escape is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EscapeFault {
    UnknownCode(char),
    /// `%/` without its closing `/`.
    Unterminated,
    BadNumeric(NumericEscapeError),
    /// `%` with nothing after it on the line.
    Dangling,
}

impl EscapeFault {
    pub(crate) fn message(&self, raw: &str) -> String {
        match self {
            EscapeFault::UnknownCode(code) => {
                format!("unknown escape code `{}` in `{raw}`", code.escape_debug())
            }
            EscapeFault::Unterminated => format!("numeric escape `{raw}` is missing its closing `/`"),
            EscapeFault::BadNumeric(NumericEscapeError::Empty) => format!("numeric escape `{raw}` has no digits"),
            EscapeFault::BadNumeric(NumericEscapeError::NonDigit { base, found }) => format!(
                "`{}` is not a {} digit in numeric escape `{raw}`",
                found.escape_debug(),
                base.name()
            ),
            EscapeFault::BadNumeric(NumericEscapeError::OutOfRange { code }) => {
                format!("character code `{code}` in `{raw}` is not a valid character")
            }
            EscapeFault::Dangling => "escape character `%` is not followed by a code".to_string(),
        }
    }
}

/// Decode the escape starting right after a `%`.
///
/// ## Returns
/// - The decoded escape and the number of bytes of `rest` it consumed.
pub(crate) fn read_escape(rest: &str) -> (Escape, usize) {
    let Some(first) = rest.chars().next() else {
        return (dangling(), 0);
    };
    if matches!(first, '\n' | '\r') {
        return (dangling(), 0);
    }

    if first == NUMERIC_WRAPPER {
        let body = &rest[1..];
        let end = body.find(|c: char| matches!(c, '/' | '"' | '\'' | '\n' | '\r'));
        return match end {
            Some(end) if body[end..].starts_with(NUMERIC_WRAPPER) => {
                let code = &body[..end];
                let raw = format!("{ESCAPE_CHAR}{NUMERIC_WRAPPER}{code}{NUMERIC_WRAPPER}");
                let escape = match escapes::decode_numeric(code) {
                    Ok(value) => Escape::Numeric {
                        code: code.to_string(),
                        value,
                    },
                    Err(err) => Escape::Invalid {
                        raw,
                        fault: EscapeFault::BadNumeric(err),
                    },
                };
                (escape, end + 2)
            }
            _ => {
                let scanned = end.unwrap_or(body.len());
                let raw = format!("{ESCAPE_CHAR}{NUMERIC_WRAPPER}{}", &body[..scanned]);
                (
                    Escape::Invalid {
                        raw,
                        fault: EscapeFault::Unterminated,
                    },
                    scanned + 1,
                )
            }
        };
    }

    let consumed = first.len_utf8();
    match escapes::named(first) {
        Some(value) => (Escape::Named { code: first, value }, consumed),
        None => (
            Escape::Invalid {
                raw: format!("{ESCAPE_CHAR}{first}"),
                fault: EscapeFault::UnknownCode(first),
            },
            consumed,
        ),
    }
}

fn dangling() -> Escape {
    Escape::Invalid {
        raw: ESCAPE_CHAR.to_string(),
        fault: EscapeFault::Dangling,
    }
}

// ============================================================================
// Literal scanning
// ============================================================================

impl<'a> Lexer<'a> {
    /// Scan a string literal. Called with the opening `"` consumed.
    pub(super) fn scan_string(&mut self, start: usize) -> Token {
        if let Some(closer) = self.verbatim_closer() {
            return self.scan_verbatim(start, closer);
        }
        let literal = self.scan_literal_body('"');
        self.make_token(TokenKind::String(literal), start)
    }

    /// Scan a character literal. Called with the opening `'` consumed.
    pub(super) fn scan_char(&mut self, start: usize) -> Token {
        let literal = self.scan_literal_body('\'');
        self.make_token(TokenKind::Char(literal), start)
    }

    /// Scan up to and including `terminator`, decoding escapes. Stops before a line break.
    fn scan_literal_body(&mut self, terminator: char) -> Literal {
        let mut literal = Literal::default();
        loop {
            match self.peek() {
                None | Some('\n') | Some('\r') => break,
                Some(c) if c == terminator => {
                    self.advance();
                    literal.terminated = true;
                    break;
                }
                Some(ESCAPE_CHAR) => {
                    let escape_start = self.current_pos;
                    self.advance();
                    if self.at_line_break() {
                        self.scan_line_wrap(escape_start, &mut literal);
                    } else {
                        self.scan_escape(escape_start, &mut literal);
                    }
                }
                Some(c) => {
                    self.advance();
                    literal.push_char(c);
                }
            }
        }
        literal
    }

    fn scan_escape(&mut self, escape_start: usize, literal: &mut Literal) {
        let (escape, consumed) = read_escape(&self.text[self.current_pos..]);
        self.advance_to(self.current_pos + consumed);
        let piece = match escape {
            Escape::Named { code, value } => LiteralPiece::Named { code, value },
            Escape::Numeric { code, value } => LiteralPiece::Numeric { code, value },
            Escape::Invalid { raw, fault } => {
                self.report_escape(escape_start, &raw, &fault);
                LiteralPiece::Invalid { raw }
            }
        };
        literal.pieces.push(piece);
    }

    /// `%` at the end of a line continues the literal on the next line after a second `%`.
    fn scan_line_wrap(&mut self, escape_start: usize, literal: &mut Literal) {
        self.match_char('\r');
        self.advance();
        self.scan_indentation();
        if self.match_char(ESCAPE_CHAR) {
            literal
                .pieces
                .push(LiteralPiece::Wrap(self.text[escape_start..self.current_pos].to_string()));
            return;
        }
        let raw = self.text[escape_start..self.current_pos].to_string();
        let location = self.source.location(escape_start);
        self.report(
            Diagnostic::new(
                RuleId::InvalidEscape,
                "line wrap must continue with `%` on the next line",
                location,
                Span::new(escape_start, escape_start + 1),
            )
            .with_fix("start the continuation line with `%`"),
        );
        literal.pieces.push(LiteralPiece::Invalid { raw });
    }

    /// `Some(closer)` when the cursor is on `[` or `{` followed only by blanks up to the end of the line.
    fn verbatim_closer(&self) -> Option<char> {
        let rest = &self.text[self.current_pos..];
        let mut chars = rest.chars();
        let closer = match chars.next()? {
            '[' => ']',
            '{' => '}',
            _ => return None,
        };
        let line = rest[1..].split('\n').next().unwrap_or("");
        line.trim().is_empty().then_some(closer)
    }

    /// Scan `"[` ... `]"`. The closing delimiter must be the first non-blank text of its line.
    fn scan_verbatim(&mut self, start: usize, closer: char) -> Token {
        self.advance();
        let body_start = self.current_pos;
        let mut terminated = false;
        let mut body_end = self.text.len();

        let mut offset = body_start;
        while let Some(newline) = self.text[offset..].find('\n') {
            let line_start = offset + newline + 1;
            let line = &self.text[line_start..];
            let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
            let mut after_indent = line[indent..].chars();
            if after_indent.next() == Some(closer) && after_indent.next() == Some('"') {
                body_end = line_start + indent;
                terminated = true;
                break;
            }
            offset = line_start;
        }

        let literal = Literal {
            pieces: vec![LiteralPiece::Text(self.text[body_start..body_end].to_string())],
            verbatim: true,
            terminated,
        };
        let end = if terminated { body_end + 2 } else { self.text.len() };
        self.advance_to(end);
        self.make_token(TokenKind::String(literal), start)
    }

    /// Comments are free text; only `%` followed by an upper-case letter or `/` is read as an escape.
    pub(super) fn check_comment_escapes(&mut self, body_start: usize, body: &str) {
        let mut search = 0;
        while let Some(found) = body[search..].find(ESCAPE_CHAR) {
            let at = search + found;
            let rest = &body[at + 1..];
            let looks_like_escape = rest
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_uppercase() || c == NUMERIC_WRAPPER);
            if !looks_like_escape {
                search = at + 1;
                continue;
            }
            let (escape, consumed) = read_escape(rest);
            if let Escape::Invalid { raw, fault } = escape {
                self.report_escape(body_start + at, &raw, &fault);
            }
            search = at + 1 + consumed.max(1);
        }
    }

    fn report_escape(&mut self, escape_start: usize, raw: &str, fault: &EscapeFault) {
        let location = self.source.location(escape_start);
        let mut diagnostic = Diagnostic::new(
            RuleId::InvalidEscape,
            fault.message(raw),
            location,
            Span::new(escape_start, escape_start + raw.len()),
        );
        if let EscapeFault::UnknownCode(code) = fault {
            if code.is_ascii_lowercase() && escapes::named(code.to_ascii_uppercase()).is_some() {
                diagnostic = diagnostic.with_fix(format!("use `%{}`", code.to_ascii_uppercase()));
            }
        }
        self.report(diagnostic);
    }

    fn at_line_break(&mut self) -> bool {
        match self.peek() {
            Some('\n') => true,
            Some('\r') => self.peek_nth(1) == Some('\n'),
            _ => false,
        }
    }
}

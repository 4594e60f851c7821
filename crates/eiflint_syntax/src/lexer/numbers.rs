//! Number scanning
//!
//! Handles integer literals (decimal, `0x`, `0c`, `0b`, with `_` separators) and real literals.
//! Literals keep their written text: the checker never needs their numeric value.

use super::Lexer;
use super::tokens::{Token, TokenKind};

impl<'a> Lexer<'a> {
    pub(super) fn scan_number(&mut self, start: usize, first: char) -> Token {
        let based = first == '0'
            && self.peek().is_some_and(|c| matches!(c.to_ascii_lowercase(), 'x' | 'c' | 'b'))
            && self.peek_nth(1).is_some_and(|c| c.is_ascii_alphanumeric());
        if based {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
                self.advance();
            }
            return self.finish_number(start, false);
        }

        self.scan_digits();
        let mut is_real = false;

        // Fraction: `1.5`, but not `1..5` or `x.1.item`
        if self.peek() == Some('.') && self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
            is_real = true;
            self.advance();
            self.scan_digits();
        }

        // Exponent
        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            let signed = matches!(self.peek_nth(1), Some('+' | '-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek_nth(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                is_real = true;
                self.advance();
                if signed {
                    self.advance();
                }
                self.scan_digits();
            }
        }

        self.finish_number(start, is_real)
    }

    fn scan_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
            self.advance();
        }
    }

    fn finish_number(&mut self, start: usize, is_real: bool) -> Token {
        let text = self.text[start..self.current_pos].to_string();
        let kind = if is_real {
            TokenKind::Real(text)
        } else {
            TokenKind::Integer(text)
        };
        self.make_token(kind, start)
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::{TokenKind, lex};
    use crate::source::SourceBuffer;

    fn kinds(text: &str) -> Vec<TokenKind> {
        lex(&SourceBuffer::new("t.e", text)).tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn integers_and_reals() {
        assert_eq!(kinds("1_000")[0], TokenKind::Integer("1_000".into()));
        assert_eq!(kinds("0xFF")[0], TokenKind::Integer("0xFF".into()));
        assert_eq!(kinds("0b1010")[0], TokenKind::Integer("0b1010".into()));
        assert_eq!(kinds("3.14")[0], TokenKind::Real("3.14".into()));
        assert_eq!(kinds("1.0e-3")[0], TokenKind::Real("1.0e-3".into()));
        assert_eq!(kinds("2E8")[0], TokenKind::Real("2E8".into()));
    }

    #[test]
    fn interval_is_not_a_real() {
        let kinds = kinds("1..5");
        assert_eq!(kinds[0], TokenKind::Integer("1".into()));
        assert_eq!(kinds[2], TokenKind::Integer("5".into()));
    }
}

//! Property tests for the escape grammar.
//!
//! Any literal body assembled from plain text, named escapes and numeric escapes in all four bases lexes without
//! diagnostics, renders back to the exact source text and decodes to the expected value.

use eiflint_core::lang::escapes::{NAMED_ESCAPES, NumericBase};
use eiflint_syntax::lexer::{self, TokenKind};
use eiflint_syntax::source::SourceBuffer;
use proptest::prelude::*;

/// One run of a literal body: `(source text, decoded value)`.
fn piece() -> impl Strategy<Value = (String, String)> {
    let plain = "[a-zA-Z0-9 ,.;:!?()]{1,4}".prop_map(|s| (s.clone(), s));
    let named = prop::sample::select(NAMED_ESCAPES).prop_map(|e| (format!("%{}", e.code), e.value.to_string()));
    let numeric = (any::<char>(), prop::sample::select(NumericBase::ALL.to_vec())).prop_map(|(c, base)| {
        let n = c as u32;
        let digits = match base {
            NumericBase::Decimal => format!("{n}"),
            NumericBase::Hexadecimal => format!("{n:X}"),
            NumericBase::Octal => format!("{n:o}"),
            NumericBase::Binary => format!("{n:b}"),
        };
        (format!("%/{}{digits}/", base.prefix()), c.to_string())
    });
    prop_oneof![plain, named, numeric]
}

fn lex_string(body: &str) -> (TokenKind, usize) {
    let source = SourceBuffer::new("roundtrip.e", format!("\"{body}\"\n"));
    let lexed = lexer::lex(&source);
    (lexed.tokens[0].kind.clone(), lexed.diagnostics.len())
}

proptest! {
    #[test]
    fn string_escapes_round_trip(pieces in prop::collection::vec(piece(), 0..8)) {
        let body: String = pieces.iter().map(|(text, _)| text.as_str()).collect();
        let value: String = pieces.iter().map(|(_, value)| value.as_str()).collect();

        let (kind, diagnostics) = lex_string(&body);
        prop_assert_eq!(diagnostics, 0);
        let TokenKind::String(literal) = kind else {
            return Err(TestCaseError::fail(format!("expected a string literal, got {kind:?}")));
        };
        prop_assert!(literal.terminated);
        prop_assert_eq!(literal.render(), body);
        prop_assert_eq!(literal.value(), value);
    }

    #[test]
    fn escape_text_lexes_back_to_value(value in "[ -~\t\n\r%]{0,24}") {
        let body = eiflint_syntax::lexer::tokens::escape_text(&value);
        let (kind, diagnostics) = lex_string(&body);
        prop_assert_eq!(diagnostics, 0);
        let TokenKind::String(literal) = kind else {
            return Err(TestCaseError::fail("expected a string literal"));
        };
        prop_assert_eq!(literal.value(), value);
    }
}

proptest! {
    #[test]
    fn arbitrary_input_lexes_and_parses(text in "\\PC{0,200}") {
        let source = SourceBuffer::new("noise.e", text);
        let lexed = lexer::lex(&source);
        prop_assert_eq!(lexed.tokens.iter().filter(|t| t.is_eof()).count(), 1);
        prop_assert!(lexed.tokens.last().is_some_and(|t| t.is_eof()));
        let _ = eiflint_syntax::parser::parse(&lexed.tokens);
    }
}

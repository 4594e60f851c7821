//! `invalid-escape` severity by context.
//!
//! The lexer reports every malformed escape as an error. A malformed escape inside a comment cannot corrupt a
//! value, so it is downgraded to a warning here; inside string and character literals it stays an error.

use eiflint_core::lang::rules::{RuleId, Severity};
use eiflint_syntax::diagnostics::Diagnostic;
use eiflint_syntax::lexer::Token;

/// Downgrade `invalid-escape` diagnostics that point into a comment token.
pub fn reclassify(tokens: &[Token], diagnostics: &mut [Diagnostic]) {
    for diagnostic in diagnostics.iter_mut().filter(|d| d.rule == RuleId::InvalidEscape) {
        if in_comment(tokens, diagnostic.span.start) {
            diagnostic.severity = Severity::Warning;
        }
    }
}

/// Tokens are sorted by offset, so the only candidate is the last token starting at or before `offset`.
fn in_comment(tokens: &[Token], offset: usize) -> bool {
    let after = tokens.partition_point(|t| t.span.start <= offset);
    after
        .checked_sub(1)
        .and_then(|index| tokens.get(index))
        .is_some_and(|t| t.is_comment() && offset < t.span.end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eiflint_syntax::lexer;
    use eiflint_syntax::source::SourceBuffer;

    #[test]
    fn test_comment_escapes_become_warnings() {
        let source = SourceBuffer::new("t.e", "x := \"bad %K\" -- also %K here\n");
        let mut lexed = lexer::lex(&source);
        assert_eq!(lexed.diagnostics.len(), 2);

        reclassify(&lexed.tokens, &mut lexed.diagnostics);
        let severities: Vec<_> = lexed.diagnostics.iter().map(|d| d.severity).collect();
        assert_eq!(severities, [Severity::Error, Severity::Warning]);
    }
}

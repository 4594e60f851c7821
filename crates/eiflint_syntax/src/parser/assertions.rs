// Assertion blocks: `require`, `ensure`, class `invariant` and loop `invariant`.
//
// Each assertion is `[label:] expression`. Assertions are separated by `;` or by a line break that does not continue
// the expression. Expressions are kept as token ranges.
//
// NOTE: This file is `include!`'d into `crate::parser`.

/// Keywords that end an assertion list.
fn ends_assertions(kind: &TokenKind) -> bool {
    matches!(
        kind.keyword_id(),
        Some(
            KeywordId::Local
                | KeywordId::Do
                | KeywordId::Once
                | KeywordId::Attribute
                | KeywordId::Deferred
                | KeywordId::External
                | KeywordId::Require
                | KeywordId::Ensure
                | KeywordId::Rescue
                | KeywordId::End
                | KeywordId::Until
                | KeywordId::Loop
                | KeywordId::Variant
                | KeywordId::Note
                | KeywordId::Feature
                | KeywordId::Invariant
                | KeywordId::Inherit
                | KeywordId::Convert
                | KeywordId::Class
        )
    ) || matches!(kind, TokenKind::Eof)
}

impl<'a> Parser<'a> {
    /// Parse `require [else]`, `ensure [then]` or `invariant` and its assertions. The cursor is on the keyword.
    fn parse_assertion_block(&mut self, kind: AssertionKind) -> AssertionBlock {
        let keyword = self.advance();
        let extended = match kind {
            AssertionKind::Precondition => self.match_keyword(KeywordId::Else),
            AssertionKind::Postcondition => self.match_keyword(KeywordId::Then),
            _ => false,
        };
        AssertionBlock {
            kind,
            extended,
            assertions: self.parse_assertions(kind),
            loc: keyword.loc,
        }
    }

    fn parse_assertions(&mut self, kind: AssertionKind) -> Vec<Assertion> {
        let mut assertions = Vec::new();
        loop {
            while self.match_punct(PunctuationId::Semicolon) {}
            if ends_assertions(&self.peek().kind) {
                return assertions;
            }

            let start = self.peek();
            let label = if self.check_ident() && self.peek_at(1).kind.is_punctuation(PunctuationId::Colon) {
                let label = self.expect_ident("assertion label").ok();
                self.advance();
                label
            } else {
                None
            };

            let expr_start = self.index();
            self.scan_assertion_expr();
            let expr = TokenRange::new(expr_start, self.index());

            if expr.is_empty() {
                if let Some(label) = &label {
                    let message = format!("assertion `{}` has no expression", label.node);
                    self.report(Diagnostic::syntax(message, label.loc, label.span));
                }
            }

            let end = self.previous().map_or(start.span, |t| t.span);
            assertions.push(Assertion {
                label,
                expr,
                kind,
                span: start.span.merge(end),
                loc: start.loc,
            });
        }
    }

    /// Advance over one assertion expression.
    fn scan_assertion_expr(&mut self) {
        let mut depth = 0usize;
        let mut first = true;
        loop {
            let token = self.peek();
            if token.is_eof() {
                return;
            }
            if depth == 0 && !first {
                if token.kind.is_punctuation(PunctuationId::Semicolon) || ends_assertions(&token.kind) {
                    return;
                }
                let continues = self.previous().is_some_and(|prev| prev.kind.continues_after())
                    || token.kind.continues_before();
                if self.at_line_start() && !continues {
                    return;
                }
            }
            if depth == 0 && first && ends_assertions(&token.kind) {
                return;
            }

            match &token.kind {
                TokenKind::Keyword(KeywordId::Agent) => {
                    self.parse_agent();
                    first = false;
                    continue;
                }
                TokenKind::Keyword(KeywordId::Across | KeywordId::If | KeywordId::Inspect) => depth += 1,
                TokenKind::Keyword(KeywordId::End) => depth = depth.saturating_sub(1),
                TokenKind::Punctuation(id) if eiflint_core::lang::punctuation::is_open_delimiter(*id) => depth += 1,
                TokenKind::Punctuation(id) if eiflint_core::lang::punctuation::is_close_delimiter(*id) => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            self.advance();
            first = false;
        }
    }
}

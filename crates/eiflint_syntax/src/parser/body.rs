// Routine compounds.
//
// Bodies are not parsed into instructions. The scanner balances blocks against `end`, counts top-level
// statements (split at `;`, at line breaks and between juxtaposed instructions), records assignment targets
// and extracts loop invariants and agents.
//
// NOTE: This file is `include!`'d into `crate::parser`.

impl<'a> Parser<'a> {
    /// Scan a compound up to the keyword that ends it (`end`, `ensure`, `rescue`, or a class-level clause after a
    /// missing `end`). The cursor is after the body keyword; the terminator is not consumed.
    fn scan_compound(&mut self) -> Body {
        let mut body = Body::default();
        let start = self.index();
        let mut depth = 0usize;
        let mut statement_start = true;

        loop {
            let token = self.peek();
            if token.is_eof() {
                break;
            }

            if depth == 0 {
                let ends = matches!(
                    token.kind.keyword_id(),
                    Some(
                        KeywordId::End
                            | KeywordId::Ensure
                            | KeywordId::Rescue
                            | KeywordId::Feature
                            | KeywordId::Invariant
                            | KeywordId::Inherit
                            | KeywordId::Note
                            | KeywordId::Convert
                            | KeywordId::Class
                    )
                );
                if ends {
                    break;
                }

                if token.kind.is_punctuation(PunctuationId::Semicolon) {
                    statement_start = true;
                    self.advance();
                    continue;
                }
                let continues = self.previous().is_some_and(|prev| prev.kind.continues_after())
                    || token.kind.continues_before();
                let juxtaposed = self.previous().is_some_and(|prev| prev.kind.ends_operand())
                    && token.kind.starts_instruction();
                let new_line = self.at_line_start() && !continues;
                if statement_start || ((new_line || juxtaposed) && self.index() > start) {
                    body.statement_count += 1;
                }
                statement_start = false;
            }

            match &token.kind {
                TokenKind::Keyword(KeywordId::Invariant) => {
                    let block = self.parse_assertion_block(AssertionKind::LoopInvariant);
                    body.loop_invariants.push(block);
                    continue;
                }
                TokenKind::Keyword(KeywordId::Agent) => {
                    self.parse_agent();
                    continue;
                }
                TokenKind::Keyword(KeywordId::End) => depth = depth.saturating_sub(1),
                kind if kind.opens_block() => depth += 1,
                TokenKind::Punctuation(id) if eiflint_core::lang::punctuation::is_open_delimiter(*id) => depth += 1,
                TokenKind::Punctuation(id) if eiflint_core::lang::punctuation::is_close_delimiter(*id) => {
                    depth = depth.saturating_sub(1);
                }
                TokenKind::Operator(OperatorId::Assign | OperatorId::AssignAttempt) => self.record_assignment(&mut body),
                _ => {}
            }
            self.advance();
        }

        body.range = TokenRange::new(start, self.index());
        body
    }

    /// Record the target of the `:=` / `?=` under the cursor.
    fn record_assignment(&self, body: &mut Body) {
        let Some(target) = self.previous() else {
            return;
        };
        let qualified = self
            .previous_at(2)
            .is_some_and(|t| t.kind.is_punctuation(PunctuationId::Dot));
        if qualified {
            return;
        }
        match &target.kind {
            TokenKind::Ident(name) => body.assigned.push(Spanned::new(name.clone(), target.span, target.loc)),
            TokenKind::Keyword(KeywordId::Result) => {
                body.result_assignment.get_or_insert(target.loc);
            }
            _ => {}
        }
    }
}

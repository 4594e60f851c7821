// Type parsing.
//
// Types are kept as text plus their attachment mark; the checker never resolves them.
//
// NOTE: This file is `include!`'d into `crate::parser`.

impl<'a> Parser<'a> {
    /// `[attached | detachable | separate | ? | !] (NAME [generics] | like anchor | TUPLE [...])`
    fn parse_type(&mut self) -> PResult<TypeRef> {
        let start = self.peek();
        let mut attachment = Attachment::Default;
        loop {
            if self.match_keyword(KeywordId::Attached) || self.match_punct(PunctuationId::Bang) {
                attachment = Attachment::Attached;
            } else if self.match_keyword(KeywordId::Detachable) || self.match_punct(PunctuationId::Question) {
                attachment = Attachment::Detachable;
            } else if !self.match_keyword(KeywordId::Separate) {
                break;
            }
        }

        let text_start = self.index();
        if self.match_keyword(KeywordId::Like) {
            let anchor = self.peek();
            let anchored = matches!(anchor.kind, TokenKind::Ident(_))
                || anchor.kind.is_keyword(KeywordId::Current)
                || anchor.kind.is_keyword(KeywordId::Result);
            if !anchored {
                return Err(self.expected("an anchor after `like`"));
            }
            self.advance();
            // `like a.b`
            while self.check_punct(PunctuationId::Dot) && matches!(self.peek_at(1).kind, TokenKind::Ident(_)) {
                self.advance();
                self.advance();
            }
        } else {
            self.expect_ident("type name")?;
            if self.check_punct(PunctuationId::LBracket) {
                self.skip_balanced(PunctuationId::LBracket, PunctuationId::RBracket)?;
            }
        }

        let end = self.previous().map_or(start.span, |t| t.span);
        Ok(TypeRef {
            text: crate::token_helpers::render_range(self.tokens, TokenRange::new(text_start, self.index())),
            attachment,
            span: start.span.merge(end),
        })
    }
}

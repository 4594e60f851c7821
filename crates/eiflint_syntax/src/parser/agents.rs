// Agent expressions.
//
// Forms:
// - `agent f`, `agent f (?, x)`: target is the current object
// - `agent a.b.f (...)`, `agent (expr).f (...)`: closed target
// - `agent {T}.f (...)`: open target
// - `agent [(formals)] [: T] [require ...] [local ...] do ... [ensure ...] end [(...)]`: inline agent
//
// Agents are collected into `Parser::agents` and attached to the enclosing class.
//
// NOTE: This file is `include!`'d into `crate::parser`.

impl<'a> Parser<'a> {
    /// Parse an agent expression. The cursor is on `agent`; errors are reported in place.
    fn parse_agent(&mut self) {
        let keyword = self.advance();

        let parsed = if self.at_inline_agent() {
            self.parse_inline_agent()
                .map(|inline| (AgentTarget::Inline(Box::new(inline)), None))
        } else {
            self.parse_agent_call()
        };
        let (target, feature) = match parsed {
            Ok(parts) => parts,
            Err(err) => {
                self.report(err);
                return;
            }
        };

        let args = if self.check_punct(PunctuationId::LParen) {
            match self.skip_balanced(PunctuationId::LParen, PunctuationId::RParen) {
                Ok(inner) => Some(self.agent_args(inner)),
                Err(err) => {
                    self.report(err);
                    return;
                }
            }
        } else {
            None
        };

        let end = self.previous().map_or(keyword.span, |t| t.span);
        self.agents.push(AgentExpr {
            target,
            feature,
            args,
            span: keyword.span.merge(end),
            loc: keyword.loc,
        });
    }

    /// Look past optional formals and result type for the start of an inline agent body.
    fn at_inline_agent(&mut self) -> bool {
        let saved = self.save();
        let mut ok = true;
        if self.check_punct(PunctuationId::LParen) {
            ok = self.skip_balanced(PunctuationId::LParen, PunctuationId::RParen).is_ok();
        }
        if ok && self.match_punct(PunctuationId::Colon) {
            ok = self.parse_type().is_ok();
        }
        let inline = ok
            && matches!(
                self.peek().kind.keyword_id(),
                Some(KeywordId::Do | KeywordId::Once | KeywordId::Require | KeywordId::Local)
            );
        self.restore(saved);
        inline
    }

    fn parse_inline_agent(&mut self) -> PResult<InlineAgent> {
        let mut inline = InlineAgent::default();
        if self.check_punct(PunctuationId::LParen) {
            self.advance();
            inline.params = self.parse_entity_list("agent argument name")?;
            self.expect_punct(PunctuationId::RParen, "to close the agent arguments")?;
        }
        if self.match_punct(PunctuationId::Colon) {
            self.parse_type()?;
        }
        if self.check_keyword(KeywordId::Require) {
            inline.require = Some(self.parse_assertion_block(AssertionKind::Precondition));
        }
        if self.match_keyword(KeywordId::Local) {
            self.parse_entity_list("local variable name")?;
        }
        if !(self.match_keyword(KeywordId::Do) || self.match_keyword(KeywordId::Once)) {
            return Err(self.expected("`do` in inline agent"));
        }
        inline.body = self.scan_compound();
        if self.check_keyword(KeywordId::Ensure) {
            inline.ensure = Some(self.parse_assertion_block(AssertionKind::Postcondition));
        }
        self.expect_keyword(KeywordId::End, "to close the inline agent")?;
        Ok(inline)
    }

    /// Target and feature name of a non-inline agent.
    fn parse_agent_call(&mut self) -> PResult<(AgentTarget, Option<Spanned<Ident>>)> {
        // `{T}.f`
        if self.check_punct(PunctuationId::LBrace) {
            let inner = self.skip_balanced(PunctuationId::LBrace, PunctuationId::RBrace)?;
            let ty = crate::token_helpers::render_range(self.tokens, inner);
            self.expect_punct(PunctuationId::Dot, "after the open agent target")?;
            let feature = self.expect_ident("agent feature name")?;
            return Ok((AgentTarget::Open(ty), Some(feature)));
        }

        // `(expr).f`
        if self.check_punct(PunctuationId::LParen) {
            let inner = self.skip_balanced(PunctuationId::LParen, PunctuationId::RParen)?;
            self.expect_punct(PunctuationId::Dot, "after the agent target")?;
            let feature = self.expect_ident("agent feature name")?;
            return Ok((AgentTarget::Closed(inner), Some(feature)));
        }

        // `f`, `a.b.f`, `Current.f`, `Result.f`
        let target_start = self.index();
        let entity = self.check_keyword(KeywordId::Current)
            || self.check_keyword(KeywordId::Result)
            || self.check_keyword(KeywordId::Precursor);
        if entity {
            self.advance();
        } else {
            self.expect_ident("agent feature name")?;
        }
        let mut last_dot = None;
        while self.check_punct(PunctuationId::Dot) && matches!(self.peek_at(1).kind, TokenKind::Ident(_)) {
            last_dot = Some(self.index());
            self.advance();
            self.advance();
        }

        let Some(feature_token) = self.previous() else {
            return Err(self.expected("agent feature name"));
        };
        let TokenKind::Ident(name) = &feature_token.kind else {
            return Err(self.expected("`.` and a feature name after the agent target"));
        };
        let feature = Spanned::new(name.clone(), feature_token.span, feature_token.loc);
        let target = match last_dot {
            Some(dot) => AgentTarget::Closed(TokenRange::new(target_start, dot)),
            None => AgentTarget::Current,
        };
        Ok((target, Some(feature)))
    }

    /// Split an actual argument list at top-level commas. A lone `?` is an open argument.
    fn agent_args(&self, inner: TokenRange) -> Vec<AgentArg> {
        let mut args = Vec::new();
        let mut depth = 0usize;
        let mut current: Vec<usize> = Vec::new();
        let flush = |current: &mut Vec<usize>, args: &mut Vec<AgentArg>| {
            let (Some(&first), Some(&last)) = (current.first(), current.last()) else {
                return;
            };
            let token = &self.tokens[first];
            let open = current.len() == 1 && token.kind.is_punctuation(PunctuationId::Question);
            args.push(if open {
                AgentArg::Open { loc: token.loc }
            } else {
                AgentArg::Closed {
                    range: TokenRange::new(first, last + 1),
                    loc: token.loc,
                }
            });
            current.clear();
        };

        for index in inner.indices() {
            let token = &self.tokens[index];
            if token.is_comment() {
                continue;
            }
            match &token.kind {
                TokenKind::Punctuation(PunctuationId::Comma) if depth == 0 => {
                    flush(&mut current, &mut args);
                    continue;
                }
                TokenKind::Punctuation(id) if eiflint_core::lang::punctuation::is_open_delimiter(*id) => depth += 1,
                TokenKind::Punctuation(id) if eiflint_core::lang::punctuation::is_close_delimiter(*id) => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            current.push(index);
        }
        flush(&mut current, &mut args);
        args
    }
}

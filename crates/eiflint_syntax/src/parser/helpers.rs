// Token-stream helpers and error recovery.
//
// This chunk contains the low-level primitives used throughout parsing:
// - Peeking/consuming significant tokens (`peek`, `advance`)
// - Matching / expecting keywords, operators, and punctuation
// - Comment lookup (`comments_before_current`)
// - Error recovery (`synchronize`)
//
// NOTE: This file is `include!`'d into `crate::parser`.

impl<'a> Parser<'a> {
    // ========================================================================
    // Cursor
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`] (or the stream is exhausted).
    fn is_at_end(&self) -> bool {
        self.pos >= self.significant.len() || self.peek().is_eof()
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &'a Token {
        self.peek_at(0)
    }

    /// Return the significant token `n` positions ahead. Past the end, the last token (normally `Eof`).
    fn peek_at(&self, n: usize) -> &'a Token {
        let last = self.significant.len().saturating_sub(1);
        let index = self.significant[(self.pos + n).min(last)];
        &self.tokens[index]
    }

    /// Index into the full token sequence of the current token.
    fn index(&self) -> usize {
        self.significant.get(self.pos).copied().unwrap_or(self.tokens.len())
    }

    /// The last consumed significant token.
    fn previous(&self) -> Option<&'a Token> {
        self.previous_at(1)
    }

    /// The significant token `n` positions behind the cursor (`previous_at(1)` is the last consumed one).
    fn previous_at(&self, n: usize) -> Option<&'a Token> {
        let pos = self.pos.checked_sub(n)?;
        self.significant.get(pos).map(|&i| &self.tokens[i])
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if self.pos < self.significant.len() && !token.is_eof() {
            self.check_flags(self.significant[self.pos]);
            self.pos += 1;
        }
        token
    }

    /// Report lexer-flagged tokens (unknown characters, unterminated literals) the first time they are consumed.
    fn check_flags(&mut self, index: usize) {
        if self.flags_checked.is_some_and(|checked| index <= checked) {
            return;
        }
        self.flags_checked = Some(index);
        let token = &self.tokens[index];
        let message = match &token.kind {
            TokenKind::Unknown(c) => format!("unexpected character `{}`", c.escape_debug()),
            TokenKind::String(literal) if !literal.terminated && literal.verbatim => {
                "unterminated verbatim string".to_string()
            }
            TokenKind::String(literal) if !literal.terminated => "unterminated string literal".to_string(),
            TokenKind::Char(literal) if !literal.terminated => "unterminated character literal".to_string(),
            _ => return,
        };
        self.report(Diagnostic::syntax(message, token.loc, token.span));
    }

    /// Return `true` if the current token is flagged by the lexer (reported when consumed).
    fn at_flagged_token(&self) -> bool {
        match &self.peek().kind {
            TokenKind::Unknown(_) => true,
            TokenKind::String(literal) | TokenKind::Char(literal) => !literal.terminated,
            _ => false,
        }
    }

    /// Return `true` if the token at significant position `pos` is the first token of its line.
    fn first_on_line_at(&self, pos: usize) -> bool {
        let Some(&index) = self.significant.get(pos) else {
            return false;
        };
        index == 0 || self.tokens[index - 1].loc.line < self.tokens[index].loc.line
    }

    fn at_line_start(&self) -> bool {
        self.first_on_line_at(self.pos)
    }

    /// Save the cursor for a later [`Parser::restore`].
    fn save(&self) -> usize {
        self.pos
    }

    fn restore(&mut self, saved: usize) {
        self.pos = saved;
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Return `true` if the current token is the given keyword.
    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    /// Return `true` if the current token is the given punctuation.
    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    /// Return `true` if the current token is the given operator.
    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    fn check_ident(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Ident(_))
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, id: KeywordId, context: &str) -> PResult<&'a Token> {
        if self.check_keyword(id) {
            Ok(self.advance())
        } else {
            Err(self.expected(&format!("`{}` {context}", keywords::as_str(id))))
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, context: &str) -> PResult<&'a Token> {
        if self.check_punct(id) {
            Ok(self.advance())
        } else {
            Err(self.expected(&format!(
                "`{}` {context}",
                eiflint_core::lang::punctuation::as_str(id)
            )))
        }
    }

    /// Consume an identifier.
    fn expect_ident(&mut self, what: &str) -> PResult<Spanned<Ident>> {
        let token = self.peek();
        match &token.kind {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Spanned::new(name.clone(), token.span, token.loc))
            }
            _ => Err(self.expected(what)),
        }
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// A syntax error at the current token.
    fn error_here(&self, message: impl Into<String>) -> Diagnostic {
        let token = self.peek();
        Diagnostic::syntax(message, token.loc, token.span)
    }

    /// `expected X, found Y` at the current token.
    fn expected(&self, what: &str) -> Diagnostic {
        let found = self.peek().kind.describe();
        self.error_here(format!("expected {what}, found {found}"))
    }

    /// Report an unexpected current token unless the lexer already flagged it.
    fn report_unexpected(&mut self, context: &str) {
        if self.at_flagged_token() {
            return;
        }
        let found = self.peek().kind.describe();
        let err = self.error_here(format!("unexpected {found} {context}"));
        self.report(err);
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Comment tokens between the last consumed significant token and the current one.
    fn comments_before_current(&self) -> &'a [Token] {
        let tokens = self.tokens;
        let start = match self.pos.checked_sub(1) {
            Some(prev) => self.significant[prev] + 1,
            None => 0,
        };
        let end = self.index().min(tokens.len());
        &tokens[start.min(end)..end]
    }

    /// The first comment before the current token, with its text.
    fn leading_comment(&self) -> Option<Spanned<String>> {
        self.comments_before_current().iter().find_map(|t| match &t.kind {
            TokenKind::Comment(text) => Some(Spanned::new(text.trim().to_string(), t.span, t.loc)),
            _ => None,
        })
    }

    // ========================================================================
    // Skipping
    // ========================================================================

    /// Consume `open ... close` with nesting. The cursor must be on `open`.
    ///
    /// ## Returns
    /// - The token range strictly inside the delimiters.
    fn skip_balanced(&mut self, open: PunctuationId, close: PunctuationId) -> PResult<TokenRange> {
        let open_token = self.advance();
        let inner_start = self.index();
        let mut depth = 1usize;
        while !self.is_at_end() {
            if self.check_punct(open) {
                depth += 1;
            } else if self.check_punct(close) {
                depth -= 1;
                if depth == 0 {
                    let range = TokenRange::new(inner_start, self.index());
                    self.advance();
                    return Ok(range);
                }
            }
            self.advance();
        }
        Err(Diagnostic::syntax(
            format!(
                "`{}` is never closed",
                eiflint_core::lang::punctuation::as_str(open)
            ),
            open_token.loc,
            open_token.span,
        ))
    }

    /// Skip a `note` clause: `key: value, ...` entries up to the next clause, class header or `end`.
    fn skip_note(&mut self) {
        self.advance();
        while !self.is_at_end() {
            match self.peek().kind.keyword_id() {
                Some(id) if keywords::is_clause_start(id) => return,
                Some(KeywordId::End | KeywordId::Class) => return,
                _ if self.at_class_start() => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Return `true` at `[deferred | expanded | frozen | once | separate]* class`.
    fn at_class_start(&self) -> bool {
        let mut n = 0;
        loop {
            match self.peek_at(n).kind.keyword_id() {
                Some(KeywordId::Class) => return true,
                Some(KeywordId::Deferred | KeywordId::Expanded | KeywordId::Frozen | KeywordId::Once | KeywordId::Separate) => {
                    n += 1;
                }
                _ => return false,
            }
            if n > 5 {
                return false;
            }
        }
    }

    // ========================================================================
    // Error recovery
    // ========================================================================

    /// Skip forward to the next synchronization point.
    ///
    /// ## Parameters
    /// - `decl_column`: column of feature declarations in the current clause. When set, the parser also resumes at
    ///   an identifier that starts a line at that column (the next feature), and only resumes at clause keywords that
    ///   start a line at or left of it, so instructions such as `create x.make` inside a body do not stop recovery.
    fn synchronize(&mut self, decl_column: Option<u32>) {
        while !self.is_at_end() {
            let token = self.peek();
            let line_start = self.at_line_start();
            let outer = decl_column.is_none_or(|col| line_start && token.loc.column <= col);

            match token.kind.keyword_id() {
                Some(KeywordId::Class) => return,
                Some(id) if keywords::is_clause_start(id) && outer => return,
                Some(KeywordId::End) if line_start && decl_column.is_some_and(|col| token.loc.column < col) => {
                    return;
                }
                _ => {}
            }
            if let Some(col) = decl_column {
                let starts_feature = self.check_ident() || self.check_keyword(KeywordId::Frozen);
                if line_start && starts_feature && token.loc.column == col {
                    return;
                }
            }
            self.advance();
        }
    }
}

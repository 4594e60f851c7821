// Class-level productions: header, inherit, create, feature clauses, invariant.
//
// NOTE: This file is `include!`'d into `crate::parser`.

impl<'a> Parser<'a> {
    /// Parse one class, from its header marks to the closing `end`.
    fn parse_class(&mut self) -> ClassDecl {
        let start = self.peek();
        self.agents.clear();

        // A `once` mark wins over the others; otherwise the last mark is kept.
        let mut kind = ClassKind::Regular;
        while !self.check_keyword(KeywordId::Class) && !self.is_at_end() {
            let mark = match self.advance().kind.keyword_id() {
                Some(KeywordId::Deferred) => ClassKind::Deferred,
                Some(KeywordId::Expanded) => ClassKind::Expanded,
                Some(KeywordId::Frozen) => ClassKind::Frozen,
                Some(KeywordId::Separate) => ClassKind::Separate,
                Some(KeywordId::Once) => ClassKind::Once,
                _ => kind,
            };
            if kind != ClassKind::Once {
                kind = mark;
            }
        }
        self.advance();

        let mut class = ClassDecl {
            name: None,
            kind,
            generics: Vec::new(),
            parents: Vec::new(),
            creators: Vec::new(),
            clauses: Vec::new(),
            invariant: None,
            agents: Vec::new(),
            span: start.span,
            loc: start.loc,
        };

        if let Err(err) = self.parse_class_header(&mut class) {
            self.report(err);
            self.synchronize(None);
        }

        self.parse_class_clauses(&mut class);

        let end = self.previous().map_or(start.span, |t| t.span);
        class.span = start.span.merge(end);
        class.agents = std::mem::take(&mut self.agents);
        tracing::trace!(class = class.name_str(), clauses = class.clauses.len(), "parsed class");
        class
    }

    /// `NAME [generics] [obsolete "..."]`
    fn parse_class_header(&mut self, class: &mut ClassDecl) -> PResult<()> {
        class.name = Some(self.expect_ident("class name")?);

        if self.check_punct(PunctuationId::LBracket) {
            let inner = self.skip_balanced(PunctuationId::LBracket, PunctuationId::RBracket)?;
            class.generics = self.formal_generic_names(inner);
        }

        if self.match_keyword(KeywordId::Obsolete) && matches!(self.peek().kind, TokenKind::String(_)) {
            self.advance();
        }
        Ok(())
    }

    /// Names of formal generic parameters: the first identifier of each top-level, comma-separated entry.
    fn formal_generic_names(&self, inner: TokenRange) -> Vec<Spanned<Ident>> {
        let mut names = Vec::new();
        let mut depth = 0usize;
        let mut entry_start = true;
        for token in crate::token_helpers::significant(self.tokens, inner) {
            match &token.kind {
                TokenKind::Punctuation(PunctuationId::LBracket) => depth += 1,
                TokenKind::Punctuation(PunctuationId::RBracket) => depth = depth.saturating_sub(1),
                TokenKind::Punctuation(PunctuationId::Comma) if depth == 0 => {
                    entry_start = true;
                    continue;
                }
                TokenKind::Ident(name) if entry_start && depth == 0 => {
                    names.push(Spanned::new(name.clone(), token.span, token.loc));
                }
                _ => {}
            }
            entry_start = false;
        }
        names
    }

    /// Everything between the class header and the closing `end`.
    fn parse_class_clauses(&mut self, class: &mut ClassDecl) {
        loop {
            let token = self.peek();
            match token.kind.keyword_id() {
                Some(KeywordId::End) => {
                    self.advance();
                    return;
                }
                Some(KeywordId::Note) => self.skip_note(),
                Some(KeywordId::Inherit) => self.parse_inherit(class),
                Some(KeywordId::Create) => {
                    let clause = self.parse_creators();
                    class.creators.push(clause);
                }
                Some(KeywordId::Convert) => {
                    self.advance();
                    self.synchronize(None);
                }
                Some(KeywordId::Feature) => {
                    let clause = self.parse_feature_clause();
                    class.clauses.push(clause);
                }
                Some(KeywordId::Invariant) => {
                    let block = self.parse_assertion_block(AssertionKind::Invariant);
                    class.invariant = Some(block);
                }
                Some(KeywordId::Class) => {
                    let err = self.error_here(format!("missing `end` for class `{}`", class.name_str()));
                    self.report(err);
                    return;
                }
                _ if token.is_eof() => {
                    let err = self.error_here(format!("missing `end` for class `{}`", class.name_str()));
                    self.report(err);
                    return;
                }
                _ if self.check_ident() || self.check_keyword(KeywordId::Frozen) => {
                    // Features before any `feature` keyword.
                    let mut clause = FeatureClause {
                        category: ClauseCategory::Implicit,
                        loc: token.loc,
                        features: Vec::new(),
                    };
                    self.parse_feature_list(&mut clause);
                    class.clauses.push(clause);
                }
                _ => {
                    self.report_unexpected("in class body");
                    self.advance();
                    self.synchronize(None);
                }
            }
        }
    }

    /// `inherit [{NONE}] PARENT [adaptation end] ...`
    fn parse_inherit(&mut self, class: &mut ClassDecl) {
        self.advance();
        if self.check_punct(PunctuationId::LBrace) {
            if let Err(err) = self.skip_balanced(PunctuationId::LBrace, PunctuationId::RBrace) {
                self.report(err);
                return;
            }
        }

        while self.check_ident() {
            if let Ok(parent) = self.expect_ident("parent class name") {
                class.parents.push(parent);
            }
            if self.check_punct(PunctuationId::LBracket) {
                if let Err(err) = self.skip_balanced(PunctuationId::LBracket, PunctuationId::RBracket) {
                    self.report(err);
                    return;
                }
            }
            if self.at_adaptation() {
                self.skip_adaptation();
            }
            self.match_punct(PunctuationId::Semicolon);
        }

        let token = self.peek();
        let stops = token.is_eof()
            || token.kind.keyword_id().is_some_and(|id| keywords::is_clause_start(id) || id == KeywordId::End);
        if !stops {
            self.report_unexpected("in inherit clause");
            self.advance();
            self.synchronize(None);
        }
    }

    fn at_adaptation(&self) -> bool {
        matches!(
            self.peek().kind.keyword_id(),
            Some(KeywordId::Rename | KeywordId::Export | KeywordId::Undefine | KeywordId::Redefine | KeywordId::Select)
        )
    }

    /// `rename ... export ... undefine ... redefine ... select ... end`
    fn skip_adaptation(&mut self) {
        let start = self.peek();
        while !self.is_at_end() {
            if self.match_keyword(KeywordId::End) {
                return;
            }
            let token = self.peek();
            if token.kind.keyword_id().is_some_and(keywords::is_clause_start) && self.at_line_start() {
                break;
            }
            self.advance();
        }
        self.report(Diagnostic::syntax(
            "missing `end` after inheritance adaptation",
            start.loc,
            start.span,
        ));
    }

    /// `create [{CLIENTS}] name {, name}`
    fn parse_creators(&mut self) -> CreationClause {
        let keyword = self.advance();
        let mut clause = CreationClause {
            names: Vec::new(),
            loc: keyword.loc,
        };
        if self.check_punct(PunctuationId::LBrace) {
            if let Err(err) = self.skip_balanced(PunctuationId::LBrace, PunctuationId::RBrace) {
                self.report(err);
                self.synchronize(None);
                return clause;
            }
        }
        while let Ok(name) = self.expect_ident("creation procedure name") {
            clause.names.push(name);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        clause
    }

    /// `feature [{CLIENTS}] [-- Category]` followed by feature declarations.
    fn parse_feature_clause(&mut self) -> FeatureClause {
        let keyword = self.advance();
        if self.check_punct(PunctuationId::LBrace) {
            if let Err(err) = self.skip_balanced(PunctuationId::LBrace, PunctuationId::RBrace) {
                self.report(err);
            }
        }
        let header_line = self.previous().map_or(keyword.loc.line, |t| t.loc.line);
        let category = self
            .comments_before_current()
            .iter()
            .find(|t| t.loc.line == header_line)
            .and_then(|t| match &t.kind {
                TokenKind::Comment(text) => Some(text.trim()),
                _ => None,
            })
            .map_or(ClauseCategory::Missing, |text| match clauses::from_comment(text) {
                Some(id) => ClauseCategory::Recognized(id),
                None => ClauseCategory::Unrecognized(text.to_string()),
            });

        let mut clause = FeatureClause {
            category,
            loc: keyword.loc,
            features: Vec::new(),
        };
        self.parse_feature_list(&mut clause);
        clause
    }

    /// Feature declarations up to the next clause keyword or the class `end`.
    fn parse_feature_list(&mut self, clause: &mut FeatureClause) {
        let mut decl_column: Option<u32> = None;
        loop {
            let token = self.peek();
            if token.is_eof() {
                return;
            }
            if let Some(id) = token.kind.keyword_id() {
                if keywords::is_clause_start(id) || matches!(id, KeywordId::End | KeywordId::Class) {
                    return;
                }
            }
            if !(self.check_ident() || self.check_keyword(KeywordId::Frozen)) {
                self.report_unexpected("where a feature declaration was expected");
                self.advance();
                self.synchronize(decl_column.or(Some(token.loc.column)));
                continue;
            }

            let column = *decl_column.get_or_insert(token.loc.column);
            let before = self.save();
            match self.parse_feature_decl() {
                Ok(features) => clause.features.extend(features),
                Err(err) => {
                    self.report(err);
                    if self.save() == before {
                        self.advance();
                    }
                    self.synchronize(Some(column));
                }
            }
        }
    }
}

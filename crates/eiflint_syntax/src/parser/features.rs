// Feature declarations.
//
// NOTE: This file is `include!`'d into `crate::parser`.

/// Signature shared by every name of a multi-name declaration (`a, b: INTEGER`).
struct Signature {
    names: Vec<(Spanned<Ident>, bool)>,
    params: Vec<Entity>,
    return_type: Option<TypeRef>,
}

impl<'a> Parser<'a> {
    /// Parse one feature declaration.
    ///
    /// ## Returns
    /// - One [`FeatureDecl`] per declared name; synonyms share the signature and implementation.
    fn parse_feature_decl(&mut self) -> PResult<Vec<FeatureDecl>> {
        let start = self.peek();
        let signature = self.parse_signature()?;
        let first_name = signature.names.first().map(|(name, _)| name.node.clone()).unwrap_or_default();

        if self.match_keyword(KeywordId::Assign) {
            self.expect_ident("assigner name after `assign`")?;
        }

        // `name: TYPE = value`
        if self.check_op(OperatorId::Eq) {
            self.advance();
            let value = self.parse_manifest_constant()?;
            let header_comment = self.leading_comment();
            return Ok(self.expand(
                signature,
                header_comment,
                RoutineBody::Constant { value },
                FeatureParts::default(),
                start,
            ));
        }

        let header_comment = self.leading_comment();

        if self.match_keyword(KeywordId::Obsolete) && matches!(self.peek().kind, TokenKind::String(_)) {
            self.advance();
        }

        let mut parts = FeatureParts::default();
        if self.check_keyword(KeywordId::Require) {
            parts.require = Some(self.parse_assertion_block(AssertionKind::Precondition));
        }
        if self.match_keyword(KeywordId::Local) {
            parts.locals = self.parse_entity_list("local variable name")?;
        }

        let body = match self.peek().kind.keyword_id() {
            Some(KeywordId::Do) => {
                self.advance();
                RoutineBody::Do(self.scan_compound())
            }
            Some(KeywordId::Once) => {
                self.advance();
                let keys = self.parse_once_keys()?;
                RoutineBody::Once {
                    keys,
                    body: self.scan_compound(),
                }
            }
            Some(KeywordId::Attribute) => {
                self.advance();
                RoutineBody::Attribute {
                    body: Some(self.scan_compound()),
                }
            }
            Some(KeywordId::Deferred) => {
                self.advance();
                RoutineBody::Deferred
            }
            Some(KeywordId::External) => {
                self.advance();
                let language = self.parse_external()?;
                RoutineBody::External { language }
            }
            _ if signature.return_type.is_some() && parts.require.is_none() && parts.locals.is_empty() => {
                // Plain attribute: `count: INTEGER`
                return Ok(self.expand(
                    signature,
                    header_comment,
                    RoutineBody::Attribute { body: None },
                    parts,
                    start,
                ));
            }
            _ => {
                return Err(self.expected(&format!(
                    "`do`, `once`, `attribute`, `deferred` or `external` in the declaration of `{first_name}`"
                )));
            }
        };

        if self.check_keyword(KeywordId::Ensure) {
            parts.ensure = Some(self.parse_assertion_block(AssertionKind::Postcondition));
        }
        if self.match_keyword(KeywordId::Rescue) {
            parts.rescue = Some(self.scan_compound().range);
        }
        if !self.match_keyword(KeywordId::End) {
            let err = self.expected(&format!("`end` to close `{first_name}`"));
            self.report(err);
        }

        Ok(self.expand(signature, header_comment, body, parts, start))
    }

    /// `[frozen] name [alias "op"] {, [frozen] name} [(args)] [: TYPE]`
    fn parse_signature(&mut self) -> PResult<Signature> {
        let mut names = Vec::new();
        loop {
            let frozen = self.match_keyword(KeywordId::Frozen);
            let name = self.expect_ident("feature name")?;
            if self.match_keyword(KeywordId::Alias) && matches!(self.peek().kind, TokenKind::String(_)) {
                self.advance();
            }
            self.match_keyword(KeywordId::Convert);
            names.push((name, frozen));
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }

        let mut params = Vec::new();
        if self.check_punct(PunctuationId::LParen) {
            self.advance();
            params = self.parse_entity_list("argument name")?;
            self.expect_punct(PunctuationId::RParen, "to close the argument list")?;
        }

        let return_type = if self.match_punct(PunctuationId::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };

        Ok(Signature {
            names,
            params,
            return_type,
        })
    }

    /// `name {, name}: TYPE {[;] name {, name}: TYPE}` for arguments and locals.
    fn parse_entity_list(&mut self, what: &str) -> PResult<Vec<Entity>> {
        let mut entities = Vec::new();
        while self.check_ident() {
            let mut names = vec![self.expect_ident(what)?];
            while self.match_punct(PunctuationId::Comma) {
                names.push(self.expect_ident(what)?);
            }
            self.expect_punct(PunctuationId::Colon, "before the declared type")?;
            let ty = self.parse_type()?;
            entities.extend(names.into_iter().map(|name| Entity { name, ty: ty.clone() }));
            self.match_punct(PunctuationId::Semicolon);
        }
        Ok(entities)
    }

    /// Value of a constant attribute: a literal, optionally signed.
    fn parse_manifest_constant(&mut self) -> PResult<Spanned<String>> {
        let start = self.peek();
        let signed = self.match_op(OperatorId::Minus) || self.match_op(OperatorId::Plus);
        let token = self.peek();
        let literal = match &token.kind {
            TokenKind::Integer(_) | TokenKind::Real(_) => true,
            TokenKind::String(_) | TokenKind::Char(_) => !signed,
            TokenKind::Keyword(KeywordId::True | KeywordId::False) => !signed,
            _ => false,
        };
        if !literal {
            return Err(self.expected("a manifest constant after `=`"));
        }
        self.advance();
        let span = start.span.merge(token.span);
        let text = if signed {
            format!("{}{}", start.lexeme, token.lexeme)
        } else {
            token.lexeme.clone()
        };
        Ok(Spanned::new(text, span, start.loc))
    }

    /// `once ("KEY", ...)` keys. The cursor is after `once`.
    fn parse_once_keys(&mut self) -> PResult<Vec<String>> {
        let mut keys = Vec::new();
        if !self.check_punct(PunctuationId::LParen) {
            return Ok(keys);
        }
        let inner = self.skip_balanced(PunctuationId::LParen, PunctuationId::RParen)?;
        for token in crate::token_helpers::significant(self.tokens, inner) {
            if let TokenKind::String(literal) = &token.kind {
                keys.push(literal.value());
            }
        }
        Ok(keys)
    }

    /// `external "C" [alias "name"]`. The cursor is after `external`.
    fn parse_external(&mut self) -> PResult<String> {
        let token = self.peek();
        let TokenKind::String(literal) = &token.kind else {
            return Err(self.expected("a language string after `external`"));
        };
        self.advance();
        if self.match_keyword(KeywordId::Alias) && matches!(self.peek().kind, TokenKind::String(_)) {
            self.advance();
        }
        Ok(literal.value())
    }

    /// Build one declaration per name.
    fn expand(
        &self,
        signature: Signature,
        header_comment: Option<Spanned<String>>,
        body: RoutineBody,
        parts: FeatureParts,
        start: &Token,
    ) -> Vec<FeatureDecl> {
        let end = self.previous().map_or(start.span, |t| t.span);
        let span = start.span.merge(end);
        signature
            .names
            .into_iter()
            .map(|(name, frozen)| FeatureDecl {
                name,
                frozen,
                params: signature.params.clone(),
                return_type: signature.return_type.clone(),
                header_comment: header_comment.clone(),
                require: parts.require.clone(),
                locals: parts.locals.clone(),
                body: body.clone(),
                ensure: parts.ensure.clone(),
                rescue: parts.rescue,
                span,
            })
            .collect()
    }
}

/// Optional parts collected while parsing a routine.
#[derive(Default)]
struct FeatureParts {
    require: Option<AssertionBlock>,
    locals: Vec<Entity>,
    ensure: Option<AssertionBlock>,
    rescue: Option<TokenRange>,
}

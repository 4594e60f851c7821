//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites and to make it easy to work with ID-based
//! tokens. The line-continuation predicates are shared by the parser's statement counter and assertion splitter.

use eiflint_core::lang::keywords::KeywordId;
use eiflint_core::lang::operators::{self, OperatorId};
use eiflint_core::lang::punctuation::PunctuationId;

use crate::ast::TokenRange;
use crate::lexer::{Token, TokenKind};

impl TokenKind {
    /// Return the keyword id, if this is a keyword token.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        match self {
            TokenKind::Keyword(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Return the operator id, if this is an operator token.
    pub fn operator_id(&self) -> Option<OperatorId> {
        match self {
            TokenKind::Operator(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given operator.
    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    /// Return the punctuation id, if this is a punctuation token.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        match self {
            TokenKind::Punctuation(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Return `true` if an expression cannot end with this token, so the next line continues it.
    pub fn continues_after(&self) -> bool {
        match self {
            TokenKind::Operator(id) => operators::continues_line(*id),
            TokenKind::Punctuation(id) => matches!(
                id,
                PunctuationId::Comma
                    | PunctuationId::Colon
                    | PunctuationId::Dot
                    | PunctuationId::Arrow
                    | PunctuationId::LParen
                    | PunctuationId::LBracket
                    | PunctuationId::LBrace
            ),
            TokenKind::Keyword(id) => matches!(
                id,
                KeywordId::And
                    | KeywordId::Or
                    | KeywordId::Xor
                    | KeywordId::Not
                    | KeywordId::Implies
                    | KeywordId::Then
                    | KeywordId::Else
                    | KeywordId::Old
                    | KeywordId::Agent
                    | KeywordId::Attached
                    | KeywordId::As
            ),
            _ => false,
        }
    }

    /// Return `true` if a line starting with this token continues the previous line's expression.
    pub fn continues_before(&self) -> bool {
        match self {
            TokenKind::Operator(id) => operators::continues_line(*id),
            TokenKind::Punctuation(id) => matches!(
                id,
                PunctuationId::Comma
                    | PunctuationId::Dot
                    | PunctuationId::RParen
                    | PunctuationId::RBracket
                    | PunctuationId::RBrace
            ),
            TokenKind::Keyword(id) => matches!(
                id,
                KeywordId::And | KeywordId::Or | KeywordId::Xor | KeywordId::Implies | KeywordId::Then | KeywordId::Else | KeywordId::As
            ),
            _ => false,
        }
    }

    /// Return `true` if an operand can end with this token.
    pub fn ends_operand(&self) -> bool {
        match self {
            TokenKind::Ident(_)
            | TokenKind::Integer(_)
            | TokenKind::Real(_)
            | TokenKind::String(_)
            | TokenKind::Char(_) => true,
            TokenKind::Punctuation(id) => matches!(id, PunctuationId::RParen | PunctuationId::RBracket),
            TokenKind::Keyword(id) => matches!(
                id,
                KeywordId::Current | KeywordId::Result | KeywordId::Void | KeywordId::True | KeywordId::False
            ),
            _ => false,
        }
    }

    /// Return `true` if an instruction can start with this token.
    ///
    /// Used to split instructions written on one line without `;`: two operands are never juxtaposed inside an
    /// expression, so an operand end followed by one of these tokens starts a new instruction.
    pub fn starts_instruction(&self) -> bool {
        match self {
            TokenKind::Ident(_) => true,
            TokenKind::Keyword(id) => matches!(
                id,
                KeywordId::Current
                    | KeywordId::Result
                    | KeywordId::Precursor
                    | KeywordId::Create
                    | KeywordId::Retry
                    | KeywordId::If
                    | KeywordId::Inspect
                    | KeywordId::From
                    | KeywordId::Across
                    | KeywordId::Debug
                    | KeywordId::Check
            ),
            _ => false,
        }
    }

    /// Keywords that open a block closed by `end` inside a compound or an expression.
    pub fn opens_block(&self) -> bool {
        matches!(
            self,
            TokenKind::Keyword(
                KeywordId::If
                    | KeywordId::Inspect
                    | KeywordId::From
                    | KeywordId::Across
                    | KeywordId::Debug
                    | KeywordId::Check
                    | KeywordId::Do
            )
        )
    }
}

impl Token {
    /// Convenience wrapper for `self.kind.keyword_id()`.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        self.kind.keyword_id()
    }

    /// Convenience wrapper for `self.kind.operator_id()`.
    pub fn operator_id(&self) -> Option<OperatorId> {
        self.kind.operator_id()
    }

    /// Convenience wrapper for `self.kind.punctuation_id()`.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        self.kind.punctuation_id()
    }
}

/// Non-comment tokens of `range`.
pub fn significant(tokens: &[Token], range: TokenRange) -> impl Iterator<Item = &Token> + '_ {
    let end = range.end.min(tokens.len());
    let start = range.start.min(end);
    tokens[start..end].iter().filter(|t| !t.is_comment())
}

/// Source-like text of `range`: lexemes joined with a space where the source had whitespace between them.
///
/// Comments are dropped.
pub fn render_range(tokens: &[Token], range: TokenRange) -> String {
    let mut out = String::new();
    let mut prev_end: Option<usize> = None;
    for token in significant(tokens, range) {
        if prev_end.is_some_and(|end| end < token.span.start) {
            out.push(' ');
        }
        out.push_str(&token.lexeme);
        prev_end = Some(token.span.end);
    }
    out
}

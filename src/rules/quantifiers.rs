//! `symbolic-quantifier`: assertions state quantification with `∀` / `∃` rather than an `across ... all` /
//! `across ... some` loop, and every symbolic quantifier has its `¦` separator.

use eiflint_core::lang::keywords::{self, KeywordId};
use eiflint_core::lang::operators::OperatorId;
use eiflint_core::lang::rules::{RuleId, Severity};
use eiflint_syntax::diagnostics::Diagnostic;
use eiflint_syntax::lexer::{Token, TokenKind};

use super::{RuleContext, assertion_blocks};

pub(super) fn check(ctx: &RuleContext<'_>, out: &mut Vec<Diagnostic>) {
    for class in ctx.classes() {
        for block in assertion_blocks(class) {
            for assertion in &block.assertions {
                let tokens: Vec<&Token> = ctx.significant(assertion.expr).collect();
                loop_quantifiers(&tokens, out);
                unseparated(&tokens, out);
            }
        }
        // Quantifiers are expressions, so bodies may use them too.
        for body in class.features().filter_map(|f| f.compound()) {
            let tokens: Vec<&Token> = ctx.significant(body.range).collect();
            unseparated(&tokens, out);
        }
    }
}

/// `across s as x all cond end` at any nesting depth of the expression.
fn loop_quantifiers(tokens: &[&Token], out: &mut Vec<Diagnostic>) {
    for (at, token) in tokens.iter().enumerate() {
        if !token.kind.is_keyword(KeywordId::Across) {
            continue;
        }
        let Some(kind) = loop_kind(&tokens[at + 1..]) else {
            continue;
        };
        let symbol = match kind {
            KeywordId::All => "∀",
            _ => "∃",
        };
        out.push(
            Diagnostic::new(
                RuleId::SymbolicQuantifier,
                format!("`across ... {}` in an assertion; prefer `{symbol}`", keywords::as_str(kind)),
                token.loc,
                token.span,
            )
            .with_fix(format!("write `{symbol} x: s ¦ condition`")),
        );
    }
}

/// `all` or `some` of the `across` whose body starts `tokens`, if it has one before its `end`.
fn loop_kind(tokens: &[&Token]) -> Option<KeywordId> {
    let mut depth = 0usize;
    for token in tokens {
        match token.kind.keyword_id() {
            Some(KeywordId::Across | KeywordId::If | KeywordId::Inspect) => depth += 1,
            Some(KeywordId::End) if depth == 0 => return None,
            Some(KeywordId::End) => depth -= 1,
            Some(kind @ (KeywordId::All | KeywordId::Some)) if depth == 0 => return Some(kind),
            _ => {}
        }
    }
    None
}

/// `∀` / `∃` without a matching `¦`. Nested quantifiers pair with separators innermost-first.
fn unseparated(tokens: &[&Token], out: &mut Vec<Diagnostic>) {
    let mut open: Vec<&Token> = Vec::new();
    for token in tokens {
        match &token.kind {
            TokenKind::Operator(OperatorId::ForAll | OperatorId::Exists) => open.push(token),
            TokenKind::Operator(OperatorId::BrokenBar) => {
                open.pop();
            }
            _ => {}
        }
    }
    for token in open {
        out.push(
            Diagnostic::new(
                RuleId::SymbolicQuantifier,
                format!("quantifier `{}` has no `¦` before its condition", token.lexeme),
                token.loc,
                token.span,
            )
            .with_severity(Severity::Error),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::check_lines;

    fn ensure(assertions: &[&str]) -> Vec<Diagnostic> {
        let mut lines = vec![
            "class BAG",
            "feature -- Status report",
            "\tvalid: BOOLEAN",
            "\t\t\t-- Valid?",
            "\t\tdo",
            "\t\tensure",
        ];
        lines.extend_from_slice(assertions);
        lines.extend_from_slice(&["\t\tend", "end"]);
        check_lines(RuleId::SymbolicQuantifier, &lines)
    }

    #[test]
    fn test_across_loops_in_assertions() {
        let diags = ensure(&[
            "\t\t\tpositive: across items as i all i > 0 end",
            "\t\t\tsome_zero: across items as i some i = 0 end",
            "\t\t\tnested: across rows as r all across r as c some c = 0 end end",
        ]);
        let found: Vec<_> = diags
            .iter()
            .map(|d| (d.location.line, d.location.column, d.message.as_str()))
            .collect();
        assert_eq!(
            found,
            [
                (7, 14, "`across ... all` in an assertion; prefer `∀`"),
                (8, 15, "`across ... some` in an assertion; prefer `∃`"),
                (9, 12, "`across ... all` in an assertion; prefer `∀`"),
                (9, 33, "`across ... some` in an assertion; prefer `∃`"),
            ]
        );
        assert!(diags.iter().all(|d| d.severity == Severity::Warning));
    }

    #[test]
    fn test_symbolic_quantifiers() {
        let diags = ensure(&[
            "\t\t\tall_positive: ∀ i: items ¦ i > 0",
            "\t\t\tnested: ∀ r: rows ¦ ∃ c: r ¦ c = 0",
            "\t\t\tbroken: ∃ i: items i = 0",
        ]);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "quantifier `∃` has no `¦` before its condition");
        assert_eq!(diags[0].location.line, 9);
        assert_eq!(diags[0].severity, Severity::Error);
    }
}

//! `attachment`: an argument declared without `detachable` can never be `Void`, so its own precondition must not
//! test it (`p /= Void`, `Void = p`, `attached p`).

use eiflint_core::lang::keywords::KeywordId;
use eiflint_core::lang::operators::OperatorId;
use eiflint_core::lang::punctuation::PunctuationId;
use eiflint_core::lang::rules::RuleId;
use eiflint_syntax::ast::{AssertionBlock, Entity};
use eiflint_syntax::diagnostics::Diagnostic;
use eiflint_syntax::lexer::Token;

use super::RuleContext;

pub(super) fn check(ctx: &RuleContext<'_>, out: &mut Vec<Diagnostic>) {
    for class in ctx.classes() {
        let routines = class.features().map(|f| (&f.params, &f.require));
        let agents = class
            .agents
            .iter()
            .filter_map(|a| a.inline())
            .map(|inline| (&inline.params, &inline.require));
        for (params, require) in routines.chain(agents) {
            if let Some(require) = require {
                check_precondition(ctx, params, require, out);
            }
        }
    }
}

fn check_precondition(ctx: &RuleContext<'_>, params: &[Entity], require: &AssertionBlock, out: &mut Vec<Diagnostic>) {
    for assertion in &require.assertions {
        let tokens: Vec<&Token> = ctx.significant(assertion.expr).collect();
        for (at, test) in void_tests(&tokens) {
            let token = tokens[at];
            let Some(param) = attached_param(params, token) else {
                continue;
            };
            out.push(
                Diagnostic::new(
                    RuleId::Attachment,
                    format!("`{param}` is attached, so `{test}` in its precondition is redundant"),
                    token.loc,
                    token.span,
                )
                .with_fix(format!("drop the check, or declare `{param}` as `detachable`")),
            );
        }
    }
}

/// Positions of unqualified identifiers tested for voidness, with the test as written.
fn void_tests(tokens: &[&Token]) -> Vec<(usize, String)> {
    let kind_at = |i: usize| tokens.get(i).map(|t| &t.kind);
    let is_dot = |i: usize| kind_at(i).is_some_and(|k| k.is_punctuation(PunctuationId::Dot));
    let is_void = |i: usize| kind_at(i).is_some_and(|k| k.is_keyword(KeywordId::Void));
    let is_equality = |i: usize| {
        kind_at(i).is_some_and(|k| k.is_operator(OperatorId::Eq) || k.is_operator(OperatorId::NotEq))
    };
    let unqualified = |i: usize| tokens[i].ident().is_some() && !is_dot(i + 1) && (i == 0 || !is_dot(i - 1));

    let mut found = Vec::new();
    for i in 0..tokens.len() {
        if !unqualified(i) {
            continue;
        }
        let name = &tokens[i].lexeme;
        if is_equality(i + 1) && is_void(i + 2) {
            found.push((i, format!("{name} {} Void", tokens[i + 1].lexeme)));
        } else if i >= 2 && is_equality(i - 1) && is_void(i - 2) {
            found.push((i, format!("Void {} {name}", tokens[i - 1].lexeme)));
        } else if i >= 1 && kind_at(i - 1).is_some_and(|k| k.is_keyword(KeywordId::Attached)) {
            // `attached {T} p` is a type test, not a void test; `{` sits between the two tokens there.
            found.push((i, format!("attached {name}")));
        }
    }
    found
}

/// The argument `token` names, when it is declared without `detachable`.
fn attached_param<'p>(params: &'p [Entity], token: &Token) -> Option<&'p str> {
    let name = token.ident()?;
    params
        .iter()
        .find(|p| p.name.node.eq_ignore_ascii_case(name))
        .filter(|p| !p.ty.is_detachable())
        .map(|p| p.name.node.as_str())
}

//! `assertion-labeling`: every assertion in a `require`, `ensure`, class `invariant` or loop `invariant` carries a
//! label.

use eiflint_core::lang::rules::RuleId;
use eiflint_syntax::diagnostics::Diagnostic;

use super::{RuleContext, assertion_blocks};

pub(super) fn check(ctx: &RuleContext<'_>, out: &mut Vec<Diagnostic>) {
    for class in ctx.classes() {
        for block in assertion_blocks(class) {
            for assertion in block.assertions.iter().filter(|a| a.label.is_none()) {
                let text = ctx.text(assertion.expr);
                out.push(
                    Diagnostic::new(
                        RuleId::AssertionLabeling,
                        format!("unlabeled {}: {text}", assertion.kind.as_str()),
                        assertion.loc,
                        assertion.span,
                    )
                    .with_fix(format!("label it: `tag: {text}`")),
                );
            }
        }
    }
}

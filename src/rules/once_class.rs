//! `once-class`: in a `once class`, every creation procedure must itself be a `once` routine.

use eiflint_core::lang::rules::RuleId;
use eiflint_syntax::diagnostics::Diagnostic;

use super::RuleContext;

pub(super) fn check(ctx: &RuleContext<'_>, out: &mut Vec<Diagnostic>) {
    for class in ctx.classes().iter().filter(|c| c.is_once()) {
        for name in class.creation_names() {
            // Undeclared names and non-routines are `creation-list` findings.
            let Some(feature) = class.feature(&name.node) else {
                continue;
            };
            if !feature.is_routine() || feature.is_once() {
                continue;
            }
            out.push(
                Diagnostic::new(
                    RuleId::OnceClass,
                    format!(
                        "creation procedure `{}` of once class `{}` is not a once procedure",
                        name.node,
                        class.name_str()
                    ),
                    name.loc,
                    name.span,
                )
                .with_fix(format!("implement `{}` with `once` instead of `do`", feature.name.node)),
            );
        }
    }
}

//! `agent-form`: an agent whose explicit argument list is entirely open (`agent f (?, ?)`) should use the
//! shorthand `agent f`, which leaves every argument open.

use eiflint_core::lang::rules::RuleId;
use eiflint_syntax::ast::{AgentExpr, AgentTarget};
use eiflint_syntax::diagnostics::Diagnostic;

use super::RuleContext;

pub(super) fn check(ctx: &RuleContext<'_>, out: &mut Vec<Diagnostic>) {
    for class in ctx.classes() {
        for agent in class.agents.iter().filter(|a| a.is_all_open()) {
            let Some(shorthand) = shorthand(ctx, agent) else {
                continue;
            };
            out.push(
                Diagnostic::new(
                    RuleId::AgentForm,
                    format!("every argument of this agent is open; write `{shorthand}`"),
                    agent.loc,
                    agent.span,
                )
                .with_fix(format!("replace with `{shorthand}`")),
            );
        }
    }
}

/// `agent f`, `agent x.f` or `agent {T}.f`. Inline agents have no shorthand.
fn shorthand(ctx: &RuleContext<'_>, agent: &AgentExpr) -> Option<String> {
    let feature = &agent.feature.as_ref()?.node;
    match &agent.target {
        AgentTarget::Inline(_) => None,
        AgentTarget::Current => Some(format!("agent {feature}")),
        AgentTarget::Closed(range) => Some(format!("agent {}.{feature}", ctx.text(*range))),
        AgentTarget::Open(ty) => Some(format!("agent {{{ty}}}.{feature}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::check_lines;

    #[test]
    fn test_all_open_argument_lists() {
        let lines = [
            "class BUTTONS",
            "feature -- Basic operations",
            "\twire",
            "\t\t\t-- Connect handlers.",
            "\t\tdo",
            "\t\t\ton_click (agent handle (?, ?))",
            "\t\t\ton_key (agent keyboard.press (?))",
            "\t\t\ton_drop (agent {WIDGET}.drop (?))",
            "\t\t\ton_move (agent handle (?, 1))",
            "\t\t\ton_tick (agent tick)",
            "\t\t\ton_idle (agent (n: INTEGER) do end (?))",
            "\t\tend",
            "end",
        ];
        let diags = check_lines(RuleId::AgentForm, &lines);
        let fixes: Vec<_> = diags.iter().filter_map(|d| d.fix.as_deref()).collect();
        assert_eq!(
            fixes,
            [
                "replace with `agent handle`",
                "replace with `agent keyboard.press`",
                "replace with `agent {WIDGET}.drop`",
            ]
        );
        assert_eq!((diags[0].location.line, diags[0].location.column), (6, 14));
    }
}

//! `header-comment`: every routine documents itself with a comment right after its signature.

use eiflint_core::lang::rules::RuleId;
use eiflint_syntax::diagnostics::Diagnostic;

use super::RuleContext;

pub(super) fn check(ctx: &RuleContext<'_>, out: &mut Vec<Diagnostic>) {
    for class in ctx.classes() {
        for feature in class.features() {
            if !feature.is_routine() || feature.header_comment.is_some() {
                continue;
            }
            let name = &feature.name;
            out.push(
                Diagnostic::new(
                    RuleId::HeaderComment,
                    format!("routine `{}` has no header comment", name.node),
                    name.loc,
                    name.span,
                )
                .with_fix("add a `-- ...` line describing the routine below its signature"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::check_lines;

    #[test]
    fn test_routines_need_header_comments() {
        let lines = [
            "class LAMP",
            "feature -- Status setting",
            "\tturn_on",
            "\t\t\t-- Switch the lamp on.",
            "\t\tdo",
            "\t\t\tlit := True",
            "\t\tend",
            "\tturn_off",
            "\t\tdo",
            "\t\t\tlit := False",
            "\t\tend",
            "feature -- Status report",
            "\tlit: BOOLEAN",
            "end",
        ];
        let diags = check_lines(RuleId::HeaderComment, &lines);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "routine `turn_off` has no header comment");
        assert_eq!(diags[0].location.line, 8);
    }
}

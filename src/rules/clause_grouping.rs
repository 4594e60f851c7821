//! `clause-grouping`: features live in a `feature` clause whose comment names a recognized category.

use eiflint_core::lang::rules::RuleId;
use eiflint_syntax::ast::ClauseCategory;
use eiflint_syntax::diagnostics::Diagnostic;
use eiflint_syntax::source::Span;

use super::RuleContext;

pub(super) fn check(ctx: &RuleContext<'_>, out: &mut Vec<Diagnostic>) {
    for class in ctx.classes() {
        for clause in class.clauses.iter().filter(|c| !c.features.is_empty()) {
            let message = match &clause.category {
                ClauseCategory::Recognized(_) => continue,
                ClauseCategory::Missing => "feature clause has no category comment".to_string(),
                ClauseCategory::Unrecognized(text) => format!("`{text}` is not a recognized feature clause category"),
                ClauseCategory::Implicit => {
                    let first = &clause.features[0].name.node;
                    format!("`{first}` is declared before any `feature` clause")
                }
            };
            let span = Span::new(clause.loc.offset, clause.loc.offset);
            out.push(
                Diagnostic::new(RuleId::ClauseGrouping, message, clause.loc, span)
                    .with_fix("group it under a categorized clause such as `feature -- Access`"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::check_lines;

    #[test]
    fn test_one_warning_per_clause() {
        let lines = [
            "class SHELF",
            "\tloose: INTEGER",
            "feature",
            "\ta: INTEGER",
            "\tb: INTEGER",
            "feature -- Odds and ends",
            "\tc: INTEGER",
            "feature -- Status report",
            "\td: BOOLEAN",
            "feature -- Empty",
            "end",
        ];
        let diags = check_lines(RuleId::ClauseGrouping, &lines);
        let found: Vec<_> = diags.iter().map(|d| (d.location.line, d.message.as_str())).collect();
        assert_eq!(
            found,
            [
                (2, "`loose` is declared before any `feature` clause"),
                (3, "feature clause has no category comment"),
                (6, "`Odds and ends` is not a recognized feature clause category"),
            ]
        );
        assert!(diags.iter().all(|d| !d.is_error()));
    }
}

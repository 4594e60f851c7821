//! `command-query`: queries must not change the object, commands must not produce a result.
//!
//! Without semantic analysis the rule is a heuristic. A query is flagged only when its body assigns an attribute of
//! the class that its own postcondition mentions; a command is flagged when it assigns `Result`.

use std::collections::BTreeSet;

use eiflint_core::lang::rules::RuleId;
use eiflint_syntax::ast::{ClassDecl, FeatureDecl, FeatureKind};
use eiflint_syntax::diagnostics::Diagnostic;

use super::RuleContext;

pub(super) fn check(ctx: &RuleContext<'_>, out: &mut Vec<Diagnostic>) {
    for class in ctx.classes() {
        for feature in class.features() {
            let Some(body) = feature.compound() else {
                continue;
            };
            match feature.kind() {
                FeatureKind::Query => check_query(ctx, class, feature, out),
                FeatureKind::Command => {
                    if let Some(loc) = body.result_assignment {
                        let span = ctx
                            .tokens
                            .iter()
                            .find(|t| t.loc == loc)
                            .map_or(feature.name.span, |t| t.span);
                        out.push(Diagnostic::new(
                            RuleId::CommandQuery,
                            format!("command `{}` assigns `Result` but has no result type", feature.name.node),
                            loc,
                            span,
                        ));
                    }
                }
            }
        }
    }
}

fn check_query(ctx: &RuleContext<'_>, class: &ClassDecl, feature: &FeatureDecl, out: &mut Vec<Diagnostic>) {
    let Some(ensure) = &feature.ensure else {
        return;
    };
    let Some(body) = feature.compound() else {
        return;
    };
    let mentioned: BTreeSet<String> = ensure
        .assertions
        .iter()
        .flat_map(|a| ctx.significant(a.expr))
        .filter_map(|t| t.ident())
        .map(str::to_ascii_lowercase)
        .collect();
    let shadowed = |name: &str| {
        feature
            .locals
            .iter()
            .chain(feature.params.iter())
            .any(|e| e.name.node.eq_ignore_ascii_case(name))
    };
    let is_attribute = |name: &str| class.attribute_names().any(|a| a.eq_ignore_ascii_case(name));

    let mut reported = BTreeSet::new();
    for target in &body.assigned {
        let key = target.node.to_ascii_lowercase();
        if !mentioned.contains(&key) || shadowed(&target.node) || !is_attribute(&target.node) {
            continue;
        }
        if !reported.insert(key) {
            continue;
        }
        out.push(Diagnostic::new(
            RuleId::CommandQuery,
            format!(
                "query `{}` assigns attribute `{}`, which its postcondition mentions",
                feature.name.node, target.node
            ),
            target.loc,
            target.span,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::check_lines;

    const COUNTER: &[&str] = &[
        "class COUNTER",
        "feature -- Access",
        "\tcount: INTEGER",
        "\tnext_value: INTEGER",
        "\t\t\t-- Advance and return.",
        "\t\tlocal",
        "\t\t\tstep: INTEGER",
        "\t\tdo",
        "\t\t\tstep := 1",
        "\t\t\tcount := count + step",
        "\t\t\tcount := count + 0",
        "\t\t\tResult := count",
        "\t\tensure",
        "\t\t\tadvanced: count = old count + 1",
        "\t\t\tstepped: step = 1",
        "\t\tend",
        "feature -- Element change",
        "\treset",
        "\t\t\t-- Start over.",
        "\t\tdo",
        "\t\t\tcount := 0",
        "\t\t\tResult := 0",
        "\t\tend",
        "end",
    ];

    #[test]
    fn test_mutating_query_and_result_in_command() {
        let diags = check_lines(RuleId::CommandQuery, COUNTER);
        let found: Vec<_> = diags.iter().map(|d| (d.location.line, d.message.as_str())).collect();
        assert_eq!(
            found,
            [
                (10, "query `next_value` assigns attribute `count`, which its postcondition mentions"),
                (22, "command `reset` assigns `Result` but has no result type"),
            ]
        );
    }

    #[test]
    fn test_query_without_postcondition_is_not_flagged() {
        let lines = [
            "class CACHE",
            "feature -- Access",
            "\thits: INTEGER",
            "\tlookup: INTEGER",
            "\t\tdo",
            "\t\t\thits := hits + 1",
            "\t\t\tResult := hits",
            "\t\tend",
            "end",
        ];
        assert!(check_lines(RuleId::CommandQuery, &lines).is_empty());
    }
}

//! `naming`: class names and formal generics are `UPPER_SNAKE`; features, arguments and locals are `lower_snake`.
//! Constant attributes may also be written `Capitalized_snake`.

use eiflint_core::lang::conventions::{self, is_class_name, is_constant_name, is_feature_name};
use eiflint_core::lang::rules::RuleId;
use eiflint_syntax::ast::{Entity, FeatureDecl, Ident, RoutineBody, Spanned};
use eiflint_syntax::diagnostics::Diagnostic;

use super::RuleContext;

pub(super) fn check(ctx: &RuleContext<'_>, out: &mut Vec<Diagnostic>) {
    for class in ctx.classes() {
        if let Some(name) = &class.name {
            if !is_class_name(&name.node) {
                out.push(misnamed("class name", name, conventions::to_class_case(&name.node)));
            }
        }
        for generic in &class.generics {
            if !is_class_name(&generic.node) {
                out.push(misnamed("formal generic", generic, conventions::to_class_case(&generic.node)));
            }
        }
        for feature in class.features() {
            check_feature(feature, out);
        }
    }
}

fn check_feature(feature: &FeatureDecl, out: &mut Vec<Diagnostic>) {
    let name = &feature.name;
    if matches!(feature.body, RoutineBody::Constant { .. }) {
        if !is_constant_name(&name.node) {
            out.push(misnamed("constant name", name, conventions::to_feature_case(&name.node)));
        }
    } else if !is_feature_name(&name.node) {
        out.push(misnamed("feature name", name, conventions::to_feature_case(&name.node)));
    }
    check_entities("argument", &feature.params, out);
    check_entities("local", &feature.locals, out);
}

fn check_entities(what: &str, entities: &[Entity], out: &mut Vec<Diagnostic>) {
    for entity in entities {
        if !is_feature_name(&entity.name.node) {
            let suggestion = conventions::to_feature_case(&entity.name.node);
            out.push(misnamed(&format!("{what} name"), &entity.name, suggestion));
        }
    }
}

fn misnamed(what: &str, name: &Spanned<Ident>, suggestion: String) -> Diagnostic {
    let convention = if what.starts_with("class") || what.starts_with("formal") {
        "UPPER_SNAKE"
    } else {
        "lower_snake"
    };
    let diag = Diagnostic::new(
        RuleId::Naming,
        format!("{what} `{}` is not {convention} case", name.node),
        name.loc,
        name.span,
    );
    if suggestion.is_empty() || suggestion == name.node {
        diag
    } else {
        diag.with_fix(format!("rename to `{suggestion}`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::check_lines;

    fn messages(lines: &[&str]) -> Vec<String> {
        check_lines(RuleId::Naming, lines)
            .into_iter()
            .map(|d| d.message)
            .collect()
    }

    #[test]
    fn test_conventional_names_pass() {
        let lines = [
            "class LINKED_LIST [G]",
            "feature -- Access",
            "\tcount: INTEGER",
            "\tDefault_capacity: INTEGER = 10",
            "\tput_front (an_item: G)",
            "\t\t\t-- Add `an_item'.",
            "\t\tlocal",
            "\t\t\tnew_cell: G",
            "\t\tdo",
            "\t\t\tnew_cell := an_item",
            "\t\tend",
            "end",
        ];
        assert!(messages(&lines).is_empty());
    }

    #[test]
    fn test_every_kind_of_name_is_checked() {
        let lines = [
            "class LinkedList [g]",
            "feature -- Access",
            "\tItemCount: INTEGER",
            "\tMaxSize: INTEGER = 10",
            "\tputFront (anItem: INTEGER)",
            "\t\tlocal",
            "\t\t\tNewCell: INTEGER",
            "\t\tdo",
            "\t\tend",
            "end",
        ];
        assert_eq!(
            messages(&lines),
            [
                "class name `LinkedList` is not UPPER_SNAKE case",
                "formal generic `g` is not UPPER_SNAKE case",
                "feature name `ItemCount` is not lower_snake case",
                "constant name `MaxSize` is not lower_snake case",
                "feature name `putFront` is not lower_snake case",
                "argument name `anItem` is not lower_snake case",
                "local name `NewCell` is not lower_snake case",
            ]
        );
    }

    #[test]
    fn test_fix_suggests_conventional_spelling() {
        let diags = check_lines(RuleId::Naming, &["class Person", "end"]);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].fix.as_deref(), Some("rename to `PERSON`"));
        assert_eq!(diags[0].location.line, 1);
        assert_eq!(diags[0].location.column, 7);
    }
}

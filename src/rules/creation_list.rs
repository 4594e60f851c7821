//! `creation-list`: every name in a `create` clause must be a procedure declared by the class.
//!
//! Names the class does not declare are only reported when the class has no parents, since an inherited
//! procedure cannot be seen structurally. `default_create` is always available.

use eiflint_core::lang::rules::RuleId;
use eiflint_syntax::ast::{FeatureKind, RoutineBody};
use eiflint_syntax::diagnostics::Diagnostic;

use super::RuleContext;

const DEFAULT_CREATE: &str = "default_create";

pub(super) fn check(ctx: &RuleContext<'_>, out: &mut Vec<Diagnostic>) {
    for class in ctx.classes() {
        for name in class.creation_names() {
            let message = match class.feature(&name.node) {
                None if class.parents.is_empty() && !name.node.eq_ignore_ascii_case(DEFAULT_CREATE) => {
                    format!("creation procedure `{}` is not declared in `{}`", name.node, class.name_str())
                }
                None => continue,
                Some(feature) => {
                    let what = match feature.body {
                        RoutineBody::Attribute { .. } => "an attribute",
                        RoutineBody::Constant { .. } => "a constant",
                        _ if feature.kind() == FeatureKind::Query => "a function",
                        _ => continue,
                    };
                    format!("creation procedure `{}` is {what}, not a procedure", name.node)
                }
            };
            out.push(Diagnostic::new(RuleId::CreationList, message, name.loc, name.span));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::check_lines;

    #[test]
    fn test_undeclared_and_non_procedure_names() {
        let lines = [
            "class BOX",
            "create",
            "\tmake, make_empty, width, Limit, area, default_create",
            "feature -- Initialization",
            "\tmake",
            "\t\tdo",
            "\t\tend",
            "feature -- Access",
            "\twidth: INTEGER",
            "\tLimit: INTEGER = 10",
            "\tarea: INTEGER",
            "\t\tdo",
            "\t\t\tResult := width * width",
            "\t\tend",
            "end",
        ];
        let messages: Vec<_> = check_lines(RuleId::CreationList, &lines)
            .into_iter()
            .map(|d| d.message)
            .collect();
        assert_eq!(
            messages,
            [
                "creation procedure `make_empty` is not declared in `BOX`",
                "creation procedure `width` is an attribute, not a procedure",
                "creation procedure `Limit` is a constant, not a procedure",
                "creation procedure `area` is a function, not a procedure",
            ]
        );
    }

    #[test]
    fn test_inherited_names_are_not_guessed() {
        let lines = [
            "class SPECIAL_BOX",
            "inherit",
            "\tBOX",
            "create",
            "\tmake_empty",
            "end",
        ];
        assert!(check_lines(RuleId::CreationList, &lines).is_empty());
    }
}

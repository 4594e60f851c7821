//! `contract-presence`: a routine whose compound has more than one statement must carry at least one `require` or
//! `ensure` assertion. Single-statement routines (typically once-constants and setters) are exempt.

use eiflint_core::lang::rules::RuleId;
use eiflint_syntax::diagnostics::Diagnostic;

use super::RuleContext;

pub(super) fn check(ctx: &RuleContext<'_>, out: &mut Vec<Diagnostic>) {
    for class in ctx.classes() {
        for feature in class.features().filter(|f| f.is_routine()) {
            let Some(body) = feature.compound() else {
                continue;
            };
            if body.statement_count <= 1 || feature.contract_assertions().next().is_some() {
                continue;
            }
            let name = &feature.name;
            out.push(Diagnostic::new(
                RuleId::ContractPresence,
                format!(
                    "{} has {} statements but no require or ensure assertion",
                    name.node, body.statement_count
                ),
                name.loc,
                name.span,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::check_lines;

    #[test]
    fn test_multi_statement_routine_without_contract() {
        let lines = [
            "class PERSON",
            "create",
            "\tmake",
            "feature -- Initialization",
            "\tmake",
            "\t\t\t-- Set up.",
            "\t\tdo",
            "\t\t\tname := \"anonymous\"",
            "\t\t\tage := 0",
            "\t\tend",
            "end",
        ];
        let diags = check_lines(RuleId::ContractPresence, &lines);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "make has 2 statements but no require or ensure assertion");
        assert_eq!((diags[0].location.line, diags[0].location.column), (5, 2));
        assert!(diags[0].is_error());
    }

    #[test]
    fn test_instructions_on_one_line_without_semicolon() {
        let lines = [
            "class PERSON",
            "feature -- Initialization",
            "\tmake",
            "\t\t\t-- Set up.",
            "\t\tdo",
            "\t\t\tname := \"x\" age := 0",
            "\t\tend",
            "end",
        ];
        let diags = check_lines(RuleId::ContractPresence, &lines);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "make has 2 statements but no require or ensure assertion");
    }

    #[test]
    fn test_exemptions() {
        let lines = [
            "class CONFIG",
            "feature -- Access",
            "\tsingle: INTEGER",
            "\t\tonce",
            "\t\t\tResult := 42",
            "\t\tend",
            "\tguarded (n: INTEGER)",
            "\t\trequire",
            "\t\t\tn > 0",
            "\t\tdo",
            "\t\t\tcount := n",
            "\t\t\ttotal := total + n",
            "\t\tend",
            "\tpromised",
            "\t\tdo",
            "\t\t\tcount := 0; total := 0",
            "\t\tensure",
            "\t\t\treset: count = 0",
            "\t\tend",
            "\tabstract",
            "\t\tdeferred",
            "\t\tend",
            "end",
        ];
        assert!(check_lines(RuleId::ContractPresence, &lines).is_empty());
    }
}

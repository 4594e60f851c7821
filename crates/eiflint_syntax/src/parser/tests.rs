#[cfg(test)]
/// Parser unit tests.
///
/// These tests cover the structural productions and the recovery behavior (one diagnostic per malformed
/// construct, later declarations still parsed).
mod tests {
    use super::*;
    use crate::lexer;
    use crate::source::SourceBuffer;
    use eiflint_core::lang::rules::RuleId;

    fn parse_lines(lines: &[&str]) -> Parsed {
        let mut text = lines.join("\n");
        text.push('\n');
        let source = SourceBuffer::new("test.e", text);
        let lexed = lexer::lex(&source);
        parse(&lexed.tokens)
    }

    fn only_class(parsed: &Parsed) -> &ClassDecl {
        assert_eq!(parsed.tree.classes.len(), 1, "expected exactly one class");
        &parsed.tree.classes[0]
    }

    #[test]
    fn test_parse_full_class() {
        let parsed = parse_lines(&[
            "class PERSON",
            "",
            "create",
            "\tmake",
            "",
            "feature {NONE} -- Initialization",
            "",
            "\tmake (a_name: STRING)",
            "\t\t\t-- Create a person.",
            "\t\trequire",
            "\t\t\tname_not_empty: not a_name.is_empty",
            "\t\tdo",
            "\t\t\tname := a_name",
            "\t\t\tage := 0",
            "\t\tensure",
            "\t\t\tname_set: name = a_name",
            "\t\tend",
            "",
            "feature -- Access",
            "",
            "\tname: STRING",
            "",
            "\tage: INTEGER",
            "",
            "invariant",
            "\tnon_negative_age: age >= 0",
            "",
            "end",
        ]);
        assert!(parsed.diagnostics.is_empty(), "unexpected diagnostics: {:?}", parsed.diagnostics);
        let class = only_class(&parsed);
        assert_eq!(class.name_str(), "PERSON");
        assert_eq!(class.kind, ClassKind::Regular);
        assert_eq!(class.creation_names().map(|n| n.node.as_str()).collect::<Vec<_>>(), ["make"]);
        assert_eq!(class.clauses.len(), 2);
        assert_eq!(
            class.clauses[0].category,
            ClauseCategory::Recognized(clauses::ClauseCategoryId::Initialization)
        );
        assert_eq!(class.clauses[1].category, ClauseCategory::Recognized(clauses::ClauseCategoryId::Access));

        let make = class.feature("make").expect("make is declared");
        assert_eq!(make.kind(), FeatureKind::Command);
        assert_eq!(make.params.len(), 1);
        assert_eq!(make.params[0].ty.text, "STRING");
        assert_eq!(make.header_comment.as_ref().map(|c| c.node.as_str()), Some("Create a person."));
        let body = make.compound().expect("make has a body");
        assert_eq!(body.statement_count, 2);
        assert_eq!(body.assigned.iter().map(|a| a.node.as_str()).collect::<Vec<_>>(), ["name", "age"]);
        assert_eq!(make.contract_assertions().count(), 2);
        assert!(make.contract_assertions().all(|a| a.label.is_some()));

        let age = class.feature("age").expect("age is declared");
        assert!(age.is_attribute());
        assert_eq!(age.kind(), FeatureKind::Query);
        assert_eq!(class.attribute_names().collect::<Vec<_>>(), ["name", "age"]);

        let invariant = class.invariant.as_ref().expect("class invariant");
        assert_eq!(invariant.assertions.len(), 1);
        assert_eq!(invariant.assertions[0].kind, AssertionKind::Invariant);
    }

    #[test]
    fn test_multi_name_declaration_expands() {
        let parsed = parse_lines(&["class A", "feature -- Access", "\tx, y: INTEGER", "end"]);
        let class = only_class(&parsed);
        let names: Vec<_> = class.features().map(|f| f.name.node.as_str()).collect();
        assert_eq!(names, ["x", "y"]);
        assert!(class.features().all(|f| f.return_type.as_ref().is_some_and(|t| t.text == "INTEGER")));
    }

    #[test]
    fn test_unlabeled_assertion_is_not_a_parse_error() {
        let parsed = parse_lines(&[
            "class A",
            "feature -- Element change",
            "\tput (v: INTEGER)",
            "\t\t\t-- Put `v'.",
            "\t\trequire",
            "\t\t\tv > 0",
            "\t\t\tsmall: v < 10",
            "\t\tdo",
            "\t\tend",
            "end",
        ]);
        assert!(parsed.diagnostics.is_empty(), "unexpected diagnostics: {:?}", parsed.diagnostics);
        let put = only_class(&parsed).feature("put").expect("put is declared");
        let require = put.require.as_ref().expect("precondition");
        assert_eq!(require.assertions.len(), 2);
        assert!(require.assertions[0].label.is_none());
        assert_eq!(require.assertions[1].label.as_ref().map(|l| l.node.as_str()), Some("small"));
    }

    #[test]
    fn test_assertion_line_continuation() {
        let parsed = parse_lines(&[
            "class A",
            "feature -- Status report",
            "\tvalid: BOOLEAN",
            "\t\t\t-- Valid?",
            "\t\tdo",
            "\t\tensure",
            "\t\t\tdefinition: Result = (count > 0 and",
            "\t\t\t\tcount < 10)",
            "\t\t\tother: count > 1",
            "\t\t\t\tand count < 5",
            "\t\tend",
            "end",
        ]);
        assert!(parsed.diagnostics.is_empty(), "unexpected diagnostics: {:?}", parsed.diagnostics);
        let valid = only_class(&parsed).feature("valid").expect("valid is declared");
        assert_eq!(valid.ensure.as_ref().map(|e| e.assertions.len()), Some(2));
    }

    #[test]
    fn test_extended_assertion_blocks() {
        let parsed = parse_lines(&[
            "class A",
            "feature -- Basic operations",
            "\tf",
            "\t\t\t-- F.",
            "\t\trequire else",
            "\t\t\tok: True",
            "\t\tdo",
            "\t\tensure then",
            "\t\t\tdone: True",
            "\t\tend",
            "end",
        ]);
        assert!(parsed.diagnostics.is_empty(), "unexpected diagnostics: {:?}", parsed.diagnostics);
        let f = only_class(&parsed).feature("f").expect("f is declared");
        assert!(f.require.as_ref().is_some_and(|r| r.extended));
        assert!(f.ensure.as_ref().is_some_and(|e| e.extended));
    }

    #[test]
    fn test_label_without_expression_is_reported() {
        let parsed = parse_lines(&[
            "class A",
            "feature -- Basic operations",
            "\tf",
            "\t\trequire",
            "\t\t\tpositive:",
            "\t\tdo",
            "\t\tend",
            "end",
        ]);
        assert_eq!(parsed.diagnostics.len(), 1);
        assert!(parsed.diagnostics[0].message.contains("`positive` has no expression"));
        assert_eq!(only_class(&parsed).features().count(), 1);
    }

    #[test]
    fn test_recovers_after_malformed_feature() {
        let parsed = parse_lines(&[
            "class A",
            "feature -- Access",
            "\tbroken (x: ): INTEGER",
            "\t\tdo",
            "\t\t\tResult := 1",
            "\t\tend",
            "",
            "\tgood",
            "\t\t\t-- Good.",
            "\t\tdo",
            "\t\t\tx := 1",
            "\t\tend",
            "end",
        ]);
        assert_eq!(parsed.diagnostics.len(), 1, "one error, no cascade: {:?}", parsed.diagnostics);
        assert_eq!(parsed.diagnostics[0].rule, RuleId::SyntaxError);
        assert_eq!(parsed.diagnostics[0].location.line, 3);
        let class = only_class(&parsed);
        let names: Vec<_> = class.features().map(|f| f.name.node.as_str()).collect();
        assert_eq!(names, ["good"]);
    }

    #[test]
    fn test_in_body_create_does_not_stop_recovery() {
        let parsed = parse_lines(&[
            "class A",
            "feature -- Access",
            "\tbroken (: INTEGER",
            "\t\tdo",
            "\t\t\tcreate list.make",
            "\t\tend",
            "",
            "\tgood: INTEGER",
            "end",
        ]);
        assert_eq!(parsed.diagnostics.len(), 1, "{:?}", parsed.diagnostics);
        let class = only_class(&parsed);
        assert!(class.creators.is_empty());
        assert!(class.feature("good").is_some());
    }

    #[test]
    fn test_missing_class_end() {
        let parsed = parse_lines(&["class A", "feature -- Access", "\tx: INTEGER"]);
        assert_eq!(parsed.diagnostics.len(), 1);
        assert!(parsed.diagnostics[0].message.contains("missing `end` for class `A`"));
        assert_eq!(only_class(&parsed).features().count(), 1);
    }

    #[test]
    fn test_missing_feature_end() {
        let parsed = parse_lines(&[
            "class A",
            "feature -- Basic operations",
            "\tf",
            "\t\tdo",
            "\t\t\tx := 1",
            "feature -- Access",
            "\tx: INTEGER",
            "end",
        ]);
        assert_eq!(parsed.diagnostics.len(), 1, "{:?}", parsed.diagnostics);
        assert!(parsed.diagnostics[0].message.contains("`end` to close `f`"));
        let class = only_class(&parsed);
        assert_eq!(class.clauses.len(), 2);
        assert!(class.feature("x").is_some_and(FeatureDecl::is_attribute));
    }

    #[test]
    fn test_clause_categories() {
        let parsed = parse_lines(&[
            "class A",
            "\timplicit: INTEGER",
            "feature",
            "\tmissing: INTEGER",
            "feature -- Odds and ends",
            "\tunknown: INTEGER",
            "feature {ANY} -- status report.",
            "\tknown: INTEGER",
            "end",
        ]);
        assert!(parsed.diagnostics.is_empty(), "unexpected diagnostics: {:?}", parsed.diagnostics);
        let categories: Vec<_> = only_class(&parsed).clauses.iter().map(|c| c.category.clone()).collect();
        assert_eq!(
            categories,
            [
                ClauseCategory::Implicit,
                ClauseCategory::Missing,
                ClauseCategory::Unrecognized("Odds and ends".to_string()),
                ClauseCategory::Recognized(clauses::ClauseCategoryId::StatusReport),
            ]
        );
    }

    #[test]
    fn test_routine_forms() {
        let parsed = parse_lines(&[
            "deferred class SHAPE",
            "feature -- Measurement",
            "\tarea: REAL",
            "\t\t\t-- Area.",
            "\t\tdeferred",
            "\t\tend",
            "",
            "\tnative_size: INTEGER",
            "\t\t\t-- Size.",
            "\t\texternal \"C\" alias \"size\"",
            "\t\tend",
            "",
            "\tshared: LIST [SHAPE]",
            "\t\t\t-- Shared list.",
            "\t\tonce (\"PROCESS\")",
            "\t\t\tcreate Result.make (10)",
            "\t\tend",
            "",
            "\tcolor: detachable STRING",
            "\t\tattribute",
            "\t\t\tResult := \"red\"",
            "\t\tend",
            "",
            "\tMax_size: INTEGER = 100",
            "\tOffset: INTEGER = -1",
            "end",
        ]);
        assert!(parsed.diagnostics.is_empty(), "unexpected diagnostics: {:?}", parsed.diagnostics);
        let class = only_class(&parsed);
        assert_eq!(class.kind, ClassKind::Deferred);
        assert!(matches!(class.feature("area").map(|f| &f.body), Some(RoutineBody::Deferred)));
        assert!(matches!(
            class.feature("native_size").map(|f| &f.body),
            Some(RoutineBody::External { language }) if language == "C"
        ));

        let shared = class.feature("shared").expect("shared is declared");
        assert!(shared.is_once());
        assert!(matches!(&shared.body, RoutineBody::Once { keys, .. } if keys == &["PROCESS".to_string()]));
        assert_eq!(shared.return_type.as_ref().map(|t| t.text.as_str()), Some("LIST [SHAPE]"));

        let color = class.feature("color").expect("color is declared");
        assert!(color.is_attribute());
        assert!(color.return_type.as_ref().is_some_and(TypeRef::is_detachable));
        assert!(color.compound().is_some_and(|b| b.result_assignment.is_some()));

        let values: Vec<_> = ["Max_size", "Offset"]
            .iter()
            .filter_map(|name| match class.feature(name).map(|f| &f.body) {
                Some(RoutineBody::Constant { value }) => Some(value.node.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(values, ["100", "-1"]);
    }

    #[test]
    fn test_once_class_and_creators() {
        let parsed = parse_lines(&[
            "once class COLOR",
            "create",
            "\tred, green",
            "feature {NONE} -- Initialization",
            "\tred",
            "\t\t\t-- Red.",
            "\t\tonce",
            "\t\tend",
            "",
            "\tgreen",
            "\t\t\t-- Green.",
            "\t\tdo",
            "\t\tend",
            "end",
        ]);
        assert!(parsed.diagnostics.is_empty(), "unexpected diagnostics: {:?}", parsed.diagnostics);
        let class = only_class(&parsed);
        assert!(class.is_once());
        assert_eq!(class.creation_names().count(), 2);
        assert!(class.feature("red").is_some_and(FeatureDecl::is_once));
        assert!(class.feature("green").is_some_and(|f| !f.is_once()));
    }

    #[test]
    fn test_loop_invariant_and_statement_count() {
        let parsed = parse_lines(&[
            "class A",
            "feature -- Measurement",
            "\tsum (n: INTEGER): INTEGER",
            "\t\t\t-- Sum.",
            "\t\tlocal",
            "\t\t\ti: INTEGER",
            "\t\tdo",
            "\t\t\tfrom",
            "\t\t\t\ti := 1",
            "\t\t\tinvariant",
            "\t\t\t\ti >= 1",
            "\t\t\tuntil",
            "\t\t\t\ti > n",
            "\t\t\tloop",
            "\t\t\t\tResult := Result +",
            "\t\t\t\t\ti",
            "\t\t\t\ti := i + 1",
            "\t\t\tvariant",
            "\t\t\t\tn - i + 1",
            "\t\t\tend",
            "\t\tend",
            "end",
        ]);
        assert!(parsed.diagnostics.is_empty(), "unexpected diagnostics: {:?}", parsed.diagnostics);
        let sum = only_class(&parsed).feature("sum").expect("sum is declared");
        assert_eq!(sum.locals.len(), 1);
        let body = sum.compound().expect("sum has a body");
        assert_eq!(body.statement_count, 1);
        assert_eq!(body.loop_invariants.len(), 1);
        assert_eq!(body.loop_invariants[0].kind, AssertionKind::LoopInvariant);
        assert!(body.loop_invariants[0].assertions[0].label.is_none());
        assert!(body.result_assignment.is_some());
    }

    #[test]
    fn test_statement_separators_and_continuations() {
        let parsed = parse_lines(&[
            "class A",
            "feature -- Basic operations",
            "\tf",
            "\t\t\t-- F.",
            "\t\tdo",
            "\t\t\ta := 1; b := 2",
            "\t\t\tname := \"x\" age := 0",
            "\t\t\tio.put_string (name) io.new_line",
            "\t\t\tc := foo (a,",
            "\t\t\t\tb)",
            "\t\t\td := a",
            "\t\t\t\t+ b",
            "\t\t\tif a > b then",
            "\t\t\t\tx := 1",
            "\t\t\t\ty := 2",
            "\t\t\tend",
            "\t\tend",
            "end",
        ]);
        let f = only_class(&parsed).feature("f").expect("f is declared");
        let body = f.compound().expect("f has a body");
        assert_eq!(body.statement_count, 9);
        assert_eq!(
            body.assigned.iter().map(|a| a.node.as_str()).collect::<Vec<_>>(),
            ["a", "b", "name", "age", "c", "d", "x", "y"]
        );
    }

    #[test]
    fn test_agent_forms() {
        let parsed = parse_lines(&[
            "class A",
            "feature -- Basic operations",
            "\tf",
            "\t\t\t-- F.",
            "\t\tdo",
            "\t\t\tlist.do_all (agent print (?))",
            "\t\t\tp := agent {STRING}.count",
            "\t\t\tq := agent (x: INTEGER): BOOLEAN do Result := x > 0 end",
            "\t\t\tr := agent list.extend",
            "\t\t\ts := agent g (1, ?)",
            "\t\tend",
            "end",
        ]);
        assert!(parsed.diagnostics.is_empty(), "unexpected diagnostics: {:?}", parsed.diagnostics);
        let class = only_class(&parsed);
        assert_eq!(class.agents.len(), 5);

        let print = &class.agents[0];
        assert_eq!(print.target, AgentTarget::Current);
        assert_eq!(print.feature.as_ref().map(|f| f.node.as_str()), Some("print"));
        assert!(print.is_all_open());

        let count = &class.agents[1];
        assert_eq!(count.target, AgentTarget::Open("STRING".to_string()));
        assert!(count.args.is_none());

        assert!(class.agents[2].inline().is_some_and(|inline| inline.params.len() == 1));
        assert!(class.agents[2].feature.is_none());

        assert!(matches!(class.agents[3].target, AgentTarget::Closed(_)));
        assert_eq!(class.agents[3].feature.as_ref().map(|f| f.node.as_str()), Some("extend"));

        let partial = &class.agents[4];
        assert!(!partial.is_all_open());
        let args = partial.args.as_ref().expect("explicit arguments");
        assert_eq!(args.len(), 2);
        assert!(!args[0].is_open());
        assert!(args[1].is_open());

        let f = class.feature("f").expect("f is declared");
        assert_eq!(f.compound().map(|b| b.statement_count), Some(5));
    }

    #[test]
    fn test_inline_agent_keeps_its_contract() {
        let parsed = parse_lines(&[
            "class A",
            "feature -- Basic operations",
            "\tf",
            "\t\t\t-- F.",
            "\t\tdo",
            "\t\t\tcall (agent (n: INTEGER)",
            "\t\t\t\trequire",
            "\t\t\t\t\tpositive: n > 0",
            "\t\t\t\tdo",
            "\t\t\t\t\tprint (n)",
            "\t\t\t\tensure",
            "\t\t\t\t\tn > 1",
            "\t\t\t\tend)",
            "\t\tend",
            "end",
        ]);
        assert!(parsed.diagnostics.is_empty(), "unexpected diagnostics: {:?}", parsed.diagnostics);
        let class = only_class(&parsed);
        let inline = class.agents[0].inline().expect("inline agent");
        assert_eq!(inline.params[0].name.node.as_str(), "n");
        let require = inline.require.as_ref().expect("agent precondition");
        assert_eq!(require.kind, AssertionKind::Precondition);
        assert_eq!(require.assertions[0].label.as_ref().map(|l| l.node.as_str()), Some("positive"));
        let ensure = inline.ensure.as_ref().expect("agent postcondition");
        assert!(ensure.assertions[0].label.is_none());
        assert_eq!(inline.body.statement_count, 1);
    }

    #[test]
    fn test_agent_in_assertion() {
        let parsed = parse_lines(&[
            "class A",
            "feature -- Status report",
            "\tall_positive: BOOLEAN",
            "\t\t\t-- All positive?",
            "\t\tdo",
            "\t\tensure",
            "\t\t\tdefinition: Result = items.for_all (agent is_positive (?))",
            "\t\tend",
            "end",
        ]);
        assert!(parsed.diagnostics.is_empty(), "unexpected diagnostics: {:?}", parsed.diagnostics);
        let class = only_class(&parsed);
        assert_eq!(class.agents.len(), 1);
        assert!(class.agents[0].is_all_open());
    }

    #[test]
    fn test_inherit_and_generics() {
        let parsed = parse_lines(&[
            "class STACK [G -> ANY, H]",
            "inherit",
            "\tLIST [G]",
            "\t\trename",
            "\t\t\tcount as size",
            "\t\tredefine",
            "\t\t\tput",
            "\t\tend",
            "\tCOMPARABLE",
            "feature -- Access",
            "\ttop: G",
            "end",
        ]);
        assert!(parsed.diagnostics.is_empty(), "unexpected diagnostics: {:?}", parsed.diagnostics);
        let class = only_class(&parsed);
        assert_eq!(class.generics.iter().map(|g| g.node.as_str()).collect::<Vec<_>>(), ["G", "H"]);
        assert_eq!(class.parents.iter().map(|p| p.node.as_str()).collect::<Vec<_>>(), ["LIST", "COMPARABLE"]);
    }

    #[test]
    fn test_unknown_character_reported_once() {
        let parsed = parse_lines(&["class A", "feature -- Access", "\tx: INTEGER", "\t#", "end"]);
        assert_eq!(parsed.diagnostics.len(), 1, "{:?}", parsed.diagnostics);
        assert!(parsed.diagnostics[0].message.contains("unexpected character `#`"));
        assert_eq!(parsed.diagnostics[0].location.line, 4);
    }

    #[test]
    fn test_unterminated_string_reported() {
        let parsed = parse_lines(&["class A", "feature -- Access", "\tName: STRING = \"abc", "end"]);
        assert_eq!(parsed.diagnostics.len(), 1, "{:?}", parsed.diagnostics);
        assert!(parsed.diagnostics[0].message.contains("unterminated string literal"));
    }

    #[test]
    fn test_garbage_before_class() {
        let parsed = parse_lines(&["feature x", "class A", "end"]);
        assert_eq!(parsed.diagnostics.len(), 1);
        assert!(parsed.diagnostics[0].message.starts_with("expected class declaration"));
        assert_eq!(only_class(&parsed).name_str(), "A");
    }

    #[test]
    fn test_empty_file_declares_no_class() {
        let parsed = parse_lines(&["-- nothing here"]);
        assert!(parsed.tree.classes.is_empty());
        assert_eq!(parsed.diagnostics.len(), 1);
        assert!(parsed.diagnostics[0].message.contains("declares no class"));
    }
}

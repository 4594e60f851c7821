//! Rule engine
//!
//! A fixed, ordered registry of independent rule checkers. Each checker is a plain function from a
//! [`RuleContext`] (the syntax tree, the full token sequence and the source text) to the diagnostics of its own
//! rule. Checkers never see each other's output; the order of [`CHECKERS`] only makes the output reproducible.
//!
//! # Adding a Rule
//!
//! 1. Add the rule to the rulebook (`eiflint_core::lang::rules`).
//! 2. Create `src/rules/<your_rule>.rs` with `pub(super) fn check(ctx, out)`.
//! 3. Register it in [`CHECKERS`] in rulebook order.
//!
//! `invalid-escape` and `tab-expected` come from the lexer; [`escapes`] only reclassifies the former.

mod agent_form;
mod assertion_labeling;
mod attachment;
mod clause_grouping;
mod command_query;
mod contract_presence;
mod creation_list;
pub mod escapes;
mod header_comment;
mod line_length;
mod naming;
mod once_class;
mod quantifiers;

use eiflint_core::lang::rules::RuleId;
use eiflint_syntax::ast::{AssertionBlock, ClassDecl, SyntaxTree, TokenRange};
use eiflint_syntax::diagnostics::Diagnostic;
use eiflint_syntax::lexer::Token;
use eiflint_syntax::source::SourceBuffer;
use eiflint_syntax::token_helpers;

use crate::config::LintConfig;

/// Everything a checker may look at. Read-only.
pub struct RuleContext<'a> {
    pub tree: &'a SyntaxTree,
    /// The complete token sequence, comments included. Tree ranges index into it.
    pub tokens: &'a [Token],
    pub source: &'a SourceBuffer,
    pub config: &'a LintConfig,
}

impl<'a> RuleContext<'a> {
    pub fn new(tree: &'a SyntaxTree, tokens: &'a [Token], source: &'a SourceBuffer, config: &'a LintConfig) -> Self {
        Self {
            tree,
            tokens,
            source,
            config,
        }
    }

    pub fn classes(&self) -> &'a [ClassDecl] {
        &self.tree.classes
    }

    /// Non-comment tokens of `range`.
    pub fn significant(&self, range: TokenRange) -> impl Iterator<Item = &'a Token> + 'a {
        token_helpers::significant(self.tokens, range)
    }

    /// Source-like text of `range`, for messages.
    pub fn text(&self, range: TokenRange) -> String {
        token_helpers::render_range(self.tokens, range)
    }
}

/// A checker writes the diagnostics of its rule into `out`.
pub type CheckFn = fn(&RuleContext<'_>, &mut Vec<Diagnostic>);

/// Registry entry: rule id → checker.
pub struct RuleChecker {
    pub rule: RuleId,
    pub check: CheckFn,
}

/// All engine checkers, in rulebook order.
pub static CHECKERS: &[RuleChecker] = &[
    RuleChecker {
        rule: RuleId::LineLength,
        check: line_length::check,
    },
    RuleChecker {
        rule: RuleId::Naming,
        check: naming::check,
    },
    RuleChecker {
        rule: RuleId::ContractPresence,
        check: contract_presence::check,
    },
    RuleChecker {
        rule: RuleId::AssertionLabeling,
        check: assertion_labeling::check,
    },
    RuleChecker {
        rule: RuleId::Attachment,
        check: attachment::check,
    },
    RuleChecker {
        rule: RuleId::CommandQuery,
        check: command_query::check,
    },
    RuleChecker {
        rule: RuleId::OnceClass,
        check: once_class::check,
    },
    RuleChecker {
        rule: RuleId::CreationList,
        check: creation_list::check,
    },
    RuleChecker {
        rule: RuleId::ClauseGrouping,
        check: clause_grouping::check,
    },
    RuleChecker {
        rule: RuleId::HeaderComment,
        check: header_comment::check,
    },
    RuleChecker {
        rule: RuleId::AgentForm,
        check: agent_form::check,
    },
    RuleChecker {
        rule: RuleId::SymbolicQuantifier,
        check: quantifiers::check,
    },
];

/// Run every enabled checker.
///
/// The engine does not short-circuit: a tree recovered from syntax errors is checked like any other.
#[tracing::instrument(skip_all, fields(file = ctx.source.name()))]
pub fn run_checkers(ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for checker in CHECKERS {
        if !ctx.config.is_enabled(checker.rule) {
            continue;
        }
        let mut found = Vec::new();
        (checker.check)(ctx, &mut found);
        debug_assert!(found.iter().all(|d| d.rule == checker.rule));
        tracing::trace!(rule = %checker.rule, found = found.len(), "rule checked");
        diagnostics.extend(found);
    }
    diagnostics
}

/// Every assertion block of a class: feature contracts, inline agent contracts, loop invariants and the class
/// invariant.
pub(crate) fn assertion_blocks(class: &ClassDecl) -> impl Iterator<Item = &AssertionBlock> + '_ {
    let contracts = class
        .features()
        .flat_map(|f| f.require.iter().chain(f.ensure.iter()));
    let agents = class
        .agents
        .iter()
        .filter_map(|a| a.inline())
        .flat_map(|inline| inline.require.iter().chain(inline.ensure.iter()));
    let loops = class
        .features()
        .filter_map(|f| f.compound())
        .chain(class.agents.iter().filter_map(|a| a.inline()).map(|inline| &inline.body))
        .flat_map(|body| body.loop_invariants.iter());
    contracts.chain(agents).chain(loops).chain(class.invariant.iter())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use eiflint_syntax::{lexer, parser};

    /// Run one checker over `lines` with the default configuration.
    pub(crate) fn check_lines(rule: RuleId, lines: &[&str]) -> Vec<Diagnostic> {
        check_lines_with(rule, lines, &LintConfig::default())
    }

    pub(crate) fn check_lines_with(rule: RuleId, lines: &[&str], config: &LintConfig) -> Vec<Diagnostic> {
        let mut text = lines.join("\n");
        text.push('\n');
        let source = SourceBuffer::new("test.e", text);
        let lexed = lexer::lex(&source);
        let parsed = parser::parse(&lexed.tokens);
        let ctx = RuleContext::new(&parsed.tree, &lexed.tokens, &source, config);
        let checker = CHECKERS
            .iter()
            .find(|c| c.rule == rule)
            .expect("checker is registered");
        let mut out = Vec::new();
        (checker.check)(&ctx, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eiflint_core::lang::rules::{RULES, RuleSource};

    #[test]
    fn test_every_engine_rule_has_one_checker_in_rulebook_order() {
        let engine_rules: Vec<_> = RULES
            .iter()
            .filter(|r| r.source == RuleSource::Engine)
            .map(|r| r.id)
            .collect();
        let registered: Vec<_> = CHECKERS.iter().map(|c| c.rule).collect();
        assert_eq!(registered, engine_rules);
    }
}

//! Diagnostic collector
//!
//! Merges the lexer, parser and rule-engine diagnostics of one file, drops exact duplicates and sorts the result so
//! reports are reproducible.

use std::cmp::Ordering;

use eiflint_core::lang::rules::Severity;
use eiflint_syntax::diagnostics::Diagnostic;

use crate::config::LintConfig;

/// Outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

/// Merge diagnostic batches into one sorted, duplicate-free list.
///
/// Two diagnostics are duplicates when they share rule, location and message. Order is ascending by
/// `(line, column, rule id)`, then by message.
pub fn collect(batches: impl IntoIterator<Item = Vec<Diagnostic>>) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> = batches.into_iter().flatten().collect();
    diagnostics.sort_by(compare);
    diagnostics.dedup_by(|a, b| a.rule == b.rule && a.location == b.location && a.message == b.message);
    diagnostics
}

fn compare(a: &Diagnostic, b: &Diagnostic) -> Ordering {
    (a.location.line, a.location.column, a.rule.as_str(), &a.message).cmp(&(
        b.location.line,
        b.location.column,
        b.rule.as_str(),
        &b.message,
    ))
}

/// `Fail` when any diagnostic reaches the configured severity threshold.
pub fn verdict<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>, config: &LintConfig) -> Verdict {
    if diagnostics.into_iter().any(|d| config.fails_on(d.severity)) {
        Verdict::Fail
    } else {
        Verdict::Pass
    }
}

/// `(errors, warnings)`
pub fn count_by_severity<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>) -> (usize, usize) {
    diagnostics
        .into_iter()
        .fold((0, 0), |(errors, warnings), d| match d.severity {
            Severity::Error => (errors + 1, warnings),
            Severity::Warning => (errors, warnings + 1),
        })
}

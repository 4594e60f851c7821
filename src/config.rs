//! Run configuration
//!
//! One [`LintConfig`] is built per invocation (from CLI flags) and shared read-only by every worker.

use std::collections::BTreeSet;

use eiflint_core::lang::conventions::{DEFAULT_MAX_LINE_LENGTH, DEFAULT_TAB_WIDTH};
use eiflint_core::lang::rules::{self, RULES, RuleId, Severity};

use crate::errors::{LintError, LintResult};

/// Checker configuration
#[derive(Debug, Clone)]
pub struct LintConfig {
    /// Selectable rules that run. `syntax-error` and `io-error` are always reported.
    enabled: BTreeSet<RuleId>,
    /// Lowest severity that fails the run
    pub severity_threshold: Severity,
    /// Maximum physical line width (`line-length`)
    pub max_line_length: usize,
    /// Width of a tab when measuring lines
    pub tab_width: usize,
    /// Worker threads for batch analysis; `None` lets rayon decide
    pub jobs: Option<usize>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            enabled: RULES.iter().map(|r| r.id).collect(),
            severity_threshold: Severity::Error,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            tab_width: DEFAULT_TAB_WIDTH,
            jobs: None,
        }
    }
}

impl LintConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the run to `selected` rules.
    pub fn with_rules(mut self, selected: impl IntoIterator<Item = RuleId>) -> Self {
        self.enabled = selected.into_iter().collect();
        self
    }

    /// Set the severity that fails the run
    pub fn with_severity_threshold(mut self, threshold: Severity) -> Self {
        self.severity_threshold = threshold;
        self
    }

    /// Set the maximum line length
    pub fn with_max_line_length(mut self, length: usize) -> Self {
        self.max_line_length = length;
        self
    }

    pub fn with_tab_width(mut self, width: usize) -> Self {
        self.tab_width = width;
        self
    }

    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Return `true` if diagnostics of `rule` are reported.
    pub fn is_enabled(&self, rule: RuleId) -> bool {
        !rules::info_for(rule).selectable || self.enabled.contains(&rule)
    }

    /// Return `true` if a diagnostic of this severity fails the run.
    pub fn fails_on(&self, severity: Severity) -> bool {
        severity >= self.severity_threshold
    }
}

/// Parse a `--rules` selection (`naming,once-class`).
///
/// ## Errors
/// - [`LintError::UnknownRule`] for a name that is not in the rulebook.
pub fn parse_rule_list<S: AsRef<str>>(names: &[S]) -> LintResult<Vec<RuleId>> {
    names
        .iter()
        .flat_map(|n| n.as_ref().split(','))
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|n| rules::from_str(n).ok_or_else(|| LintError::UnknownRule(n.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_everything() {
        let config = LintConfig::default();
        assert!(RULES.iter().all(|r| config.is_enabled(r.id)));
        assert_eq!(config.max_line_length, 120);
        assert_eq!(config.tab_width, 4);
    }

    #[test]
    fn test_selection_keeps_fixed_rules() {
        let config = LintConfig::new().with_rules([RuleId::Naming]);
        assert!(config.is_enabled(RuleId::Naming));
        assert!(!config.is_enabled(RuleId::ContractPresence));
        assert!(config.is_enabled(RuleId::SyntaxError));
        assert!(config.is_enabled(RuleId::IoError));
    }

    #[test]
    fn test_threshold() {
        let config = LintConfig::default();
        assert!(config.fails_on(Severity::Error));
        assert!(!config.fails_on(Severity::Warning));

        let strict = config.with_severity_threshold(Severity::Warning);
        assert!(strict.fails_on(Severity::Warning));
    }

    #[test]
    fn test_parse_rule_list() {
        let rules = parse_rule_list(&["naming, once-class", "tab-expected"]).unwrap();
        assert_eq!(rules, [RuleId::Naming, RuleId::OnceClass, RuleId::TabExpected]);

        let err = parse_rule_list(&["nope"]).unwrap_err();
        assert_eq!(err.to_string(), "unknown rule `nope` (see --list-rules)");
    }
}

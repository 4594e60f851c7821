//! The fixed, versioned rulebook.
//!
//! Every diagnostic the checker can emit carries a [`RuleId`]. This table records, per rule, the stable spelling
//! printed in reports, the default severity, which pipeline stage raises it, and a one-line summary used by
//! `--list-rules`.
//!
//! ## Notes
//! - The table is read-only process-wide configuration: it is never mutated during a run.
//! - `selectable` rules can be switched off with `--rules`; `syntax-error` and `io-error` are always reported.
//! - Ordering of [`RULES`] is the deterministic order in which rule checkers run.
//!
//! ## Examples
//! ```rust
//! use eiflint_core::lang::rules::{self, RuleId, Severity};
//!
//! assert_eq!(rules::from_str("once-class"), Some(RuleId::OnceClass));
//! assert_eq!(rules::default_severity(RuleId::TabExpected), Severity::Warning);
//! ```

use std::fmt;

/// Version of the rulebook encoded in [`RULES`].
pub const RULEBOOK_VERSION: &str = "2026.1";

/// Diagnostic severity. `Error` fails a run; `Warning` is reported only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identifier for every rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleId {
    SyntaxError,
    IoError,
    InvalidEscape,
    TabExpected,
    LineLength,
    Naming,
    ContractPresence,
    AssertionLabeling,
    Attachment,
    CommandQuery,
    OnceClass,
    CreationList,
    ClauseGrouping,
    HeaderComment,
    AgentForm,
    SymbolicQuantifier,
}

/// The pipeline stage that raises a rule's diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleSource {
    Pipeline,
    Lexer,
    Parser,
    Engine,
}

/// Metadata for a rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleInfo {
    pub id: RuleId,
    pub canonical: &'static str,
    pub default_severity: Severity,
    pub source: RuleSource,
    pub selectable: bool,
    pub summary: &'static str,
}

/// Registry of all rules.
pub const RULES: &[RuleInfo] = &[
    rule(
        RuleId::SyntaxError,
        "syntax-error",
        Severity::Error,
        RuleSource::Parser,
        false,
        "malformed construct; the parser resumes at the next clause or feature",
    ),
    rule(
        RuleId::IoError,
        "io-error",
        Severity::Error,
        RuleSource::Pipeline,
        false,
        "source file could not be read",
    ),
    rule(
        RuleId::InvalidEscape,
        "invalid-escape",
        Severity::Error,
        RuleSource::Lexer,
        true,
        "unknown %-code, unterminated %/../ wrapper or non-digit in a numeric code (warning inside comments)",
    ),
    rule(
        RuleId::TabExpected,
        "tab-expected",
        Severity::Warning,
        RuleSource::Lexer,
        true,
        "indentation must consist of tab characters only",
    ),
    rule(
        RuleId::LineLength,
        "line-length",
        Severity::Warning,
        RuleSource::Engine,
        true,
        "physical line wider than the configured maximum",
    ),
    rule(
        RuleId::Naming,
        "naming",
        Severity::Warning,
        RuleSource::Engine,
        true,
        "class names UPPER_SNAKE; feature, argument and local names lower_snake",
    ),
    rule(
        RuleId::ContractPresence,
        "contract-presence",
        Severity::Error,
        RuleSource::Engine,
        true,
        "routine with more than one statement needs a require or ensure clause",
    ),
    rule(
        RuleId::AssertionLabeling,
        "assertion-labeling",
        Severity::Error,
        RuleSource::Engine,
        true,
        "every assertion carries a label",
    ),
    rule(
        RuleId::Attachment,
        "attachment",
        Severity::Warning,
        RuleSource::Engine,
        true,
        "attached argument needs no Void check in its own precondition",
    ),
    rule(
        RuleId::CommandQuery,
        "command-query",
        Severity::Error,
        RuleSource::Engine,
        true,
        "queries must not mutate attributes they promise about; commands must not assign Result",
    ),
    rule(
        RuleId::OnceClass,
        "once-class",
        Severity::Error,
        RuleSource::Engine,
        true,
        "creation procedures of a once class must be once procedures",
    ),
    rule(
        RuleId::CreationList,
        "creation-list",
        Severity::Error,
        RuleSource::Engine,
        true,
        "creation names must denote declared procedures",
    ),
    rule(
        RuleId::ClauseGrouping,
        "clause-grouping",
        Severity::Warning,
        RuleSource::Engine,
        true,
        "features belong to a feature clause with a recognised category comment",
    ),
    rule(
        RuleId::HeaderComment,
        "header-comment",
        Severity::Warning,
        RuleSource::Engine,
        true,
        "routines start with a header comment",
    ),
    rule(
        RuleId::AgentForm,
        "agent-form",
        Severity::Warning,
        RuleSource::Engine,
        true,
        "an agent whose arguments are all open uses the shorthand form",
    ),
    rule(
        RuleId::SymbolicQuantifier,
        "symbolic-quantifier",
        Severity::Warning,
        RuleSource::Engine,
        true,
        "assertions quantify with the symbolic forms; a symbolic quantifier needs its `¦` separator",
    ),
];

/// Canonical spelling.
pub fn as_str(id: RuleId) -> &'static str {
    info_for(id).canonical
}

/// Default severity.
pub fn default_severity(id: RuleId) -> Severity {
    info_for(id).default_severity
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: RuleId) -> &'static RuleInfo {
    RULES.iter().find(|r| r.id == id).expect("rule info missing")
}

/// Lookup by spelling.
pub fn from_str(s: &str) -> Option<RuleId> {
    RULES.iter().find(|r| r.canonical == s).map(|r| r.id)
}

impl RuleId {
    pub fn as_str(self) -> &'static str {
        as_str(self)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(as_str(*self))
    }
}

const fn rule(
    id: RuleId,
    canonical: &'static str,
    default_severity: Severity,
    source: RuleSource,
    selectable: bool,
    summary: &'static str,
) -> RuleInfo {
    RuleInfo {
        id,
        canonical,
        default_severity,
        source,
        selectable,
        summary,
    }
}

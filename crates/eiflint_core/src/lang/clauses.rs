//! Recognised feature-clause categories.
//!
//! A feature clause is tagged by the comment that follows its `feature` keyword:
//!
//! ```text
//! feature {NONE} -- Initialization
//! ```
//!
//! [`from_comment`] maps such a comment to a [`ClauseCategoryId`]. Matching ignores case, surrounding whitespace
//! and a trailing period.
//!
//! ## Examples
//! ```rust
//! use eiflint_core::lang::clauses::{self, ClauseCategoryId};
//!
//! assert_eq!(clauses::from_comment(" Element change"), Some(ClauseCategoryId::ElementChange));
//! assert_eq!(clauses::from_comment("access."), Some(ClauseCategoryId::Access));
//! assert_eq!(clauses::from_comment("Stuff"), None);
//! ```

/// Stable identifier for every recognised clause category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseCategoryId {
    Initialization,
    Access,
    Measurement,
    Comparison,
    StatusReport,
    StatusSetting,
    CursorMovement,
    ElementChange,
    Removal,
    Resizing,
    Transformation,
    Conversion,
    Duplication,
    BasicOperations,
    Miscellaneous,
    Implementation,
    Output,
    Constants,
    Queries,
    Commands,
    Inapplicable,
    Obsolete,
    ContractSupport,
    Iteration,
    Factory,
    Settings,
    Visitor,
    Debugging,
}

/// Metadata for a clause category.
#[derive(Debug, Clone, Copy)]
pub struct ClauseCategoryInfo {
    pub id: ClauseCategoryId,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
}

/// Registry of all clause categories.
pub const CLAUSE_CATEGORIES: &[ClauseCategoryInfo] = &[
    info(ClauseCategoryId::Initialization, "Initialization", &["Initialisation", "Creation"]),
    info(ClauseCategoryId::Access, "Access", &[]),
    info(ClauseCategoryId::Measurement, "Measurement", &[]),
    info(ClauseCategoryId::Comparison, "Comparison", &[]),
    info(ClauseCategoryId::StatusReport, "Status report", &[]),
    info(ClauseCategoryId::StatusSetting, "Status setting", &[]),
    info(ClauseCategoryId::CursorMovement, "Cursor movement", &[]),
    info(ClauseCategoryId::ElementChange, "Element change", &[]),
    info(ClauseCategoryId::Removal, "Removal", &[]),
    info(ClauseCategoryId::Resizing, "Resizing", &[]),
    info(ClauseCategoryId::Transformation, "Transformation", &[]),
    info(ClauseCategoryId::Conversion, "Conversion", &[]),
    info(ClauseCategoryId::Duplication, "Duplication", &[]),
    info(ClauseCategoryId::BasicOperations, "Basic operations", &[]),
    info(ClauseCategoryId::Miscellaneous, "Miscellaneous", &[]),
    info(ClauseCategoryId::Implementation, "Implementation", &[]),
    info(ClauseCategoryId::Output, "Output", &[]),
    info(ClauseCategoryId::Constants, "Constants", &[]),
    info(ClauseCategoryId::Queries, "Queries", &["Query"]),
    info(ClauseCategoryId::Commands, "Commands", &["Command"]),
    info(ClauseCategoryId::Inapplicable, "Inapplicable", &[]),
    info(ClauseCategoryId::Obsolete, "Obsolete", &[]),
    info(ClauseCategoryId::ContractSupport, "Contract support", &[]),
    info(ClauseCategoryId::Iteration, "Iteration", &[]),
    info(ClauseCategoryId::Factory, "Factory", &[]),
    info(ClauseCategoryId::Settings, "Settings", &[]),
    info(ClauseCategoryId::Visitor, "Visitor", &[]),
    info(ClauseCategoryId::Debugging, "Debugging", &["Debug"]),
];

/// Canonical spelling.
pub fn as_str(id: ClauseCategoryId) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: ClauseCategoryId) -> &'static ClauseCategoryInfo {
    CLAUSE_CATEGORIES
        .iter()
        .find(|c| c.id == id)
        .expect("clause category info missing")
}

/// Map the text of a clause comment (without the leading `--`) to a category.
pub fn from_comment(text: &str) -> Option<ClauseCategoryId> {
    let text = text.trim();
    let text = text.strip_suffix('.').unwrap_or(text).trim_end();
    CLAUSE_CATEGORIES
        .iter()
        .find(|c| c.canonical.eq_ignore_ascii_case(text) || c.aliases.iter().any(|a| a.eq_ignore_ascii_case(text)))
        .map(|c| c.id)
}

const fn info(id: ClauseCategoryId, canonical: &'static str, aliases: &'static [&'static str]) -> ClauseCategoryInfo {
    ClauseCategoryInfo { id, canonical, aliases }
}

//! Define the reserved-word vocabulary of the checked language.
//!
//! This module is the single source of truth for reserved words: a stable identifier ([`KeywordId`]) plus a const
//! metadata table ([`KEYWORDS`]) recording the canonical spelling, a category and whether the word opens a class-level
//! clause (the parser's synchronization points).
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**. Keywords are lower-case; the reserved entities (`Current`,
//!   `Result`, `Precursor`, `Void`, `True`, `False`) are spelled with a leading capital.
//! - Some reserved words are also word operators (`and`, `implies`, ...). Binding strength is not modelled: the
//!   checker is structural.
//!
//! ## Examples
//! ```rust
//! use eiflint_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("feature"), Some(KeywordId::Feature));
//! assert_eq!(keywords::as_str(KeywordId::Void), "Void");
//! assert!(keywords::is_clause_start(KeywordId::Invariant));
//! ```

/// Stable identifier for every reserved word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Class structure
    Note,
    Class,
    Obsolete,
    Inherit,
    Rename,
    Export,
    Undefine,
    Redefine,
    Select,
    Create,
    Convert,
    Feature,
    Invariant,
    End,

    // Class and type marks
    Deferred,
    Expanded,
    Frozen,
    Once,
    Separate,
    Attached,
    Detachable,
    Like,

    // Routine structure
    Require,
    Ensure,
    Local,
    Do,
    Attribute,
    External,
    Alias,
    Assign,
    Rescue,
    Retry,

    // Instructions
    If,
    Then,
    Elseif,
    Else,
    Inspect,
    When,
    From,
    Until,
    Loop,
    Variant,
    Across,
    As,
    Some,
    All,
    Debug,
    Check,
    Agent,
    Old,

    // Word operators
    And,
    Or,
    Xor,
    Not,
    Implies,

    // Reserved entities
    Current,
    Result,
    Precursor,
    Void,
    True,
    False,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Structure,
    TypeMark,
    Routine,
    Contract,
    Instruction,
    Operator,
    Entity,
}

/// Metadata for a keyword.
///
/// ## Notes
/// - `clause_start` marks words that begin a class-level clause. The parser resumes there after a local failure.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub clause_start: bool,
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Class structure
    clause(KeywordId::Note, "note"),
    info(KeywordId::Class, "class", KeywordCategory::Structure),
    info(KeywordId::Obsolete, "obsolete", KeywordCategory::Structure),
    clause(KeywordId::Inherit, "inherit"),
    info(KeywordId::Rename, "rename", KeywordCategory::Structure),
    info(KeywordId::Export, "export", KeywordCategory::Structure),
    info(KeywordId::Undefine, "undefine", KeywordCategory::Structure),
    info(KeywordId::Redefine, "redefine", KeywordCategory::Structure),
    info(KeywordId::Select, "select", KeywordCategory::Structure),
    clause(KeywordId::Create, "create"),
    clause(KeywordId::Convert, "convert"),
    clause(KeywordId::Feature, "feature"),
    clause(KeywordId::Invariant, "invariant"),
    info(KeywordId::End, "end", KeywordCategory::Structure),
    // Class and type marks
    info(KeywordId::Deferred, "deferred", KeywordCategory::TypeMark),
    info(KeywordId::Expanded, "expanded", KeywordCategory::TypeMark),
    info(KeywordId::Frozen, "frozen", KeywordCategory::TypeMark),
    info(KeywordId::Once, "once", KeywordCategory::Routine),
    info(KeywordId::Separate, "separate", KeywordCategory::TypeMark),
    info(KeywordId::Attached, "attached", KeywordCategory::TypeMark),
    info(KeywordId::Detachable, "detachable", KeywordCategory::TypeMark),
    info(KeywordId::Like, "like", KeywordCategory::TypeMark),
    // Routine structure
    info(KeywordId::Require, "require", KeywordCategory::Contract),
    info(KeywordId::Ensure, "ensure", KeywordCategory::Contract),
    info(KeywordId::Local, "local", KeywordCategory::Routine),
    info(KeywordId::Do, "do", KeywordCategory::Routine),
    info(KeywordId::Attribute, "attribute", KeywordCategory::Routine),
    info(KeywordId::External, "external", KeywordCategory::Routine),
    info(KeywordId::Alias, "alias", KeywordCategory::Routine),
    info(KeywordId::Assign, "assign", KeywordCategory::Routine),
    info(KeywordId::Rescue, "rescue", KeywordCategory::Routine),
    info(KeywordId::Retry, "retry", KeywordCategory::Instruction),
    // Instructions
    info(KeywordId::If, "if", KeywordCategory::Instruction),
    info(KeywordId::Then, "then", KeywordCategory::Instruction),
    info(KeywordId::Elseif, "elseif", KeywordCategory::Instruction),
    info(KeywordId::Else, "else", KeywordCategory::Instruction),
    info(KeywordId::Inspect, "inspect", KeywordCategory::Instruction),
    info(KeywordId::When, "when", KeywordCategory::Instruction),
    info(KeywordId::From, "from", KeywordCategory::Instruction),
    info(KeywordId::Until, "until", KeywordCategory::Instruction),
    info(KeywordId::Loop, "loop", KeywordCategory::Instruction),
    info(KeywordId::Variant, "variant", KeywordCategory::Contract),
    info(KeywordId::Across, "across", KeywordCategory::Instruction),
    info(KeywordId::As, "as", KeywordCategory::Instruction),
    info(KeywordId::Some, "some", KeywordCategory::Instruction),
    info(KeywordId::All, "all", KeywordCategory::Instruction),
    info(KeywordId::Debug, "debug", KeywordCategory::Instruction),
    info(KeywordId::Check, "check", KeywordCategory::Contract),
    info(KeywordId::Agent, "agent", KeywordCategory::Instruction),
    info(KeywordId::Old, "old", KeywordCategory::Contract),
    // Word operators
    info(KeywordId::And, "and", KeywordCategory::Operator),
    info(KeywordId::Or, "or", KeywordCategory::Operator),
    info(KeywordId::Xor, "xor", KeywordCategory::Operator),
    info(KeywordId::Not, "not", KeywordCategory::Operator),
    info(KeywordId::Implies, "implies", KeywordCategory::Operator),
    // Reserved entities
    info(KeywordId::Current, "Current", KeywordCategory::Entity),
    info(KeywordId::Result, "Result", KeywordCategory::Entity),
    info(KeywordId::Precursor, "Precursor", KeywordCategory::Entity),
    info(KeywordId::Void, "Void", KeywordCategory::Entity),
    info(KeywordId::True, "True", KeywordCategory::Entity),
    info(KeywordId::False, "False", KeywordCategory::Entity),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category of `id`.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Return `true` if `id` opens a class-level clause (`feature`, `create`, `invariant`, ...).
pub fn is_clause_start(id: KeywordId) -> bool {
    info_for(id).clause_start
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if `s` is a reserved word, `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        clause_start: false,
    }
}

const fn clause(id: KeywordId, canonical: &'static str) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category: KeywordCategory::Structure,
        clause_start: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_are_capitalized() {
        for k in KEYWORDS.iter().filter(|k| k.category == KeywordCategory::Entity) {
            assert!(k.canonical.starts_with(|c: char| c.is_ascii_uppercase()), "{}", k.canonical);
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(from_str("do"), Some(KeywordId::Do));
        assert_eq!(from_str("Do"), None);
        assert_eq!(from_str("void"), None);
    }

    #[test]
    fn clause_starts() {
        let starts: Vec<_> = KEYWORDS.iter().filter(|k| k.clause_start).map(|k| k.canonical).collect();
        assert_eq!(starts, ["note", "inherit", "create", "convert", "feature", "invariant"]);
    }
}

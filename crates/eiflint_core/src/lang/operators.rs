//! Operator vocabulary.
//!
//! Symbolic operators only: word operators (`and`, `or else`, `implies`, ...) are reserved words and live in
//! [`crate::lang::keywords`].
//!
//! ## Notes
//! - `continues_line` marks operators that cannot end a complete expression. A line ending with one (or the next
//!   line starting with one) continues the same statement or assertion.
//! - The symbolic quantifiers `∀` / `∃` and their separator `¦` are included.
//!
//! ## Examples
//! ```rust
//! use eiflint_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("/="), Some(OperatorId::NotEq));
//! assert_eq!(operators::as_str(OperatorId::ForAll), "∀");
//! ```

/// Stable identifier for operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    Assign,
    AssignAttempt,
    Eq,
    NotEq,
    Tilde,
    NotTilde,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Plus,
    Minus,
    Star,
    Slash,
    SlashSlash,
    BackslashBackslash,
    Caret,
    DotDot,
    ForAll,
    Exists,
    BrokenBar,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub continues_line: bool,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    op(OperatorId::Assign, ":=", true),
    op(OperatorId::AssignAttempt, "?=", true),
    op(OperatorId::Eq, "=", true),
    op(OperatorId::NotEq, "/=", true),
    op(OperatorId::Tilde, "~", true),
    op(OperatorId::NotTilde, "/~", true),
    op(OperatorId::Lt, "<", true),
    op(OperatorId::Gt, ">", true),
    op(OperatorId::LtEq, "<=", true),
    op(OperatorId::GtEq, ">=", true),
    op(OperatorId::Plus, "+", true),
    op(OperatorId::Minus, "-", true),
    op(OperatorId::Star, "*", true),
    op(OperatorId::Slash, "/", true),
    op(OperatorId::SlashSlash, "//", true),
    op(OperatorId::BackslashBackslash, "\\\\", true),
    op(OperatorId::Caret, "^", true),
    op(OperatorId::DotDot, "..", true),
    op(OperatorId::ForAll, "∀", false),
    op(OperatorId::Exists, "∃", false),
    op(OperatorId::BrokenBar, "¦", true),
];

/// Canonical spelling.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Return `true` if a line ending with (or starting with) this operator continues the current expression.
pub fn continues_line(id: OperatorId) -> bool {
    info_for(id).continues_line
}

/// Return `true` for the symbolic quantifiers `∀` and `∃`.
pub fn is_quantifier(id: OperatorId) -> bool {
    matches!(id, OperatorId::ForAll | OperatorId::Exists)
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Lookup by spelling.
pub fn from_str(s: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == s).map(|o| o.id)
}

const fn op(id: OperatorId, spelling: &'static str, continues_line: bool) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        continues_line,
    }
}

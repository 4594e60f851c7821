//! Registry-first vocabularies of the checked language.
//!
//! - [`keywords`]: reserved words and reserved entities (`Current`, `Result`, ...).
//! - [`operators`]: operator spellings, including the symbolic quantifiers.
//! - [`punctuation`]: delimiters and separators.
//! - [`escapes`]: the `%` escape grammar (named table and numeric bases).
//! - [`clauses`]: recognised feature-clause categories.
//! - [`rules`]: the fixed rulebook.
//! - [`conventions`]: naming conventions and well-known identifiers.

pub mod clauses;
pub mod conventions;
pub mod escapes;
pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod rules;

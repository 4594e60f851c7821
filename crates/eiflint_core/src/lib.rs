//! Provide the canonical, dependency-free vocabulary of the checked language and of the rulebook.
//!
//! Everything in this crate is a pure `const` registry plus small lookup helpers. The lexer, parser and rule
//! engine consult these tables instead of matching on string spellings.
//!
//! ## Notes
//!
//! - No IO, no global mutable state, no syntax-tree types.
//! - The rulebook table ([`lang::rules::RULES`]) is versioned by [`lang::rules::RULEBOOK_VERSION`].

pub mod lang;

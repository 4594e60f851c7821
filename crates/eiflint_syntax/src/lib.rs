//! Syntax frontend for the checker: source buffer, lexer, AST, tolerant parser and the diagnostic model.
//!
//! The data flow is one-directional: [`source::SourceBuffer`] → [`lexer::lex`] → [`parser::parse`]. Neither stage
//! aborts on malformed input; both return everything they could recover plus [`diagnostics::Diagnostic`]s.
//!
//! ## Notes
//! - This crate is structural only: no type resolution, no inheritance conformance.
//! - Vocabulary identity (keywords/operators/escapes/rules) comes from `eiflint_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use eiflint_syntax::{lexer, parser, source::SourceBuffer};
//!
//! let source = SourceBuffer::new("point.e", "class POINT\nend\n");
//! let lexed = lexer::lex(&source);
//! let parsed = parser::parse(&lexed.tokens);
//! assert_eq!(parsed.tree.classes.len(), 1);
//! assert!(parsed.diagnostics.is_empty());
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod source;
pub mod token_helpers;

#![forbid(unsafe_code)]
//! eiflint: static conformance checker for contract-driven class sources
//!
//! Reads `.e` class texts, checks them against a fixed, versioned rulebook (layout, naming, contracts, command/query
//! separation, creation procedures, agents, quantifiers) and reports diagnostics. Nothing is compiled or executed.
//!
//! ## Pipeline
//!
//! [`pipeline::analyze_source`] runs one text through the lexer, the tolerant parser, every enabled rule checker and
//! the collector. [`pipeline::analyze_batch`] does that for many files in parallel and keeps input order.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//! - **True invariants**: registry lookups (`info_for`) panic only if a table is missing an entry.

pub mod cli;
pub mod collector;
pub mod config;
pub mod errors;
pub mod pipeline;
pub mod report;
pub mod rules;
pub mod version;

pub use eiflint_syntax::diagnostics;
pub use eiflint_syntax::lexer;
pub use eiflint_syntax::parser;
pub use eiflint_syntax::source;

pub use collector::Verdict;
pub use config::LintConfig;
pub use errors::{LintError, LintResult};
pub use pipeline::{BatchReport, FileReport, analyze_batch, analyze_source};
pub use report::OutputFormat;

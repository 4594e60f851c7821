//! Tolerant recursive-descent parser
//!
//! Converts a token sequence into a [`SyntaxTree`]. Parsing never fails: a malformed construct produces a
//! `syntax-error` diagnostic and the parser resumes at the next synchronization point (a clause keyword, the next
//! feature declaration, or end of file), so a single broken feature does not hide findings in the rest of the
//! class.
//!
//! ## Examples
//!
//! ```rust
//! use eiflint_syntax::{lexer, parser, source::SourceBuffer};
//!
//! let source = SourceBuffer::new("a.e", "class A\nfeature -- Access\n\tcount: INTEGER\nend\n");
//! let lexed = lexer::lex(&source);
//! let parsed = parser::parse(&lexed.tokens);
//! assert_eq!(parsed.tree.classes[0].name_str(), "A");
//! assert_eq!(parsed.tree.classes[0].features().count(), 1);
//! ```

use eiflint_core::lang::clauses;
use eiflint_core::lang::keywords::{self, KeywordId};
use eiflint_core::lang::operators::OperatorId;
use eiflint_core::lang::punctuation::PunctuationId;

use crate::ast::*;
use crate::diagnostics::Diagnostic;
use crate::lexer::{Token, TokenKind};
use crate::source::Span;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/class.rs");
include!("parser/features.rs");
include!("parser/types.rs");
include!("parser/assertions.rs");
include!("parser/body.rs");
include!("parser/agents.rs");
include!("parser/api.rs");
include!("parser/tests.rs");

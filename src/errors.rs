//! Library error type.
//!
//! Only failures that stop work before any analysis happens are errors. An unreadable file inside a batch is not:
//! it becomes an `io-error` diagnostic for that file and the batch continues.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LintError {
    #[error("cannot read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{}` is too large ({size} bytes, max {max} bytes)", path.display())]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("no `.{extension}` source files found in {roots}")]
    NoSources { roots: String, extension: &'static str },

    #[error("unknown rule `{0}` (see --list-rules)")]
    UnknownRule(String),

    #[error("cannot encode report: {0}")]
    Json(#[from] serde_json::Error),
}

pub type LintResult<T> = Result<T, LintError>;

//! Analysis pipeline
//!
//! One file: text → tokens → tree → rule checkers → collector. Nothing here mutates an upstream stage's output, and
//! nothing is shared between files, so a batch is analysed in parallel with `rayon` and merged in input order.

use std::fs;
use std::path::{Path, PathBuf};

use eiflint_core::lang::conventions::{SKIPPED_DIRECTORIES, SOURCE_EXTENSION};
use eiflint_core::lang::rules::RuleId;
use eiflint_syntax::diagnostics::Diagnostic;
use eiflint_syntax::source::{SourceBuffer, SourceLocation, Span};
use eiflint_syntax::{lexer, parser};
use rayon::prelude::*;

use crate::collector::{self, Verdict};
use crate::config::LintConfig;
use crate::errors::{LintError, LintResult};
use crate::rules::{self, RuleContext};

/// Maximum source file size (100 MB)
///
/// Larger files are reported as unreadable instead of being loaded.
pub const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

// ============================================================================
// Single file
// ============================================================================

/// Analyse one source text and return its sorted, de-duplicated diagnostics.
#[tracing::instrument(skip_all, fields(file = source.name()))]
pub fn analyze_source(source: &SourceBuffer, config: &LintConfig) -> Vec<Diagnostic> {
    let mut lexed = lexer::lex(source);
    rules::escapes::reclassify(&lexed.tokens, &mut lexed.diagnostics);
    let parsed = parser::parse(&lexed.tokens);

    let ctx = RuleContext::new(&parsed.tree, &lexed.tokens, source, config);
    let engine = rules::run_checkers(&ctx);

    let lexical: Vec<Diagnostic> = lexed
        .diagnostics
        .into_iter()
        .filter(|d| config.is_enabled(d.rule))
        .collect();
    let diagnostics = collector::collect([lexical, parsed.diagnostics, engine]);
    tracing::debug!(diagnostics = diagnostics.len(), "analyzed");
    diagnostics
}

/// Read source file contents.
///
/// ## Errors
/// - [`LintError::Io`] if the file cannot be read or is not UTF-8
/// - [`LintError::TooLarge`] if the file exceeds [`MAX_SOURCE_SIZE`]
pub fn read_source(path: &Path) -> LintResult<String> {
    let io = |source| LintError::Io {
        path: path.to_path_buf(),
        source,
    };
    let metadata = fs::metadata(path).map_err(io)?;
    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(LintError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max: MAX_SOURCE_SIZE,
        });
    }
    fs::read_to_string(path).map_err(io)
}

/// Findings for one input path.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    /// `None` when the file could not be read.
    pub source: Option<SourceBuffer>,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    pub fn has_io_error(&self) -> bool {
        self.diagnostics.iter().any(|d| d.rule == RuleId::IoError)
    }
}

/// Read and analyse one file. A read failure becomes an `io-error` diagnostic for that file.
pub fn analyze_file(path: &Path, config: &LintConfig) -> FileReport {
    match read_source(path) {
        Ok(text) => {
            let source = SourceBuffer::new(path.display().to_string(), text);
            let diagnostics = analyze_source(&source, config);
            FileReport {
                path: path.to_path_buf(),
                source: Some(source),
                diagnostics,
            }
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "unreadable source");
            let start = SourceLocation {
                line: 1,
                column: 1,
                offset: 0,
            };
            FileReport {
                path: path.to_path_buf(),
                source: None,
                diagnostics: vec![Diagnostic::new(RuleId::IoError, err.to_string(), start, Span::default())],
            }
        }
    }
}

// ============================================================================
// Batches
// ============================================================================

/// Expand the command-line paths into the list of files to analyse.
///
/// Directories are searched recursively for `.e` files, skipping hidden directories and build output. Explicit
/// file paths are kept as given, even when they do not exist, so they surface as `io-error`s. The result is sorted
/// and free of duplicates.
///
/// ## Errors
/// - [`LintError::NoSources`] if nothing is left to analyse.
pub fn collect_sources(paths: &[PathBuf]) -> LintResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            collect_source_files(path, &mut files);
        } else {
            files.push(path.clone());
        }
    }
    files.sort();
    files.dedup();

    if files.is_empty() {
        let roots = paths
            .iter()
            .map(|p| format!("`{}`", p.display()))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(LintError::NoSources {
            roots,
            extension: SOURCE_EXTENSION,
        });
    }
    Ok(files)
}

fn collect_source_files(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            // Reading the directory again as a file yields the `io-error` for it.
            tracing::warn!(path = %dir.display(), error = %err, "cannot list directory");
            files.push(dir.to_path_buf());
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if !name.starts_with('.') && !SKIPPED_DIRECTORIES.contains(&name) {
                collect_source_files(&path, files);
            }
        } else if path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION) {
            files.push(path);
        }
    }
}

/// Analyse `paths` in parallel. Reports come back in the order of `paths`.
#[tracing::instrument(skip_all, fields(files = paths.len(), jobs = ?config.jobs))]
pub fn analyze_batch(paths: &[PathBuf], config: &LintConfig) -> BatchReport {
    let run = || -> Vec<FileReport> { paths.par_iter().map(|path| analyze_file(path, config)).collect() };

    let files = match config.jobs {
        Some(jobs) => match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
            Ok(pool) => pool.install(run),
            Err(err) => {
                tracing::warn!(error = %err, "cannot build worker pool; using the global pool");
                run()
            }
        },
        None => run(),
    };
    BatchReport { files }
}

/// Findings for a whole run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// Every diagnostic with the file it belongs to, in report order.
    pub fn diagnostics(&self) -> impl Iterator<Item = (&FileReport, &Diagnostic)> + '_ {
        self.files
            .iter()
            .flat_map(|file| file.diagnostics.iter().map(move |d| (file, d)))
    }

    /// `(errors, warnings)` over all files.
    pub fn counts(&self) -> (usize, usize) {
        collector::count_by_severity(self.diagnostics().map(|(_, d)| d))
    }

    pub fn verdict(&self, config: &LintConfig) -> Verdict {
        collector::verdict(self.diagnostics().map(|(_, d)| d), config)
    }

    /// Process exit status: `2` when any input was unreadable, `1` when the verdict is a failure, `0` otherwise.
    pub fn exit_status(&self, config: &LintConfig) -> i32 {
        if self.files.iter().any(FileReport::has_io_error) {
            2
        } else if self.verdict(config) == Verdict::Fail {
            1
        } else {
            0
        }
    }
}

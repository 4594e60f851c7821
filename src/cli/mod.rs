//! CLI module for the conformance checker
//!
//! ## Usage
//!
//! - `eiflint PATH...` - Check files and directories (directories are searched for `.e` files)
//! - `eiflint --list-rules` - Print the rulebook
//! - `eiflint --lex FILE` / `--parse FILE` - Dump tokens / the syntax tree (debug)
//!
//! ## Exit codes
//!
//! - `0` - nothing at or above the severity threshold
//! - `1` - at least one diagnostic at or above the threshold
//! - `2` - an input could not be read, or the command line was invalid
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use eiflint_core::lang::rules::Severity;

use crate::config::{self, LintConfig};
use crate::errors::LintError;
use crate::report::OutputFormat;
use crate::version::EIFLINT_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// Unreadable input or unusable invocation.
    pub const FATAL: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a fatal error (exit code 2).
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FATAL)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<LintError> for CliError {
    fn from(err: LintError) -> Self {
        CliError::fatal(format!("error: {err}"))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Severity accepted by `--severity-threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThresholdArg {
    Error,
    Warning,
}

impl From<ThresholdArg> for Severity {
    fn from(arg: ThresholdArg) -> Self {
        match arg {
            ThresholdArg::Error => Severity::Error,
            ThresholdArg::Warning => Severity::Warning,
        }
    }
}

/// Static conformance checker for contract-driven class sources
#[derive(Parser, Debug)]
#[command(name = "eiflint")]
#[command(version = EIFLINT_VERSION)]
#[command(about = "Static conformance checker for contract-driven class sources", long_about = None)]
pub struct Cli {
    /// Files or directories to check
    #[arg(value_name = "PATH", required_unless_present_any = ["list_rules", "lex_file", "parse_file"])]
    pub paths: Vec<PathBuf>,

    /// Only run these rules (comma-separated rule ids; default: all)
    #[arg(long, value_name = "RULES", value_delimiter = ',')]
    pub rules: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Lowest severity that fails the run
    #[arg(long, value_enum, default_value_t = ThresholdArg::Error)]
    pub severity_threshold: ThresholdArg,

    /// Maximum physical line width
    #[arg(long, value_name = "N")]
    pub max_line_length: Option<usize>,

    /// Width of a tab when measuring line length
    #[arg(long, value_name = "N")]
    pub tab_width: Option<usize>,

    /// Worker threads for batch analysis
    #[arg(short = 'j', long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Print the rulebook and exit
    #[arg(long)]
    pub list_rules: bool,

    // Debug/development flags
    /// Tokenize only (debug)
    #[arg(long = "lex", value_name = "FILE", conflicts_with = "paths")]
    pub lex_file: Option<PathBuf>,

    /// Parse only (debug)
    #[arg(long = "parse", value_name = "FILE", conflicts_with = "paths")]
    pub parse_file: Option<PathBuf>,
}

impl Cli {
    /// Build the run configuration from the flags.
    ///
    /// ## Errors
    /// - An unknown rule id in `--rules`.
    pub fn config(&self) -> CliResult<LintConfig> {
        let mut config = LintConfig::new()
            .with_severity_threshold(self.severity_threshold.into())
            .with_jobs(self.jobs);
        if !self.rules.is_empty() {
            config = config.with_rules(config::parse_rule_list(&self.rules)?);
        }
        if let Some(length) = self.max_line_length {
            config = config.with_max_line_length(length);
        }
        if let Some(width) = self.tab_width {
            config = config.with_tab_width(width);
        }
        Ok(config)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { ExitCode::FATAL.0 } else { 0 };
            let _ = err.print();
            process::exit(code);
        }
    };

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    // Handle debug flags first
    if let Some(file) = &cli.lex_file {
        return commands::lex_file(file);
    }
    if let Some(file) = &cli.parse_file {
        return commands::parse_file(file);
    }
    if cli.list_rules {
        return Ok(commands::list_rules());
    }

    let config = cli.config()?;
    commands::check_paths(&cli.paths, &config, cli.format)
}

// ============================================================================
// Tests
// ============================================================================

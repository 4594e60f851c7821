//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::{Path, PathBuf};

use eiflint_core::lang::rules::RULES;
use eiflint_syntax::lexer::tokens::escape_text;
use eiflint_syntax::lexer::{self, TokenKind};
use eiflint_syntax::parser;
use eiflint_syntax::source::SourceBuffer;

use crate::config::LintConfig;
use crate::pipeline::{self, read_source};
use crate::report::{self, OutputFormat};
use crate::version::{EIFLINT_VERSION, RULEBOOK_VERSION};

use super::{CliResult, ExitCode};

fn load(path: &Path) -> CliResult<SourceBuffer> {
    let text = read_source(path)?;
    Ok(SourceBuffer::new(path.display().to_string(), text))
}

/// Lex and display tokens.
pub fn lex_file(path: &Path) -> CliResult<ExitCode> {
    let source = load(path)?;
    let lexed = lexer::lex(&source);

    for tok in &lexed.tokens {
        let shown = match &tok.kind {
            TokenKind::Eof => String::new(),
            TokenKind::String(literal) | TokenKind::Char(literal) => literal.render(),
            _ => escape_text(&tok.lexeme),
        };
        println!("{}:{}\t{}\t{}", tok.loc.line, tok.loc.column, tok.kind.describe(), shown);
    }
    for diagnostic in &lexed.diagnostics {
        eprintln!("{}:{diagnostic}", source.name());
    }
    Ok(if lexed.diagnostics.iter().any(|d| d.is_error()) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Parse and display the syntax tree.
pub fn parse_file(path: &Path) -> CliResult<ExitCode> {
    let source = load(path)?;
    let lexed = lexer::lex(&source);
    let parsed = parser::parse(&lexed.tokens);

    println!("{:#?}", parsed.tree);
    for diagnostic in lexed.diagnostics.iter().chain(&parsed.diagnostics) {
        eprintln!("{}:{diagnostic}", source.name());
    }
    Ok(if parsed.diagnostics.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Check every source under `paths` and print the report.
pub fn check_paths(paths: &[PathBuf], config: &LintConfig, format: OutputFormat) -> CliResult<ExitCode> {
    let files = pipeline::collect_sources(paths)?;

    let report = pipeline::analyze_batch(&files, config);
    let rendered = report::render(&report, format)?;
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    eprintln!("{}", report::summary(&report));

    Ok(ExitCode(report.exit_status(config)))
}

/// Print the rulebook.
pub fn list_rules() -> ExitCode {
    println!("eiflint {EIFLINT_VERSION} (rulebook {RULEBOOK_VERSION})");
    let width = RULES.iter().map(|r| r.canonical.len()).max().unwrap_or(0);
    for info in RULES {
        let fixed = if info.selectable { "" } else { " (always on)" };
        println!(
            "{:<width$}  {:<7}  {}{fixed}",
            info.canonical,
            info.default_severity.as_str(),
            info.summary,
        );
    }
    ExitCode::SUCCESS
}

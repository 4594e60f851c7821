//! Report emitter
//!
//! Renders a [`BatchReport`] as plain text (one line per diagnostic), JSON, or `miette` graphical reports with
//! source context. Rendering returns strings; the CLI decides where they are written.

use miette::{GraphicalReportHandler, GraphicalTheme};
use serde::Serialize;

use eiflint_syntax::diagnostics::{Diagnostic, RenderSource};

use crate::errors::LintResult;
use crate::pipeline::{BatchReport, FileReport};

/// Output format for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// `path:line:column: severity [rule] message` (default).
    #[default]
    Text,
    /// A JSON array of diagnostic objects.
    Json,
    /// Graphical reports with source excerpts.
    Pretty,
}

/// Render every diagnostic of `report`.
///
/// ## Errors
/// - [`crate::errors::LintError::Json`] if JSON encoding fails.
pub fn render(report: &BatchReport, format: OutputFormat) -> LintResult<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => render_json(report),
        OutputFormat::Pretty => Ok(render_pretty(report)),
    }
}

/// Exactly one line per diagnostic. Fix suggestions appear only in the `json` and `pretty` formats.
pub fn render_text(report: &BatchReport) -> String {
    report
        .diagnostics()
        .map(|(file, diagnostic)| text_line(file, diagnostic))
        .collect::<Vec<_>>()
        .join("\n")
}

fn text_line(file: &FileReport, diagnostic: &Diagnostic) -> String {
    format!("{}:{diagnostic}", file.display_path())
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    file: String,
    line: u32,
    column: u32,
    severity: &'static str,
    rule: &'static str,
    message: &'a str,
    fix: Option<&'a str>,
}

pub fn render_json(report: &BatchReport) -> LintResult<String> {
    let entries: Vec<JsonDiagnostic<'_>> = report
        .diagnostics()
        .map(|(file, d)| JsonDiagnostic {
            file: file.display_path(),
            line: d.location.line,
            column: d.location.column,
            severity: d.severity.as_str(),
            rule: d.rule.as_str(),
            message: &d.message,
            fix: d.fix.as_deref(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

/// `miette` graphical output. Diagnostics without source text (unreadable files) fall back to the text line.
pub fn render_pretty(report: &BatchReport) -> String {
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    let mut out = String::new();
    for file in &report.files {
        let src = file.source.as_ref().map(RenderSource::new);
        for diagnostic in &file.diagnostics {
            let ok = match &src {
                Some(src) => handler.render_report(&mut out, &diagnostic.rendered(src)).is_ok(),
                None => false,
            };
            if !ok {
                out.push_str(&text_line(file, diagnostic));
                out.push('\n');
            }
        }
    }
    out.trim_end().to_string()
}

/// `3 files checked: 1 error, 2 warnings`
pub fn summary(report: &BatchReport) -> String {
    let (errors, warnings) = report.counts();
    format!(
        "{} checked: {}, {}",
        plural(report.files.len(), "file"),
        plural(errors, "error"),
        plural(warnings, "warning")
    )
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

//! The diagnostic model shared by the lexer, the parser and the rule engine.
//!
//! A [`Diagnostic`] names the rule it enforces ([`RuleId`]), a [`Severity`], a message, the [`SourceLocation`] it
//! is attributed to and an optional, advisory fix text. Fix texts are never applied.
//!
//! [`RenderedDiagnostic`] pairs a diagnostic with its file's [`RenderSource`] so it can be displayed by `miette`'s
//! graphical handler. The source is built once per file and borrowed by every diagnostic of that file.

use std::fmt;

pub use eiflint_core::lang::rules::{RuleId, Severity};
use eiflint_core::lang::rules;
use miette::{LabeledSpan, NamedSource, SourceCode, SourceSpan};

use crate::source::{SourceBuffer, SourceLocation, Span};

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub rule: RuleId,
    pub severity: Severity,
    pub message: String,
    pub location: SourceLocation,
    pub span: Span,
    pub fix: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic with the rule's default severity.
    pub fn new(rule: RuleId, message: impl Into<String>, location: SourceLocation, span: Span) -> Self {
        Self {
            rule,
            severity: rules::default_severity(rule),
            message: message.into(),
            location,
            span,
            fix: None,
        }
    }

    /// Create a `syntax-error` diagnostic.
    pub fn syntax(message: impl Into<String>, location: SourceLocation, span: Span) -> Self {
        Self::new(RuleId::SyntaxError, message, location, span)
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Pair with its file's source text for graphical rendering.
    pub fn rendered<'a>(&'a self, src: &'a RenderSource) -> RenderedDiagnostic<'a> {
        RenderedDiagnostic {
            diagnostic: self,
            src: &src.0,
        }
    }
}

/// Source text of one file in the form `miette` renders excerpts from.
#[derive(Debug)]
pub struct RenderSource(NamedSource<String>);

impl RenderSource {
    pub fn new(source: &SourceBuffer) -> Self {
        Self(NamedSource::new(source.name(), source.text().to_string()))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.location, self.severity, self.rule, self.message
        )
    }
}

/// A diagnostic bundled with its source, displayable through `miette`.
#[derive(Debug, thiserror::Error)]
#[error("{}", diagnostic.message)]
pub struct RenderedDiagnostic<'a> {
    diagnostic: &'a Diagnostic,
    src: &'a NamedSource<String>,
}

impl miette::Diagnostic for RenderedDiagnostic<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.diagnostic.rule))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.diagnostic.severity {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic
            .fix
            .as_ref()
            .map(|fix| Box::new(fix) as Box<dyn fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.diagnostic.span;
        let label = match self.diagnostic.severity {
            Severity::Error => "error here",
            Severity::Warning => "warning here",
        };
        let source_span = SourceSpan::from((span.start, span.len()));
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(label.to_string()),
            source_span,
        ))))
    }
}

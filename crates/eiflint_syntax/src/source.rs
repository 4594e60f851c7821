//! Source text plus a line index.
//!
//! [`SourceBuffer`] owns the raw text of one file and answers offset → (line, column) queries. Every token, tree
//! node and diagnostic is tagged with a [`SourceLocation`] computed here.
//!
//! ## Notes
//! - Lines and columns are 1-based. Columns count Unicode scalar values, so a tab is one column.
//! - `\r\n` line endings are accepted; the `\r` is not part of the line text.

use std::fmt;

/// A byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both `self` and `other`.
    pub fn merge(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

/// A point in the source: 1-based line and column plus the byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
    pub offset: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Raw text of one source file plus its line index.
#[derive(Debug, Clone)]
pub struct SourceBuffer {
    name: String,
    text: String,
    line_starts: Vec<usize>,
}

impl SourceBuffer {
    /// Create a buffer. `name` is used for reports only (usually the file path).
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self {
            name: name.into(),
            text,
            line_starts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of physical lines (a trailing newline does not open a new line).
    pub fn line_count(&self) -> usize {
        if self.text.ends_with('\n') {
            self.line_starts.len() - 1
        } else {
            self.line_starts.len()
        }
    }

    /// Resolve a byte offset. Offsets past the end clamp to the end of the text.
    pub fn location(&self, offset: usize) -> SourceLocation {
        let offset = offset.min(self.text.len());
        let line_index = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line_index];
        let column = self.text.get(line_start..offset).map_or(offset - line_start, |s| s.chars().count());
        SourceLocation {
            line: line_index as u32 + 1,
            column: column as u32 + 1,
            offset,
        }
    }

    /// Byte offset where `line` (1-based) starts.
    pub fn line_start(&self, line: u32) -> Option<usize> {
        let index = (line as usize).checked_sub(1)?;
        self.line_starts.get(index).copied()
    }

    /// Text of `line` (1-based) without its line terminator.
    pub fn line_text(&self, line: u32) -> Option<&str> {
        if line as usize > self.line_count() {
            return None;
        }
        let start = self.line_start(line)?;
        let end = self.line_starts.get(line as usize).map_or(self.text.len(), |next| next - 1);
        let raw = self.text.get(start..end.max(start))?;
        Some(raw.strip_suffix('\r').unwrap_or(raw))
    }

    /// Iterate `(line number, start offset, text)` over every physical line.
    pub fn lines(&self) -> impl Iterator<Item = (u32, usize, &str)> + '_ {
        (1..=self.line_count() as u32).filter_map(move |line| {
            let start = self.line_start(line)?;
            Some((line, start, self.line_text(line)?))
        })
    }
}

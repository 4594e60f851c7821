//! `line-length`: physical lines wider than the configured maximum.

use eiflint_core::lang::rules::RuleId;
use eiflint_syntax::diagnostics::Diagnostic;
use eiflint_syntax::source::Span;

use super::RuleContext;

pub(super) fn check(ctx: &RuleContext<'_>, out: &mut Vec<Diagnostic>) {
    let max = ctx.config.max_line_length;
    let tab_width = ctx.config.tab_width;
    for (line, start, text) in ctx.source.lines() {
        let width = display_width(text, tab_width);
        if width <= max {
            continue;
        }
        out.push(Diagnostic::new(
            RuleId::LineLength,
            format!("line is {width} columns wide (maximum {max})"),
            ctx.source.location(start),
            Span::new(start, start + text.len()),
        ));
        tracing::trace!(line, width, "long line");
    }
}

/// Width with tabs expanded to the next tab stop.
fn display_width(text: &str, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    text.chars().fold(0, |width, c| {
        if c == '\t' {
            width + tab_width - width % tab_width
        } else {
            width + 1
        }
    })
}

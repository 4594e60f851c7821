//! Indentation checking
//!
//! Indentation must consist of tab characters only. The check runs once per physical line and never alters the
//! token stream: a violation is recorded as a `tab-expected` diagnostic on the side.

use eiflint_core::lang::rules::RuleId;

use super::Lexer;
use crate::diagnostics::Diagnostic;
use crate::source::Span;

impl<'a> Lexer<'a> {
    /// Consume the leading blanks of the current line.
    ///
    /// A space anywhere in the run yields one diagnostic at the first space. Blank lines are not checked.
    pub(super) fn scan_indentation(&mut self) {
        let start = self.current_pos;
        let mut first_space = None;

        while let Some(c) = self.peek() {
            match c {
                ' ' => {
                    if first_space.is_none() {
                        first_space = Some(self.current_pos);
                    }
                    self.advance();
                }
                '\t' => {
                    self.advance();
                }
                _ => break,
            }
        }
        self.at_line_start = false;

        let blank = matches!(self.peek(), None | Some('\n' | '\r'));
        let Some(space) = first_space else {
            return;
        };
        if blank {
            return;
        }

        let location = self.source.location(space);
        self.report(
            Diagnostic::new(
                RuleId::TabExpected,
                "indentation contains spaces; expected tab characters",
                location,
                Span::new(start, self.current_pos),
            )
            .with_fix("indent with tabs only"),
        );
    }
}

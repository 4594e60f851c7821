// Parser core types and entrypoint.
//
// This chunk defines the [`Parser`] type and its top-level `parse_file()` loop.
//
// NOTE: This file is `include!`'d into `crate::parser`.

/// Result of one production. The error is reported by the caller, which then synchronizes.
type PResult<T> = Result<T, Diagnostic>;

/// Parser state.
///
/// ## Notes
/// - Comments are not grammar tokens. The parser walks the `significant` index list and looks at the comment tokens
///   between two significant tokens only where they carry meaning (clause categories, header comments).
/// - Productions save and restore `pos` explicitly when they need to look further ahead than one token.
pub struct Parser<'a> {
    tokens: &'a [Token],
    /// Indices into `tokens` of every non-comment token.
    significant: Vec<usize>,
    /// Cursor into `significant`.
    pos: usize,
    diagnostics: Vec<Diagnostic>,
    /// Highest token index already checked for lexer flags (unknown characters, unterminated literals).
    flags_checked: Option<usize>,
    /// Agents found in the class being parsed.
    agents: Vec<AgentExpr>,
}

/// Output of [`parse`]: the (possibly partial) tree plus syntax diagnostics.
#[derive(Debug, Clone)]
pub struct Parsed {
    pub tree: SyntaxTree,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by [`crate::lexer::lex`], ending with `Eof`.
    pub fn new(tokens: &'a [Token]) -> Self {
        let significant = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.is_comment())
            .map(|(i, _)| i)
            .collect();
        Self {
            tokens,
            significant,
            pos: 0,
            diagnostics: Vec::new(),
            flags_checked: None,
            agents: Vec::new(),
        }
    }

    /// Parse the whole token stream.
    pub fn parse(mut self) -> Parsed {
        let mut tree = SyntaxTree::default();
        if self.significant.is_empty() {
            return Parsed {
                tree,
                diagnostics: self.diagnostics,
            };
        }

        while !self.is_at_end() {
            if self.check_keyword(KeywordId::Note) {
                self.skip_note();
                continue;
            }
            if self.at_class_start() {
                tree.classes.push(self.parse_class());
                continue;
            }
            let found = self.peek().kind.describe();
            let err = self.error_here(format!("expected class declaration, found {found}"));
            self.report(err);
            self.advance();
            while !self.is_at_end() && !self.at_class_start() && !self.check_keyword(KeywordId::Note) {
                self.advance();
            }
        }

        if tree.classes.is_empty() {
            let err = self.error_here("file declares no class");
            self.report(err);
        }

        Parsed {
            tree,
            diagnostics: self.diagnostics,
        }
    }
}

/// Parse a token stream into a [`SyntaxTree`].
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: Token stream produced by [`crate::lexer::lex`].
///
/// ## Returns
/// - The recovered tree plus `syntax-error` diagnostics. Parsing never fails as a whole.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Parsed {
    let parsed = Parser::new(tokens).parse();
    tracing::debug!(
        classes = parsed.tree.classes.len(),
        errors = parsed.diagnostics.len(),
        "parsed token stream"
    );
    parsed
}

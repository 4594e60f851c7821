#![no_main]

use eiflint::LintConfig;
use eiflint::analyze_source;
use eiflint::source::SourceBuffer;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Lexer, parser and checkers must accept any text without panicking
    if let Ok(s) = std::str::from_utf8(data) {
        let source = SourceBuffer::new("fuzz.e", s);
        let _ = analyze_source(&source, &LintConfig::default());
    }
});

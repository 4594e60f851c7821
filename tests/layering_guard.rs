//! Layering guardrails for the workspace crates.
//!
//! `eiflint_core` is the vocabulary layer and must stay free of dependencies. `eiflint_syntax` may depend on it but
//! never on the root `eiflint` crate.

fn dependency_names(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }
        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn core_has_no_dependencies() {
    let names = dependency_names(include_str!("../crates/eiflint_core/Cargo.toml"));
    assert!(names.is_empty(), "eiflint_core must not depend on anything, found {names:?}");
}

#[test]
fn syntax_depends_only_downward() {
    let names = dependency_names(include_str!("../crates/eiflint_syntax/Cargo.toml"));
    assert!(names.iter().any(|n| n == "eiflint_core"));
    assert!(!names.iter().any(|n| n == "eiflint"), "eiflint_syntax must not depend on the checker crate");
}

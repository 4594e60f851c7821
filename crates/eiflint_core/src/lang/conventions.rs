//! Naming conventions and well-known identifiers.

/// Source file extension of the checked language.
pub const SOURCE_EXTENSION: &str = "e";

/// Directory names skipped when expanding directory roots.
pub const SKIPPED_DIRECTORIES: &[&str] = &["target", "EIFGENs", "node_modules"];

/// Width of a tab stop used when measuring line length, unless configured otherwise.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Maximum physical line width, unless configured otherwise.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 120;

/// Class names: `UPPER_SNAKE` (`LINKED_LIST`, `HASH_TABLE_2`).
///
/// ## Examples
/// ```rust
/// use eiflint_core::lang::conventions::is_class_name;
///
/// assert!(is_class_name("PERSON"));
/// assert!(is_class_name("LINKED_LIST_2"));
/// assert!(!is_class_name("Person"));
/// assert!(!is_class_name("BAD__NAME"));
/// ```
pub fn is_class_name(name: &str) -> bool {
    is_snake(name, |c| c.is_ascii_uppercase())
}

/// Feature, argument and local names: `lower_snake` (`item`, `put_front`, `a_name`).
///
/// ## Examples
/// ```rust
/// use eiflint_core::lang::conventions::is_feature_name;
///
/// assert!(is_feature_name("put_front"));
/// assert!(!is_feature_name("putFront"));
/// assert!(!is_feature_name("_hidden"));
/// ```
pub fn is_feature_name(name: &str) -> bool {
    is_snake(name, |c| c.is_ascii_lowercase())
}

/// Constant attributes may additionally use a leading capital: `Default_capacity`.
pub fn is_constant_name(name: &str) -> bool {
    if is_feature_name(name) {
        return true;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            let rest: String = chars.collect();
            rest.is_empty() || is_snake(&format!("x{rest}"), |c| c.is_ascii_lowercase())
        }
        _ => false,
    }
}

/// Suggest the conventional spelling of a class name.
pub fn to_class_case(name: &str) -> String {
    to_snake(name).to_ascii_uppercase()
}

/// Suggest the conventional spelling of a feature name.
pub fn to_feature_case(name: &str) -> String {
    to_snake(name).to_ascii_lowercase()
}

/// Letters of one case, digits and single underscores; starts with a letter, no trailing underscore.
fn is_snake(name: &str, letter: impl Fn(char) -> bool) -> bool {
    let mut chars = name.chars();
    if !chars.next().is_some_and(&letter) {
        return false;
    }
    if name.ends_with('_') || name.contains("__") {
        return false;
    }
    name.chars().all(|c| letter(c) || c.is_ascii_digit() || c == '_')
}

fn to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_ascii_uppercase() && prev_lower {
            out.push('_');
        }
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
        prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
    }
    out.trim_matches('_').to_string()
}

//! The `%` escape grammar used inside string and character literals.
//!
//! Two forms exist:
//! - **Named escapes**: `%` followed by one code character from the closed table [`NAMED_ESCAPES`] (`%N` is a
//!   newline, `%%` is a percent sign, ...).
//! - **Numeric escapes**: `%/code/` where `code` is a character code in one of four bases ([`NumericBase`]):
//!   decimal `65`, hexadecimal `0x41`, octal `0c101`, binary `0b1000001`.
//!
//! ## Notes
//! - Named codes are case-sensitive upper-case letters or punctuation.
//! - A numeric code must denote a Unicode scalar value.
//! - Malformed escapes resolve to [`PLACEHOLDER`] so lexing can continue.
//!
//! ## Examples
//! ```rust
//! use eiflint_core::lang::escapes::{self, NumericBase};
//!
//! assert_eq!(escapes::named('N'), Some('\n'));
//! assert_eq!(escapes::code_for('\t'), Some('T'));
//! assert_eq!(escapes::split_numeric("0x41"), (NumericBase::Hexadecimal, "41"));
//! assert_eq!(escapes::decode_numeric("0b1000001"), Ok('A'));
//! ```

/// The character that introduces an escape.
pub const ESCAPE_CHAR: char = '%';

/// The wrapper delimiting numeric escapes: `%/65/`.
pub const NUMERIC_WRAPPER: char = '/';

/// Substituted for any malformed escape.
pub const PLACEHOLDER: char = '\u{FFFD}';

/// An entry of the named escape table.
#[derive(Debug, Clone, Copy)]
pub struct NamedEscape {
    pub code: char,
    pub value: char,
    pub description: &'static str,
}

/// Closed table of named escapes.
pub const NAMED_ESCAPES: &[NamedEscape] = &[
    named_escape('A', '@', "at-sign"),
    named_escape('B', '\u{8}', "backspace"),
    named_escape('C', '^', "circumflex"),
    named_escape('D', '$', "dollar"),
    named_escape('F', '\u{c}', "form feed"),
    named_escape('H', '\\', "backslash"),
    named_escape('L', '~', "tilde"),
    named_escape('N', '\n', "newline"),
    named_escape('Q', '`', "back quote"),
    named_escape('R', '\r', "carriage return"),
    named_escape('S', '#', "sharp"),
    named_escape('T', '\t', "horizontal tab"),
    named_escape('U', '\0', "null"),
    named_escape('V', '|', "vertical bar"),
    named_escape('%', '%', "percent"),
    named_escape('\'', '\'', "single quote"),
    named_escape('"', '"', "double quote"),
    named_escape('(', '[', "opening bracket"),
    named_escape(')', ']', "closing bracket"),
    named_escape('<', '{', "opening brace"),
    named_escape('>', '}', "closing brace"),
];

/// Base of a numeric character code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericBase {
    Decimal,
    Hexadecimal,
    Octal,
    Binary,
}

impl NumericBase {
    /// All bases, in lookup order.
    pub const ALL: [NumericBase; 4] = [
        NumericBase::Hexadecimal,
        NumericBase::Octal,
        NumericBase::Binary,
        NumericBase::Decimal,
    ];

    /// Canonical (lower-case) prefix written before the digits. Empty for decimal.
    pub fn prefix(self) -> &'static str {
        match self {
            NumericBase::Decimal => "",
            NumericBase::Hexadecimal => "0x",
            NumericBase::Octal => "0c",
            NumericBase::Binary => "0b",
        }
    }

    pub fn radix(self) -> u32 {
        match self {
            NumericBase::Decimal => 10,
            NumericBase::Hexadecimal => 16,
            NumericBase::Octal => 8,
            NumericBase::Binary => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NumericBase::Decimal => "decimal",
            NumericBase::Hexadecimal => "hexadecimal",
            NumericBase::Octal => "octal",
            NumericBase::Binary => "binary",
        }
    }
}

/// Why a numeric code failed to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumericEscapeError {
    /// `%//`: nothing between the wrappers (or only a base prefix).
    Empty,
    /// A character that is not a digit of the base.
    NonDigit { base: NumericBase, found: char },
    /// The code is not a Unicode scalar value.
    OutOfRange { code: String },
}

/// Resolve a named escape code.
pub fn named(code: char) -> Option<char> {
    NAMED_ESCAPES.iter().find(|e| e.code == code).map(|e| e.value)
}

/// The named code that renders `value`, if the table has one.
pub fn code_for(value: char) -> Option<char> {
    NAMED_ESCAPES.iter().find(|e| e.value == value).map(|e| e.code)
}

/// Split a numeric code into its base and digit string. Prefix matching is case-insensitive.
pub fn split_numeric(code: &str) -> (NumericBase, &str) {
    for base in NumericBase::ALL {
        let prefix = base.prefix();
        if prefix.is_empty() {
            continue;
        }
        if code.get(..prefix.len()).is_some_and(|head| head.eq_ignore_ascii_case(prefix)) {
            return (base, &code[prefix.len()..]);
        }
    }
    (NumericBase::Decimal, code)
}

/// Decode the text between the numeric wrappers into a character.
pub fn decode_numeric(code: &str) -> Result<char, NumericEscapeError> {
    let (base, digits) = split_numeric(code);
    if digits.is_empty() {
        return Err(NumericEscapeError::Empty);
    }
    if let Some(found) = digits.chars().find(|c| !c.is_digit(base.radix())) {
        return Err(NumericEscapeError::NonDigit { base, found });
    }
    u32::from_str_radix(digits, base.radix())
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| NumericEscapeError::OutOfRange { code: code.to_string() })
}

const fn named_escape(code: char, value: char, description: &'static str) -> NamedEscape {
    NamedEscape {
        code,
        value,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_bases_decode_same_letter() {
        for code in ["65", "0x41", "0X41", "0c101", "0b1000001"] {
            assert_eq!(decode_numeric(code), Ok('A'), "{code}");
        }
    }

    #[test]
    fn non_digit_reports_base() {
        assert_eq!(
            decode_numeric("0b102"),
            Err(NumericEscapeError::NonDigit {
                base: NumericBase::Binary,
                found: '2'
            })
        );
        assert_eq!(
            decode_numeric("6x"),
            Err(NumericEscapeError::NonDigit {
                base: NumericBase::Decimal,
                found: 'x'
            })
        );
    }

    #[test]
    fn empty_and_out_of_range() {
        assert_eq!(decode_numeric(""), Err(NumericEscapeError::Empty));
        assert_eq!(decode_numeric("0x"), Err(NumericEscapeError::Empty));
        assert!(matches!(decode_numeric("0xD800"), Err(NumericEscapeError::OutOfRange { .. })));
        assert!(matches!(decode_numeric("99999999999"), Err(NumericEscapeError::OutOfRange { .. })));
    }

    #[test]
    fn named_codes_are_unique() {
        for (i, a) in NAMED_ESCAPES.iter().enumerate() {
            for b in &NAMED_ESCAPES[i + 1..] {
                assert_ne!(a.code, b.code);
                assert_ne!(a.value, b.value);
            }
        }
    }
}

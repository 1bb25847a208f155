//! Literal spelling.

use tern_lexer::{escape_char, escape_string};

/// Shortest spelling that reads back as the same value, always with a
/// decimal point or exponent so it stays a `Double`.
pub(super) fn double(bits: u64) -> String {
    let value = f64::from_bits(bits);
    let text = format!("{value:?}");
    match text.find('e') {
        Some(exp) if !text[..exp].contains('.') => {
            format!("{}.0{}", &text[..exp], &text[exp..])
        }
        _ => text,
    }
}

pub(super) fn string(value: &str) -> String {
    format!("\"{}\"", escape_string(value))
}

pub(super) fn char(value: char) -> String {
    format!("'{}'", escape_char(value))
}

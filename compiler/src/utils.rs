use crate::error::ConstGenError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref UNIT_NAME:       Regex = Regex::new(r"[A-Za-z_$][A-Za-z_$0-9]*").unwrap();
    static ref WHOLE_UNIT_NAME: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z_$0-9]*$").unwrap();
}

/// Renders `text` as a double-quoted, escaped string literal.
pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

/// Returns the leftmost run of `input` that is a legal identifier.
///
/// Leading characters that cannot start an identifier are skipped, so
/// `"123_x123"` gives `"_x123"`. Fails when no such run exists.
pub fn sanitize(input: &str) -> Result<String, ConstGenError> {
    UNIT_NAME
        .find(input)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ConstGenError::InvalidIdentifier(input.to_string()))
}

/// True when [`sanitize`] would change `input` (or reject it outright).
pub fn contains_prohibited_characters(input: &str) -> bool {
    match UNIT_NAME.find(input) {
        Some(m) => m.as_str() != input,
        None    => true,
    }
}

pub fn is_identifier(input: &str) -> bool {
    WHOLE_UNIT_NAME.is_match(input)
}

/// Prefixes every non-empty line of `text` with `unit`.
pub fn indent(text: &str, unit: &str) -> String {
    text.split('\n')
        .map(|line| if line.is_empty() { String::new() } else { format!("{}{}", unit, line) })
        .collect::<Vec<_>>()
        .join("\n")
}

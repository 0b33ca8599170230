//! Literal parsing for behavioural step text.
//!
//! Steps quote their values, for example `Given a frame binding "title" to
//! "Heat"`. Values that parse as JSON (`1995`, `null`, `["bafta"]`) are kept
//! as such; anything else is treated as a plain string.

use serde_json::Value;

/// Strips one layer of matching single or double quotes from a value.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    if let Some(stripped) = trimmed.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        return stripped;
    }
    if let Some(stripped) = trimmed
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
    {
        return stripped;
    }
    trimmed
}

/// Interprets step text as a JSON value, falling back to a string.
#[must_use]
pub fn parse_literal(text: &str) -> Value {
    let body = unquote(text);
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_owned()))
}

/// Splits a comma-separated list of names, trimming blanks.
#[must_use]
pub fn split_names(text: &str) -> Vec<String> {
    unquote(text)
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

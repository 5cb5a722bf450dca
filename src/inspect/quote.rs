//! String and key-label quoting.
//!
//! The quoting character is always `'`. The rule: JSON-escape the string,
//! strip the enclosing double quotes, escape literal single quotes, then
//! un-escape the `\"` sequences the JSON encoding introduced. Control and
//! unicode escapes survive from the JSON step.

/// Single-quote a string for rendering.
pub(crate) fn quote_string(s: &str) -> String {
    let json = match serde_json::to_string(s) {
        Ok(json) => json,
        Err(_) => return format!("'{}'", s),
    };
    let inner = json
        .strip_prefix('"')
        .and_then(|j| j.strip_suffix('"'))
        .unwrap_or(&json);
    let escaped = inner.replace('\'', "\\'").replace("\\\"", "\"");
    format!("'{}'", escaped)
}

/// Render a key label: bare for unsigned-integer strings and safe
/// identifiers, single-quoted otherwise.
pub(crate) fn key_label(key: &str) -> String {
    if is_index_key(key) || is_safe_key(key) {
        key.to_string()
    } else {
        quote_string(key)
    }
}

/// An unsigned-integer string, i.e. an array index.
pub(crate) fn is_index_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

fn is_safe_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

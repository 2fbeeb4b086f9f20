//! Structured value formatting for the fallback summary document.
//!
//! Where the template-fill path formats one scalar per field, the
//! fallback path must render whatever shape the data holds: nested
//! objects, repeating sections, lists. [`format_structured`] is a pure
//! recursive visitor over the JSON value shapes, idempotent on its own
//! output (re-formatting a formatted date yields the same string).

use serde_json::Value;

use crate::format::format_date;

/// Recursively format a value for display in the summary document.
///
/// - null → ""
/// - booleans → checkbox glyphs (`[X] Yes` / `[ ] No`)
/// - date-shaped strings → normalized `MM/DD/YYYY`; other strings unchanged
/// - scalar arrays → comma-joined elements
/// - object arrays → numbered lines, each entry's fields joined by `" | "`
/// - objects → newline-joined `Label: value` pairs
///
/// Null and empty-string members are omitted from object renderings.
pub fn format_structured(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "[X] Yes".to_string(),
        Value::Bool(false) => "[ ] No".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if looks_like_date(s) {
                format_date(s)
            } else {
                s.clone()
            }
        }
        Value::Array(items) => {
            if !items.is_empty() && items.iter().all(Value::is_object) {
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| format!("{}. {}", i + 1, format_entry(item)))
                    .collect::<Vec<_>>()
                    .join("\n")
            } else {
                items
                    .iter()
                    .map(format_structured)
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, v)| {
                let formatted = format_structured(v);
                if formatted.is_empty() {
                    None
                } else {
                    Some(format!("{}: {}", derive_label(key), formatted))
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Render one entry of a repeating section as a single line.
fn format_entry(item: &Value) -> String {
    match item.as_object() {
        Some(map) => map
            .iter()
            .filter_map(|(key, v)| {
                let formatted = format_structured(v);
                if formatted.is_empty() {
                    None
                } else {
                    Some(format!("{}: {}", derive_label(key), formatted))
                }
            })
            .collect::<Vec<_>>()
            .join(" | "),
        None => format_structured(item),
    }
}

/// Derive a Title Case display label from a snake_case or camelCase key.
pub fn derive_label(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for ch in key.chars() {
        if ch == '_' || ch == '-' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else if ch.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
            current.push(ch);
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn looks_like_date(s: &str) -> bool {
    let t = s.trim();
    is_iso_prefixed(t) || is_mdy(t)
}

fn is_iso_prefixed(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 10
        && b[0..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[5..7].iter().all(u8::is_ascii_digit)
        && b[7] == b'-'
        && b[8..10].iter().all(u8::is_ascii_digit)
}

fn is_mdy(s: &str) -> bool {
    let parts: Vec<&str> = s.split('/').collect();
    parts.len() == 3
        && parts[0].len() <= 2
        && parts[1].len() <= 2
        && parts[2].len() == 4
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
}

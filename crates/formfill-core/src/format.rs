//! Display formatters for mapped field values.
//!
//! All formatters are total functions: malformed input is returned
//! unchanged (or as the empty string for null), never as an error. This
//! is what lets per-field data problems degrade to a skip instead of
//! aborting a render.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::types::{FieldMapping, FieldType};

static MDY_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap());
static ISO_DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})").unwrap());

/// Date formats tried, in order, for inputs that are neither `MM/DD/YYYY`
/// nor ISO-prefixed.
const EXTRA_DATE_FORMATS: &[&str] = &[
    "%m-%d-%Y",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
];

/// Normalize a date string to `MM/DD/YYYY`.
///
/// `MM/DD/YYYY` input passes through unchanged, which makes this
/// idempotent. ISO `YYYY-MM-DD` prefixes (with or without a trailing
/// time component) are reordered without a calendar round-trip.
/// Anything unparseable is returned unchanged.
pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if MDY_DATE.is_match(trimmed) {
        return trimmed.to_string();
    }
    if let Some(caps) = ISO_DATE_PREFIX.captures(trimmed) {
        return format!("{}/{}/{}", &caps[2], &caps[3], &caps[1]);
    }
    for fmt in EXTRA_DATE_FORMATS {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, fmt) {
            return date.format("%m/%d/%Y").to_string();
        }
    }
    raw.to_string()
}

/// Format a Social Security number as `XXX-XX-XXXX`.
///
/// Anything that does not reduce to exactly nine digits is returned
/// unchanged.
pub fn format_ssn(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 9 {
        format!("{}-{}-{}", &digits[0..3], &digits[3..5], &digits[5..9])
    } else {
        raw.to_string()
    }
}

/// Format a US phone number as `(XXX) XXX-XXXX`.
///
/// Accepts ten digits, or eleven with a leading country code `1`.
/// Anything else is returned unchanged.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = match digits.len() {
        10 => digits,
        11 if digits.starts_with('1') => digits[1..].to_string(),
        _ => return raw.to_string(),
    };
    format!("({}) {}-{}", &digits[0..3], &digits[3..6], &digits[6..10])
}

/// Format an alien registration number as `A-` plus nine zero-padded digits.
///
/// Empty input (after stripping non-digits) yields the empty string.
pub fn format_alien_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        String::new()
    } else {
        format!("A-{digits:0>9}")
    }
}

/// Format a numeric amount as US currency (`$1,234.56`).
///
/// Currency symbols and grouping commas in the input are stripped before
/// parsing. Non-numeric input is returned unchanged.
pub fn format_currency(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let Ok(amount) = cleaned.parse::<f64>() else {
        return raw.to_string();
    };
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let mut grouped = String::new();
    let whole_str = whole.to_string();
    for (i, ch) in whole_str.chars().enumerate() {
        if i > 0 && (whole_str.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${grouped}.{frac:02}")
    } else {
        format!("${grouped}.{frac:02}")
    }
}

/// Format a ZIP code: five digits unchanged, nine digits as `XXXXX-XXXX`.
///
/// Anything else is returned unchanged.
pub fn format_zip_code(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 9 {
        format!("{}-{}", &digits[0..5], &digits[5..9])
    } else {
        raw.to_string()
    }
}

/// Map a boolean-ish string to `Yes` / `No`; unrecognized input yields "".
pub fn format_yes_no_str(raw: &str) -> String {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "true" | "1" | "y" => "Yes".to_string(),
        "no" | "false" | "0" | "n" => "No".to_string(),
        _ => String::new(),
    }
}

/// Coerce a scalar JSON value to its raw string form.
///
/// Null yields the empty string; non-scalar values fall back to their
/// compact JSON rendering (the structured formatter in `display` handles
/// those properly on the fallback path).
pub fn raw_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Format a resolved value per its field type's default formatting.
pub fn format_value(value: &Value, field_type: FieldType) -> String {
    if value.is_null() {
        return String::new();
    }
    match field_type {
        FieldType::Date => format_date(&raw_string(value)),
        FieldType::Ssn => format_ssn(&raw_string(value)),
        FieldType::Phone => format_phone(&raw_string(value)),
        FieldType::AlienNumber => format_alien_number(&raw_string(value)),
        FieldType::ZipCode => format_zip_code(&raw_string(value)),
        FieldType::Currency => format_currency(&raw_string(value)),
        FieldType::YesNo => match value {
            Value::Bool(true) => "Yes".to_string(),
            Value::Bool(false) => "No".to_string(),
            _ => format_yes_no_str(&raw_string(value)),
        },
        // Names and other free text are uppercased by domain convention;
        // mappings that must preserve case attach a custom formatter.
        FieldType::Text => raw_string(value).to_uppercase(),
        FieldType::Checkbox | FieldType::Radio | FieldType::Dropdown => raw_string(value),
    }
}

/// Apply one mapping entry's formatting to a resolved value.
///
/// Priority: custom formatter, then `check_value` fan-out (`"1"` when the
/// raw value matches case-insensitively, "" otherwise), then the field
/// type's default formatting.
pub fn apply_mapping(mapping: &FieldMapping, value: &Value) -> String {
    if let Some(custom) = mapping.custom {
        return custom(value);
    }
    if let Some(check) = &mapping.check_value {
        let raw = raw_string(value);
        return if raw.eq_ignore_ascii_case(check) {
            "1".to_string()
        } else {
            String::new()
        };
    }
    format_value(value, mapping.field_type)
}

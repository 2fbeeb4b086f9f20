//! Builds the flat field-data map sent to the fill backend.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::format::apply_mapping;
use crate::path::resolve;
use crate::types::FieldMapping;

/// Output of [`build_field_data`]: the flat map of target field name to
/// formatted display string, plus the fields skipped for missing or
/// empty data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldData {
    /// Formatted values keyed by template field name, in stable order.
    pub values: BTreeMap<String, String>,
    /// Target field names omitted from `values`.
    pub skipped: Vec<String>,
}

impl FieldData {
    /// Number of fields that will actually be written.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no field resolved to a writable value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Resolve and format every mapping entry against the data object.
///
/// A field is skipped (recorded in [`FieldData::skipped`], omitted from
/// the map) when its path does not resolve, resolves to null or the empty
/// string, or formats to the empty string. The last rule is what lets
/// checkbox fan-out fields with a non-matching `check_value` fall through
/// silently instead of writing a blank.
pub fn build_field_data(mappings: &[FieldMapping], data: &Value) -> FieldData {
    let mut out = FieldData::default();
    for mapping in mappings {
        let resolved = resolve(data, &mapping.data_path);
        let value = match resolved {
            None | Some(Value::Null) => {
                out.skipped.push(mapping.target_field_name.clone());
                continue;
            }
            Some(v) => v,
        };
        if value.as_str().is_some_and(str::is_empty) {
            out.skipped.push(mapping.target_field_name.clone());
            continue;
        }
        let formatted = apply_mapping(mapping, value);
        if formatted.is_empty() {
            out.skipped.push(mapping.target_field_name.clone());
            continue;
        }
        out.values
            .insert(mapping.target_field_name.clone(), formatted);
    }
    out
}

//! Field mapping and fill result types.
//!
//! Provides [`FieldType`] and [`FieldMapping`] for driving the
//! template-fill path, [`LayoutFieldMapping`] for the fallback summary
//! document, and [`FillStats`] / [`FillResult`] for reporting the outcome
//! of a render request.

use serde_json::Value;

/// Semantic type of a mapped form field.
///
/// Determines the default display formatting applied to the resolved
/// value; a [`FieldMapping::custom`] formatter always overrides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Free text — uppercased by convention for name-like fields.
    Text,
    /// Checkbox — pass-through, or `check_value` fan-out.
    Checkbox,
    /// Radio button group — same semantics as checkbox.
    Radio,
    /// Dropdown selection — pass-through.
    Dropdown,
    /// Calendar date, normalized to `MM/DD/YYYY`.
    Date,
    /// Social Security number, `XXX-XX-XXXX`.
    Ssn,
    /// US phone number, `(XXX) XXX-XXXX`.
    Phone,
    /// Alien registration number, `A-` plus nine digits.
    AlienNumber,
    /// ZIP code, 5 or 9 digits.
    ZipCode,
    /// Currency amount, `$#,##0.00`.
    Currency,
    /// Boolean-ish value rendered as `Yes` / `No`.
    YesNo,
}

impl FieldType {
    /// Returns the snake_case tag for this field type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
            FieldType::Dropdown => "dropdown",
            FieldType::Date => "date",
            FieldType::Ssn => "ssn",
            FieldType::Phone => "phone",
            FieldType::AlienNumber => "alien_number",
            FieldType::ZipCode => "zip_code",
            FieldType::Currency => "currency",
            FieldType::YesNo => "yes_no",
        }
    }

    /// Parse a field type from its snake_case tag.
    ///
    /// Returns `None` if the string is not a recognized field type.
    pub fn from_str_tag(tag: &str) -> Option<Self> {
        match tag {
            "text" => Some(Self::Text),
            "checkbox" => Some(Self::Checkbox),
            "radio" => Some(Self::Radio),
            "dropdown" => Some(Self::Dropdown),
            "date" => Some(Self::Date),
            "ssn" => Some(Self::Ssn),
            "phone" => Some(Self::Phone),
            "alien_number" => Some(Self::AlienNumber),
            "zip_code" => Some(Self::ZipCode),
            "currency" => Some(Self::Currency),
            "yes_no" => Some(Self::YesNo),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An application record as submitted: arbitrary JSON addressed by
/// dot-paths.
pub type ApplicationData = Value;

/// A custom display formatter attached to a mapping entry.
///
/// Custom formatters are responsible for returning an already-displayable
/// string, including preserving case for values such as email addresses.
pub type CustomFormatter = fn(&Value) -> String;

/// Maps one data path to one named field of a fillable template.
///
/// Supplied by per-form-type configuration and treated as immutable.
/// `target_field_name` must be unique within one form type's mapping set;
/// a duplicate is a configuration defect, not a runtime error.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    /// Name of the template field to fill (e.g. `form1.Pt1Line1a_FamilyName`).
    pub target_field_name: String,
    /// Dot-notation path into the application data (e.g. `applicant.lastName`).
    pub data_path: String,
    /// Semantic type driving default formatting.
    pub field_type: FieldType,
    /// For checkbox/radio fan-out: the raw value that marks this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_value: Option<String>,
    /// Overrides type-based formatting when present. Not serializable;
    /// attached in code after loading the mapping set.
    #[serde(skip)]
    pub custom: Option<CustomFormatter>,
}

impl FieldMapping {
    /// Create a plain mapping with no check value or custom formatter.
    pub fn new(
        target_field_name: impl Into<String>,
        data_path: impl Into<String>,
        field_type: FieldType,
    ) -> Self {
        Self {
            target_field_name: target_field_name.into(),
            data_path: data_path.into(),
            field_type,
            check_value: None,
            custom: None,
        }
    }

    /// Set the check value, returning the modified mapping (builder pattern).
    pub fn with_check_value(mut self, check_value: impl Into<String>) -> Self {
        self.check_value = Some(check_value.into());
        self
    }

    /// Set a custom formatter, returning the modified mapping.
    pub fn with_custom(mut self, custom: CustomFormatter) -> Self {
        self.custom = Some(custom);
        self
    }
}

/// Maps one data path to a display label for the fallback summary document.
///
/// A display-oriented sibling of [`FieldMapping`], independent of any
/// template field names.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutFieldMapping {
    /// Dot-notation path into the application data.
    pub data_path: String,
    /// Human-readable label drawn before the value.
    pub label: String,
    /// Optional section heading; drawn when it changes between fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl LayoutFieldMapping {
    /// Create a mapping with no section heading.
    pub fn new(data_path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            data_path: data_path.into(),
            label: label.into(),
            section: None,
        }
    }

    /// Set the section heading, returning the modified mapping.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }
}

/// Counts of filled vs. total vs. skipped fields for one render attempt.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillStats {
    /// Number of fields actually written.
    pub filled_count: usize,
    /// Number of fields the mapping set defines.
    pub total_count: usize,
    /// Target field names skipped for missing or empty data.
    pub skipped_field_names: Vec<String>,
    /// Per-field error messages reported by the fill backend.
    pub errors: Vec<String>,
}

/// Outcome of one render request.
///
/// Constructed once per request and returned to the caller; never mutated
/// afterward. Expected failure modes arrive here as `succeeded == false`
/// rather than as errors.
#[derive(Debug, Clone, PartialEq)]
pub struct FillResult {
    /// Whether a usable document was produced.
    pub succeeded: bool,
    /// The finished PDF, when `succeeded`.
    pub document_bytes: Option<Vec<u8>>,
    /// Suggested output filename (`{form_type}_{short_id}_{millis}.pdf`).
    pub file_name: Option<String>,
    /// True when the official template was filled; false for the
    /// fallback summary document.
    pub used_template: bool,
    /// Fill statistics, when a fill was attempted or completed.
    pub stats: Option<FillStats>,
    /// Human-readable description of the failure, when `!succeeded`.
    pub error_message: Option<String>,
}

impl FillResult {
    /// A successful template fill. Carries no file name; the caller
    /// derives one once the whole render is decided.
    pub fn template_success(document_bytes: Vec<u8>, stats: FillStats) -> Self {
        Self {
            succeeded: true,
            document_bytes: Some(document_bytes),
            file_name: None,
            used_template: true,
            stats: Some(stats),
            error_message: None,
        }
    }

    /// A successful fallback render.
    pub fn fallback(document_bytes: Vec<u8>, file_name: String, stats: Option<FillStats>) -> Self {
        Self {
            succeeded: true,
            document_bytes: Some(document_bytes),
            file_name: Some(file_name),
            used_template: false,
            stats,
            error_message: None,
        }
    }

    /// A failed render with no usable document.
    pub fn failure(error_message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            document_bytes: None,
            file_name: None,
            used_template: false,
            stats: None,
            error_message: Some(error_message.into()),
        }
    }

    /// A failed render that still carries the stats of the attempt.
    pub fn failure_with_stats(error_message: impl Into<String>, stats: FillStats) -> Self {
        Self {
            stats: Some(stats),
            ..Self::failure(error_message)
        }
    }
}

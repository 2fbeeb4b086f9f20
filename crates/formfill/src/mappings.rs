//! Per-form-type mapping configuration.
//!
//! Mapping sets are data, not logic: ordered lists of [`FieldMapping`]
//! and [`LayoutFieldMapping`] loaded once from JSON and treated as
//! immutable for the life of the registry. Custom formatter functions
//! cannot ride in JSON; they are attached in code after loading.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use formfill_core::{CustomFormatter, FieldMapping, FillError, LayoutFieldMapping};

/// The mapping configuration for one form type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingSet {
    /// Form type identifier (e.g. `I-130`).
    pub form_type: String,
    /// Document title for the fallback summary; defaults to
    /// `Form {form_type} Summary`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Subtitle line under the fallback title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Template field mappings driving the fill path.
    #[serde(default)]
    pub fields: Vec<FieldMapping>,
    /// Display mappings driving the fallback summary.
    #[serde(default)]
    pub layout: Vec<LayoutFieldMapping>,
}

impl MappingSet {
    /// A set with no mappings, usable for fallback-only rendering.
    pub fn empty(form_type: impl Into<String>) -> Self {
        Self {
            form_type: form_type.into(),
            title: None,
            subtitle: None,
            fields: Vec::new(),
            layout: Vec::new(),
        }
    }

    /// Title for the fallback summary document.
    pub fn document_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("Form {} Summary", self.form_type))
    }

    /// Subtitle for the fallback summary document.
    pub fn document_subtitle(&self) -> String {
        self.subtitle
            .clone()
            .unwrap_or_else(|| "Draft generated from submitted application data".to_string())
    }

    /// Whether the template-fill path can be attempted at all.
    pub fn supports_template_fill(&self) -> bool {
        !self.fields.is_empty()
    }
}

/// All known mapping sets, keyed by form type.
#[derive(Debug, Clone, Default)]
pub struct MappingRegistry {
    sets: BTreeMap<String, MappingSet>,
}

impl MappingRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one mapping set, replacing any set with the same form type.
    pub fn insert(&mut self, set: MappingSet) {
        self.sets.insert(set.form_type.clone(), set);
    }

    /// Look up the mapping set for a form type.
    pub fn get(&self, form_type: &str) -> Option<&MappingSet> {
        self.sets.get(form_type)
    }

    /// Number of registered form types.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// True when no form types are registered.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Registered form types, sorted.
    pub fn form_types(&self) -> Vec<&str> {
        self.sets.keys().map(String::as_str).collect()
    }

    /// Parse a registry from a JSON array of mapping sets.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, FillError> {
        let sets: Vec<MappingSet> = serde_json::from_slice(bytes)
            .map_err(|e| FillError::Config(format!("invalid mapping JSON: {e}")))?;
        let mut registry = Self::new();
        for set in sets {
            registry.insert(set);
        }
        Ok(registry)
    }

    /// Load every `*.json` file in a directory, each holding either one
    /// mapping set or an array of them.
    pub fn from_dir(dir: &Path) -> Result<Self, FillError> {
        let mut registry = Self::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let bytes = std::fs::read(&path)?;
            let parsed: serde_json::Value = serde_json::from_slice(&bytes)
                .map_err(|e| FillError::Config(format!("{}: {e}", path.display())))?;
            match parsed {
                serde_json::Value::Array(_) => {
                    let sets: Vec<MappingSet> = serde_json::from_slice(&bytes)
                        .map_err(|e| FillError::Config(format!("{}: {e}", path.display())))?;
                    for set in sets {
                        registry.insert(set);
                    }
                }
                _ => {
                    let set: MappingSet = serde_json::from_slice(&bytes)
                        .map_err(|e| FillError::Config(format!("{}: {e}", path.display())))?;
                    registry.insert(set);
                }
            }
        }
        Ok(registry)
    }

    /// Attach a custom formatter to one field mapping after loading.
    ///
    /// Returns false when the form type or target field is unknown.
    pub fn attach_custom(
        &mut self,
        form_type: &str,
        target_field_name: &str,
        custom: CustomFormatter,
    ) -> bool {
        let Some(set) = self.sets.get_mut(form_type) else {
            return false;
        };
        for mapping in &mut set.fields {
            if mapping.target_field_name == target_field_name {
                mapping.custom = Some(custom);
                return true;
            }
        }
        false
    }
}

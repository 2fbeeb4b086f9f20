//! The template fill client: transport abstraction and result mapping.
//!
//! The external fill backend may be a remote HTTP service or a local
//! subprocess; both sit behind [`FillTransport`] so the orchestrator
//! never sees transport details. [`run_fill`] applies the contract rules
//! that turn a raw transport outcome into a [`FillResult`]: unreachable
//! backends, rejected requests, and empty documents become failure
//! results; a missing or malformed statistics side-channel degrades to
//! best-effort counts instead of failing the call.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use formfill_core::{FieldData, FillResult, FillStats};

/// Request sent to the fill backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillRequest {
    /// Form type identifier (e.g. `I-130`).
    pub form_type: String,
    /// Flat map of template field name to formatted display string.
    pub field_data: BTreeMap<String, String>,
}

/// The out-of-band fill-statistics payload reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireStats {
    /// Fields the backend actually wrote.
    pub filled: usize,
    /// Fields the request asked it to write.
    pub total: usize,
    /// Per-field error messages.
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Raw response from a fill transport.
#[derive(Debug, Clone, PartialEq)]
pub struct FillResponse {
    /// The filled document bytes (possibly empty; the caller decides
    /// whether that is usable).
    pub document: Vec<u8>,
    /// Parsed statistics side-channel; `None` when absent or malformed.
    pub stats: Option<WireStats>,
}

/// Transport-level failures of a fill call.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The backend could not be reached or is misconfigured.
    #[error("fill backend unreachable: {0}")]
    Unreachable(String),

    /// The backend answered with a non-success status.
    #[error("fill backend rejected the request (status {status}): {body}")]
    Rejected {
        /// HTTP status or process exit code.
        status: u16,
        /// Excerpt of the response body or stderr.
        body: String,
    },

    /// The call exceeded its deadline.
    #[error("fill backend call timed out after {0}s")]
    Timeout(u64),

    /// I/O error exchanging data with the backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A fill backend deployment: remote service or local process.
pub trait FillTransport {
    /// Fill the named template with the given field data.
    ///
    /// Implementations must bound the call with a timeout; a timeout is
    /// reported as [`TransportError::Timeout`] and treated by callers
    /// like any other backend failure.
    fn fill(&self, request: &FillRequest) -> Result<FillResponse, TransportError>;
}

/// Existence oracle for fillable template artifacts.
pub trait TemplateStore {
    /// Whether a template artifact exists for the form type.
    ///
    /// Best-effort: implementations treat lookup failures as "absent"
    /// rather than erroring.
    fn has_template(&self, form_type: &str) -> bool;
}

/// Truncate a response body for inclusion in an error message.
pub(crate) fn body_excerpt(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    }
}

/// Execute a fill call and map the outcome into a [`FillResult`].
///
/// The returned result's `file_name` is `None`; the orchestrator derives
/// one. The builder's skipped field names are folded into the stats of
/// every outcome.
pub fn run_fill(
    transport: &dyn FillTransport,
    form_type: &str,
    field_data: &FieldData,
) -> FillResult {
    let request = FillRequest {
        form_type: form_type.to_string(),
        field_data: field_data.values.clone(),
    };

    let response = match transport.fill(&request) {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(form_type, error = %err, "template fill call failed");
            return FillResult::failure_with_stats(
                err.to_string(),
                FillStats {
                    filled_count: 0,
                    total_count: field_data.len(),
                    skipped_field_names: field_data.skipped.clone(),
                    errors: vec![err.to_string()],
                },
            );
        }
    };

    // A "successful" call with no bytes is unusable output.
    if response.document.is_empty() {
        return FillResult::failure_with_stats(
            "fill backend returned an empty document",
            FillStats {
                filled_count: 0,
                total_count: field_data.len(),
                skipped_field_names: field_data.skipped.clone(),
                errors: Vec::new(),
            },
        );
    }

    let stats = match response.stats {
        Some(wire) => FillStats {
            filled_count: wire.filled,
            total_count: wire.total,
            skipped_field_names: field_data.skipped.clone(),
            errors: wire.errors,
        },
        // Side-channel absent or malformed: degrade to counting the
        // fields we sent rather than failing a call that produced bytes.
        None => FillStats {
            filled_count: field_data.len(),
            total_count: field_data.len(),
            skipped_field_names: field_data.skipped.clone(),
            errors: Vec::new(),
        },
    };

    FillResult::template_success(response.document, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formfill_core::{FieldMapping, FieldType, build_field_data};
    use serde_json::json;

    struct FixedTransport(Result<FillResponse, &'static str>);

    impl FillTransport for FixedTransport {
        fn fill(&self, _request: &FillRequest) -> Result<FillResponse, TransportError> {
            match &self.0 {
                Ok(response) => Ok(response.clone()),
                Err(msg) => Err(TransportError::Unreachable(msg.to_string())),
            }
        }
    }

    fn sample_field_data() -> FieldData {
        let mappings = [
            FieldMapping::new("LastName", "lastName", FieldType::Text),
            FieldMapping::new("Missing", "nope", FieldType::Text),
        ];
        build_field_data(&mappings, &json!({"lastName": "Doe"}))
    }

    #[test]
    fn unreachable_backend_is_failure_with_zero_filled() {
        let transport = FixedTransport(Err("connection refused"));
        let result = run_fill(&transport, "I-130", &sample_field_data());
        assert!(!result.succeeded);
        let stats = result.stats.unwrap();
        assert_eq!(stats.filled_count, 0);
        assert_eq!(stats.total_count, 1);
        assert_eq!(stats.skipped_field_names, vec!["Missing"]);
        assert!(result.error_message.unwrap().contains("connection refused"));
    }

    #[test]
    fn empty_document_is_failure() {
        let transport = FixedTransport(Ok(FillResponse {
            document: Vec::new(),
            stats: Some(WireStats {
                filled: 1,
                total: 1,
                errors: vec![],
            }),
        }));
        let result = run_fill(&transport, "I-130", &sample_field_data());
        assert!(!result.succeeded);
        assert!(result.error_message.unwrap().contains("empty document"));
    }

    #[test]
    fn success_with_stats_side_channel() {
        let transport = FixedTransport(Ok(FillResponse {
            document: vec![1, 2, 3],
            stats: Some(WireStats {
                filled: 1,
                total: 1,
                errors: vec!["form1.Odd: invalid".to_string()],
            }),
        }));
        let result = run_fill(&transport, "I-130", &sample_field_data());
        assert!(result.succeeded);
        assert!(result.used_template);
        assert!(result.file_name.is_none());
        let stats = result.stats.unwrap();
        assert_eq!(stats.filled_count, 1);
        assert_eq!(stats.errors.len(), 1);
        assert_eq!(stats.skipped_field_names, vec!["Missing"]);
    }

    #[test]
    fn missing_stats_degrades_to_sent_counts() {
        let transport = FixedTransport(Ok(FillResponse {
            document: vec![1, 2, 3],
            stats: None,
        }));
        let field_data = sample_field_data();
        let result = run_fill(&transport, "I-130", &field_data);
        assert!(result.succeeded);
        let stats = result.stats.unwrap();
        assert_eq!(stats.filled_count, field_data.len());
        assert_eq!(stats.total_count, field_data.len());
    }

    #[test]
    fn wire_stats_deserialize_without_errors_field() {
        let wire: WireStats = serde_json::from_str(r#"{"filled": 3, "total": 5}"#).unwrap();
        assert_eq!(wire.filled, 3);
        assert!(wire.errors.is_empty());
    }

    #[test]
    fn body_excerpt_truncates_long_bodies() {
        let long = "x".repeat(500);
        let excerpt = body_excerpt(&long);
        assert!(excerpt.len() < 500);
        assert!(excerpt.ends_with("..."));
        assert_eq!(body_excerpt("short"), "short");
    }

    #[test]
    fn transport_error_display() {
        let err = TransportError::Rejected {
            status: 422,
            body: "Unknown form type".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "fill backend rejected the request (status 422): Unknown form type"
        );
        assert_eq!(
            TransportError::Timeout(30).to_string(),
            "fill backend call timed out after 30s"
        );
    }
}

//! The fill orchestrator.
//!
//! One render call walks a fixed sequence: merge the input data, attempt
//! the official template when a mapping set and a confirmed template
//! exist, and otherwise produce the fallback summary document. The
//! fallback is the normal path for most failure modes; only layout
//! assembly failure surfaces as a failed [`FillResult`].

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;
use tracing::{debug, warn};

use formfill_core::{FillResult, build_field_data, deep_merge};
use formfill_render::LayoutEngine;

use crate::client::{FillTransport, TemplateStore, run_fill};
use crate::mappings::{MappingRegistry, MappingSet};

/// Longest id prefix carried into the output filename.
const SHORT_ID_LEN: usize = 8;

/// Renders one form submission into a PDF document.
pub struct Renderer {
    registry: MappingRegistry,
    store: Option<Box<dyn TemplateStore>>,
    transport: Option<Box<dyn FillTransport>>,
    layout: LayoutEngine,
}

impl Renderer {
    /// A renderer with no fill backend; every call takes the fallback path.
    pub fn new(registry: MappingRegistry) -> Self {
        Self {
            registry,
            store: None,
            transport: None,
            layout: LayoutEngine::new(),
        }
    }

    /// Attach a fill backend (template store plus fill transport).
    pub fn with_backend(
        mut self,
        store: Box<dyn TemplateStore>,
        transport: Box<dyn FillTransport>,
    ) -> Self {
        self.store = Some(store);
        self.transport = Some(transport);
        self
    }

    /// Replace the fallback layout engine.
    pub fn with_layout_engine(mut self, layout: LayoutEngine) -> Self {
        self.layout = layout;
        self
    }

    /// Render a submission for one form type.
    ///
    /// `primary` wins over `supplemental` in the merge. Expected failure
    /// modes (no mapping set, absent template, backend failure, zero
    /// fields filled) silently take the fallback path; only fallback
    /// assembly failure or an internal panic produces a failure result.
    pub fn render(
        &self,
        form_type: &str,
        primary: &Value,
        supplemental: Option<&Value>,
    ) -> FillResult {
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            self.render_inner(form_type, primary, supplemental)
        }));
        match outcome {
            Ok(result) => result,
            Err(payload) => {
                let detail = panic_message(&payload);
                warn!(form_type, detail, "render panicked");
                FillResult::failure(format!("internal render error: {detail}"))
            }
        }
    }

    fn render_inner(
        &self,
        form_type: &str,
        primary: &Value,
        supplemental: Option<&Value>,
    ) -> FillResult {
        let merged = match supplemental {
            Some(extra) => deep_merge(primary, extra),
            None => primary.clone(),
        };

        let owned_set;
        let set = match self.registry.get(form_type) {
            Some(set) => set,
            None => {
                debug!(form_type, "no mapping set registered, fallback only");
                owned_set = MappingSet::empty(form_type);
                &owned_set
            }
        };

        if let Some(result) = self.attempt_template(set, &merged) {
            return result;
        }

        self.render_fallback(set, &merged)
    }

    /// Try the official template. `None` means the fallback should run.
    fn attempt_template(&self, set: &MappingSet, merged: &Value) -> Option<FillResult> {
        if !set.supports_template_fill() {
            return None;
        }
        // Without a confirmed template the transport is never called.
        let (Some(store), Some(transport)) = (&self.store, &self.transport) else {
            debug!(form_type = %set.form_type, "no fill backend configured");
            return None;
        };
        if !store.has_template(&set.form_type) {
            debug!(form_type = %set.form_type, "template absent, falling back");
            return None;
        }

        let field_data = build_field_data(&set.fields, merged);
        debug!(
            form_type = %set.form_type,
            fields = field_data.len(),
            skipped = field_data.skipped.len(),
            "attempting template fill"
        );
        let result = run_fill(transport.as_ref(), &set.form_type, &field_data);

        if !result.succeeded {
            warn!(
                form_type = %set.form_type,
                error = result.error_message.as_deref().unwrap_or(""),
                "template fill failed, falling back"
            );
            return None;
        }
        let filled = result
            .stats
            .as_ref()
            .map(|s| s.filled_count)
            .unwrap_or_default();
        if filled == 0 {
            // Backend produced bytes but wrote nothing; the field names
            // likely mismatched the real template.
            warn!(form_type = %set.form_type, "zero fields filled, falling back");
            return None;
        }

        let mut result = result;
        result.file_name = Some(output_file_name(&set.form_type, merged));
        Some(result)
    }

    fn render_fallback(&self, set: &MappingSet, merged: &Value) -> FillResult {
        let rendered = self.layout.render(
            &set.document_title(),
            &set.document_subtitle(),
            &set.layout,
            merged,
        );
        match rendered {
            Ok(bytes) => {
                debug!(form_type = %set.form_type, "fallback summary rendered");
                FillResult::fallback(bytes, output_file_name(&set.form_type, merged), None)
            }
            Err(err) => {
                warn!(form_type = %set.form_type, error = %err, "fallback layout failed");
                FillResult::failure(format!("layout assembly failed: {err}"))
            }
        }
    }
}

/// `{form_type}_{short_id}_{millis}.pdf`. Millisecond timestamps are the
/// only uniqueness guarantee across repeated calls.
fn output_file_name(form_type: &str, merged: &Value) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("{form_type}_{}_{millis}.pdf", short_id(merged))
}

fn short_id(merged: &Value) -> String {
    let raw = ["id", "applicationId"].iter().find_map(|key| {
        match merged.get(*key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    });
    match raw {
        Some(id) => id.chars().take(SHORT_ID_LEN).collect(),
        None => "draft".to_string(),
    }
}

fn panic_message(payload: &Box<dyn std::any::Any + Send>) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{FillRequest, FillResponse, TransportError, WireStats};
    use formfill_core::{FieldMapping, FieldType, LayoutFieldMapping};
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedStore(bool);

    impl TemplateStore for FixedStore {
        fn has_template(&self, _form_type: &str) -> bool {
            self.0
        }
    }

    struct CountingTransport {
        calls: Arc<AtomicUsize>,
        response: Result<FillResponse, &'static str>,
    }

    impl FillTransport for CountingTransport {
        fn fill(&self, _request: &FillRequest) -> Result<FillResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Ok(response) => Ok(response.clone()),
                Err(msg) => Err(TransportError::Unreachable(msg.to_string())),
            }
        }
    }

    struct PanickingTransport;

    impl FillTransport for PanickingTransport {
        fn fill(&self, _request: &FillRequest) -> Result<FillResponse, TransportError> {
            panic!("transport invariant violated");
        }
    }

    fn registry() -> MappingRegistry {
        let mut registry = MappingRegistry::new();
        registry.insert(MappingSet {
            form_type: "I-130".to_string(),
            title: None,
            subtitle: None,
            fields: vec![FieldMapping::new(
                "form1.LastName",
                "applicant.lastName",
                FieldType::Text,
            )],
            layout: vec![LayoutFieldMapping::new("applicant.lastName", "Family Name")],
        });
        registry
    }

    fn application() -> Value {
        json!({"id": "a1b2c3d4e5f6", "applicant": {"lastName": "Doe"}})
    }

    fn good_response() -> FillResponse {
        FillResponse {
            document: b"%PDF-filled".to_vec(),
            stats: Some(WireStats {
                filled: 1,
                total: 1,
                errors: vec![],
            }),
        }
    }

    #[test]
    fn template_path_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let renderer = Renderer::new(registry()).with_backend(
            Box::new(FixedStore(true)),
            Box::new(CountingTransport {
                calls: calls.clone(),
                response: Ok(good_response()),
            }),
        );
        let result = renderer.render("I-130", &application(), None);
        assert!(result.succeeded);
        assert!(result.used_template);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let name = result.file_name.unwrap();
        assert!(name.starts_with("I-130_a1b2c3d4_"));
        assert!(name.ends_with(".pdf"));
    }

    #[test]
    fn absent_template_skips_transport_entirely() {
        let calls = Arc::new(AtomicUsize::new(0));
        let renderer = Renderer::new(registry()).with_backend(
            Box::new(FixedStore(false)),
            Box::new(CountingTransport {
                calls: calls.clone(),
                response: Ok(good_response()),
            }),
        );
        let result = renderer.render("I-130", &application(), None);
        assert!(result.succeeded);
        assert!(!result.used_template);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn backend_failure_falls_back() {
        let renderer = Renderer::new(registry()).with_backend(
            Box::new(FixedStore(true)),
            Box::new(CountingTransport {
                calls: Arc::new(AtomicUsize::new(0)),
                response: Err("connection refused"),
            }),
        );
        let result = renderer.render("I-130", &application(), None);
        assert!(result.succeeded);
        assert!(!result.used_template);
        assert!(result.error_message.is_none());
    }

    #[test]
    fn zero_fill_falls_back() {
        let renderer = Renderer::new(registry()).with_backend(
            Box::new(FixedStore(true)),
            Box::new(CountingTransport {
                calls: Arc::new(AtomicUsize::new(0)),
                response: Ok(FillResponse {
                    document: b"%PDF-untouched".to_vec(),
                    stats: Some(WireStats {
                        filled: 0,
                        total: 1,
                        errors: vec![],
                    }),
                }),
            }),
        );
        let result = renderer.render("I-130", &application(), None);
        assert!(result.succeeded);
        assert!(!result.used_template);
        let bytes = result.document_bytes.unwrap();
        assert_ne!(bytes, b"%PDF-untouched");
        lopdf::Document::load_mem(&bytes).unwrap();
    }

    #[test]
    fn no_backend_configured_renders_fallback() {
        let renderer = Renderer::new(registry());
        let result = renderer.render("I-130", &application(), None);
        assert!(result.succeeded);
        assert!(!result.used_template);
        let doc = lopdf::Document::load_mem(&result.document_bytes.unwrap()).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn unknown_form_type_gets_derived_title() {
        let renderer = Renderer::new(MappingRegistry::new());
        let result = renderer.render("N-400", &json!({"fullName": "Jane Roe"}), None);
        assert!(result.succeeded);
        let doc = lopdf::Document::load_mem(&result.document_bytes.unwrap()).unwrap();
        let page = *doc.get_pages().get(&1).unwrap();
        let content = String::from_utf8_lossy(&doc.get_page_content(page).unwrap()).to_string();
        assert!(content.contains("(Form N-400 Summary)"));
        assert!(result.file_name.unwrap().starts_with("N-400_draft_"));
    }

    #[test]
    fn supplemental_data_feeds_the_merge() {
        let renderer = Renderer::new(registry());
        let primary = json!({"applicant": {"lastName": "Doe"}});
        let supplemental = json!({"id": "beneficiary-7", "applicant": {"firstName": "Jan"}});
        let result = renderer.render("I-130", &primary, Some(&supplemental));
        assert!(result.succeeded);
        // The merged id came from the supplemental side.
        assert!(result.file_name.unwrap().starts_with("I-130_benefici_"));
    }

    #[test]
    fn numeric_id_is_usable() {
        let renderer = Renderer::new(MappingRegistry::new());
        let result = renderer.render("I-765", &json!({"id": 123456789012u64}), None);
        assert!(result.file_name.unwrap().starts_with("I-765_12345678_"));
    }

    #[test]
    fn transport_panic_becomes_failure_result() {
        let renderer = Renderer::new(registry())
            .with_backend(Box::new(FixedStore(true)), Box::new(PanickingTransport));
        let result = renderer.render("I-130", &application(), None);
        assert!(!result.succeeded);
        assert!(
            result
                .error_message
                .unwrap()
                .contains("internal render error")
        );
    }
}

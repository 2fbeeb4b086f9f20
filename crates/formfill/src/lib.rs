//! Form-to-PDF rendering pipeline.
//!
//! Turns a government-form application record (JSON) into a PDF: either
//! by filling the official template through an external fill backend, or
//! by laying out a draft summary document locally when no template is
//! available. The [`Renderer`] is the single entry point; transports for
//! the fill backend live behind the [`FillTransport`] and
//! [`TemplateStore`] traits.
//!
//! ```no_run
//! use formfill::{MappingRegistry, Renderer};
//! use serde_json::json;
//!
//! let registry = MappingRegistry::from_json_slice(br#"[{"formType": "I-130"}]"#)?;
//! let renderer = Renderer::new(registry);
//! let result = renderer.render("I-130", &json!({"applicant": {"lastName": "Doe"}}), None);
//! assert!(result.succeeded);
//! # Ok::<(), formfill::FillError>(())
//! ```

pub mod client;
pub mod http;
pub mod mappings;
pub mod render;
pub mod subprocess;

pub use client::{FillRequest, FillResponse, FillTransport, TemplateStore, TransportError, WireStats, run_fill};
pub use http::HttpFillBackend;
pub use mappings::{MappingRegistry, MappingSet};
pub use render::Renderer;
pub use subprocess::SubprocessFillBackend;

pub use formfill_core::{
    ApplicationData, CustomFormatter, FieldData, FieldMapping, FieldType, FillError, FillResult,
    FillStats, LayoutFieldMapping, build_field_data, deep_merge,
};
pub use formfill_render::{LayoutEngine, PageMetrics, RenderError};

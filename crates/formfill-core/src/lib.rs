//! formfill-core: Transport-independent data types and pure algorithms.
//!
//! This crate provides the foundational types (field mappings, fill
//! statistics, fill results) and algorithms (value formatting, dot-path
//! resolution, field-data building, deep merge, structured display
//! formatting) used by formfill-rs. Everything here is pure, synchronous
//! computation with no I/O.

pub mod builder;
pub mod display;
pub mod error;
pub mod format;
pub mod merge;
pub mod path;
pub mod types;

pub use builder::{FieldData, build_field_data};
pub use display::{derive_label, format_structured};
pub use error::FillError;
pub use format::{apply_mapping, format_value};
pub use merge::deep_merge;
pub use path::{collect_paths, resolve};
pub use types::{
    ApplicationData, CustomFormatter, FieldMapping, FieldType, FillResult, FillStats,
    LayoutFieldMapping,
};

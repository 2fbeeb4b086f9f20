//! Error types for formfill-rs.
//!
//! Provides [`FillError`] for the failure modes of a render request.
//! Most of these are *expected* failures that trigger the fallback
//! renderer rather than aborting the request; only
//! [`Layout`](FillError::Layout) has no further fallback.

use std::fmt;

/// Failure modes of the fill pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum FillError {
    /// No mapping set or template artifact is registered for the form type.
    Config(String),
    /// The fill backend was unreachable, timed out, or rejected the request.
    Backend(String),
    /// The fill backend reported success but returned an empty document.
    EmptyDocument,
    /// The fallback layout engine failed to assemble the document.
    Layout(String),
    /// I/O error reading mapping configuration or writing output.
    Io(String),
    /// Any other error not covered by specific variants.
    Other(String),
}

impl fmt::Display for FillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillError::Config(msg) => write!(f, "configuration error: {msg}"),
            FillError::Backend(msg) => write!(f, "fill backend error: {msg}"),
            FillError::EmptyDocument => write!(f, "fill backend returned an empty document"),
            FillError::Layout(msg) => write!(f, "layout error: {msg}"),
            FillError::Io(msg) => write!(f, "I/O error: {msg}"),
            FillError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for FillError {}

impl From<std::io::Error> for FillError {
    fn from(err: std::io::Error) -> Self {
        FillError::Io(err.to_string())
    }
}

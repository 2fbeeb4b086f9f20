//! Error type for the layout engine.
//!
//! Uses [`thiserror`] for derivation and converts into the core
//! [`FillError`] for unified handling at the orchestrator boundary.

use formfill_core::FillError;
use thiserror::Error;

/// Error type for summary-document rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// PDF object assembly or serialization failed.
    #[error("document assembly failed: {0}")]
    Assembly(String),

    /// I/O error writing the document buffer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RenderError> for FillError {
    fn from(err: RenderError) -> Self {
        FillError::Layout(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembly_error_display() {
        let err = RenderError::Assembly("bad page tree".to_string());
        assert_eq!(err.to_string(), "document assembly failed: bad page tree");
    }

    #[test]
    fn io_error_from_std() {
        let io_err = std::io::Error::other("buffer full");
        let err: RenderError = io_err.into();
        assert!(matches!(err, RenderError::Io(_)));
    }

    #[test]
    fn converts_to_fill_error_layout() {
        let err = RenderError::Assembly("oops".to_string());
        let fill_err: FillError = err.into();
        assert!(matches!(fill_err, FillError::Layout(_)));
        assert!(fill_err.to_string().contains("oops"));
    }
}

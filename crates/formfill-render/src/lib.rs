//! formfill-render: The fallback summary-document layout engine.
//!
//! When no fillable template is usable, this crate synthesizes a
//! paginated, word-wrapped PDF from the application data and a
//! display-oriented mapping set. Text measurement uses built-in Helvetica
//! AFM width tables; document assembly uses `lopdf`.

pub mod error;
pub mod fonts;
pub mod geom;
pub mod layout;
pub mod wrap;

pub use error::RenderError;
pub use fonts::{FontFace, text_width};
pub use geom::PageMetrics;
pub use layout::LayoutEngine;
pub use wrap::wrap_text;

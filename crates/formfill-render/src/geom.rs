//! Page geometry and typography defaults for the summary renderer.

/// Page dimensions, margins, and font sizes, in PDF points.
///
/// Defaults describe a US Letter page (612 x 792) with three-quarter-inch
/// margins.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMetrics {
    /// Page width.
    pub width: f64,
    /// Page height.
    pub height: f64,
    /// Margin on all four sides.
    pub margin: f64,
    /// Title font size.
    pub title_size: f64,
    /// Subtitle and section-heading font size.
    pub heading_size: f64,
    /// Body and label font size.
    pub body_size: f64,
    /// Footer font size.
    pub footer_size: f64,
    /// Vertical advance per body line.
    pub line_height: f64,
    /// Extra vertical gap between fields.
    pub field_gap: f64,
}

impl Default for PageMetrics {
    fn default() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margin: 54.0,
            title_size: 16.0,
            heading_size: 12.0,
            body_size: 10.0,
            footer_size: 8.0,
            line_height: 14.0,
            field_gap: 4.0,
        }
    }
}

impl PageMetrics {
    /// Width available to text between the left and right margins.
    pub fn content_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    /// Y coordinate of the top margin (PDF origin is bottom-left).
    pub fn top(&self) -> f64 {
        self.height - self.margin
    }

    /// Y coordinate below which no body content is drawn.
    pub fn bottom(&self) -> f64 {
        self.margin
    }

    /// Baseline for the stamped footer line.
    pub fn footer_baseline(&self) -> f64 {
        self.margin / 2.0
    }
}

//! Helvetica width tables for text measurement.
//!
//! Glyph widths (in 1/1000 em-square units) for the two standard Type1
//! faces the summary renderer draws with, sourced from the Adobe AFM
//! specifications and indexed by WinAnsiEncoding character codes. Width
//! measurement is what drives word wrapping; the fonts themselves are
//! referenced by name in the PDF and supplied by the viewer.

/// The two font faces used by the summary renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    /// Body text.
    Helvetica,
    /// Labels and headings.
    HelveticaBold,
}

impl FontFace {
    /// The PDF BaseFont name for this face.
    pub fn base_font(&self) -> &'static str {
        match self {
            FontFace::Helvetica => "Helvetica",
            FontFace::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// The resource name this face is registered under in page resources.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontFace::Helvetica => "F1",
            FontFace::HelveticaBold => "F2",
        }
    }

    fn widths(&self) -> &'static [u16; 256] {
        match self {
            FontFace::Helvetica => &HELVETICA_WIDTHS,
            FontFace::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        }
    }
}

/// Fallback width for characters outside WinAnsi (the Helvetica average).
const FALLBACK_WIDTH: u16 = 556;

/// Measure a string's advance width in points at the given size.
///
/// Characters above U+00FF (not representable in WinAnsi) are counted at
/// the fallback width; so are control codes, whose table entries are 0.
pub fn text_width(text: &str, face: FontFace, size: f64) -> f64 {
    let widths = face.widths();
    let mut total: u64 = 0;
    for ch in text.chars() {
        let code = ch as u32;
        let w = if code < 256 { widths[code as usize] } else { 0 };
        total += u64::from(if w == 0 { FALLBACK_WIDTH } else { w });
    }
    total as f64 * size / 1000.0
}

// Width data from the Adobe Helvetica AFM, mapped via WinAnsiEncoding.
#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 256] = [
    // 0-31: control characters
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    // 32-47: space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 48-63: 0-9 : ; < = > ?
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    // 64-79: @ A-O
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    // 80-95: P-Z [ \ ] ^ _
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    // 96-111: ` a-o
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    // 112-127: p-z { | } ~ DEL
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0,
    // 128-159: WinAnsi punctuation block
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
    // 160-191
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // 192-223: accented capitals
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // 224-255: accented lowercase
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: [u16; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    // 32-47
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 48-63
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    // 64-79
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    // 80-95
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    // 96-111
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    // 112-127
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, 0,
    // 128-159
    556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667,
    // 160-191
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // 192-223
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // 224-255
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_width_at_size() {
        // Helvetica space is 278/1000 em.
        let w = text_width(" ", FontFace::Helvetica, 10.0);
        assert!((w - 2.78).abs() < 1e-9);
    }

    #[test]
    fn empty_string_is_zero() {
        assert_eq!(text_width("", FontFace::Helvetica, 12.0), 0.0);
    }

    #[test]
    fn bold_is_wider_for_lowercase() {
        let regular = text_width("name", FontFace::Helvetica, 10.0);
        let bold = text_width("name", FontFace::HelveticaBold, 10.0);
        assert!(bold > regular);
    }

    #[test]
    fn width_scales_linearly_with_size() {
        let at_10 = text_width("Hello", FontFace::Helvetica, 10.0);
        let at_20 = text_width("Hello", FontFace::Helvetica, 20.0);
        assert!((at_20 - 2.0 * at_10).abs() < 1e-9);
    }

    #[test]
    fn non_winansi_chars_use_fallback() {
        let w = text_width("\u{4e16}", FontFace::Helvetica, 10.0);
        assert!((w - 5.56).abs() < 1e-9);
    }

    #[test]
    fn base_font_names() {
        assert_eq!(FontFace::Helvetica.base_font(), "Helvetica");
        assert_eq!(FontFace::HelveticaBold.base_font(), "Helvetica-Bold");
    }

    #[test]
    fn resource_names_are_distinct() {
        assert_ne!(
            FontFace::Helvetica.resource_name(),
            FontFace::HelveticaBold.resource_name()
        );
    }
}

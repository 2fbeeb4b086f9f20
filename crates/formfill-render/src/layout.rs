//! The summary-document layout engine.
//!
//! Renders an arbitrary nested data object into a paginated, word-wrapped
//! PDF when no fillable template is usable. The engine owns pagination:
//! the cursor is checked against the bottom margin *before* each field's
//! label so a label and its first value line are never split across
//! pages; continuation lines of a long wrapped value spill naturally
//! through the same per-line check. After all pages are drawn, every
//! page's footer is stamped with a generation timestamp, page index and
//! count, and a draft watermark.

use chrono::{DateTime, Utc};
use lopdf::{Object, Stream, dictionary};
use serde_json::Value;

use formfill_core::{LayoutFieldMapping, collect_paths, derive_label, format_structured, resolve};

use crate::error::RenderError;
use crate::fonts::FontFace;
use crate::fonts::text_width;
use crate::geom::PageMetrics;
use crate::wrap::wrap_text;

/// Gap between a field's label and the start of its value.
const LABEL_VALUE_GAP: f64 = 6.0;

/// Labels wider than this fraction of the content width push the value
/// onto its own lines instead of sharing the label's line.
const INLINE_LABEL_LIMIT: f64 = 0.45;

const WATERMARK: &str = "DRAFT - NOT FOR FILING";

/// Renders the fallback summary document.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    metrics: PageMetrics,
    generated_at: Option<DateTime<Utc>>,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    /// Engine with default Letter-page metrics and a wall-clock timestamp.
    pub fn new() -> Self {
        Self {
            metrics: PageMetrics::default(),
            generated_at: None,
        }
    }

    /// Override the page metrics.
    pub fn with_metrics(mut self, metrics: PageMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Pin the generation timestamp. With a pinned timestamp the output
    /// bytes are fully deterministic for a given input.
    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    /// Render the data object into a finished PDF.
    ///
    /// Mapped fields are drawn in mapping order under their section
    /// headings; data paths not covered by any mapping are appended under
    /// an "Additional Information" subheader with labels derived from
    /// their keys. Fields whose value is absent or formats to the empty
    /// string are not drawn.
    pub fn render(
        &self,
        title: &str,
        subtitle: &str,
        mappings: &[LayoutFieldMapping],
        data: &Value,
    ) -> Result<Vec<u8>, RenderError> {
        let generated_at = self.generated_at.unwrap_or_else(Utc::now);
        let mut writer = PageWriter::new(&self.metrics);

        writer.draw_header(title, subtitle);

        let mut last_section: Option<&str> = None;
        for mapping in mappings {
            let Some(value) = resolve(data, &mapping.data_path) else {
                continue;
            };
            let formatted = format_structured(value);
            if formatted.is_empty() {
                continue;
            }
            if let Some(section) = mapping.section.as_deref() {
                if last_section != Some(section) {
                    writer.draw_section_heading(section);
                    last_section = Some(section);
                }
            }
            writer.draw_field(&mapping.label, &formatted);
        }

        let unmapped = unmapped_paths(data, mappings);
        let mut extra_heading_drawn = false;
        for path in unmapped {
            let Some(value) = resolve(data, &path) else {
                continue;
            };
            let formatted = format_structured(value);
            if formatted.is_empty() {
                continue;
            }
            if !extra_heading_drawn {
                writer.draw_section_heading("Additional Information");
                extra_heading_drawn = true;
            }
            let key = path.rsplit('.').next().unwrap_or(&path);
            writer.draw_field(&derive_label(key), &formatted);
        }

        writer.stamp_footers(generated_at);
        assemble(title, &self.metrics, writer.pages, generated_at)
    }
}

/// Data paths present in the input but not covered by the mapping set.
///
/// A leaf is covered when a mapped path equals it or is a prefix of it
/// (a mapping addressing a whole object covers everything beneath it).
fn unmapped_paths(data: &Value, mappings: &[LayoutFieldMapping]) -> Vec<String> {
    collect_paths(data)
        .into_iter()
        .filter(|leaf| {
            !mappings.iter().any(|m| {
                leaf == &m.data_path
                    || (leaf.starts_with(&m.data_path)
                        && leaf.as_bytes().get(m.data_path.len()) == Some(&b'.'))
            })
        })
        .collect()
}

/// Accumulates content-stream operators page by page, tracking the
/// vertical cursor.
struct PageWriter<'a> {
    metrics: &'a PageMetrics,
    pages: Vec<String>,
    y: f64,
}

impl<'a> PageWriter<'a> {
    fn new(metrics: &'a PageMetrics) -> Self {
        Self {
            metrics,
            pages: vec![String::new()],
            y: metrics.top(),
        }
    }

    fn current(&mut self) -> &mut String {
        self.pages.last_mut().expect("at least one page")
    }

    fn start_page(&mut self) {
        self.pages.push(String::new());
        self.y = self.metrics.top();
    }

    /// Start a new page unless `needed` points still fit above the
    /// bottom margin. This is the pagination check; it runs before a
    /// field's label, never mid-field.
    fn ensure_room(&mut self, needed: f64) {
        if self.y - needed < self.metrics.bottom() {
            self.start_page();
        }
    }

    fn draw_header(&mut self, title: &str, subtitle: &str) {
        let m = self.metrics;
        let x = m.margin;
        self.y -= m.title_size;
        let y = self.y;
        show_text(self.current(), x, y, FontFace::HelveticaBold, m.title_size, title);
        if !subtitle.is_empty() {
            self.y -= m.line_height;
            let y = self.y;
            let size = m.body_size;
            show_text(self.current(), x, y, FontFace::Helvetica, size, subtitle);
        }
        self.y -= m.field_gap * 2.0;
        let (x1, y) = (m.width - m.margin, self.y);
        draw_rule(self.current(), x, x1, y);
        self.y -= m.line_height;
    }

    fn draw_section_heading(&mut self, heading: &str) {
        let m = self.metrics;
        // Keep the heading attached to at least one following line.
        self.ensure_room(m.heading_size + 2.0 * m.line_height);
        self.y -= m.heading_size;
        let (x, y, size) = (m.margin, self.y, m.heading_size);
        show_text(self.current(), x, y, FontFace::HelveticaBold, size, heading);
        self.y -= m.line_height * 0.75;
    }

    fn draw_field(&mut self, label: &str, value: &str) {
        let m = self.metrics;
        let label_text = format!("{label}:");
        let label_width = text_width(&label_text, FontFace::HelveticaBold, m.body_size);
        let inline = label_width <= m.content_width() * INLINE_LABEL_LIMIT;

        // A label and its first value line must land on the same page.
        // Inline values share the label's baseline; block values need an
        // extra line reserved below the label.
        if inline {
            self.ensure_room(m.line_height);
        } else {
            self.ensure_room(m.body_size + 2.0 * m.line_height);
        }
        self.y -= m.body_size;
        let label_y = self.y;
        let (x, size) = (m.margin, m.body_size);
        show_text(self.current(), x, label_y, FontFace::HelveticaBold, size, &label_text);

        if inline {
            let value_x = m.margin + label_width + LABEL_VALUE_GAP;
            let value_width = m.content_width() - label_width - LABEL_VALUE_GAP;
            let lines = wrap_text(value, FontFace::Helvetica, m.body_size, value_width);
            for (i, line) in lines.iter().enumerate() {
                if i == 0 {
                    // Shares the label's baseline; room was already ensured.
                    show_text(self.current(), value_x, label_y, FontFace::Helvetica, size, line);
                } else {
                    self.continuation_line(value_x, line);
                }
            }
        } else {
            let value_x = m.margin + 2.0 * LABEL_VALUE_GAP;
            let value_width = m.content_width() - 2.0 * LABEL_VALUE_GAP;
            let lines = wrap_text(value, FontFace::Helvetica, m.body_size, value_width);
            for line in &lines {
                self.continuation_line(value_x, line);
            }
        }
        self.y -= m.field_gap;
    }

    fn continuation_line(&mut self, x: f64, line: &str) {
        let m = self.metrics;
        self.y -= m.line_height;
        if self.y < m.bottom() {
            self.start_page();
            self.y -= m.line_height;
        }
        let (y, size) = (self.y, m.body_size);
        show_text(self.current(), x, y, FontFace::Helvetica, size, line);
    }

    fn stamp_footers(&mut self, generated_at: DateTime<Utc>) {
        let m = self.metrics;
        let total = self.pages.len();
        let stamp = generated_at.format("Generated %m/%d/%Y %H:%M UTC").to_string();
        let size = m.footer_size;
        let baseline = m.footer_baseline();
        let center_x = (m.width - text_width(WATERMARK, FontFace::HelveticaBold, size)) / 2.0;

        for (index, ops) in self.pages.iter_mut().enumerate() {
            let page_label = format!("Page {} of {}", index + 1, total);
            let right_x =
                m.width - m.margin - text_width(&page_label, FontFace::Helvetica, size);
            ops.push_str("0.5 g\n");
            show_text(ops, m.margin, baseline, FontFace::Helvetica, size, &stamp);
            show_text(ops, center_x, baseline, FontFace::HelveticaBold, size, WATERMARK);
            show_text(ops, right_x, baseline, FontFace::Helvetica, size, &page_label);
            ops.push_str("0 g\n");
        }
    }
}

fn show_text(ops: &mut String, x: f64, y: f64, face: FontFace, size: f64, text: &str) {
    ops.push_str(&format!(
        "BT /{} {size} Tf {x:.2} {y:.2} Td ({}) Tj ET\n",
        face.resource_name(),
        escape_pdf_string(text),
    ));
}

fn draw_rule(ops: &mut String, x0: f64, x1: f64, y: f64) {
    ops.push_str(&format!("0.75 w {x0:.2} {y:.2} m {x1:.2} {y:.2} l S\n"));
}

/// Escape a string for a PDF literal string in WinAnsi encoding.
///
/// Parentheses and backslashes are backslash-escaped; Latin-1 characters
/// are emitted as octal escapes; common Unicode punctuation is mapped to
/// its WinAnsi slot; anything else unencodable becomes `?`.
fn escape_pdf_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\\' => out.push_str("\\\\"),
            ' '..='~' => out.push(ch),
            '\u{2013}' => out.push_str("\\226"),
            '\u{2014}' => out.push_str("\\227"),
            '\u{2018}' => out.push_str("\\221"),
            '\u{2019}' => out.push_str("\\222"),
            '\u{201C}' => out.push_str("\\223"),
            '\u{201D}' => out.push_str("\\224"),
            '\u{2022}' => out.push_str("\\225"),
            c if (c as u32) >= 0xA0 && (c as u32) <= 0xFF => {
                out.push_str(&format!("\\{:03o}", c as u32));
            }
            _ => out.push('?'),
        }
    }
    out
}

/// Assemble the drawn pages into a finished PDF.
fn assemble(
    title: &str,
    metrics: &PageMetrics,
    pages: Vec<String>,
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = lopdf::Document::with_version("1.5");

    let helvetica_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let helvetica_bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Real(metrics.width as f32),
        Object::Real(metrics.height as f32),
    ];

    let mut page_ids = Vec::with_capacity(pages.len());
    for ops in pages {
        let stream = Stream::new(dictionary! {}, ops.into_bytes());
        let content_id = doc.add_object(stream);
        let page_dict = dictionary! {
            "Type" => "Page",
            "MediaBox" => media_box.clone(),
            "Contents" => Object::Reference(content_id),
            "Resources" => dictionary! {
                "Font" => dictionary! {
                    "F1" => Object::Reference(helvetica_id),
                    "F2" => Object::Reference(helvetica_bold_id),
                },
            },
        };
        page_ids.push(doc.add_object(page_dict));
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(page_ids.len() as i64),
    });

    for page_id in &page_ids {
        if let Ok(page_obj) = doc.get_object_mut(*page_id) {
            if let Ok(dict) = page_obj.as_dict_mut() {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(title),
        "Producer" => Object::string_literal("formfill-rs"),
        "CreationDate" => Object::string_literal(
            generated_at.format("D:%Y%m%d%H%M%SZ").to_string()
        ),
    });

    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.trailer.set("Info", Object::Reference(info_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| RenderError::Assembly(e.to_string()))?;
    Ok(buf)
}

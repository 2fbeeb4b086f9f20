//! Width-measured word wrapping.

use crate::fonts::{FontFace, text_width};

/// Wrap text to fit within `max_width` points at the given face and size.
///
/// Explicit newlines are honored first, so structured multi-line values
/// (repeating sections, nested objects) keep their own line breaks. Within
/// each segment, words are packed greedily by measured width. A single
/// word wider than the line is hard-split by character rather than
/// overflowing.
pub fn wrap_text(text: &str, face: FontFace, size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    for segment in text.split('\n') {
        wrap_segment(segment, face, size, max_width, &mut lines);
    }
    lines
}

fn wrap_segment(segment: &str, face: FontFace, size: f64, max_width: f64, out: &mut Vec<String>) {
    if segment.trim().is_empty() {
        out.push(String::new());
        return;
    }
    let space_width = text_width(" ", face, size);
    let mut current = String::new();
    let mut current_width = 0.0;

    for word in segment.split_whitespace() {
        let word_width = text_width(word, face, size);
        if word_width > max_width {
            // Oversized token (long URL, unbroken identifier): flush the
            // current line and split the word by character.
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            split_long_word(word, face, size, max_width, out);
            if let Some(tail) = out.pop() {
                current_width = text_width(&tail, face, size);
                current = tail;
            }
            continue;
        }
        let needed = if current.is_empty() {
            word_width
        } else {
            space_width + word_width
        };
        if !current.is_empty() && current_width + needed > max_width {
            out.push(std::mem::take(&mut current));
            current_width = 0.0;
            current.push_str(word);
            current_width += word_width;
        } else {
            if !current.is_empty() {
                current.push(' ');
                current_width += space_width;
            }
            current.push_str(word);
            current_width += word_width;
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
}

fn split_long_word(word: &str, face: FontFace, size: f64, max_width: f64, out: &mut Vec<String>) {
    let mut chunk = String::new();
    let mut chunk_width = 0.0;
    for ch in word.chars() {
        let ch_width = text_width(&ch.to_string(), face, size);
        if !chunk.is_empty() && chunk_width + ch_width > max_width {
            out.push(std::mem::take(&mut chunk));
            chunk_width = 0.0;
        }
        chunk.push(ch);
        chunk_width += ch_width;
    }
    if !chunk.is_empty() {
        out.push(chunk);
    }
}

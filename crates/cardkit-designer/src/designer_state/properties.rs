//! Inspector edits on the selected element.
//!
//! Edits are live and do not checkpoint; the host calls
//! [`EditorSession::commit`] when the user leaves the field.

use cardkit_core::constants::{MIN_BARCODE_HEIGHT, MIN_BARCODE_WIDTH, MIN_IMAGE_SIZE};

use super::{EditorSession, SessionEvent};
use crate::model::{BarcodeFormat, ElementKind};

/// A single inspector field change. Numeric fields carry the raw input text.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyEdit {
    /// Text content.
    Text(String),
    /// Text font size.
    FontSize(String),
    /// Text color.
    Color(String),
    /// Image or barcode base width.
    Width(String),
    /// Image or barcode base height.
    Height(String),
    /// Barcode value.
    Value(String),
    /// Barcode symbology.
    Format(BarcodeFormat),
    /// Barcode caption visibility.
    ShowText(bool),
    /// Barcode caption font size.
    CaptionSize(String),
    /// Barcode caption color.
    CaptionColor(String),
}

/// Leading integer of `input`, the way form fields are read: optional sign,
/// digits, anything after is ignored (`"12.9px"` reads as 12).
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|v| v * sign)
}

/// Leading decimal number of `input` (`"2.5mm"` reads as 2.5).
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (i, c) in s.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            d if d.is_ascii_digit() => seen_digit = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Positive integer from `input`, or `prior` when the input is unusable.
fn positive_or(input: &str, prior: f64) -> f64 {
    match parse_int_prefix(input) {
        Some(v) if v > 0 => v as f64,
        _ => prior,
    }
}

impl EditorSession {
    /// Apply one inspector edit to the selection.
    ///
    /// Returns no events when nothing is selected or the field does not apply
    /// to the selected element's type.
    pub fn edit_property(&mut self, edit: PropertyEdit) -> Vec<SessionEvent> {
        let Some(el) = self.selected_element_mut() else {
            return Vec::new();
        };
        let id = el.id.clone();
        let mut invalidate = false;

        let applied = match (&mut el.kind, edit) {
            (ElementKind::Text(text), PropertyEdit::Text(value)) => {
                text.text = value;
                true
            }
            (ElementKind::Text(text), PropertyEdit::FontSize(input)) => {
                text.font_size = positive_or(&input, text.font_size);
                true
            }
            (ElementKind::Text(text), PropertyEdit::Color(color)) => {
                text.color = color;
                true
            }
            (ElementKind::Image(img), PropertyEdit::Width(input)) => {
                img.w = positive_or(&input, img.w).max(MIN_IMAGE_SIZE);
                true
            }
            (ElementKind::Image(img), PropertyEdit::Height(input)) => {
                img.h = positive_or(&input, img.h).max(MIN_IMAGE_SIZE);
                true
            }
            (ElementKind::Barcode(bc), PropertyEdit::Width(input)) => {
                bc.w = positive_or(&input, bc.w).max(MIN_BARCODE_WIDTH);
                true
            }
            (ElementKind::Barcode(bc), PropertyEdit::Height(input)) => {
                bc.h = positive_or(&input, bc.h).max(MIN_BARCODE_HEIGHT);
                true
            }
            (ElementKind::Barcode(bc), PropertyEdit::Value(value)) => {
                invalidate = bc.value != value;
                bc.value = value;
                true
            }
            (ElementKind::Barcode(bc), PropertyEdit::Format(format)) => {
                invalidate = bc.format != format;
                bc.format = format;
                true
            }
            (ElementKind::Barcode(bc), PropertyEdit::ShowText(on)) => {
                bc.show_text = on;
                true
            }
            (ElementKind::Barcode(bc), PropertyEdit::CaptionSize(input)) => {
                bc.font_size = positive_or(&input, bc.font_size);
                true
            }
            (ElementKind::Barcode(bc), PropertyEdit::CaptionColor(color)) => {
                bc.text_color = color;
                true
            }
            _ => false,
        };

        if !applied {
            return Vec::new();
        }
        if invalidate {
            self.symbols.invalidate(&id);
        }
        vec![SessionEvent::RenderNeeded]
    }
}

//! Tunable handle and box geometry.
//!
//! Hit-testing and handle rendering both read from one [`HandleMetrics`]
//! value so the drawn handles and the clickable regions always agree.

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Geometry constants for handles and estimated element boxes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleMetrics {
    /// Side of each square corner handle
    pub handle_size: f64,
    /// Drawn radius of the rotate disc
    pub rotate_radius: f64,
    /// Extra radius accepted when hit-testing the rotate disc
    pub rotate_tolerance: f64,
    /// Distance above the box top edge to the rotate disc center
    pub rotate_offset: f64,
    /// Degrees added to the pointer angle while rotating
    pub rotate_angle_offset: f64,
    /// Estimated glyph advance per character, relative to font size
    pub text_width_factor: f64,
    /// Horizontal padding of the text box
    pub text_width_padding: f64,
    /// Minimum text box width
    pub text_min_width: f64,
    /// Text box height relative to font size
    pub text_height_factor: f64,
    /// Gap between a barcode symbol and its caption
    pub barcode_text_gap: f64,
    /// Minimum width/height while dragging
    pub min_drag_size: f64,
    /// Minimum font size while dragging
    pub min_font_size: f64,
}

impl Default for HandleMetrics {
    fn default() -> Self {
        Self {
            handle_size: HANDLE_SIZE,
            rotate_radius: ROTATE_RADIUS,
            rotate_tolerance: ROTATE_TOLERANCE,
            rotate_offset: ROTATE_OFFSET,
            rotate_angle_offset: ROTATE_ANGLE_OFFSET,
            text_width_factor: TEXT_WIDTH_FACTOR,
            text_width_padding: TEXT_WIDTH_PADDING,
            text_min_width: TEXT_MIN_WIDTH,
            text_height_factor: TEXT_HEIGHT_FACTOR,
            barcode_text_gap: BARCODE_TEXT_GAP,
            min_drag_size: MIN_DRAG_SIZE,
            min_font_size: MIN_FONT_SIZE,
        }
    }
}

impl HandleMetrics {
    /// Radius used when hit-testing the rotate disc.
    pub fn rotate_hit_radius(&self) -> f64 {
        self.rotate_radius + self.rotate_tolerance
    }

    /// Half the side of a corner handle.
    pub fn half_handle(&self) -> f64 {
        self.handle_size / 2.0
    }

    /// Returns the name of the first field that is not strictly positive.
    pub fn first_invalid(&self) -> Option<&'static str> {
        let fields = [
            ("handle_size", self.handle_size),
            ("rotate_radius", self.rotate_radius),
            ("rotate_offset", self.rotate_offset),
            ("text_width_factor", self.text_width_factor),
            ("text_min_width", self.text_min_width),
            ("text_height_factor", self.text_height_factor),
            ("min_drag_size", self.min_drag_size),
            ("min_font_size", self.min_font_size),
        ];
        fields
            .iter()
            .find(|(_, v)| !v.is_finite() || *v <= 0.0)
            .map(|(name, _)| *name)
            .or_else(|| {
                [
                    ("rotate_tolerance", self.rotate_tolerance),
                    ("text_width_padding", self.text_width_padding),
                    ("barcode_text_gap", self.barcode_text_gap),
                ]
                .iter()
                .find(|(_, v)| !v.is_finite() || *v < 0.0)
                .map(|(name, _)| *name)
            })
    }
}

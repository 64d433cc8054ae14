use cardkit_core::HandleMetrics;
use serde::{Deserialize, Serialize};

use super::BoxSize;

/// Horizontal alignment of text lines inside the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    /// May contain `\n` line breaks.
    pub text: String,
    pub font_size: f64,
    #[serde(default = "default_family")]
    pub font_family: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default)]
    pub align: TextAlign,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_family() -> String {
    "Arial".to_string()
}

fn default_weight() -> u32 {
    400
}

fn default_color() -> String {
    "#111111".to_string()
}

impl TextElement {
    pub fn new(text: impl Into<String>, font_size: f64) -> Self {
        Self {
            text: text.into(),
            font_size,
            font_family: default_family(),
            weight: default_weight(),
            align: TextAlign::Center,
            color: default_color(),
        }
    }

    pub fn bold(&self) -> bool {
        self.weight >= 600
    }

    /// Estimated box: there is no shaping here, so width is a per-character heuristic.
    pub fn size(&self, metrics: &HandleMetrics) -> BoxSize {
        let len = self.text.chars().count() as f64;
        let w = (len * metrics.text_width_factor * self.font_size + metrics.text_width_padding)
            .max(metrics.text_min_width);
        BoxSize::new(w, metrics.text_height_factor * self.font_size)
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}

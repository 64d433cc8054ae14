use cardkit_core::HandleMetrics;
use serde::{Deserialize, Serialize};

use super::{default_scale, BoxSize};

/// Symbology of a barcode element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BarcodeFormat {
    #[default]
    #[serde(rename = "CODE128")]
    Code128,
    #[serde(rename = "QR")]
    Qr,
}

impl std::fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Code128 => write!(f, "CODE128"),
            Self::Qr => write!(f, "QR"),
        }
    }
}

impl std::str::FromStr for BarcodeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CODE128" => Ok(Self::Code128),
            "QR" => Ok(Self::Qr),
            other => Err(format!("unknown barcode format '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeElement {
    pub value: String,
    #[serde(default)]
    pub format: BarcodeFormat,
    pub w: f64,
    pub h: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub show_text: bool,
    /// Caption mirrors `value`; when off the caption is hidden.
    #[serde(default)]
    pub linked_text: bool,
    #[serde(default = "default_text_color")]
    pub text_color: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
}

fn default_text_color() -> String {
    "#000000".to_string()
}

fn default_font_size() -> f64 {
    20.0
}

impl BarcodeElement {
    pub fn new(value: impl Into<String>, format: BarcodeFormat, w: f64, h: f64) -> Self {
        Self {
            value: value.into(),
            format,
            w,
            h,
            scale: 1.0,
            show_text: true,
            linked_text: true,
            text_color: default_text_color(),
            font_size: default_font_size(),
        }
    }

    pub fn shows_caption(&self) -> bool {
        self.show_text && self.linked_text
    }

    /// Vertical space reserved under the symbol for the caption.
    pub fn text_extra(&self, metrics: &HandleMetrics) -> f64 {
        if self.shows_caption() {
            self.font_size + metrics.barcode_text_gap
        } else {
            0.0
        }
    }

    /// Pixel size of the symbol area alone, without the caption.
    pub fn symbol_size(&self) -> BoxSize {
        let w = self.w * self.scale;
        match self.format {
            BarcodeFormat::Code128 => BoxSize::new(w, self.h * self.scale),
            BarcodeFormat::Qr => BoxSize::new(w, w),
        }
    }

    pub fn size(&self, metrics: &HandleMetrics) -> BoxSize {
        let symbol = self.symbol_size();
        BoxSize::new(symbol.w, symbol.h + self.text_extra(metrics))
    }

    /// Side length used to key the QR cache.
    pub fn qr_side(&self) -> u32 {
        (self.w * self.scale).max(self.h * self.scale).round().max(1.0) as u32
    }
}

use serde::{Deserialize, Serialize};

use super::{default_scale, BoxSize};

/// Bitmap element; `src` names an entry in the image store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    pub src: String,
    pub w: f64,
    pub h: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl ImageElement {
    pub fn new(src: impl Into<String>, w: f64, h: f64) -> Self {
        Self {
            src: src.into(),
            w,
            h,
            scale: 1.0,
        }
    }

    pub fn size(&self) -> BoxSize {
        BoxSize::new(self.w * self.scale, self.h * self.scale)
    }
}

use serde::{Deserialize, Serialize};

mod barcode;
mod image;
mod text;

pub use barcode::{BarcodeElement, BarcodeFormat};
pub use image::ImageElement;
pub use text::{TextAlign, TextElement};

/// A point in card pixel coordinates (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Effective width and height of an element's box, after scale and captions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSize {
    pub w: f64,
    pub h: f64,
}

impl BoxSize {
    pub fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    pub fn half_w(&self) -> f64 {
        self.w / 2.0
    }

    pub fn half_h(&self) -> f64 {
        self.h / 2.0
    }
}

/// A placed element on the card.
///
/// The header (`id`, `name`, center and rotation) is shared by every variant;
/// the variant data is flattened next to it so the JSON form carries a single
/// `type` tag, e.g. `{"id":"logo","type":"image","x":525,...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub x: f64,
    pub y: f64,
    /// Degrees, positive clockwise. Never normalized.
    #[serde(default)]
    pub rotation: f64,
    #[serde(flatten)]
    pub kind: ElementKind,
}

/// Variant data of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Image(ImageElement),
    Text(TextElement),
    Barcode(BarcodeElement),
}

impl Element {
    pub fn new(id: impl Into<String>, name: impl Into<String>, x: f64, y: f64, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            x,
            y,
            rotation: 0.0,
            kind,
        }
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Lower-case variant tag as written to JSON.
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            ElementKind::Image(_) => "image",
            ElementKind::Text(_) => "text",
            ElementKind::Barcode(_) => "barcode",
        }
    }

    /// Display label: the name when set, otherwise the id.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    pub fn as_image(&self) -> Option<&ImageElement> {
        match &self.kind {
            ElementKind::Image(img) => Some(img),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextElement> {
        match &self.kind {
            ElementKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextElement> {
        match &mut self.kind {
            ElementKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_barcode(&self) -> Option<&BarcodeElement> {
        match &self.kind {
            ElementKind::Barcode(bc) => Some(bc),
            _ => None,
        }
    }

    pub fn as_barcode_mut(&mut self) -> Option<&mut BarcodeElement> {
        match &mut self.kind {
            ElementKind::Barcode(bc) => Some(bc),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text(_))
    }

    pub fn is_barcode(&self) -> bool {
        matches!(self.kind, ElementKind::Barcode(_))
    }
}

fn default_scale() -> f64 {
    1.0
}

//! Card template document.
//!
//! The template is the single source of truth for a card: page size, style,
//! editor preferences and the ordered element list. It serializes to the
//! camelCase JSON format used by saved templates and autosaved sessions.

use cardkit_core::constants::{
    CARD_HEIGHT_PX, CARD_WIDTH_PX, DEFAULT_GRID_SIZE, TEMPLATE_VERSION,
};
use cardkit_core::DocumentError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::model::{
    BarcodeElement, BarcodeFormat, Element, ElementKind, ImageElement, TextAlign, TextElement,
};

/// Sections a template must carry to be accepted from outside.
const REQUIRED_SECTIONS: [&str; 3] = ["elements", "style", "page"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub created: String,
}

fn default_version() -> String {
    TEMPLATE_VERSION.to_string()
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            version: default_version(),
            created: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Card dimensions in pixels. Fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub card_width_px: f64,
    pub card_height_px: f64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            card_width_px: CARD_WIDTH_PX,
            card_height_px: CARD_HEIGHT_PX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    #[default]
    None,
    Solid,
    Gradient,
    Stripes,
    Dots,
}

impl std::str::FromStr for PatternKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "solid" => Ok(Self::Solid),
            "gradient" => Ok(Self::Gradient),
            "stripes" => Ok(Self::Stripes),
            "dots" => Ok(Self::Dots),
            other => Err(format!("unknown pattern '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    #[serde(rename = "type", default)]
    pub kind: PatternKind,
    #[serde(default = "default_color1")]
    pub color1: String,
    #[serde(default = "default_color2")]
    pub color2: String,
}

fn default_color1() -> String {
    "#ffffff".to_string()
}

fn default_color2() -> String {
    "#e2e8f0".to_string()
}

impl Default for Pattern {
    fn default() -> Self {
        Self {
            kind: PatternKind::None,
            color1: default_color1(),
            color2: default_color2(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Border {
    #[serde(default)]
    pub on: bool,
    #[serde(default = "default_border_color")]
    pub color: String,
    #[serde(default = "default_border_thickness")]
    pub thickness: f64,
}

fn default_border_color() -> String {
    "#222222".to_string()
}

fn default_border_thickness() -> f64 {
    2.0
}

impl Default for Border {
    fn default() -> Self {
        Self {
            on: true,
            color: default_border_color(),
            thickness: default_border_thickness(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default)]
    pub pattern: Pattern,
    #[serde(default)]
    pub border: Border,
    #[serde(default)]
    pub drop_shadow: bool,
    #[serde(default)]
    pub corner_radius: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            pattern: Pattern::default(),
            border: Border::default(),
            drop_shadow: true,
            corner_radius: 6.0,
        }
    }
}

/// Editor-only preferences. Saved with the card, never printed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorPrefs {
    #[serde(default = "default_true")]
    pub show_grid: bool,
    #[serde(default = "default_grid_size")]
    pub grid_size: u32,
    #[serde(default = "default_true")]
    pub snap_to_grid: bool,
}

fn default_true() -> bool {
    true
}

fn default_grid_size() -> u32 {
    DEFAULT_GRID_SIZE
}

impl Default for EditorPrefs {
    fn default() -> Self {
        Self {
            show_grid: true,
            grid_size: DEFAULT_GRID_SIZE,
            snap_to_grid: true,
        }
    }
}

impl EditorPrefs {
    /// Grid pitch as a float, never below 1.
    pub fn pitch(&self) -> f64 {
        self.grid_size.max(1) as f64
    }

    /// Snap `v` to the grid when snapping is enabled.
    pub fn snap(&self, v: f64) -> f64 {
        if self.snap_to_grid {
            snap_to(v, self.pitch())
        } else {
            v
        }
    }
}

/// Round `v` to the nearest multiple of `pitch`; exact halves round up.
pub fn snap_to(v: f64, pitch: f64) -> f64 {
    (v / pitch + 0.5).floor() * pitch
}

/// The card document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub meta: Meta,
    pub page: Page,
    pub style: Style,
    #[serde(default)]
    pub editor: EditorPrefs,
    pub elements: Vec<Element>,
}

impl Default for Template {
    fn default() -> Self {
        Self::with_default_elements()
    }
}

impl Template {
    /// An empty card with default page, style and editor settings.
    pub fn empty() -> Self {
        Self {
            meta: Meta::default(),
            page: Page::default(),
            style: Style::default(),
            editor: EditorPrefs::default(),
            elements: Vec::new(),
        }
    }

    /// The starter layout: logo, name and linked barcode.
    pub fn with_default_elements() -> Self {
        let mut template = Self::empty();
        template.ensure_defaults();
        template
    }

    /// Populate the starter elements when the card has none.
    pub fn ensure_defaults(&mut self) {
        if !self.elements.is_empty() {
            return;
        }
        let cx = self.page.card_width_px / 2.0;
        self.elements.push(Element::new(
            "logo",
            "Logo",
            cx,
            120.0,
            ElementKind::Image(ImageElement::new("your-logo.png", 520.0, 160.0)),
        ));
        self.elements.push(Element::new(
            "barcode",
            "Barcode",
            cx,
            470.0,
            ElementKind::Barcode(BarcodeElement::new(
                "5551234567",
                BarcodeFormat::Code128,
                520.0,
                70.0,
            )),
        ));
        self.elements.push(Element::new(
            "name",
            "Name",
            cx,
            330.0,
            ElementKind::Text(TextElement {
                text: "Sample Name".to_string(),
                font_size: 48.0,
                font_family: "Arial".to_string(),
                weight: 700,
                align: TextAlign::Center,
                color: "#111111".to_string(),
            }),
        ));
    }

    /// Parse and validate a template from untrusted JSON.
    ///
    /// The three structural sections must be present; `meta` and `editor`
    /// fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| DocumentError::Malformed {
                reason: e.to_string(),
            })?;
        let Some(obj) = value.as_object() else {
            return Err(DocumentError::Malformed {
                reason: "template root must be an object".to_string(),
            });
        };
        for section in REQUIRED_SECTIONS {
            if obj.get(section).map_or(true, |v| v.is_null()) {
                return Err(DocumentError::MissingSection {
                    section: section.to_string(),
                });
            }
        }
        let template: Template =
            serde_json::from_value(value).map_err(|e| DocumentError::Malformed {
                reason: e.to_string(),
            })?;
        template.validate()?;
        Ok(template)
    }

    /// Compact JSON, used for history snapshots and autosave.
    pub fn to_snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Pretty JSON, used for file export.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.editor.grid_size == 0 {
            return Err(DocumentError::InvalidGrid { size: 0 });
        }
        let (w, h) = (self.page.card_width_px, self.page.card_height_px);
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(DocumentError::InvalidPage {
                width: w,
                height: h,
            });
        }
        let mut seen = HashSet::with_capacity(self.elements.len());
        for (index, el) in self.elements.iter().enumerate() {
            if el.id.is_empty() {
                return Err(DocumentError::EmptyId { index });
            }
            if !seen.insert(el.id.as_str()) {
                return Err(DocumentError::DuplicateId { id: el.id.clone() });
            }
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.page.card_width_px
    }

    pub fn height(&self) -> f64 {
        self.page.card_height_px
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    /// Append an element on top of the paint order.
    pub fn append(&mut self, element: Element) -> Result<(), DocumentError> {
        if element.id.is_empty() {
            return Err(DocumentError::EmptyId {
                index: self.elements.len(),
            });
        }
        if self.contains(&element.id) {
            return Err(DocumentError::DuplicateId { id: element.id });
        }
        self.elements.push(element);
        Ok(())
    }

    /// Remove by identity, returning the removed element.
    pub fn remove(&mut self, id: &str) -> Result<Element, DocumentError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| DocumentError::UnknownElement { id: id.to_string() })?;
        Ok(self.elements.remove(index))
    }

    /// Name element used for record substitution: a text element whose id is
    /// `name` or whose display name contains "name".
    pub fn name_element_index(&self) -> Option<usize> {
        self.elements.iter().position(|e| {
            e.is_text() && (e.id == "name" || e.name.to_lowercase().contains("name"))
        })
    }

    /// First barcode element in paint order.
    pub fn first_barcode_index(&self) -> Option<usize> {
        self.elements.iter().position(Element::is_barcode)
    }
}

//! # CardKit Designer
//!
//! Layout editor core for a single business card. A card is a small document
//! of images, text blocks and barcodes placed on a fixed-size page; this
//! crate hit-tests and edits that document, keeps an undo history of it and
//! renders it to pixels.
//!
//! ## Core Components
//!
//! - **Model / Template**: element types and the JSON document format
//! - **Geometry**: local frames, effective boxes and rotated hit-testing
//! - **History**: bounded snapshot undo/redo
//! - **Designer State**: the [`EditorSession`] that routes pointer, keyboard
//!   and inspector input into edits
//! - **Renderer**: tiny-skia rasterization of the live card and print output
//! - **Codec**: CODE128 and QR symbol generation with a per-element cache
//! - **Sheet**: imposition of rendered cards onto printable pages
//!
//! ## Architecture
//!
//! ```text
//! EditorSession
//!   ├── Template (elements, style, editor prefs)
//!   ├── History (serialized snapshots)
//!   ├── SymbolCache (barcode / QR rasters, QR worker thread)
//!   ├── ImageStore (decoded logos)
//!   └── SessionStore (autosave)
//!
//! render_card(template) -> Pixmap -> PNG
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cardkit_designer::{EditorSession, Point};
//!
//! let mut session = EditorSession::new();
//! session.pointer_down(Point::new(525.0, 330.0));
//! session.pointer_move(Point::new(545.0, 350.0));
//! session.pointer_up();
//! let pixmap = session.render()?;
//! ```

pub mod codec;
pub mod designer_state;
pub mod font_manager;
pub mod geometry;
pub mod history;
pub mod image_store;
pub mod model;
pub mod renderer;
pub mod session_store;
pub mod sheet;
pub mod template;

pub use cardkit_core::{CodecError, DocumentError, Error, HandleMetrics, Result};
pub use codec::{SymbolCache, SymbolKey};
pub use designer_state::{
    CardRecord, Drag, DragKind, DragState, EditorSession, Key, KeyModifiers, NudgeDirection,
    PropertyEdit, SessionEvent, SizeAnchor, StyleEdit,
};
pub use geometry::{hit_test, Corner, Hit, HitKind};
pub use history::{Checkpoint, History};
pub use image_store::ImageStore;
pub use model::{
    BarcodeElement, BarcodeFormat, BoxSize, Element, ElementKind, ImageElement, Point, TextAlign,
    TextElement,
};
pub use renderer::{encode_png, render_card, save_png, RenderOptions};
pub use session_store::{FileSessionStore, MemorySessionStore, SessionStore};
pub use sheet::{render_sheets, SheetLayout};
pub use template::{Border, EditorPrefs, Page, Pattern, PatternKind, Style, Template};

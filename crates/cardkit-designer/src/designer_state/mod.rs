//! Editor session for UI integration.
//! Owns the live card and everything derived from it.
//!
//! This module is split into submodules:
//! - `interaction`: pointer-driven move/resize/rotate state machine
//! - `actions`: nudge, rotate, add/delete, logo, keyboard shortcuts
//! - `properties`: inspector field edits on the selected element
//! - `style`: card style and editor preference edits
//! - `history`: checkpoint, undo/redo, autosave
//! - `file_io`: import/export, session restore, reset
//! - `records`: per-record render cycle for bulk output

mod actions;
mod file_io;
mod history;
mod interaction;
mod properties;
mod records;
mod style;

pub use actions::{Key, KeyModifiers, NudgeDirection};
pub use interaction::{Drag, DragKind, DragState, SizeAnchor};
pub use properties::PropertyEdit;
pub use records::CardRecord;
pub use style::StyleEdit;

use cardkit_core::{HandleMetrics, Result};
use tiny_skia::Pixmap;

use crate::codec::SymbolCache;
use crate::history::History;
use crate::image_store::ImageStore;
use crate::model::Element;
use crate::renderer::{render_card, RenderOptions};
use crate::session_store::SessionStore;
use crate::template::Template;

/// Side effects a host should react to after an editor call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The card needs to be repainted.
    RenderNeeded,
    /// Selection moved to the given element, or was cleared.
    SelectionChanged(Option<String>),
    /// The whole document was swapped (undo/redo, import, reset).
    DocumentReplaced,
    /// Undo/redo availability may have changed.
    HistoryChanged { can_undo: bool, can_redo: bool },
}

/// One editing session over a single card.
///
/// Sessions share nothing; two sessions can be driven side by side.
pub struct EditorSession {
    pub(crate) template: Template,
    pub(crate) history: History,
    pub(crate) selected: Option<String>,
    pub(crate) drag: DragState,
    pub(crate) symbols: SymbolCache,
    pub(crate) images: ImageStore,
    pub(crate) metrics: HandleMetrics,
    pub(crate) store: Option<Box<dyn SessionStore>>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("elements", &self.template.elements.len())
            .field("selected", &self.selected)
            .field("drag", &self.drag)
            .field("history", &self.history)
            .field("symbols", &self.symbols)
            .field("autosave", &self.store.is_some())
            .finish()
    }
}

impl EditorSession {
    /// Creates a session on the starter layout.
    pub fn new() -> Self {
        Self::with_template(Template::with_default_elements())
    }

    /// Creates a session on an existing template. History starts with one entry.
    pub fn with_template(template: Template) -> Self {
        let mut session = Self {
            template,
            history: History::default(),
            selected: None,
            drag: DragState::Idle,
            symbols: SymbolCache::new(),
            images: ImageStore::new(),
            metrics: HandleMetrics::default(),
            store: None,
        };
        session.reset_history();
        session
    }

    /// Replace the handle metrics used for hit-testing and handle drawing.
    pub fn with_metrics(mut self, metrics: HandleMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Change the history depth. Resets the history to the current document.
    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history = History::new(depth);
        self.reset_history();
        self
    }

    /// Attach an autosave store.
    pub fn with_store(mut self, store: Box<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn metrics(&self) -> &HandleMetrics {
        &self.metrics
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn symbols(&self) -> &SymbolCache {
        &self.symbols
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut ImageStore {
        &mut self.images
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging(_))
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.as_deref().and_then(|id| self.template.get(id))
    }

    pub(crate) fn selected_element_mut(&mut self) -> Option<&mut Element> {
        let id = self.selected.as_deref()?;
        self.template.elements.iter_mut().find(|e| e.id == id)
    }

    /// Select an element by id. Unknown ids clear the selection.
    pub fn select(&mut self, id: &str) -> Vec<SessionEvent> {
        self.selected = self.template.contains(id).then(|| id.to_string());
        vec![
            SessionEvent::SelectionChanged(self.selected.clone()),
            SessionEvent::RenderNeeded,
        ]
    }

    pub fn clear_selection(&mut self) -> Vec<SessionEvent> {
        self.selected = None;
        vec![SessionEvent::SelectionChanged(None), SessionEvent::RenderNeeded]
    }

    /// Paint the live card, with grid and selection handles.
    pub fn render(&mut self) -> Result<Pixmap> {
        let options = RenderOptions {
            selected: self.selected.as_deref(),
            suppress_grid: false,
        };
        render_card(
            &self.template,
            &mut self.symbols,
            &self.images,
            &self.metrics,
            &options,
        )
    }

    /// Install finished background symbols; asks for a repaint when any arrived.
    pub fn poll_symbols(&mut self) -> Vec<SessionEvent> {
        if self.symbols.poll() {
            vec![SessionEvent::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    pub(crate) fn history_event(&self) -> SessionEvent {
        SessionEvent::HistoryChanged {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        }
    }
}

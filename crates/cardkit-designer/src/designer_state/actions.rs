//! Button and keyboard actions. Each is one atomic edit followed by a checkpoint.

use cardkit_core::constants::ROTATE_STEP_DEG;
use cardkit_core::Result;
use std::path::Path;
use tracing::info;

use super::{EditorSession, SessionEvent};
use crate::model::{
    BarcodeElement, BarcodeFormat, Element, ElementKind, TextAlign, TextElement,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Keys the editor responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Delete,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

/// Modifier keys held with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyModifiers {
    pub ctrl: bool,
    /// Cmd on macOS.
    pub meta: bool,
    pub shift: bool,
}

impl KeyModifiers {
    fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

fn unique_id(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}

impl EditorSession {
    fn after_edit(&mut self) -> Vec<SessionEvent> {
        self.checkpoint();
        vec![SessionEvent::RenderNeeded, self.history_event()]
    }

    /// Move the selection by one grid unit, then snap.
    pub fn nudge(&mut self, direction: NudgeDirection) -> Vec<SessionEvent> {
        let prefs = self.template.editor.clone();
        let step = prefs.pitch();
        let Some(el) = self.selected_element_mut() else {
            return Vec::new();
        };
        match direction {
            NudgeDirection::Up => el.y = prefs.snap(el.y - step),
            NudgeDirection::Down => el.y = prefs.snap(el.y + step),
            NudgeDirection::Left => el.x = prefs.snap(el.x - step),
            NudgeDirection::Right => el.x = prefs.snap(el.x + step),
        }
        self.after_edit()
    }

    /// Add `degrees` to the selection's rotation.
    pub fn rotate_by(&mut self, degrees: f64) -> Vec<SessionEvent> {
        let Some(el) = self.selected_element_mut() else {
            return Vec::new();
        };
        el.rotation += degrees;
        self.after_edit()
    }

    pub fn rotate_left(&mut self) -> Vec<SessionEvent> {
        self.rotate_by(-ROTATE_STEP_DEG)
    }

    pub fn rotate_right(&mut self) -> Vec<SessionEvent> {
        self.rotate_by(ROTATE_STEP_DEG)
    }

    /// Delete the selection if `confirm` agrees. A declined confirmation
    /// changes nothing.
    pub fn delete_selected<F>(&mut self, confirm: F) -> Vec<SessionEvent>
    where
        F: FnOnce(&Element) -> bool,
    {
        let Some(el) = self.selected_element() else {
            return Vec::new();
        };
        if !confirm(el) {
            return Vec::new();
        }
        let id = el.id.clone();
        if self.template.remove(&id).is_err() {
            return Vec::new();
        }
        self.symbols.invalidate(&id);
        self.selected = None;
        info!("Deleted element '{}'", id);
        let mut events = vec![SessionEvent::SelectionChanged(None)];
        events.extend(self.after_edit());
        events
    }

    fn add_element(&mut self, element: Element) -> Vec<SessionEvent> {
        let id = element.id.clone();
        if let Err(e) = self.template.append(element) {
            tracing::warn!("Cannot add element: {}", e);
            return Vec::new();
        }
        self.selected = Some(id.clone());
        let mut events = vec![SessionEvent::SelectionChanged(Some(id))];
        events.extend(self.after_edit());
        events
    }

    /// Add a "New Text" element at the card center and select it.
    pub fn add_text(&mut self) -> Vec<SessionEvent> {
        let (cx, cy) = (self.template.width() / 2.0, self.template.height() / 2.0);
        let text = TextElement {
            text: "New Text".to_string(),
            font_size: 24.0,
            font_family: "Arial".to_string(),
            weight: 400,
            align: TextAlign::Center,
            color: "#111".to_string(),
        };
        self.add_element(Element::new(unique_id("text"), "", cx, cy, ElementKind::Text(text)))
    }

    /// Add a CODE128 barcode at the card center and select it.
    pub fn add_barcode(&mut self) -> Vec<SessionEvent> {
        let (cx, cy) = (self.template.width() / 2.0, self.template.height() / 2.0);
        let mut barcode = BarcodeElement::new("5550000000", BarcodeFormat::Code128, 420.0, 60.0);
        barcode.text_color = "#000".to_string();
        self.add_element(Element::new(
            unique_id("barcode"),
            "",
            cx,
            cy,
            ElementKind::Barcode(barcode),
        ))
    }

    /// Flip whether the selected barcode shows its value as a caption.
    pub fn toggle_linked_text(&mut self) -> Vec<SessionEvent> {
        let Some(bc) = self.selected_element_mut().and_then(Element::as_barcode_mut) else {
            return Vec::new();
        };
        bc.linked_text = !bc.linked_text;
        self.after_edit()
    }

    /// Point every image element at `src`.
    pub fn set_logo(&mut self, src: &str) -> Vec<SessionEvent> {
        for el in &mut self.template.elements {
            if let ElementKind::Image(img) = &mut el.kind {
                img.src = src.to_string();
            }
        }
        self.after_edit()
    }

    /// Decode a logo file into the image store and use it for every image element.
    pub fn load_logo(&mut self, path: &Path) -> Result<Vec<SessionEvent>> {
        let name = self.images.load_file(path)?;
        info!("Loaded logo '{}'", name);
        Ok(self.set_logo(&name))
    }

    /// Keyboard shortcuts. `confirm` is consulted before a delete.
    pub fn handle_key<F>(&mut self, key: Key, mods: KeyModifiers, confirm: F) -> Vec<SessionEvent>
    where
        F: FnOnce(&Element) -> bool,
    {
        match key {
            Key::Char(c) if mods.command() => match c.to_ascii_lowercase() {
                'z' if mods.shift => self.redo(),
                'z' => self.undo(),
                'y' => self.redo(),
                _ => Vec::new(),
            },
            Key::Char('[') => self.rotate_left(),
            Key::Char(']') => self.rotate_right(),
            Key::Char(_) => Vec::new(),
            Key::Delete => self.delete_selected(confirm),
            Key::Escape => self.cancel_drag(),
            Key::ArrowUp => self.nudge(NudgeDirection::Up),
            Key::ArrowDown => self.nudge(NudgeDirection::Down),
            Key::ArrowLeft => self.nudge(NudgeDirection::Left),
            Key::ArrowRight => self.nudge(NudgeDirection::Right),
        }
    }
}

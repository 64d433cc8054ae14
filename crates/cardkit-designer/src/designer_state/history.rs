//! Checkpoint, undo/redo and autosave for the editor session.

use tracing::{debug, warn};

use super::{DragState, EditorSession, SessionEvent};
use crate::history::Checkpoint;
use crate::template::Template;

impl EditorSession {
    /// Snapshot the document into history. A recorded snapshot is also
    /// handed to the autosave store.
    pub fn checkpoint(&mut self) -> Checkpoint {
        let snapshot = match self.template.to_snapshot() {
            Ok(s) => s,
            Err(e) => {
                warn!("Failed to serialize template for history: {}", e);
                return Checkpoint::Unchanged;
            }
        };
        let outcome = self.history.checkpoint(snapshot);
        if outcome == Checkpoint::Recorded {
            debug!(
                "Checkpoint {} of {}",
                self.history.cursor() + 1,
                self.history.len()
            );
            self.autosave();
        }
        outcome
    }

    /// Checkpoint after a batch of inspector edits.
    pub fn commit(&mut self) -> Vec<SessionEvent> {
        self.checkpoint();
        vec![self.history_event()]
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> Vec<SessionEvent> {
        let Some(snapshot) = self.history.undo().map(str::to_owned) else {
            return Vec::new();
        };
        self.restore_snapshot(&snapshot)
    }

    pub fn redo(&mut self) -> Vec<SessionEvent> {
        let Some(snapshot) = self.history.redo().map(str::to_owned) else {
            return Vec::new();
        };
        self.restore_snapshot(&snapshot)
    }

    fn restore_snapshot(&mut self, snapshot: &str) -> Vec<SessionEvent> {
        match serde_json::from_str::<Template>(snapshot) {
            Ok(template) => {
                let mut events = self.replace_document(template);
                events.push(self.history_event());
                events
            }
            Err(e) => {
                warn!("Discarding unreadable history entry: {}", e);
                Vec::new()
            }
        }
    }

    /// Swap in a whole document: selection and any gesture are dropped and
    /// symbols for vanished barcodes are pruned. History is left alone.
    pub(crate) fn replace_document(&mut self, template: Template) -> Vec<SessionEvent> {
        self.template = template;
        self.selected = None;
        self.drag = DragState::Idle;
        self.symbols.prune(&self.template.elements);
        vec![
            SessionEvent::DocumentReplaced,
            SessionEvent::SelectionChanged(None),
            SessionEvent::RenderNeeded,
        ]
    }

    /// Seed history with the current document as its only entry.
    pub(crate) fn reset_history(&mut self) {
        match self.template.to_snapshot() {
            Ok(s) => self.history.reset(s),
            Err(e) => warn!("Failed to serialize template for history: {}", e),
        }
    }

    /// Best-effort write of the current document to the autosave store.
    pub(crate) fn autosave(&mut self) {
        let Some(store) = self.store.as_mut() else {
            return;
        };
        let snapshot = match self.template.to_snapshot() {
            Ok(s) => s,
            Err(e) => {
                warn!("Autosave skipped: {}", e);
                return;
            }
        };
        if let Err(e) = store.save(&snapshot) {
            warn!("Autosave failed: {}", e);
        }
    }
}

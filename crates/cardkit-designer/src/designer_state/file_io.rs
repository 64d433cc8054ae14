//! File I/O (import, export, session restore, reset) for the editor session.

use cardkit_core::{DocumentError, HandleMetrics, Result};
use std::path::Path;
use tracing::{info, warn};

use super::{EditorSession, SessionEvent};
use crate::session_store::SessionStore;
use crate::template::Template;

impl EditorSession {
    /// Open a session from an autosave store.
    ///
    /// A missing, unreadable or incomplete stored session falls back to the
    /// starter layout, which is then written back to the store.
    pub fn restore(store: Box<dyn SessionStore>, metrics: HandleMetrics, history_depth: usize) -> Self {
        let restored = match store.load() {
            Ok(Some(json)) => match Template::from_json(&json) {
                Ok(template) => Some(template),
                Err(e) => {
                    warn!("Ignoring stored session: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Cannot read stored session: {}", e);
                None
            }
        };

        let fresh = restored.is_none();
        let template = restored.unwrap_or_else(Template::with_default_elements);
        let mut session = Self::with_template(template)
            .with_metrics(metrics)
            .with_history_depth(history_depth)
            .with_store(store);
        if fresh {
            session.autosave();
        } else {
            info!(
                "Restored session with {} elements",
                session.template.elements.len()
            );
        }
        session
    }

    /// Replace the document with a template parsed from JSON.
    ///
    /// On error the current document, selection and history are untouched.
    pub fn import_json(&mut self, json: &str) -> std::result::Result<Vec<SessionEvent>, DocumentError> {
        let template = Template::from_json(json)?;
        let mut events = self.replace_document(template);
        self.reset_history();
        events.push(self.history_event());
        info!("Imported template with {} elements", self.template.elements.len());
        Ok(events)
    }

    pub fn import_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<SessionEvent>> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Ok(self.import_json(&json)?)
    }

    /// The current document as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String> {
        Ok(self.template.to_pretty_json()?)
    }

    pub fn export_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.export_json()?;
        std::fs::write(path.as_ref(), json)?;
        info!("Exported template to {}", path.as_ref().display());
        Ok(())
    }

    /// Go back to the starter layout if `confirm` agrees.
    ///
    /// History restarts from the fresh document; the stored session is
    /// cleared and replaced with it.
    pub fn reset_to_defaults<F>(&mut self, confirm: F) -> Vec<SessionEvent>
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            return Vec::new();
        }
        let mut events = self.replace_document(Template::with_default_elements());
        self.reset_history();
        if let Some(store) = self.store.as_mut() {
            if let Err(e) = store.clear() {
                warn!("Failed to clear stored session: {}", e);
            }
        }
        self.autosave();
        events.push(self.history_event());
        info!("Reset to default layout");
        events
    }
}

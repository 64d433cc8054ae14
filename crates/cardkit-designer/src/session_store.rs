//! Autosave persistence for the live document.
//!
//! The editor hands a serialized snapshot to a [`SessionStore`] after every
//! recorded checkpoint. Stores are best-effort: a failing store never blocks
//! an edit, the session only logs the failure.

use cardkit_core::Result;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Where autosaved sessions live.
pub trait SessionStore: Send {
    /// Persist a serialized template.
    fn save(&mut self, snapshot: &str) -> Result<()>;

    /// The last persisted snapshot, if any.
    fn load(&self) -> Result<Option<String>>;

    /// Forget the persisted snapshot.
    fn clear(&mut self) -> Result<()>;
}

/// Stores the session as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn save(&mut self, snapshot: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        // Write-then-rename so a crash never leaves a truncated session.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, snapshot)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&mut self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store. Clones share the same slot, so a test can keep a handle
/// and inspect what the session wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    slot: Arc<Mutex<Option<String>>>,
    saves: Arc<Mutex<usize>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with an existing snapshot.
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        let store = Self::default();
        *store.slot.lock().unwrap_or_else(|p| p.into_inner()) = Some(snapshot.into());
        store
    }

    pub fn snapshot(&self) -> Option<String> {
        self.slot.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&mut self, snapshot: &str) -> Result<()> {
        *self.slot.lock().unwrap_or_else(|p| p.into_inner()) = Some(snapshot.to_string());
        *self.saves.lock().unwrap_or_else(|p| p.into_inner()) += 1;
        Ok(())
    }

    fn load(&self) -> Result<Option<String>> {
        Ok(self.snapshot())
    }

    fn clear(&mut self) -> Result<()> {
        *self.slot.lock().unwrap_or_else(|p| p.into_inner()) = None;
        Ok(())
    }
}

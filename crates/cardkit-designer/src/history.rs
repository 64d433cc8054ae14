//! Snapshot undo/redo history.
//!
//! Each entry is the full serialized document. Whole-document snapshots keep
//! restore trivially correct at the cost of memory per entry, which is fine
//! for the handful of elements a card carries.

use cardkit_core::constants::HISTORY_DEPTH;

/// Outcome of a checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    /// A new entry was appended.
    Recorded,
    /// Identical to the entry at the cursor; nothing changed.
    Unchanged,
}

/// Bounded snapshot history with a cursor.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<String>,
    cursor: usize,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(HISTORY_DEPTH)
    }
}

impl History {
    /// Creates an empty history holding at most `capacity` snapshots.
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Discard everything and seed with one snapshot.
    pub fn reset(&mut self, snapshot: String) {
        self.snapshots.clear();
        self.snapshots.push(snapshot);
        self.cursor = 0;
    }

    /// Record a snapshot unless it equals the one at the cursor.
    ///
    /// A duplicate leaves the redo branch intact. Otherwise entries after the
    /// cursor are dropped, the snapshot is appended and the oldest entry is
    /// evicted once the capacity is exceeded.
    pub fn checkpoint(&mut self, snapshot: String) -> Checkpoint {
        if self.current() == Some(snapshot.as_str()) {
            return Checkpoint::Unchanged;
        }
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.cursor + 1);
        }
        self.snapshots.push(snapshot);
        if self.snapshots.len() > self.capacity {
            let overflow = self.snapshots.len() - self.capacity;
            self.snapshots.drain(..overflow);
        }
        self.cursor = self.snapshots.len() - 1;
        Checkpoint::Recorded
    }

    /// Step back, returning the snapshot to restore.
    pub fn undo(&mut self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.current()
    }

    /// Step forward, returning the snapshot to restore.
    pub fn redo(&mut self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.current()
    }

    pub fn current(&self) -> Option<&str> {
        self.snapshots.get(self.cursor).map(String::as_str)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0 && !self.snapshots.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

//! Barcode symbol side-cache.
//!
//! Symbols are derived data and never part of the document. The cache is
//! keyed by element id; each entry remembers the `(format, value, size)` it
//! was produced for so a changed element is detected on lookup.
//!
//! CODE128 is cheap and rendered inline. QR generation is handed to a
//! background worker thread; finished symbols come back over a channel and
//! are installed by [`SymbolCache::poll`]. The worker only ever sees owned
//! strings, so the document and the history are never touched off-thread.

pub mod code128;
pub mod qr;

use cardkit_core::CodecError;
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tiny_skia::Pixmap;
use tracing::{debug, warn};

use crate::model::{BarcodeElement, BarcodeFormat, Element, ElementKind};
use crate::template::Template;

/// What a cached symbol was rendered for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolKey {
    pub format: BarcodeFormat,
    pub value: String,
    pub width: u32,
    pub height: u32,
}

impl SymbolKey {
    pub fn for_barcode(bc: &BarcodeElement) -> Self {
        match bc.format {
            BarcodeFormat::Qr => {
                let side = bc.qr_side();
                Self {
                    format: BarcodeFormat::Qr,
                    value: bc.value.clone(),
                    width: side,
                    height: side,
                }
            }
            BarcodeFormat::Code128 => {
                let size = bc.symbol_size();
                Self {
                    format: BarcodeFormat::Code128,
                    value: bc.value.clone(),
                    width: size.w.round().max(1.0) as u32,
                    height: size.h.round().max(1.0) as u32,
                }
            }
        }
    }

    /// Same symbol content, possibly at a different size.
    fn same_content(&self, other: &SymbolKey) -> bool {
        self.format == other.format && self.value == other.value
    }
}

/// A rendered symbol and the key it was rendered for.
#[derive(Debug, Clone)]
pub struct CachedSymbol {
    pub key: SymbolKey,
    pub pixmap: Arc<Pixmap>,
}

/// Render a symbol synchronously.
pub fn render_symbol(key: &SymbolKey) -> Result<Pixmap, CodecError> {
    match key.format {
        BarcodeFormat::Code128 => code128::render(&key.value, key.width, key.height),
        BarcodeFormat::Qr => qr::render(&key.value, key.width),
    }
}

struct SymbolJob {
    id: String,
    key: SymbolKey,
}

struct SymbolDone {
    id: String,
    key: SymbolKey,
    result: Result<Pixmap, CodecError>,
}

struct SymbolWorker {
    jobs: Sender<SymbolJob>,
    done: Receiver<SymbolDone>,
}

impl SymbolWorker {
    fn spawn() -> std::io::Result<Self> {
        let (job_tx, job_rx) = mpsc::channel::<SymbolJob>();
        let (done_tx, done_rx) = mpsc::channel::<SymbolDone>();
        thread::Builder::new()
            .name("cardkit-qr".to_string())
            .spawn(move || {
                // Exits once the cache (and with it the job sender) is dropped.
                while let Ok(job) = job_rx.recv() {
                    let result = render_symbol(&job.key);
                    let done = SymbolDone {
                        id: job.id,
                        key: job.key,
                        result,
                    };
                    if done_tx.send(done).is_err() {
                        break;
                    }
                }
            })?;
        Ok(Self {
            jobs: job_tx,
            done: done_rx,
        })
    }
}

/// Per-element symbol cache with an asynchronous QR path.
#[derive(Default)]
pub struct SymbolCache {
    entries: HashMap<String, CachedSymbol>,
    pending: HashMap<String, SymbolKey>,
    failed: HashMap<String, SymbolKey>,
    worker: Option<SymbolWorker>,
}

impl std::fmt::Debug for SymbolCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolCache")
            .field("entries", &self.entries.len())
            .field("pending", &self.pending.len())
            .field("failed", &self.failed.len())
            .finish()
    }
}

impl SymbolCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Symbol to draw for a barcode element, if one is available.
    ///
    /// CODE128 is rendered on the spot. For QR a fresh entry is returned
    /// directly; otherwise generation is queued and any older entry for the
    /// same content is returned so the element keeps its look while it
    /// regenerates at the new size.
    pub fn symbol_for(&mut self, id: &str, bc: &BarcodeElement) -> Option<Arc<Pixmap>> {
        let key = SymbolKey::for_barcode(bc);

        if let Some(entry) = self.entries.get(id) {
            if entry.key == key {
                return Some(entry.pixmap.clone());
            }
        }
        let failed = self.failed.get(id) == Some(&key);

        match key.format {
            BarcodeFormat::Code128 if failed => None,
            BarcodeFormat::Code128 => self.render_now(id, key),
            BarcodeFormat::Qr => {
                if !failed {
                    self.request(id, key.clone());
                }
                self.entries
                    .get(id)
                    .filter(|e| e.key.same_content(&key))
                    .map(|e| e.pixmap.clone())
            }
        }
    }

    fn render_now(&mut self, id: &str, key: SymbolKey) -> Option<Arc<Pixmap>> {
        match render_symbol(&key) {
            Ok(pixmap) => {
                let pixmap = Arc::new(pixmap);
                self.failed.remove(id);
                self.entries.insert(
                    id.to_string(),
                    CachedSymbol {
                        key,
                        pixmap: pixmap.clone(),
                    },
                );
                Some(pixmap)
            }
            Err(e) => {
                warn!("Symbol for '{}' could not be rendered: {}", id, e);
                // A QR entry stays so the last good symbol keeps showing.
                if key.format == BarcodeFormat::Code128 {
                    self.entries.remove(id);
                }
                self.failed.insert(id.to_string(), key);
                None
            }
        }
    }

    /// Queue background generation unless the same key is already pending.
    fn request(&mut self, id: &str, key: SymbolKey) {
        if self.pending.get(id) == Some(&key) {
            return;
        }
        if self.worker.is_none() {
            match SymbolWorker::spawn() {
                Ok(worker) => self.worker = Some(worker),
                Err(e) => {
                    warn!("QR worker unavailable, rendering inline: {}", e);
                    self.render_now(id, key);
                    return;
                }
            }
        }
        let Some(worker) = &self.worker else {
            return;
        };
        let job = SymbolJob {
            id: id.to_string(),
            key: key.clone(),
        };
        if worker.jobs.send(job).is_err() {
            warn!("QR worker stopped, rendering inline");
            self.worker = None;
            self.render_now(id, key);
            return;
        }
        debug!("Queued QR symbol for '{}' at {}px", id, key.width);
        self.pending.insert(id.to_string(), key);
    }

    fn install(&mut self, done: SymbolDone) -> bool {
        if self.pending.get(&done.id) != Some(&done.key) {
            // Superseded or invalidated while in flight.
            return false;
        }
        self.pending.remove(&done.id);
        match done.result {
            Ok(pixmap) => {
                self.failed.remove(&done.id);
                self.entries.insert(
                    done.id,
                    CachedSymbol {
                        key: done.key,
                        pixmap: Arc::new(pixmap),
                    },
                );
                true
            }
            Err(e) => {
                warn!("QR symbol for '{}' failed: {}", done.id, e);
                self.failed.insert(done.id, done.key);
                false
            }
        }
    }

    /// Install finished background symbols. Returns true when a redraw is due.
    pub fn poll(&mut self) -> bool {
        let mut finished = Vec::new();
        if let Some(worker) = &self.worker {
            while let Ok(done) = worker.done.try_recv() {
                finished.push(done);
            }
        }
        let mut redraw = false;
        for done in finished {
            redraw |= self.install(done);
        }
        redraw
    }

    /// Block until nothing is pending or `timeout` elapses.
    pub fn wait_idle(&mut self, timeout: Duration) -> Result<(), CodecError> {
        let deadline = Instant::now() + timeout;
        while !self.pending.is_empty() {
            let Some(worker) = &self.worker else {
                self.pending.clear();
                return Err(CodecError::WorkerGone);
            };
            let remaining = deadline.saturating_duration_since(Instant::now());
            match worker.done.recv_timeout(remaining) {
                Ok(done) => {
                    self.install(done);
                }
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    self.pending.clear();
                    self.worker = None;
                    return Err(CodecError::WorkerGone);
                }
            }
        }
        Ok(())
    }

    /// Make sure every barcode in the template has an up-to-date symbol,
    /// generating missing QR symbols synchronously.
    pub fn ensure_ready(&mut self, template: &Template) {
        for el in &template.elements {
            let ElementKind::Barcode(bc) = &el.kind else {
                continue;
            };
            let key = SymbolKey::for_barcode(bc);
            let fresh = self.entries.get(&el.id).is_some_and(|e| e.key == key);
            if fresh || self.failed.get(&el.id) == Some(&key) {
                continue;
            }
            self.pending.remove(&el.id);
            self.render_now(&el.id, key);
        }
    }

    /// Forget everything known about one element.
    pub fn invalidate(&mut self, id: &str) {
        self.entries.remove(id);
        self.pending.remove(id);
        self.failed.remove(id);
    }

    /// Drop state for elements that are no longer barcodes in `elements`.
    pub fn prune(&mut self, elements: &[Element]) {
        let keep = |id: &String| elements.iter().any(|e| &e.id == id && e.is_barcode());
        self.entries.retain(|id, _| keep(id));
        self.pending.retain(|id, _| keep(id));
        self.failed.retain(|id, _| keep(id));
    }

    /// Current entry for an element, for save/restore around temporary edits.
    pub fn entry(&self, id: &str) -> Option<CachedSymbol> {
        self.entries.get(id).cloned()
    }

    /// Put back an entry captured with [`SymbolCache::entry`].
    pub fn restore_entry(&mut self, id: &str, entry: Option<CachedSymbol>) {
        self.pending.remove(id);
        self.failed.remove(id);
        match entry {
            Some(entry) => {
                self.entries.insert(id.to_string(), entry);
            }
            None => {
                self.entries.remove(id);
            }
        }
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_cached(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

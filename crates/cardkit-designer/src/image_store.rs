//! Decoded bitmaps referenced by image elements.
//!
//! Elements only store a source name; the pixels live here, keyed by that
//! name, so the document stays small and serializable.

use cardkit_core::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tiny_skia::{IntSize, Pixmap};

#[derive(Debug, Default, Clone)]
pub struct ImageStore {
    images: HashMap<String, Arc<Pixmap>>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode encoded image bytes (PNG, JPEG, ...) and store them under `name`.
    pub fn insert_encoded(&mut self, name: impl Into<String>, bytes: &[u8]) -> Result<()> {
        let decoded = image::load_from_memory(bytes).map_err(|e| Error::Image(e.to_string()))?;
        let pixmap = rgba_to_pixmap(decoded.to_rgba8())?;
        self.images.insert(name.into(), Arc::new(pixmap));
        Ok(())
    }

    /// Read and decode a file; the file name becomes the source name.
    pub fn load_file(&mut self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::other(format!("Not a file path: {}", path.display())))?;
        self.insert_encoded(name.clone(), &bytes)?;
        Ok(name)
    }

    pub fn insert_pixmap(&mut self, name: impl Into<String>, pixmap: Pixmap) {
        self.images.insert(name.into(), Arc::new(pixmap));
    }

    pub fn get(&self, name: &str) -> Option<&Pixmap> {
        self.images.get(name).map(|p| p.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Straight-alpha RGBA into a premultiplied pixmap.
fn rgba_to_pixmap(rgba: image::RgbaImage) -> Result<Pixmap> {
    let (w, h) = rgba.dimensions();
    let mut data = rgba.into_raw();
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u16;
        px[0] = (px[0] as u16 * a / 255) as u8;
        px[1] = (px[1] as u16 * a / 255) as u8;
        px[2] = (px[2] as u16 * a / 255) as u8;
    }
    let size = IntSize::from_wh(w, h)
        .ok_or_else(|| Error::Image(format!("Invalid image size {}x{}", w, h)))?;
    Pixmap::from_vec(data, size).ok_or_else(|| Error::Image("Pixmap allocation failed".into()))
}

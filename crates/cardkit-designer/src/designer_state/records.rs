//! Per-record rendering for bulk output.
//!
//! Each record temporarily substitutes the name text and the first barcode
//! value, renders a print image and puts the document back exactly as it
//! was. Nothing here touches history or autosave.

use cardkit_core::Result;
use serde::{Deserialize, Serialize};
use tiny_skia::Pixmap;
use tracing::debug;

use super::EditorSession;
use crate::model::ElementKind;
use crate::renderer::{render_card, RenderOptions};

/// One row of bulk data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardRecord {
    /// Replaces the name text element.
    #[serde(default)]
    pub name: String,
    /// Replaces the first barcode's value.
    #[serde(default)]
    pub value: String,
}

impl CardRecord {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Record used when no data is supplied.
    pub fn sample() -> Self {
        Self::new("Sample Name", "5551234567")
    }
}

impl EditorSession {
    /// Render the current card for output: no handles, grid only on request,
    /// QR symbols generated synchronously.
    pub fn render_export(&mut self, show_grid: bool) -> Result<Pixmap> {
        self.symbols.ensure_ready(&self.template);
        let options = RenderOptions {
            suppress_grid: !show_grid,
            ..RenderOptions::export()
        };
        render_card(
            &self.template,
            &mut self.symbols,
            &self.images,
            &self.metrics,
            &options,
        )
    }

    /// Render the card for one record without grid or handles.
    pub fn render_record(&mut self, record: &CardRecord) -> Result<Pixmap> {
        let backup = self.template.elements.clone();
        let name_index = self.template.name_element_index();
        let barcode_index = self.template.first_barcode_index();
        let barcode_id = barcode_index.map(|i| self.template.elements[i].id.clone());
        let saved_symbol = barcode_id.as_deref().and_then(|id| self.symbols.entry(id));

        if let Some(i) = name_index {
            if let ElementKind::Text(text) = &mut self.template.elements[i].kind {
                text.text = record.name.clone();
            }
        }
        if let Some(i) = barcode_index {
            if let ElementKind::Barcode(bc) = &mut self.template.elements[i].kind {
                bc.value = record.value.clone();
            }
        }
        debug!("Rendering record '{}'", record.name);

        let rendered = self.render_export(false);

        self.template.elements = backup;
        if let Some(id) = barcode_id.as_deref() {
            self.symbols.restore_entry(id, saved_symbol);
        }
        rendered
    }

    /// Render every record in order; an empty slice renders the sample record.
    pub fn render_records(&mut self, records: &[CardRecord]) -> Result<Vec<Pixmap>> {
        if records.is_empty() {
            return Ok(vec![self.render_record(&CardRecord::sample())?]);
        }
        records.iter().map(|r| self.render_record(r)).collect()
    }
}

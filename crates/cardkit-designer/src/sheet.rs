//! Imposition of rendered cards onto printable sheets.
//!
//! Cards are placed in a grid on a portrait page with equal gutters, and
//! each card gets crop marks just outside its corners. All sheet geometry is
//! in points (1/72 in); rasterizing picks a DPI.

use cardkit_core::constants::MAX_RASTER_AREA;
use cardkit_core::{Error, Result};
use tiny_skia::{Color, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform};

/// Gap between the card edge and the start of a crop mark.
const CROP_GAP: f32 = 6.0;
/// Length of each crop mark.
const CROP_LEN: f32 = 10.0;

/// Page and card geometry in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub card_width: f32,
    pub card_height: f32,
    pub margin: f32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self::letter()
    }
}

impl SheetLayout {
    /// US Letter portrait with 3.5in x 2in cards and half-inch margins.
    pub fn letter() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            card_width: 3.5 * 72.0,
            card_height: 2.0 * 72.0,
            margin: 36.0,
        }
    }

    fn usable(&self) -> (f32, f32) {
        (
            self.page_width - 2.0 * self.margin,
            self.page_height - 2.0 * self.margin,
        )
    }

    /// Columns and rows that fit; at least one of each.
    pub fn grid(&self) -> (usize, usize) {
        let (uw, uh) = self.usable();
        let cols = (uw / self.card_width).floor().max(1.0) as usize;
        let rows = (uh / self.card_height).floor().max(1.0) as usize;
        (cols, rows)
    }

    pub fn per_page(&self) -> usize {
        let (cols, rows) = self.grid();
        cols * rows
    }

    /// Leftover space shared equally between the outer edges and the gaps.
    pub fn gutters(&self) -> (f32, f32) {
        let (uw, uh) = self.usable();
        let (cols, rows) = self.grid();
        (
            (uw - cols as f32 * self.card_width) / (cols as f32 + 1.0),
            (uh - rows as f32 * self.card_height) / (rows as f32 + 1.0),
        )
    }

    /// Top-left corner of slot `index` on its page.
    pub fn slot_origin(&self, index: usize) -> (f32, f32) {
        let (cols, _) = self.grid();
        let (gx, gy) = self.gutters();
        let idx = index % self.per_page();
        let (c, r) = ((idx % cols) as f32, (idx / cols) as f32);
        (
            self.margin + (c + 1.0) * gx + c * self.card_width,
            self.margin + (r + 1.0) * gy + r * self.card_height,
        )
    }

    pub fn page_count(&self, cards: usize) -> usize {
        cards.div_ceil(self.per_page())
    }
}

fn crop_marks(pb: &mut PathBuilder, x: f32, y: f32, w: f32, h: f32) {
    let g = CROP_GAP;
    let l = CROP_LEN;
    for (cx, cy, sx, sy) in [
        (x, y, -1.0, -1.0),
        (x + w, y, 1.0, -1.0),
        (x, y + h, -1.0, 1.0),
        (x + w, y + h, 1.0, 1.0),
    ] {
        // horizontal mark beside the corner, vertical mark above/below it
        pb.move_to(cx + sx * g, cy);
        pb.line_to(cx + sx * (g + l), cy);
        pb.move_to(cx, cy + sy * g);
        pb.line_to(cx, cy + sy * (g + l));
    }
}

/// Impose `cards` onto as many white pages as needed at `dpi`.
pub fn render_sheets(layout: &SheetLayout, cards: &[Pixmap], dpi: f32) -> Result<Vec<Pixmap>> {
    if dpi <= 0.0 || !dpi.is_finite() {
        return Err(Error::other(format!("Invalid sheet resolution {}", dpi)));
    }
    let scale = dpi / 72.0;
    let width = (layout.page_width * scale).round() as u32;
    let height = (layout.page_height * scale).round() as u32;
    if u64::from(width) * u64::from(height) > MAX_RASTER_AREA {
        return Err(Error::other(format!(
            "Sheet of {}x{} pixels at {} dpi is too large",
            width, height, dpi
        )));
    }

    let mut pages = Vec::with_capacity(layout.page_count(cards.len()));
    for chunk in cards.chunks(layout.per_page()) {
        let mut page = Pixmap::new(width, height)
            .ok_or_else(|| Error::other(format!("Cannot allocate {}x{} sheet", width, height)))?;
        page.fill(Color::WHITE);

        let mut marks = PathBuilder::new();
        for (i, card) in chunk.iter().enumerate() {
            let (x, y) = layout.slot_origin(i);
            let placed = Transform::from_scale(scale, scale)
                .pre_translate(x, y)
                .pre_scale(
                    layout.card_width / card.width() as f32,
                    layout.card_height / card.height() as f32,
                );
            let paint = PixmapPaint {
                quality: FilterQuality::Bilinear,
                ..PixmapPaint::default()
            };
            page.draw_pixmap(0, 0, card.as_ref(), &paint, placed, None);
            crop_marks(&mut marks, x, y, layout.card_width, layout.card_height);
        }

        if let Some(path) = marks.finish() {
            let mut paint = Paint::default();
            paint.set_color(Color::BLACK);
            let stroke = Stroke {
                width: 0.5,
                ..Default::default()
            };
            page.stroke_path(
                &path,
                &paint,
                &stroke,
                Transform::from_scale(scale, scale),
                None,
            );
        }
        pages.push(page);
    }
    Ok(pages)
}

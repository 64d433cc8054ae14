//! CODE128 symbols via `barcoders`.

use barcoders::sym::code128::Code128;
use cardkit_core::constants::MAX_SYMBOL_PX;
use cardkit_core::CodecError;
use tiny_skia::{Color, Paint, Pixmap, Rect, Transform};

/// Character set B covers printable ASCII, upper and lower case.
const CHARSET_B: char = '\u{0181}';

/// Encode `value` into module bits (1 = bar).
pub fn encode(value: &str) -> Result<Vec<u8>, CodecError> {
    if value.is_empty() {
        return Err(CodecError::EmptyValue);
    }
    let prefixed = format!("{}{}", CHARSET_B, value);
    let barcode = Code128::new(&prefixed).map_err(|e| CodecError::Code128 {
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    Ok(barcode.encode())
}

/// Render a symbol stretched across a `width` x `height` raster on white.
pub fn render(value: &str, width: u32, height: u32) -> Result<Pixmap, CodecError> {
    let modules = encode(value)?;
    if width > MAX_SYMBOL_PX || height > MAX_SYMBOL_PX {
        return Err(CodecError::Raster { width, height });
    }
    let mut pixmap = Pixmap::new(width.max(1), height.max(1)).ok_or(CodecError::Raster {
        width,
        height,
    })?;
    pixmap.fill(Color::WHITE);

    let mut paint = Paint::default();
    paint.set_color(Color::BLACK);
    paint.anti_alias = false;

    let module_w = pixmap.width() as f32 / modules.len() as f32;
    let h = pixmap.height() as f32;
    let mut i = 0;
    while i < modules.len() {
        if modules[i] != 1 {
            i += 1;
            continue;
        }
        let start = i;
        while i < modules.len() && modules[i] == 1 {
            i += 1;
        }
        let x0 = start as f32 * module_w;
        let x1 = i as f32 * module_w;
        if let Some(rect) = Rect::from_ltrb(x0, 0.0, x1, h) {
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }

    Ok(pixmap)
}

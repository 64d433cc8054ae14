//! QR symbols via `qrcode`.

use cardkit_core::constants::{MAX_SYMBOL_PX, QR_QUIET_ZONE};
use cardkit_core::CodecError;
use qrcode::QrCode;
use tiny_skia::{Color, Paint, Pixmap, Rect, Transform};

/// Render `value` as a square QR symbol of `side` pixels with a light quiet zone.
pub fn render(value: &str, side: u32) -> Result<Pixmap, CodecError> {
    if value.is_empty() {
        return Err(CodecError::EmptyValue);
    }
    if side > MAX_SYMBOL_PX {
        return Err(CodecError::Raster {
            width: side,
            height: side,
        });
    }
    let code = QrCode::new(value.as_bytes()).map_err(|e| CodecError::Qr {
        reason: e.to_string(),
    })?;

    let side = side.max(1);
    let mut pixmap = Pixmap::new(side, side).ok_or(CodecError::Raster {
        width: side,
        height: side,
    })?;
    pixmap.fill(Color::WHITE);

    let modules = code.width();
    let total = (modules + 2 * QR_QUIET_ZONE) as f32;
    let cell = side as f32 / total;

    let mut paint = Paint::default();
    paint.set_color(Color::BLACK);
    paint.anti_alias = false;

    for qy in 0..modules {
        for qx in 0..modules {
            if code[(qx, qy)] != qrcode::Color::Dark {
                continue;
            }
            let x = (qx + QR_QUIET_ZONE) as f32 * cell;
            let y = (qy + QR_QUIET_ZONE) as f32 * cell;
            if let Some(rect) = Rect::from_xywh(x, y, cell, cell) {
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            }
        }
    }

    Ok(pixmap)
}

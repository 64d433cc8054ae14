//! Card renderer.
//! Composes a template into a raster surface using tiny-skia.
//!
//! Paint order:
//! - background pattern
//! - editor grid (unless suppressed)
//! - elements in document order, with handles on the selected one
//! - border frame

use crate::codec::SymbolCache;
use crate::font_manager;
use crate::geometry::{element_box, rotate_handle_center, Corner};
use crate::image_store::ImageStore;
use crate::model::{
    BarcodeElement, BarcodeFormat, Element, ElementKind, ImageElement, TextAlign, TextElement,
};
use crate::template::{PatternKind, Template};
use cardkit_core::constants::MAX_RASTER_AREA;
use cardkit_core::{Error, HandleMetrics, Result};
use image::RgbaImage;
use rusttype::{point as rt_point, Font, Scale};
use tiny_skia::{
    Color, FillRule, FilterQuality, GradientStop, LinearGradient, Paint, Path, PathBuilder,
    Pixmap, PixmapPaint, Point as SkPoint, Rect, SpreadMode, Stroke, Transform,
};

const STRIPE_WIDTH: f32 = 18.0;
const STRIPE_STEP: usize = 36;
const DOT_RADIUS: f32 = 3.0;
const DOT_STEP: usize = 24;
const PLACEHOLDER_FONT_SIZE: f32 = 14.0;
const CAPTION_BASELINE_GAP: f64 = 4.0;
const SHADOW_OFFSET_Y: f32 = 5.0;
const SHADOW_LAYERS: u8 = 4;

fn handle_color() -> Color {
    Color::from_rgba8(239, 68, 68, 255)
}
fn grid_color() -> Color {
    Color::from_rgba8(209, 213, 219, 71)
}
fn axis_color() -> Color {
    Color::from_rgba8(17, 24, 39, 255)
}
fn placeholder_fill() -> Color {
    Color::from_rgba8(248, 250, 252, 255)
}
fn placeholder_stroke() -> Color {
    Color::from_rgba8(203, 213, 225, 255)
}
fn placeholder_text() -> Color {
    Color::from_rgba8(100, 116, 139, 255)
}
fn shadow_color(alpha: u8) -> Color {
    Color::from_rgba8(0, 0, 0, alpha)
}

/// Per-render switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions<'a> {
    /// Element to decorate with selection handles.
    pub selected: Option<&'a str>,
    /// Hide the editor grid regardless of the template setting.
    pub suppress_grid: bool,
}

impl<'a> RenderOptions<'a> {
    /// Options for printable output: no grid, no handles.
    pub fn export() -> Self {
        Self {
            selected: None,
            suppress_grid: true,
        }
    }
}

/// Parse a CSS hex color: `#rgb`, `#rrggbb` or `#rrggbbaa`.
pub fn parse_color(s: &str) -> Option<Color> {
    let hex = s.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    match hex.len() {
        3 => Some(Color::from_rgba8(nibble(0)?, nibble(1)?, nibble(2)?, 255)),
        6 => Some(Color::from_rgba8(byte(0)?, byte(2)?, byte(4)?, 255)),
        8 => Some(Color::from_rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn solid(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

/// Render the card to a pixmap of page size.
pub fn render_card(
    template: &Template,
    symbols: &mut SymbolCache,
    images: &ImageStore,
    metrics: &HandleMetrics,
    options: &RenderOptions<'_>,
) -> Result<Pixmap> {
    let width = template.width().round().max(1.0) as u32;
    let height = template.height().round().max(1.0) as u32;
    if u64::from(width) * u64::from(height) > MAX_RASTER_AREA {
        return Err(Error::other(format!("Card size {}x{} is too large to render", width, height)));
    }
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| Error::other(format!("Cannot allocate {}x{} card", width, height)))?;

    draw_background(&mut pixmap, template);
    if template.editor.show_grid && !options.suppress_grid {
        draw_grid(&mut pixmap, template);
    }
    for el in &template.elements {
        let selected = options.selected == Some(el.id.as_str());
        draw_element(&mut pixmap, template, el, selected, symbols, images, metrics);
    }
    draw_border(&mut pixmap, template);

    Ok(pixmap)
}

fn draw_background(pixmap: &mut Pixmap, template: &Template) {
    let pattern = &template.style.pattern;
    let (w, h) = (pixmap.width() as f32, pixmap.height() as f32);
    let color1 = parse_color(&pattern.color1).unwrap_or(Color::WHITE);
    let color2 = parse_color(&pattern.color2).unwrap_or(Color::WHITE);
    let Some(full) = Rect::from_xywh(0.0, 0.0, w, h) else {
        return;
    };

    match pattern.kind {
        PatternKind::None => pixmap.fill(Color::WHITE),
        PatternKind::Solid => pixmap.fill(color1),
        PatternKind::Gradient => {
            let shader = LinearGradient::new(
                SkPoint::from_xy(0.0, 0.0),
                SkPoint::from_xy(w, h),
                vec![GradientStop::new(0.0, color1), GradientStop::new(1.0, color2)],
                SpreadMode::Pad,
                Transform::identity(),
            );
            match shader {
                Some(shader) => {
                    let paint = Paint {
                        shader,
                        ..Paint::default()
                    };
                    pixmap.fill_rect(full, &paint, Transform::identity(), None);
                }
                None => pixmap.fill(color1),
            }
        }
        PatternKind::Stripes => {
            pixmap.fill(color1);
            let mut pb = PathBuilder::new();
            let hi = h as i64;
            let mut i = -hi;
            while i < w as i64 {
                pb.move_to(i as f32, 0.0);
                pb.line_to(i as f32 + h, h);
                i += STRIPE_STEP as i64;
            }
            if let Some(path) = pb.finish() {
                let stroke = Stroke {
                    width: STRIPE_WIDTH,
                    ..Default::default()
                };
                pixmap.stroke_path(&path, &solid(color2), &stroke, Transform::identity(), None);
            }
        }
        PatternKind::Dots => {
            pixmap.fill(color1);
            let mut pb = PathBuilder::new();
            for y in (10..pixmap.height() as usize).step_by(DOT_STEP) {
                let start = if y % 48 == 0 { 12 } else { 0 };
                for x in (start..pixmap.width() as usize).step_by(DOT_STEP) {
                    pb.push_circle(x as f32, y as f32, DOT_RADIUS);
                }
            }
            if let Some(path) = pb.finish() {
                pixmap.fill_path(&path, &solid(color2), FillRule::Winding, Transform::identity(), None);
            }
        }
    }
}

fn draw_grid(pixmap: &mut Pixmap, template: &Template) {
    let (w, h) = (pixmap.width() as f32, pixmap.height() as f32);
    let pitch = template.editor.pitch() as f32;

    let mut pb = PathBuilder::new();
    let mut x = 0.0;
    while x <= w {
        pb.move_to(x, 0.0);
        pb.line_to(x, h);
        x += pitch;
    }
    let mut y = 0.0;
    while y <= h {
        pb.move_to(0.0, y);
        pb.line_to(w, y);
        y += pitch;
    }
    if let Some(path) = pb.finish() {
        let stroke = Stroke {
            width: 0.6,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &solid(grid_color()), &stroke, Transform::identity(), None);
    }

    let mut pb = PathBuilder::new();
    pb.move_to(w / 2.0, 0.0);
    pb.line_to(w / 2.0, h);
    pb.move_to(0.0, h / 2.0);
    pb.line_to(w, h / 2.0);
    if let Some(path) = pb.finish() {
        let stroke = Stroke {
            width: 1.2,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &solid(axis_color()), &stroke, Transform::identity(), None);
    }
}

fn draw_border(pixmap: &mut Pixmap, template: &Template) {
    let border = &template.style.border;
    if !border.on || border.thickness <= 0.0 {
        return;
    }
    let Some(color) = parse_color(&border.color) else {
        return;
    };
    let path = rounded_rect(
        0.0,
        0.0,
        pixmap.width() as f32,
        pixmap.height() as f32,
        template.style.corner_radius as f32,
    );
    if let Some(path) = path {
        let stroke = Stroke {
            width: border.thickness as f32,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &solid(color), &stroke, Transform::identity(), None);
    }
}

/// Rectangle with circular corners; the radius is clamped to half the short side.
pub fn rounded_rect(x: f32, y: f32, w: f32, h: f32, r: f32) -> Option<Path> {
    let r = r.max(0.0).min(w / 2.0).min(h / 2.0);
    if r <= 0.0 {
        return Rect::from_xywh(x, y, w, h).map(PathBuilder::from_rect);
    }
    // Cubic approximation of a quarter circle.
    let k = r * 0.552_284_8;
    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.cubic_to(x + w - r + k, y, x + w, y + r - k, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.cubic_to(x + w, y + h - r + k, x + w - r + k, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.cubic_to(x + r - k, y + h, x, y + h - r + k, x, y + h - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}

/// Transform that maps the element's local frame onto the card.
fn element_transform(el: &Element) -> Transform {
    Transform::from_translate(el.x as f32, el.y as f32).pre_rotate(el.rotation as f32)
}

fn centered_rect(w: f64, h: f64) -> Option<Rect> {
    Rect::from_xywh((-w / 2.0) as f32, (-h / 2.0) as f32, w as f32, h as f32)
}

fn draw_element(
    pixmap: &mut Pixmap,
    template: &Template,
    el: &Element,
    selected: bool,
    symbols: &mut SymbolCache,
    images: &ImageStore,
    metrics: &HandleMetrics,
) {
    let transform = element_transform(el);
    let shadow = template.style.drop_shadow;

    match &el.kind {
        ElementKind::Image(img) => draw_image(pixmap, transform, img, images, shadow),
        ElementKind::Text(text) => draw_text(pixmap, transform, text, shadow),
        ElementKind::Barcode(bc) => draw_barcode(pixmap, transform, &el.id, bc, symbols, shadow),
    }

    if selected {
        draw_handles(pixmap, transform, el, metrics);
    }
}

/// Soft box shadow made of stacked translucent rects.
fn draw_box_shadow(pixmap: &mut Pixmap, transform: Transform, w: f64, h: f64) {
    let shifted = transform.pre_translate(0.0, SHADOW_OFFSET_Y);
    for layer in 0..SHADOW_LAYERS {
        let grow = (SHADOW_LAYERS - layer) as f64 * 3.0;
        if let Some(rect) = centered_rect(w + grow, h + grow) {
            pixmap.fill_rect(rect, &solid(shadow_color(12)), shifted, None);
        }
    }
}

fn draw_image(
    pixmap: &mut Pixmap,
    transform: Transform,
    img: &ImageElement,
    images: &ImageStore,
    shadow: bool,
) {
    let size = img.size();
    if shadow {
        draw_box_shadow(pixmap, transform, size.w, size.h);
    }

    if let Some(bitmap) = images.get(&img.src) {
        let sx = size.w as f32 / bitmap.width() as f32;
        let sy = size.h as f32 / bitmap.height() as f32;
        let placed = transform
            .pre_translate(-size.w as f32 / 2.0, -size.h as f32 / 2.0)
            .pre_scale(sx, sy);
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        pixmap.draw_pixmap(0, 0, bitmap.as_ref(), &paint, placed, None);
        return;
    }

    let Some(rect) = centered_rect(size.w, size.h) else {
        return;
    };
    pixmap.fill_rect(rect, &solid(placeholder_fill()), transform, None);
    let stroke = Stroke {
        width: 1.0,
        ..Default::default()
    };
    pixmap.stroke_path(
        &PathBuilder::from_rect(rect),
        &solid(placeholder_stroke()),
        &stroke,
        transform,
        None,
    );
    let label = if img.src.is_empty() { "Your logo" } else { img.src.as_str() };
    if let Some(font) = font_manager::get_font_for("Arial", false) {
        draw_line(
            pixmap,
            transform,
            font,
            label,
            PLACEHOLDER_FONT_SIZE,
            placeholder_text(),
            TextAlign::Center,
            0.0,
        );
    }
}

fn draw_text(pixmap: &mut Pixmap, transform: Transform, text: &TextElement, shadow: bool) {
    let Some(font) = font_manager::get_font_for(&text.font_family, text.bold()) else {
        tracing::debug!("No font available for '{}'", text.font_family);
        return;
    };
    let color = parse_color(&text.color).unwrap_or(Color::BLACK);
    let size = text.font_size as f32;
    let line_height = text.font_size * cardkit_core::constants::TEXT_LINE_HEIGHT;
    let lines: Vec<&str> = text.lines().collect();
    let mid = (lines.len() as f64 - 1.0) / 2.0;
    // Each line's middle sits on its slot; shift down to the baseline.
    let vm = font.v_metrics(Scale::uniform(size));
    let middle_to_baseline = (vm.ascent + vm.descent) / 2.0;

    for (i, line) in lines.iter().enumerate() {
        let baseline = ((i as f64 - mid) * line_height) as f32 + middle_to_baseline;
        if shadow {
            draw_line(
                pixmap,
                transform.pre_translate(0.0, SHADOW_OFFSET_Y),
                font,
                line,
                size,
                shadow_color(46),
                text.align,
                baseline,
            );
        }
        draw_line(pixmap, transform, font, line, size, color, text.align, baseline);
    }
}

fn draw_barcode(
    pixmap: &mut Pixmap,
    transform: Transform,
    id: &str,
    bc: &BarcodeElement,
    symbols: &mut SymbolCache,
    shadow: bool,
) {
    let symbol_size = bc.symbol_size();
    if shadow {
        draw_box_shadow(pixmap, transform, symbol_size.w, symbol_size.h);
    }

    if let Some(symbol) = symbols.symbol_for(id, bc) {
        let symbol: &Pixmap = &symbol;
        let sx = symbol_size.w as f32 / symbol.width() as f32;
        let sy = symbol_size.h as f32 / symbol.height() as f32;
        let placed = transform
            .pre_translate(-symbol_size.w as f32 / 2.0, -symbol_size.h as f32 / 2.0)
            .pre_scale(sx, sy);
        let paint = PixmapPaint {
            quality: FilterQuality::Nearest,
            ..PixmapPaint::default()
        };
        pixmap.draw_pixmap(0, 0, symbol.as_ref(), &paint, placed, None);
    }

    if bc.shows_caption() {
        let half = match bc.format {
            BarcodeFormat::Qr => symbol_size.w / 2.0,
            BarcodeFormat::Code128 => symbol_size.h / 2.0,
        };
        let baseline = (half + bc.font_size + CAPTION_BASELINE_GAP) as f32;
        let color = parse_color(&bc.text_color).unwrap_or(Color::BLACK);
        if let Some(font) = font_manager::get_font_for("Arial", false) {
            draw_line(
                pixmap,
                transform,
                font,
                &bc.value,
                bc.font_size as f32,
                color,
                TextAlign::Center,
                baseline,
            );
        }
    }
}

fn draw_handles(pixmap: &mut Pixmap, transform: Transform, el: &Element, metrics: &HandleMetrics) {
    let size = element_box(el, metrics);
    let paint = solid(handle_color());
    let stroke = Stroke {
        width: 1.5,
        ..Default::default()
    };

    if let Some(rect) = centered_rect(size.w, size.h) {
        pixmap.stroke_path(&PathBuilder::from_rect(rect), &paint, &stroke, transform, None);
    }

    let hs = metrics.handle_size;
    for corner in Corner::ALL {
        let c = corner.local_position(size);
        let Some(rect) = Rect::from_xywh(
            (c.x - hs / 2.0) as f32,
            (c.y - hs / 2.0) as f32,
            hs as f32,
            hs as f32,
        ) else {
            continue;
        };
        pixmap.fill_rect(rect, &solid(Color::WHITE), transform, None);
        pixmap.stroke_path(&PathBuilder::from_rect(rect), &paint, &stroke, transform, None);
    }

    let center = rotate_handle_center(size, metrics);
    if let Some(disc) = PathBuilder::from_circle(
        center.x as f32,
        center.y as f32,
        metrics.rotate_radius as f32,
    ) {
        pixmap.fill_path(&disc, &paint, FillRule::Winding, transform, None);
        pixmap.stroke_path(&disc, &paint, &stroke, transform, None);
    }
}

/// Horizontal advance of a single line.
pub fn measure_line(font: &Font<'_>, text: &str, size: f32) -> f32 {
    let scale = Scale::uniform(size);
    font.layout(text, scale, rt_point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Rasterize one line of text offscreen, then composite it through `transform`
/// so rotated elements get rotated glyphs. `baseline` is the local y of the
/// alphabetic baseline; `align` positions the line relative to local x = 0.
#[allow(clippy::too_many_arguments)]
fn draw_line(
    pixmap: &mut Pixmap,
    transform: Transform,
    font: &Font<'_>,
    text: &str,
    size: f32,
    color: Color,
    align: TextAlign,
    baseline: f32,
) {
    if text.is_empty() || size <= 0.0 {
        return;
    }
    let scale = Scale::uniform(size);
    let v_metrics = font.v_metrics(scale);
    let width = measure_line(font, text, size);
    let height = v_metrics.ascent - v_metrics.descent;
    let pad = 2.0;

    let layer_w = (width + pad * 2.0).ceil().max(1.0) as u32;
    let layer_h = (height + pad * 2.0).ceil().max(1.0) as u32;
    if u64::from(layer_w) * u64::from(layer_h) > MAX_RASTER_AREA {
        tracing::warn!("Skipping {}x{} text line at size {}", layer_w, layer_h, size);
        return;
    }
    let Some(mut layer) = Pixmap::new(layer_w, layer_h) else {
        return;
    };
    let (lw, lh) = (layer.width() as i32, layer.height() as i32);
    let rgba = color.to_color_u8();

    let start = rt_point(pad, pad + v_metrics.ascent);
    for glyph in font.layout(text, scale, start) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        let data = layer.data_mut();
        glyph.draw(|gx, gy, v| {
            let px = gx as i32 + bb.min.x;
            let py = gy as i32 + bb.min.y;
            if px < 0 || px >= lw || py < 0 || py >= lh {
                return;
            }
            let coverage = (v * rgba.alpha() as f32).round() as u16;
            if coverage == 0 {
                return;
            }
            let idx = ((py * lw + px) * 4) as usize;
            let pixel = &mut data[idx..idx + 4];
            // Premultiplied; glyph boxes may overlap so keep the strongest coverage.
            if coverage as u8 > pixel[3] {
                pixel[0] = (rgba.red() as u16 * coverage / 255) as u8;
                pixel[1] = (rgba.green() as u16 * coverage / 255) as u8;
                pixel[2] = (rgba.blue() as u16 * coverage / 255) as u8;
                pixel[3] = coverage as u8;
            }
        });
    }

    let left = match align {
        TextAlign::Left => 0.0,
        TextAlign::Center => -width / 2.0,
        TextAlign::Right => -width,
    };
    let placed = transform.pre_translate(left - pad, baseline - v_metrics.ascent - pad);
    pixmap.draw_pixmap(0, 0, layer.as_ref(), &PixmapPaint::default(), placed, None);
}

/// Straight-alpha copy of a rendered card, for encoding.
pub fn to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let (w, h) = (pixmap.width(), pixmap.height());
    let pixels = pixmap.pixels();
    RgbaImage::from_fn(w, h, |x, y| {
        let c = pixels[(y * w + x) as usize].demultiply();
        image::Rgba([c.red(), c.green(), c.blue(), c.alpha()])
    })
}

/// Encode a rendered card as PNG.
pub fn save_png(pixmap: &Pixmap, path: &std::path::Path) -> Result<()> {
    to_rgba_image(pixmap)
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| Error::Image(e.to_string()))
}

/// PNG bytes of a rendered card.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(to_rgba_image(pixmap))
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| Error::Image(e.to_string()))?;
    Ok(bytes)
}

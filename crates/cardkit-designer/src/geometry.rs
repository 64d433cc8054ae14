//! Geometry engine: local frames, effective boxes and rotated hit-testing.
//!
//! All functions are pure. Coordinates are card pixels with y pointing down,
//! so a positive rotation turns an element clockwise on screen.

use cardkit_core::HandleMetrics;

use crate::model::{BoxSize, Element, ElementKind, Point};

/// A resize corner, named by compass direction in the element's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    Nw,
    Ne,
    Se,
    Sw,
}

impl Corner {
    /// Hit-test priority order.
    pub const ALL: [Corner; 4] = [Corner::Nw, Corner::Ne, Corner::Se, Corner::Sw];

    /// Unit signs of the corner position relative to the center.
    pub fn signs(self) -> (f64, f64) {
        match self {
            Corner::Nw => (-1.0, -1.0),
            Corner::Ne => (1.0, -1.0),
            Corner::Se => (1.0, 1.0),
            Corner::Sw => (-1.0, 1.0),
        }
    }

    /// Corner position in the local frame of a box.
    pub fn local_position(self, size: BoxSize) -> Point {
        let (sx, sy) = self.signs();
        Point::new(sx * size.half_w(), sy * size.half_h())
    }
}

impl std::fmt::Display for Corner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Corner::Nw => "nw",
            Corner::Ne => "ne",
            Corner::Se => "se",
            Corner::Sw => "sw",
        };
        write!(f, "{}", s)
    }
}

/// What part of an element a point landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Rotate,
    Resize(Corner),
    Move,
}

/// Result of a document hit-test.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// Index of the element in paint order.
    pub index: usize,
    pub id: String,
    pub kind: HitKind,
    /// Effective box at the time of the test.
    pub size: BoxSize,
}

fn rotate_by(dx: f64, dy: f64, radians: f64) -> (f64, f64) {
    let (sin, cos) = radians.sin_cos();
    (dx * cos - dy * sin, dx * sin + dy * cos)
}

/// Canvas point to the element's local frame: translate by `-(x, y)`, then
/// rotate by `-rotation`.
pub fn to_local(element: &Element, p: Point) -> Point {
    let (rx, ry) = rotate_by(
        p.x - element.x,
        p.y - element.y,
        -element.rotation.to_radians(),
    );
    Point::new(rx, ry)
}

/// Inverse of [`to_local`].
pub fn to_canvas(element: &Element, local: Point) -> Point {
    let (dx, dy) = rotate_by(local.x, local.y, element.rotation.to_radians());
    Point::new(element.x + dx, element.y + dy)
}

/// Effective bounding box of an element, centered on `(x, y)` in its local frame.
pub fn element_box(element: &Element, metrics: &HandleMetrics) -> BoxSize {
    match &element.kind {
        ElementKind::Image(img) => img.size(),
        ElementKind::Text(text) => text.size(metrics),
        ElementKind::Barcode(bc) => bc.size(metrics),
    }
}

/// Center of the rotate handle in the local frame.
pub fn rotate_handle_center(size: BoxSize, metrics: &HandleMetrics) -> Point {
    Point::new(0.0, -size.half_h() - metrics.rotate_offset)
}

/// Classify a local-frame point against a box: rotate handle first, then the
/// corners in nw/ne/se/sw order, then the body.
pub fn classify(local: Point, size: BoxSize, metrics: &HandleMetrics) -> Option<HitKind> {
    if local.distance_to(&rotate_handle_center(size, metrics)) <= metrics.rotate_hit_radius() {
        return Some(HitKind::Rotate);
    }

    let half = metrics.half_handle();
    for corner in Corner::ALL {
        let c = corner.local_position(size);
        if (local.x - c.x).abs() <= half && (local.y - c.y).abs() <= half {
            return Some(HitKind::Resize(corner));
        }
    }

    if local.x.abs() <= size.half_w() && local.y.abs() <= size.half_h() {
        return Some(HitKind::Move);
    }

    None
}

/// Hit-test one element at a canvas point.
pub fn hit_element(element: &Element, p: Point, metrics: &HandleMetrics) -> Option<HitKind> {
    let size = element_box(element, metrics);
    classify(to_local(element, p), size, metrics)
}

/// Hit-test all elements back-to-front; the topmost hit wins.
pub fn hit_test(elements: &[Element], p: Point, metrics: &HandleMetrics) -> Option<Hit> {
    elements.iter().enumerate().rev().find_map(|(index, el)| {
        let size = element_box(el, metrics);
        classify(to_local(el, p), size, metrics).map(|kind| Hit {
            index,
            id: el.id.clone(),
            kind,
            size,
        })
    })
}

/// The four corners of an element's box in canvas coordinates (nw, ne, se, sw).
pub fn canvas_corners(element: &Element, metrics: &HandleMetrics) -> [Point; 4] {
    let size = element_box(element, metrics);
    Corner::ALL.map(|c| to_canvas(element, c.local_position(size)))
}

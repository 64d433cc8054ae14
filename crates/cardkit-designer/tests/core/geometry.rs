use cardkit_designer::geometry::{canvas_corners, element_box, hit_element, to_canvas};
use cardkit_designer::{
    hit_test, Corner, Element, ElementKind, HandleMetrics, HitKind, ImageElement, Point,
    TextElement,
};

fn logo(rotation: f64) -> Element {
    Element::new(
        "logo",
        "Logo",
        500.0,
        300.0,
        ElementKind::Image(ImageElement::new("logo.png", 200.0, 100.0)),
    )
    .with_rotation(rotation)
}

#[test]
fn test_hit_unrotated_body_and_outside() {
    let m = HandleMetrics::default();
    let el = logo(0.0);
    assert_eq!(hit_element(&el, Point::new(560.0, 330.0), &m), Some(HitKind::Move));
    assert_eq!(hit_element(&el, Point::new(500.0, 390.0), &m), None);
}

#[test]
fn test_hit_rotated_90() {
    let m = HandleMetrics::default();
    let el = logo(90.0);
    // Below the center: outside the unrotated box, inside the rotated one.
    assert_eq!(hit_element(&el, Point::new(500.0, 390.0), &m), Some(HitKind::Move));
    assert_eq!(hit_element(&el, Point::new(590.0, 300.0), &m), None);
    // The rotate handle swings to the right of the center.
    assert_eq!(hit_element(&el, Point::new(576.0, 300.0), &m), Some(HitKind::Rotate));
}

#[test]
fn test_hit_rotated_45() {
    let m = HandleMetrics::default();
    let el = logo(45.0);
    let along_x = Point::new(
        500.0 + 90.0 * 45f64.to_radians().cos(),
        300.0 + 90.0 * 45f64.to_radians().sin(),
    );
    assert_eq!(hit_element(&el, along_x, &m), Some(HitKind::Move));
    assert_eq!(hit_element(&logo(0.0), along_x, &m), None);
}

#[test]
fn test_hit_rotated_negative_corners() {
    let m = HandleMetrics::default();
    let el = logo(-30.0);
    let corners = canvas_corners(&el, &m);
    for (corner, p) in Corner::ALL.iter().zip(corners.iter()) {
        assert_eq!(
            hit_element(&el, *p, &m),
            Some(HitKind::Resize(*corner)),
            "corner {} at {:?}",
            corner,
            p
        );
    }
}

#[test]
fn test_rotate_handle_above_top_edge() {
    let m = HandleMetrics::default();
    let el = logo(0.0);
    let handle = to_canvas(&el, Point::new(0.0, -50.0 - m.rotate_offset));
    assert_eq!(hit_element(&el, handle, &m), Some(HitKind::Rotate));
}

#[test]
fn test_hit_regions_hold_at_every_rotation() {
    let m = HandleMetrics::default();
    for rotation in [0.0, 45.0, 90.0, -30.0] {
        let el = logo(rotation);
        let size = element_box(&el, &m);
        let at = |x: f64, y: f64| hit_element(&el, to_canvas(&el, Point::new(x, y)), &m);

        // Body edge on the local x axis.
        assert_eq!(at(size.half_w() + 1.0, 0.0), None, "outside edge at {}", rotation);
        assert_eq!(at(size.half_w() - 1.0, 0.0), Some(HitKind::Move), "inside edge at {}", rotation);
        assert_eq!(at(-size.half_w() + 1.0, 0.0), Some(HitKind::Move));

        // Anywhere in a corner's 12x12 square resizes from that corner.
        for corner in Corner::ALL {
            let c = corner.local_position(size);
            for (dx, dy) in [(0.0, 0.0), (5.9, 5.9), (-5.9, 5.9), (5.9, -5.9), (-5.9, -5.9)] {
                assert_eq!(
                    at(c.x + dx, c.y + dy),
                    Some(HitKind::Resize(corner)),
                    "corner {} offset ({}, {}) at {}",
                    corner,
                    dx,
                    dy,
                    rotation
                );
            }
        }

        // Rotate disc of radius 10 above the top edge.
        let cy = -size.half_h() - m.rotate_offset;
        for (dx, dy) in [(0.0, 0.0), (9.9, 0.0), (-9.9, 0.0), (0.0, 9.9), (0.0, -9.9), (6.0, 6.0)] {
            assert_eq!(
                at(dx, cy + dy),
                Some(HitKind::Rotate),
                "rotate offset ({}, {}) at {}",
                dx,
                dy,
                rotation
            );
        }
        assert_eq!(at(0.0, cy - 10.5), None, "beyond rotate disc at {}", rotation);
    }
}

#[test]
fn test_topmost_element_wins() {
    let m = HandleMetrics::default();
    let bottom = logo(0.0);
    let mut top = logo(0.0);
    top.id = "cover".to_string();
    let elements = vec![bottom, top];

    let hit = hit_test(&elements, Point::new(520.0, 310.0), &m).unwrap();
    assert_eq!(hit.id, "cover");
    assert_eq!(hit.index, 1);
    assert_eq!(hit.kind, HitKind::Move);
}

#[test]
fn test_miss_everything() {
    let m = HandleMetrics::default();
    let elements = vec![logo(0.0)];
    assert!(hit_test(&elements, Point::new(10.0, 10.0), &m).is_none());
    assert!(hit_test(&[], Point::new(500.0, 300.0), &m).is_none());
}

#[test]
fn test_text_box_estimate() {
    let m = HandleMetrics::default();
    let el = Element::new(
        "name",
        "Name",
        525.0,
        330.0,
        ElementKind::Text(TextElement::new("Sample Name", 48.0)),
    );
    let size = element_box(&el, &m);
    assert!((size.w - 269.6).abs() < 1e-9);
    assert!((size.h - 67.2).abs() < 1e-9);

    let short = Element::new("t", "", 0.0, 0.0, ElementKind::Text(TextElement::new("A", 10.0)));
    assert_eq!(element_box(&short, &m).w, m.text_min_width);
}

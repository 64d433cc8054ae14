use cardkit_designer::geometry::canvas_corners;
use cardkit_designer::{
    DragState, EditorSession, Element, ElementKind, ImageElement, Key, KeyModifiers, Point,
    SessionEvent, Template,
};

fn single_image(rotation: f64) -> EditorSession {
    let mut template = Template::empty();
    template.elements.push(
        Element::new(
            "logo",
            "Logo",
            500.0,
            300.0,
            ElementKind::Image(ImageElement::new("logo.png", 200.0, 100.0)),
        )
        .with_rotation(rotation),
    );
    EditorSession::with_template(template)
}

fn image_size(session: &EditorSession) -> (f64, f64) {
    let img = session.template().get("logo").unwrap().as_image().unwrap();
    (img.w, img.h)
}

#[test]
fn test_pointer_down_selects_and_miss_clears() {
    let mut session = single_image(0.0);
    let events = session.pointer_down(Point::new(500.0, 300.0));
    assert!(events.contains(&SessionEvent::SelectionChanged(Some("logo".to_string()))));
    assert_eq!(session.selected_id(), Some("logo"));
    assert!(session.is_dragging());
    session.pointer_up();

    let events = session.pointer_down(Point::new(5.0, 5.0));
    assert!(events.contains(&SessionEvent::SelectionChanged(None)));
    assert_eq!(session.selected_id(), None);
    assert!(!session.is_dragging());
}

#[test]
fn test_move_snaps_to_grid() {
    let mut session = single_image(0.0);
    session.pointer_down(Point::new(500.0, 300.0));
    session.pointer_move(Point::new(513.0, 309.0));
    let el = session.template().get("logo").unwrap();
    assert_eq!((el.x, el.y), (520.0, 300.0));
}

#[test]
fn test_move_without_snap_follows_pointer() {
    let mut session = single_image(0.0);
    session.edit_style(cardkit_designer::StyleEdit::SnapToGrid(false));
    session.pointer_down(Point::new(500.0, 300.0));
    session.pointer_move(Point::new(513.0, 309.0));
    let el = session.template().get("logo").unwrap();
    assert_eq!((el.x, el.y), (513.0, 309.0));
}

#[test]
fn test_drag_records_exactly_one_checkpoint() {
    let mut session = single_image(0.0);
    let before = session.history().len();

    session.pointer_down(Point::new(500.0, 300.0));
    for step in 1..=10 {
        session.pointer_move(Point::new(500.0 + step as f64 * 7.0, 300.0));
        assert_eq!(session.history().len(), before);
    }
    let events = session.pointer_up();
    assert_eq!(session.history().len(), before + 1);
    assert!(events.contains(&SessionEvent::HistoryChanged {
        can_undo: true,
        can_redo: false
    }));
    assert_eq!(*session.drag_state(), DragState::Idle);
}

#[test]
fn test_click_without_motion_records_nothing() {
    let mut session = single_image(0.0);
    session.pointer_down(Point::new(500.0, 300.0));
    session.pointer_up();
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_pointer_back_to_start_restores_anchor() {
    let mut session = single_image(0.0);
    let before = session.history().len();
    let before_doc = session.template().clone();
    let se = canvas_corners(session.template().get("logo").unwrap(), session.metrics())[2];
    session.pointer_down(se);
    session.pointer_move(Point::new(se.x + 40.0, se.y + 40.0));
    assert_ne!(image_size(&session), (200.0, 100.0));
    session.pointer_move(se);
    assert_eq!(image_size(&session), (200.0, 100.0));

    session.pointer_up();
    assert_eq!(session.history().len(), before);
    assert_eq!(session.template(), &before_doc);
    assert!(!session.can_undo());
}

#[test]
fn test_resize_unrotated_is_symmetric() {
    let mut session = single_image(0.0);
    session.pointer_down(Point::new(600.0, 350.0));
    session.pointer_move(Point::new(620.0, 380.0));
    let (w, h) = image_size(&session);
    assert!((w - 240.0).abs() < 1e-9);
    assert!((h - 160.0).abs() < 1e-9);
}

#[test]
fn test_resize_rotated_90_maps_canvas_x_to_height() {
    let mut session = single_image(90.0);
    let se = canvas_corners(session.template().get("logo").unwrap(), session.metrics())[2];
    assert!((se.x - 450.0).abs() < 1e-9);
    assert!((se.y - 400.0).abs() < 1e-9);

    session.pointer_down(se);
    session.pointer_move(Point::new(se.x - 20.0, se.y));
    let (w, h) = image_size(&session);
    assert!((w - 200.0).abs() < 1e-6, "width changed to {}", w);
    assert!((h - 140.0).abs() < 1e-6, "height is {}", h);
}

#[test]
fn test_resize_clamps_to_minimum() {
    let mut session = single_image(0.0);
    session.pointer_down(Point::new(600.0, 350.0));
    session.pointer_move(Point::new(501.0, 301.0));
    let min = session.metrics().min_drag_size;
    assert_eq!(image_size(&session), (min, min));
}

#[test]
fn test_rotate_drag_adds_offset_and_rounds() {
    let mut session = single_image(0.0);
    session.pointer_down(Point::new(500.0, 224.0));
    session.pointer_move(Point::new(600.0, 300.0));
    assert_eq!(session.template().get("logo").unwrap().rotation, 90.0);

    session.pointer_move(Point::new(600.0, 301.0));
    assert_eq!(session.template().get("logo").unwrap().rotation, 91.0);
}

#[test]
fn test_default_name_resize_from_se_corner() {
    let mut session = EditorSession::new();
    let before = session.history().len();

    let se = Point::new(659.8, 363.6);
    session.pointer_down(se);
    session.pointer_move(Point::new(se.x, se.y + 14.0));
    session.pointer_up();

    let name = session.template().get("name").unwrap().as_text().unwrap();
    assert_eq!(name.font_size, 68.0);
    let h = name.size(session.metrics()).h;
    assert!((h - 95.2).abs() < 1e-9);
    assert_eq!(session.history().len(), before + 1);
}

#[test]
fn test_escape_cancels_drag() {
    let mut session = single_image(0.0);
    session.pointer_down(Point::new(500.0, 300.0));
    session.pointer_move(Point::new(580.0, 340.0));
    session.handle_key(Key::Escape, KeyModifiers::default(), |_| true);

    let el = session.template().get("logo").unwrap();
    assert_eq!((el.x, el.y), (500.0, 300.0));
    assert!(!session.is_dragging());
    assert_eq!(session.history().len(), 1);
    assert!(session.pointer_up().is_empty());
}

#[test]
fn test_move_after_undo_is_ignored() {
    let mut session = single_image(0.0);
    session.pointer_down(Point::new(500.0, 300.0));
    session.pointer_move(Point::new(560.0, 300.0));
    session.pointer_up();
    session.undo();

    assert!(!session.is_dragging());
    assert!(session.pointer_move(Point::new(700.0, 300.0)).is_empty());
    assert_eq!(session.template().get("logo").unwrap().x, 500.0);
}

use cardkit_designer::{
    BarcodeFormat, EditorSession, Key, KeyModifiers, NudgeDirection, SessionEvent,
};

fn ctrl() -> KeyModifiers {
    KeyModifiers {
        ctrl: true,
        ..Default::default()
    }
}

#[test]
fn test_nudge_moves_one_grid_unit_then_snaps() {
    let mut session = EditorSession::new();
    session.select("logo");
    session.nudge(NudgeDirection::Right);
    // 525 + 20 lands between grid lines and snaps down to 540.
    assert_eq!(session.template().get("logo").unwrap().x, 540.0);
    session.nudge(NudgeDirection::Up);
    assert_eq!(session.template().get("logo").unwrap().y, 100.0);
    assert_eq!(session.history().len(), 3);
}

#[test]
fn test_nudge_without_selection_does_nothing() {
    let mut session = EditorSession::new();
    assert!(session.nudge(NudgeDirection::Left).is_empty());
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_rotate_buttons_step_five_degrees() {
    let mut session = EditorSession::new();
    session.select("name");
    session.rotate_right();
    session.rotate_right();
    session.rotate_left();
    assert_eq!(session.template().get("name").unwrap().rotation, 5.0);
    assert_eq!(session.history().len(), 4);
}

#[test]
fn test_delete_declined_changes_nothing() {
    let mut session = EditorSession::new();
    session.select("barcode");
    let events = session.handle_key(Key::Delete, KeyModifiers::default(), |_| false);
    assert!(events.is_empty());
    assert!(session.template().contains("barcode"));
    assert_eq!(session.selected_id(), Some("barcode"));
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_delete_confirmed_removes_and_checkpoints() {
    let mut session = EditorSession::new();
    session.select("barcode");
    let mut asked = None;
    let events = session.delete_selected(|el| {
        asked = Some(el.id.clone());
        true
    });
    assert_eq!(asked.as_deref(), Some("barcode"));
    assert!(events.contains(&SessionEvent::SelectionChanged(None)));
    assert!(!session.template().contains("barcode"));
    assert_eq!(session.template().elements.len(), 2);
    assert_eq!(session.history().len(), 2);
}

#[test]
fn test_add_text_and_barcode_append_on_top() {
    let mut session = EditorSession::new();
    session.add_text();
    let text = session.template().elements.last().unwrap();
    assert!(text.id.starts_with("text_"));
    assert_eq!((text.x, text.y), (525.0, 300.0));
    assert_eq!(text.as_text().unwrap().text, "New Text");
    assert_eq!(session.selected_id(), Some(text.id.as_str()));

    session.add_barcode();
    let bc = session.template().elements.last().unwrap();
    assert!(bc.id.starts_with("barcode_"));
    let inner = bc.as_barcode().unwrap();
    assert_eq!(inner.format, BarcodeFormat::Code128);
    assert_eq!((inner.w, inner.h), (420.0, 60.0));
    assert_eq!(session.template().elements.len(), 5);
    assert_eq!(session.history().len(), 3);
}

#[test]
fn test_toggle_linked_text() {
    let mut session = EditorSession::new();
    session.select("barcode");
    session.toggle_linked_text();
    let bc = session.template().get("barcode").unwrap().as_barcode().unwrap();
    assert!(!bc.linked_text);
    assert!(!bc.shows_caption());

    session.select("name");
    assert!(session.toggle_linked_text().is_empty());
}

#[test]
fn test_set_logo_updates_every_image() {
    let mut session = EditorSession::new();
    session.set_logo("brand.png");
    let logo = session.template().get("logo").unwrap().as_image().unwrap();
    assert_eq!(logo.src, "brand.png");
}

#[test]
fn test_keyboard_undo_redo() {
    let mut session = EditorSession::new();
    session.select("logo");
    session.handle_key(Key::ArrowDown, KeyModifiers::default(), |_| true);
    let moved = session.template().get("logo").unwrap().y;
    assert_eq!(moved, 140.0);

    session.handle_key(Key::Char('z'), ctrl(), |_| true);
    assert_eq!(session.template().get("logo").unwrap().y, 120.0);

    let redo = KeyModifiers {
        ctrl: true,
        shift: true,
        ..Default::default()
    };
    session.handle_key(Key::Char('Z'), redo, |_| true);
    assert_eq!(session.template().get("logo").unwrap().y, 140.0);

    session.handle_key(Key::Char('z'), ctrl(), |_| true);
    let meta_y = KeyModifiers {
        meta: true,
        ..Default::default()
    };
    session.handle_key(Key::Char('y'), meta_y, |_| true);
    assert_eq!(session.template().get("logo").unwrap().y, 140.0);
}

#[test]
fn test_bracket_keys_rotate() {
    let mut session = EditorSession::new();
    session.select("logo");
    session.handle_key(Key::Char('['), KeyModifiers::default(), |_| true);
    assert_eq!(session.template().get("logo").unwrap().rotation, -5.0);
    session.handle_key(Key::Char(']'), KeyModifiers::default(), |_| true);
    session.handle_key(Key::Char(']'), KeyModifiers::default(), |_| true);
    assert_eq!(session.template().get("logo").unwrap().rotation, 5.0);
}

#[test]
fn test_unbound_keys_are_ignored() {
    let mut session = EditorSession::new();
    session.select("logo");
    assert!(session
        .handle_key(Key::Char('q'), KeyModifiers::default(), |_| true)
        .is_empty());
    assert!(session.handle_key(Key::Char('k'), ctrl(), |_| true).is_empty());
}

#[test]
fn test_undo_clears_selection() {
    let mut session = EditorSession::new();
    session.select("logo");
    session.nudge(NudgeDirection::Down);
    let events = session.undo();
    assert!(events.contains(&SessionEvent::DocumentReplaced));
    assert_eq!(session.selected_id(), None);
    assert!(session.can_redo());
}

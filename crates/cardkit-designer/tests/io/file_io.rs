use cardkit_designer::{DocumentError, EditorSession, NudgeDirection, SessionEvent, Template};
use tempfile::TempDir;

#[test]
fn test_export_then_import_into_new_session() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("card.json");

    let mut source = EditorSession::new();
    source.select("name");
    source.nudge(NudgeDirection::Down);
    source.export_file(&path).unwrap();

    let mut target = EditorSession::new();
    let events = target.import_file(&path).unwrap();
    assert!(events.contains(&SessionEvent::DocumentReplaced));
    assert_eq!(target.template(), source.template());
    assert_eq!(target.history().len(), 1);
    assert!(!target.can_undo());
}

#[test]
fn test_import_failure_leaves_state_untouched() {
    let mut session = EditorSession::new();
    session.select("logo");
    session.nudge(NudgeDirection::Right);
    let before = session.template().clone();
    let history_len = session.history().len();

    let err = session.import_json(r#"{"elements": []}"#).unwrap_err();
    assert!(matches!(err, DocumentError::MissingSection { .. }));
    assert!(session.import_json("{ nope").is_err());

    assert_eq!(session.template(), &before);
    assert_eq!(session.history().len(), history_len);
    assert_eq!(session.selected_id(), Some("logo"));
    assert!(session.can_undo());
}

#[test]
fn test_import_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let mut session = EditorSession::new();
    let err = session
        .import_file(temp_dir.path().join("absent.json"))
        .unwrap_err();
    assert!(matches!(err, cardkit_designer::Error::Io(_)));
}

#[test]
fn test_export_is_pretty_json() {
    let session = EditorSession::new();
    let json = session.export_json().unwrap();
    assert!(json.contains('\n'));
    let parsed = Template::from_json(&json).unwrap();
    assert_eq!(&parsed, session.template());
}

#[test]
fn test_import_drops_symbols_of_vanished_barcodes() {
    let mut session = EditorSession::new();
    session.render().unwrap();
    assert!(session.symbols().is_cached("barcode"));

    let mut t = Template::with_default_elements();
    t.elements.retain(|e| e.id != "barcode");
    session
        .import_json(&serde_json::to_string(&t).unwrap())
        .unwrap();
    assert!(!session.symbols().is_cached("barcode"));
}

#[test]
fn test_load_logo_points_images_at_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("brand.png");
    image::RgbaImage::from_pixel(8, 4, image::Rgba([200, 30, 30, 255]))
        .save(&path)
        .unwrap();

    let mut session = EditorSession::new();
    session.load_logo(&path).unwrap();
    let logo = session.template().get("logo").unwrap().as_image().unwrap();
    assert_eq!(logo.src, "brand.png");
    assert!(session.images().contains("brand.png"));
    assert_eq!(session.history().len(), 2);

    let pixmap = session.render_export(false).unwrap();
    // center of the logo box is filled by the stretched bitmap
    let px = pixmap.pixel(525, 120).unwrap();
    assert_eq!((px.red(), px.green(), px.blue()), (200, 30, 30));
}

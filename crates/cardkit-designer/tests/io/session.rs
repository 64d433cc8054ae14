use cardkit_designer::{
    EditorSession, FileSessionStore, HandleMetrics, MemorySessionStore, NudgeDirection,
    SessionStore, Template,
};
use tempfile::TempDir;

#[test]
fn test_restore_without_stored_session_saves_defaults() {
    let store = MemorySessionStore::new();
    let session = EditorSession::restore(Box::new(store.clone()), HandleMetrics::default(), 60);

    assert_eq!(session.template().elements.len(), 3);
    assert_eq!(store.save_count(), 1);
    let saved = Template::from_json(&store.snapshot().unwrap()).unwrap();
    assert_eq!(&saved, session.template());
}

#[test]
fn test_restore_uses_stored_session() {
    let mut stored = Template::with_default_elements();
    stored.elements.truncate(1);
    let store = MemorySessionStore::with_snapshot(stored.to_snapshot().unwrap());

    let session = EditorSession::restore(Box::new(store.clone()), HandleMetrics::default(), 60);
    assert_eq!(session.template(), &stored);
    assert_eq!(session.history().len(), 1);
    assert_eq!(store.save_count(), 0);
}

#[test]
fn test_restore_ignores_incomplete_session() {
    let store = MemorySessionStore::with_snapshot(r#"{"elements": []}"#);
    let session = EditorSession::restore(Box::new(store.clone()), HandleMetrics::default(), 60);
    assert_eq!(session.template().elements.len(), 3);
    assert_eq!(store.save_count(), 1);
}

#[test]
fn test_checkpoints_autosave_but_undo_does_not() {
    let store = MemorySessionStore::new();
    let mut session = EditorSession::new().with_store(Box::new(store.clone()));
    session.select("logo");
    session.nudge(NudgeDirection::Down);
    assert_eq!(store.save_count(), 1);

    // unchanged checkpoint
    session.commit();
    assert_eq!(store.save_count(), 1);

    session.undo();
    assert_eq!(store.save_count(), 1);
}

#[test]
fn test_history_depth_is_configurable() {
    let mut session = EditorSession::new().with_history_depth(3);
    session.select("logo");
    for _ in 0..5 {
        session.nudge(NudgeDirection::Right);
    }
    assert_eq!(session.history().len(), 3);
    assert_eq!(session.history().capacity(), 3);
}

#[test]
fn test_reset_to_defaults() {
    let store = MemorySessionStore::new();
    let mut session = EditorSession::new().with_store(Box::new(store.clone()));
    session.select("logo");
    session.delete_selected(|_| true);
    assert_eq!(session.template().elements.len(), 2);

    assert!(session.reset_to_defaults(|| false).is_empty());
    assert_eq!(session.template().elements.len(), 2);

    session.reset_to_defaults(|| true);
    let ids: Vec<_> = session
        .template()
        .elements
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(ids, vec!["logo", "barcode", "name"]);
    assert_eq!(session.history().len(), 1);
    assert!(!session.can_undo());
    let saved = Template::from_json(&store.snapshot().unwrap()).unwrap();
    assert_eq!(saved.elements.len(), 3);
}

#[test]
fn test_sessions_are_independent() {
    let mut a = EditorSession::new();
    let b = EditorSession::new();
    a.select("logo");
    a.nudge(NudgeDirection::Down);
    assert_ne!(a.template().get("logo"), b.template().get("logo"));
    assert_eq!(b.history().len(), 1);
}

#[test]
fn test_file_store_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("session.json");
    let mut store = FileSessionStore::new(&path);

    assert_eq!(store.load().unwrap(), None);
    store.save("{\"a\":1}").unwrap();
    assert_eq!(store.load().unwrap().as_deref(), Some("{\"a\":1}"));
    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
    store.clear().unwrap();
}

#[test]
fn test_file_store_restores_session() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("session.json");

    let mut first = EditorSession::restore(
        Box::new(FileSessionStore::new(&path)),
        HandleMetrics::default(),
        60,
    );
    first.select("name");
    first.rotate_right();
    drop(first);

    let second = EditorSession::restore(
        Box::new(FileSessionStore::new(&path)),
        HandleMetrics::default(),
        60,
    );
    assert_eq!(second.template().get("name").unwrap().rotation, 5.0);
}

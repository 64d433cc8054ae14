use cardkit_designer::{Checkpoint, History};

fn seeded(capacity: usize) -> History {
    let mut h = History::new(capacity);
    h.reset("s0".to_string());
    h
}

#[test]
fn test_reset_seeds_single_entry() {
    let h = seeded(10);
    assert_eq!(h.len(), 1);
    assert_eq!(h.current(), Some("s0"));
    assert!(!h.can_undo());
    assert!(!h.can_redo());
}

#[test]
fn test_duplicate_checkpoint_is_noop() {
    let mut h = seeded(10);
    assert_eq!(h.checkpoint("s0".to_string()), Checkpoint::Unchanged);
    assert_eq!(h.len(), 1);

    assert_eq!(h.checkpoint("s1".to_string()), Checkpoint::Recorded);
    assert_eq!(h.checkpoint("s1".to_string()), Checkpoint::Unchanged);
    assert_eq!(h.len(), 2);
}

#[test]
fn test_undo_redo_walks_cursor() {
    let mut h = seeded(10);
    h.checkpoint("s1".to_string());
    h.checkpoint("s2".to_string());

    assert_eq!(h.undo(), Some("s1"));
    assert_eq!(h.undo(), Some("s0"));
    assert_eq!(h.undo(), None);
    assert_eq!(h.cursor(), 0);

    assert_eq!(h.redo(), Some("s1"));
    assert_eq!(h.redo(), Some("s2"));
    assert_eq!(h.redo(), None);
}

#[test]
fn test_checkpoint_after_undo_truncates_redo() {
    let mut h = seeded(10);
    h.checkpoint("s1".to_string());
    h.checkpoint("s2".to_string());
    h.undo();
    h.undo();

    assert_eq!(h.checkpoint("b1".to_string()), Checkpoint::Recorded);
    assert_eq!(h.len(), 2);
    assert!(!h.can_redo());
    assert_eq!(h.undo(), Some("s0"));
}

#[test]
fn test_duplicate_after_undo_keeps_redo_branch() {
    let mut h = seeded(10);
    h.checkpoint("s1".to_string());
    h.undo();

    assert_eq!(h.checkpoint("s0".to_string()), Checkpoint::Unchanged);
    assert!(h.can_redo());
    assert_eq!(h.redo(), Some("s1"));
}

#[test]
fn test_capacity_evicts_oldest() {
    let mut h = seeded(3);
    for i in 1..=5 {
        h.checkpoint(format!("s{}", i));
    }
    assert_eq!(h.len(), 3);
    assert_eq!(h.cursor(), 2);
    assert_eq!(h.current(), Some("s5"));
    assert_eq!(h.undo(), Some("s4"));
    assert_eq!(h.undo(), Some("s3"));
    assert_eq!(h.undo(), None);
}

#[test]
fn test_zero_capacity_clamps_to_one() {
    let mut h = History::new(0);
    assert_eq!(h.capacity(), 1);
    h.checkpoint("a".to_string());
    h.checkpoint("b".to_string());
    assert_eq!(h.len(), 1);
    assert_eq!(h.current(), Some("b"));
}

use cardkit_designer::{BarcodeElement, BarcodeFormat, EditorSession, PropertyEdit, SymbolCache};
use std::time::Duration;

#[test]
fn test_code128_is_cached_inline() {
    let mut cache = SymbolCache::new();
    let bc = BarcodeElement::new("5551234567", BarcodeFormat::Code128, 520.0, 70.0);
    let first = cache.symbol_for("b", &bc).unwrap();
    assert_eq!((first.width(), first.height()), (520, 70));
    assert!(cache.is_cached("b"));
    assert!(!cache.has_pending());
}

#[test]
fn test_qr_generates_in_background() {
    let mut cache = SymbolCache::new();
    let bc = BarcodeElement::new("https://example.com", BarcodeFormat::Qr, 200.0, 200.0);
    assert!(cache.symbol_for("q", &bc).is_none());
    assert!(cache.is_pending("q"));

    cache.wait_idle(Duration::from_secs(10)).unwrap();
    assert!(!cache.has_pending());
    let symbol = cache.symbol_for("q", &bc).unwrap();
    assert_eq!((symbol.width(), symbol.height()), (200, 200));
}

#[test]
fn test_resized_qr_keeps_stale_symbol_while_regenerating() {
    let mut cache = SymbolCache::new();
    let mut bc = BarcodeElement::new("hello", BarcodeFormat::Qr, 120.0, 120.0);
    cache.symbol_for("q", &bc);
    cache.wait_idle(Duration::from_secs(10)).unwrap();

    bc.w = 240.0;
    let stale = cache.symbol_for("q", &bc).unwrap();
    assert_eq!(stale.width(), 120);
    assert!(cache.is_pending("q"));
}

#[test]
fn test_invalid_code128_renders_nothing() {
    let mut cache = SymbolCache::new();
    let bc = BarcodeElement::new("", BarcodeFormat::Code128, 200.0, 50.0);
    assert!(cache.symbol_for("b", &bc).is_none());
    assert!(!cache.is_cached("b"));
}

#[test]
fn test_value_edit_invalidates_symbol() {
    let mut session = EditorSession::new();
    session.render().unwrap();
    assert!(session.symbols().is_cached("barcode"));

    session.select("barcode");
    session.edit_property(PropertyEdit::Value("123".to_string()));
    assert!(!session.symbols().is_cached("barcode"));

    session.render().unwrap();
    assert_eq!(session.symbols().entry("barcode").unwrap().key.value, "123");
}

#[test]
fn test_oversized_qr_renders_without_symbol() {
    let mut session = EditorSession::new();
    session.select("barcode");
    session.edit_property(PropertyEdit::Format(BarcodeFormat::Qr));
    session.edit_property(PropertyEdit::Width("300000".to_string()));
    session.checkpoint();
    let bc = session.template().get("barcode").unwrap().as_barcode().unwrap();
    assert_eq!(bc.w, 300000.0);

    let pixmap = session.render_export(false).unwrap();
    assert_eq!((pixmap.width(), pixmap.height()), (1050, 600));
    assert!(!session.symbols().is_cached("barcode"));
}

#[test]
fn test_oversized_qr_keeps_last_good_symbol() {
    let mut session = EditorSession::new();
    session.select("barcode");
    session.edit_property(PropertyEdit::Format(BarcodeFormat::Qr));
    session.render_export(false).unwrap();
    let good = session.symbols().entry("barcode").unwrap().key;

    session.edit_property(PropertyEdit::Width("300000".to_string()));
    session.render_export(false).unwrap();
    assert_eq!(session.symbols().entry("barcode").unwrap().key, good);
}

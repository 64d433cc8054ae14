use cardkit_designer::{
    BarcodeFormat, DocumentError, Element, ElementKind, PatternKind, Template, TextElement,
};

#[test]
fn test_json_shape_is_camel_case() {
    let t = Template::with_default_elements();
    let value: serde_json::Value = serde_json::from_str(&t.to_pretty_json().unwrap()).unwrap();
    assert_eq!(value["page"]["cardWidthPx"], 1050.0);
    assert_eq!(value["page"]["cardHeightPx"], 600.0);
    assert_eq!(value["style"]["dropShadow"], true);
    assert_eq!(value["editor"]["gridSize"], 20);
    assert_eq!(value["elements"][0]["type"], "image");
    assert_eq!(value["elements"][1]["type"], "barcode");
    assert_eq!(value["elements"][1]["format"], "CODE128");
    assert_eq!(value["elements"][1]["showText"], true);
    assert_eq!(value["elements"][2]["fontSize"], 48.0);
}

#[test]
fn test_from_json_fills_optional_sections() {
    let json = r#"{
        "page": {"cardWidthPx": 1050, "cardHeightPx": 600},
        "style": {"pattern": {"type": "dots"}},
        "elements": [
            {"id": "t1", "type": "text", "x": 10, "y": 20, "text": "Hi", "fontSize": 30},
            {"id": "q", "type": "barcode", "x": 0, "y": 0, "value": "v", "format": "QR", "w": 100, "h": 100}
        ]
    }"#;
    let t = Template::from_json(json).unwrap();
    assert_eq!(t.style.pattern.kind, PatternKind::Dots);
    assert_eq!(t.style.pattern.color1, "#ffffff");
    assert!(t.editor.snap_to_grid);
    assert_eq!(t.elements[0].rotation, 0.0);
    let text = t.elements[0].as_text().unwrap();
    assert_eq!(text.font_family, "Arial");
    assert_eq!(text.weight, 400);
    assert_eq!(t.elements[1].as_barcode().unwrap().format, BarcodeFormat::Qr);
}

#[test]
fn test_from_json_rejects_missing_sections() {
    let err = Template::from_json(r#"{"page": {"cardWidthPx": 1, "cardHeightPx": 1}, "style": {}}"#)
        .unwrap_err();
    assert_eq!(
        err,
        DocumentError::MissingSection {
            section: "elements".to_string()
        }
    );
    assert!(matches!(
        Template::from_json("[1, 2]"),
        Err(DocumentError::Malformed { .. })
    ));
    assert!(matches!(
        Template::from_json("not json"),
        Err(DocumentError::Malformed { .. })
    ));
}

#[test]
fn test_from_json_rejects_duplicate_ids() {
    let mut t = Template::empty();
    t.elements
        .push(Element::new("a", "", 0.0, 0.0, ElementKind::Text(TextElement::new("x", 10.0))));
    t.elements
        .push(Element::new("a", "", 0.0, 0.0, ElementKind::Text(TextElement::new("y", 10.0))));
    let json = serde_json::to_string(&t).unwrap();
    assert_eq!(
        Template::from_json(&json),
        Err(DocumentError::DuplicateId { id: "a".to_string() })
    );
}

#[test]
fn test_from_json_rejects_zero_grid() {
    let mut t = Template::with_default_elements();
    t.editor.grid_size = 0;
    let json = serde_json::to_string(&t).unwrap();
    assert!(matches!(
        Template::from_json(&json),
        Err(DocumentError::InvalidGrid { .. })
    ));
}

#[test]
fn test_append_and_remove_by_id() {
    let mut t = Template::with_default_elements();
    let dup = Element::new("logo", "", 0.0, 0.0, ElementKind::Text(TextElement::new("x", 10.0)));
    assert!(t.append(dup).is_err());

    let removed = t.remove("barcode").unwrap();
    assert_eq!(removed.id, "barcode");
    assert_eq!(t.index_of("name"), Some(1));
    assert!(matches!(
        t.remove("barcode"),
        Err(DocumentError::UnknownElement { .. })
    ));
}

#[test]
fn test_name_element_by_display_name() {
    let mut t = Template::empty();
    t.elements.push(Element::new(
        "t1",
        "Full Name",
        0.0,
        0.0,
        ElementKind::Text(TextElement::new("x", 10.0)),
    ));
    assert_eq!(t.name_element_index(), Some(0));
    assert_eq!(t.first_barcode_index(), None);
}

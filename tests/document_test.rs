use mooring::domain::Document;
use serde_json::json;

#[test]
fn given_typed_fields_when_reading_back_then_types_are_preserved() {
    let document = Document::new()
        .with("name", "MongoDB")
        .with("type", "database")
        .with("count", 1);

    assert_eq!(document.str_field("name"), Some("MongoDB"));
    assert_eq!(document.str_field("type"), Some("database"));
    assert_eq!(document.int_field("count"), Some(1));
}

#[test]
fn given_missing_field_when_reading_then_returns_none() {
    let document = Document::new().with("name", "MongoDB");

    assert_eq!(document.str_field("type"), None);
    assert_eq!(document.int_field("count"), None);
}

#[test]
fn given_int_field_when_reading_as_string_then_returns_none() {
    let document = Document::new().with("count", 1);

    assert_eq!(document.str_field("count"), None);
    assert_eq!(document.int_field("count"), Some(1));
}

#[test]
fn given_json_object_when_converting_then_fields_survive() {
    let document =
        Document::from_value(json!({"name": "MongoDB", "count": 1})).expect("object expected");

    assert_eq!(document.len(), 2);
    assert_eq!(document.to_value(), json!({"name": "MongoDB", "count": 1}));
}

#[test]
fn given_non_object_value_when_converting_then_returns_none() {
    assert!(Document::from_value(json!([1, 2, 3])).is_none());
    assert!(Document::from_value(json!("MongoDB")).is_none());
}

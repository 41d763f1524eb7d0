use super::*;
use serde_json::json;

#[test]
fn test_from_json_reads_label_and_fields() {
    let registry = DefinitionRegistry::from_json(
        r#"{
            "quote": {
                "title": "Quote",
                "label": "author",
                "fields": [
                    { "name": "author", "type": "text", "label": "Author" },
                    { "name": "body", "type": "html" },
                    { "name": "extra", "type": "gallery" }
                ]
            },
            "spacer": { "title": "Spacer" }
        }"#,
    )
    .unwrap();

    let quote = registry.resolve("quote").unwrap();
    assert_eq!(quote.label_field.as_deref(), Some("author"));
    assert_eq!(quote.fields.len(), 3);
    assert_eq!(quote.fields[0].display_label(), "Author");
    assert_eq!(quote.fields[1].display_label(), "body");
    assert_eq!(quote.fields[2].kind, FieldKind::Other);

    let spacer = registry.resolve("spacer").unwrap();
    assert!(spacer.label_field.is_none());
    assert!(spacer.fields.is_empty());

    assert!(registry.resolve("missing").is_none());
}

#[test]
fn test_from_json_rejects_invalid_documents() {
    assert!(matches!(
        DefinitionRegistry::from_json("[1, 2]"),
        Err(DefinitionsError::Json(_))
    ));
}

#[test]
fn test_load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = DefinitionRegistry::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, DefinitionsError::Io(_)));
}

#[test]
fn test_default_values_per_kind() {
    assert_eq!(
        FieldDescriptor::new("a", FieldKind::Text).default_value(),
        Some(json!(""))
    );
    assert_eq!(
        FieldDescriptor::new("a", FieldKind::Number).default_value(),
        Some(json!(0))
    );
    assert_eq!(
        FieldDescriptor::new("a", FieldKind::Checkbox).default_value(),
        Some(json!(false))
    );
    assert_eq!(
        FieldDescriptor::new("a", FieldKind::Repeater).default_value(),
        None
    );
}

#[test]
fn test_builtin_registry_is_sorted_by_kind() {
    let registry = DefinitionRegistry::builtin();
    assert_eq!(
        registry.kinds().collect::<Vec<_>>(),
        vec!["hero", "item", "list", "text"]
    );
    let list = registry.resolve("list").unwrap();
    assert_eq!(list.fields[1].allowed, vec!["item".to_string()]);
}

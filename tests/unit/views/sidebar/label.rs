use super::*;
use crate::models::{BlockId, FieldDescriptor, FieldKind};
use serde_json::json;

fn definition(label_field: Option<&str>) -> BlockTypeDefinition {
    BlockTypeDefinition {
        title: "Hero".to_string(),
        label_field: label_field.map(str::to_string),
        fields: vec![FieldDescriptor::new("title", FieldKind::Html)],
    }
}

fn hero(title: serde_json::Value) -> Block {
    Block::new(BlockId::from("a"), "hero").with_field("title", title)
}

#[test]
fn derive_label_strips_markup() {
    let def = definition(Some("title"));
    assert_eq!(
        derive_label(&hero(json!("<b>Hello</b> world")), Some(&def)),
        Some("Hello world".to_string())
    );
}

#[test]
fn derive_label_keeps_plain_text_verbatim() {
    let def = definition(Some("title"));
    assert_eq!(
        derive_label(&hero(json!("Tom & Jerry  5 > 3")), Some(&def)),
        Some("Tom & Jerry  5 > 3".to_string())
    );
}

#[test]
fn derive_label_is_none_without_label_source() {
    let def = definition(Some("title"));
    assert_eq!(derive_label(&hero(json!("")), Some(&def)), None);
    assert_eq!(derive_label(&hero(json!("Hello")), None), None);
    assert_eq!(
        derive_label(&hero(json!("Hello")), Some(&definition(None))),
        None
    );
    let untitled = Block::new(BlockId::from("a"), "hero");
    assert_eq!(derive_label(&untitled, Some(&def)), None);
}

#[test]
fn falsy_and_container_values_have_no_label() {
    let def = definition(Some("title"));
    for value in [json!(null), json!(false), json!(0), json!([1]), json!({"a": 1})] {
        assert_eq!(derive_label(&hero(value.clone()), Some(&def)), None, "{value}");
    }
    assert_eq!(
        derive_label(&hero(json!(42)), Some(&def)),
        Some("42".to_string())
    );
}

#[test]
fn blank_markup_has_no_label() {
    let def = definition(Some("title"));
    assert_eq!(derive_label(&hero(json!("<p>  </p><br/>")), Some(&def)), None);
}

#[test]
fn test_looks_like_markup() {
    assert!(looks_like_markup("<em>x</em>"));
    assert!(looks_like_markup("a < b"));
    assert!(!looks_like_markup("a > b"));
    assert!(!looks_like_markup("plain"));
}

#[test]
fn extract_plain_text_separates_block_elements() {
    assert_eq!(extract_plain_text("<p>One</p><p>Two</p>"), "One Two");
    assert_eq!(extract_plain_text("<h2>Title</h2>body<br>end"), "Title body end");
}

#[test]
fn extract_plain_text_joins_inline_elements() {
    assert_eq!(extract_plain_text("un<strong>believ</strong>able"), "unbelievable");
}

#[test]
fn extract_plain_text_drops_scripts_styles_and_comments() {
    assert_eq!(
        extract_plain_text("<style>p { color: red }</style><p>Shown</p><script>alert(1)</script><!-- hidden -->"),
        "Shown"
    );
}

#[test]
fn extract_plain_text_decodes_entities() {
    assert_eq!(
        extract_plain_text("<p>Fish &amp; chips &#8212; &#x41;&lt;</p>"),
        "Fish & chips — A<"
    );
}

#[test]
fn extract_plain_text_tolerates_malformed_markup() {
    assert_eq!(extract_plain_text("<b>Hello <i>world"), "Hello world");
    assert_eq!(extract_plain_text("broken </div> tail"), "broken tail");
}

#[test]
fn extract_plain_text_keeps_less_than_that_opens_no_tag() {
    assert_eq!(extract_plain_text("a < b"), "a < b");
    assert_eq!(extract_plain_text("I <3 you"), "I <3 you");
    assert_eq!(extract_plain_text("1 < 2 and 3 > 2"), "1 < 2 and 3 > 2");
    assert_eq!(extract_plain_text("x<y"), "x<y");
    assert_eq!(extract_plain_text("price < 5 &lt; 6"), "price < 5 < 6");
    assert_eq!(extract_plain_text("<"), "<");
}

#[test]
fn extract_plain_text_mixes_stray_less_than_with_tags() {
    assert_eq!(extract_plain_text("<b>a < b</b> wins"), "a < b wins");
}

#[test]
fn escape_stray_delimiters_leaves_tags_comments_and_entities() {
    assert_eq!(
        escape_stray_delimiters("<p class=\"x\">a<3 & b &amp; c</p><!-- 1 < 2 -->"),
        "<p class=\"x\">a&lt;3 &amp; b &amp; c</p><!-- 1 < 2 -->"
    );
}

#[test]
fn derive_label_keeps_stray_less_than() {
    let def = definition(Some("title"));
    assert_eq!(
        derive_label(&hero(json!("a < b")), Some(&def)),
        Some("a < b".to_string())
    );
}

#[test]
fn whitespace_only_plain_label_is_shown_verbatim() {
    let def = definition(Some("title"));
    assert_eq!(
        derive_label(&hero(json!("   ")), Some(&def)),
        Some("   ".to_string())
    );
}

#[test]
fn decode_entities_leaves_unknown_sequences() {
    assert_eq!(decode_entities("a &bogus; b & c"), "a &bogus; b & c");
}

#[test]
fn label_cache_reuses_result_for_unchanged_value() {
    let def = definition(Some("title"));
    let mut cache = LabelCache::new();
    let block = hero(json!("<i>Cached</i>"));

    assert_eq!(cache.derive(&block, Some(&def)), Some("Cached".to_string()));
    assert_eq!(cache.derive(&block, Some(&def)), Some("Cached".to_string()));
    assert_eq!(cache.extractions(), 1);

    let changed = hero(json!("<i>Changed</i>"));
    assert_eq!(cache.derive(&changed, Some(&def)), Some("Changed".to_string()));
    assert_eq!(cache.extractions(), 2);

    assert_eq!(cache.derive(&hero(json!("")), Some(&def)), None);
    assert_eq!(cache.derive(&changed, Some(&def)), Some("Changed".to_string()));
    assert_eq!(cache.extractions(), 3);
}

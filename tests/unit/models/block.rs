use super::*;
use serde_json::json;

#[test]
fn path_display_joins_steps() {
    assert_eq!(BlockPath::root(2).to_string(), "2");
    let nested = BlockPath::root(2).child("items", 0).child("cells", 3);
    assert_eq!(nested.to_string(), "2.items.0.cells.3");
    assert_eq!(nested.depth(), 2);
}

#[test]
fn path_parses_its_own_display() {
    let path = BlockPath::root(1).child("items", 4);
    let parsed: BlockPath = path.to_string().parse().unwrap();
    assert_eq!(parsed, path);
}

#[test]
fn path_rejects_malformed_input() {
    for bad in ["", "x", "1.items", "1.items.x", "1.2.3", "1..0", "-1"] {
        assert!(bad.parse::<BlockPath>().is_err(), "{bad:?} should not parse");
    }
}

#[test]
fn block_field_lookup() {
    let block = Block::new(BlockId::from("a"), "hero").with_field("title", json!("Hi"));
    assert_eq!(block.field("title"), Some(&json!("Hi")));
    assert_eq!(block.field("missing"), None);
    assert_eq!(block.id.to_string(), "a");
}

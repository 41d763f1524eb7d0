use super::*;
use serde_json::json;

fn block(id: &str, kind: &str) -> Block {
    Block::new(BlockId::from(id), kind)
}

fn ids(list: &[&str]) -> Vec<BlockId> {
    list.iter().map(|s| BlockId::from(*s)).collect()
}

fn sample_tree() -> BlockTree {
    BlockTree::from_nodes(vec![
        BlockNode::leaf(block("a", "hero")),
        BlockNode::leaf(block("b", "list")).with_slot(
            "items",
            vec![
                BlockNode::leaf(block("b1", "item")),
                BlockNode::leaf(block("b2", "item")),
            ],
        ),
        BlockNode::leaf(block("c", "text")),
    ])
}

#[test]
fn test_from_nodes_preserves_order_and_slots() {
    let tree = sample_tree();
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.root_ids(), ids(&["a", "b", "c"]));
    assert_eq!(tree.children(&BlockId::from("b"), "items"), ids(&["b1", "b2"]));
    assert!(tree.children(&BlockId::from("a"), "items").is_empty());
}

#[test]
fn test_duplicate_ids_on_load_are_replaced() {
    let tree = BlockTree::from_nodes(vec![
        BlockNode::leaf(block("x", "hero")),
        BlockNode::leaf(block("x", "hero")),
        BlockNode::leaf(block("", "hero")),
    ]);
    let roots = tree.root_ids();
    assert_eq!(roots.len(), 3);
    assert_eq!(roots[0], BlockId::from("x"));
    assert_ne!(roots[1], roots[0]);
    assert!(!roots[2].as_str().is_empty());
}

#[test]
fn test_path_of_and_resolve_path_agree() {
    let tree = sample_tree();
    let b2 = BlockId::from("b2");
    let path = tree.path_of(&b2).unwrap();
    assert_eq!(path.to_string(), "1.items.1");
    assert_eq!(tree.resolve_path(&path), Some(&b2));
    assert_eq!(tree.resolve_path(&BlockPath::root(9)), None);
    assert_eq!(
        tree.resolve_path(&BlockPath::root(1).child("items", 5)),
        None
    );
}

#[test]
fn test_insert_into_slot_at_index() {
    let mut tree = sample_tree();
    let at = SlotRef::Child {
        parent: BlockId::from("b"),
        slot: "items".into(),
    };
    let id = tree
        .insert(&at, Some(1), BlockNode::leaf(block("new", "item")))
        .unwrap();
    assert_eq!(id, BlockId::from("new"));
    assert_eq!(
        tree.children(&BlockId::from("b"), "items"),
        ids(&["b1", "new", "b2"])
    );
    assert_eq!(tree.parent_of(&id), Some(at));
}

#[test]
fn test_insert_into_unknown_parent_fails() {
    let mut tree = sample_tree();
    let at = SlotRef::Child {
        parent: BlockId::from("nope"),
        slot: "items".into(),
    };
    let err = tree
        .insert(&at, None, BlockNode::leaf(block("n", "item")))
        .unwrap_err();
    assert_eq!(err, BlockTreeError::UnknownParent(BlockId::from("nope")));
}

#[test]
fn test_remove_drops_subtree() {
    let mut tree = sample_tree();
    let removed = tree.remove(&BlockId::from("b")).unwrap();
    assert_eq!(removed[0], BlockId::from("b"));
    assert_eq!(removed.len(), 3);
    assert_eq!(tree.root_ids(), ids(&["a", "c"]));
    assert!(!tree.contains(&BlockId::from("b1")));
    assert!(tree.remove(&BlockId::from("b")).is_err());
}

#[test]
fn test_duplicate_places_deep_copy_after_original() {
    let mut tree = sample_tree();
    let copy = tree.duplicate(&BlockId::from("b")).unwrap();
    let roots = tree.root_ids();
    assert_eq!(roots.len(), 4);
    assert_eq!(roots[2], copy);
    assert_ne!(copy, BlockId::from("b"));

    let copied_children = tree.children(&copy, "items");
    assert_eq!(copied_children.len(), 2);
    for child in &copied_children {
        assert!(!ids(&["b1", "b2"]).contains(child));
    }
    assert_eq!(tree.get(&copy).unwrap().kind, "list");
}

#[test]
fn test_move_to_within_slot() {
    let mut tree = sample_tree();
    tree.move_to(&BlockId::from("a"), &BlockId::from("c")).unwrap();
    assert_eq!(tree.root_ids(), ids(&["b", "c", "a"]));

    tree.move_to(&BlockId::from("a"), &BlockId::from("b")).unwrap();
    assert_eq!(tree.root_ids(), ids(&["a", "b", "c"]));
}

#[test]
fn test_move_to_across_slots() {
    let mut tree = sample_tree();
    tree.move_to(&BlockId::from("c"), &BlockId::from("b2")).unwrap();
    assert_eq!(tree.root_ids(), ids(&["a", "b"]));
    assert_eq!(
        tree.children(&BlockId::from("b"), "items"),
        ids(&["b1", "c", "b2"])
    );
    assert_eq!(tree.path_of(&BlockId::from("c")).unwrap().to_string(), "1.items.1");
}

#[test]
fn test_move_into_own_subtree_is_rejected() {
    let mut tree = sample_tree();
    assert_eq!(
        tree.move_to(&BlockId::from("b"), &BlockId::from("b1")),
        Err(BlockTreeError::MoveIntoDescendant)
    );
    assert_eq!(
        tree.move_to(&BlockId::from("b"), &BlockId::from("b")),
        Err(BlockTreeError::MoveOntoSelf)
    );
    assert_eq!(tree.root_ids(), ids(&["a", "b", "c"]));
}

#[test]
fn test_set_field_reports_changes() {
    let mut tree = sample_tree();
    let a = BlockId::from("a");
    assert!(tree.set_field(&a, "title", json!("Hello")).unwrap());
    assert!(!tree.set_field(&a, "title", json!("Hello")).unwrap());
    assert_eq!(tree.get(&a).unwrap().field("title"), Some(&json!("Hello")));
}

#[test]
fn test_to_nodes_round_trips_structure() {
    let tree = sample_tree();
    let rebuilt = BlockTree::from_nodes(tree.to_nodes());
    assert_eq!(rebuilt.root_ids(), tree.root_ids());
    assert_eq!(
        rebuilt.children(&BlockId::from("b"), "items"),
        ids(&["b1", "b2"])
    );
}

#[test]
fn test_is_within() {
    let tree = sample_tree();
    assert!(tree.is_within(&BlockId::from("b1"), &BlockId::from("b")));
    assert!(tree.is_within(&BlockId::from("b"), &BlockId::from("b")));
    assert!(!tree.is_within(&BlockId::from("b"), &BlockId::from("b1")));
    assert!(!tree.is_within(&BlockId::from("a"), &BlockId::from("b")));
}

use super::*;

#[test]
fn later_nodes_win_within_a_layer() {
    let mut tree = UiTree::new();
    tree.push(Node::new(
        Id::raw(1),
        Rect::new(0, 0, 20, 1),
        Sense::CLICK,
        NodeKind::BlockRow { token: 1 },
    ));
    tree.push(Node::new(
        Id::raw(2),
        Rect::new(18, 0, 2, 1),
        Sense::CLICK,
        NodeKind::Button,
    ));

    assert_eq!(tree.hit_test(Pos::new(19, 0)).map(|n| n.id), Some(Id::raw(2)));
    assert_eq!(tree.hit_test(Pos::new(3, 0)).map(|n| n.id), Some(Id::raw(1)));
    assert!(tree.hit_test(Pos::new(3, 1)).is_none());
}

#[test]
fn sense_filter_skips_nodes() {
    let mut tree = UiTree::new();
    tree.push(Node::new(
        Id::raw(1),
        Rect::new(0, 0, 10, 10),
        Sense::SCROLL,
        NodeKind::Sidebar,
    ));
    tree.push(Node::new(
        Id::raw(2),
        Rect::new(0, 0, 10, 1),
        Sense::CLICK | Sense::HOVER,
        NodeKind::BlockRow { token: 7 },
    ));

    let scroll = tree.hit_test_with_sense(Pos::new(1, 0), Sense::SCROLL);
    assert_eq!(scroll.map(|n| n.id), Some(Id::raw(1)));

    let higher_layer = Node {
        layer: 1,
        ..Node::new(Id::raw(3), Rect::new(0, 0, 10, 10), Sense::CLICK, NodeKind::Unknown)
    };
    tree.push(higher_layer);
    let click = tree.hit_test_with_sense(Pos::new(1, 0), Sense::CLICK);
    assert_eq!(click.map(|n| n.id), Some(Id::raw(3)));
}

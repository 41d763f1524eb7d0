use super::*;

#[test]
fn rect_contains_is_inclusive_exclusive() {
    let r = Rect::new(10, 20, 3, 2);
    assert!(r.contains(Pos::new(10, 20)));
    assert!(r.contains(Pos::new(12, 21)));

    assert!(!r.contains(Pos::new(13, 20)));
    assert!(!r.contains(Pos::new(12, 22)));
    assert!(!r.contains(Pos::new(9, 20)));
}

#[test]
fn rect_empty_never_contains() {
    assert!(!Rect::new(0, 0, 0, 10).contains(Pos::new(0, 0)));
    assert!(!Rect::new(0, 0, 10, 0).contains(Pos::new(0, 0)));
}

#[test]
fn intersect_clips_and_handles_disjoint() {
    let a = Rect::new(0, 0, 10, 10);
    assert_eq!(a.intersect(Rect::new(5, 5, 10, 10)), Rect::new(5, 5, 5, 5));
    assert!(a.intersect(Rect::new(20, 20, 3, 3)).is_empty());
}

#[test]
fn splits_partition_the_rect() {
    let r = Rect::new(2, 1, 40, 10);
    let (left, rest) = r.split_left(15);
    assert_eq!(left, Rect::new(2, 1, 15, 10));
    assert_eq!(rest, Rect::new(17, 1, 25, 10));

    let (body, status) = r.split_bottom(1);
    assert_eq!(body, Rect::new(2, 1, 40, 9));
    assert_eq!(status, Rect::new(2, 10, 40, 1));

    let (all, none) = r.split_left(99);
    assert_eq!(all, r);
    assert!(none.is_empty());
}

#[test]
fn row_is_one_line_or_empty() {
    let r = Rect::new(0, 5, 8, 3);
    assert_eq!(r.row(2), Rect::new(0, 7, 8, 1));
    assert!(r.row(3).is_empty());
}

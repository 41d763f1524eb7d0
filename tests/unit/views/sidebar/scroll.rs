use super::*;

fn scheduler() -> ScrollScheduler {
    ScrollScheduler::new(Duration::from_millis(100))
}

#[test]
fn request_fires_only_after_delay() {
    let mut s = scheduler();
    let anchor = ScrollAnchor::new();
    anchor.set_line(Some(12));
    let t0 = Instant::now();
    s.schedule(t0, &anchor);

    assert_eq!(s.next_deadline(), Some(t0 + Duration::from_millis(100)));
    assert_eq!(s.poll(t0 + Duration::from_millis(50)), None);
    assert_eq!(s.pending().len(), 1);
    assert_eq!(s.poll(t0 + Duration::from_millis(100)), Some(12));
    assert!(s.pending().is_empty());
}

#[test]
fn dropped_anchor_makes_request_a_noop() {
    let mut s = scheduler();
    let anchor = ScrollAnchor::new();
    anchor.set_line(Some(3));
    let t0 = Instant::now();
    s.schedule(t0, &anchor);
    assert!(s.pending()[0].is_live());

    drop(anchor);
    assert!(!s.pending()[0].is_live());
    assert_eq!(s.poll(t0 + Duration::from_secs(1)), None);
    assert!(s.pending().is_empty());
}

#[test]
fn anchor_line_is_read_when_due() {
    let mut s = scheduler();
    let anchor = ScrollAnchor::new();
    let t0 = Instant::now();
    s.schedule(t0, &anchor);
    anchor.set_line(Some(40));
    assert_eq!(s.poll(t0 + Duration::from_millis(100)), Some(40));
}

#[test]
fn latest_live_request_wins() {
    let mut s = scheduler();
    let parent = ScrollAnchor::new();
    parent.set_line(Some(2));
    let child = ScrollAnchor::new();
    child.set_line(Some(5));
    let t0 = Instant::now();
    s.schedule(t0, &parent);
    s.schedule(t0, &child);
    assert_eq!(s.poll(t0 + Duration::from_millis(100)), Some(5));
}

#[test]
fn jump_scroll_without_smoothing() {
    let mut scroll = SmoothScroll::new(false);
    scroll.scroll_to(30, 20);
    assert_eq!(scroll.offset(), 20);
    assert!(!scroll.is_animating());
    assert!(!scroll.step());
}

#[test]
fn smooth_scroll_eases_to_target() {
    let mut scroll = SmoothScroll::new(true);
    scroll.scroll_to(8, 100);
    assert_eq!(scroll.offset(), 0);

    let mut offsets = Vec::new();
    while scroll.step() {
        offsets.push(scroll.offset());
    }
    assert_eq!(offsets, vec![4, 6, 7, 8]);
    assert!(!scroll.is_animating());
}

#[test]
fn smooth_scroll_moves_upward() {
    let mut scroll = SmoothScroll::new(true);
    scroll.scroll_by(10, 100);
    scroll.scroll_to(7, 100);
    assert!(scroll.step());
    assert_eq!(scroll.offset(), 8);
    while scroll.step() {}
    assert_eq!(scroll.offset(), 7);
}

#[test]
fn wheel_scroll_cancels_animation_and_clamps() {
    let mut scroll = SmoothScroll::new(true);
    scroll.scroll_to(10, 100);
    scroll.scroll_by(-3, 100);
    assert!(!scroll.is_animating());
    assert_eq!(scroll.offset(), 0);
    scroll.scroll_by(50, 12);
    assert_eq!(scroll.offset(), 12);
}

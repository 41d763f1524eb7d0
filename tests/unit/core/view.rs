use super::*;

#[test]
fn predicates_match_variants() {
    assert!(EventResult::Consumed.is_consumed());
    assert!(EventResult::Ignored.is_ignored());
    assert!(EventResult::Quit.is_quit());
    assert!(!EventResult::Ignored.is_consumed());
}

#[test]
fn or_prefers_quit_then_consumed() {
    use EventResult::*;
    assert_eq!(Ignored.or(Ignored), Ignored);
    assert_eq!(Ignored.or(Consumed), Consumed);
    assert_eq!(Consumed.or(Quit), Quit);
    assert_eq!(Quit.or(Ignored), Quit);
}

struct Idle;

impl View for Idle {
    fn handle_input(&mut self, _event: &InputEvent) -> EventResult {
        EventResult::Ignored
    }

    fn render(&mut self, _backend: &mut dyn Backend, _area: Rect) {}
}

#[test]
fn default_tick_is_idle() {
    let mut view = Idle;
    assert!(!view.tick(Instant::now()));
    assert_eq!(view.next_deadline(), None);
}

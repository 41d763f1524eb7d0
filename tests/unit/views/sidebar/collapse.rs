use super::*;

#[test]
fn initial_state_follows_focus() {
    assert_eq!(CollapseController::new(true).state(), CollapseState::Expanded);
    assert_eq!(CollapseController::new(false).state(), CollapseState::Collapsed);
}

#[test]
fn toggle_twice_is_identity() {
    for focused in [true, false] {
        let mut c = CollapseController::new(focused);
        let before = c.state();
        c.toggle();
        assert_ne!(c.state(), before);
        c.toggle();
        assert_eq!(c.state(), before);
    }
}

#[test]
fn force_set_is_absolute() {
    let mut c = CollapseController::new(false);
    c.force_set(false);
    assert!(!c.is_collapsed());
    c.force_set(false);
    assert!(!c.is_collapsed());
    c.force_set(true);
    assert!(c.is_collapsed());
}

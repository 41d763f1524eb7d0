use super::*;

#[test]
fn first_observation_never_transitions() {
    for focused in [true, false] {
        let mut sync = FocusSync::new();
        assert!(!sync.is_primed());
        assert_eq!(sync.observe(focused), None);
        assert!(sync.is_primed());
    }
}

#[test]
fn only_changes_transition() {
    let mut sync = FocusSync::new();
    sync.observe(false);
    assert_eq!(sync.observe(false), None);
    assert_eq!(sync.observe(true), Some(FocusTransition::Gained));
    assert_eq!(sync.observe(true), None);
    assert_eq!(sync.observe(false), Some(FocusTransition::Lost));
}

#[test]
fn sync_expands_on_gain_and_collapses_on_loss() {
    let mut collapse = CollapseController::new(false);
    let mut sync = FocusSync::new();
    assert_eq!(sync.sync(false, &mut collapse), None);
    assert!(collapse.is_collapsed());

    assert_eq!(sync.sync(true, &mut collapse), Some(FocusTransition::Gained));
    assert!(!collapse.is_collapsed());

    assert_eq!(sync.sync(false, &mut collapse), Some(FocusTransition::Lost));
    assert!(collapse.is_collapsed());
}

#[test]
fn manual_expand_survives_until_focus_changes() {
    let mut collapse = CollapseController::new(false);
    let mut sync = FocusSync::new();
    sync.sync(false, &mut collapse);

    collapse.toggle();
    assert_eq!(sync.sync(false, &mut collapse), None);
    assert!(!collapse.is_collapsed());

    sync.sync(true, &mut collapse);
    sync.sync(false, &mut collapse);
    assert!(collapse.is_collapsed());
}

#[test]
fn mount_while_focused_does_not_fire() {
    let mut collapse = CollapseController::new(true);
    let mut sync = FocusSync::new();
    assert_eq!(sync.sync(true, &mut collapse), None);
    assert!(!collapse.is_collapsed());
}

use super::*;

#[test]
fn drop_is_about_its_target() {
    let ev = UiEvent::Drop {
        payload: DragPayload::Block { token: 4 },
        target: Id::raw(9),
        pos: Pos::new(2, 5),
    };
    assert_eq!(ev.subject(), Some(Id::raw(9)));
    assert_eq!(ev.pos(), Pos::new(2, 5));
}

#[test]
fn hover_leaving_everything_has_no_subject() {
    let ev = UiEvent::HoverChanged {
        from: Some(Id::raw(1)),
        to: None,
        pos: Pos::new(0, 0),
    };
    assert_eq!(ev.subject(), None);
}

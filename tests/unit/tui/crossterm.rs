use super::*;

#[test]
fn ctrl_space_normalizes_from_null() {
    let event = ct::KeyEvent::new(ct::KeyCode::Null, ct::KeyModifiers::NONE);
    let converted = KeyEvent::from(event);
    assert_eq!(converted.code, KeyCode::Char(' '));
    assert!(converted.modifiers.contains(KeyModifiers::CONTROL));
}

#[test]
fn key_release_is_dropped() {
    let mut event = ct::KeyEvent::new(ct::KeyCode::Char('s'), ct::KeyModifiers::CONTROL);
    event.kind = ct::KeyEventKind::Release;
    assert_eq!(into_input_event(ct::Event::Key(event)), None);

    event.kind = ct::KeyEventKind::Press;
    let Some(InputEvent::Key(key)) = into_input_event(ct::Event::Key(event)) else {
        panic!("press should convert");
    };
    assert_eq!(key.code, KeyCode::Char('s'));
    assert_eq!(key.modifiers, KeyModifiers::CONTROL);
}

#[test]
fn mouse_drag_keeps_button_and_position() {
    let event = ct::MouseEvent {
        kind: ct::MouseEventKind::Drag(ct::MouseButton::Left),
        column: 7,
        row: 3,
        modifiers: ct::KeyModifiers::SHIFT | ct::KeyModifiers::ALT,
    };
    let converted = MouseEvent::from(event);
    assert_eq!(converted.kind, MouseEventKind::Drag(MouseButton::Left));
    assert_eq!((converted.column, converted.row), (7, 3));
    assert!(converted.modifiers.contains(KeyModifiers::SHIFT | KeyModifiers::ALT));
    assert!(!converted.modifiers.contains(KeyModifiers::CONTROL));
}

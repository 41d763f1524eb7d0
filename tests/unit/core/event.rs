use super::*;

#[test]
fn test_key_creation() {
    let key = Key::ctrl(KeyCode::Char('s'));
    assert_eq!(key.code, KeyCode::Char('s'));
    assert_eq!(key.modifiers, KeyModifiers::CONTROL);
}

#[test]
fn test_key_from_event() {
    let event = KeyEvent::press(KeyCode::Enter, KeyModifiers::NONE);
    let key: Key = event.into();
    assert_eq!(key.code, KeyCode::Enter);
}

#[test]
fn test_key_from_uppercase_char_adds_shift() {
    let event = KeyEvent::press(KeyCode::Char('S'), KeyModifiers::CONTROL);
    let key: Key = event.into();
    assert_eq!(key.code, KeyCode::Char('s'));
    assert!(key.modifiers.contains(KeyModifiers::CONTROL));
    assert!(key.modifiers.contains(KeyModifiers::SHIFT));
}

#[test]
fn test_input_event_kind_helpers() {
    let key = InputEvent::Key(KeyEvent::press(KeyCode::Char('a'), KeyModifiers::NONE));
    assert!(key.is_key());
    assert!(!key.is_mouse());

    let mouse = InputEvent::Mouse(MouseEvent {
        kind: MouseEventKind::Moved,
        column: 1,
        row: 2,
        modifiers: KeyModifiers::NONE,
    });
    assert!(mouse.is_mouse());
    assert_eq!(mouse.as_mouse().map(|m| (m.column, m.row)), Some((1, 2)));
}

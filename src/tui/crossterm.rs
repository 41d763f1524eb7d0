//! crossterm → `core::event` 转换。

use crate::core::event::{
    InputEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::event as ct;
use std::io;
use std::time::Duration;

/// Waits up to `timeout` for the next terminal event.
///
/// Returns `Ok(None)` on timeout and for events the editor never reacts to (key releases).
pub fn poll_input(timeout: Duration) -> io::Result<Option<InputEvent>> {
    if !ct::poll(timeout)? {
        return Ok(None);
    }
    Ok(into_input_event(ct::read()?))
}

pub fn into_input_event(event: ct::Event) -> Option<InputEvent> {
    let event = match event {
        ct::Event::Key(key) if key.kind == ct::KeyEventKind::Release => return None,
        ct::Event::Key(key) => InputEvent::Key(key.into()),
        ct::Event::Mouse(mouse) => InputEvent::Mouse(mouse.into()),
        ct::Event::Resize(w, h) => InputEvent::Resize(w, h),
        ct::Event::FocusGained => InputEvent::FocusGained,
        ct::Event::FocusLost => InputEvent::FocusLost,
        ct::Event::Paste(text) => InputEvent::Paste(text),
    };
    Some(event)
}

impl From<ct::KeyEvent> for KeyEvent {
    fn from(event: ct::KeyEvent) -> Self {
        let mut modifiers = KeyModifiers::from(event.modifiers);
        let code = match event.code {
            ct::KeyCode::Char(ch) => KeyCode::Char(ch),
            ct::KeyCode::Enter => KeyCode::Enter,
            ct::KeyCode::Tab => KeyCode::Tab,
            ct::KeyCode::BackTab => KeyCode::BackTab,
            ct::KeyCode::Esc => KeyCode::Esc,
            ct::KeyCode::Backspace => KeyCode::Backspace,
            ct::KeyCode::Delete => KeyCode::Delete,
            ct::KeyCode::Up => KeyCode::Up,
            ct::KeyCode::Down => KeyCode::Down,
            ct::KeyCode::Left => KeyCode::Left,
            ct::KeyCode::Right => KeyCode::Right,
            ct::KeyCode::Home => KeyCode::Home,
            ct::KeyCode::End => KeyCode::End,
            ct::KeyCode::PageUp => KeyCode::PageUp,
            ct::KeyCode::PageDown => KeyCode::PageDown,
            ct::KeyCode::F(n) => KeyCode::F(n),
            // Some terminals report ctrl+space as NUL.
            ct::KeyCode::Null => {
                modifiers |= KeyModifiers::CONTROL;
                KeyCode::Char(' ')
            }
            _ => KeyCode::Unknown,
        };
        let kind = match event.kind {
            ct::KeyEventKind::Press => KeyEventKind::Press,
            ct::KeyEventKind::Release => KeyEventKind::Release,
            ct::KeyEventKind::Repeat => KeyEventKind::Repeat,
        };
        KeyEvent {
            code,
            modifiers,
            kind,
        }
    }
}

impl From<ct::KeyModifiers> for KeyModifiers {
    fn from(mods: ct::KeyModifiers) -> Self {
        [
            (ct::KeyModifiers::SHIFT, KeyModifiers::SHIFT),
            (ct::KeyModifiers::CONTROL, KeyModifiers::CONTROL),
            (ct::KeyModifiers::ALT, KeyModifiers::ALT),
            (ct::KeyModifiers::SUPER, KeyModifiers::SUPER),
        ]
        .into_iter()
        .filter(|(from, _)| mods.contains(*from))
        .fold(KeyModifiers::NONE, |acc, (_, to)| acc | to)
    }
}

impl From<ct::MouseButton> for MouseButton {
    fn from(button: ct::MouseButton) -> Self {
        match button {
            ct::MouseButton::Left => MouseButton::Left,
            ct::MouseButton::Right => MouseButton::Right,
            ct::MouseButton::Middle => MouseButton::Middle,
        }
    }
}

impl From<ct::MouseEvent> for MouseEvent {
    fn from(event: ct::MouseEvent) -> Self {
        let kind = match event.kind {
            ct::MouseEventKind::Down(button) => MouseEventKind::Down(button.into()),
            ct::MouseEventKind::Up(button) => MouseEventKind::Up(button.into()),
            ct::MouseEventKind::Drag(button) => MouseEventKind::Drag(button.into()),
            ct::MouseEventKind::Moved => MouseEventKind::Moved,
            ct::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
            ct::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
            ct::MouseEventKind::ScrollLeft => MouseEventKind::ScrollLeft,
            ct::MouseEventKind::ScrollRight => MouseEventKind::ScrollRight,
        };
        MouseEvent {
            kind,
            column: event.column,
            row: event.row,
            modifiers: event.modifiers.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tui/crossterm.rs"]
mod tests;

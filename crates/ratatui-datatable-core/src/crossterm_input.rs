//! Conversions from `crossterm` events (enabled by the `crossterm` feature).
//!
//! Events without a counterpart in [`crate::input`] (focus changes, resizes, key releases,
//! unsupported keys) are rejected with [`Unsupported`] so apps can simply skip them.

use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;

use crossterm::event as ct;

/// The crossterm event has no equivalent in this crate's input model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unsupported;

impl TryFrom<ct::Event> for InputEvent {
    type Error = Unsupported;

    fn try_from(ev: ct::Event) -> Result<Self, Self::Error> {
        match ev {
            ct::Event::Key(key) => KeyEvent::try_from(key).map(InputEvent::Key),
            ct::Event::Mouse(m) => MouseEvent::try_from(m).map(InputEvent::Mouse),
            ct::Event::Paste(s) => Ok(InputEvent::Paste(s)),
            _ => Err(Unsupported),
        }
    }
}

impl TryFrom<ct::KeyEvent> for KeyEvent {
    type Error = Unsupported;

    fn try_from(key: ct::KeyEvent) -> Result<Self, Self::Error> {
        if key.kind != ct::KeyEventKind::Press {
            return Err(Unsupported);
        }
        let code = match key.code {
            ct::KeyCode::Char(c) => KeyCode::Char(c),
            ct::KeyCode::Enter => KeyCode::Enter,
            ct::KeyCode::Backspace => KeyCode::Backspace,
            ct::KeyCode::Delete => KeyCode::Delete,
            ct::KeyCode::Tab => KeyCode::Tab,
            ct::KeyCode::BackTab => KeyCode::BackTab,
            ct::KeyCode::Esc => KeyCode::Esc,
            ct::KeyCode::Left => KeyCode::Left,
            ct::KeyCode::Right => KeyCode::Right,
            ct::KeyCode::Up => KeyCode::Up,
            ct::KeyCode::Down => KeyCode::Down,
            ct::KeyCode::Home => KeyCode::Home,
            ct::KeyCode::End => KeyCode::End,
            ct::KeyCode::PageUp => KeyCode::PageUp,
            ct::KeyCode::PageDown => KeyCode::PageDown,
            _ => return Err(Unsupported),
        };
        Ok(KeyEvent {
            code,
            modifiers: key.modifiers.into(),
        })
    }
}

impl TryFrom<ct::MouseEvent> for MouseEvent {
    type Error = Unsupported;

    fn try_from(m: ct::MouseEvent) -> Result<Self, Self::Error> {
        let kind = match m.kind {
            ct::MouseEventKind::Down(b) => MouseEventKind::Down(b.into()),
            ct::MouseEventKind::Up(b) => MouseEventKind::Up(b.into()),
            ct::MouseEventKind::Drag(b) => MouseEventKind::Drag(b.into()),
            ct::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
            ct::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
            _ => return Err(Unsupported),
        };
        Ok(MouseEvent {
            x: m.column,
            y: m.row,
            kind,
            modifiers: m.modifiers.into(),
        })
    }
}

impl From<ct::KeyModifiers> for KeyModifiers {
    fn from(m: ct::KeyModifiers) -> Self {
        KeyModifiers {
            shift: m.contains(ct::KeyModifiers::SHIFT),
            ctrl: m.contains(ct::KeyModifiers::CONTROL),
            alt: m.contains(ct::KeyModifiers::ALT),
        }
    }
}

impl From<ct::MouseButton> for MouseButton {
    fn from(b: ct::MouseButton) -> Self {
        match b {
            ct::MouseButton::Left => MouseButton::Left,
            ct::MouseButton::Right => MouseButton::Right,
            ct::MouseButton::Middle => MouseButton::Middle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_release_is_unsupported() {
        let mut key = ct::KeyEvent::new(ct::KeyCode::Enter, ct::KeyModifiers::NONE);
        key.kind = ct::KeyEventKind::Release;
        assert_eq!(KeyEvent::try_from(key), Err(Unsupported));
    }

    #[test]
    fn shift_click_keeps_modifiers() {
        let m = ct::MouseEvent {
            kind: ct::MouseEventKind::Down(ct::MouseButton::Left),
            column: 3,
            row: 7,
            modifiers: ct::KeyModifiers::SHIFT,
        };
        let ev = InputEvent::try_from(ct::Event::Mouse(m)).unwrap();
        assert_eq!(
            ev,
            InputEvent::Mouse(MouseEvent::click(3, 7).with_modifiers(KeyModifiers::shift()))
        );
    }
}

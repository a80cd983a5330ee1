use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

/// Returns `true` if `event` is exactly `pattern`, modifiers included.
///
/// Uppercase characters are matched with or without an explicit shift: terminals disagree on
/// whether `G` arrives as `Char('G')` or `Char('G') + SHIFT`.
pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    if pattern.code != event.code {
        return false;
    }
    match pattern.code {
        KeyCode::Char(c) if c.is_uppercase() => {
            pattern.modifiers.ctrl == event.modifiers.ctrl
                && pattern.modifiers.alt == event.modifiers.alt
        }
        _ => modifiers_match(pattern.modifiers, event.modifiers),
    }
}

pub fn matches_any(patterns: &[KeyEvent], event: &KeyEvent) -> bool {
    patterns.iter().any(|p| key_event_matches(p, event))
}

fn modifiers_match(pattern: KeyModifiers, event: KeyModifiers) -> bool {
    pattern.shift == event.shift && pattern.ctrl == event.ctrl && pattern.alt == event.alt
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code)
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers {
        shift: false,
        ctrl: true,
        alt: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_modifiers_are_required() {
        assert!(key_event_matches(&key_char('s'), &key_char('s')));
        assert!(!key_event_matches(&key_char('s'), &key_ctrl('s')));
    }

    #[test]
    fn uppercase_ignores_shift() {
        let shifted = key_char('G').with_modifiers(KeyModifiers::shift());
        assert!(key_event_matches(&key_char('G'), &shifted));
        assert!(key_event_matches(&key_char('G'), &key_char('G')));
        assert!(!key_event_matches(&key_char('G'), &key_ctrl('G')));
    }
}

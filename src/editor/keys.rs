//! Keystroke filtering and Enter semantics for the equation input
//!
//! The input only admits characters that can appear in an equation;
//! everything else is suppressed before it reaches the buffer. Navigation
//! and editing keys, and any chord with a control/command modifier
//! (copy/paste, select-all), always pass through.

use serde::{Deserialize, Serialize};

/// Modifier keys held during a keystroke
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

/// Whether a keystroke is allowed to reach the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDecision {
    Accept,
    Reject,
}

impl KeyDecision {
    pub fn is_accepted(self) -> bool {
        matches!(self, KeyDecision::Accept)
    }
}

/// What the host should do with an Enter keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterAction {
    /// Suppress the default newline and trigger submission
    Submit,
    /// Not a submit signal; let the host surface handle it normally
    PassThrough,
}

/// Keys that edit or navigate rather than insert text
const EDITING_KEYS: &[&str] = &[
    "ArrowLeft",
    "ArrowRight",
    "ArrowUp",
    "ArrowDown",
    "Backspace",
    "Delete",
    "Tab",
    "Home",
    "End",
];

/// Decide whether a keystroke may reach the equation buffer.
///
/// `key` is the DOM `KeyboardEvent.key` value: a single character for
/// printable keys, a name like "ArrowLeft" otherwise.
pub fn filter_keystroke(key: &str, modifiers: Modifiers) -> KeyDecision {
    // Control/command chords are shortcuts, never text
    if modifiers.ctrl || modifiers.meta {
        return KeyDecision::Accept;
    }

    if EDITING_KEYS.contains(&key) {
        return KeyDecision::Accept;
    }

    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => {
            if is_equation_char(ch) {
                KeyDecision::Accept
            } else {
                KeyDecision::Reject
            }
        }
        // Named keys ("Shift", "Escape", ...) insert nothing
        _ => KeyDecision::Accept,
    }
}

/// Characters that may appear in an equation or initial condition
fn is_equation_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || ch.is_whitespace()
        || matches!(ch, '+' | '-' | '*' | '/' | '(' | ')' | '.' | '^' | '=')
}

/// Enter without Shift submits; Shift+Enter is left to the host
pub fn on_enter(shift_held: bool) -> EnterAction {
    if shift_held {
        EnterAction::PassThrough
    } else {
        EnterAction::Submit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(key: &str) -> KeyDecision {
        filter_keystroke(key, Modifiers::default())
    }

    #[test]
    fn test_equation_characters_accepted() {
        for key in ["a", "z", "Y", "5", "0", "+", "-", "*", "/", "(", ")", ".", "^", "=", " "] {
            assert!(plain(key).is_accepted(), "expected {:?} accepted", key);
        }
    }

    #[test]
    fn test_other_printables_rejected() {
        for key in ["@", "#", ";", "$", "%", "&", "!", "¿", "~"] {
            assert!(!plain(key).is_accepted(), "expected {:?} rejected", key);
        }
    }

    #[test]
    fn test_editing_keys_accepted() {
        for key in EDITING_KEYS {
            assert!(plain(key).is_accepted(), "expected {:?} accepted", key);
        }
    }

    #[test]
    fn test_control_chords_always_accepted() {
        let ctrl = Modifiers {
            ctrl: true,
            ..Default::default()
        };
        let meta = Modifiers {
            meta: true,
            ..Default::default()
        };
        // Ctrl+V / Cmd+V paste even though 'v' alone is fine and '@' is not
        assert!(filter_keystroke("@", ctrl).is_accepted());
        assert!(filter_keystroke("v", meta).is_accepted());
    }

    #[test]
    fn test_named_keys_pass_through() {
        assert!(plain("Escape").is_accepted());
        assert!(plain("Shift").is_accepted());
    }

    #[test]
    fn test_enter_submits_without_shift() {
        assert_eq!(on_enter(false), EnterAction::Submit);
        assert_eq!(on_enter(true), EnterAction::PassThrough);
    }
}

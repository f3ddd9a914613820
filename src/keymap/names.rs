//! Name tables and the canonical string encoding of key events
//!
//! Canonical names look like `"Shift+Ctrl+F1"`, `"Alt+a"` or `"Left Mouse"`.
//! Modifiers are always written in the order Shift, Ctrl, Alt.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use super::types::{Button, Key, KeyEvent, Modifiers};

/// Written for characters and buttons that have no printable name
pub const UNKNOWN_NAME: &str = "???";

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Button::NoButton => write!(f, "{}", UNKNOWN_NAME),
            Button::Pause => write!(f, "Pause"),
            Button::Home => write!(f, "Home"),
            Button::End => write!(f, "End"),
            Button::Left => write!(f, "Left Arrow"),
            Button::Right => write!(f, "Right Arrow"),
            Button::Up => write!(f, "Up Arrow"),
            Button::Down => write!(f, "Down Arrow"),
            Button::PageUp => write!(f, "Page Up"),
            Button::PageDown => write!(f, "Page Down"),
            Button::Insert => write!(f, "Insert"),
            Button::Backspace => write!(f, "Backspace"),
            Button::Delete => write!(f, "Delete"),
            Button::Keypad(n) => write!(f, "Kp{}", n),
            Button::KeypadPeriod => write!(f, "Kp_Period"),
            Button::KeypadDivide => write!(f, "Kp_Divide"),
            Button::KeypadMultiply => write!(f, "Kp_Multiply"),
            Button::KeypadMinus => write!(f, "Kp_Minus"),
            Button::KeypadPlus => write!(f, "Kp_Plus"),
            Button::KeypadEnter => write!(f, "Kp_Enter"),
            Button::KeypadEquals => write!(f, "Kp_Equals"),
            Button::F(n) => write!(f, "F{}", n),
            Button::Help => write!(f, "Help"),
            Button::Print => write!(f, "Print"),
            Button::Sysreq => write!(f, "Sysreq"),
            Button::Break => write!(f, "Break"),
            Button::Menu => write!(f, "Menu"),
            Button::Power => write!(f, "Power"),
            Button::Euro => write!(f, "Euro"),
            Button::Undo => write!(f, "Undo"),
            Button::LeftMouse => write!(f, "Left Mouse"),
            Button::MiddleMouse => write!(f, "Middle Mouse"),
            Button::RightMouse => write!(f, "Right Mouse"),
            Button::WheelUp => write!(f, "Wheel Up"),
            Button::WheelDown => write!(f, "Wheel Down"),
            Button::Mouse(n) => write!(f, "Mouse Button {}", n),
            Button::Joystick(n) => write!(f, "Joystick {}", n),
            Button::HatUp => write!(f, "Hat Up"),
            Button::HatRight => write!(f, "Hat Right"),
            Button::HatDown => write!(f, "Hat Down"),
            Button::HatLeft => write!(f, "Hat Left"),
        }
    }
}

/// Name of a whitespace/control character that has a spelled-out form
pub fn special_char_name(c: char) -> Option<&'static str> {
    match c {
        '\u{8}' => Some("Backspace"),
        '\t' => Some("Tab"),
        '\r' => Some("Enter"),
        ' ' => Some("Space"),
        _ => None,
    }
}

/// Characters that are written as themselves
pub fn is_printable(c: char) -> bool {
    !c.is_control() && !c.is_whitespace()
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.shift() {
            f.write_str("Shift+")?;
        }
        if self.mods.ctrl() {
            f.write_str("Ctrl+")?;
        }
        if self.mods.alt() {
            f.write_str("Alt+")?;
        }

        match self.key {
            Key::Button(button) => write!(f, "{}", button),
            Key::Char(c) => match special_char_name(c) {
                Some(name) => f.write_str(name),
                None if is_printable(c) => write!(f, "{}", c),
                None => f.write_str(UNKNOWN_NAME),
            },
        }
    }
}

/// Canonical string for a key event
pub fn key_event_to_string(event: &KeyEvent) -> String {
    event.to_string()
}

/// Errors from parsing a key name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    Empty,
    UnknownKey(String),
}

impl fmt::Display for KeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyParseError::Empty => write!(f, "empty key name"),
            KeyParseError::UnknownKey(k) => write!(f, "unknown button name \"{}\"", k),
        }
    }
}

impl std::error::Error for KeyParseError {}

/// Lowercased name → key, built once. Button names win over the special
/// character names they share (`Backspace`).
fn name_table() -> &'static HashMap<String, Key> {
    static TABLE: OnceLock<HashMap<String, Key>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = HashMap::new();
        for button in Button::all() {
            table.insert(button.to_string().to_lowercase(), Key::Button(button));
        }
        for c in ['\u{8}', '\t', '\r', ' '] {
            if let Some(name) = special_char_name(c) {
                table.entry(name.to_lowercase()).or_insert(Key::Char(c));
            }
        }
        table
    })
}

/// Resolve the key part of a name (everything after the modifiers)
fn resolve_key_name(name: &str) -> Option<Key> {
    if let Some(key) = name_table().get(&name.to_lowercase()) {
        return Some(*key);
    }

    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if is_printable(c) => Some(Key::Char(c)),
        _ => None,
    }
}

/// Split `"Shift+Ctrl+F1"` into `("Shift+Ctrl+", "F1")`.
/// A trailing `+` is the plus key itself, so `"Shift+"` splits into
/// `("Shift", "+")`.
fn split_key_name(s: &str) -> (&str, &str) {
    if let Some(prefix) = s.strip_suffix('+') {
        return (prefix, "+");
    }
    match s.rfind('+') {
        Some(idx) => (&s[..=idx], &s[idx + 1..]),
        None => ("", s),
    }
}

fn parse_modifiers(prefix: &str) -> Modifiers {
    let haystack = format!("+{}+", prefix.to_lowercase());
    Modifiers::new(
        haystack.contains("+shift+"),
        haystack.contains("+ctrl+"),
        haystack.contains("+alt+"),
    )
}

impl FromStr for KeyEvent {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(KeyParseError::Empty);
        }

        let (prefix, name) = split_key_name(s);
        let key =
            resolve_key_name(name).ok_or_else(|| KeyParseError::UnknownKey(name.to_string()))?;

        Ok(KeyEvent::new(key, parse_modifiers(prefix)))
    }
}

/// Parse a canonical key name, returning `None` when it cannot be resolved
pub fn string_to_key_event(s: &str) -> Option<KeyEvent> {
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::Modifiers;

    #[test]
    fn test_modifier_prefix_order_is_fixed() {
        let mods = Modifiers::ALT | Modifiers::CTRL | Modifiers::SHIFT;
        let event = KeyEvent::button(Button::F(1)).with_mods(mods);
        assert_eq!(event.to_string(), "Shift+Ctrl+Alt+F1");

        let event = KeyEvent::char('x').with_mods(Modifiers::ALT | Modifiers::CTRL);
        assert_eq!(event.to_string(), "Ctrl+Alt+x");
    }

    #[test]
    fn test_button_names() {
        assert_eq!(Button::LeftMouse.to_string(), "Left Mouse");
        assert_eq!(Button::KeypadEnter.to_string(), "Kp_Enter");
        assert_eq!(Button::Keypad(7).to_string(), "Kp7");
        assert_eq!(Button::Mouse(6).to_string(), "Mouse Button 6");
        assert_eq!(Button::Left.to_string(), "Left Arrow");
        assert_eq!(Button::NoButton.to_string(), "???");
    }

    #[test]
    fn test_special_characters() {
        assert_eq!(KeyEvent::char('\t').to_string(), "Tab");
        assert_eq!(KeyEvent::char('\r').to_string(), "Enter");
        assert_eq!(KeyEvent::char(' ').to_string(), "Space");
        assert_eq!(KeyEvent::char('\u{8}').to_string(), "Backspace");
    }

    #[test]
    fn test_unprintable_character() {
        assert_eq!(KeyEvent::char('\u{1b}').to_string(), "???");
        assert_eq!(KeyEvent::char('\n').to_string(), "???");
        assert_eq!(
            KeyEvent::char('\u{7f}').with_mods(Modifiers::CTRL).to_string(),
            "Ctrl+???"
        );
    }

    #[test]
    fn test_non_ascii_character() {
        let event = KeyEvent::char('é').with_mods(Modifiers::ALT);
        assert_eq!(event.to_string(), "Alt+é");
        assert_eq!("Alt+é".parse::<KeyEvent>(), Ok(event));
    }

    #[test]
    fn test_parse_empty_fails() {
        assert_eq!("".parse::<KeyEvent>(), Err(KeyParseError::Empty));
        assert!(string_to_key_event("").is_none());
    }

    #[test]
    fn test_parse_unknown_fails() {
        assert_eq!(
            "Ctrl+Banana".parse::<KeyEvent>(),
            Err(KeyParseError::UnknownKey("Banana".to_string()))
        );
        assert!(string_to_key_event("???").is_none());
        assert!(string_to_key_event("F13").is_none());
    }

    #[test]
    fn test_parse_button_with_mods() {
        let event: KeyEvent = "Shift+F1".parse().unwrap();
        assert_eq!(event.key, Key::Button(Button::F(1)));
        assert_eq!(event.mods, Modifiers::SHIFT);
    }

    #[test]
    fn test_parse_names_case_insensitively() {
        let event: KeyEvent = "ctrl+left mouse".parse().unwrap();
        assert_eq!(event.key, Key::Button(Button::LeftMouse));
        assert!(event.mods.ctrl());

        let event: KeyEvent = "SHIFT+kp_enter".parse().unwrap();
        assert_eq!(event.key, Key::Button(Button::KeypadEnter));
        assert!(event.mods.shift());
    }

    #[test]
    fn test_parse_modifier_order_irrelevant() {
        let a: KeyEvent = "Alt+Shift+Ctrl+Delete".parse().unwrap();
        let b: KeyEvent = "Shift+Ctrl+Alt+Delete".parse().unwrap();
        assert_eq!(a.mods, b.mods);
        assert_eq!(a.to_string(), "Shift+Ctrl+Alt+Delete");
    }

    #[test]
    fn test_parse_unrecognised_prefix_words_ignored() {
        let event: KeyEvent = "Meta+Ctrl+q".parse().unwrap();
        assert_eq!(event.mods, Modifiers::CTRL);
        assert_eq!(event.key, Key::Char('q'));
    }

    #[test]
    fn test_backspace_resolves_to_button() {
        let event: KeyEvent = "Backspace".parse().unwrap();
        assert_eq!(event.key, Key::Button(Button::Backspace));
    }

    #[test]
    fn test_special_names_resolve_to_characters() {
        assert_eq!("Tab".parse::<KeyEvent>().unwrap().key, Key::Char('\t'));
        assert_eq!("Enter".parse::<KeyEvent>().unwrap().key, Key::Char('\r'));
        assert_eq!("Space".parse::<KeyEvent>().unwrap().key, Key::Char(' '));
    }

    #[test]
    fn test_plus_key() {
        let plus = KeyEvent::char('+');
        assert_eq!(plus.to_string(), "+");
        assert_eq!("+".parse::<KeyEvent>(), Ok(plus));

        let ctrl_plus = plus.with_mods(Modifiers::CTRL);
        assert_eq!(ctrl_plus.to_string(), "Ctrl++");
        let parsed: KeyEvent = "Ctrl++".parse().unwrap();
        assert_eq!(parsed.key, Key::Char('+'));
        assert_eq!(parsed.mods, Modifiers::CTRL);
    }

    #[test]
    fn test_modifier_before_bare_plus_is_kept() {
        let parsed: KeyEvent = "Shift+".parse().unwrap();
        assert_eq!(parsed.key, Key::Char('+'));
        assert_eq!(parsed.mods, Modifiers::SHIFT);

        let parsed: KeyEvent = "Ctrl+Alt+".parse().unwrap();
        assert_eq!(parsed.mods, Modifiers::CTRL | Modifiers::ALT);
        assert_eq!(parsed.to_string(), "Ctrl+Alt++");
    }

    #[test]
    fn test_multi_character_name_fails() {
        assert!(string_to_key_event("ab").is_none());
        assert!(string_to_key_event("Alt+xy").is_none());
    }

    #[test]
    fn test_every_button_round_trips() {
        let mods = [
            Modifiers::NONE,
            Modifiers::SHIFT,
            Modifiers::CTRL | Modifiers::ALT,
            Modifiers::SHIFT | Modifiers::CTRL | Modifiers::ALT,
        ];
        for button in Button::all() {
            for m in mods {
                let event = KeyEvent::button(button).with_mods(m);
                let name = event.to_string();
                let parsed: KeyEvent = name.parse().unwrap_or_else(|e| panic!("{}: {}", name, e));
                assert_eq!(parsed, event, "{}", name);
                assert_eq!(parsed.mods, m, "{}", name);
            }
        }
    }

    #[test]
    fn test_printable_ascii_round_trips() {
        for c in '!'..='~' {
            for m in [Modifiers::NONE, Modifiers::CTRL, Modifiers::ALT | Modifiers::SHIFT] {
                let event = KeyEvent::char(c).with_mods(m);
                let name = event.to_string();
                assert_eq!(string_to_key_event(&name), Some(event), "{}", name);
            }
        }
    }
}

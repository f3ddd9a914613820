//! Adapter to convert winit input events to our KeyEvent type

use winit::event::{MouseButton, MouseScrollDelta};
use winit::keyboard::{
    Key as WinitKey, KeyCode as WinitKeyCode, ModifiersState, NamedKey, PhysicalKey,
};

use super::types::{Button, Key, KeyEvent, Modifiers, EXTRA_MOUSE_BUTTONS};

/// Convert winit modifier state to our Modifiers
pub fn modifiers_from_winit(state: ModifiersState) -> Modifiers {
    Modifiers::new(state.shift_key(), state.control_key(), state.alt_key())
}

/// Keypad keys are identified physically so they stay distinct from the
/// main keyboard digits.
fn keypad_button(physical_key: PhysicalKey) -> Option<Button> {
    let PhysicalKey::Code(code) = physical_key else {
        return None;
    };
    match code {
        WinitKeyCode::Numpad0 => Some(Button::Keypad(0)),
        WinitKeyCode::Numpad1 => Some(Button::Keypad(1)),
        WinitKeyCode::Numpad2 => Some(Button::Keypad(2)),
        WinitKeyCode::Numpad3 => Some(Button::Keypad(3)),
        WinitKeyCode::Numpad4 => Some(Button::Keypad(4)),
        WinitKeyCode::Numpad5 => Some(Button::Keypad(5)),
        WinitKeyCode::Numpad6 => Some(Button::Keypad(6)),
        WinitKeyCode::Numpad7 => Some(Button::Keypad(7)),
        WinitKeyCode::Numpad8 => Some(Button::Keypad(8)),
        WinitKeyCode::Numpad9 => Some(Button::Keypad(9)),
        WinitKeyCode::NumpadDecimal => Some(Button::KeypadPeriod),
        WinitKeyCode::NumpadDivide => Some(Button::KeypadDivide),
        WinitKeyCode::NumpadMultiply => Some(Button::KeypadMultiply),
        WinitKeyCode::NumpadSubtract => Some(Button::KeypadMinus),
        WinitKeyCode::NumpadAdd => Some(Button::KeypadPlus),
        WinitKeyCode::NumpadEnter => Some(Button::KeypadEnter),
        WinitKeyCode::NumpadEqual => Some(Button::KeypadEquals),
        _ => None,
    }
}

fn named_key(named: &NamedKey) -> Option<Key> {
    let key = match named {
        // These arrive as characters, as if typed
        NamedKey::Enter => Key::Char('\r'),
        NamedKey::Tab => Key::Char('\t'),
        NamedKey::Space => Key::Char(' '),
        NamedKey::Escape => Key::Char('\u{1b}'),

        NamedKey::Backspace => Key::Button(Button::Backspace),
        NamedKey::Delete => Key::Button(Button::Delete),
        NamedKey::Insert => Key::Button(Button::Insert),
        NamedKey::Home => Key::Button(Button::Home),
        NamedKey::End => Key::Button(Button::End),
        NamedKey::PageUp => Key::Button(Button::PageUp),
        NamedKey::PageDown => Key::Button(Button::PageDown),
        NamedKey::ArrowUp => Key::Button(Button::Up),
        NamedKey::ArrowDown => Key::Button(Button::Down),
        NamedKey::ArrowLeft => Key::Button(Button::Left),
        NamedKey::ArrowRight => Key::Button(Button::Right),
        NamedKey::Pause => Key::Button(Button::Pause),
        NamedKey::Help => Key::Button(Button::Help),
        NamedKey::PrintScreen => Key::Button(Button::Print),
        NamedKey::ContextMenu => Key::Button(Button::Menu),
        NamedKey::Power => Key::Button(Button::Power),
        NamedKey::Undo => Key::Button(Button::Undo),

        NamedKey::F1 => Key::Button(Button::F(1)),
        NamedKey::F2 => Key::Button(Button::F(2)),
        NamedKey::F3 => Key::Button(Button::F(3)),
        NamedKey::F4 => Key::Button(Button::F(4)),
        NamedKey::F5 => Key::Button(Button::F(5)),
        NamedKey::F6 => Key::Button(Button::F(6)),
        NamedKey::F7 => Key::Button(Button::F(7)),
        NamedKey::F8 => Key::Button(Button::F(8)),
        NamedKey::F9 => Key::Button(Button::F(9)),
        NamedKey::F10 => Key::Button(Button::F(10)),
        NamedKey::F11 => Key::Button(Button::F(11)),
        NamedKey::F12 => Key::Button(Button::F(12)),

        _ => return None,
    };
    Some(key)
}

/// Convert winit keyboard event data to a KeyEvent
///
/// Returns None if the key cannot be mapped (e.g., bare modifier keys)
pub fn key_event_from_winit(
    logical_key: &WinitKey,
    physical_key: PhysicalKey,
    mods: ModifiersState,
) -> Option<KeyEvent> {
    let mods = modifiers_from_winit(mods);

    if let Some(button) = keypad_button(physical_key) {
        return Some(KeyEvent::button(button).with_mods(mods));
    }

    let key = match logical_key {
        WinitKey::Named(named) => named_key(named)?,
        WinitKey::Character(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Char(c),
                _ => return None,
            }
        }
        _ => return None,
    };

    Some(KeyEvent::new(key, mods))
}

/// Convert a winit mouse button
pub fn button_from_mouse(button: MouseButton) -> Option<Button> {
    match button {
        MouseButton::Left => Some(Button::LeftMouse),
        MouseButton::Middle => Some(Button::MiddleMouse),
        MouseButton::Right => Some(Button::RightMouse),
        MouseButton::Back => Some(Button::Mouse(6)),
        MouseButton::Forward => Some(Button::Mouse(7)),
        MouseButton::Other(n) => u8::try_from(n)
            .ok()
            .filter(|n| EXTRA_MOUSE_BUTTONS.contains(n))
            .map(Button::Mouse),
    }
}

/// Convert a winit mouse button press with the current modifiers
pub fn key_event_from_mouse(button: MouseButton, mods: ModifiersState) -> Option<KeyEvent> {
    button_from_mouse(button).map(|b| KeyEvent::button(b).with_mods(modifiers_from_winit(mods)))
}

/// Convert a scroll wheel movement; no vertical movement maps to nothing
pub fn key_event_from_wheel(delta: MouseScrollDelta, mods: ModifiersState) -> Option<KeyEvent> {
    let dy = match delta {
        MouseScrollDelta::LineDelta(_, y) => f64::from(y),
        MouseScrollDelta::PixelDelta(pos) => pos.y,
    };

    let button = if dy > 0.0 {
        Button::WheelUp
    } else if dy < 0.0 {
        Button::WheelDown
    } else {
        return None;
    };
    Some(KeyEvent::button(button).with_mods(modifiers_from_winit(mods)))
}

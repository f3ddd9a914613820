//! Core types for the binding table: KeyEvent, Key, Button, Modifiers, Phase

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Modifier keys as a bitfield for efficient storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(0b001);
    pub const CTRL: Modifiers = Modifiers(0b010);
    pub const ALT: Modifiers = Modifiers(0b100);

    /// Create modifiers from individual flags
    pub const fn new(shift: bool, ctrl: bool, alt: bool) -> Self {
        let mut bits = 0u8;
        if shift {
            bits |= 0b001;
        }
        if ctrl {
            bits |= 0b010;
        }
        if alt {
            bits |= 0b100;
        }
        Modifiers(bits)
    }

    /// Raw bit value
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check if shift is held
    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b001 != 0
    }

    /// Check if ctrl is held
    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b010 != 0
    }

    /// Check if alt is held
    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b100 != 0
    }

    /// Check if no modifiers are held
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Remove every modifier in other
    #[inline]
    pub const fn without(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 & !other.0)
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

/// Function keys F1-F12
pub const FUNCTION_KEYS: RangeInclusive<u8> = 1..=12;
/// Keypad digits Kp0-Kp9
pub const KEYPAD_DIGITS: RangeInclusive<u8> = 0..=9;
/// Mouse buttons beyond left/middle/right
pub const EXTRA_MOUSE_BUTTONS: RangeInclusive<u8> = 6..=10;
/// Joystick buttons
pub const JOYSTICK_BUTTONS: RangeInclusive<u8> = 1..=32;

/// A named button: anything that does not decode to a character
///
/// Variant order is the ordering used by the binding table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Button {
    NoButton,
    Pause,
    Home,
    End,
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Insert,
    Backspace,
    Delete,

    // Keypad
    Keypad(u8), // Kp0-Kp9
    KeypadPeriod,
    KeypadDivide,
    KeypadMultiply,
    KeypadMinus,
    KeypadPlus,
    KeypadEnter,
    KeypadEquals,

    F(u8), // F1-F12

    Help,
    Print,
    Sysreq,
    Break,
    Menu,
    Power,
    Euro,
    Undo,

    // Mouse
    LeftMouse,
    MiddleMouse,
    RightMouse,
    WheelUp,
    WheelDown,
    Mouse(u8), // Mouse Button 6-10

    // Joystick
    Joystick(u8), // Joystick 1-32
    HatUp,
    HatRight,
    HatDown,
    HatLeft,
}

impl Button {
    /// Check that numbered variants are inside their range
    pub fn is_valid(self) -> bool {
        match self {
            Button::Keypad(n) => KEYPAD_DIGITS.contains(&n),
            Button::F(n) => FUNCTION_KEYS.contains(&n),
            Button::Mouse(n) => EXTRA_MOUSE_BUTTONS.contains(&n),
            Button::Joystick(n) => JOYSTICK_BUTTONS.contains(&n),
            _ => true,
        }
    }

    /// Every button that has a name, in table order. `NoButton` is excluded.
    pub fn all() -> impl Iterator<Item = Button> {
        use Button::*;

        [
            Pause, Home, End, Left, Right, Up, Down, PageUp, PageDown, Insert, Backspace, Delete,
        ]
        .into_iter()
        .chain(KEYPAD_DIGITS.map(Keypad))
        .chain([
            KeypadPeriod,
            KeypadDivide,
            KeypadMultiply,
            KeypadMinus,
            KeypadPlus,
            KeypadEnter,
            KeypadEquals,
        ])
        .chain(FUNCTION_KEYS.map(F))
        .chain([
            Help,
            Print,
            Sysreq,
            Break,
            Menu,
            Power,
            Euro,
            Undo,
            LeftMouse,
            MiddleMouse,
            RightMouse,
            WheelUp,
            WheelDown,
        ])
        .chain(EXTRA_MOUSE_BUTTONS.map(Mouse))
        .chain(JOYSTICK_BUTTONS.map(Joystick))
        .chain([HatUp, HatRight, HatDown, HatLeft])
    }
}

/// The base key of an event: a decoded character or a named button
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Button(Button),
    Char(char),
}

/// Uppercase a character when it maps to a single code point
pub fn fold_case(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// A single input event: a key with modifiers
///
/// Equality and ordering are case-insensitive for characters: `a`, `A` and
/// `Shift+a` are the same key, while Ctrl and Alt still tell keys apart.
#[derive(Clone, Copy, Debug)]
pub struct KeyEvent {
    pub key: Key,
    pub mods: Modifiers,
}

impl KeyEvent {
    /// Create a new key event
    pub const fn new(key: Key, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    /// Create a button event with no modifiers
    pub const fn button(button: Button) -> Self {
        Self {
            key: Key::Button(button),
            mods: Modifiers::NONE,
        }
    }

    /// Create a character event with no modifiers
    pub const fn char(c: char) -> Self {
        Self {
            key: Key::Char(c),
            mods: Modifiers::NONE,
        }
    }

    /// Replace the modifiers (builder pattern)
    pub const fn with_mods(mut self, mods: Modifiers) -> Self {
        self.mods = mods;
        self
    }

    /// The character, if this is a character event
    pub fn character(&self) -> Option<char> {
        match self.key {
            Key::Char(c) => Some(c),
            Key::Button(_) => None,
        }
    }

    /// The named button, or `NoButton` for character events
    pub fn button_id(&self) -> Button {
        match self.key {
            Key::Button(b) => b,
            Key::Char(_) => Button::NoButton,
        }
    }
}

impl Ord for KeyEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.key, other.key) {
            (Key::Button(_), Key::Char(_)) => Ordering::Less,
            (Key::Char(_), Key::Button(_)) => Ordering::Greater,
            (Key::Button(a), Key::Button(b)) => a.cmp(&b).then(self.mods.cmp(&other.mods)),
            (Key::Char(a), Key::Char(b)) => fold_case(a).cmp(&fold_case(b)).then_with(|| {
                self.mods
                    .without(Modifiers::SHIFT)
                    .cmp(&other.mods.without(Modifiers::SHIFT))
            }),
        }
    }
}

impl PartialOrd for KeyEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for KeyEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for KeyEvent {}

impl Hash for KeyEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.key {
            Key::Button(b) => {
                0u8.hash(state);
                b.hash(state);
                self.mods.hash(state);
            }
            Key::Char(c) => {
                1u8.hash(state);
                fold_case(c).hash(state);
                self.mods.without(Modifiers::SHIFT).hash(state);
            }
        }
    }
}

/// Whether a binding fires when the key goes down or when it comes back up
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    #[serde(rename = "down")]
    Press,
    #[serde(rename = "up")]
    Release,
}

impl Phase {
    #[inline]
    pub const fn is_press(self) -> bool {
        matches!(self, Phase::Press)
    }

    pub const fn from_press(press: bool) -> Self {
        if press {
            Phase::Press
        } else {
            Phase::Release
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Press => write!(f, "down"),
            Phase::Release => write!(f, "up"),
        }
    }
}

impl FromStr for Phase {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "down" => Ok(Phase::Press),
            "up" => Ok(Phase::Release),
            _ => Err(()),
        }
    }
}

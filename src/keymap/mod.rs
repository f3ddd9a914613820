//! Key binding table for game input
//!
//! This module provides:
//! - A key event type with a canonical string form (`"Shift+Ctrl+F1"`, `"Alt+a"`)
//! - A table mapping key events to command strings, separately for key press
//!   and key release, with reverse lookup and change callbacks
//! - The game's action catalog and default bindings
//! - `bind` / `unbind` console commands and YAML persistence
//!
//! # Architecture
//!
//! ```text
//! winit event → KeyEvent → KeyBindingTable::get() → command string
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut table = KeyBindingTable::new();
//! let key: KeyEvent = "Shift+F1".parse()?;
//! table.bind(key, Phase::Press, "jump");
//! assert_eq!(table.get(&key, Phase::Press), "jump");
//! ```

mod actions;
mod config;
mod console;
mod names;
mod table;
mod types;
mod upgrade;
mod winit_adapter;

pub use actions::{mode_for, ActionBinding, BindMode, ACTIONS, DEFAULT_BINDINGS};
pub use config::{
    load_bindings_file, parse_bindings_yaml, save_bindings_file, BindingEntry, BindingsFile,
    KeymapError,
};
pub use console::{
    bind_script, cmd_bind, cmd_unbind, execute, list_bindings, run_script, tokenize, CommandError,
};
pub use names::{
    is_printable, key_event_to_string, special_char_name, string_to_key_event, KeyParseError,
    UNKNOWN_NAME,
};
pub use table::{CallbackId, ChangeCallback, KeyBindingTable};
pub use types::{
    fold_case, Button, Key, KeyEvent, Modifiers, Phase, EXTRA_MOUSE_BUTTONS, FUNCTION_KEYS,
    JOYSTICK_BUTTONS, KEYPAD_DIGITS,
};
pub use upgrade::{upgrade_bindings, CURRENT_BINDINGS_VERSION};
pub use winit_adapter::{
    button_from_mouse, key_event_from_mouse, key_event_from_wheel, key_event_from_winit,
    modifiers_from_winit,
};

#[cfg(test)]
mod tests;

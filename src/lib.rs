//! bzkeys - key binding table for a multiplayer tank game
//!
//! The crate maps keyboard, mouse and joystick events (with Shift, Ctrl and
//! Alt modifiers) to console command strings, with a canonical text form for
//! every key so bindings can be saved, edited and displayed.

pub mod cli;
pub mod config_paths;
pub mod keymap;
pub mod tracing;

// Re-export commonly used types
pub use keymap::{Button, Key, KeyBindingTable, KeyEvent, Modifiers, Phase};

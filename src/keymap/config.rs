//! YAML persistence for key bindings
//!
//! ```yaml
//! version: 3
//! bindings:
//!   - key: "Shift+F1"
//!     state: down
//!     command: messagepanel all
//! ```
//!
//! `state` defaults to `down` when omitted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::table::KeyBindingTable;
use super::types::Phase;
use super::upgrade::CURRENT_BINDINGS_VERSION;

/// Root structure of a bindings file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingsFile {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub bindings: Vec<BindingEntry>,
}

/// A single binding entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingEntry {
    pub key: String,
    #[serde(default)]
    pub state: Phase,
    pub command: String,
}

impl Default for BindingsFile {
    fn default() -> Self {
        Self {
            version: CURRENT_BINDINGS_VERSION,
            bindings: Vec::new(),
        }
    }
}

impl BindingsFile {
    /// Snapshot every binding in the table
    pub fn from_table(table: &KeyBindingTable) -> Self {
        let mut bindings = Vec::with_capacity(table.len());
        table.iterate(|name, phase, command| {
            bindings.push(BindingEntry {
                key: name.to_string(),
                state: phase,
                command: command.to_string(),
            });
        });
        Self {
            version: CURRENT_BINDINGS_VERSION,
            bindings,
        }
    }

    /// Bind every entry into the table
    ///
    /// Entries whose key does not parse are logged and skipped; they are
    /// returned so the caller can report them.
    pub fn apply_to(&self, table: &mut KeyBindingTable) -> Vec<KeymapError> {
        let mut skipped = Vec::new();
        for entry in &self.bindings {
            match table.string_to_key_event(&entry.key) {
                Some(event) => table.bind(event, entry.state, entry.command.as_str()),
                None => {
                    tracing::warn!(
                        "Skipping binding {:?} {} {:?}: unknown key",
                        entry.key,
                        entry.state,
                        entry.command
                    );
                    skipped.push(KeymapError::InvalidKey(entry.key.clone()));
                }
            }
        }
        skipped
    }
}

/// Load a bindings file from disk
pub fn load_bindings_file(path: &Path) -> Result<BindingsFile, KeymapError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    let file = parse_bindings_yaml(&content)?;
    tracing::info!(
        "Loaded {} bindings from {}",
        file.bindings.len(),
        path.display()
    );
    Ok(file)
}

/// Parse a bindings file from a YAML string
pub fn parse_bindings_yaml(yaml: &str) -> Result<BindingsFile, KeymapError> {
    serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))
}

/// Write a bindings file, creating the parent directory if needed
pub fn save_bindings_file(path: &Path, file: &BindingsFile) -> Result<(), KeymapError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| KeymapError::IoError(e.to_string()))?;
    }

    let content =
        serde_yaml::to_string(file).map_err(|e| KeymapError::SerializeError(e.to_string()))?;
    std::fs::write(path, content).map_err(|e| KeymapError::IoError(e.to_string()))?;

    tracing::info!(
        "Saved {} bindings to {}",
        file.bindings.len(),
        path.display()
    );
    Ok(())
}

/// Errors that can occur when loading or saving bindings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    InvalidKey(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
        }
    }
}

impl std::error::Error for KeymapError {}

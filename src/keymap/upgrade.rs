//! Upgrades for bindings saved by older clients

use super::table::KeyBindingTable;
use super::types::Phase;

/// Version written by this crate
pub const CURRENT_BINDINGS_VERSION: u32 = 3;

/// Commands that no longer exist; keys bound to them are freed
const OBSOLETE_COMMANDS: &[&str] = &[
    "roam translate left",
    "roam translate right",
    "roam translate up",
    "roam translate down",
    "roam translate forward",
    "roam translate backward",
    "roam rotate left",
    "roam rotate right",
    "roam rotate up",
    "roam rotate down",
    "roam rotate stop",
];

/// New bindings, added only where the key is still free
const ADDED_BINDINGS: &[(&str, &str)] = &[
    ("F4", "iconify"),
    ("Q", "toggleRadar"),
    ("W", "toggleConsole"),
];

/// Message panel tabs are added all together or not at all
const PANEL_BINDINGS: &[(&str, &str)] = &[
    ("Shift+F1", "messagepanel all"),
    ("Shift+F2", "messagepanel chat"),
    ("Shift+F3", "messagepanel server"),
    ("Shift+F4", "messagepanel misc"),
];

fn is_free(table: &KeyBindingTable, key: &str, phase: Phase) -> bool {
    table
        .string_to_key_event(key)
        .is_some_and(|event| table.get(&event, phase).is_empty())
}

fn bind_if_free(table: &mut KeyBindingTable, key: &str, phase: Phase, command: &str) {
    if !is_free(table, key, phase) {
        return;
    }
    if let Some(event) = table.string_to_key_event(key) {
        table.bind(event, phase, command);
    }
}

/// Bring bindings saved at `from_version` up to date, returning the new version
///
/// Steps are cumulative: a version 0 file gets every step.
pub fn upgrade_bindings(table: &mut KeyBindingTable, from_version: u32) -> u32 {
    if from_version >= CURRENT_BINDINGS_VERSION {
        return from_version;
    }

    let mut freed: usize = 0;
    if from_version == 0 {
        freed = OBSOLETE_COMMANDS
            .iter()
            .map(|command| table.unbind_command(command))
            .sum();

        for (key, command) in ADDED_BINDINGS {
            bind_if_free(table, key, Phase::Press, command);
        }

        if PANEL_BINDINGS
            .iter()
            .all(|(key, _)| is_free(table, key, Phase::Press))
        {
            for (key, command) in PANEL_BINDINGS {
                bind_if_free(table, key, Phase::Press, command);
            }
        }
    }

    if from_version <= 1 {
        bind_if_free(table, "Tab", Phase::Release, "jump");
    }

    if from_version <= 2 {
        bind_if_free(table, "7", Phase::Press, "addhunt");
    }

    tracing::info!(
        "Upgraded bindings from version {} to {} ({} obsolete bindings removed)",
        from_version,
        CURRENT_BINDINGS_VERSION,
        freed
    );
    CURRENT_BINDINGS_VERSION
}

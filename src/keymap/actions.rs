//! Game actions and their default key bindings
//!
//! Each action knows whether it is bound on key press, key release or both.
//! [`ActionBinding`] keeps a key → action association list in step with a
//! [`KeyBindingTable`].

use super::table::KeyBindingTable;
use super::types::Phase;

/// When an action's command should fire
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindMode {
    Press,
    Release,
    Both,
}

impl BindMode {
    /// Phases the table is bound in for this mode
    pub fn phases(self) -> &'static [Phase] {
        match self {
            BindMode::Press => &[Phase::Press],
            BindMode::Release => &[Phase::Release],
            BindMode::Both => &[Phase::Press, Phase::Release],
        }
    }
}

/// Bindable actions
pub const ACTIONS: &[(&str, BindMode)] = &[
    ("quit", BindMode::Press),
    ("fire", BindMode::Both),
    ("drop", BindMode::Press),
    ("identify", BindMode::Press),
    ("jump", BindMode::Press),
    ("send all", BindMode::Press),
    ("send team", BindMode::Press),
    ("send nemesis", BindMode::Press),
    ("send recipient", BindMode::Press),
    ("toggle displayScore", BindMode::Press),
    ("toggle displayBinoculars", BindMode::Press),
    ("pause", BindMode::Press),
    ("screenshot", BindMode::Press),
    ("time backward", BindMode::Press),
    ("time forward", BindMode::Press),
    ("toggle displayRadarFlags", BindMode::Press),
    ("toggle displayMainFlags", BindMode::Press),
    ("silence", BindMode::Press),
    ("toggle displayLabels", BindMode::Press),
    ("destruct", BindMode::Press),
    ("roam rotate left", BindMode::Both),
    ("roam rotate right", BindMode::Both),
    ("roam rotate up", BindMode::Both),
    ("roam rotate down", BindMode::Both),
    ("roam translate left", BindMode::Both),
    ("roam translate right", BindMode::Both),
    ("roam translate forward", BindMode::Both),
    ("roam translate backward", BindMode::Both),
    ("roam translate up", BindMode::Both),
    ("roam translate down", BindMode::Both),
    ("roam cycle subject backward", BindMode::Press),
    ("roam cycle subject forward", BindMode::Press),
    ("roam cycle type forward", BindMode::Press),
    ("roam zoom in", BindMode::Both),
    ("roam zoom out", BindMode::Both),
    ("roam zoom normal", BindMode::Both),
    ("servercommand", BindMode::Press),
    ("toggle displayFlagHelp", BindMode::Press),
    ("scrollpanel up", BindMode::Press),
    ("scrollpanel down", BindMode::Press),
    ("set displayRadarRange 0.25", BindMode::Press),
    ("set displayRadarRange 0.5", BindMode::Press),
    ("set displayRadarRange 1.0", BindMode::Press),
    ("toggle slowKeyboard", BindMode::Press),
    ("hunt", BindMode::Press),
    ("restart", BindMode::Release),
    ("autopilot", BindMode::Press),
];

/// Default key → action bindings, in key order
pub const DEFAULT_BINDINGS: &[(&str, &str)] = &[
    (",", "send nemesis"),
    ("-", "time backward"),
    (".", "send recipient"),
    ("1", "set displayRadarRange 0.25"),
    ("2", "set displayRadarRange 0.5"),
    ("3", "set displayRadarRange 1.0"),
    ("9", "autopilot"),
    ("=", "time forward"),
    ("A", "toggle slowKeyboard"),
    ("Alt+Down Arrow", "roam translate down"),
    ("Alt+Up Arrow", "roam translate up"),
    ("B", "toggle displayBinoculars"),
    ("Ctrl+Down Arrow", "roam rotate down"),
    ("Ctrl+Left Arrow", "roam rotate left"),
    ("Ctrl+Right Arrow", "roam rotate right"),
    ("Ctrl+Up Arrow", "roam rotate up"),
    ("Delete", "destruct"),
    ("Enter", "fire"),
    ("F", "toggle displayFlagHelp"),
    ("F10", "roam zoom out"),
    ("F11", "roam zoom normal"),
    ("F12", "quit"),
    ("F5", "screenshot"),
    ("F6", "roam cycle subject backward"),
    ("F7", "roam cycle subject forward"),
    ("F8", "roam cycle type forward"),
    ("F9", "roam zoom in"),
    ("H", "toggle displayRadarFlags"),
    ("I", "identify"),
    ("I", "restart"),
    ("J", "toggle displayMainFlags"),
    ("K", "silence"),
    ("L", "toggle displayLabels"),
    ("Left Mouse", "fire"),
    ("M", "send team"),
    ("Middle Mouse", "drop"),
    ("N", "send all"),
    ("O", "servercommand"),
    ("P", "pause"),
    ("Page Down", "scrollpanel down"),
    ("Page Up", "scrollpanel up"),
    ("Pause", "pause"),
    ("Right Mouse", "identify"),
    ("Right Mouse", "restart"),
    ("S", "toggle displayScore"),
    ("Shift+Down Arrow", "roam translate backward"),
    ("Shift+Left Arrow", "roam translate left"),
    ("Shift+Right Arrow", "roam translate right"),
    ("Shift+Up Arrow", "roam translate forward"),
    ("Space", "drop"),
    ("Tab", "jump"),
    ("U", "hunt"),
];

/// Bind mode of a catalogued action
pub fn mode_for(action: &str) -> Option<BindMode> {
    ACTIONS
        .iter()
        .find(|(name, _)| *name == action)
        .map(|(_, mode)| *mode)
}

/// Key → action associations for the catalogued actions
#[derive(Debug, Clone, Default)]
pub struct ActionBinding {
    bindings: Vec<(String, String)>,
}

impl ActionBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current `(key, action)` associations
    pub fn bindings(&self) -> &[(String, String)] {
        &self.bindings
    }

    /// Keys associated with an action
    pub fn keys_for_action(&self, action: &str) -> Vec<&str> {
        self.bindings
            .iter()
            .filter(|(_, bound)| bound == action)
            .map(|(key, _)| key.as_str())
            .collect()
    }

    /// Drop every association and bind the defaults instead
    pub fn reset_bindings(&mut self, table: &mut KeyBindingTable) {
        for (key, action) in std::mem::take(&mut self.bindings) {
            unbind_action(table, &action, &key);
        }

        self.bindings = DEFAULT_BINDINGS
            .iter()
            .map(|(key, action)| (key.to_string(), action.to_string()))
            .collect();

        for (key, action) in &self.bindings {
            bind_action(table, action, key);
        }
        tracing::info!("Reset to {} default bindings", self.bindings.len());
    }

    /// Rebuild the associations from whatever the table currently holds
    pub fn sync_from(&mut self, table: &KeyBindingTable) {
        self.bindings.clear();
        let mut found = Vec::new();
        table.iterate(|name, _, command| found.push((name.to_string(), command.to_string())));
        for (key, action) in found {
            self.associate_only(&key, &action);
        }
    }

    /// Associate a key with an action, replacing conflicting associations
    ///
    /// Unknown actions are ignored. With `apply` the table is updated as well.
    pub fn associate(&mut self, table: &mut KeyBindingTable, key: &str, action: &str, apply: bool) {
        if apply {
            for old in self.associate_only(key, action) {
                unbind_action(table, &old, key);
            }
            if mode_for(action).is_some() {
                bind_action(table, action, key);
            }
        } else {
            self.associate_only(key, action);
        }
    }

    /// Returns the actions that were displaced from `key`
    fn associate_only(&mut self, key: &str, action: &str) -> Vec<String> {
        let Some(mode) = mode_for(action) else {
            return Vec::new();
        };

        let mut displaced = Vec::new();
        self.bindings.retain(|(bound_key, bound_action)| {
            if bound_key != key {
                return true;
            }
            let existing = mode_for(bound_action).unwrap_or(BindMode::Press);
            let conflicts = match mode {
                BindMode::Both => true,
                BindMode::Press => existing != BindMode::Release,
                BindMode::Release => existing != BindMode::Press,
            };
            if conflicts {
                displaced.push(bound_action.clone());
            }
            !conflicts
        });

        self.bindings.push((key.to_string(), action.to_string()));
        displaced
    }

    /// Remove every association of an action and unbind it
    pub fn deassociate(&mut self, table: &mut KeyBindingTable, action: &str) {
        let mut removed = Vec::new();
        self.bindings.retain(|(key, bound)| {
            if bound == action {
                removed.push(key.clone());
                false
            } else {
                true
            }
        });
        for key in removed {
            unbind_action(table, action, &key);
        }
    }
}

fn bind_action(table: &mut KeyBindingTable, action: &str, key: &str) {
    let Some(event) = table.string_to_key_event(key) else {
        tracing::warn!("Cannot bind {:?}: unknown key {:?}", action, key);
        return;
    };
    let mode = mode_for(action).unwrap_or(BindMode::Press);
    for phase in mode.phases() {
        table.bind(event, *phase, action);
    }
}

fn unbind_action(table: &mut KeyBindingTable, action: &str, key: &str) {
    let Some(event) = table.string_to_key_event(key) else {
        return;
    };
    let mode = mode_for(action).unwrap_or(BindMode::Press);
    for phase in mode.phases() {
        table.unbind(event, *phase);
    }
}

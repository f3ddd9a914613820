//! KeyBindingTable: press/release maps from key events to command strings

use std::collections::BTreeMap;
use std::fmt;

use super::names::string_to_key_event;
use super::types::{KeyEvent, Phase};

/// Called with `(canonical key name, phase, command)` whenever a binding
/// changes. An empty command means the binding was removed.
pub type ChangeCallback = Box<dyn FnMut(&str, Phase, &str)>;

/// Handle returned by [`KeyBindingTable::add_callback`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CallbackId(u64);

/// Binding table for key press and key release commands
///
/// Both maps are ordered by the key event comparator, so enumeration order is
/// map order rather than insertion order.
#[derive(Default)]
pub struct KeyBindingTable {
    pressed: BTreeMap<KeyEvent, String>,
    released: BTreeMap<KeyEvent, String>,
    callbacks: Vec<(CallbackId, ChangeCallback)>,
    next_callback_id: u64,
}

impl KeyBindingTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, phase: Phase) -> &BTreeMap<KeyEvent, String> {
        match phase {
            Phase::Press => &self.pressed,
            Phase::Release => &self.released,
        }
    }

    fn map_mut(&mut self, phase: Phase) -> &mut BTreeMap<KeyEvent, String> {
        match phase {
            Phase::Press => &mut self.pressed,
            Phase::Release => &mut self.released,
        }
    }

    /// Bind a command to a key event, replacing any previous binding
    pub fn bind(&mut self, event: KeyEvent, phase: Phase, command: impl Into<String>) {
        let command = command.into();
        let map = self.map_mut(phase);
        // Re-insert so the stored event is the one most recently bound.
        map.remove(&event);
        map.insert(event, command.clone());

        let name = event.to_string();
        tracing::debug!(key = %name, %phase, command = %command, "bind");
        self.notify(&name, phase, &command);
    }

    /// Remove a binding, returning the command it had
    ///
    /// Does nothing (and notifies nobody) when the key is not bound.
    pub fn unbind(&mut self, event: KeyEvent, phase: Phase) -> Option<String> {
        let (stored, command) = self.map_mut(phase).remove_entry(&event)?;

        let name = stored.to_string();
        tracing::debug!(key = %name, %phase, command = %command, "unbind");
        self.notify(&name, phase, "");
        Some(command)
    }

    /// Remove every binding, press or release, whose command is exactly `command`
    pub fn unbind_command(&mut self, command: &str) -> usize {
        let mut doomed = Vec::new();
        for phase in [Phase::Press, Phase::Release] {
            doomed.extend(
                self.map(phase)
                    .iter()
                    .filter(|(_, bound)| bound.as_str() == command)
                    .map(|(event, _)| (*event, phase)),
            );
        }

        doomed
            .into_iter()
            .filter_map(|(event, phase)| self.unbind(event, phase))
            .count()
    }

    /// The command bound to a key event, or `""` when unbound
    pub fn get(&self, event: &KeyEvent, phase: Phase) -> &str {
        self.lookup(event, phase).unwrap_or("")
    }

    /// The command bound to a key event
    pub fn lookup(&self, event: &KeyEvent, phase: Phase) -> Option<&str> {
        self.map(phase).get(event).map(String::as_str)
    }

    /// Canonical names of every key bound to `command` in the given phase
    pub fn keys_for_command(&self, command: &str, phase: Phase) -> Vec<String> {
        self.map(phase)
            .iter()
            .filter(|(_, bound)| bound.as_str() == command)
            .map(|(event, _)| event.to_string())
            .collect()
    }

    /// Canonical string for a key event
    pub fn key_event_to_string(&self, event: &KeyEvent) -> String {
        event.to_string()
    }

    /// Parse a canonical key name
    pub fn string_to_key_event(&self, name: &str) -> Option<KeyEvent> {
        string_to_key_event(name)
    }

    /// Visit every press binding, then every release binding
    pub fn iterate(&self, mut f: impl FnMut(&str, Phase, &str)) {
        for (event, phase, command) in self.iter() {
            f(&event.to_string(), phase, command);
        }
    }

    /// Iterate press bindings followed by release bindings
    pub fn iter(&self) -> impl Iterator<Item = (&KeyEvent, Phase, &str)> {
        let pressed = self
            .pressed
            .iter()
            .map(|(event, command)| (event, Phase::Press, command.as_str()));
        let released = self
            .released
            .iter()
            .map(|(event, command)| (event, Phase::Release, command.as_str()));
        pressed.chain(released)
    }

    /// Number of bindings across both phases
    pub fn len(&self) -> usize {
        self.pressed.len() + self.released.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty() && self.released.is_empty()
    }

    /// Register a change callback. Callbacks fire in registration order.
    pub fn add_callback(
        &mut self,
        callback: impl FnMut(&str, Phase, &str) + 'static,
    ) -> CallbackId {
        let id = CallbackId(self.next_callback_id);
        self.next_callback_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Unregister a change callback. Returns false if it was not registered.
    pub fn remove_callback(&mut self, id: CallbackId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    fn notify(&mut self, name: &str, phase: Phase, command: &str) {
        for (_, callback) in &mut self.callbacks {
            callback(name, phase, command);
        }
    }
}

impl fmt::Debug for KeyBindingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyBindingTable")
            .field("pressed", &self.pressed)
            .field("released", &self.released)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::{Button, Modifiers};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn f1() -> KeyEvent {
        KeyEvent::button(Button::F(1))
    }

    fn ctrl_f2() -> KeyEvent {
        KeyEvent::button(Button::F(2)).with_mods(Modifiers::CTRL)
    }

    type Log = Rc<RefCell<Vec<(String, Phase, String)>>>;

    fn recording(table: &mut KeyBindingTable) -> (Log, CallbackId) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let id = table.add_callback(move |name, phase, cmd| {
            sink.borrow_mut().push((name.to_string(), phase, cmd.to_string()));
        });
        (log, id)
    }

    #[test]
    fn test_bind_then_get() {
        let mut table = KeyBindingTable::new();
        table.bind(f1(), Phase::Press, "fire");
        assert_eq!(table.get(&f1(), Phase::Press), "fire");
        assert_eq!(table.get(&f1(), Phase::Release), "");
        assert_eq!(table.lookup(&f1(), Phase::Release), None);
    }

    #[test]
    fn test_rebind_replaces() {
        let mut table = KeyBindingTable::new();
        table.bind(f1(), Phase::Press, "fire");
        table.bind(f1(), Phase::Press, "jump");
        assert_eq!(table.get(&f1(), Phase::Press), "jump");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_rebind_keeps_latest_event() {
        let mut table = KeyBindingTable::new();
        table.bind(KeyEvent::char('a'), Phase::Press, "one");
        table.bind(KeyEvent::char('A'), Phase::Press, "two");

        let mut names = Vec::new();
        table.iterate(|name, _, _| names.push(name.to_string()));
        assert_eq!(names, vec!["A"]);
    }

    #[test]
    fn test_unbind() {
        let mut table = KeyBindingTable::new();
        table.bind(f1(), Phase::Press, "fire");
        assert_eq!(table.unbind(f1(), Phase::Press), Some("fire".to_string()));
        assert_eq!(table.get(&f1(), Phase::Press), "");
        assert!(table.is_empty());
    }

    #[test]
    fn test_unbind_missing_is_silent() {
        let mut table = KeyBindingTable::new();
        let (log, _) = recording(&mut table);
        assert_eq!(table.unbind(f1(), Phase::Press), None);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_callbacks_see_bind_and_unbind() {
        let mut table = KeyBindingTable::new();
        let (log, _) = recording(&mut table);

        table.bind(ctrl_f2(), Phase::Release, "drop");
        table.unbind(ctrl_f2(), Phase::Release);

        let log = log.borrow();
        assert_eq!(
            *log,
            vec![
                ("Ctrl+F2".to_string(), Phase::Release, "drop".to_string()),
                ("Ctrl+F2".to_string(), Phase::Release, String::new()),
            ]
        );
    }

    #[test]
    fn test_callbacks_fire_in_registration_order() {
        let mut table = KeyBindingTable::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second"] {
            let order = Rc::clone(&order);
            table.add_callback(move |_, _, _| order.borrow_mut().push(tag));
        }

        table.bind(f1(), Phase::Press, "fire");
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_remove_callback() {
        let mut table = KeyBindingTable::new();
        let (log, id) = recording(&mut table);

        assert!(table.remove_callback(id));
        assert!(!table.remove_callback(id));

        table.bind(f1(), Phase::Press, "fire");
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_unbind_command_exact_match() {
        let mut table = KeyBindingTable::new();
        table.bind(f1(), Phase::Press, "fire");
        table.bind(f1(), Phase::Release, "fire");
        table.bind(ctrl_f2(), Phase::Press, "fire");
        table.bind(KeyEvent::char('x'), Phase::Press, "firex");
        table.bind(KeyEvent::char('y'), Phase::Press, "Fire");

        assert_eq!(table.unbind_command("fire"), 3);
        assert_eq!(table.get(&f1(), Phase::Press), "");
        assert_eq!(table.get(&f1(), Phase::Release), "");
        assert_eq!(table.get(&ctrl_f2(), Phase::Press), "");
        assert_eq!(table.get(&KeyEvent::char('x'), Phase::Press), "firex");
        assert_eq!(table.get(&KeyEvent::char('y'), Phase::Press), "Fire");
    }

    #[test]
    fn test_unbind_command_notifies_each_removal() {
        let mut table = KeyBindingTable::new();
        table.bind(f1(), Phase::Press, "fire");
        table.bind(ctrl_f2(), Phase::Release, "fire");
        let (log, _) = recording(&mut table);

        table.unbind_command("fire");
        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert!(log.iter().all(|(_, _, cmd)| cmd.is_empty()));
    }

    #[test]
    fn test_keys_for_command() {
        let mut table = KeyBindingTable::new();
        table.bind(f1(), Phase::Press, "fire");
        table.bind(ctrl_f2(), Phase::Press, "fire");
        table.bind(KeyEvent::char('j'), Phase::Press, "jump");
        table.bind(KeyEvent::char('k'), Phase::Release, "fire");

        let mut keys = table.keys_for_command("fire", Phase::Press);
        keys.sort();
        assert_eq!(keys, vec!["Ctrl+F2", "F1"]);
        assert_eq!(table.keys_for_command("fire", Phase::Release), vec!["k"]);
    }

    #[test]
    fn test_iterate_press_then_release() {
        let mut table = KeyBindingTable::new();
        table.bind(KeyEvent::char('r'), Phase::Release, "restart");
        table.bind(f1(), Phase::Press, "fire");
        table.bind(KeyEvent::char('j'), Phase::Press, "jump");

        let mut seen = Vec::new();
        table.iterate(|name, phase, cmd| seen.push(format!("{} {} {}", name, phase, cmd)));
        assert_eq!(seen, vec!["F1 down fire", "j down jump", "r up restart"]);
    }

    #[test]
    fn test_debug_omits_callbacks() {
        let mut table = KeyBindingTable::new();
        table.add_callback(|_, _, _| {});
        let debug = format!("{:?}", table);
        assert!(debug.contains("callbacks: 1"));
    }
}

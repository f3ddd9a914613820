//! Integration tests for the binding table

use super::*;

fn all_modifier_sets() -> Vec<Modifiers> {
    (0..8u8)
        .map(|bits| Modifiers::new(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0))
        .collect()
}

#[test]
fn test_round_trip_law() {
    let chars = ['a', 'Z', '7', '#', '+', 'ß', 'ж', '\t', '\r', ' '];
    let keys = Button::all()
        .map(Key::Button)
        .chain(chars.into_iter().map(Key::Char));

    for key in keys {
        for mods in all_modifier_sets() {
            let event = KeyEvent::new(key, mods);
            let name = key_event_to_string(&event);
            let parsed = string_to_key_event(&name);
            assert_eq!(parsed, Some(event), "{:?} encoded as {:?}", event, name);
        }
    }
}

#[test]
fn test_shift_f1_scenario() {
    let mut table = KeyBindingTable::new();
    let event = KeyEvent::button(Button::F(1)).with_mods(Modifiers::SHIFT);

    table.bind(event, Phase::Press, "jump");
    assert_eq!(table.key_event_to_string(&event), "Shift+F1");
    assert_eq!(table.string_to_key_event("Shift+F1"), Some(event));
    assert_eq!(table.get(&event, Phase::Press), "jump");
}

#[test]
fn test_empty_string_fails() {
    let table = KeyBindingTable::new();
    assert_eq!(table.string_to_key_event(""), None);
}

#[test]
fn test_double_bind_keeps_second() {
    let mut table = KeyBindingTable::new();
    let event = KeyEvent::char('x');
    table.bind(event, Phase::Press, "first");
    table.bind(event, Phase::Press, "second");
    assert_eq!(table.get(&event, Phase::Press), "second");
}

#[test]
fn test_modifier_order_stable() {
    let mut a = Modifiers::NONE;
    a |= Modifiers::ALT;
    a |= Modifiers::CTRL;
    a |= Modifiers::SHIFT;

    let mut b = Modifiers::NONE;
    b |= Modifiers::SHIFT;
    b |= Modifiers::ALT;
    b |= Modifiers::CTRL;

    let key = KeyEvent::button(Button::Delete);
    assert_eq!(key.with_mods(a).to_string(), "Shift+Ctrl+Alt+Delete");
    assert_eq!(key.with_mods(b).to_string(), "Shift+Ctrl+Alt+Delete");
}

#[test]
fn test_keys_for_command_after_binding_two_keys() {
    let mut table = KeyBindingTable::new();
    table.bind("F1".parse().unwrap(), Phase::Press, "fire");
    table.bind("Ctrl+F2".parse().unwrap(), Phase::Press, "fire");

    let keys = table.keys_for_command("fire", Phase::Press);
    assert_eq!(keys.len(), 2);
    assert!(keys.contains(&"F1".to_string()));
    assert!(keys.contains(&"Ctrl+F2".to_string()));
}

#[test]
fn test_case_insensitive_lookup_of_character_bindings() {
    let mut table = KeyBindingTable::new();
    table.bind("I".parse().unwrap(), Phase::Press, "identify");

    assert_eq!(table.get(&KeyEvent::char('i'), Phase::Press), "identify");
    assert_eq!(
        table.get(&KeyEvent::char('i').with_mods(Modifiers::SHIFT), Phase::Press),
        "identify"
    );
    assert_eq!(
        table.get(&KeyEvent::char('i').with_mods(Modifiers::CTRL), Phase::Press),
        ""
    );
}

#[test]
fn test_console_and_actions_share_table() {
    let mut table = KeyBindingTable::new();
    let mut actions = ActionBinding::new();
    actions.reset_bindings(&mut table);

    execute(&mut table, r#"bind "X" down "send all""#).unwrap();
    execute(&mut table, r#"bind "X" up "chat""#).unwrap();
    actions.sync_from(&table);

    assert!(actions.keys_for_action("send all").contains(&"X"));
    assert!(actions.keys_for_action("fire").contains(&"Left Mouse"));
    assert!(actions.bindings().iter().all(|(_, action)| action != "chat"));
}

#[test]
fn test_callback_tracks_menu_label() {
    use std::cell::RefCell;
    use std::rc::Rc;

    // A key binding menu entry keeps its label current from change callbacks.
    let label = Rc::new(RefCell::new(String::new()));
    let mut table = KeyBindingTable::new();
    let sink = Rc::clone(&label);
    let id = table.add_callback(move |name, phase, command| {
        if phase.is_press() && command == "jump" {
            *sink.borrow_mut() = name.to_string();
        } else if command.is_empty() && *sink.borrow() == name {
            sink.borrow_mut().clear();
        }
    });

    let tab: KeyEvent = "Tab".parse().unwrap();
    table.bind(tab, Phase::Press, "jump");
    assert_eq!(*label.borrow(), "Tab");

    table.unbind(tab, Phase::Press);
    assert_eq!(*label.borrow(), "");

    assert!(table.remove_callback(id));
}

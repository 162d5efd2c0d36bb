//! Terminal key events to editor events

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ghosthist_keybinds::{EditAction, EditorEvent, Key, KeyCombo, Keymap, Modifier};

/// Key combo for a terminal key event
///
/// Shift is dropped for characters since the character already carries the
/// case. Keys the keymap cannot name give `None`.
pub fn key_combo(event: &KeyEvent) -> Option<KeyCombo> {
    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::F(n) => Key::F(n),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        _ => return None,
    };

    let mut modifiers = Vec::new();
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        modifiers.push(Modifier::Ctrl);
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        modifiers.push(Modifier::Alt);
    }
    if event.modifiers.contains(KeyModifiers::SHIFT) && !matches!(key, Key::Char(_)) {
        modifiers.push(Modifier::Shift);
    }
    Some(KeyCombo::new(modifiers, key))
}

/// Editor event for a key press; unbound printable characters self-insert
pub fn translate(keymap: &Keymap, event: &KeyEvent) -> Option<EditorEvent> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let combo = key_combo(event)?;
    if let Some(binding) = keymap.resolve(&combo) {
        return Some(binding.into());
    }
    match (combo.key(), combo.modifiers()) {
        (Key::Char(c), []) => Some(EditorEvent::Action(EditAction::InsertChar(c))),
        _ => None,
    }
}

/// `ctrl+<c>` without other modifiers
pub fn is_ctrl(event: &KeyEvent, c: char) -> bool {
    event.code == KeyCode::Char(c) && event.modifiers == KeyModifiers::CONTROL
}

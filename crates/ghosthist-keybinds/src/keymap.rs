//! Key combo → binding lookup

use std::collections::HashMap;

use tracing::debug;

use crate::{
    action::{Binding, EditAction, Widget},
    error::Result,
    key::{Key, KeyCombo},
};

/// Value that removes a binding in configuration
const UNBIND: &str = "none";

/// Maps key combos to actions or widgets
///
/// Plain printable characters are not stored; hosts insert them directly when
/// [`Keymap::resolve`] returns `None`.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<KeyCombo, Binding>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emacs-style defaults plus the suggestion widgets
    pub fn standard() -> Self {
        use EditAction::*;

        let mut keymap = Self::new();
        let ctrl = |c| KeyCombo::ctrl(Key::Char(c));
        let alt = |c| KeyCombo::alt(Key::Char(c));
        let plain = KeyCombo::plain;

        let actions = [
            (plain(Key::Backspace), DeleteCharBackward),
            (ctrl('h'), DeleteCharBackward),
            (plain(Key::Delete), DeleteCharForward),
            (ctrl('d'), DeleteCharForward),
            (ctrl('w'), DeleteWordBackward),
            (KeyCombo::alt(Key::Backspace), DeleteWordBackward),
            (alt('d'), DeleteWordForward),
            (ctrl('k'), KillLine),
            (ctrl('u'), KillWholeLine),
            (ctrl('y'), Yank),
            (plain(Key::Up), HistoryPrevious),
            (ctrl('p'), HistoryPrevious),
            (plain(Key::Down), HistoryNext),
            (ctrl('n'), HistoryNext),
            (ctrl('r'), HistorySearchBackward),
            (plain(Key::Home), MoveBeginningOfLine),
            (ctrl('a'), MoveBeginningOfLine),
            (plain(Key::Left), MoveCharBackward),
            (ctrl('b'), MoveCharBackward),
            (plain(Key::Right), MoveCharForward),
            (ctrl('f'), MoveCharForward),
            (alt('b'), MoveWordBackward),
            (KeyCombo::ctrl(Key::Left), MoveWordBackward),
            (alt('f'), MoveWordForward),
            (KeyCombo::ctrl(Key::Right), MoveWordForward),
            (plain(Key::Enter), AcceptLine),
            (plain(Key::Tab), ExpandOrComplete),
            (ctrl('l'), ClearScreen),
        ];
        for (combo, action) in actions {
            keymap.bind(combo, Binding::Action(action));
        }

        let widgets = [
            (plain(Key::End), Widget::AcceptSuggestion),
            (ctrl('e'), Widget::AcceptSuggestion),
            (plain(Key::Escape), Widget::ClearSuggestion),
            (ctrl(' '), Widget::RequestSuggestion),
        ];
        for (combo, widget) in widgets {
            keymap.bind(combo, Binding::Widget(widget));
        }

        keymap
    }

    /// Bind a combo, returning the binding it replaced
    pub fn bind(&mut self, combo: KeyCombo, binding: Binding) -> Option<Binding> {
        self.bindings.insert(combo, binding)
    }

    pub fn unbind(&mut self, combo: &KeyCombo) -> Option<Binding> {
        self.bindings.remove(combo)
    }

    pub fn resolve(&self, combo: &KeyCombo) -> Option<Binding> {
        self.bindings.get(combo).copied()
    }

    /// Apply `combo = binding` entries from configuration
    ///
    /// All entries are parsed before any is applied, so a bad entry leaves
    /// the keymap untouched. The value `none` removes a binding.
    pub fn merge_config<'a, I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut parsed = Vec::new();
        for (combo, target) in entries {
            let combo: KeyCombo = combo.parse()?;
            let binding = if target.trim() == UNBIND {
                None
            } else {
                Some(target.parse::<Binding>()?)
            };
            parsed.push((combo, binding));
        }

        for (combo, binding) in parsed {
            debug!(combo = %combo, binding = ?binding, "Applying configured keybind");
            match binding {
                Some(binding) => {
                    self.bind(combo, binding);
                }
                None => {
                    self.unbind(&combo);
                }
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KeyCombo, &Binding)> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KeybindError;
    use std::collections::BTreeMap;

    #[test]
    fn test_standard_suggestion_keys() {
        let keymap = Keymap::standard();
        assert_eq!(
            keymap.resolve(&"ctrl+e".parse().unwrap()),
            Some(Binding::Widget(Widget::AcceptSuggestion))
        );
        assert_eq!(
            keymap.resolve(&"end".parse().unwrap()),
            Some(Binding::Widget(Widget::AcceptSuggestion))
        );
        assert_eq!(
            keymap.resolve(&"right".parse().unwrap()),
            Some(Binding::Action(EditAction::MoveCharForward))
        );
        assert_eq!(
            keymap.resolve(&"alt+f".parse().unwrap()),
            Some(Binding::Action(EditAction::MoveWordForward))
        );
        assert_eq!(
            keymap.resolve(&"escape".parse().unwrap()),
            Some(Binding::Widget(Widget::ClearSuggestion))
        );
    }

    #[test]
    fn test_printable_chars_unbound() {
        let keymap = Keymap::standard();
        assert_eq!(keymap.resolve(&KeyCombo::plain(Key::Char('g'))), None);
    }

    #[test]
    fn test_merge_config() {
        let mut keymap = Keymap::standard();
        let mut entries = BTreeMap::new();
        entries.insert("ctrl+f".to_string(), "accept-word".to_string());
        entries.insert("escape".to_string(), "none".to_string());

        keymap.merge_config(&entries).unwrap();
        assert_eq!(
            keymap.resolve(&"ctrl+f".parse().unwrap()),
            Some(Binding::Widget(Widget::AcceptWord))
        );
        assert_eq!(keymap.resolve(&"escape".parse().unwrap()), None);
    }

    #[test]
    fn test_merge_config_is_atomic() {
        let mut keymap = Keymap::standard();
        let before = keymap.len();
        let mut entries = BTreeMap::new();
        entries.insert("alt+x".to_string(), "accept-word".to_string());
        entries.insert("ctrl+e".to_string(), "launch-rockets".to_string());

        let err = keymap.merge_config(&entries).unwrap_err();
        assert_eq!(err, KeybindError::UnknownBinding("launch-rockets".to_string()));
        assert_eq!(keymap.len(), before);
        assert_eq!(keymap.resolve(&"alt+x".parse().unwrap()), None);
    }
}

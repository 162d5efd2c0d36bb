//! Property-based tests for key combos and the standard override table

use std::str::FromStr;

use ghosthist_keybinds::{
    Binding, EditAction, Key, KeyCombo, Keymap, Modifier, NextHandler, OverridePolicy,
    OverrideTable,
};
use proptest::prelude::*;

fn modifier_strategy() -> impl Strategy<Value = Modifier> {
    prop_oneof![Just(Modifier::Ctrl), Just(Modifier::Alt), Just(Modifier::Shift)]
}

fn key_strategy() -> impl Strategy<Value = Key> {
    prop_oneof![
        (b'a'..=b'z').prop_map(|c| Key::Char(c as char)),
        (b'0'..=b'9').prop_map(|c| Key::Char(c as char)),
        Just(Key::Char(' ')),
        Just(Key::Char('+')),
        Just(Key::Enter),
        Just(Key::Escape),
        Just(Key::Tab),
        Just(Key::Backspace),
        Just(Key::End),
        Just(Key::Right),
        (1u8..=12u8).prop_map(Key::F),
    ]
}

fn action_strategy() -> impl Strategy<Value = EditAction> {
    prop_oneof![
        any::<char>().prop_map(EditAction::InsertChar),
        prop::sample::select(EditAction::NAMED.to_vec()),
    ]
}

proptest! {
    /// Modifier order and repetition never change which combo is meant
    #[test]
    fn prop_modifier_order_irrelevant(
        modifiers in prop::collection::vec(modifier_strategy(), 0..5),
        key in key_strategy(),
    ) {
        let mut reversed = modifiers.clone();
        reversed.reverse();
        let a = KeyCombo::new(modifiers, key);
        let b = KeyCombo::new(reversed, key);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(KeyCombo::from_str(&a.to_string()).unwrap(), b);
    }

    /// Only insertions extend the buffer without clearing; every other
    /// mutating or navigational action clears or routes through a widget
    #[test]
    fn prop_standard_table_never_leaves_stale_suggestion(action in action_strategy()) {
        let ov = OverrideTable::standard().resolve(&action);
        match action {
            EditAction::InsertChar(_) | EditAction::Yank => {
                prop_assert_eq!(ov.policy, OverridePolicy::DelegateThenSuggest);
            }
            EditAction::ClearScreen => {
                prop_assert_eq!(ov.policy, OverridePolicy::Delegate);
            }
            _ => {
                let clears = ov.policy == OverridePolicy::ClearThenDelegate;
                let widget = matches!(ov.next, NextHandler::Widget(_));
                prop_assert!(clears || widget, "{} neither clears nor routes to a widget", action);
            }
        }
    }

    /// Every named action can be bound from configuration by name
    #[test]
    fn prop_named_actions_bindable(action in prop::sample::select(EditAction::NAMED.to_vec())) {
        let name = action.name().unwrap().to_string();
        let mut keymap = Keymap::new();
        let entries = [("alt+z".to_string(), name)];
        keymap.merge_config(entries.iter().map(|(k, v)| (k, v))).unwrap();
        prop_assert_eq!(
            keymap.resolve(&KeyCombo::alt(Key::Char('z'))),
            Some(Binding::Action(action))
        );
    }
}

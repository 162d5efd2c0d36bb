//! Action overrides
//!
//! Every built-in action the suggestion core cares about is wrapped once at
//! startup. The wrapper applies a policy and then hands control to an
//! explicit next handler, usually the original action itself.

use std::collections::HashMap;
use std::mem::{discriminant, Discriminant};

use crate::action::{EditAction, Widget};

/// What the wrapper does around the next handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverridePolicy {
    /// Clear the suggestion, then run the next handler
    ClearThenDelegate,
    /// Run the next handler, then request a suggestion for the new buffer
    DelegateThenSuggest,
    /// Run the next handler and leave the suggestion alone
    Delegate,
}

/// Where control goes after the policy is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextHandler {
    /// The intercepted action, with its payload
    Original,
    /// A different built-in action
    Native(EditAction),
    /// A suggestion widget; the intercepted action is its fallback
    Widget(Widget),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Override {
    pub policy: OverridePolicy,
    pub next: NextHandler,
}

impl Override {
    pub const fn new(policy: OverridePolicy, next: NextHandler) -> Self {
        Self { policy, next }
    }

    /// Run the original action untouched
    pub const fn passthrough() -> Self {
        Self::new(OverridePolicy::Delegate, NextHandler::Original)
    }
}

/// Action → override, plus the native fallback of each widget
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    actions: HashMap<Discriminant<EditAction>, Override>,
    fallbacks: HashMap<Widget, EditAction>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard wrapping
    ///
    /// Insertions request a suggestion afterwards. Forward motion accepts a
    /// shown suggestion (whole or by word) and otherwise moves. Every other
    /// buffer-mutating or navigational action, including completion and line
    /// acceptance, clears first.
    pub fn standard() -> Self {
        use EditAction::*;
        use NextHandler::Original;
        use OverridePolicy::*;

        let mut table = Self::new();

        for action in [InsertChar('\0'), Yank] {
            table.register(action, Override::new(DelegateThenSuggest, Original));
        }

        table.register(
            MoveCharForward,
            Override::new(Delegate, NextHandler::Widget(Widget::AcceptSuggestion)),
        );
        table.register(
            MoveWordForward,
            Override::new(Delegate, NextHandler::Widget(Widget::AcceptWord)),
        );

        for action in [
            DeleteCharBackward,
            DeleteCharForward,
            DeleteWordBackward,
            DeleteWordForward,
            KillLine,
            KillToStart,
            KillWholeLine,
            HistoryPrevious,
            HistoryNext,
            HistorySearchBackward,
            MoveBeginningOfLine,
            MoveEndOfLine,
            MoveCharBackward,
            MoveWordBackward,
            AcceptLine,
            ExpandOrComplete,
        ] {
            table.register(action, Override::new(ClearThenDelegate, Original));
        }

        table.register(ClearScreen, Override::passthrough());

        table.set_fallback(Widget::AcceptSuggestion, MoveEndOfLine);
        table.set_fallback(Widget::AcceptWord, MoveWordForward);
        table
    }

    /// Register (or replace) the override for an action
    ///
    /// Payload-carrying actions are keyed by variant, so registering
    /// `InsertChar('\0')` covers every inserted character.
    pub fn register(&mut self, action: EditAction, ov: Override) {
        self.actions.insert(discriminant(&action), ov);
    }

    /// Native action a widget runs when there is no suggestion
    pub fn set_fallback(&mut self, widget: Widget, action: EditAction) {
        self.fallbacks.insert(widget, action);
    }

    /// Override for an action; unregistered actions pass through
    pub fn resolve(&self, action: &EditAction) -> Override {
        self.actions
            .get(&discriminant(action))
            .copied()
            .unwrap_or_else(Override::passthrough)
    }

    pub fn fallback(&self, widget: Widget) -> Option<EditAction> {
        self.fallbacks.get(&widget).copied()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

//! Editing actions, suggestion widgets and editor events

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::KeybindError;

/// Built-in editing actions of the host line editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditAction {
    /// Insert a character at the cursor
    InsertChar(char),
    /// Insert the most recently killed text
    Yank,
    DeleteCharBackward,
    DeleteCharForward,
    DeleteWordBackward,
    DeleteWordForward,
    /// Kill from the cursor to the end of the line
    KillLine,
    /// Kill from the start of the line to the cursor
    KillToStart,
    KillWholeLine,
    HistoryPrevious,
    HistoryNext,
    HistorySearchBackward,
    MoveBeginningOfLine,
    MoveEndOfLine,
    MoveCharBackward,
    MoveCharForward,
    MoveWordBackward,
    MoveWordForward,
    AcceptLine,
    ExpandOrComplete,
    ClearScreen,
}

impl EditAction {
    /// Every nameable action (everything except [`EditAction::InsertChar`])
    pub const NAMED: [EditAction; 20] = [
        EditAction::Yank,
        EditAction::DeleteCharBackward,
        EditAction::DeleteCharForward,
        EditAction::DeleteWordBackward,
        EditAction::DeleteWordForward,
        EditAction::KillLine,
        EditAction::KillToStart,
        EditAction::KillWholeLine,
        EditAction::HistoryPrevious,
        EditAction::HistoryNext,
        EditAction::HistorySearchBackward,
        EditAction::MoveBeginningOfLine,
        EditAction::MoveEndOfLine,
        EditAction::MoveCharBackward,
        EditAction::MoveCharForward,
        EditAction::MoveWordBackward,
        EditAction::MoveWordForward,
        EditAction::AcceptLine,
        EditAction::ExpandOrComplete,
        EditAction::ClearScreen,
    ];

    /// Readline-style name, `None` for character insertion
    pub fn name(&self) -> Option<&'static str> {
        let name = match self {
            EditAction::InsertChar(_) => return None,
            EditAction::Yank => "yank",
            EditAction::DeleteCharBackward => "backward-delete-char",
            EditAction::DeleteCharForward => "delete-char",
            EditAction::DeleteWordBackward => "backward-kill-word",
            EditAction::DeleteWordForward => "kill-word",
            EditAction::KillLine => "kill-line",
            EditAction::KillToStart => "backward-kill-line",
            EditAction::KillWholeLine => "kill-whole-line",
            EditAction::HistoryPrevious => "up-history",
            EditAction::HistoryNext => "down-history",
            EditAction::HistorySearchBackward => "history-search-backward",
            EditAction::MoveBeginningOfLine => "beginning-of-line",
            EditAction::MoveEndOfLine => "end-of-line",
            EditAction::MoveCharBackward => "backward-char",
            EditAction::MoveCharForward => "forward-char",
            EditAction::MoveWordBackward => "backward-word",
            EditAction::MoveWordForward => "forward-word",
            EditAction::AcceptLine => "accept-line",
            EditAction::ExpandOrComplete => "expand-or-complete",
            EditAction::ClearScreen => "clear-screen",
        };
        Some(name)
    }
}

impl fmt::Display for EditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditAction::InsertChar(c) => write!(f, "self-insert({c:?})"),
            other => write!(f, "{}", other.name().unwrap_or("unknown")),
        }
    }
}

impl FromStr for EditAction {
    type Err = KeybindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EditAction::NAMED
            .into_iter()
            .find(|action| action.name() == Some(wanted))
            .ok_or_else(|| KeybindError::UnknownBinding(s.to_string()))
    }
}

/// Suggestion widgets registered with the host editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Widget {
    RequestSuggestion,
    AcceptSuggestion,
    AcceptWord,
    ClearSuggestion,
}

impl Widget {
    pub const ALL: [Widget; 4] = [
        Widget::RequestSuggestion,
        Widget::AcceptSuggestion,
        Widget::AcceptWord,
        Widget::ClearSuggestion,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Widget::RequestSuggestion => "request-suggestion",
            Widget::AcceptSuggestion => "accept-suggestion",
            Widget::AcceptWord => "accept-word",
            Widget::ClearSuggestion => "clear-suggestion",
        }
    }
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Widget {
    type Err = KeybindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Widget::ALL
            .into_iter()
            .find(|widget| widget.name() == wanted)
            .ok_or_else(|| KeybindError::UnknownBinding(s.to_string()))
    }
}

/// What a key combo is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Action(EditAction),
    Widget(Widget),
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Action(action) => write!(f, "{action}"),
            Binding::Widget(widget) => write!(f, "{widget}"),
        }
    }
}

impl FromStr for Binding {
    type Err = KeybindError;

    /// Widget names win over action names; the two sets do not overlap
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Widget::from_str(s)
            .map(Binding::Widget)
            .or_else(|_| EditAction::from_str(s).map(Binding::Action))
    }
}

/// Events the host editor feeds to the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// A built-in editing action was triggered
    Action(EditAction),
    /// A suggestion widget was triggered
    Widget(Widget),
    /// The editor is about to redraw the line
    Redraw,
    /// The working directory changed
    DirectoryChanged(PathBuf),
}

impl From<Binding> for EditorEvent {
    fn from(binding: Binding) -> Self {
        match binding {
            Binding::Action(action) => EditorEvent::Action(action),
            Binding::Widget(widget) => EditorEvent::Widget(widget),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_actions_round_trip() {
        for action in EditAction::NAMED {
            let name = action.name().unwrap();
            assert_eq!(name.parse::<EditAction>().unwrap(), action);
        }
    }

    #[test]
    fn test_insert_char_has_no_name() {
        assert_eq!(EditAction::InsertChar('x').name(), None);
        assert!("self-insert".parse::<EditAction>().is_err());
    }

    #[test]
    fn test_binding_parse() {
        assert_eq!(
            "accept-word".parse::<Binding>().unwrap(),
            Binding::Widget(Widget::AcceptWord)
        );
        assert_eq!(
            "kill-line".parse::<Binding>().unwrap(),
            Binding::Action(EditAction::KillLine)
        );
        assert_eq!(
            "frobnicate".parse::<Binding>(),
            Err(KeybindError::UnknownBinding("frobnicate".to_string()))
        );
    }

    #[test]
    fn test_binding_into_event() {
        let event: EditorEvent = Binding::Widget(Widget::ClearSuggestion).into();
        assert_eq!(event, EditorEvent::Widget(Widget::ClearSuggestion));
    }
}

//! In-memory line editor
//!
//! A complete [`EditorAdapter`] with emacs-style native actions, a history
//! list, a one-slot kill ring and `!!` history expansion. Terminal hosts wrap
//! it and add rendering; tests and one-shot callers use it directly.

use std::fmt;

use ghosthist_keybinds::EditAction;

use crate::{editor::EditorAdapter, overlay::Overlay};

/// Replaces the buffer on completion, `None` when there is nothing to complete
pub type Completer = Box<dyn Fn(&str) -> Option<String> + Send>;

#[derive(Default)]
pub struct MemoryEditor {
    buffer: String,
    /// Character offset
    cursor: usize,
    overlay: Option<Overlay>,
    highlight: Option<(usize, usize)>,
    history: Vec<String>,
    /// Position while browsing history; `None` when editing a fresh line
    history_index: Option<usize>,
    /// The fresh line saved when history browsing started
    draft: String,
    kill_ring: Option<String>,
    accepted: Option<String>,
    clear_screen: bool,
    completer: Option<Completer>,
}

impl fmt::Debug for MemoryEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryEditor")
            .field("buffer", &self.buffer)
            .field("cursor", &self.cursor)
            .field("overlay", &self.overlay)
            .field("highlight", &self.highlight)
            .field("history", &self.history.len())
            .finish()
    }
}

impl MemoryEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Editor holding `text` with the cursor at the end
    pub fn with_buffer(text: &str) -> Self {
        let mut editor = Self::new();
        editor.set_buffer(text);
        editor.cursor = editor.len();
        editor
    }

    pub fn with_history<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.history = entries.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_completer(mut self, completer: Completer) -> Self {
        self.completer = Some(completer);
        self
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// Highlighted character range, e.g. the last search match
    pub fn highlight(&self) -> Option<(usize, usize)> {
        self.highlight
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Append to history; empty lines and repeats of the last entry are skipped
    pub fn push_history(&mut self, line: &str) {
        if line.trim().is_empty() || self.history.last().map(String::as_str) == Some(line) {
            return;
        }
        self.history.push(line.to_string());
    }

    /// The line finished by `accept-line`, after history expansion
    pub fn take_accepted(&mut self) -> Option<String> {
        self.accepted.take()
    }

    /// Whether `clear-screen` ran since the last call
    pub fn take_clear_screen(&mut self) -> bool {
        std::mem::take(&mut self.clear_screen)
    }

    /// Buffer length in characters
    pub fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    fn byte_at(&self, position: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(position)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    fn chars(&self) -> Vec<char> {
        self.buffer.chars().collect()
    }

    /// Remove chars `start..end` and return them
    fn remove_range(&mut self, start: usize, end: usize) -> String {
        let (from, to) = (self.byte_at(start), self.byte_at(end));
        let removed = self.buffer[from..to].to_string();
        self.buffer.replace_range(from..to, "");
        self.cursor = start;
        removed
    }

    fn kill_range(&mut self, start: usize, end: usize) {
        if start < end {
            let killed = self.remove_range(start, end);
            self.kill_ring = Some(killed);
        }
    }

    fn insert(&mut self, text: &str) {
        let at = self.byte_at(self.cursor);
        self.buffer.insert_str(at, text);
        self.cursor += text.chars().count();
    }

    fn word_start_before(&self, position: usize) -> usize {
        let chars = self.chars();
        let mut i = position;
        while i > 0 && chars[i - 1].is_whitespace() {
            i -= 1;
        }
        while i > 0 && !chars[i - 1].is_whitespace() {
            i -= 1;
        }
        i
    }

    fn word_end_after(&self, position: usize) -> usize {
        let chars = self.chars();
        let mut i = position;
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        while i < chars.len() && !chars[i].is_whitespace() {
            i += 1;
        }
        i
    }

    fn load_history(&mut self, index: Option<usize>) {
        let line = match index {
            Some(i) => self.history[i].clone(),
            None => std::mem::take(&mut self.draft),
        };
        self.history_index = index;
        self.buffer = line;
        self.cursor = self.len();
    }

    fn history_previous(&mut self) {
        let next = match self.history_index {
            None if self.history.is_empty() => return,
            None => {
                self.draft = self.buffer.clone();
                self.history.len() - 1
            }
            Some(0) => return,
            Some(i) => i - 1,
        };
        self.load_history(Some(next));
    }

    fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(i) if i + 1 < self.history.len() => self.load_history(Some(i + 1)),
            Some(_) => self.load_history(None),
        }
    }

    /// Most recent older entry containing the current buffer, match highlighted
    fn history_search_backward(&mut self) {
        let needle = self.buffer.clone();
        let end = self.history_index.unwrap_or(self.history.len());
        let found = self.history[..end]
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, entry)| entry.find(&needle).map(|at| (i, at)));

        if let Some((index, byte_at)) = found {
            if self.history_index.is_none() {
                self.draft = self.buffer.clone();
            }
            self.load_history(Some(index));
            let start = self.buffer[..byte_at].chars().count();
            self.highlight = Some((start, start + needle.chars().count()));
        }
    }

    /// `!!` expands to the previous history entry
    fn expand_history(&self, line: &str) -> String {
        match self.history.last() {
            Some(last) if line.contains("!!") => line.replace("!!", last),
            _ => line.to_string(),
        }
    }

    fn accept_line(&mut self) {
        let line = self.expand_history(&self.buffer);
        self.push_history(&line);
        self.accepted = Some(line);
        self.buffer.clear();
        self.cursor = 0;
        self.history_index = None;
        self.draft.clear();
        self.highlight = None;
    }
}

impl EditorAdapter for MemoryEditor {
    fn buffer(&self) -> String {
        self.buffer.clone()
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn set_buffer(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.cursor.min(self.len());
    }

    fn set_cursor(&mut self, position: usize) {
        self.cursor = position.min(self.len());
    }

    fn set_overlay(&mut self, overlay: Overlay) {
        self.overlay = Some(overlay);
    }

    fn clear_overlay(&mut self) {
        self.overlay = None;
    }

    fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    fn run_native(&mut self, action: EditAction) {
        let len = self.len();
        match action {
            EditAction::InsertChar(c) => {
                let mut buf = [0u8; 4];
                self.insert(c.encode_utf8(&mut buf));
            }
            EditAction::Yank => {
                if let Some(text) = self.kill_ring.clone() {
                    self.insert(&text);
                }
            }
            EditAction::DeleteCharBackward => {
                if self.cursor > 0 {
                    self.remove_range(self.cursor - 1, self.cursor);
                }
            }
            EditAction::DeleteCharForward => {
                if self.cursor < len {
                    self.remove_range(self.cursor, self.cursor + 1);
                }
            }
            EditAction::DeleteWordBackward => {
                let start = self.word_start_before(self.cursor);
                self.kill_range(start, self.cursor);
            }
            EditAction::DeleteWordForward => {
                let end = self.word_end_after(self.cursor);
                self.kill_range(self.cursor, end);
            }
            EditAction::KillLine => self.kill_range(self.cursor, len),
            EditAction::KillToStart => self.kill_range(0, self.cursor),
            EditAction::KillWholeLine => self.kill_range(0, len),
            EditAction::HistoryPrevious => self.history_previous(),
            EditAction::HistoryNext => self.history_next(),
            EditAction::HistorySearchBackward => self.history_search_backward(),
            EditAction::MoveBeginningOfLine => self.cursor = 0,
            EditAction::MoveEndOfLine => self.cursor = len,
            EditAction::MoveCharBackward => self.cursor = self.cursor.saturating_sub(1),
            EditAction::MoveCharForward => self.cursor = (self.cursor + 1).min(len),
            EditAction::MoveWordBackward => self.cursor = self.word_start_before(self.cursor),
            EditAction::MoveWordForward => self.cursor = self.word_end_after(self.cursor),
            EditAction::AcceptLine => self.accept_line(),
            EditAction::ExpandOrComplete => {
                let completed = self.completer.as_ref().and_then(|c| c(self.buffer.as_str()));
                if let Some(line) = completed {
                    self.buffer = line;
                    self.cursor = self.len();
                }
            }
            EditAction::ClearScreen => self.clear_screen = true,
        }
    }

    fn last_history_entry(&self) -> Option<String> {
        self.history.last().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> MemoryEditor {
        let mut editor = MemoryEditor::new();
        for c in text.chars() {
            editor.run_native(EditAction::InsertChar(c));
        }
        editor
    }

    #[test]
    fn test_insert_and_delete() {
        let mut editor = typed("gitt");
        editor.run_native(EditAction::DeleteCharBackward);
        assert_eq!(editor.buffer(), "git");
        assert_eq!(editor.cursor(), 3);

        editor.run_native(EditAction::MoveBeginningOfLine);
        editor.run_native(EditAction::DeleteCharForward);
        assert_eq!(editor.buffer(), "it");
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn test_multibyte_cursor() {
        let mut editor = typed("héllo");
        editor.run_native(EditAction::MoveCharBackward);
        editor.run_native(EditAction::MoveCharBackward);
        editor.run_native(EditAction::MoveCharBackward);
        editor.run_native(EditAction::DeleteCharBackward);
        assert_eq!(editor.buffer(), "hllo");
        assert_eq!(editor.cursor(), 1);
    }

    #[test]
    fn test_word_motion_and_kill() {
        let mut editor = typed("git commit -m");
        editor.run_native(EditAction::DeleteWordBackward);
        assert_eq!(editor.buffer(), "git commit ");

        editor.run_native(EditAction::MoveWordBackward);
        assert_eq!(editor.cursor(), 4);
        editor.run_native(EditAction::MoveWordForward);
        assert_eq!(editor.cursor(), 10);

        editor.run_native(EditAction::MoveBeginningOfLine);
        editor.run_native(EditAction::DeleteWordForward);
        assert_eq!(editor.buffer(), " commit ");
    }

    #[test]
    fn test_kill_and_yank() {
        let mut editor = typed("echo hello");
        editor.run_native(EditAction::MoveWordBackward);
        editor.run_native(EditAction::KillLine);
        assert_eq!(editor.buffer(), "echo ");

        editor.run_native(EditAction::Yank);
        editor.run_native(EditAction::Yank);
        assert_eq!(editor.buffer(), "echo hellohello");

        editor.run_native(EditAction::KillWholeLine);
        assert!(editor.is_empty());
    }

    #[test]
    fn test_history_navigation_restores_draft() {
        let mut editor = typed("dr").with_history(["ls", "pwd"]);
        editor.run_native(EditAction::HistoryPrevious);
        assert_eq!(editor.buffer(), "pwd");
        editor.run_native(EditAction::HistoryPrevious);
        assert_eq!(editor.buffer(), "ls");
        editor.run_native(EditAction::HistoryPrevious);
        assert_eq!(editor.buffer(), "ls");

        editor.run_native(EditAction::HistoryNext);
        editor.run_native(EditAction::HistoryNext);
        assert_eq!(editor.buffer(), "dr");
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn test_history_search_highlights_match() {
        let mut editor = typed("comm").with_history(["git commit -m x", "ls", "cargo build"]);
        editor.run_native(EditAction::HistorySearchBackward);
        assert_eq!(editor.buffer(), "git commit -m x");
        assert_eq!(editor.highlight(), Some((4, 8)));

        editor.clear_highlight();
        assert_eq!(editor.highlight(), None);
    }

    #[test]
    fn test_accept_line_expands_and_records() {
        let mut editor = typed("sudo !!").with_history(["apt update"]);
        editor.run_native(EditAction::AcceptLine);

        assert_eq!(editor.take_accepted().as_deref(), Some("sudo apt update"));
        assert_eq!(editor.last_history_entry().as_deref(), Some("sudo apt update"));
        assert!(editor.is_empty());
        assert!(editor.take_accepted().is_none());
    }

    #[test]
    fn test_completer() {
        let mut editor = typed("cd sr").with_completer(Box::new(|line: &str| {
            line.strip_suffix("sr").map(|head| format!("{head}src/"))
        }));
        editor.run_native(EditAction::ExpandOrComplete);
        assert_eq!(editor.buffer(), "cd src/");
        assert_eq!(editor.cursor(), 7);
    }

    #[test]
    fn test_set_cursor_clamps() {
        let mut editor = MemoryEditor::with_buffer("ls");
        editor.set_cursor(99);
        assert_eq!(editor.cursor(), 2);
    }
}

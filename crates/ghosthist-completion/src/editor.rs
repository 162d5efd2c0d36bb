//! Host line editor primitives

use ghosthist_keybinds::EditAction;

use crate::overlay::Overlay;

/// What the suggestion core needs from a line editor
///
/// Positions are character offsets into the buffer, not byte offsets.
pub trait EditorAdapter {
    /// Current editable buffer
    fn buffer(&self) -> String;

    fn cursor(&self) -> usize;

    fn set_buffer(&mut self, text: &str);

    /// Move the cursor; values past the end are clamped
    fn set_cursor(&mut self, position: usize);

    /// Show un-committed text after the buffer
    fn set_overlay(&mut self, overlay: Overlay);

    fn clear_overlay(&mut self);

    /// Drop any visual highlight range (e.g. a search match)
    fn clear_highlight(&mut self);

    /// Run the editor's own implementation of an action
    fn run_native(&mut self, action: EditAction);

    /// Most recent entry in the editor's history
    fn last_history_entry(&self) -> Option<String>;
}

impl<E: EditorAdapter + ?Sized> EditorAdapter for &mut E {
    fn buffer(&self) -> String {
        (**self).buffer()
    }

    fn cursor(&self) -> usize {
        (**self).cursor()
    }

    fn set_buffer(&mut self, text: &str) {
        (**self).set_buffer(text)
    }

    fn set_cursor(&mut self, position: usize) {
        (**self).set_cursor(position)
    }

    fn set_overlay(&mut self, overlay: Overlay) {
        (**self).set_overlay(overlay)
    }

    fn clear_overlay(&mut self) {
        (**self).clear_overlay()
    }

    fn clear_highlight(&mut self) {
        (**self).clear_highlight()
    }

    fn run_native(&mut self, action: EditAction) {
        (**self).run_native(action)
    }

    fn last_history_entry(&self) -> Option<String> {
        (**self).last_history_entry()
    }
}

//! Buffer drift detection

use crate::suggestion::SuggestionStore;

/// True when an overlay is rendered for a buffer other than `buffer`
///
/// Runs on every redraw, so it catches mutations from any path (completion,
/// paste, programmatic edits) without enumerating them.
pub fn detect_drift(store: &SuggestionStore, buffer: &str) -> bool {
    store
        .current()
        .map(|s| !s.displayed_for_buffer.is_empty() && s.displayed_for_buffer != buffer)
        .unwrap_or(false)
}

//! Suggestion state machine
//!
//! Each operation is split so that the decision (request or not) and the
//! reconciliation of an answer are synchronous; only [`SuggestionEngine::fetch`]
//! awaits the collaborator.

use std::time::Duration;

use ghosthist_client::{ClientError, PredictRequest, PredictionClient};
use ghosthist_config::GhosthistConfig;
use tracing::{debug, trace, warn};

use crate::{
    dispatcher::PredictionContext,
    drift::detect_drift,
    editor::EditorAdapter,
    overlay::{render_overlay, OverlayStyle},
    suggestion::{Suggestion, SuggestionState, SuggestionStore},
};

/// Tunables of the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub enabled: bool,
    /// Buffers shorter than this many characters never request
    pub min_prefix_length: usize,
    /// Candidates requested per call
    pub limit: usize,
    /// Hard bound on a prediction call
    pub call_timeout: Duration,
    /// Budget forwarded to the collaborator
    pub daemon_timeout_ms: Option<u64>,
    pub style: OverlayStyle,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            min_prefix_length: 2,
            limit: 5,
            call_timeout: Duration::from_millis(150),
            daemon_timeout_ms: None,
            style: OverlayStyle::default(),
        }
    }
}

impl EngineSettings {
    pub fn from_config(config: &GhosthistConfig) -> Self {
        Self {
            enabled: config.suggestion.enabled,
            min_prefix_length: config.suggestion.min_prefix_length,
            limit: config.predictor.limit,
            call_timeout: Duration::from_millis(config.predictor.timeout_ms),
            daemon_timeout_ms: Some(config.predictor.daemon_timeout_ms),
            style: OverlayStyle::from(&config.suggestion.style),
        }
    }
}

/// What the caller has to do after an engine operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Nothing to suggest on; run the native fallback if there is one
    NotHandled,
    /// Done
    Handled,
    /// Call the collaborator, then [`SuggestionEngine::reconcile`]
    Fetch(PredictRequest),
}

pub struct SuggestionEngine<P> {
    store: SuggestionStore,
    predictor: P,
    settings: EngineSettings,
}

impl<P: PredictionClient> SuggestionEngine<P> {
    pub fn new(predictor: P, settings: EngineSettings) -> Self {
        Self {
            store: SuggestionStore::new(),
            predictor,
            settings,
        }
    }

    pub fn state(&self) -> SuggestionState {
        self.store.state()
    }

    pub fn store(&self) -> &SuggestionStore {
        &self.store
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Decide whether the current buffer needs a prediction
    ///
    /// Clears when suggestions are off or the buffer is below the minimum
    /// length; does nothing when the same prefix is already requested or shown.
    pub fn update<E: EditorAdapter + ?Sized>(
        &mut self,
        editor: &mut E,
        context: &PredictionContext,
    ) -> Step {
        let buffer = editor.buffer();
        if !self.settings.enabled || !self.long_enough(&buffer) {
            self.clear(editor);
            return Step::Handled;
        }

        if !self.store.begin_request(&buffer) {
            trace!(prefix = %buffer, "Prefix already requested, skipping");
            return Step::Handled;
        }
        editor.clear_overlay();

        let mut request = PredictRequest::new(buffer, context.cwd.clone(), self.settings.limit)
            .with_history(context.last_command.clone(), context.previous_command.clone());
        if let Some(ms) = self.settings.daemon_timeout_ms {
            request = request.with_timeout_ms(ms);
        }
        Step::Fetch(request)
    }

    /// Ask the collaborator, bounded by the call timeout
    ///
    /// Every failure is absorbed and reported as no candidates.
    pub async fn fetch(&self, request: &PredictRequest) -> Vec<String> {
        let call = self.predictor.predict(request);
        match tokio::time::timeout(self.settings.call_timeout, call).await {
            Ok(Ok(candidates)) => candidates,
            Ok(Err(ClientError::Unavailable(reason))) => {
                debug!(prefix = %request.prefix, reason = %reason, "Predictor unavailable");
                Vec::new()
            }
            Ok(Err(e)) => {
                warn!(prefix = %request.prefix, error = %e, "Prediction failed");
                Vec::new()
            }
            Err(_) => {
                warn!(
                    prefix = %request.prefix,
                    timeout_ms = self.settings.call_timeout.as_millis() as u64,
                    "Prediction timed out"
                );
                Vec::new()
            }
        }
    }

    /// Apply the answer to `request` against the buffer as it is now
    ///
    /// Answers to a request that was cleared or superseded are dropped.
    /// Only the first candidate is considered, and only if it strictly
    /// extends the current buffer.
    pub fn reconcile<E: EditorAdapter + ?Sized>(
        &mut self,
        editor: &mut E,
        request: &PredictRequest,
        candidates: Vec<String>,
    ) -> SuggestionState {
        let superseded = self.store.state() != SuggestionState::Pending
            || self.store.requested_prefix() != Some(request.prefix.as_str());
        if superseded {
            trace!(prefix = %request.prefix, "Dropping superseded prediction");
            return self.store.state();
        }

        let buffer = editor.buffer();
        let Some(top) = candidates.into_iter().next() else {
            trace!(prefix = %request.prefix, "No candidates");
            self.dismiss(editor);
            return SuggestionState::Idle;
        };

        let rendered = if self.long_enough(&buffer) {
            Suggestion::new(buffer.as_str(), top.as_str()).and_then(|suggestion| {
                render_overlay(&suggestion, &buffer, self.settings.style)
                    .map(|overlay| (suggestion, overlay))
            })
        } else {
            None
        };

        match rendered {
            Some((suggestion, overlay)) => {
                editor.set_overlay(overlay);
                self.store.show(suggestion, &buffer);
                SuggestionState::Shown
            }
            None => {
                debug!(buffer = %buffer, candidate = %top, "Candidate does not extend buffer");
                self.dismiss(editor);
                SuggestionState::Idle
            }
        }
    }

    /// Take the whole suggestion into the buffer
    ///
    /// [`Step::NotHandled`] when nothing valid is shown, or when the cursor is
    /// not at the end of the buffer, so the caller can fall back to its native
    /// action. In the latter case the suggestion stays.
    pub fn accept<E: EditorAdapter + ?Sized>(&mut self, editor: &mut E) -> Step {
        let buffer = editor.buffer();
        let Some(text) = self.shown_text_for(&buffer) else {
            self.clear(editor);
            return Step::NotHandled;
        };
        if !cursor_at_end(editor, &buffer) {
            trace!(cursor = editor.cursor(), "Cursor inside buffer, not accepting");
            return Step::NotHandled;
        }

        editor.set_buffer(&text);
        editor.set_cursor(text.chars().count());
        self.clear(editor);
        Step::Handled
    }

    /// Take the next word of the suggestion and request a fresh one
    ///
    /// The appended part is any whitespace at the start of the remaining
    /// suffix plus the following word, or the whole suffix when it holds no
    /// further whitespace. The old suggestion is dropped rather than trimmed.
    pub fn accept_word<E: EditorAdapter + ?Sized>(
        &mut self,
        editor: &mut E,
        context: &PredictionContext,
    ) -> Step {
        let buffer = editor.buffer();
        let Some(text) = self.shown_text_for(&buffer) else {
            self.clear(editor);
            return Step::NotHandled;
        };
        if !cursor_at_end(editor, &buffer) {
            trace!(cursor = editor.cursor(), "Cursor inside buffer, not accepting");
            return Step::NotHandled;
        }

        let word = next_word(&text[buffer.len()..]);
        let extended = format!("{buffer}{word}");
        editor.set_buffer(&extended);
        editor.set_cursor(extended.chars().count());
        self.clear(editor);

        self.update(editor, context)
    }

    /// Drop the suggestion, the overlay and any highlight
    pub fn clear<E: EditorAdapter + ?Sized>(&mut self, editor: &mut E) {
        self.store.clear();
        editor.clear_overlay();
        editor.clear_highlight();
    }

    /// Idle without forgetting the requested prefix
    fn dismiss<E: EditorAdapter + ?Sized>(&mut self, editor: &mut E) {
        self.store.dismiss();
        editor.clear_overlay();
        editor.clear_highlight();
    }

    /// Redraw hook: clear when the buffer no longer matches the overlay
    pub fn on_redraw<E: EditorAdapter + ?Sized>(&mut self, editor: &mut E) -> bool {
        let buffer = editor.buffer();
        if !detect_drift(&self.store, &buffer) {
            return false;
        }

        self.store.mark_stale();
        trace!(buffer = %buffer, "Buffer drifted from suggestion, clearing");
        self.clear(editor);
        true
    }

    fn long_enough(&self, buffer: &str) -> bool {
        buffer.chars().count() >= self.settings.min_prefix_length
    }

    fn shown_text_for(&self, buffer: &str) -> Option<String> {
        if self.store.state() != SuggestionState::Shown {
            return None;
        }
        self.store
            .current()
            .filter(|s| s.text.len() > buffer.len() && s.text.starts_with(buffer))
            .map(|s| s.text.clone())
    }
}

fn cursor_at_end<E: EditorAdapter + ?Sized>(editor: &E, buffer: &str) -> bool {
    editor.cursor() >= buffer.chars().count()
}

/// Leading whitespace plus the following word of `suffix`
fn next_word(suffix: &str) -> &str {
    let body_start = suffix.len() - suffix.trim_start().len();
    match suffix[body_start..].find(char::is_whitespace) {
        Some(end) => &suffix[..body_start + end],
        None => suffix,
    }
}

//! Suggestion data and its store

/// A proposed completion of the buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Buffer text the suggestion was computed against
    pub prefix: String,
    /// Full candidate command
    pub text: String,
    /// Buffer content when the overlay was rendered, empty until then
    pub displayed_for_buffer: String,
}

impl Suggestion {
    /// Build a suggestion if `text` strictly extends `prefix`
    ///
    /// The comparison is case-sensitive and byte-exact. A candidate equal to
    /// the prefix suggests nothing and is rejected.
    pub fn new(prefix: impl Into<String>, text: impl Into<String>) -> Option<Self> {
        let prefix = prefix.into();
        let text = text.into();
        if text.len() > prefix.len() && text.starts_with(&prefix) {
            Some(Self {
                prefix,
                text,
                displayed_for_buffer: String::new(),
            })
        } else {
            None
        }
    }

    /// The part of `text` not yet in the buffer
    pub fn suffix(&self) -> &str {
        &self.text[self.prefix.len()..]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuggestionState {
    /// Nothing suggested
    #[default]
    Idle,
    /// A prediction for `requested_prefix` is in flight
    Pending,
    /// The overlay is rendered
    Shown,
    /// The buffer drifted from what the overlay was rendered for
    Stale,
}

/// Holds the live suggestion for one editor session
#[derive(Debug, Clone, Default)]
pub struct SuggestionStore {
    state: SuggestionState,
    current: Option<Suggestion>,
    requested_prefix: Option<String>,
}

impl SuggestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SuggestionState {
        self.state
    }

    pub fn current(&self) -> Option<&Suggestion> {
        self.current.as_ref()
    }

    /// Prefix of the most recent request that has not been cleared
    pub fn requested_prefix(&self) -> Option<&str> {
        self.requested_prefix.as_deref()
    }

    /// Register a request for `prefix`
    ///
    /// Returns `false` when this exact prefix was the last one requested,
    /// whether its answer is pending, shown or was empty, in which case
    /// nothing changes. Otherwise any previous suggestion is dropped and the
    /// store becomes `Pending`.
    pub fn begin_request(&mut self, prefix: &str) -> bool {
        if self.requested_prefix.as_deref() == Some(prefix) {
            return false;
        }
        self.current = None;
        self.requested_prefix = Some(prefix.to_string());
        self.state = SuggestionState::Pending;
        true
    }

    /// Record a rendered suggestion
    pub fn show(&mut self, mut suggestion: Suggestion, displayed_for_buffer: &str) {
        suggestion.displayed_for_buffer = displayed_for_buffer.to_string();
        self.current = Some(suggestion);
        self.state = SuggestionState::Shown;
    }

    /// Flag a shown suggestion as no longer matching the buffer
    pub fn mark_stale(&mut self) {
        if self.state == SuggestionState::Shown {
            self.state = SuggestionState::Stale;
        }
    }

    /// Back to `Idle` after an answer with nothing to show
    ///
    /// The requested prefix is kept so the same buffer is not asked for again.
    pub fn dismiss(&mut self) {
        self.current = None;
        self.state = SuggestionState::Idle;
    }

    /// Back to `Idle` and forget the requested prefix; safe in any state
    pub fn clear(&mut self) {
        self.current = None;
        self.requested_prefix = None;
        self.state = SuggestionState::Idle;
    }
}

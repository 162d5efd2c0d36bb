//! One interactive shell session
//!
//! Ties the dispatcher, the command logger and the directory context cache
//! together so the host only has to forward editor events and the two
//! command hooks.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use ghosthist_client::{CommandStore, ContextInfo, ContextSource, PredictionClient};
use ghosthist_config::GhosthistConfig;
use ghosthist_keybinds::{EditorEvent, OverrideTable};
use tracing::{debug, info};

use crate::{
    context_cache::ContextCache,
    dispatcher::WidgetDispatcher,
    editor::EditorAdapter,
    engine::{EngineSettings, SuggestionEngine},
    error::Result,
    logger::CommandLogger,
    suggestion::SuggestionState,
};

pub struct Session<P, S, C> {
    dispatcher: WidgetDispatcher<P>,
    logger: CommandLogger<S>,
    context_source: C,
    context_cache: ContextCache,
}

impl<P, S, C> Session<P, S, C>
where
    P: PredictionClient,
    S: CommandStore,
    C: ContextSource,
{
    pub fn new(dispatcher: WidgetDispatcher<P>, logger: CommandLogger<S>, context_source: C) -> Self {
        info!(
            session_id = logger.session_id(),
            cwd = %dispatcher.context().cwd.display(),
            "Suggestion session started"
        );
        Self {
            dispatcher,
            logger,
            context_source,
            context_cache: ContextCache::new(),
        }
    }

    /// Build a session with the standard override table
    pub fn from_config(
        config: &GhosthistConfig,
        predictor: P,
        store: S,
        context_source: C,
        cwd: impl Into<PathBuf>,
        session_id: u32,
    ) -> Result<Self> {
        let engine = SuggestionEngine::new(predictor, EngineSettings::from_config(config));
        let dispatcher = WidgetDispatcher::new(engine, OverrideTable::standard(), cwd);
        let logger = CommandLogger::from_config(store, &config.logger, session_id)?;
        Ok(Self::new(dispatcher, logger, context_source))
    }

    pub fn dispatcher(&self) -> &WidgetDispatcher<P> {
        &self.dispatcher
    }

    pub fn logger(&self) -> &CommandLogger<S> {
        &self.logger
    }

    pub fn state(&self) -> SuggestionState {
        self.dispatcher.state()
    }

    pub fn cwd(&self) -> &Path {
        &self.dispatcher.context().cwd
    }

    pub async fn handle<E: EditorAdapter + ?Sized>(
        &mut self,
        editor: &mut E,
        event: EditorEvent,
    ) -> SuggestionState {
        if matches!(event, EditorEvent::DirectoryChanged(_)) {
            self.context_cache.invalidate();
        }
        self.dispatcher.handle(editor, event).await
    }

    pub fn preexec(&mut self, command: &str, now: SystemTime) {
        self.logger.preexec(command, now);
    }

    /// Log the finished command and feed it into later predictions
    ///
    /// The logged text is the editor's latest history entry, not the line
    /// passed to [`Session::preexec`].
    pub fn precmd<E: EditorAdapter + ?Sized>(
        &mut self,
        editor: &E,
        exit_status: i32,
        now: SystemTime,
    ) -> bool {
        let history_last = editor.last_history_entry();
        let cwd = self.cwd().to_path_buf();
        let dispatched = self
            .logger
            .precmd(exit_status, now, history_last.as_deref(), &cwd);

        let session = self.logger.session();
        self.dispatcher.set_history(
            session.last_command.clone(),
            session.previous_command.clone(),
        );
        dispatched
    }

    /// Context of the current directory, fetched at most once per directory
    pub async fn context(&mut self) -> ContextInfo {
        let cwd = self.cwd().to_path_buf();
        self.context_cache
            .get_or_fetch(&cwd, &self.context_source)
            .await
    }
}

impl<P, S, C> Drop for Session<P, S, C> {
    fn drop(&mut self) {
        debug!(session_id = self.logger.session_id(), "Suggestion session ended");
    }
}

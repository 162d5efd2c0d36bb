// One-shot suggestion against an in-memory buffer

use std::path::PathBuf;

use ghosthist_client::PredictionClient;
use ghosthist_completion::{
    EngineSettings, MemoryEditor, SuggestionEngine, WidgetDispatcher,
};
use ghosthist_config::GhosthistConfig;
use ghosthist_keybinds::{EditorEvent, OverrideTable, Widget};
use tracing::debug;

use super::Command;
use crate::error::CliResult;

/// Run one request-suggestion cycle and print the result
pub struct SuggestCommand<P> {
    predictor: P,
    settings: EngineSettings,
    buffer: String,
    cwd: PathBuf,
}

impl<P: PredictionClient> SuggestCommand<P> {
    pub fn new(predictor: P, config: &GhosthistConfig, buffer: String, cwd: PathBuf) -> Self {
        Self {
            predictor,
            settings: EngineSettings::from_config(config),
            buffer,
            cwd,
        }
    }

    /// The suggested command, if the collaborator offered one
    pub async fn suggestion(&self) -> Option<String>
    where
        P: Clone,
    {
        let engine = SuggestionEngine::new(self.predictor.clone(), self.settings.clone());
        let mut dispatcher = WidgetDispatcher::new(engine, OverrideTable::standard(), self.cwd.clone());
        let mut editor = MemoryEditor::with_buffer(&self.buffer);

        let state = dispatcher
            .handle(&mut editor, EditorEvent::Widget(Widget::RequestSuggestion))
            .await;
        debug!(buffer = %self.buffer, state = ?state, "One-shot suggestion finished");

        dispatcher
            .engine()
            .store()
            .current()
            .map(|suggestion| suggestion.text.clone())
    }
}

#[async_trait::async_trait]
impl<P: PredictionClient + Clone> Command for SuggestCommand<P> {
    async fn execute(&self) -> CliResult<()> {
        if let Some(text) = self.suggestion().await {
            println!("{}", text);
        }
        Ok(())
    }
}

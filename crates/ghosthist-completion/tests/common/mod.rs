//! Shared doubles for the completion integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ghosthist_client::{
    ClientError, CommandStore, ContextInfo, ContextSource, PredictRequest, PredictionClient,
    Result, StoreRequest,
};
use ghosthist_completion::{
    EditorAdapter, EngineSettings, MemoryEditor, Overlay, SuggestionEngine, WidgetDispatcher,
};
use ghosthist_keybinds::{EditAction, EditorEvent, OverrideTable};

type Hook = Box<dyn FnOnce() + Send>;

/// Prediction client answering from a fixed history
///
/// Answers are the history entries starting with the prefix, most recent
/// first, unless an exact answer was scripted for that prefix.
#[derive(Default)]
pub struct ScriptedPredictor {
    history: Vec<String>,
    exact: HashMap<String, Vec<String>>,
    delay: Option<Duration>,
    failing: bool,
    on_call: Mutex<Option<Hook>>,
    calls: Mutex<Vec<PredictRequest>>,
}

impl ScriptedPredictor {
    pub fn new<I, S>(history: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            history: history.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_answer<S: Into<String>>(mut self, prefix: &str, candidates: Vec<S>) -> Self {
        self.exact.insert(
            prefix.to_string(),
            candidates.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Run `hook` once, while the next call is in flight
    pub fn on_next_call(&self, hook: impl FnOnce() + Send + 'static) {
        *self.on_call.lock().unwrap() = Some(Box::new(hook));
    }

    pub fn calls(&self) -> Vec<PredictRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn prefixes(&self) -> Vec<String> {
        self.calls().into_iter().map(|r| r.prefix).collect()
    }
}

#[async_trait]
impl PredictionClient for ScriptedPredictor {
    async fn predict(&self, request: &PredictRequest) -> Result<Vec<String>> {
        self.calls.lock().unwrap().push(request.clone());

        let hook = self.on_call.lock().unwrap().take();
        if let Some(hook) = hook {
            hook();
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing {
            return Err(ClientError::Failed {
                status: "exit status: 1".to_string(),
                stderr: "database locked".to_string(),
            });
        }

        if let Some(answer) = self.exact.get(&request.prefix) {
            return Ok(answer.clone());
        }
        Ok(self
            .history
            .iter()
            .rev()
            .filter(|entry| entry.starts_with(&request.prefix))
            .take(request.limit)
            .cloned()
            .collect())
    }
}

/// Editor shared between the test and a predictor hook
#[derive(Clone, Default)]
pub struct SharedEditor(Arc<Mutex<MemoryEditor>>);

impl SharedEditor {
    pub fn new(editor: MemoryEditor) -> Self {
        Self(Arc::new(Mutex::new(editor)))
    }

    /// Simulate keystrokes that bypass the dispatcher
    pub fn type_behind(&self, text: &str) {
        let mut editor = self.0.lock().unwrap();
        for c in text.chars() {
            editor.run_native(EditAction::InsertChar(c));
        }
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.0.lock().unwrap().overlay().cloned()
    }
}

impl EditorAdapter for SharedEditor {
    fn buffer(&self) -> String {
        self.0.lock().unwrap().buffer()
    }

    fn cursor(&self) -> usize {
        self.0.lock().unwrap().cursor()
    }

    fn set_buffer(&mut self, text: &str) {
        self.0.lock().unwrap().set_buffer(text)
    }

    fn set_cursor(&mut self, position: usize) {
        self.0.lock().unwrap().set_cursor(position)
    }

    fn set_overlay(&mut self, overlay: Overlay) {
        self.0.lock().unwrap().set_overlay(overlay)
    }

    fn clear_overlay(&mut self) {
        self.0.lock().unwrap().clear_overlay()
    }

    fn clear_highlight(&mut self) {
        self.0.lock().unwrap().clear_highlight()
    }

    fn run_native(&mut self, action: EditAction) {
        self.0.lock().unwrap().run_native(action)
    }

    fn last_history_entry(&self) -> Option<String> {
        self.0.lock().unwrap().last_history_entry()
    }
}

#[derive(Default)]
pub struct RecordingStore {
    requests: Mutex<Vec<StoreRequest>>,
}

impl RecordingStore {
    pub fn requests(&self) -> Vec<StoreRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl CommandStore for RecordingStore {
    fn dispatch(&self, request: StoreRequest) {
        self.requests.lock().unwrap().push(request);
    }
}

/// Context source with a fixed answer that counts lookups
#[derive(Default)]
pub struct StaticContext {
    pub info: ContextInfo,
    lookups: AtomicUsize,
}

impl StaticContext {
    pub fn on_branch(branch: &str) -> Self {
        Self {
            info: ContextInfo {
                vcs: Some("git".to_string()),
                branch: Some(branch.to_string()),
                ..ContextInfo::default()
            },
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContextSource for StaticContext {
    async fn context(&self, _cwd: &Path) -> Result<ContextInfo> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.info.clone())
    }
}

pub fn dispatcher(predictor: Arc<ScriptedPredictor>) -> WidgetDispatcher<Arc<ScriptedPredictor>> {
    dispatcher_with(predictor, EngineSettings::default())
}

pub fn dispatcher_with(
    predictor: Arc<ScriptedPredictor>,
    settings: EngineSettings,
) -> WidgetDispatcher<Arc<ScriptedPredictor>> {
    let engine = SuggestionEngine::new(predictor, settings);
    WidgetDispatcher::new(engine, OverrideTable::standard(), "/home/user/project")
}

/// Type `text` one self-insert at a time through the dispatcher
pub async fn type_text<E: EditorAdapter>(
    dispatcher: &mut WidgetDispatcher<Arc<ScriptedPredictor>>,
    editor: &mut E,
    text: &str,
) {
    for c in text.chars() {
        dispatcher
            .handle(editor, EditorEvent::Action(EditAction::InsertChar(c)))
            .await;
    }
}

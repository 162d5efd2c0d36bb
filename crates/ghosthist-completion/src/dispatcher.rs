//! Widget dispatcher: editor events → override policy → engine

use std::path::PathBuf;

use ghosthist_client::PredictionClient;
use ghosthist_keybinds::{EditAction, EditorEvent, NextHandler, OverridePolicy, OverrideTable, Widget};
use tracing::trace;

use crate::{
    editor::EditorAdapter,
    engine::{Step, SuggestionEngine},
    suggestion::SuggestionState,
};

/// Hints sent along with every prediction request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionContext {
    pub cwd: PathBuf,
    /// Most recently executed command
    pub last_command: Option<String>,
    /// The command before that
    pub previous_command: Option<String>,
}

impl PredictionContext {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            ..Self::default()
        }
    }
}

/// Routes editor events through the override table into the engine
pub struct WidgetDispatcher<P> {
    engine: SuggestionEngine<P>,
    overrides: OverrideTable,
    context: PredictionContext,
}

impl<P: PredictionClient> WidgetDispatcher<P> {
    pub fn new(engine: SuggestionEngine<P>, overrides: OverrideTable, cwd: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            overrides,
            context: PredictionContext::new(cwd),
        }
    }

    pub fn engine(&self) -> &SuggestionEngine<P> {
        &self.engine
    }

    pub fn state(&self) -> SuggestionState {
        self.engine.state()
    }

    pub fn context(&self) -> &PredictionContext {
        &self.context
    }

    /// Update the command history sent with predictions
    pub fn set_history(&mut self, last: Option<String>, previous: Option<String>) {
        self.context.last_command = last;
        self.context.previous_command = previous;
    }

    /// Handle one editor event to completion
    ///
    /// A prediction, if one is needed, is awaited here under the engine's
    /// hard timeout; the editor sees no further events until it returns.
    pub async fn handle<E: EditorAdapter + ?Sized>(
        &mut self,
        editor: &mut E,
        event: EditorEvent,
    ) -> SuggestionState {
        match event {
            EditorEvent::Action(action) => self.handle_action(editor, action).await,
            EditorEvent::Widget(widget) => {
                let fallback = self.overrides.fallback(widget);
                self.run_widget(editor, widget, fallback).await;
            }
            EditorEvent::Redraw => {
                self.engine.on_redraw(editor);
            }
            EditorEvent::DirectoryChanged(cwd) => {
                trace!(cwd = %cwd.display(), "Working directory changed");
                self.context.cwd = cwd;
            }
        }
        self.engine.state()
    }

    async fn handle_action<E: EditorAdapter + ?Sized>(&mut self, editor: &mut E, action: EditAction) {
        let ov = self.overrides.resolve(&action);
        trace!(action = %action, policy = ?ov.policy, next = ?ov.next, "Dispatching action");

        if ov.policy == OverridePolicy::ClearThenDelegate {
            self.engine.clear(editor);
        }

        match ov.next {
            NextHandler::Original => editor.run_native(action),
            NextHandler::Native(other) => editor.run_native(other),
            NextHandler::Widget(widget) => self.run_widget(editor, widget, Some(action)).await,
        }

        if ov.policy == OverridePolicy::DelegateThenSuggest {
            let step = self.engine.update(editor, &self.context);
            self.drive(editor, step, None).await;
        }
    }

    async fn run_widget<E: EditorAdapter + ?Sized>(
        &mut self,
        editor: &mut E,
        widget: Widget,
        fallback: Option<EditAction>,
    ) {
        let step = match widget {
            Widget::RequestSuggestion => self.engine.update(editor, &self.context),
            Widget::AcceptSuggestion => self.engine.accept(editor),
            Widget::AcceptWord => self.engine.accept_word(editor, &self.context),
            Widget::ClearSuggestion => {
                self.engine.clear(editor);
                Step::Handled
            }
        };
        self.drive(editor, step, fallback).await;
    }

    async fn drive<E: EditorAdapter + ?Sized>(
        &mut self,
        editor: &mut E,
        step: Step,
        fallback: Option<EditAction>,
    ) {
        match step {
            Step::Handled => {}
            Step::NotHandled => {
                if let Some(action) = fallback {
                    editor.run_native(action);
                }
            }
            Step::Fetch(request) => {
                let candidates = self.engine.fetch(&request).await;
                self.engine.reconcile(editor, &request, candidates);
            }
        }
    }
}

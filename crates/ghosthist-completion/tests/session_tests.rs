//! Full editing sessions: typing, running a command, predicting again

mod common;

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use common::{RecordingStore, ScriptedPredictor, StaticContext};
use ghosthist_completion::{MemoryEditor, Session, SuggestionState};
use ghosthist_config::GhosthistConfig;
use ghosthist_keybinds::{EditAction, EditorEvent};

type TestSession = Session<Arc<ScriptedPredictor>, Arc<RecordingStore>, Arc<StaticContext>>;

struct Fixture {
    session: TestSession,
    predictor: Arc<ScriptedPredictor>,
    store: Arc<RecordingStore>,
    context: Arc<StaticContext>,
}

fn fixture(config: GhosthistConfig, history: &[&str]) -> Fixture {
    let predictor = Arc::new(ScriptedPredictor::new(history.iter().copied()));
    let store = Arc::new(RecordingStore::default());
    let context = Arc::new(StaticContext::on_branch("main"));
    let session = Session::from_config(
        &config,
        predictor.clone(),
        store.clone(),
        context.clone(),
        "/home/user/api",
        4321,
    )
    .unwrap();
    Fixture {
        session,
        predictor,
        store,
        context,
    }
}

async fn type_text(session: &mut TestSession, editor: &mut MemoryEditor, text: &str) {
    for c in text.chars() {
        session
            .handle(editor, EditorEvent::Action(EditAction::InsertChar(c)))
            .await;
    }
}

/// Type `line`, accept it and run the command hooks around a fake execution
async fn run_line(
    session: &mut TestSession,
    editor: &mut MemoryEditor,
    line: &str,
    took: Duration,
) -> String {
    type_text(session, editor, line).await;
    session
        .handle(editor, EditorEvent::Action(EditAction::AcceptLine))
        .await;
    let accepted = editor.take_accepted().unwrap();

    let started = SystemTime::now();
    session.preexec(&accepted, started);
    session.precmd(editor, 0, started + took);
    accepted
}

#[tokio::test]
async fn test_executed_command_feeds_next_prediction() {
    let mut fx = fixture(GhosthistConfig::default(), &["git status"]);
    let mut editor = MemoryEditor::new();

    run_line(&mut fx.session, &mut editor, "cargo fmt", Duration::from_millis(250)).await;

    let requests = fx.store.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].cmd, "cargo fmt");
    assert_eq!(requests[0].duration_ms, Some(250));
    assert_eq!(requests[0].session_id, Some(4321));
    assert_eq!(requests[0].cwd.to_str(), Some("/home/user/api"));

    type_text(&mut fx.session, &mut editor, "gi").await;

    let last = fx.predictor.calls().pop().unwrap();
    assert_eq!(last.prefix, "gi");
    assert_eq!(last.last_cmd.as_deref(), Some("cargo fmt"));
    assert_eq!(fx.session.state(), SuggestionState::Shown);
}

#[tokio::test]
async fn test_history_expansion_is_logged_expanded() {
    let mut fx = fixture(GhosthistConfig::default(), &[]);
    let mut editor = MemoryEditor::new().with_history(["make"]);

    let accepted = run_line(&mut fx.session, &mut editor, "sudo !!", Duration::ZERO).await;

    assert_eq!(accepted, "sudo make");
    assert_eq!(fx.store.requests()[0].cmd, "sudo make");
    assert_eq!(fx.session.logger().last_command(), Some("sudo make"));
}

#[tokio::test]
async fn test_space_prefixed_command_is_private() {
    let mut fx = fixture(GhosthistConfig::default(), &[]);
    let mut editor = MemoryEditor::new();

    run_line(&mut fx.session, &mut editor, "ls", Duration::ZERO).await;
    run_line(&mut fx.session, &mut editor, " echo $SECRET", Duration::ZERO).await;

    assert_eq!(fx.store.requests().len(), 1);
    assert_eq!(fx.session.logger().last_command(), Some("ls"));
    assert_eq!(
        fx.session.dispatcher().context().last_command.as_deref(),
        Some("ls")
    );
}

#[tokio::test]
async fn test_disabled_logger_still_feeds_predictions() {
    let mut config = GhosthistConfig::default();
    config.logger.enabled = false;
    let mut fx = fixture(config, &[]);
    let mut editor = MemoryEditor::new();

    run_line(&mut fx.session, &mut editor, "npm ci", Duration::ZERO).await;
    type_text(&mut fx.session, &mut editor, "np").await;

    assert!(fx.store.requests().is_empty());
    assert_eq!(
        fx.predictor.calls().pop().unwrap().last_cmd.as_deref(),
        Some("npm ci")
    );
}

#[tokio::test]
async fn test_context_is_cached_per_directory() {
    let mut fx = fixture(GhosthistConfig::default(), &[]);
    let mut editor = MemoryEditor::new();

    let info = fx.session.context().await;
    assert_eq!(info.branch.as_deref(), Some("main"));
    fx.session.context().await;
    assert_eq!(fx.context.lookups(), 1);

    fx.session
        .handle(&mut editor, EditorEvent::DirectoryChanged("/home/user/web".into()))
        .await;
    assert_eq!(fx.session.cwd().to_str(), Some("/home/user/web"));
    fx.session.context().await;
    assert_eq!(fx.context.lookups(), 2);
}

#[tokio::test]
async fn test_commands_are_logged_from_current_directory() {
    let mut fx = fixture(GhosthistConfig::default(), &[]);
    let mut editor = MemoryEditor::new();

    fx.session
        .handle(&mut editor, EditorEvent::DirectoryChanged("/tmp".into()))
        .await;
    run_line(&mut fx.session, &mut editor, "touch x", Duration::ZERO).await;

    assert_eq!(fx.store.requests()[0].cwd.to_str(), Some("/tmp"));
}


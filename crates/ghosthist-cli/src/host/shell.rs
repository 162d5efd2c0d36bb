//! The interactive read-eval loop

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::SystemTime;

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use ghosthist_client::{CommandStore, ContextSource, PredictionClient};
use ghosthist_completion::{EditorAdapter, MemoryEditor, Session};
use ghosthist_keybinds::{EditAction, EditorEvent, Keymap};
use tracing::{debug, info};

use crate::{
    error::CliResult,
    host::{
        events::{EventSource, TermEvent},
        keys,
        render::{compose, draw, format_prompt},
        runner::{RunOutcome, ShellRunner},
    },
};

/// Raw mode for as long as the guard lives
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }

    fn suspend(&self) -> io::Result<()> {
        disable_raw_mode()
    }

    fn restore(&self) -> io::Result<()> {
        enable_raw_mode()
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

pub struct InteractiveShell<P, S, C> {
    session: Session<P, S, C>,
    editor: MemoryEditor,
    keymap: Keymap,
    runner: ShellRunner,
    prompt: String,
}

impl<P, S, C> InteractiveShell<P, S, C>
where
    P: PredictionClient,
    S: CommandStore,
    C: ContextSource,
{
    pub fn new(
        session: Session<P, S, C>,
        editor: MemoryEditor,
        keymap: Keymap,
        runner: ShellRunner,
    ) -> Self {
        Self {
            session,
            editor,
            keymap,
            runner,
            prompt: "$ ".to_string(),
        }
    }

    /// Run until `exit` or ctrl+d on an empty line
    pub async fn run(mut self) -> CliResult<()> {
        info!(shell = %self.runner.shell(), "Interactive shell started");
        let mut events = EventSource::spawn();
        let raw = RawMode::enable()?;
        let mut out = io::stdout();

        self.refresh_prompt().await;
        self.redraw(&mut out)?;

        while let Some(event) = events.next().await {
            let key = match event {
                TermEvent::Key(key) => key,
                TermEvent::Resize { .. } => {
                    self.redraw(&mut out)?;
                    continue;
                }
            };

            if keys::is_ctrl(&key, 'd') && self.editor.is_empty() {
                break;
            }
            if keys::is_ctrl(&key, 'c') {
                self.cancel_line(&mut out).await?;
                continue;
            }
            let Some(editor_event) = keys::translate(&self.keymap, &key) else {
                continue;
            };

            self.session.handle(&mut self.editor, editor_event).await;

            if let Some(line) = self.editor.take_accepted() {
                write!(out, "\r\n")?;
                out.flush()?;
                events.pause();
                let outcome = self.execute(&line, &raw).await?;
                events.resume();
                if outcome == RunOutcome::Exit {
                    break;
                }
            }
            if self.editor.take_clear_screen() {
                execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
            }

            self.session.handle(&mut self.editor, EditorEvent::Redraw).await;
            self.redraw(&mut out)?;
        }

        write!(out, "\r\n")?;
        out.flush()?;
        info!("Interactive shell finished");
        Ok(())
    }

    /// Run one line with the terminal handed over to it
    async fn execute(&mut self, line: &str, raw: &RawMode) -> CliResult<RunOutcome> {
        if line.trim().is_empty() {
            return Ok(RunOutcome::Finished(0));
        }

        raw.suspend()?;

        let before = std::env::current_dir().ok();
        self.session.preexec(line, SystemTime::now());
        let outcome = self.runner.run(line).await;
        let after = std::env::current_dir().ok();

        if after != before {
            if let Some(dir) = after {
                self.session
                    .handle(&mut self.editor, EditorEvent::DirectoryChanged(dir))
                    .await;
            }
        }

        let status = match outcome {
            RunOutcome::Finished(status) => status,
            RunOutcome::Exit => 0,
        };
        self.session.precmd(&self.editor, status, SystemTime::now());
        debug!(status, "Command finished");

        raw.restore()?;
        self.refresh_prompt().await;
        Ok(outcome)
    }

    async fn cancel_line(&mut self, out: &mut impl Write) -> CliResult<()> {
        self.session
            .handle(&mut self.editor, EditorEvent::Action(EditAction::KillWholeLine))
            .await;
        write!(out, "^C\r\n")?;
        self.redraw(out)
    }

    async fn refresh_prompt(&mut self) {
        let context = self.session.context().await;
        let cwd: PathBuf = self.session.cwd().to_path_buf();
        self.prompt = format_prompt(&cwd, dirs::home_dir().as_deref(), &context);
    }

    fn redraw(&self, out: &mut impl Write) -> CliResult<()> {
        let frame = compose(
            &self.prompt,
            &self.editor.buffer(),
            self.editor.cursor(),
            self.editor.overlay(),
            self.editor.highlight(),
        );
        draw(out, &frame)?;
        Ok(())
    }
}

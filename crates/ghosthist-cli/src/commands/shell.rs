// Interactive line editor with ghost-text suggestions

use std::sync::Arc;
use std::time::Duration;

use ghosthist_client::{CliClient, GatedPredictor, LivenessProbe};
use ghosthist_completion::{MemoryEditor, Session};
use ghosthist_config::GhosthistConfig;
use ghosthist_keybinds::Keymap;

use super::Command;
use crate::error::CliResult;
use crate::host::{completer::path_completer, InteractiveShell, ShellRunner};

pub struct ShellCommand {
    config: GhosthistConfig,
}

impl ShellCommand {
    pub fn new(config: GhosthistConfig) -> Self {
        Self { config }
    }

    /// Standard keymap with the configured overrides applied
    pub fn keymap(&self) -> CliResult<Keymap> {
        let mut keymap = Keymap::standard();
        keymap.merge_config(self.config.keybinds.bindings.iter())?;
        Ok(keymap)
    }
}

#[async_trait::async_trait]
impl Command for ShellCommand {
    async fn execute(&self) -> CliResult<()> {
        let keymap = self.keymap()?;
        let client = CliClient::from_config(&self.config);
        let probe = Arc::new(LivenessProbe::new(
            Arc::new(client.clone()),
            Duration::from_secs(self.config.predictor.probe_interval_secs),
        ));
        // Settle liveness before the first keystroke so it costs no prediction time
        let _ = probe.probe().await;
        let predictor = GatedPredictor::new(client.clone(), probe);

        let session = Session::from_config(
            &self.config,
            predictor,
            client.clone(),
            client,
            std::env::current_dir()?,
            std::process::id(),
        )?;
        let editor = MemoryEditor::new().with_completer(path_completer());

        InteractiveShell::new(session, editor, keymap, ShellRunner::detect())
            .run()
            .await
    }
}

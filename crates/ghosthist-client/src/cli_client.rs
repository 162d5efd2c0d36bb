//! Subprocess implementation of the collaborator traits

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use ghosthist_config::GhosthistConfig;
use ghosthist_process::{ProcessConfig, ProcessManager};
use tracing::debug;

use crate::{
    client::{CommandStore, ContextSource, LivenessCheck, PredictionClient},
    context::ContextInfo,
    error::{ClientError, Result},
    parse::parse_plain_lines,
    request::{FrecentRequest, PredictRequest, SearchRequest, StoreRequest},
};

const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_millis(150);
const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(2);

/// Talks to the collaborator by running its command-line front end
#[derive(Debug, Clone)]
pub struct CliClient {
    program: PathBuf,
    manager: ProcessManager,
    call_timeout: Duration,
    store_timeout: Duration,
}

impl CliClient {
    /// Client for `program`, resolved through `PATH` when possible
    ///
    /// An unresolvable program is kept as given; calls then fail with
    /// [`ClientError::Unavailable`].
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        let program = program.as_ref();
        let resolved = match which::which(program) {
            Ok(path) => path,
            Err(e) => {
                debug!(program = ?program, error = %e, "Collaborator not found on PATH");
                PathBuf::from(program)
            }
        };

        Self {
            program: resolved,
            manager: ProcessManager::new(),
            call_timeout: DEFAULT_CALL_TIMEOUT,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn from_config(config: &GhosthistConfig) -> Self {
        Self::new(&config.predictor.program)
            .with_timeout(Duration::from_millis(config.predictor.timeout_ms))
            .with_store_timeout(Duration::from_millis(config.logger.store_timeout_ms))
    }

    /// Hard timeout for calls whose answer is awaited
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Timeout after which a detached store call is killed
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<String>> {
        let stdout = self.call(request.to_args()).await?;
        Ok(parse_plain_lines(&stdout))
    }

    pub async fn frecent(&self, request: &FrecentRequest) -> Result<Vec<String>> {
        let stdout = self.call(request.to_args()).await?;
        Ok(parse_plain_lines(&stdout))
    }

    fn process_config(&self, args: Vec<String>) -> ProcessConfig {
        ProcessConfig::new(self.program.to_string_lossy().into_owned()).args(args)
    }

    async fn call(&self, args: Vec<String>) -> Result<String> {
        let subcommand = args.first().cloned().unwrap_or_default();
        let config = self.process_config(args).timeout(self.call_timeout);

        let output = self.manager.output(config).await?;
        if !output.success() {
            debug!(subcommand = %subcommand, status = %output.status, "Collaborator call failed");
            return Err(ClientError::Failed {
                status: output.status.to_string(),
                stderr: output.stderr_lossy(),
            });
        }

        Ok(output.stdout_utf8()?.to_string())
    }
}

#[async_trait]
impl PredictionClient for CliClient {
    async fn predict(&self, request: &PredictRequest) -> Result<Vec<String>> {
        let stdout = self.call(request.to_args()).await?;
        Ok(parse_plain_lines(&stdout))
    }
}

impl CommandStore for CliClient {
    fn dispatch(&self, request: StoreRequest) {
        let config = self
            .process_config(request.to_args())
            .timeout(self.store_timeout);
        self.manager.spawn_detached(config);
    }
}

#[async_trait]
impl ContextSource for CliClient {
    async fn context(&self, cwd: &Path) -> Result<ContextInfo> {
        let stdout = self
            .call(vec!["context".to_string(), format!("--cwd={}", cwd.display())])
            .await?;
        Ok(ContextInfo::parse(&stdout))
    }
}

#[async_trait]
impl LivenessCheck for CliClient {
    async fn ping(&self) -> Result<()> {
        self.call(vec!["ping".to_string()]).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_program_is_kept() {
        let client = CliClient::new("ghosthist-definitely-not-installed");
        assert_eq!(
            client.program(),
            Path::new("ghosthist-definitely-not-installed")
        );
    }

    #[test]
    fn test_from_config_uses_timeouts() {
        let mut config = GhosthistConfig::default();
        config.predictor.timeout_ms = 40;
        config.logger.store_timeout_ms = 900;

        let client = CliClient::from_config(&config);
        assert_eq!(client.call_timeout, Duration::from_millis(40));
        assert_eq!(client.store_timeout, Duration::from_millis(900));
    }

    #[tokio::test]
    async fn test_missing_program_is_unavailable() {
        let client = CliClient::new("ghosthist-definitely-not-installed");
        let result = client.predict(&PredictRequest::new("gi", "/", 5)).await;
        assert!(matches!(result, Err(ClientError::Unavailable(_))));
    }
}

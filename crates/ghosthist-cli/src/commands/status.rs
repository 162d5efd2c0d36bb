// Collaborator liveness report

use std::sync::Arc;
use std::time::Duration;

use ghosthist_client::{ClientError, LivenessCheck, LivenessProbe};

use super::Command;
use crate::error::CliResult;

/// Probe the history collaborator once
///
/// This is the only command that reports an unavailable collaborator; the
/// interactive shell degrades silently instead.
pub struct StatusCommand {
    probe: LivenessProbe,
}

impl StatusCommand {
    pub fn new(check: Arc<dyn LivenessCheck>) -> Self {
        Self {
            probe: LivenessProbe::new(check, Duration::ZERO),
        }
    }
}

#[async_trait::async_trait]
impl Command for StatusCommand {
    async fn execute(&self) -> CliResult<()> {
        self.probe.probe().await.map_err(|e| match e {
            ClientError::Unavailable(_) => e,
            other => ClientError::Unavailable(other.to_string()),
        })?;
        println!("running");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use ghosthist_client::Result as ClientResult;

    struct Down;

    #[async_trait::async_trait]
    impl LivenessCheck for Down {
        async fn ping(&self) -> ClientResult<()> {
            Err(ClientError::Unavailable("histctl not found".to_string()))
        }
    }

    struct Broken;

    #[async_trait::async_trait]
    impl LivenessCheck for Broken {
        async fn ping(&self) -> ClientResult<()> {
            Err(ClientError::Timeout { millis: 150 })
        }
    }

    struct Up;

    #[async_trait::async_trait]
    impl LivenessCheck for Up {
        async fn ping(&self) -> ClientResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_running() {
        assert!(StatusCommand::new(Arc::new(Up)).execute().await.is_ok());
    }

    #[tokio::test]
    async fn test_not_running_reports_reason() {
        let err = StatusCommand::new(Arc::new(Down)).execute().await.unwrap_err();
        assert!(matches!(err, CliError::Client(ClientError::Unavailable(_))));
        assert_eq!(err.user_message(), "not running (histctl not found)");
    }

    #[tokio::test]
    async fn test_any_failure_is_not_running() {
        let err = StatusCommand::new(Arc::new(Broken)).execute().await.unwrap_err();
        assert!(err.user_message().starts_with("not running ("));
    }
}

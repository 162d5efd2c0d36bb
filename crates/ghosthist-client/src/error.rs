//! Collaborator call errors
//!
//! None of these reach the interactive user; the suggestion engine maps every
//! variant to "no candidates".

use ghosthist_process::ProcessError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The collaborator is missing or did not answer its liveness probe
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    /// The call exceeded its hard timeout
    #[error("collaborator call timed out after {millis}ms")]
    Timeout { millis: u64 },

    /// The collaborator exited unsuccessfully
    #[error("collaborator failed ({status}): {stderr}")]
    Failed { status: String, stderr: String },

    /// The collaborator's output could not be decoded
    #[error("malformed collaborator output: {0}")]
    Malformed(String),

    #[error(transparent)]
    Process(ProcessError),
}

impl From<ProcessError> for ClientError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::Timeout { millis } => ClientError::Timeout { millis },
            ProcessError::SpawnFailed(e) => ClientError::Unavailable(e.to_string()),
            ProcessError::InvalidOutput => {
                ClientError::Malformed("output is not valid UTF-8".to_string())
            }
            other => ClientError::Process(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

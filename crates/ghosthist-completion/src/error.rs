//! Error types for setting up a suggestion session
//!
//! Interactive operations never fail; only construction does.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Invalid ignore pattern: {0}")]
    InvalidPattern(#[from] globset::Error),
}

pub type Result<T> = std::result::Result<T, CompletionError>;

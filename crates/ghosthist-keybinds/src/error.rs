//! Error types for key and binding parsing

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeybindError {
    #[error("Invalid key syntax: {0}")]
    InvalidKeySyntax(String),

    #[error("Invalid modifier: {0}")]
    InvalidModifier(String),

    #[error("Unknown action or widget: {0}")]
    UnknownBinding(String),
}

pub type Result<T> = std::result::Result<T, KeybindError>;

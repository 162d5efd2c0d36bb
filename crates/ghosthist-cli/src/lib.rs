//! ghosthist command-line host
//!
//! The `ghosthist` binary wraps the suggestion core in a small raw-mode line
//! editor (`ghosthist shell`) and exposes a few one-shot commands that talk to
//! the history collaborator directly.

pub mod commands;
pub mod error;
pub mod host;
pub mod logging;
pub mod output;
pub mod router;

pub use error::{CliError, CliResult};

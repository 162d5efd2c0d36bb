//! # ghosthist-process
//!
//! Subprocess plumbing for talking to the history collaborator.
//!
//! Two call shapes matter to the line editor:
//!
//! - **Bounded calls** ([`ProcessManager::output`]): run to completion, capture
//!   output, and kill the child once the hard timeout elapses. Used on the
//!   keystroke path, so the timeout is the tail-latency bound.
//! - **Detached calls** ([`ProcessManager::spawn_detached`]): issued on a
//!   background task and never awaited. The caller gets no result and no error.
//!
//! ```rust,no_run
//! use ghosthist_process::{ProcessConfig, ProcessManager};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ProcessManager::new();
//!
//! let config = ProcessConfig::new("histctl")
//!     .args(["predict", "--prefix=gi", "--plain"])
//!     .timeout(Duration::from_millis(150));
//! let output = manager.output(config).await?;
//! println!("{}", output.stdout_utf8()?);
//!
//! manager.spawn_detached(ProcessConfig::new("histctl").args(["store", "--cmd=ls"]));
//! # Ok(())
//! # }
//! ```

pub mod child;
pub mod config;
pub mod error;
pub mod manager;
pub mod output;

pub use child::ManagedChild;
pub use config::ProcessConfig;
pub use error::{ProcessError, Result};
pub use manager::ProcessManager;
pub use output::ProcessOutput;

//! Interactive terminal host
//!
//! A raw-mode line editor around [`ghosthist_completion::MemoryEditor`]:
//! terminal keys are mapped through the [`ghosthist_keybinds::Keymap`] into
//! editor events, the [`ghosthist_completion::Session`] handles them, and the
//! line is redrawn with the ghost text after every event. Accepted lines run
//! through the user's shell.

pub mod completer;
pub mod events;
pub mod keys;
pub mod render;
pub mod runner;
pub mod shell;

pub use events::{EventSource, TermEvent};
pub use render::{compose, format_prompt, Frame};
pub use runner::{classify, LineCommand, RunOutcome, ShellRunner};
pub use shell::InteractiveShell;

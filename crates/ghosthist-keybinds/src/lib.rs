//! Key handling vocabulary shared by the suggestion core and the host editor
//!
//! - [`EditAction`]: the closed set of built-in editing actions the host knows
//! - [`Widget`]: the suggestion widgets the core registers
//! - [`EditorEvent`]: what the host feeds into the dispatcher
//! - [`OverrideTable`]: per-action policy plus an explicit next handler
//! - [`Keymap`]: key combos to actions or widgets

pub mod action;
pub mod error;
pub mod key;
pub mod keymap;
pub mod overrides;

pub use action::{Binding, EditAction, EditorEvent, Widget};
pub use error::{KeybindError, Result};
pub use key::{Key, KeyCombo, Modifier};
pub use keymap::Keymap;
pub use overrides::{NextHandler, Override, OverridePolicy, OverrideTable};

//! # ghosthist-completion
//!
//! Ghost-text command-line suggestions for an interactive line editor.
//!
//! The line editor is the only execution context. Each editor event is
//! handed to the [`WidgetDispatcher`], which applies the action's override
//! policy, drives the [`SuggestionEngine`] and, when a prediction is needed,
//! awaits the collaborator under a hard timeout before reconciling the answer
//! against the buffer as it is *now*.
//!
//! ```text
//!            ┌──────── update ────────┐
//!            │                        ▼
//!   Idle ◄───┴── empty/timeout ── Pending ── extends buffer ──► Shown
//!    ▲                                                           │
//!    ├──────────── clear / accept / destructive action ──────────┤
//!    └──────────────────────── Stale ◄──── drift on redraw ──────┘
//! ```
//!
//! Executed commands go through the [`CommandLogger`], which dispatches a
//! store request without waiting for it.

pub mod context_cache;
pub mod dispatcher;
pub mod drift;
pub mod editor;
pub mod engine;
pub mod error;
pub mod logger;
pub mod memory_editor;
pub mod overlay;
pub mod session;
pub mod suggestion;

pub use context_cache::ContextCache;
pub use dispatcher::{PredictionContext, WidgetDispatcher};
pub use drift::detect_drift;
pub use editor::EditorAdapter;
pub use engine::{EngineSettings, Step, SuggestionEngine};
pub use error::{CompletionError, Result};
pub use logger::{CommandLogger, CommandStart, IgnorePatterns, SessionState};
pub use memory_editor::MemoryEditor;
pub use overlay::{render_overlay, Overlay, OverlayStyle};
pub use session::Session;
pub use suggestion::{Suggestion, SuggestionState, SuggestionStore};

//! # ghosthist-client
//!
//! The contract between the line editor and the external history
//! collaborator (ranking, storage, frecency). The collaborator is a
//! command-line program; every request is one invocation:
//!
//! | Request | Invocation | Response |
//! |---------|------------|----------|
//! | predict | `predict --prefix=P --cwd=D --limit=N [--last-cmd=A] [--prev-cmd=B] [--timeout-ms=T] --plain` | candidate per line, best first |
//! | store | `store --cmd=C --cwd=D [--exit-status=S] [--duration-ms=M] [--start-time=T] [--session-id=I] [--prev-cmd=A] [--prev2-cmd=B]` | not read |
//! | context | `context --cwd=D` | `key=value` lines |
//! | ping | `ping` | exit status only |
//! | search | `search --limit=N [--dir=D] --plain -- PATTERN` | result per line |
//! | frecent | `frecent --limit=N [--dirs\|--files] --plain -- TERMS...` | path per line |
//!
//! Free-text values are always attached with `=` so that a prefix such as
//! `-la` is never mistaken for a flag.

pub mod cli_client;
pub mod client;
pub mod context;
pub mod error;
pub mod parse;
pub mod probe;
pub mod request;

pub use cli_client::CliClient;
pub use client::{CommandStore, ContextSource, LivenessCheck, PredictionClient};
pub use context::ContextInfo;
pub use error::{ClientError, Result};
pub use parse::parse_plain_lines;
pub use probe::{GatedPredictor, LivenessProbe};
pub use request::{FrecentRequest, PathKind, PredictRequest, SearchRequest, StoreRequest};

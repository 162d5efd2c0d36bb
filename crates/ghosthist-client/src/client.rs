//! Collaborator traits
//!
//! The suggestion engine and command logger only see these traits, so tests
//! substitute in-memory doubles for the real subprocess client.

use std::path::Path;

use async_trait::async_trait;

use crate::{
    context::ContextInfo,
    error::Result,
    request::{PredictRequest, StoreRequest},
};

/// Ranked completions for a prefix
#[async_trait]
pub trait PredictionClient: Send + Sync {
    /// Candidates, most likely first; empty when there is no match
    async fn predict(&self, request: &PredictRequest) -> Result<Vec<String>>;
}

/// Fire-and-forget command storage
///
/// `dispatch` must return without waiting for the store to complete and
/// offers no way to observe the outcome.
pub trait CommandStore: Send + Sync {
    fn dispatch(&self, request: StoreRequest);
}

#[async_trait]
pub trait ContextSource: Send + Sync {
    async fn context(&self, cwd: &Path) -> Result<ContextInfo>;
}

#[async_trait]
pub trait LivenessCheck: Send + Sync {
    /// `Ok(())` when the collaborator answers
    async fn ping(&self) -> Result<()>;
}

#[async_trait]
impl<T: PredictionClient + ?Sized> PredictionClient for std::sync::Arc<T> {
    async fn predict(&self, request: &PredictRequest) -> Result<Vec<String>> {
        (**self).predict(request).await
    }
}

impl<T: CommandStore + ?Sized> CommandStore for std::sync::Arc<T> {
    fn dispatch(&self, request: StoreRequest) {
        (**self).dispatch(request)
    }
}

#[async_trait]
impl<T: ContextSource + ?Sized> ContextSource for std::sync::Arc<T> {
    async fn context(&self, cwd: &Path) -> Result<ContextInfo> {
        (**self).context(cwd).await
    }
}

#[async_trait]
impl<T: LivenessCheck + ?Sized> LivenessCheck for std::sync::Arc<T> {
    async fn ping(&self) -> Result<()> {
        (**self).ping().await
    }
}

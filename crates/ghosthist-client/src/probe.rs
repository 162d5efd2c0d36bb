//! Liveness probing
//!
//! Decides whether calling the collaborator is worthwhile at all. A failed
//! probe is remembered for `interval` so that a missing collaborator costs one
//! spawn per interval instead of one per keystroke.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::{
    client::{LivenessCheck, PredictionClient},
    error::{ClientError, Result},
    request::PredictRequest,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProbeState {
    Unknown,
    Available,
    Unavailable { since: Instant },
}

/// Cached liveness of the collaborator
pub struct LivenessProbe {
    check: Arc<dyn LivenessCheck>,
    interval: Duration,
    state: Mutex<ProbeState>,
}

impl LivenessProbe {
    pub fn new(check: Arc<dyn LivenessCheck>, interval: Duration) -> Self {
        Self {
            check,
            interval,
            state: Mutex::new(ProbeState::Unknown),
        }
    }

    /// Whether calls should be attempted
    ///
    /// Probes on first use and again once `interval` has passed since the
    /// last failure. A successful probe is trusted until
    /// [`mark_unavailable`](Self::mark_unavailable) is called.
    pub async fn is_available(&self) -> bool {
        let due = match *self.lock() {
            ProbeState::Available => return true,
            ProbeState::Unknown => true,
            ProbeState::Unavailable { since } => since.elapsed() >= self.interval,
        };
        if !due {
            return false;
        }
        self.probe().await.is_ok()
    }

    /// Ping now and record the result
    pub async fn probe(&self) -> Result<()> {
        let result = self.check.ping().await;
        let mut state = self.lock();
        match &result {
            Ok(()) => {
                if *state != ProbeState::Available {
                    info!("History collaborator available");
                }
                *state = ProbeState::Available;
            }
            Err(e) => {
                if !matches!(*state, ProbeState::Unavailable { .. }) {
                    info!(error = %e, "History collaborator unavailable");
                }
                *state = ProbeState::Unavailable {
                    since: Instant::now(),
                };
            }
        }
        result
    }

    /// Record a failure observed outside the probe
    pub fn mark_unavailable(&self, reason: &str) {
        let mut state = self.lock();
        if !matches!(*state, ProbeState::Unavailable { .. }) {
            info!(reason = %reason, "History collaborator unavailable");
        }
        *state = ProbeState::Unavailable {
            since: Instant::now(),
        };
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ProbeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Prediction client that skips calls while the collaborator is down
pub struct GatedPredictor<C> {
    inner: C,
    probe: Arc<LivenessProbe>,
}

impl<C: PredictionClient> GatedPredictor<C> {
    pub fn new(inner: C, probe: Arc<LivenessProbe>) -> Self {
        Self { inner, probe }
    }
}

#[async_trait]
impl<C: PredictionClient> PredictionClient for GatedPredictor<C> {
    async fn predict(&self, request: &PredictRequest) -> Result<Vec<String>> {
        if !self.probe.is_available().await {
            debug!("Skipping prediction, collaborator unavailable");
            return Err(ClientError::Unavailable("liveness probe failed".to_string()));
        }

        let result = self.inner.predict(request).await;
        if let Err(ClientError::Unavailable(reason)) = &result {
            self.probe.mark_unavailable(reason);
        }
        result
    }
}

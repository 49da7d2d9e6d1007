//! Remote draft sync.
//!
//! One call per save, no automatic retry, no cancellation token; the save
//! coordinator guarantees at most one call in flight.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::config::{RemoteConfig, RemoteMode};
use crate::draft::state::{FormData, WizardStep};

#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    #[error("draft sync rejected: {0}")]
    Rejected(String),
    #[error("network error: {0}")]
    Transport(String),
}

/// What the backend receives on every save
#[derive(Debug, Clone, Serialize)]
pub struct SavePayload {
    pub draft_id: Uuid,
    pub step: WizardStep,
    pub data: FormData,
}

#[async_trait]
pub trait RemoteClient: Send + Sync {
    async fn save(&self, payload: &SavePayload) -> Result<(), RemoteError>;
}

/// Stand-in backend: fixed latency, then a small chance of failure
pub struct SimulatedRemote {
    latency: Duration,
    failure_rate: f64,
}

impl SimulatedRemote {
    pub fn new(latency: Duration, failure_rate: f64) -> Self {
        Self {
            latency,
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }
}

#[async_trait]
impl RemoteClient for SimulatedRemote {
    async fn save(&self, payload: &SavePayload) -> Result<(), RemoteError> {
        tokio::time::sleep(self.latency).await;
        let roll: f64 = rand::thread_rng().gen();
        if roll < self.failure_rate {
            tracing::debug!(draft_id = %payload.draft_id, "simulated remote failure");
            return Err(RemoteError::Rejected(
                "The server could not store your draft. Please save again.".to_string(),
            ));
        }
        tracing::debug!(draft_id = %payload.draft_id, step = payload.step.key(), "remote save ok");
        Ok(())
    }
}

/// Real backend: POST the payload as JSON to the configured endpoint
pub struct HttpRemote {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRemote {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl RemoteClient for HttpRemote {
    async fn save(&self, payload: &SavePayload) -> Result<(), RemoteError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|err| RemoteError::Transport(err.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(RemoteError::Rejected(format!(
                "server responded with {}",
                response.status()
            )))
        }
    }
}

/// Build the configured client
pub fn from_config(config: &RemoteConfig) -> Arc<dyn RemoteClient> {
    match config.mode {
        RemoteMode::Simulated => Arc::new(SimulatedRemote::new(
            Duration::from_millis(config.latency_ms),
            config.failure_rate,
        )),
        RemoteMode::Http => Arc::new(HttpRemote::new(config.endpoint.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> SavePayload {
        SavePayload {
            draft_id: Uuid::new_v4(),
            step: WizardStep::Account,
            data: FormData::default(),
        }
    }

    #[tokio::test]
    async fn simulated_remote_always_succeeds_at_zero_failure_rate() {
        let remote = SimulatedRemote::new(Duration::from_millis(1), 0.0);
        assert!(remote.save(&payload()).await.is_ok());
    }

    #[tokio::test]
    async fn simulated_remote_always_fails_at_full_failure_rate() {
        let remote = SimulatedRemote::new(Duration::from_millis(1), 1.0);
        let err = remote.save(&payload()).await.unwrap_err();
        assert!(matches!(err, RemoteError::Rejected(_)));
    }

    #[test]
    fn failure_rate_is_clamped() {
        let remote = SimulatedRemote::new(Duration::ZERO, 7.5);
        assert!((remote.failure_rate - 1.0).abs() < f64::EPSILON);
    }
}

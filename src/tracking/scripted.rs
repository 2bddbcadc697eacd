//! In-memory [`TrackingFetcher`] with canned answers, for tests and local runs.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::error::FetchError;
use super::fetcher::TrackingFetcher;
use crate::model::TrackingSnapshot;

/// Answers from a per-container script and records every lookup.
///
/// Containers with no script fail with [`FetchError::Transport`].
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    responses: Mutex<HashMap<String, Result<TrackingSnapshot, FetchError>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, snapshot: TrackingSnapshot) {
        self.lock_responses()
            .insert(snapshot.container_number.clone(), Ok(snapshot));
    }

    pub fn fail(&self, container: &str, message: &str) {
        self.lock_responses().insert(
            container.to_string(),
            Err(FetchError::Transport {
                container: container.to_string(),
                message: message.to_string(),
            }),
        );
    }

    /// Containers looked up so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn lock_responses(
        &self,
    ) -> std::sync::MutexGuard<'_, HashMap<String, Result<TrackingSnapshot, FetchError>>> {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl TrackingFetcher for ScriptedFetcher {
    async fn fetch(&self, container: &str) -> Result<TrackingSnapshot, FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(container.to_string());
        }
        self.lock_responses()
            .get(container)
            .cloned()
            .unwrap_or_else(|| {
                Err(FetchError::Transport {
                    container: container.to_string(),
                    message: "no scripted response".to_string(),
                })
            })
    }
}

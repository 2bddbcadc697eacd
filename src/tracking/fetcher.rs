use async_trait::async_trait;

use super::error::FetchError;
use crate::model::TrackingSnapshot;

/// Looks up the current tracking state of one container.
///
/// One call is one remote request. Implementations do not retry; the caller decides what a
/// failure means.
#[async_trait]
pub trait TrackingFetcher: Send + Sync {
    async fn fetch(&self, container: &str) -> Result<TrackingSnapshot, FetchError>;
}

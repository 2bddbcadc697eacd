//! # StoreClient Trait
//!
//! Shared read/delete operations for domain clients wrapping a [`DocumentClient`].
use crate::{DocumentClient, DocumentEntity, StoreError};
use async_trait::async_trait;

/// Gives a domain client `get`, `scan` and `delete` with its own error type.
///
/// Implementors supply access to the inner [`DocumentClient`] and a mapping from
/// [`StoreError`] into their domain error.
#[async_trait]
pub trait StoreClient<T: DocumentEntity>: Send + Sync {
    /// The domain error type.
    type Error: Send + Sync;

    /// The wrapped generic client.
    fn inner(&self) -> &DocumentClient<T>;

    /// Maps a store failure into the domain error.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetches one document.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetches every document.
    #[tracing::instrument(skip(self))]
    async fn scan(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().scan().await.map_err(Self::map_error)
    }

    /// Removes one document.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}

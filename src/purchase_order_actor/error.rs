//! Error types for the purchase-order document actor and its client.

use document_actor::StoreError;
use thiserror::Error;

/// Errors that can occur during purchase-order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PurchaseOrderError {
    /// No shipment entry carries the container the snapshot belongs to.
    #[error("no shipment entry found for container {0}")]
    ContainerNotFound(String),

    /// The requested purchase order does not exist.
    #[error("purchase order not found: {0}")]
    NotFound(String),

    /// The document payload was rejected.
    #[error("invalid purchase order: {0}")]
    Validation(String),

    /// The document store could not be reached or failed the request.
    #[error("document store error: {0}")]
    Store(String),
}

impl From<StoreError> for PurchaseOrderError {
    fn from(e: StoreError) -> Self {
        if let Some(inner) = e.entity_error::<PurchaseOrderError>() {
            return inner.clone();
        }
        match e {
            StoreError::NotFound(id) => PurchaseOrderError::NotFound(id),
            other => PurchaseOrderError::Store(other.to_string()),
        }
    }
}

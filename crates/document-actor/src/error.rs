//! # Store Errors
//!
//! Failures raised by the document actor itself, as opposed to the domain errors a
//! [`DocumentEntity`](crate::DocumentEntity) returns (those travel boxed in `EntityError`).

/// Errors surfaced by a [`DocumentClient`](crate::DocumentClient).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Document actor closed")]
    ActorClosed,
    #[error("Document actor dropped response channel")]
    ActorDropped,
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Document already exists: {0}")]
    AlreadyExists(String),
    #[error("{0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Recovers the entity's own error type, if that is what this error carries.
    pub fn entity_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            StoreError::EntityError(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}

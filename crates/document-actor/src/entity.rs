//! # DocumentEntity Trait
//!
//! The contract every stored document type (purchase orders today) implements so the generic
//! [`DocumentActor`](crate::DocumentActor) can own it. Associated types pin down the id, the
//! creation and update DTOs, the domain actions and the error type, so a purchase-order actor can
//! only ever receive purchase-order payloads.
//!
//! Hooks with default bodies (`on_create`, `on_delete`) are optional.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// A document managed by a [`DocumentActor`](crate::DocumentActor).
///
/// # Atomic actions
/// `handle_action` receives `&mut self` for the stored document. The actor runs one message at a
/// time, so an action is a complete load/locate/modify/persist cycle keyed by document id and
/// cannot interleave with another write to the same collection.
#[async_trait]
pub trait DocumentEntity: Clone + Send + Sync + 'static {
    /// Document identifier. `Ord` keeps scans deterministic; `From<u32>` feeds id generation.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload for creating a document with a generated id.
    type Create: Send + Sync + Debug;

    /// Payload for a whole-document update.
    type Update: Send + Sync + Debug;

    /// Domain-specific mutations (e.g. applying a tracking snapshot).
    type Action: Send + Sync + Debug;

    /// Result returned by [`DocumentEntity::handle_action`].
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into every hook at `run()` time. Use `()` when there are none.
    type Context: Send + Sync;

    /// Per-document error type, boxed into [`StoreError::EntityError`](crate::StoreError::EntityError)
    /// when it crosses the actor boundary.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds a document from a generated id and its creation payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// The id a document already carries. Used when inserting pre-built documents.
    fn document_id(&self) -> Self::Id;

    /// Called after construction, before the document is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update payload in place.
    async fn on_update(&mut self, update: Self::Update, ctx: &Self::Context)
        -> Result<(), Self::Error>;

    /// Called before the document is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handles a domain action against the stored document.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

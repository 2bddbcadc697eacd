//! # Document Actor
//!
//! An in-memory document store built on the actor model. Each collection lives inside one Tokio
//! task ([`DocumentActor`]) and is reached only through message passing ([`DocumentClient`]).
//!
//! ## Why an actor?
//!
//! Refreshing shipment data means "find the document, locate a nested entry, change it, save it".
//! Done as separate read and write calls, two writers can interleave and lose an update. Sending
//! the whole mutation as a domain [`DocumentEntity::Action`] instead makes it a single step: the
//! actor applies it to the stored document while no other request can run.
//!
//! ## Layers
//!
//! 1. **Entity** ([`DocumentEntity`]): the document type and its domain actions.
//! 2. **Runtime** ([`DocumentActor`]): the message loop and the `BTreeMap` store.
//! 3. **Interface** ([`DocumentClient`], [`StoreClient`]): typed async calls.
//!
//! ```rust
//! use document_actor::{DocumentActor, DocumentEntity};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Counter { id: u32, hits: u32 }
//!
//! #[derive(Debug)] struct Hit;
//! #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
//!
//! #[async_trait]
//! impl DocumentEntity for Counter {
//!     type Id = u32; type Create = (); type Update = u32; type Action = Hit;
//!     type ActionResult = u32; type Context = (); type Error = CounterError;
//!
//!     fn from_create_params(id: u32, _: ()) -> Result<Self, CounterError> { Ok(Self { id, hits: 0 }) }
//!     fn document_id(&self) -> u32 { self.id }
//!     async fn on_update(&mut self, hits: u32, _: &()) -> Result<(), CounterError> {
//!         self.hits = hits;
//!         Ok(())
//!     }
//!     async fn handle_action(&mut self, _: Hit, _: &()) -> Result<u32, CounterError> {
//!         self.hits += 1;
//!         Ok(self.hits)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = DocumentActor::<Counter>::new(8);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(()).await.unwrap();
//!     assert_eq!(client.perform_action(id, Hit).await.unwrap(), 1);
//!     assert_eq!(client.scan().await.unwrap().len(), 1);
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real [`DocumentClient`] from scripted expectations.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::DocumentActor;
pub use client::DocumentClient;
pub use client_trait::StoreClient;
pub use entity::DocumentEntity;
pub use error::StoreError;
pub use message::{DocumentRequest, Response};

//! # Tracking Refresh
//!
//! Keeps the container shipment data inside purchase-order documents in step with an external
//! tracking service.
//!
//! ## Flow
//!
//! 1. **Enumerate** ([`sweep::enumerator`]): every distinct container with an active status inside
//!    an in-progress purchase order.
//! 2. **Fetch** ([`tracking`]): one provider request per container, normalized into a
//!    [`TrackingSnapshot`](model::TrackingSnapshot).
//! 3. **Apply** ([`purchase_order_actor`]): the snapshot is merged into every matching shipment
//!    entry and the derived status/ETA are recomputed, atomically per document.
//! 4. **Summarize** ([`sweep::Sweeper`]): failures are collected per container; one bad container
//!    never stops the sweep.
//!
//! ## Layers
//!
//! - **[model]**: the purchase-order document and the tracking snapshot.
//! - **[purchase_order_actor]**: [`DocumentEntity`](document_actor::DocumentEntity) impl and the
//!   merge/aggregation logic.
//! - **[clients]**: [`PurchaseOrderClient`](clients::PurchaseOrderClient), the only way to reach
//!   the documents.
//! - **[tracking]** and **[sweep]**: the external lookup and the refresh-all orchestration.
//! - **[http]**: the cron trigger and single-container endpoints.
//! - **[lifecycle]** and **[config]**: wiring and environment.
//!
//! ## Testing
//!
//! [`document_actor::mock::MockClient`] stands in for the store and
//! [`tracking::ScriptedFetcher`] for the provider.

pub mod clients;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod purchase_order_actor;
pub mod sweep;
pub mod tracking;

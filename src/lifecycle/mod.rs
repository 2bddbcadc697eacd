//! # System Lifecycle
//!
//! Starting, wiring and stopping the purchase-order actor, the sweeper and the optional
//! in-process schedule. Everything that holds a client must be gone before [`TrackingSystem::shutdown`]
//! can observe the actor exit, so the schedule is stopped first.

pub mod tracking_system;

pub use tracking_system::*;

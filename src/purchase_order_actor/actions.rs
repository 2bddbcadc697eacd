//! Custom actions for the purchase-order actor.
//!
//! These are the mutations that need to locate nested shipment entries. Each runs inside the
//! document actor, so the locate-and-modify step is atomic per document.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::TrackingSnapshot;

/// Domain actions on a [`PurchaseOrder`](crate::model::PurchaseOrder).
#[derive(Debug, Clone)]
pub enum PurchaseOrderAction {
    /// Merges a tracking snapshot into every shipment entry carrying its container number.
    ///
    /// `tracked_at` is recorded as the entries' `last_tracked_at`.
    ApplySnapshot {
        snapshot: TrackingSnapshot,
        tracked_at: DateTime<Utc>,
    },
}

/// What a snapshot merge changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ApplyOutcome {
    pub entries_updated: usize,
    pub events_added: usize,
}

impl std::ops::AddAssign for ApplyOutcome {
    fn add_assign(&mut self, other: Self) {
        self.entries_updated += other.entries_updated;
        self.events_added += other.events_added;
    }
}

/// Results from [`PurchaseOrderAction`]s; variants match 1:1.
#[derive(Debug, Clone)]
pub enum PurchaseOrderActionResult {
    ApplySnapshot(ApplyOutcome),
}

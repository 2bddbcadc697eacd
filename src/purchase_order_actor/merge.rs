//! Snapshot merging and derived shipment aggregates.
//!
//! Everything here is synchronous and operates on a document already owned by the actor.

use chrono::{DateTime, Utc};

use super::actions::ApplyOutcome;
use super::error::PurchaseOrderError;
use crate::model::{PurchaseOrder, ShipmentEntry, ShipmentStatus, TrackingSnapshot};

impl PurchaseOrder {
    /// Applies `snapshot` to every active shipment entry carrying its container number.
    ///
    /// Arrived, delivered and unknown entries are left alone even when the number matches, and an
    /// order that is no longer in progress accepts no snapshot at all.
    /// Status and ETA are overwritten when the snapshot carries them. An `unknown` status or a
    /// missing ETA leaves the stored value in place. Events already on the entry are not added
    /// twice. Applying the same snapshot again changes nothing but `last_tracked_at`.
    pub fn apply_snapshot(
        &mut self,
        snapshot: &TrackingSnapshot,
        tracked_at: DateTime<Utc>,
    ) -> Result<ApplyOutcome, PurchaseOrderError> {
        let container = snapshot.container_number.trim();
        if !self.is_in_progress() {
            return Err(PurchaseOrderError::ContainerNotFound(container.to_string()));
        }

        let mut outcome = ApplyOutcome::default();
        for entry in self
            .customer_pos
            .iter_mut()
            .flat_map(|cpo| cpo.shipments.iter_mut())
            .filter(|entry| entry.active_container() == Some(container))
        {
            outcome.events_added += merge_entry(entry, snapshot, tracked_at);
            outcome.entries_updated += 1;
        }

        if outcome.entries_updated == 0 {
            return Err(PurchaseOrderError::ContainerNotFound(container.to_string()));
        }

        self.refresh_derived();
        Ok(outcome)
    }

    /// Recomputes the per-customer-PO and document-level shipment status and ETA.
    pub fn refresh_derived(&mut self) {
        for cpo in &mut self.customer_pos {
            cpo.shipment_status = aggregate_status(cpo.shipments.iter());
            cpo.shipment_eta = aggregate_eta(cpo.shipments.iter());
        }
        self.shipment_status = aggregate_status(self.shipments());
        self.shipment_eta = aggregate_eta(self.shipments());
    }
}

/// Returns the number of events appended.
fn merge_entry(
    entry: &mut ShipmentEntry,
    snapshot: &TrackingSnapshot,
    tracked_at: DateTime<Utc>,
) -> usize {
    if snapshot.status != ShipmentStatus::Unknown {
        entry.status = snapshot.status;
    }
    if snapshot.eta.is_some() {
        entry.eta = snapshot.eta;
    }
    entry.last_tracked_at = Some(tracked_at);

    let before = entry.tracking_events.len();
    for event in &snapshot.events {
        if !entry.tracking_events.contains(event) {
            entry.tracking_events.push(event.clone());
        }
    }
    let added = entry.tracking_events.len() - before;
    if added > 0 {
        entry.tracking_events.sort_by_key(|event| event.timestamp);
    }
    added
}

/// The least-progressed status wins. `unknown` only shows through when nothing else is known.
fn aggregate_status<'a>(
    shipments: impl Iterator<Item = &'a ShipmentEntry>,
) -> Option<ShipmentStatus> {
    let mut saw_unknown = false;
    let mut slowest: Option<ShipmentStatus> = None;
    for entry in shipments {
        match entry.status.progress() {
            None => saw_unknown = true,
            Some(progress) => {
                if slowest.and_then(ShipmentStatus::progress).map_or(true, |p| progress < p) {
                    slowest = Some(entry.status);
                }
            }
        }
    }
    slowest.or(saw_unknown.then_some(ShipmentStatus::Unknown))
}

/// Latest ETA among shipments that have not been delivered yet.
fn aggregate_eta<'a>(
    shipments: impl Iterator<Item = &'a ShipmentEntry>,
) -> Option<DateTime<Utc>> {
    shipments
        .filter(|entry| entry.status != ShipmentStatus::Delivered)
        .filter_map(|entry| entry.eta)
        .max()
}

//! Purchase-order documents and the shipment entries nested inside them.
//!
//! # Document shape
//! A [`PurchaseOrder`] owns [`CustomerPo`]s, each owning [`ShipmentEntry`]s. A shipment has no
//! identifier of its own: it is addressed by the document id plus its position, or (for tracking)
//! by its container number.
//!
//! # Document Actor
//! [`PurchaseOrder`] implements [`DocumentEntity`](document_actor::DocumentEntity); see
//! [`crate::purchase_order_actor`] for the actions it accepts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::TrackingEvent;

/// Identifier of a purchase-order document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseOrderId(pub String);

impl From<u32> for PurchaseOrderId {
    fn from(id: u32) -> Self {
        Self(format!("po_{id}"))
    }
}

impl From<&str> for PurchaseOrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for PurchaseOrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of the purchase order as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Draft,
    #[default]
    InProgress,
    Completed,
    Cancelled,
}

/// Carrier status of one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    #[default]
    Planned,
    BookingConfirmed,
    InTransit,
    OnWater,
    Arrived,
    Delivered,
    #[serde(other)]
    Unknown,
}

impl ShipmentStatus {
    /// Statuses whose containers are still moving and get refreshed by a sweep.
    pub const ACTIVE: [ShipmentStatus; 4] = [
        ShipmentStatus::Planned,
        ShipmentStatus::BookingConfirmed,
        ShipmentStatus::InTransit,
        ShipmentStatus::OnWater,
    ];

    pub fn is_active(self) -> bool {
        Self::ACTIVE.contains(&self)
    }

    /// Position along the shipping lifecycle; `None` for [`ShipmentStatus::Unknown`].
    pub fn progress(self) -> Option<u8> {
        match self {
            ShipmentStatus::Planned => Some(0),
            ShipmentStatus::BookingConfirmed => Some(1),
            ShipmentStatus::InTransit => Some(2),
            ShipmentStatus::OnWater => Some(3),
            ShipmentStatus::Arrived => Some(4),
            ShipmentStatus::Delivered => Some(5),
            ShipmentStatus::Unknown => None,
        }
    }
}

impl Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ShipmentStatus::Planned => "planned",
            ShipmentStatus::BookingConfirmed => "booking_confirmed",
            ShipmentStatus::InTransit => "in_transit",
            ShipmentStatus::OnWater => "on_water",
            ShipmentStatus::Arrived => "arrived",
            ShipmentStatus::Delivered => "delivered",
            ShipmentStatus::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// One tracked container inside a customer PO.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShipmentEntry {
    #[serde(default)]
    pub container_number: String,
    #[serde(default)]
    pub status: ShipmentStatus,
    #[serde(default)]
    pub eta: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_tracked_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tracking_events: Vec<TrackingEvent>,
}

impl ShipmentEntry {
    pub fn new(container_number: impl Into<String>, status: ShipmentStatus) -> Self {
        Self {
            container_number: container_number.into(),
            status,
            ..Self::default()
        }
    }

    /// The container number with surrounding whitespace removed, or `None` when blank.
    pub fn tracked_container(&self) -> Option<&str> {
        let trimmed = self.container_number.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// The tracked container, but only while the shipment is still in an active status.
    ///
    /// Sweeps pick containers by this, and snapshots only land on entries it returns.
    pub fn active_container(&self) -> Option<&str> {
        self.tracked_container().filter(|_| self.status.is_active())
    }
}

/// A customer's purchase order within the document, grouping its shipments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomerPo {
    pub number: String,
    #[serde(default)]
    pub shipments: Vec<ShipmentEntry>,
    #[serde(default)]
    pub shipment_status: Option<ShipmentStatus>,
    #[serde(default)]
    pub shipment_eta: Option<DateTime<Utc>>,
}

impl CustomerPo {
    pub fn new(number: impl Into<String>, shipments: Vec<ShipmentEntry>) -> Self {
        Self {
            number: number.into(),
            shipments,
            ..Self::default()
        }
    }
}

/// The stored purchase-order document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: PurchaseOrderId,
    #[serde(default)]
    pub po_number: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub customer_pos: Vec<CustomerPo>,
    #[serde(default)]
    pub shipment_status: Option<ShipmentStatus>,
    #[serde(default)]
    pub shipment_eta: Option<DateTime<Utc>>,
}

impl PurchaseOrder {
    /// Creates an in-progress purchase order.
    pub fn new(
        id: impl Into<PurchaseOrderId>,
        po_number: impl Into<String>,
        customer_pos: Vec<CustomerPo>,
    ) -> Self {
        Self {
            id: id.into(),
            po_number: po_number.into(),
            status: OrderStatus::InProgress,
            customer_pos,
            shipment_status: None,
            shipment_eta: None,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == OrderStatus::InProgress
    }

    /// Every shipment entry in the document, flattened across customer POs.
    pub fn shipments(&self) -> impl Iterator<Item = &ShipmentEntry> {
        self.customer_pos.iter().flat_map(|cpo| cpo.shipments.iter())
    }

    /// Whether any active shipment entry carries `container`.
    pub fn tracks(&self, container: &str) -> bool {
        self.shipments()
            .any(|entry| entry.active_container() == Some(container))
    }
}

/// Creation payload for a purchase order with a generated id.
#[derive(Debug, Clone)]
pub struct PurchaseOrderCreate {
    pub po_number: String,
    pub customer_pos: Vec<CustomerPo>,
}

/// Whole-document update payload. `None` fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PurchaseOrderUpdate {
    pub status: Option<OrderStatus>,
    pub customer_pos: Option<Vec<CustomerPo>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_statuses() {
        assert!(ShipmentStatus::InTransit.is_active());
        assert!(ShipmentStatus::BookingConfirmed.is_active());
        assert!(!ShipmentStatus::Arrived.is_active());
        assert!(!ShipmentStatus::Delivered.is_active());
        assert!(!ShipmentStatus::Unknown.is_active());
    }

    #[test]
    fn test_unrecognized_status_deserializes_as_unknown() {
        let entry: ShipmentEntry =
            serde_json::from_str(r#"{"container_number":"ABCU1","status":"lost_at_sea"}"#).unwrap();
        assert_eq!(entry.status, ShipmentStatus::Unknown);
        assert!(entry.tracking_events.is_empty());
    }

    #[test]
    fn test_blank_container_is_not_tracked() {
        assert_eq!(ShipmentEntry::new("  ", ShipmentStatus::InTransit).tracked_container(), None);
        assert_eq!(
            ShipmentEntry::new(" ABCU1 ", ShipmentStatus::InTransit).tracked_container(),
            Some("ABCU1")
        );
    }

    #[test]
    fn test_finished_shipment_is_not_actively_tracked() {
        assert_eq!(ShipmentEntry::new("ABCU1", ShipmentStatus::Delivered).active_container(), None);
        assert_eq!(ShipmentEntry::new("ABCU1", ShipmentStatus::Unknown).active_container(), None);
        assert_eq!(
            ShipmentEntry::new(" ABCU1", ShipmentStatus::OnWater).active_container(),
            Some("ABCU1")
        );

        let order = PurchaseOrder::new(
            "po-1",
            "1",
            vec![CustomerPo::new("C-1", vec![ShipmentEntry::new("ABCU1", ShipmentStatus::Arrived)])],
        );
        assert!(!order.tracks("ABCU1"));
    }

    #[test]
    fn test_document_deserializes_from_seed_format() {
        let raw = r#"{
            "id": "po-1001",
            "po_number": "1001",
            "status": "in_progress",
            "customer_pos": [
                { "number": "C-1", "shipments": [ { "container_number": "ABCU1", "status": "on_water" } ] }
            ]
        }"#;
        let order: PurchaseOrder = serde_json::from_str(raw).unwrap();
        assert_eq!(order.id, PurchaseOrderId::from("po-1001"));
        assert!(order.tracks("ABCU1"));
        assert!(!order.tracks("XYZW2"));
    }
}

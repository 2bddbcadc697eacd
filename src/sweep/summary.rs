use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{ShipmentStatus, TrackingSnapshot};
use crate::purchase_order_actor::ApplyOutcome;

/// Result of one sweep. `total == success + failed`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SweepSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    /// `"{container}: {message}"` per failed container, in sweep order.
    pub errors: Vec<String>,
}

impl SweepSummary {
    pub(crate) fn record_success(&mut self) {
        self.total += 1;
        self.success += 1;
    }

    pub(crate) fn record_failure(&mut self, container: &str, message: impl std::fmt::Display) {
        self.total += 1;
        self.failed += 1;
        self.errors.push(format!("{container}: {message}"));
    }
}

/// What one successful container refresh stored.
///
/// `status` and `eta` are `None` when the provider had nothing usable and the entries kept
/// their previous values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerRefresh {
    pub container: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ShipmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta: Option<DateTime<Utc>>,
    pub outcome: ApplyOutcome,
}

impl ContainerRefresh {
    pub(crate) fn stored(container: &str, snapshot: &TrackingSnapshot, outcome: ApplyOutcome) -> Self {
        Self {
            container: container.to_string(),
            status: (snapshot.status != ShipmentStatus::Unknown).then_some(snapshot.status),
            eta: snapshot.eta,
            outcome,
        }
    }
}

//! Tracking data as returned by the external tracking service, after normalization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ShipmentStatus;

/// One historical event reported for a container (gate in, loaded, discharged, ...).
///
/// Two events are the same event when timestamp, description and location all match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub timestamp: DateTime<Utc>,
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
}

impl TrackingEvent {
    pub fn new(
        timestamp: DateTime<Utc>,
        description: impl Into<String>,
        location: Option<&str>,
    ) -> Self {
        Self {
            timestamp,
            description: description.into(),
            location: location.map(str::to_string),
        }
    }
}

/// Normalized tracking result for one container at one point in time.
///
/// Never stored as its own document; it is applied onto the matching shipment entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingSnapshot {
    pub container_number: String,
    pub status: ShipmentStatus,
    pub eta: Option<DateTime<Utc>>,
    pub events: Vec<TrackingEvent>,
}

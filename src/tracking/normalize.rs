//! Provider payload to [`TrackingSnapshot`] conversion.
//!
//! The provider is loose about formats: statuses come in any case with spaces, dashes or
//! underscores, dates may or may not carry a time, and event fields have two spellings.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::model::{ShipmentStatus, TrackingEvent, TrackingSnapshot};

/// Body of `GET /containers/{container}` as the provider sends it.
#[derive(Debug, Default, Deserialize)]
pub struct ProviderPayload {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub eta: Option<String>,
    #[serde(default)]
    pub events: Vec<ProviderEvent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProviderEvent {
    #[serde(default, alias = "date")]
    pub timestamp: Option<String>,
    #[serde(default, alias = "event")]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

pub fn normalize(container: &str, payload: ProviderPayload) -> TrackingSnapshot {
    let status = payload
        .status
        .as_deref()
        .map(parse_status)
        .unwrap_or(ShipmentStatus::Unknown);

    let eta = payload.eta.as_deref().and_then(|raw| {
        let parsed = parse_timestamp(raw);
        if parsed.is_none() {
            warn!(container, eta = raw, "Ignoring unparsable ETA");
        }
        parsed
    });

    let mut events: Vec<TrackingEvent> = payload
        .events
        .into_iter()
        .filter_map(|event| to_event(container, event))
        .collect();
    events.sort_by_key(|event| event.timestamp);

    TrackingSnapshot {
        container_number: container.to_string(),
        status,
        eta,
        events,
    }
}

fn to_event(container: &str, event: ProviderEvent) -> Option<TrackingEvent> {
    let raw = event.timestamp.as_deref().unwrap_or_default();
    let Some(timestamp) = parse_timestamp(raw) else {
        warn!(container, timestamp = raw, "Skipping event with unparsable timestamp");
        return None;
    };
    let location = event
        .location
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());
    Some(TrackingEvent {
        timestamp,
        description: event.description.unwrap_or_default().trim().to_string(),
        location,
    })
}

/// Maps a provider status label onto [`ShipmentStatus`], ignoring case and separators.
pub fn parse_status(raw: &str) -> ShipmentStatus {
    let key = raw
        .to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    match key.as_str() {
        "planned" | "pending" => ShipmentStatus::Planned,
        "booking_confirmed" | "booked" | "confirmed" => ShipmentStatus::BookingConfirmed,
        "in_transit" | "intransit" => ShipmentStatus::InTransit,
        "on_water" | "sailing" | "on_vessel" => ShipmentStatus::OnWater,
        "arrived" | "discharged" => ShipmentStatus::Arrived,
        "delivered" | "gate_out" | "empty_returned" => ShipmentStatus::Delivered,
        _ => ShipmentStatus::Unknown,
    }
}

/// RFC 3339, or a bare `YYYY-MM-DD` taken as midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_spellings() {
        for raw in ["IN_TRANSIT", "In Transit", "in-transit", " in transit "] {
            assert_eq!(parse_status(raw), ShipmentStatus::InTransit, "{raw}");
        }
        assert_eq!(parse_status("Sailing"), ShipmentStatus::OnWater);
        assert_eq!(parse_status("ON VESSEL"), ShipmentStatus::OnWater);
        assert_eq!(parse_status("booked"), ShipmentStatus::BookingConfirmed);
        assert_eq!(parse_status("Discharged"), ShipmentStatus::Arrived);
        assert_eq!(parse_status("Gate Out"), ShipmentStatus::Delivered);
        assert_eq!(parse_status("empty-returned"), ShipmentStatus::Delivered);
        assert_eq!(parse_status("held by customs"), ShipmentStatus::Unknown);
    }

    #[test]
    fn test_timestamp_formats() {
        assert_eq!(
            parse_timestamp("2026-03-20T08:30:00+02:00"),
            Some(Utc.with_ymd_and_hms(2026, 3, 20, 6, 30, 0).unwrap())
        );
        assert_eq!(
            parse_timestamp("2026-03-20"),
            Some(Utc.with_ymd_and_hms(2026, 3, 20, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("next tuesday"), None);
    }

    #[test]
    fn test_normalize_payload() {
        let payload: ProviderPayload = serde_json::from_str(
            r#"{
                "status": "Sailing",
                "eta": "2026-04-02",
                "events": [
                    { "date": "2026-03-12T10:00:00Z", "event": "Vessel departure", "location": "Ningbo" },
                    { "timestamp": "garbage", "description": "Broken" },
                    { "timestamp": "2026-03-10T09:00:00Z", "description": "Loaded", "location": " " }
                ]
            }"#,
        )
        .unwrap();

        let snapshot = normalize("ABCU1", payload);

        assert_eq!(snapshot.container_number, "ABCU1");
        assert_eq!(snapshot.status, ShipmentStatus::OnWater);
        assert_eq!(snapshot.eta, Some(Utc.with_ymd_and_hms(2026, 4, 2, 0, 0, 0).unwrap()));
        let descriptions: Vec<_> = snapshot.events.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Loaded", "Vessel departure"]);
        assert_eq!(snapshot.events[0].location, None);
        assert_eq!(snapshot.events[1].location.as_deref(), Some("Ningbo"));
    }

    #[test]
    fn test_empty_payload() {
        let snapshot = normalize("ABCU1", ProviderPayload::default());
        assert_eq!(snapshot.status, ShipmentStatus::Unknown);
        assert!(snapshot.eta.is_none());
        assert!(snapshot.events.is_empty());
    }
}

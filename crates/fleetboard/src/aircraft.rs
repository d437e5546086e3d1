//! Core aircraft types for fleetboard.
//!
//! This module defines the records tracked by the dashboard and the default
//! fleet used to seed an empty local store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Operational status of an aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AircraftStatus {
    /// Ready for dispatch.
    Available,
    /// Undergoing scheduled maintenance.
    Maintenance,
    /// Aircraft on ground, grounded pending repair.
    Aog,
}

impl AircraftStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 3] = [Self::Available, Self::Maintenance, Self::Aog];

    /// Wire name of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Maintenance => "maintenance",
            Self::Aog => "aog",
        }
    }

    /// Whether an aircraft with this status counts as ready.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl fmt::Display for AircraftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AircraftStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "maintenance" => Ok(Self::Maintenance),
            "aog" => Ok(Self::Aog),
            other => Err(Error::InvalidStatus {
                value: other.to_string(),
            }),
        }
    }
}

/// Identifier assigned by the backing store.
///
/// Backends disagree on whether ids are numbers or strings, so both are
/// accepted and written back in the form they arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AircraftId {
    /// Numeric id, e.g. `1`.
    Numeric(u64),
    /// String id, e.g. `"a1f3"`.
    Text(String),
}

impl fmt::Display for AircraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for AircraftId {
    fn from(n: u64) -> Self {
        Self::Numeric(n)
    }
}

impl From<&str> for AircraftId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

/// One tracked aircraft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AircraftRecord {
    /// Stable identifier, never changes after creation.
    pub id: AircraftId,

    /// Registration painted on the airframe. Unique within a fleet.
    pub tail_number: String,

    /// Free-text aircraft type.
    pub model: String,

    /// Current operational status.
    pub status: AircraftStatus,

    /// Last known position.
    pub location: Location,
}

impl AircraftRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(
        id: impl Into<AircraftId>,
        tail_number: impl Into<String>,
        model: impl Into<String>,
        status: AircraftStatus,
        location: Location,
    ) -> Self {
        Self {
            id: id.into(),
            tail_number: tail_number.into(),
            model: model.into(),
            status,
            location,
        }
    }

    /// Whether this aircraft is ready for dispatch.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status.is_ready()
    }
}

/// The five-aircraft fleet written to an empty local store.
#[must_use]
pub fn default_fleet() -> Vec<AircraftRecord> {
    use AircraftStatus::{Aog, Available, Maintenance};

    let at = |lat, lng| Location { lat, lng };
    vec![
        AircraftRecord::new(1_u64, "TN1", "Boeing 747", Available, at(34.0, -118.0)),
        AircraftRecord::new(2_u64, "TN2", "Airbus A320", Maintenance, at(41.0, -74.0)),
        AircraftRecord::new(3_u64, "TN3", "Boeing 777", Aog, at(42.0, -88.0)),
        AircraftRecord::new(4_u64, "TN4", "Boeing 737 MAX", Available, at(30.0, -95.0)),
        AircraftRecord::new(5_u64, "TN5", "Airbus A380", Maintenance, at(26.0, -80.0)),
    ]
}

/// Tail numbers that appear more than once, in first-seen order.
#[must_use]
pub fn duplicate_tail_numbers(fleet: &[AircraftRecord]) -> Vec<&str> {
    let mut seen = std::collections::HashSet::new();
    let mut dupes = Vec::new();
    for record in fleet {
        let tail = record.tail_number.as_str();
        if !seen.insert(tail) && !dupes.contains(&tail) {
            dupes.push(tail);
        }
    }
    dupes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(AircraftStatus::Available.to_string(), "available");
        assert_eq!(AircraftStatus::Maintenance.to_string(), "maintenance");
        assert_eq!(AircraftStatus::Aog.to_string(), "aog");
    }

    #[test]
    fn test_status_from_str_is_case_insensitive() {
        assert_eq!("AOG".parse::<AircraftStatus>().unwrap(), AircraftStatus::Aog);
        assert_eq!(
            " Maintenance ".parse::<AircraftStatus>().unwrap(),
            AircraftStatus::Maintenance
        );
    }

    #[test]
    fn test_status_from_str_rejects_unknown() {
        let err = "grounded".parse::<AircraftStatus>().unwrap_err();
        assert!(err.to_string().contains("grounded"));
    }

    #[test]
    fn test_status_is_ready() {
        assert!(AircraftStatus::Available.is_ready());
        assert!(!AircraftStatus::Maintenance.is_ready());
        assert!(!AircraftStatus::Aog.is_ready());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = &default_fleet()[0];
        let json = serde_json::to_value(record).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["tailNumber"], "TN1");
        assert_eq!(json["status"], "available");
        assert_eq!(json["location"]["lng"], -118.0);
    }

    #[test]
    fn test_record_accepts_string_id() {
        let json = r#"{
            "id": "a1f3",
            "tailNumber": "N123AB",
            "model": "Embraer E175",
            "status": "aog",
            "location": { "lat": 47.45, "lng": -122.31 }
        }"#;
        let record: AircraftRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, AircraftId::Text("a1f3".to_string()));
        assert_eq!(record.status, AircraftStatus::Aog);
        assert_eq!(serde_json::to_value(&record).unwrap()["id"], "a1f3");
    }

    #[test]
    fn test_record_rejects_unknown_status() {
        let json = r#"{
            "id": 9,
            "tailNumber": "TN9",
            "model": "Cessna 172",
            "status": "retired",
            "location": { "lat": 0.0, "lng": 0.0 }
        }"#;
        assert!(serde_json::from_str::<AircraftRecord>(json).is_err());
    }

    #[test]
    fn test_default_fleet_layout() {
        let fleet = default_fleet();
        assert_eq!(fleet.len(), 5);

        let ready: Vec<_> = fleet
            .iter()
            .filter(|r| r.is_ready())
            .map(|r| r.tail_number.as_str())
            .collect();
        assert_eq!(ready, vec!["TN1", "TN4"]);
        assert!(duplicate_tail_numbers(&fleet).is_empty());
    }

    #[test]
    fn test_duplicate_tail_numbers() {
        let mut fleet = default_fleet();
        fleet.push(fleet[1].clone());
        fleet.push(fleet[1].clone());

        assert_eq!(duplicate_tail_numbers(&fleet), vec!["TN2"]);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(AircraftId::from(42_u64).to_string(), "42");
        assert_eq!(AircraftId::from("abc").to_string(), "abc");
    }
}

//! Map marker projection.
//!
//! The dashboard hands the full fleet to an external mapping widget. This
//! module turns records into the marker data that widget needs; it never
//! feeds anything back into the store.

use serde::Serialize;

use crate::aircraft::{AircraftRecord, AircraftStatus};

/// Initial map viewport, centered over the continental US.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    /// `[lat, lng]` of the viewport center.
    pub center: [f64; 2],
    /// Tile zoom level.
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: [37.5, -96.5],
            zoom: 4,
        }
    }
}

/// One marker per aircraft.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    /// Tail number, also the marker key.
    pub tail_number: String,
    /// Aircraft type.
    pub model: String,
    /// Current status.
    pub status: AircraftStatus,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

impl MapMarker {
    /// Popup text: tail number, model, and status on separate lines.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}\n{}\nStatus: {}", self.tail_number, self.model, self.status)
    }
}

impl From<&AircraftRecord> for MapMarker {
    fn from(record: &AircraftRecord) -> Self {
        Self {
            tail_number: record.tail_number.clone(),
            model: record.model.clone(),
            status: record.status,
            lat: record.location.lat,
            lng: record.location.lng,
        }
    }
}

/// Markers for every record, in fleet order.
#[must_use]
pub fn markers(fleet: &[AircraftRecord]) -> Vec<MapMarker> {
    fleet.iter().map(MapMarker::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::default_fleet;

    #[test]
    fn test_one_marker_per_record() {
        let fleet = default_fleet();
        let markers = markers(&fleet);

        assert_eq!(markers.len(), fleet.len());
        assert_eq!(markers[2].tail_number, "TN3");
        assert!((markers[2].lat - 42.0).abs() < f64::EPSILON);
        assert!((markers[2].lng + 88.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_label() {
        let marker = MapMarker::from(&default_fleet()[2]);
        assert_eq!(marker.label(), "TN3\nBoeing 777\nStatus: aog");
    }

    #[test]
    fn test_default_view() {
        let view = MapView::default();
        assert_eq!(view.zoom, 4);
        assert_eq!(view.center, [37.5, -96.5]);
    }

    #[test]
    fn test_marker_json() {
        let json = serde_json::to_value(MapMarker::from(&default_fleet()[0])).unwrap();
        assert_eq!(json["tailNumber"], "TN1");
        assert_eq!(json["status"], "available");
    }
}

use serde::{Deserialize, Serialize};

use crate::gtfs_realtime::VehiclePosition;

/// Shown when the vehicle descriptor carries no id
pub const UNKNOWN_VEHICLE_ID: &str = "No ID available";
/// Shown when the trip descriptor or its route id is missing
pub const UNKNOWN_ROUTE: &str = "Unknown Route";
/// Shown when the trip descriptor or its trip id is missing
pub const UNKNOWN_TRIP: &str = "Unknown Trip";
/// Shown when the vehicle descriptor carries no label
pub const UNKNOWN_VEHICLE_LABEL: &str = "Unknown Vehicle";

/// Latest known state of one vehicle, flattened for the map.
///
/// Rebuilt from scratch on every fetch; nothing is carried over between feeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Vehicle identifier
    pub id: String,

    /// Route ID from GTFS
    pub route_id: String,

    /// Trip ID from GTFS
    pub trip_id: String,

    /// Direction ID (0 or 1), serialized as null when absent
    pub direction_id: Option<u32>,

    /// Latitude, degrees North
    pub lat: f32,

    /// Longitude, degrees East
    pub lng: f32,

    /// Speed in meters per second
    pub speed: f32,

    /// Bearing/heading in degrees
    pub bearing: f32,

    /// Passenger-facing vehicle label
    pub vehicle_label: String,

    /// Unix timestamp of the position measurement
    pub timestamp: i64,
}

impl VehicleRecord {
    /// Build a record from a decoded vehicle position.
    ///
    /// Returns `None` when the position is missing a usable coordinate pair.
    /// Every other field falls back to its sentinel.
    pub fn from_vehicle_position(vehicle: &VehiclePosition) -> Option<Self> {
        let (lat, lng) = coordinates(vehicle)?;

        Some(Self {
            id: vehicle_id(vehicle),
            route_id: route_id(vehicle),
            trip_id: trip_id(vehicle),
            direction_id: direction_id(vehicle),
            lat,
            lng,
            speed: speed(vehicle),
            bearing: bearing(vehicle),
            vehicle_label: vehicle_label(vehicle),
            timestamp: timestamp(vehicle),
        })
    }

    /// Speed converted to km/h, rounded, as shown in the map popup
    pub fn speed_kmh(&self) -> i64 {
        (self.speed * 3.6).round() as i64
    }
}

impl std::fmt::Display for VehicleRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Vehicle {} ({}) on Route {} at ({:.6}, {:.6}) {} km/h [{}]",
            self.vehicle_label,
            self.id,
            self.route_id,
            self.lat,
            self.lng,
            self.speed_kmh(),
            chrono::DateTime::<chrono::Utc>::from_timestamp(self.timestamp, 0)
                .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "invalid timestamp".to_string())
        )
    }
}

// Field extraction. Each function is total: absence yields the default,
// never an error.

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|s| !s.is_empty()).cloned()
}

pub fn vehicle_id(vehicle: &VehiclePosition) -> String {
    non_empty(vehicle.vehicle.as_ref().and_then(|v| v.id.as_ref()))
        .unwrap_or_else(|| UNKNOWN_VEHICLE_ID.to_string())
}

pub fn route_id(vehicle: &VehiclePosition) -> String {
    non_empty(vehicle.trip.as_ref().and_then(|t| t.route_id.as_ref()))
        .unwrap_or_else(|| UNKNOWN_ROUTE.to_string())
}

pub fn trip_id(vehicle: &VehiclePosition) -> String {
    non_empty(vehicle.trip.as_ref().and_then(|t| t.trip_id.as_ref()))
        .unwrap_or_else(|| UNKNOWN_TRIP.to_string())
}

pub fn direction_id(vehicle: &VehiclePosition) -> Option<u32> {
    vehicle.trip.as_ref().and_then(|t| t.direction_id)
}

/// Latitude and longitude, only when both are present and finite
pub fn coordinates(vehicle: &VehiclePosition) -> Option<(f32, f32)> {
    let position = vehicle.position.as_ref()?;
    let lat = position.latitude.filter(|v| v.is_finite())?;
    let lng = position.longitude.filter(|v| v.is_finite())?;
    Some((lat, lng))
}

pub fn speed(vehicle: &VehiclePosition) -> f32 {
    vehicle
        .position
        .as_ref()
        .and_then(|p| p.speed)
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

pub fn bearing(vehicle: &VehiclePosition) -> f32 {
    vehicle
        .position
        .as_ref()
        .and_then(|p| p.bearing)
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

pub fn vehicle_label(vehicle: &VehiclePosition) -> String {
    non_empty(vehicle.vehicle.as_ref().and_then(|v| v.label.as_ref()))
        .unwrap_or_else(|| UNKNOWN_VEHICLE_LABEL.to_string())
}

pub fn timestamp(vehicle: &VehiclePosition) -> i64 {
    vehicle
        .timestamp
        .and_then(|t| i64::try_from(t).ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gtfs_realtime::{Position, TripDescriptor, VehicleDescriptor};

    fn positioned(lat: Option<f32>, lng: Option<f32>) -> VehiclePosition {
        VehiclePosition {
            position: Some(Position {
                latitude: lat,
                longitude: lng,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn missing_trip_uses_sentinels() {
        let record = VehicleRecord::from_vehicle_position(&positioned(Some(59.33), Some(18.07)))
            .expect("position is complete");

        assert_eq!(record.route_id, UNKNOWN_ROUTE);
        assert_eq!(record.trip_id, UNKNOWN_TRIP);
        assert_eq!(record.direction_id, None);
        assert_eq!(record.id, UNKNOWN_VEHICLE_ID);
        assert_eq!(record.vehicle_label, UNKNOWN_VEHICLE_LABEL);
        assert_eq!(record.speed, 0.0);
        assert_eq!(record.bearing, 0.0);
        assert_eq!(record.timestamp, 0);
    }

    #[test]
    fn trip_without_ids_uses_sentinels() {
        let mut vehicle = positioned(Some(1.0), Some(2.0));
        vehicle.trip = Some(TripDescriptor {
            route_id: Some(String::new()),
            direction_id: Some(1),
            ..Default::default()
        });

        assert_eq!(route_id(&vehicle), UNKNOWN_ROUTE);
        assert_eq!(trip_id(&vehicle), UNKNOWN_TRIP);
        assert_eq!(direction_id(&vehicle), Some(1));
    }

    #[test]
    fn incomplete_coordinates_are_rejected() {
        assert!(VehicleRecord::from_vehicle_position(&VehiclePosition::default()).is_none());
        assert!(VehicleRecord::from_vehicle_position(&positioned(None, None)).is_none());
        assert!(VehicleRecord::from_vehicle_position(&positioned(Some(59.0), None)).is_none());
        assert!(VehicleRecord::from_vehicle_position(&positioned(None, Some(18.0))).is_none());
        assert!(VehicleRecord::from_vehicle_position(&positioned(Some(f32::NAN), Some(18.0))).is_none());
    }

    #[test]
    fn non_finite_motion_defaults_to_zero() {
        let mut vehicle = positioned(Some(1.0), Some(2.0));
        if let Some(position) = vehicle.position.as_mut() {
            position.speed = Some(f32::INFINITY);
            position.bearing = Some(f32::NAN);
        }

        assert_eq!(speed(&vehicle), 0.0);
        assert_eq!(bearing(&vehicle), 0.0);
    }

    #[test]
    fn descriptor_fields_are_copied() {
        let mut vehicle = positioned(Some(1.0), Some(2.0));
        vehicle.vehicle = Some(VehicleDescriptor {
            id: Some("9031001004505452".to_string()),
            label: Some("Buss 4".to_string()),
            ..Default::default()
        });
        vehicle.timestamp = Some(1_700_000_000);

        let record = VehicleRecord::from_vehicle_position(&vehicle).expect("position is complete");
        assert_eq!(record.id, "9031001004505452");
        assert_eq!(record.vehicle_label, "Buss 4");
        assert_eq!(record.timestamp, 1_700_000_000);
    }

    #[test]
    fn oversized_timestamp_defaults_to_zero() {
        let vehicle = VehiclePosition {
            timestamp: Some(u64::MAX),
            ..Default::default()
        };
        assert_eq!(timestamp(&vehicle), 0);
    }

    #[test]
    fn serializes_null_direction() {
        let record = VehicleRecord::from_vehicle_position(&positioned(Some(59.33), Some(18.07)))
            .expect("position is complete");
        let json = serde_json::to_value(&record).expect("record serializes");

        assert!(json["direction_id"].is_null());
        assert_eq!(json["route_id"], UNKNOWN_ROUTE);
        assert!(json.get("lat").is_some_and(|v| v.is_number()));
        assert!(json.get("lng").is_some_and(|v| v.is_number()));
    }

    #[test]
    fn speed_is_shown_in_kmh() {
        let mut vehicle = positioned(Some(1.0), Some(2.0));
        if let Some(position) = vehicle.position.as_mut() {
            position.speed = Some(10.0);
        }
        let record = VehicleRecord::from_vehicle_position(&vehicle).expect("position is complete");
        assert_eq!(record.speed_kmh(), 36);
    }
}

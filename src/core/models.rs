use chrono::Utc;
use serde::{Deserialize, Serialize};

/// The three states a spot can be in. The server owns transitions;
/// the client only ever requests them and re-fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotStatus {
    Free,
    Reserved,
    Occupied,
}

impl SpotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Reserved => "reserved",
            Self::Occupied => "occupied",
        }
    }
}

/// A parking spot as reported by the backend.
///
/// `reserved_until` is only meaningful while the status is `Reserved`;
/// the server clears it on occupy/free.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSpot {
    #[serde(rename = "_id")]
    pub id: String,
    pub number: u32,
    pub status: SpotStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_by: Option<String>,
    /// Absolute expiry, epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_until: Option<i64>,
}

impl ParkingSpot {
    pub fn is_free(&self) -> bool {
        self.status == SpotStatus::Free
    }

    /// Milliseconds until the reservation expires, if one is active.
    pub fn remaining_ms(&self, now_ms: i64) -> Option<i64> {
        match self.status {
            SpotStatus::Reserved => self.reserved_until.map(|until| until - now_ms),
            _ => None,
        }
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_spot_from_wire_shape() {
        let json = r#"{
            "_id": "665f1a2b3c4d5e6f70819203",
            "number": 12,
            "status": "reserved",
            "reservedBy": "Alice",
            "reservedUntil": 1735689600000
        }"#;

        let spot: ParkingSpot = serde_json::from_str(json).unwrap();
        assert_eq!(spot.id, "665f1a2b3c4d5e6f70819203");
        assert_eq!(spot.number, 12);
        assert_eq!(spot.status, SpotStatus::Reserved);
        assert_eq!(spot.reserved_by.as_deref(), Some("Alice"));
        assert_eq!(spot.reserved_until, Some(1735689600000));
    }

    #[test]
    fn deserialize_free_spot_without_reservation_fields() {
        let json = r#"{"_id": "a1", "number": 3, "status": "free"}"#;
        let spot: ParkingSpot = serde_json::from_str(json).unwrap();

        assert!(spot.is_free());
        assert!(spot.reserved_by.is_none());
        assert!(spot.reserved_until.is_none());
    }

    #[test]
    fn remaining_ms_only_while_reserved() {
        let mut spot = ParkingSpot {
            id: "a1".into(),
            number: 1,
            status: SpotStatus::Reserved,
            reserved_by: Some("Bob".into()),
            reserved_until: Some(10_000),
        };

        assert_eq!(spot.remaining_ms(4_000), Some(6_000));

        spot.status = SpotStatus::Occupied;
        assert_eq!(spot.remaining_ms(4_000), None);
    }
}

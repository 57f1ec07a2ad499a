//! In-process parking backend for demo mode and tests.
//!
//! Plays the server's role: it owns the spot table and enforces the
//! transition rules the real backend enforces, so the client code
//! exercises the same accept/reject paths without a network.

use std::sync::{Arc, Mutex};

use uuid::Uuid;

use super::{BackendError, ParkingBackend, normalize_name};
use crate::core::models::{ParkingSpot, SpotStatus, now_ms};

pub struct SimulatedBackend {
    spots: Arc<Mutex<Vec<ParkingSpot>>>,
}

impl SimulatedBackend {
    /// Seed `count` free spots, numbered from 1.
    pub fn seeded(count: u32) -> Self {
        let spots = (1..=count)
            .map(|number| ParkingSpot {
                id: Uuid::now_v7().to_string(),
                number,
                status: SpotStatus::Free,
                reserved_by: None,
                reserved_until: None,
            })
            .collect();

        Self {
            spots: Arc::new(Mutex::new(spots)),
        }
    }

    /// Start from an explicit spot table.
    pub fn with_spots(spots: Vec<ParkingSpot>) -> Self {
        Self {
            spots: Arc::new(Mutex::new(spots)),
        }
    }

    /// Expired reservations revert to free lazily, the way the real
    /// server reconciles them on read.
    fn sweep_expired(spots: &mut [ParkingSpot], now: i64) {
        for spot in spots.iter_mut() {
            if spot.status == SpotStatus::Reserved
                && spot.reserved_until.is_some_and(|until| until <= now)
            {
                spot.status = SpotStatus::Free;
                spot.reserved_by = None;
                spot.reserved_until = None;
            }
        }
    }

    fn with_spot<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut ParkingSpot) -> Result<T, BackendError>,
    ) -> Result<T, BackendError> {
        let mut spots = self.spots.lock().unwrap();
        Self::sweep_expired(&mut spots, now_ms());

        let spot = spots
            .iter_mut()
            .find(|spot| spot.id == id)
            .ok_or_else(|| BackendError::NotFound(id.to_string()))?;

        f(spot)
    }
}

#[async_trait::async_trait]
impl ParkingBackend for SimulatedBackend {
    async fn list(&self) -> Result<Vec<ParkingSpot>, BackendError> {
        let mut spots = self.spots.lock().unwrap();
        Self::sweep_expired(&mut spots, now_ms());
        Ok(spots.clone())
    }

    async fn reserve(
        &self,
        id: &str,
        name: &str,
        minutes: u32,
    ) -> Result<ParkingSpot, BackendError> {
        let name = normalize_name(name);
        let minutes = minutes.max(1);

        self.with_spot(id, |spot| {
            if spot.status != SpotStatus::Free {
                return Err(BackendError::Rejected(format!(
                    "Spot {} is not free",
                    spot.number
                )));
            }

            spot.status = SpotStatus::Reserved;
            spot.reserved_by = Some(name);
            spot.reserved_until = Some(now_ms() + i64::from(minutes) * 60_000);
            Ok(spot.clone())
        })
    }

    async fn occupy(&self, id: &str) -> Result<ParkingSpot, BackendError> {
        self.with_spot(id, |spot| {
            if spot.status != SpotStatus::Reserved {
                return Err(BackendError::Rejected(format!(
                    "Spot {} is not reserved",
                    spot.number
                )));
            }

            spot.status = SpotStatus::Occupied;
            spot.reserved_until = None;
            Ok(spot.clone())
        })
    }

    async fn free(&self, id: &str) -> Result<ParkingSpot, BackendError> {
        self.with_spot(id, |spot| {
            if spot.status == SpotStatus::Free {
                return Err(BackendError::Rejected(format!(
                    "Spot {} is already free",
                    spot.number
                )));
            }

            spot.status = SpotStatus::Free;
            spot.reserved_by = None;
            spot.reserved_until = None;
            Ok(spot.clone())
        })
    }
}

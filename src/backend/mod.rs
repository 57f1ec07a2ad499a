//! Backends for the remote parking service.
//!
//! `ParkingBackend` is the seam between the UI and the server. The
//! real deployment talks HTTP; demo mode swaps in an in-process
//! simulated server so the client runs without any network.

pub mod auth;
mod http;
mod simulated;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::AppConfig;
use crate::core::models::ParkingSpot;
use crate::core::session::SessionStore;

pub use http::HttpBackend;
pub use simulated::SimulatedBackend;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The server refused a state transition (reserve on a non-free
    /// spot, occupy an occupied spot, free an already-free spot).
    #[error("{0}")]
    Rejected(String),

    #[error("Spot not found: {0}")]
    NotFound(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Operations the client depends on. The server is authoritative:
/// every mutation returns the updated spot, and callers re-fetch
/// rather than patching local state.
#[async_trait]
pub trait ParkingBackend: Send + Sync {
    /// Full current snapshot. No pagination.
    async fn list(&self) -> Result<Vec<ParkingSpot>, BackendError>;

    /// Reserve a free spot for `minutes`, under `name`.
    async fn reserve(
        &self,
        id: &str,
        name: &str,
        minutes: u32,
    ) -> Result<ParkingSpot, BackendError>;

    /// Move a reserved spot to occupied.
    async fn occupy(&self, id: &str) -> Result<ParkingSpot, BackendError>;

    /// Release a reserved (early cancel) or occupied spot.
    async fn free(&self, id: &str) -> Result<ParkingSpot, BackendError>;
}

/// An empty or whitespace name reserves as "Guest".
pub fn normalize_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        "Guest".to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn get_backend(config: &AppConfig, sessions: &SessionStore) -> Arc<dyn ParkingBackend> {
    if config.demo {
        return Arc::new(SimulatedBackend::seeded(config.seed_spots));
    }

    let token = sessions
        .load()
        .ok()
        .flatten()
        .map(|session| session.token);

    Arc::new(HttpBackend::new(config.api_url.clone(), token))
}

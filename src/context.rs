use std::sync::Arc;

use crate::backend::{ParkingBackend, get_backend};
use crate::config::AppConfig;
use crate::core::session::SessionStore;

/// Everything a command or the TUI needs, threaded explicitly instead
/// of read from globals.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub backend: Arc<dyn ParkingBackend>,
    pub sessions: SessionStore,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        let sessions = SessionStore::new(config.session_path.clone());
        let backend = get_backend(&config, &sessions);

        Self {
            config: Arc::new(config),
            backend,
            sessions,
        }
    }
}

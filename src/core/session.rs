//! Typed session persistence.
//!
//! The signed-in user and API token live in a single TOML file with an
//! explicit load/save/clear API, rather than being parsed ad hoc
//! wherever a component happens to need them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

/// Reads and writes the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location under the platform config directory.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("parkctl")
            .join("session.toml")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted session, if any. A missing file is simply
    /// "not logged in"; a corrupt file is an error.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session file {}", self.path.display()))?;

        let session: Session =
            toml::from_str(&content).context("Failed to parse session file")?;

        Ok(Some(session))
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create session directory")?;
        }

        let content = toml::to_string_pretty(session).context("Failed to serialize session")?;

        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write session file {}", self.path.display()))?;

        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).context("Failed to remove session file")?;
        }
        Ok(())
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.load(), Ok(Some(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> Session {
        Session {
            token: "tok-12345".into(),
            user: SessionUser {
                id: "u1".into(),
                name: "Alice".into(),
                email: "alice@example.com".into(),
                role: "user".into(),
            },
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.toml"));

        store.save(&sample_session()).unwrap();
        let loaded = store.load().unwrap().unwrap();

        assert_eq!(loaded, sample_session());
        assert!(store.is_logged_in());
    }

    #[test]
    fn missing_file_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nope.toml"));

        assert!(store.load().unwrap().is_none());
        assert!(!store.is_logged_in());
    }

    #[test]
    fn clear_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.toml"));

        store.save(&sample_session()).unwrap();
        store.clear().unwrap();

        assert!(store.load().unwrap().is_none());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "not = [valid").unwrap();

        let store = SessionStore::new(path);
        assert!(store.load().is_err());
    }
}

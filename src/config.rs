//! Application configuration.
//!
//! Layered with figment: built-in defaults, then an optional TOML file
//! under the platform config dir, then `PARKCTL_` environment
//! variables, then CLI flags.

use std::path::PathBuf;

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::core::feed::RefreshMode;
use crate::core::session::SessionStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the spots API.
    pub api_url: String,
    /// Base URL of the auth API.
    pub auth_url: String,
    /// How the spot list stays fresh.
    pub refresh: RefreshMode,
    /// Run against the in-process simulated backend instead of HTTP.
    pub demo: bool,
    /// Number of spots the simulated backend seeds.
    pub seed_spots: u32,
    /// Where the session file lives.
    pub session_path: PathBuf,
    pub verbose: bool,
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000/api/spots".to_string(),
            auth_url: "http://localhost:5000/api/auth".to_string(),
            refresh: RefreshMode::default(),
            demo: false,
            seed_spots: 12,
            session_path: SessionStore::default_path(),
            verbose: false,
            log_json: false,
        }
    }
}

impl AppConfig {
    pub fn new<O: Serialize>(overrides: Option<&O>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        if let Some(path) = Self::config_file() {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("PARKCTL_"));

        if let Some(overrides) = overrides {
            figment = figment.merge(Serialized::defaults(overrides));
        }

        figment
            .extract()
            .context("Failed to load configuration")
    }

    fn config_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("parkctl").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_file_or_env() {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .extract()
            .unwrap();

        assert!(!config.demo);
        assert_eq!(config.seed_spots, 12);
        assert_eq!(config.refresh, RefreshMode::Polling { interval_secs: 30 });
    }

    #[test]
    fn file_overrides_defaults_and_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    api_url = "https://parking.example.com/api/spots"
                    demo = true

                    [refresh]
                    mode = "polling"
                    interval_secs = 5
                "#,
            )?;
            jail.set_env("PARKCTL_DEMO", "false");

            let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
                .merge(Toml::file("config.toml"))
                .merge(Env::prefixed("PARKCTL_"))
                .extract()?;

            assert_eq!(config.api_url, "https://parking.example.com/api/spots");
            assert!(!config.demo);
            assert_eq!(config.refresh, RefreshMode::Polling { interval_secs: 5 });
            Ok(())
        });
    }

    #[test]
    fn manual_refresh_mode_parses() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[refresh]\nmode = \"manual\"\n")?;

            let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
                .merge(Toml::file("config.toml"))
                .extract()?;

            assert_eq!(config.refresh, RefreshMode::Manual);
            Ok(())
        });
    }
}

//! Service settings.
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `blackvocs.toml`, then `BLACKVOCS__SECTION__KEY` environment variables.
//! `SERVICE_URI` still overrides the backend URL for older deployments.

use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:4000";

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
    /// Base URL of the vocabulary backend.
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    /// Max-Age of the `access_token` cookie.
    pub max_age_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cache {
    pub word_list_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub service: Service,
    pub session: Session,
    pub cache: Cache,
}

impl Settings {
    /// Load from `blackvocs.toml` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let legacy_url = std::env::var("SERVICE_URI").ok();
        Self::defaults()?
            .add_source(
                File::with_name("blackvocs")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("BLACKVOCS")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("service.url", legacy_url)?
            .build()?
            .try_deserialize()
    }

    /// Defaults overlaid with a TOML document.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("service.url", DEFAULT_SERVICE_URL)?
            .set_default("service.timeout_secs", 10)?
            .set_default("session.max_age_secs", 3600)?
            .set_default("cache.word_list_ttl_secs", 30)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.service.timeout_secs)
    }

    pub fn word_list_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.word_list_ttl_secs)
    }
}

//! Settings loading
//!
//! Resolution order for every setting:
//! 1. Command-line argument (highest priority, applied by the binary)
//! 2. Environment variable (applied by the binary)
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! This module owns layers 3 and 4.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_LOG_LEVEL: &str = "peopledir_svc=info,tower_http=info";

pub const DEFAULT_AGE_URL: &str = "https://api.agify.io/";
pub const DEFAULT_GENDER_URL: &str = "https://api.genderize.io/";
pub const DEFAULT_NATION_URL: &str = "https://api.nationalize.io/";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Service settings, passed explicitly into constructors
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Socket address the HTTP server binds to
    pub bind_addr: String,
    /// SQLite database file
    pub database_path: PathBuf,
    /// Upper bound of the connection pool
    pub db_max_connections: u32,
    /// `tracing` filter directive used when RUST_LOG is unset
    pub log_level: String,
    /// External inference endpoints
    pub api: ApiSettings,
}

/// Base URLs and transport limits for the inference APIs
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ApiSettings {
    pub age_url: String,
    pub gender_url: String,
    pub nation_url: String,
    pub timeout_secs: u64,
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            age_url: DEFAULT_AGE_URL.to_string(),
            gender_url: DEFAULT_GENDER_URL.to_string(),
            nation_url: DEFAULT_NATION_URL.to_string(),
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            database_path: default_database_path(),
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            api: ApiSettings::default(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text; keys not present keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config file: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `config_file`, or from the platform config file
    /// when none is given.
    ///
    /// An explicitly named file must exist. The platform file is optional:
    /// when it is absent the compiled defaults are returned.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let path = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => match default_config_file() {
                Some(path) if path.exists() => path,
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = std::fs::read_to_string(&path)?;
        let settings = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(settings)
    }

    /// Reject values the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.db_max_connections == 0 {
            return Err(Error::Config(
                "db_max_connections must be at least 1".to_string(),
            ));
        }
        if self.bind_addr.trim().is_empty() {
            return Err(Error::Config("bind_addr must not be empty".to_string()));
        }
        for (key, url) in [
            ("api.age_url", &self.api.age_url),
            ("api.gender_url", &self.api.gender_url),
            ("api.nation_url", &self.api.nation_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::Config(format!(
                    "{} must be an http(s) URL, got '{}'",
                    key, url
                )));
            }
        }
        Ok(())
    }
}

/// `<config_dir>/peopledir/config.toml`
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("peopledir").join("config.toml"))
}

/// Get OS-dependent default database location
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("peopledir"))
        .unwrap_or_else(|| PathBuf::from("./peopledir_data"))
        .join("peopledir.db")
}

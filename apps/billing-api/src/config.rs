//! # Server Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BILLING_BIND_ADDR=127.0.0.1                                        │
//! │     BILLING_PORT=9000                                                  │
//! │     BILLING_INDEX_HTML=./index.html                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $BILLING_CONFIG, or                                                │
//! │     ~/.config/billing-pos/billing.toml (Linux)                         │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     0.0.0.0:8000, built-in catalog, embedded billing page              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # billing.toml
//! [server]
//! bind_addr = "127.0.0.1"
//! port = 8000
//! index_html = "index.html"  # served from disk, re-read on every request
//!
//! [catalog]
//! "towel" = 150
//! "Baby Lotion" = 120.50
//! ```

use std::path::{Path, PathBuf};

use billing_core::Catalog;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Configuration failures. All of them stop startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

impl ConfigError {
    fn invalid(key: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Server Settings
// =============================================================================

/// Listener and page settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// On-disk billing page. `None` serves the embedded page.
    #[serde(default)]
    pub index_html: Option<PathBuf>,
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind_addr: default_bind_addr(),
            port: default_port(),
            index_html: None,
        }
    }
}

// =============================================================================
// Server Config
// =============================================================================

/// Complete server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,

    /// Replaces the built-in catalog when present.
    #[serde(default)]
    pub catalog: Option<Catalog>,
}

impl ServerConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file, if it exists
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading billing config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML file without applying overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid("port", "must be greater than 0"));
        }

        if let Some(catalog) = &self.catalog {
            if catalog.is_empty() {
                return Err(ConfigError::invalid("catalog", "must list at least one product"));
            }
            if let Some((name, price)) = catalog.iter().find(|(_, price)| price.is_negative()) {
                return Err(ConfigError::invalid(
                    "catalog",
                    format!("price of {name:?} is negative ({price})"),
                ));
            }
        }

        Ok(())
    }

    /// Applies `BILLING_*` overrides read through `lookup`.
    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("BILLING_BIND_ADDR") {
            debug!(addr = %addr, "Overriding bind address from environment");
            self.server.bind_addr = addr;
        }

        if let Some(port) = lookup("BILLING_PORT") {
            self.server.port = port.parse().map_err(|_| {
                ConfigError::invalid("BILLING_PORT", format!("{port:?} is not a port"))
            })?;
            debug!(port = self.server.port, "Overriding port from environment");
        }

        if let Some(path) = lookup("BILLING_INDEX_HTML") {
            debug!(path = %path, "Overriding billing page from environment");
            self.server.index_html = Some(PathBuf::from(path));
        }

        Ok(())
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("BILLING_CONFIG") {
            return Some(PathBuf::from(path));
        }
        directories::ProjectDirs::from("com", "billing", "billing-pos")
            .map(|dirs| dirs.config_dir().join("billing.toml"))
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.bind_addr, self.server.port)
    }

    /// The configured catalog, or the built-in one.
    pub fn catalog(&self) -> Catalog {
        self.catalog.clone().unwrap_or_default()
    }
}

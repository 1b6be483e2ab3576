//! Configuration module
//!
//! TOML application config (`~/.config/staybook/config.toml` by default,
//! overridable via the `STAYBOOK_CONFIG` env var). Every section has
//! sensible defaults so the service starts without a config file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default config file location
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("staybook")
        .join("config.toml")
}

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub payment: PaymentConfig,
    #[serde(default)]
    pub holds: HoldConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e))?;
        toml::from_str(&raw).map_err(ConfigError::Parse)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Io(String, #[source] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
    /// Bound on individual store operations (checkout, webhook apply)
    pub store_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
            store_timeout_secs: 10,
        }
    }
}

/// Database settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Database URL; SQLite file by default, switchable to PostgreSQL
    pub url: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://./staybook.db?mode=rwc".to_string(),
        }
    }
}

impl DatabaseSettings {
    pub fn connection_url(&self) -> String {
        std::env::var("DATABASE_URL").unwrap_or_else(|_| self.url.clone())
    }
}

/// Payment gateway settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    /// Server key shared with the gateway; signs every notification
    pub server_key: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            server_key: "change-me".to_string(),
        }
    }
}

/// Pending-hold expiry settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HoldConfig {
    /// Minutes a pending booking may sit unpaid before the sweep
    /// cancels it and releases the calendar slot
    pub pending_ttl_minutes: i64,
    /// How often the sweep runs
    pub check_interval_secs: u64,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            pending_ttl_minutes: 30,
            check_interval_secs: 60,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter (overridden by RUST_LOG)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.holds.pending_ttl_minutes, 30);
        assert!(cfg.database.url.starts_with("sqlite://"));
    }

    #[test]
    fn parses_partial_toml() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9090

            [payment]
            server_key = "sk-test"

            [holds]
            pending_ttl_minutes = 15
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.payment.server_key, "sk-test");
        assert_eq!(cfg.holds.pending_ttl_minutes, 15);
        assert_eq!(cfg.holds.check_interval_secs, 60);
    }
}

//! Configuration management for the retail inventory backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides, e.g. `RIM_DATABASE__URL` or
//!    `RIM_ALERTS__EVALUATION_INTERVAL_SECS`

use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Stock alert evaluation
    pub alerts: AlertsConfig,

    /// Outgoing mail
    pub mail: MailConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertsConfig {
    /// Run the periodic evaluator
    pub enabled: bool,

    /// Seconds between evaluation passes
    pub evaluation_interval_secs: u64,

    /// Upper bound on a single notification send
    pub send_timeout_secs: u64,

    /// Recipient of stock alert mail
    pub operations_contact: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MailConfig {
    /// HTTP mail relay endpoint; alerts are only logged when unset
    pub endpoint: Option<String>,

    /// Bearer key for the relay
    pub api_key: Option<String>,

    /// Sender address
    pub from: String,
}

impl AlertsConfig {
    pub fn evaluation_interval(&self) -> Duration {
        Duration::from_secs(self.evaluation_interval_secs.max(1))
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_secs.max(1))
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("RIM_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        Self::load_with(&environment, Self::env_source())
    }

    /// `RIM_` prefix, `__` between nested keys
    fn env_source() -> Environment {
        Environment::with_prefix("RIM")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with(environment: &str, env: Environment) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment)?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("alerts.enabled", true)?
            .set_default("alerts.evaluation_interval_secs", 300)?
            .set_default("alerts.send_timeout_secs", 30)?
            .set_default("alerts.operations_contact", "operations@store.local")?
            .set_default("mail.from", "inventory@localhost")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables
            .add_source(env)
            .build()?;

        config.try_deserialize()
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            evaluation_interval_secs: 300,
            send_timeout_secs: 30,
            operations_contact: "operations@store.local".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_defaults_run_every_five_minutes() {
        let alerts = AlertsConfig::default();
        assert!(alerts.enabled);
        assert_eq!(alerts.evaluation_interval(), Duration::from_secs(300));
        assert_eq!(alerts.send_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_zero_durations_are_clamped() {
        let alerts = AlertsConfig {
            evaluation_interval_secs: 0,
            send_timeout_secs: 0,
            ..AlertsConfig::default()
        };
        assert_eq!(alerts.evaluation_interval(), Duration::from_secs(1));
        assert_eq!(alerts.send_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_env_overrides_use_single_underscore_after_prefix() {
        let vars: config::Map<String, String> = [
            ("RIM_DATABASE__URL", "postgres://env-host/inventory"),
            ("RIM_ALERTS__EVALUATION_INTERVAL_SECS", "42"),
            ("RIM_SERVER__PORT", "8081"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

        let config = Config::load_with("test", Config::env_source().source(Some(vars))).unwrap();

        assert_eq!(config.database.url, "postgres://env-host/inventory");
        assert_eq!(config.alerts.evaluation_interval(), Duration::from_secs(42));
        assert_eq!(config.bind_address(), "0.0.0.0:8081");
        assert_eq!(config.environment, "test");
    }
}

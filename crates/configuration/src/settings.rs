use crate::error::ConfigError;
use serde::Deserialize;
use std::time::Duration;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty or missing `config.toml` is a valid configuration
/// that talks to an analytics service on `localhost:5000`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Where the remote analytics service lives and how to reach each series.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL without a trailing slash, e.g. `http://localhost:5000`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    pub endpoints: Endpoints,
}

/// Request paths, relative to `ServiceConfig::base_url`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub health: String,
    pub sales: String,
    pub forecast: String,
    pub category_sales: String,
    pub profit_trend: String,
}

/// The address the dashboard HTTP API binds to.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive used when `RUST_LOG` is not set.
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<String>,
}

// --- Default Implementations ---

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 10,
            endpoints: Endpoints::default(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            health: "/".to_string(),
            sales: "/sales".to_string(),
            forecast: "/forecast".to_string(),
            category_sales: "/category-sales".to_string(),
            profit_trend: "/profit-trend".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Joins the base URL and an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service.base_url.trim().is_empty() {
            return Err(ConfigError::invalid("service.base_url", "must not be empty"));
        }
        if self.service.timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "service.timeout_secs",
                "must be greater than zero",
            ));
        }

        let endpoints = &self.service.endpoints;
        for (name, path) in [
            ("health", &endpoints.health),
            ("sales", &endpoints.sales),
            ("forecast", &endpoints.forecast),
            ("category_sales", &endpoints.category_sales),
            ("profit_trend", &endpoints.profit_trend),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::invalid(
                    format!("service.endpoints.{name}"),
                    format!("must start with '/', got '{path}'"),
                ));
            }
        }

        Ok(())
    }
}

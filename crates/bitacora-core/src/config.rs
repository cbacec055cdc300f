//! Application configuration
//!
//! This module provides centralized configuration management using the `config` crate.
//! Configuration can be loaded from environment variables and config files.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Comma-separated list of allowed CORS origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9001
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_cors_origins() -> String {
    "http://localhost:3000,http://127.0.0.1:3000".to_string()
}

/// Snapshot file locations
///
/// The producing systems drop JSON arrays of records at these paths.
#[derive(Debug, Deserialize, Clone)]
pub struct SnapshotConfig {
    /// Data movement records (JSON array)
    #[serde(default = "default_movements_path")]
    pub movements_path: String,

    /// Call records (JSON array)
    #[serde(default = "default_calls_path")]
    pub calls_path: String,
}

fn default_movements_path() -> String {
    "data/movements.json".to_string()
}

fn default_calls_path() -> String {
    "data/calls.json".to_string()
}

/// Search configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Longest search term accepted from the presentation layer
    #[serde(default = "default_max_term_length")]
    pub max_term_length: usize,
}

fn default_max_term_length() -> usize {
    200
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_term_length: default_max_term_length(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("server.workers", num_cpus::get() as i64)?
            .set_default("server.cors_origins", default_cors_origins())?
            .set_default("snapshot.movements_path", default_movements_path())?
            .set_default("snapshot.calls_path", default_calls_path())?
            .set_default("search.max_term_length", default_max_term_length() as i64)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with BITACORA_ prefix
            .add_source(
                Environment::with_prefix("BITACORA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_search_config() {
        let config = SearchConfig::default();
        assert_eq!(config.max_term_length, 200);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(
                "[server]\nport = 8088\n\n[snapshot]\ncalls_path = \"fixtures/calls.json\"\n",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.snapshot.calls_path, "fixtures/calls.json");
        assert_eq!(config.snapshot.movements_path, "data/movements.json");
        assert_eq!(config.search.max_term_length, 200);
        assert_eq!(config.server_addr(), "0.0.0.0:8088");
    }
}

//! Server configuration from environment variables.
//!
//! - `STAFFDIR_DB_PATH`: SQLite database file path (default: "staffdir.db")
//! - `STAFFDIR_HOST`: listen address (default: "0.0.0.0")
//! - `STAFFDIR_PORT`: listen port (default: "3001")

use thiserror::Error;

const DEFAULT_DB_PATH: &str = "staffdir.db";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid STAFFDIR_PORT '{0}': expected a number between 0 and 65535")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub db_path: String,
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("STAFFDIR_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        Ok(ServerConfig {
            db_path: lookup("STAFFDIR_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
            host: lookup("STAFFDIR_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_apply_when_unset() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.db_path, "staffdir.db");
        assert_eq!(config.bind_addr(), "0.0.0.0:3001");
    }

    #[test]
    fn variables_override_defaults() {
        let vars: HashMap<&str, &str> = [
            ("STAFFDIR_DB_PATH", "/tmp/dir.db"),
            ("STAFFDIR_HOST", "127.0.0.1"),
            ("STAFFDIR_PORT", "8080"),
        ]
        .into_iter()
        .collect();
        let config = ServerConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.db_path, "/tmp/dir.db");
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = ServerConfig::from_lookup(|k| (k == "STAFFDIR_PORT").then(|| "http".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(p) if p == "http"));
    }
}

//! Server configuration from environment variables.
//!
//! - `HOST`: bind address (default `0.0.0.0`, reachable on a VPS)
//! - `PORT`: bind port (default `8080`)
//! - `DATA_DIR`: keep tournaments as JSON files there; in memory when unset

use std::path::PathBuf;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparsable or empty values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let port = match non_empty("PORT").map(|p| p.trim().parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(_)) => {
                log::warn!("Ignoring invalid PORT, using {}", default_port());
                default_port()
            }
            None => default_port(),
        };
        Self {
            host: non_empty("HOST").unwrap_or_else(default_host),
            port,
            data_dir: non_empty("DATA_DIR").map(PathBuf::from),
        }
    }
}

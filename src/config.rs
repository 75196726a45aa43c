//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of sequence values kept in the cache
    pub cache_capacity: usize,
    /// HTTP server port
    pub server_port: u16,
    /// File holding the last checkpointed cursor index
    pub backup_path: PathBuf,
    /// Seconds between cursor checkpoints
    pub backup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cached sequence values (default: 1000)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `BACKUP_PATH` - Cursor backup file (default: backup.txt)
    /// - `BACKUP_INTERVAL` - Checkpoint frequency in seconds (default: 2)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            cache_capacity: parse_var("CACHE_CAPACITY").unwrap_or(defaults.cache_capacity),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            backup_path: env::var_os("BACKUP_PATH")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.backup_path),
            backup_interval: parse_var("BACKUP_INTERVAL").unwrap_or(defaults.backup_interval),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: 1000,
            server_port: 8080,
            backup_path: PathBuf::from("backup.txt"),
            backup_interval: 2,
        }
    }
}

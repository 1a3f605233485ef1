//! # Store Configuration
//!
//! Loads the slot store settings from environment variables.
//!
//! ## Environment Variables
//!
//! - `SLOTBOOK_DATA_PATH`: JSON file the table is loaded from and saved to.
//!   Unset or empty keeps the store purely in memory.
//! - `LOG_LEVEL`: Logging level (default: "info")

use eyre::{Result, eyre};
use std::env;
use std::path::PathBuf;
use tracing::Level;

pub const DATA_PATH_VAR: &str = "SLOTBOOK_DATA_PATH";
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

/// Configuration for the slot store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Persistence sink; `None` disables load and save.
    pub data_path: Option<PathBuf>,

    /// Log level for the application
    pub log_level: Level,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            log_level: Level::INFO,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns an error if `LOG_LEVEL` is set to something other than
    /// `trace`, `debug`, `info`, `warn` or `error`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_path = lookup(DATA_PATH_VAR)
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        let log_level = match lookup(LOG_LEVEL_VAR) {
            None => Level::INFO,
            Some(level) => match level.trim().to_ascii_lowercase().as_str() {
                "trace" => Level::TRACE,
                "debug" => Level::DEBUG,
                "info" | "" => Level::INFO,
                "warn" => Level::WARN,
                "error" => Level::ERROR,
                other => return Err(eyre!("{LOG_LEVEL_VAR} has unknown value '{other}'")),
            },
        };

        Ok(Self {
            data_path,
            log_level,
        })
    }

    pub fn is_persistent(&self) -> bool {
        self.data_path.is_some()
    }
}

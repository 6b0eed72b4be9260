//! Runtime configuration from the environment.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

use stockbook_inventory::{DEFAULT_DATA_FILE, DEFAULT_LOW_STOCK_THRESHOLD};
use stockbook_observability::{LogFormat, ParseLogFormatError};

pub const ENV_DATA_FILE: &str = "STOCKBOOK_DATA_FILE";
pub const ENV_LOW_THRESHOLD: &str = "STOCKBOOK_LOW_THRESHOLD";
pub const ENV_LOG_FORMAT: &str = "STOCKBOOK_LOG_FORMAT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("STOCKBOOK_LOW_THRESHOLD={value:?} is not a non-negative integer: {source}")]
    InvalidThreshold {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("STOCKBOOK_LOG_FORMAT: {0}")]
    InvalidLogFormat(#[from] ParseLogFormatError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub low_threshold: u64,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            low_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Unset or empty
    /// variables fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get(ENV_DATA_FILE) {
            config.data_file = PathBuf::from(path);
        }

        if let Some(value) = get(ENV_LOW_THRESHOLD) {
            config.low_threshold = value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidThreshold { value, source })?;
        }

        if let Some(value) = get(ENV_LOG_FORMAT) {
            config.log_format = value.parse()?;
        }

        Ok(config)
    }
}

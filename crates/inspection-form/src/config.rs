//! Form configuration

use crate::notify::DEFAULT_TOAST_TTL;
use crate::size::FileSizeLimit;
use std::time::Duration;
use thiserror::Error;

/// Default backend URL
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";

/// Environment variable overriding the backend URL
pub const API_BASE_URL_ENV: &str = "INSPECTION_API_BASE_URL";

/// Environment variable overriding the per-image size limit, in bytes
pub const MAX_FILE_SIZE_ENV: &str = "INSPECTION_MAX_FILE_SIZE";

/// Environment variable overriding the toast lifetime, in milliseconds
pub const TOAST_TTL_ENV: &str = "INSPECTION_TOAST_TTL_MS";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("{name} must be greater than 0")]
    Zero { name: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    pub max_file_size: FileSizeLimit,
    pub api_base_url: String,
    pub toast_ttl: Duration,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_file_size: FileSizeLimit::default(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            toast_ttl: DEFAULT_TOAST_TTL,
        }
    }
}

impl FormConfig {
    /// Load configuration from the process environment, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(API_BASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            config.api_base_url = url.trim().to_string();
        }

        if let Some(value) = lookup(MAX_FILE_SIZE_ENV) {
            config.max_file_size = FileSizeLimit::new(parse_positive(MAX_FILE_SIZE_ENV, &value)?);
        }

        if let Some(value) = lookup(TOAST_TTL_ENV) {
            config.toast_ttl = Duration::from_millis(parse_positive(TOAST_TTL_ENV, &value)?);
        }

        Ok(config)
    }
}

fn parse_positive(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    let parsed: u64 = value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        })?;
    if parsed == 0 {
        return Err(ConfigError::Zero { name });
    }
    Ok(parsed)
}

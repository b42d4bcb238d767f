//! Console configuration from the environment.
//!
//! Reads a `.env` file when present, then:
//! - `FLEET_API_BASE_URL` (required)
//! - `FLEET_PAGE_SIZE` (default 10, one of the offered page sizes)
//! - `FLEET_HTTP_TIMEOUT_SECS` (default 15)

use std::env;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::page::{DEFAULT_PAGE_SIZE, PAGE_SIZES};

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    pub page_size: u32,
    pub request_timeout: Duration,
}

impl ConsoleConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("FLEET_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("FLEET_API_BASE_URL"))?;
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                name: "FLEET_API_BASE_URL",
                value: api_base_url,
            });
        }

        let page_size = match lookup("FLEET_PAGE_SIZE") {
            None => DEFAULT_PAGE_SIZE,
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|size| PAGE_SIZES.contains(size))
                .ok_or_else(|| ConfigError::Invalid {
                    name: "FLEET_PAGE_SIZE",
                    value: raw.clone(),
                })?,
        };

        let timeout_secs = match lookup("FLEET_HTTP_TIMEOUT_SECS") {
            None => DEFAULT_TIMEOUT_SECS,
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    name: "FLEET_HTTP_TIMEOUT_SECS",
                    value: raw.clone(),
                })?,
        };

        let config = Self {
            api_base_url,
            page_size,
            request_timeout: Duration::from_secs(timeout_secs),
        };
        debug!(?config, "console configuration loaded");
        Ok(config)
    }
}

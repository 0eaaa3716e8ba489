//! Cart manager configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `CART_API_URL` - Catalog and stock API base URL (default: `http://localhost:3333`)
//! - `CART_STORAGE_DIR` - Directory holding the cart slot (default: `.cart`)
//! - `CART_STORAGE_KEY` - Slot key (default: `@RocketShoes:cart`)
//! - `CART_QUEUE_CAPACITY` - Pending request capacity of the cart actor (default: 32)

use std::path::PathBuf;

use reqwest::Url;
use thiserror::Error;

use crate::storage::DEFAULT_CART_KEY;

const DEFAULT_API_URL: &str = "http://localhost:3333";
const DEFAULT_STORAGE_DIR: &str = ".cart";
const DEFAULT_QUEUE_CAPACITY: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartConfig {
    pub api_url: String,
    pub storage_dir: PathBuf,
    pub storage_key: String,
    pub queue_capacity: usize,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_key: DEFAULT_CART_KEY.to_string(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl CartConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a variable
    /// if it is set.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_url = match lookup("CART_API_URL") {
            Some(raw) => {
                let url = Url::parse(&raw)
                    .map_err(|e| ConfigError::InvalidEnvVar("CART_API_URL".to_string(), e.to_string()))?;
                if !matches!(url.scheme(), "http" | "https") {
                    return Err(ConfigError::InvalidEnvVar(
                        "CART_API_URL".to_string(),
                        format!("unsupported scheme {}", url.scheme()),
                    ));
                }
                raw
            }
            None => defaults.api_url,
        };

        let storage_dir = lookup("CART_STORAGE_DIR").map_or(defaults.storage_dir, PathBuf::from);

        let storage_key = match lookup("CART_STORAGE_KEY") {
            Some(key) if key.trim().is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    "CART_STORAGE_KEY".to_string(),
                    "must not be empty".to_string(),
                ));
            }
            Some(key) => key,
            None => defaults.storage_key,
        };

        let queue_capacity = match lookup("CART_QUEUE_CAPACITY") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(0) => {
                    return Err(ConfigError::InvalidEnvVar(
                        "CART_QUEUE_CAPACITY".to_string(),
                        "must be greater than 0".to_string(),
                    ));
                }
                Ok(capacity) => capacity,
                Err(e) => {
                    return Err(ConfigError::InvalidEnvVar(
                        "CART_QUEUE_CAPACITY".to_string(),
                        e.to_string(),
                    ));
                }
            },
            None => defaults.queue_capacity,
        };

        Ok(Self {
            api_url,
            storage_dir,
            storage_key,
            queue_capacity,
        })
    }
}

//! Client configuration.

use reqwest::Url;
use std::path::PathBuf;

use crate::error::ConfigError;

/// The movie API the client talks to unless told otherwise.
pub const DEFAULT_API_URL: &str = "https://my-films-db.herokuapp.com/";

pub const API_URL_ENV: &str = "MYFLIX_API_URL";
pub const STORAGE_PATH_ENV: &str = "MYFLIX_STORAGE_PATH";
pub const STORE_BUFFER_ENV: &str = "MYFLIX_STORE_BUFFER";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is joined onto.
    pub api_url: Url,
    /// JSON file backing ambient storage. `None` keeps it in memory.
    pub storage_path: Option<PathBuf>,
    /// Channel capacity of the storage actor.
    pub store_buffer: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            storage_path: None,
            store_buffer: 32,
        }
    }
}

impl ClientConfig {
    /// Reads overrides from `MYFLIX_API_URL`, `MYFLIX_STORAGE_PATH` and
    /// `MYFLIX_STORE_BUFFER`. Unset variables keep the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(API_URL_ENV) {
            config.api_url = parse_api_url(&value)?;
        }
        if let Some(value) = lookup(STORAGE_PATH_ENV) {
            config.storage_path = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup(STORE_BUFFER_ENV) {
            config.store_buffer = value
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidNumber {
                    key: STORE_BUFFER_ENV,
                    value,
                })?;
        }

        Ok(config)
    }

    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = api_url;
        self
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }
}

fn parse_api_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl {
            value: value.to_string(),
            reason: "not usable as a base URL".to_string(),
        });
    }
    Ok(url)
}

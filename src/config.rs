//! Client configuration.
//!
//! Configuration is passed explicitly to [`FreeScoutClient`](crate::FreeScoutClient).
//! Environment lookup only happens when the caller asks for it through
//! [`Config::from_env`] or [`Config::resolve`]; the library never loads a
//! `.env` file on its own.

use std::env;
use std::fmt;

use crate::error::{FreeScoutError, Result};

/// Environment variable holding the FreeScout base URL.
pub const BASE_URL_ENV: &str = "FREESCOUT_BASE_URL";

/// Environment variable holding the FreeScout API key.
pub const API_KEY_ENV: &str = "FREESCOUT_API_KEY";

/// Connection settings for a FreeScout instance.
///
/// The API key is never included in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the installation, without the trailing `/api` segment.
    pub base_url: String,

    /// API key sent in the `X-FreeScout-API-Key` header.
    pub api_key: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Build a configuration from explicit values.
    ///
    /// # Errors
    ///
    /// Returns [`FreeScoutError::ConfigMissing`] if either value is blank.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Self::resolve_with(Some(base_url), Some(api_key), |_| None)
    }

    /// Build a configuration from `FREESCOUT_BASE_URL` and `FREESCOUT_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`FreeScoutError::ConfigMissing`] if either variable is unset or blank.
    pub fn from_env() -> Result<Self> {
        Self::resolve(None, None)
    }

    /// Use explicit values where given and fall back to the environment.
    ///
    /// # Errors
    ///
    /// Returns [`FreeScoutError::ConfigMissing`] if a value is neither given
    /// nor present in the environment.
    pub fn resolve(base_url: Option<&str>, api_key: Option<&str>) -> Result<Self> {
        Self::resolve_with(base_url, api_key, |name| env::var(name).ok())
    }

    fn resolve_with<F>(base_url: Option<&str>, api_key: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = pick(base_url, BASE_URL_ENV, &lookup).ok_or_else(|| {
            FreeScoutError::ConfigMissing(format!(
                "base URL is required; set {BASE_URL_ENV} or pass it directly"
            ))
        })?;
        let api_key = pick(api_key, API_KEY_ENV, &lookup).ok_or_else(|| {
            FreeScoutError::ConfigMissing(format!(
                "API key is required; set {API_KEY_ENV} or pass it directly"
            ))
        })?;

        Ok(Self {
            base_url: normalize_base_url(&base_url),
            api_key,
        })
    }
}

fn pick<F>(explicit: Option<&str>, name: &str, lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    explicit
        .map(str::to_string)
        .filter(|v| !v.trim().is_empty())
        .or_else(|| lookup(name).filter(|v| !v.trim().is_empty()))
        .map(|v| v.trim().to_string())
}

/// Strip trailing slashes and a redundant `/api` segment.
///
/// `https://h.example.com/api/` and `https://h.example.com` both become
/// `https://h.example.com`.
pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    let without_api = trimmed.strip_suffix("/api").unwrap_or(trimmed);
    without_api.trim_end_matches('/').to_string()
}

//! Portal configuration loaded via OrthoConfig.
//!
//! Values come from `PORTAL_*` environment variables and configuration
//! files; command-line flags handled by the CLI override them afterwards.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

/// Service root used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
/// Credential file used when nothing is configured.
pub const DEFAULT_CREDENTIALS_PATH: &str = ".portal/credentials.json";
/// Per-request timeout used when nothing is configured.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors raised while loading or interpreting settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration sources could not be read or merged.
    #[error("failed to load configuration: {0}")]
    Load(String),
    /// The base URL does not parse.
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        /// Rejected value.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// The timeout is zero.
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Configuration values for the portal client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PORTAL")]
pub struct PortalSettings {
    /// Root URL of the residency service.
    pub base_url: Option<String>,
    /// JSON file holding the session credential.
    pub credentials_path: Option<PathBuf>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
}

impl PortalSettings {
    /// Load settings from the environment and configuration files only.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when a source cannot be read.
    pub fn load_ambient() -> Result<Self, ConfigError> {
        Self::load_from_iter([OsString::from("portal")])
            .map_err(|error| ConfigError::Load(error.to_string()))
    }

    /// Apply command-line overrides on top of the loaded values.
    #[must_use]
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        credentials_path: Option<PathBuf>,
    ) -> Self {
        if base_url.is_some() {
            self.base_url = base_url;
        }
        if credentials_path.is_some() {
            self.credentials_path = credentials_path;
        }
        self
    }

    /// Parsed service root, falling back to [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when the value does not parse.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl {
            url: raw.to_owned(),
            source,
        })
    }

    /// Credential file, falling back to [`DEFAULT_CREDENTIALS_PATH`].
    pub fn credentials_path(&self) -> PathBuf {
        self.credentials_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_PATH))
    }

    /// Request timeout, falling back to [`DEFAULT_REQUEST_TIMEOUT_SECS`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] for a zero timeout.
    pub fn request_timeout(&self) -> Result<Duration, ConfigError> {
        match self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
        {
            0 => Err(ConfigError::ZeroTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }
}

//! Client configuration loaded from defaults, a TOML file and the environment.
//!
//! Precedence: env vars (`SCHOLAR_*`) > config file > defaults.
//! The config file defaults to `<config dir>/scholar/config.toml`:
//!
//! ```toml
//! base_url = "https://portal.example.edu"
//! timeout_secs = 30
//! retry = "bounded"
//! max_refreshes = 1
//! dedupe_refresh = true
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use scholar_application::{
    DEFAULT_BASE_URL, DEFAULT_FALLBACK_MESSAGE, DispatcherConfig, RetryPolicy,
};

/// Prefix of the environment variables read by [`ClientConfig::load`].
pub const ENV_PREFIX: &str = "SCHOLAR";

/// Errors raised while loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the expected shape.
    #[error("could not load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The portal address is not a valid URL.
    #[error("invalid base_url {url:?}: {message}")]
    InvalidBaseUrl {
        /// Configured value
        url: String,
        /// Parse error
        message: String,
    },
}

/// How the client reacts to repeated `401` responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryMode {
    /// Refresh at most `max_refreshes` times per request.
    #[default]
    Bounded,
    /// Keep refreshing while the refresh succeeds.
    UntilRefreshFails,
}

/// Settings for the portal client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Portal address, without the `/api` suffix
    pub base_url: String,
    /// Per-request timeout; the transport default applies when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Refresh-and-retry mode
    pub retry: RetryMode,
    /// Refresh budget per request in `bounded` mode
    pub max_refreshes: u32,
    /// Share one refresh between concurrent requests
    pub dedupe_refresh: bool,
    /// Message shown when a failure has no better one
    pub fallback_error_message: String,
    /// Session file override
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

impl ClientConfig {
    /// Loads the configuration.
    ///
    /// With `file` set, that file must exist. Otherwise the default config
    /// file is read if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value is invalid.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(file, config::Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with(file: Option<&Path>, env: config::Environment) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("retry", "bounded")?
            .set_default("max_refreshes", 1)?
            .set_default("dedupe_refresh", false)?
            .set_default("fallback_error_message", DEFAULT_FALLBACK_MESSAGE)?;

        builder = match file {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => match Self::default_path() {
                Some(path) => builder.add_source(config::File::from(path).required(false)),
                None => builder,
            },
        };

        let loaded: Self = builder
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Replaces the portal address, checking it the same way a loaded one is.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the address is not a URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        self.base_url = base_url.into();
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.base_url)
            .map(|_| ())
            .map_err(|e| ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                message: e.to_string(),
            })
    }

    /// Returns the default config file path, if available.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("scholar").join("config.toml"))
    }

    /// The retry policy described by `retry` and `max_refreshes`.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        match self.retry {
            RetryMode::Bounded => RetryPolicy::Bounded {
                max_refreshes: self.max_refreshes,
            },
            RetryMode::UntilRefreshFails => RetryPolicy::UntilRefreshFails,
        }
    }

    /// The request timeout, if configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Settings for the request dispatcher.
    #[must_use]
    pub fn dispatcher_config(&self) -> DispatcherConfig {
        DispatcherConfig {
            base_url: self.base_url.clone(),
            retry: self.retry_policy(),
            dedupe_refresh: self.dedupe_refresh,
            fallback_error_message: self.fallback_error_message.clone(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            retry: RetryMode::default(),
            max_refreshes: 1,
            dedupe_refresh: false,
            fallback_error_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            session_file: None,
        }
    }
}

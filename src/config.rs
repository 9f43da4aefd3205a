//! Configuration file
//!
//! YAML configuration for the command-line front end. Every field has a
//! default, so an empty file (or no file at all) targets the public Kitsu
//! API without authentication.

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::request::DEFAULT_PAGE_LIMIT;
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://kitsu.io/api/edge";

/// Environment variable overriding `auth.token`
pub const TOKEN_ENV_VAR: &str = "KITSU_TOKEN";

/// Largest page size the API accepts
pub const MAX_PAGE_LIMIT: u32 = 500;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete configuration loaded from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API root that relative request paths are joined onto
    pub base_url: String,

    /// Authentication settings
    pub auth: AuthSection,

    /// HTTP client settings
    pub http: HttpSection,

    /// Library request defaults
    pub library: LibrarySection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth: AuthSection::default(),
            http: HttpSection::default(),
            library: LibrarySection::default(),
        }
    }
}

/// Authentication settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSection {
    /// OAuth2 bearer token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSection {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Retries for transient failures
    pub max_retries: u32,
    /// Backoff growth between retries
    pub backoff: BackoffType,
    /// First backoff delay in milliseconds
    pub initial_backoff_ms: u64,
    /// Backoff ceiling in milliseconds
    pub max_backoff_ms: u64,
    /// Request rate, 0 disables rate limiting
    pub requests_per_second: u32,
    /// Requests allowed in a burst
    pub burst_size: u32,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 3,
            backoff: BackoffType::Exponential,
            initial_backoff_ms: 100,
            max_backoff_ms: 60_000,
            requests_per_second: 10,
            burst_size: 10,
        }
    }
}

/// Library request defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySection {
    /// Entries per page
    pub page_limit: u32,
    /// Side-load media with each page
    pub include_media: bool,
}

impl Default for LibrarySection {
    fn default() -> Self {
        Self {
            page_limit: DEFAULT_PAGE_LIMIT,
            include_media: true,
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl Config {
    /// Load and validate a config file, applying environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parse and validate a YAML document, applying environment overrides
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let mut config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Result<Self> {
        Self::from_yaml_str("")
    }

    /// Apply environment variable overrides
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.trim().is_empty() {
                self.auth.token = Some(token);
            }
        }
    }

    /// Check that the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::missing_field("base_url"));
        }

        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.library.page_limit == 0 || self.library.page_limit > MAX_PAGE_LIMIT {
            return Err(Error::invalid_value(
                "library.page_limit",
                format!("must be between 1 and {MAX_PAGE_LIMIT}"),
            ));
        }

        if self.http.initial_backoff_ms > self.http.max_backoff_ms {
            return Err(Error::invalid_value(
                "http.initial_backoff_ms",
                "must not exceed http.max_backoff_ms",
            ));
        }

        if self.http.timeout_secs == 0 {
            return Err(Error::invalid_value(
                "http.timeout_secs",
                "must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Authentication derived from the config
    pub fn auth_config(&self) -> AuthConfig {
        self.auth
            .token
            .as_deref()
            .map_or(AuthConfig::None, AuthConfig::bearer)
    }

    /// HTTP client configuration derived from the config
    pub fn http_client_config(&self) -> HttpClientConfig {
        let http = &self.http;
        let mut builder = HttpClientConfig::builder()
            .base_url(self.base_url.as_str())
            .timeout(Duration::from_secs(http.timeout_secs))
            .max_retries(http.max_retries)
            .backoff(
                http.backoff,
                Duration::from_millis(http.initial_backoff_ms),
                Duration::from_millis(http.max_backoff_ms),
            )
            .auth(self.auth_config());

        builder = if http.requests_per_second == 0 {
            builder.no_rate_limit()
        } else {
            builder.rate_limit(RateLimiterConfig::new(
                http.requests_per_second,
                http.burst_size,
            ))
        };

        builder.build()
    }
}

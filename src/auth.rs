//! Authentication
//!
//! Applies credentials to outgoing requests. Obtaining and storing tokens is
//! the caller's business; the authenticator only attaches what it is given.

use reqwest::RequestBuilder;

/// Authentication configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// OAuth2 bearer token
    Bearer {
        /// The access token
        token: String,
    },
}

impl AuthConfig {
    /// Bearer auth for a token, or no auth when the token is blank
    pub fn bearer(token: impl Into<String>) -> Self {
        let token = token.into();
        if token.trim().is_empty() {
            Self::None
        } else {
            Self::Bearer { token }
        }
    }
}

/// Authenticator handles applying authentication to HTTP requests
#[derive(Clone, Default)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Check whether any credentials will be applied
    pub fn is_authenticated(&self) -> bool {
        !matches!(self.config, AuthConfig::None)
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.config {
            AuthConfig::None => req,
            AuthConfig::Bearer { token } => req.bearer_auth(token),
        }
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.config {
            AuthConfig::None => "none",
            AuthConfig::Bearer { .. } => "bearer",
        };
        f.debug_struct("Authenticator").field("kind", &kind).finish()
    }
}

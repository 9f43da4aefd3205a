//! Request descriptor and template trait

use std::collections::BTreeMap;

/// A single GET request against the catalogue API
///
/// `url` is either a path relative to the client's base URL or an absolute
/// URL. Absolute URLs are sent exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Request {
    /// Relative path or absolute URL
    pub url: String,
    /// Query parameters appended to the URL
    pub query: BTreeMap<String, String>,
    /// Extra request headers
    pub headers: BTreeMap<String, String>,
}

impl Request {
    /// Create a GET request for a URL or path
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Create a GET request for a server-supplied pagination link
    ///
    /// The link already carries host, query and encoding, so nothing is
    /// composed onto it.
    pub fn for_link(link: &str) -> Self {
        Self::get(link)
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Check whether the URL is absolute (http or https)
    pub fn is_absolute(&self) -> bool {
        self.url.starts_with("http://") || self.url.starts_with("https://")
    }
}

/// Builds the seed request for a paginated collection
///
/// Implementations must be pure: every call yields a fresh request equal to
/// the one before, with any page cursor at its initial value.
pub trait RequestTemplate: Send + Sync {
    /// Build the page-zero request
    fn build(&self) -> Request;
}

impl RequestTemplate for Request {
    fn build(&self) -> Request {
        self.clone()
    }
}

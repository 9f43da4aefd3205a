//! HTTP client module
//!
//! Provides the reqwest-backed `RequestExecutor` with retry, rate limiting
//! and backoff.
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Verbatim Links**: Absolute URLs are sent exactly as the server gave them

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, JSON_API_MEDIA_TYPE};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;

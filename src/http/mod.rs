//! HTTP client module
//!
//! Provides the flight status API client used by the collector.
//!
//! # Features
//!
//! - **Single attempt per call**: failures are reported, never retried here
//! - **Rate Limiting**: optional token bucket quota using governor
//! - **Authentication**: API key header via the auth module
//! - **Page source seam**: the collector talks to a `PageSource`, which
//!   the HTTP client implements

mod client;
mod rate_limit;
mod source;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, DEFAULT_BASE_URL};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use source::PageSource;

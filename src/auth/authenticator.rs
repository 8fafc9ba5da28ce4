//! Authenticator implementation
//!
//! Applies an API key credential to outgoing requests.

use super::types::Credential;
use reqwest::RequestBuilder;

/// Header the flight status API reads the key from
pub const DEFAULT_API_KEY_HEADER: &str = "API-Key";

/// Places a credential in a request header
#[derive(Debug, Clone)]
pub struct Authenticator {
    header_name: String,
}

impl Authenticator {
    /// Create an authenticator using the given header name
    pub fn new(header_name: impl Into<String>) -> Self {
        Self {
            header_name: header_name.into(),
        }
    }

    /// Header the credential is written to
    pub fn header_name(&self) -> &str {
        &self.header_name
    }

    /// Apply a credential to a request builder
    pub fn apply(&self, req: RequestBuilder, credential: &Credential) -> RequestBuilder {
        req.header(self.header_name.as_str(), credential.token())
    }
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::new(DEFAULT_API_KEY_HEADER)
    }
}

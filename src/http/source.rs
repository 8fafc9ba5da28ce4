//! Page source trait
//!
//! The collector asks a `PageSource` for one page at a time. The HTTP
//! client is the production implementation.

use super::client::HttpClient;
use crate::auth::Credential;
use crate::error::Result;
use crate::query::EncodedQuery;
use async_trait::async_trait;
use serde_json::Value;

/// Something that can fetch one result page of a query
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch `page` of `query` using `credential`.
    ///
    /// Errors for which [`crate::Error::is_fetch_failure`] holds make the
    /// collector try the next credential.
    async fn fetch_page(
        &self,
        query: &EncodedQuery,
        page: u32,
        credential: &Credential,
    ) -> Result<Value>;
}

#[async_trait]
impl PageSource for HttpClient {
    async fn fetch_page(
        &self,
        query: &EncodedQuery,
        page: u32,
        credential: &Credential,
    ) -> Result<Value> {
        let url = self.page_url(query, page);
        self.get_json(url, credential).await
    }
}

//! Client for the search index.

use reqwest::StatusCode;
use tracing::debug;

use super::SearchRequest;
use crate::auth::ApiKeyCredential;
use crate::error::{Error, Result};

/// Header carrying the search index credential.
pub const SEARCH_KEY_HEADER: &str = "X-TYPESENSE-API-KEY";

/// Collection holding every indexed item.
pub const ITEMS_COLLECTION: &str = "items";

/// Issues search requests against the index.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    base_url: String,
    server_key: String,
}

impl SearchClient {
    /// Creates a client for the index at `base_url`.
    ///
    /// `server_key` is used for searches made on behalf of session users.
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        server_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            server_key: server_key.into(),
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/collections/{}/documents/search",
            self.base_url.trim_end_matches('/'),
            ITEMS_COLLECTION
        )
    }

    /// Searches with the server-held key.
    pub async fn search(&self, request: &SearchRequest) -> Result<serde_json::Value> {
        self.send(request, &self.server_key).await.map_err(|err| match err {
            Failure::Rejected(status) => Error::upstream(
                Some(status.as_u16()),
                format!("Search index rejected the server key ({})", status),
            ),
            Failure::Other(err) => err,
        })
    }

    /// Searches with a caller-supplied key, forwarded verbatim.
    ///
    /// An upstream 401 or 403 becomes [`Error::AuthError`] so the caller sees
    /// the same status whatever the index answered.
    pub async fn search_as(
        &self,
        request: &SearchRequest,
        key: &ApiKeyCredential,
    ) -> Result<serde_json::Value> {
        self.send(request, key.as_str()).await.map_err(|err| match err {
            Failure::Rejected(_) => Error::AuthError("Invalid API key given".to_string()),
            Failure::Other(err) => err,
        })
    }

    async fn send(
        &self,
        request: &SearchRequest,
        key: &str,
    ) -> std::result::Result<serde_json::Value, Failure> {
        let resp = self
            .http
            .get(self.url())
            .header(SEARCH_KEY_HEADER, key)
            .query(&request.query_pairs())
            .send()
            .await
            .map_err(|e| Failure::Other(e.into()))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Failure::Rejected(status));
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(Failure::Other(Error::upstream(
                Some(status.as_u16()),
                format!("Search index returned {}: {}", status, message.trim()),
            )));
        }

        let body = resp.bytes().await.map_err(|e| Failure::Other(e.into()))?;
        let results: serde_json::Value =
            serde_json::from_slice(&body).map_err(|e| Failure::Other(e.into()))?;
        debug!(q = %request.q, "Search complete");
        Ok(results)
    }
}

enum Failure {
    Rejected(StatusCode),
    Other(Error),
}

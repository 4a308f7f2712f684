//! Client for the triplestore's SPARQL endpoint.

use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use tracing::debug;

use super::{build_item_query, Binding, SparqlResults};
use crate::error::{Error, Result};

/// Media type requested from the SPARQL endpoint.
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// User name of the service identity presented to the triplestore.
pub const TRIPLESTORE_USER: &str = "lucos_arachne";

/// Issues queries against the triplestore on behalf of callers.
///
/// Every request carries the server-held basic-auth credential; callers never
/// supply it.
#[derive(Debug, Clone)]
pub struct TriplestoreClient {
    http: reqwest::Client,
    endpoint: String,
    key: String,
}

impl TriplestoreClient {
    /// Creates a client for `endpoint` authenticating with `key`.
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            key: key.into(),
        }
    }

    /// Attaches the service identity to an outbound request.
    pub fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.basic_auth(TRIPLESTORE_USER, Some(&self.key))
    }

    /// Runs a SELECT query and returns its bindings.
    pub async fn select(&self, query: &str) -> Result<Vec<Binding>> {
        let req = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .form(&[("query", query)]);

        let resp = self.authorize(req).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(Error::upstream(
                Some(status.as_u16()),
                format!("Triplestore returned {}: {}", status, message.trim()),
            ));
        }

        let body = resp.bytes().await?;
        let results: SparqlResults = serde_json::from_slice(&body)?;
        debug!(
            rows = results.results.bindings.len(),
            "Triplestore query complete"
        );
        Ok(results.results.bindings)
    }

    /// Forwards a caller's SPARQL protocol request.
    ///
    /// Only the query string, body, `Content-Type` and `Accept` travel
    /// upstream; the caller's own `Authorization` is replaced by the service
    /// identity. The upstream response is returned whatever its status.
    pub async fn forward(
        &self,
        method: Method,
        query: Option<&str>,
        headers: &HeaderMap,
        body: axum::body::Bytes,
    ) -> Result<reqwest::Response> {
        let url = match query {
            Some(query) if !query.is_empty() => format!("{}?{}", self.endpoint, query),
            _ => self.endpoint.clone(),
        };

        let mut req = self.http.request(method, url).body(body);
        for name in [CONTENT_TYPE, ACCEPT] {
            if let Some(value) = headers.get(&name) {
                req = req.header(name, value.clone());
            }
        }

        let resp = self.authorize(req).send().await?;
        debug!(status = %resp.status(), "Proxied SPARQL request");
        Ok(resp)
    }

    /// Fetches every outgoing triple of `uri` with predicate and object labels.
    pub async fn item_bindings(&self, uri: &str) -> Result<Vec<Binding>> {
        self.select(&build_item_query(uri)).await
    }
}

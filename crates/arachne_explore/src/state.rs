//! The shared application state for the Explore server.

use std::sync::Arc;

use crate::auth::CredentialGate;
use crate::error::{Error, Result};
use crate::search::SearchClient;
use crate::server::ExploreConfig;
use crate::sparql::TriplestoreClient;

/// The state accessible by all handlers.
///
/// Everything here is read-only after startup; handlers share nothing else.
#[derive(Clone)]
pub struct AppState {
    /// The configuration the server was started with.
    pub config: Arc<ExploreConfig>,
    /// The credential gate applied to every request.
    pub gate: Arc<CredentialGate>,
    /// Client for the triplestore's SPARQL endpoint.
    pub triplestore: TriplestoreClient,
    /// Client for the search index.
    pub search: SearchClient,
}

impl AppState {
    /// Creates the state for `config`.
    ///
    /// All upstream clients share one connection pool bounded by the
    /// configured upstream timeout.
    pub fn new(config: ExploreConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .user_agent(concat!("arachne_explore/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            gate: Arc::new(CredentialGate::new(config.client_key.clone())),
            triplestore: TriplestoreClient::new(
                http.clone(),
                config.triplestore_url.clone(),
                config.service_key.clone(),
            ),
            search: SearchClient::new(
                http,
                config.search_url.clone(),
                config.service_key.clone(),
            ),
            config: Arc::new(config),
        })
    }
}

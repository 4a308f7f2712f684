//! The Explore API server.

use crate::error::Result;
use crate::rest;
use crate::state::AppState;

use axum::Router;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Deadline applied to every upstream call.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_millis(900);

/// Configuration for the `ExploreServer`.
#[derive(Clone)]
pub struct ExploreConfig {
    /// The host address to bind the server to.
    pub host: String,
    /// The port to listen on.
    pub port: u16,
    /// SPARQL endpoint of the triplestore.
    pub triplestore_url: String,
    /// Base URL of the search index.
    pub search_url: String,
    /// Server-held secret for the triplestore and the search index.
    pub service_key: String,
    /// Secret session callers must present.
    pub client_key: String,
    /// Deadline for each upstream call.
    pub upstream_timeout: Duration,
    /// If `true`, `/basic-search` answers CORS requests.
    pub cors_enabled: bool,
    /// If `true`, HTTP request tracing will be enabled.
    pub tracing: bool,
}

impl Default for ExploreConfig {
    /// Returns a default configuration suitable for local development.
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            triplestore_url: "http://triplestore:3030/arachne/".to_string(),
            search_url: "http://search:8108".to_string(),
            service_key: String::new(),
            client_key: String::new(),
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            cors_enabled: true,
            tracing: true,
        }
    }
}

impl std::fmt::Debug for ExploreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExploreConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("triplestore_url", &self.triplestore_url)
            .field("search_url", &self.search_url)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("cors_enabled", &self.cors_enabled)
            .field("tracing", &self.tracing)
            .finish_non_exhaustive()
    }
}

impl ExploreConfig {
    /// Sets the port for the server to listen on.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the host address for the server.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the triplestore SPARQL endpoint.
    pub fn with_triplestore(mut self, url: impl Into<String>) -> Self {
        self.triplestore_url = url.into();
        self
    }

    /// Sets the search index base URL.
    pub fn with_search(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }

    /// Sets the server-held upstream secret.
    pub fn with_service_key(mut self, key: impl Into<String>) -> Self {
        self.service_key = key.into();
        self
    }

    /// Sets the secret session callers must present.
    pub fn with_client_key(mut self, key: impl Into<String>) -> Self {
        self.client_key = key.into();
        self
    }

    /// Sets the deadline for upstream calls.
    pub fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = timeout;
        self
    }
}

/// The Explore API Server.
pub struct ExploreServer {
    config: ExploreConfig,
    state: AppState,
}

impl ExploreServer {
    /// Creates a new `ExploreServer` for the given configuration.
    pub fn new(config: ExploreConfig) -> Result<Self> {
        let state = AppState::new(config.clone())?;
        Ok(Self { config, state })
    }

    /// Builds the `axum` router, combining all routes and middleware.
    pub fn build_router(&self) -> Router {
        let app = rest::router(self.state.clone(), self.config.cors_enabled);

        if self.config.tracing {
            app.layer(TraceLayer::new_for_http())
        } else {
            app
        }
    }

    fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| crate::error::Error::Internal(format!("Invalid address: {}", e)))
    }

    /// Runs the server indefinitely.
    pub async fn run(self) -> Result<()> {
        let addr = self.addr()?;
        let router = self.build_router();

        info!("Starting Explore server on http://{}", addr);
        info!("Triplestore: {}", self.config.triplestore_url);
        info!("Search index: {}", self.config.search_url);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }

    /// Runs the server with a graceful shutdown signal.
    ///
    /// The server will run until the `shutdown_signal` future completes.
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.addr()?;
        let router = self.build_router();

        info!("Starting Explore server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        info!("Explore server stopped");
        Ok(())
    }
}

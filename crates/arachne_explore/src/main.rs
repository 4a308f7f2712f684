//! Arachne Explore server
//!
//! Entity browser and search gateway over the Arachne triplestore.

use arachne_explore::{ExploreConfig, ExploreServer};
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Arachne Explore server
#[derive(Parser, Debug)]
#[command(name = "arachne-explore")]
#[command(version)]
#[command(about = "Entity browser and search gateway over an RDF triplestore", long_about = None)]
struct Args {
    /// Host to bind to
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// SPARQL endpoint of the triplestore
    #[arg(long, env = "TRIPLESTORE_URL", default_value = "http://triplestore:3030/arachne/")]
    triplestore_url: String,

    /// Base URL of the search index
    #[arg(long, env = "SEARCH_URL", default_value = "http://search:8108")]
    search_url: String,

    /// Secret used against the triplestore and the search index
    #[arg(long, env = "KEY_LUCOS_ARACHNE", hide_env_values = true)]
    service_key: String,

    /// Secret session callers must present
    #[arg(long, env = "CLIENT_KEY", hide_env_values = true)]
    client_key: String,

    /// Upstream timeout in milliseconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_MS", default_value_t = 900)]
    upstream_timeout_ms: u64,

    /// Disable CORS on /basic-search
    #[arg(long)]
    no_cors: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arachne_explore=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = ExploreConfig::default()
        .with_host(args.host)
        .with_port(args.port)
        .with_triplestore(args.triplestore_url)
        .with_search(args.search_url)
        .with_service_key(args.service_key)
        .with_client_key(args.client_key)
        .with_upstream_timeout(Duration::from_millis(args.upstream_timeout_ms));
    config.cors_enabled = !args.no_cors;

    let server = ExploreServer::new(config)?;

    // Set up graceful shutdown
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install CTRL+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutdown signal received");
    };

    server.run_with_shutdown(shutdown_signal).await?;

    Ok(())
}

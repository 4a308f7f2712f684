//! # Arachne Explore
//!
//! Browsable API over an RDF triplestore and a text-search index.
//!
//! ## Features
//!
//! - **Item view**: look up an entity by URI and get its outgoing relationships
//!   grouped by predicate, labelled and sorted for display
//! - **Search**: free-text search with optional type and id filters
//! - **Credential gate**: public, API-key and session route classes
//! - **SPARQL pass-through**: session users query the triplestore without
//!   ever seeing its credential
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     Explore server                        │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │                  Credential gate                    │  │
//! │  └───────┬───────────────────┬─────────────────┬──────┘  │
//! │          │                   │                 │         │
//! │  ┌───────▼───────┐  ┌────────▼───────┐  ┌──────▼──────┐  │
//! │  │ Query builder │  │ Search request │  │ SPARQL proxy│  │
//! │  │ + aggregator  │  │  translator    │  │             │  │
//! │  └───────┬───────┘  └────────┬───────┘  └──────┬──────┘  │
//! └──────────┼───────────────────┼─────────────────┼─────────┘
//!            ▼                   ▼                 ▼
//!       triplestore         search index       triplestore
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use arachne_explore::{ExploreConfig, ExploreServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExploreConfig::default()
//!         .with_port(3000)
//!         .with_service_key("triplestore-secret")
//!         .with_client_key("client-secret");
//!     ExploreServer::new(config)?.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Examples
//!
//! ```bash
//! curl -u "me:client-secret" "http://localhost:3000/item?uri=https://example.org/song/1"
//! curl -H "Authorization: key my-search-key" "http://localhost:3000/basic-search?q=queen&types=Song"
//! ```

pub mod auth;
pub mod entity;
pub mod error;
pub mod rest;
pub mod search;
pub mod server;
pub mod sparql;
pub mod state;

pub use error::{Error, Result};
pub use server::{ExploreConfig, ExploreServer};
pub use state::AppState;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::auth::{ApiKeyCredential, Credential, CredentialGate, RouteClass, Verdict};
    pub use crate::entity::{aggregate, EntityView, ObjectKind, PredicateGroup, ValueView};
    pub use crate::error::{Error, Result};
    pub use crate::search::{SearchMode, SearchParams, SearchRequest};
    pub use crate::server::{ExploreConfig, ExploreServer};
    pub use crate::sparql::{build_item_query, Binding, Term, TermKind};
    pub use crate::state::AppState;
}

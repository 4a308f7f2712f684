//! HTTP endpoints for Explore
//!
//! ## Endpoints
//!
//! ### Public
//! - `GET    /_info` - System information
//!
//! ### API key (`Authorization: key <value>`)
//! - `GET    /basic-search` - Search forwarded with the caller's key (CORS enabled)
//!
//! ### Session
//! - `GET    /` - Endpoint listing
//! - `GET    /item?uri=` - Entity view of one subject
//! - `GET    /search` - Search with the server key
//! - `ANY    /sparql` - Pass-through to the triplestore (`proxy` feature)

mod info;
mod item;
#[cfg(feature = "proxy")]
mod proxy;
mod search;

pub use info::*;
pub use item::*;
#[cfg(feature = "proxy")]
pub use proxy::*;
pub use search::*;

use axum::{
    http::{header, Method},
    middleware,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::auth::{gate_middleware, BASIC_SEARCH_PATH, INFO_PATH};
use crate::state::AppState;

/// Create the router with every route behind the credential gate.
pub fn router(state: AppState, cors_enabled: bool) -> Router {
    let basic_search: Router<AppState> =
        Router::new().route(BASIC_SEARCH_PATH, get(search::basic_search));
    let basic_search = if cors_enabled {
        basic_search.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET])
                .allow_headers([header::AUTHORIZATION]),
        )
    } else {
        basic_search
    };

    let app = Router::new()
        .route(INFO_PATH, get(info::info))
        .route("/", get(info::index))
        .route("/item", get(item::get_item))
        .route("/search", get(search::ui_search))
        .merge(basic_search);

    #[cfg(feature = "proxy")]
    let app = app.route("/sparql", axum::routing::any(proxy::sparql_proxy));

    app.layer(middleware::from_fn_with_state(
        state.clone(),
        gate_middleware,
    ))
    .with_state(state)
}

//! Item endpoint

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::entity::aggregate;
use crate::error::Result;
use crate::state::AppState;

/// Where callers without a subject are sent.
pub const DEFAULT_PAGE: &str = "/";

/// Query parameters for the item endpoint
#[derive(Debug, Deserialize)]
pub struct ItemQuery {
    /// URI of the subject to describe
    pub uri: Option<String>,
}

/// Describe one entity
///
/// GET /item?uri=<URI>
pub async fn get_item(
    State(state): State<AppState>,
    Query(query): Query<ItemQuery>,
) -> Result<Response> {
    let Some(uri) = query.uri.filter(|uri| !uri.is_empty()) else {
        return Ok(Redirect::to(DEFAULT_PAGE).into_response());
    };

    let bindings = state.triplestore.item_bindings(&uri).await?;
    let view = aggregate(&uri, &bindings)?;
    debug!(
        uri = %uri,
        predicates = view.predicates.len(),
        "Built entity view"
    );

    Ok(Json(view).into_response())
}

//! Search endpoints

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use crate::auth::ApiKeyCredential;
use crate::error::Result;
use crate::search::{SearchMode, SearchParams};
use crate::state::AppState;

/// Search on behalf of a session user
///
/// GET /search?q=&page=
pub async fn ui_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<serde_json::Value>> {
    let request = params.into_request(SearchMode::Ui)?;
    let results = state.search.search(&request).await?;
    Ok(Json(results))
}

/// Search with the caller's own key
///
/// GET /basic-search?q=&page=&types=&exclude_types=&ids=
pub async fn basic_search(
    State(state): State<AppState>,
    Extension(key): Extension<ApiKeyCredential>,
    Query(params): Query<SearchParams>,
) -> Result<Json<serde_json::Value>> {
    let request = params.into_request(SearchMode::Raw)?;
    let results = state.search.search_as(&request, &key).await?;
    Ok(Json(results))
}

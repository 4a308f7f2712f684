//! SPARQL pass-through to the triplestore

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Method, Uri},
    response::Response,
};

use crate::error::{Error, Result};
use crate::state::AppState;

/// Forward a SPARQL protocol request
///
/// ANY /sparql
pub async fn sparql_proxy(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let upstream = state
        .triplestore
        .forward(method, uri.query(), &headers, body)
        .await?;

    let mut response = Response::builder().status(upstream.status());
    if let Some(content_type) = upstream.headers().get(header::CONTENT_TYPE) {
        response = response.header(header::CONTENT_TYPE, content_type.clone());
    }

    let body = upstream.bytes().await?;
    response
        .body(Body::from(body))
        .map_err(|e| Error::Internal(format!("Failed to build proxied response: {}", e)))
}

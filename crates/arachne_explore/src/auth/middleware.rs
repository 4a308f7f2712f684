//! Gate middleware

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::credentials::Credential;
use super::gate::{RouteClass, Verdict};
use crate::state::AppState;

/// Realm advertised to browsers when a session credential is missing.
pub const SESSION_REALM: &str = "Basic realm=\"Arachne\"";

/// Runs the credential gate before any handler.
///
/// Accepted credentials are stored in the request extensions: handlers on
/// API-key routes read [`super::ApiKeyCredential`], session routes get
/// [`super::SessionCredential`].
pub async fn gate_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let verdict = state
        .gate
        .evaluate(request.method(), request.uri().path(), request.headers());

    match verdict {
        Verdict::Allowed(credential) => {
            match credential {
                Some(Credential::ApiKey(key)) => {
                    request.extensions_mut().insert(key);
                }
                Some(Credential::Session(session)) => {
                    request.extensions_mut().insert(session);
                }
                None => {}
            }
            next.run(request).await
        }
        Verdict::Rejected(err) => {
            let class = RouteClass::classify(request.method(), request.uri().path());
            let status = err.status_code();
            let mut response = err.into_response();
            if class == RouteClass::Session && status.as_u16() == 401 {
                response.headers_mut().insert(
                    header::WWW_AUTHENTICATE,
                    HeaderValue::from_static(SESSION_REALM),
                );
            }
            response
        }
    }
}

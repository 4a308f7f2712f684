//! Credential extraction and validation

use axum::http::{header, HeaderMap};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use subtle::ConstantTimeEq;

use crate::error::{Error, Result};

/// Scheme callers use for API keys: `Authorization: key <value>`.
pub const API_KEY_SCHEME: &str = "key";

/// A caller-supplied key forwarded unchanged to the search index.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKeyCredential(String);

impl ApiKeyCredential {
    /// The key as presented by the caller.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKeyCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKeyCredential(..)")
    }
}

/// Proof that the caller presented the configured session secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCredential {
    /// User name from Basic credentials, when given.
    pub user: Option<String>,
}

/// A credential accepted by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    Session(SessionCredential),
    ApiKey(ApiKeyCredential),
}

fn authorization(headers: &HeaderMap) -> Result<Option<&str>> {
    headers
        .get(header::AUTHORIZATION)
        .map(|value| {
            value.to_str().map_err(|_| {
                Error::BadRequest("Authorization header is not valid text".to_string())
            })
        })
        .transpose()
}

/// Extracts the pass-through key from `Authorization: key <value>`.
///
/// # Errors
///
/// [`Error::BadRequest`] when the header is missing, has no scheme/value pair
/// or uses another scheme; [`Error::AuthError`] when the key is empty.
pub fn extract_api_key(headers: &HeaderMap) -> Result<ApiKeyCredential> {
    let value = authorization(headers)?
        .ok_or_else(|| Error::BadRequest("Authorization header not set".to_string()))?;

    let (scheme, key) = value.split_once(' ').ok_or_else(|| {
        Error::BadRequest("Authorization header must be of the form `key <api key>`".to_string())
    })?;

    if scheme != API_KEY_SCHEME {
        return Err(Error::BadRequest(format!(
            "Unsupported authorization scheme `{}`, expected `{}`",
            scheme, API_KEY_SCHEME
        )));
    }

    if key.trim().is_empty() {
        return Err(Error::AuthError("No API key given".to_string()));
    }

    Ok(ApiKeyCredential(key.to_string()))
}

/// Checks the caller presented `secret`, either as the password of HTTP Basic
/// credentials or as `Authorization: key <secret>`.
///
/// # Errors
///
/// [`Error::AuthError`] when no credential is given or it does not match.
pub fn validate_session(headers: &HeaderMap, secret: &str) -> Result<SessionCredential> {
    let value = authorization(headers)
        .ok()
        .flatten()
        .ok_or_else(|| Error::AuthError("Authentication required".to_string()))?;

    let (scheme, payload) = value
        .split_once(' ')
        .ok_or_else(|| Error::AuthError("Malformed credentials".to_string()))?;
    let payload = payload.trim();

    let (user, presented) = if scheme.eq_ignore_ascii_case("basic") {
        let decoded = STANDARD
            .decode(payload)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .ok_or_else(|| Error::AuthError("Malformed credentials".to_string()))?;
        match decoded.split_once(':') {
            Some((user, password)) => (Some(user.to_string()), password.to_string()),
            None => return Err(Error::AuthError("Malformed credentials".to_string())),
        }
    } else if scheme == API_KEY_SCHEME {
        (None, payload.to_string())
    } else {
        return Err(Error::AuthError(format!(
            "Unsupported authorization scheme `{}`",
            scheme
        )));
    };

    if secret.is_empty() || !bool::from(presented.as_bytes().ct_eq(secret.as_bytes())) {
        return Err(Error::AuthError("Invalid credentials".to_string()));
    }

    Ok(SessionCredential { user })
}

//! Per-request access decisions
//!
//! Every request is first classified by route, then passed through an ordered
//! list of stages. A stage either lets the request continue to the next stage
//! or short-circuits with a final [`Verdict`].
//!
//! ```text
//! Received ─► classify ─┬─ Public  ─────────────────────────► Allowed
//!                       ├─ ApiKey  ─► extract key ─► validate ─► Allowed | Rejected
//!                       └─ Session ─► validate secret ────────► Allowed | Rejected
//! ```

use axum::http::{HeaderMap, Method};

use super::credentials::{extract_api_key, validate_session, Credential};
use crate::error::Error;

/// Path of the public info endpoint.
pub const INFO_PATH: &str = "/_info";

/// Path of the API-key search endpoint.
pub const BASIC_SEARCH_PATH: &str = "/basic-search";

/// Authentication contract of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// No credential needed.
    Public,
    /// Caller's key is forwarded to the search index.
    ApiKey,
    /// Caller must present the configured session secret.
    Session,
}

impl RouteClass {
    /// Classifies a request by method and path.
    ///
    /// Only the CORS preflight of the search endpoint skips the credential
    /// check; `OPTIONS` anywhere else is held to the route's own class.
    pub fn classify(method: &Method, path: &str) -> Self {
        if path == INFO_PATH || (method == Method::OPTIONS && path == BASIC_SEARCH_PATH) {
            RouteClass::Public
        } else if path == BASIC_SEARCH_PATH {
            RouteClass::ApiKey
        } else {
            RouteClass::Session
        }
    }
}

/// Final decision for a request.
#[derive(Debug)]
pub enum Verdict {
    /// Proceed to the handler, with the credential that was accepted.
    Allowed(Option<Credential>),
    /// Respond with the error without reaching the handler.
    Rejected(Error),
}

/// Result of a single stage.
#[derive(Debug)]
pub enum Flow {
    Continue,
    ShortCircuit(Verdict),
}

/// What a stage can see of the request.
#[derive(Debug)]
pub struct Passage<'a> {
    pub method: &'a Method,
    pub path: &'a str,
    pub headers: &'a HeaderMap,
    pub class: Option<RouteClass>,
    pub credential: Option<Credential>,
}

/// A pipeline stage.
pub type Stage = fn(&mut Passage<'_>, &GateConfig) -> Flow;

/// Configuration the gate checks credentials against.
#[derive(Clone)]
pub struct GateConfig {
    /// Secret session callers must present.
    pub client_key: String,
}

impl std::fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateConfig").finish_non_exhaustive()
    }
}

/// Decides, per request, which credential is required and whether it was given.
#[derive(Clone)]
pub struct CredentialGate {
    config: GateConfig,
    stages: Vec<Stage>,
}

impl CredentialGate {
    /// Creates the gate with the standard stages.
    pub fn new(client_key: impl Into<String>) -> Self {
        Self {
            config: GateConfig {
                client_key: client_key.into(),
            },
            stages: vec![
                classify as Stage,
                allow_public,
                require_api_key,
                require_session,
            ],
        }
    }

    /// Runs every stage in order until one short-circuits.
    pub fn evaluate(&self, method: &Method, path: &str, headers: &HeaderMap) -> Verdict {
        let mut passage = Passage {
            method,
            path,
            headers,
            class: None,
            credential: None,
        };

        for stage in &self.stages {
            if let Flow::ShortCircuit(verdict) = stage(&mut passage, &self.config) {
                return verdict;
            }
        }

        Verdict::Allowed(passage.credential)
    }
}

impl std::fmt::Debug for CredentialGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialGate")
            .field("config", &self.config)
            .field("stages", &self.stages.len())
            .finish()
    }
}

fn classify(passage: &mut Passage<'_>, _: &GateConfig) -> Flow {
    passage.class = Some(RouteClass::classify(passage.method, passage.path));
    Flow::Continue
}

fn allow_public(passage: &mut Passage<'_>, _: &GateConfig) -> Flow {
    match passage.class {
        Some(RouteClass::Public) => Flow::ShortCircuit(Verdict::Allowed(None)),
        _ => Flow::Continue,
    }
}

fn require_api_key(passage: &mut Passage<'_>, _: &GateConfig) -> Flow {
    if passage.class != Some(RouteClass::ApiKey) {
        return Flow::Continue;
    }
    match extract_api_key(passage.headers) {
        Ok(key) => {
            passage.credential = Some(Credential::ApiKey(key));
            Flow::Continue
        }
        Err(err) => Flow::ShortCircuit(Verdict::Rejected(err)),
    }
}

fn require_session(passage: &mut Passage<'_>, config: &GateConfig) -> Flow {
    if passage.class != Some(RouteClass::Session) {
        return Flow::Continue;
    }
    match validate_session(passage.headers, &config.client_key) {
        Ok(session) => {
            passage.credential = Some(Credential::Session(session));
            Flow::Continue
        }
        Err(err) => Flow::ShortCircuit(Verdict::Rejected(err)),
    }
}

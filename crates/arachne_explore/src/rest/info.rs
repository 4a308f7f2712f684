//! Info and index endpoints

use axum::Json;
use serde::Serialize;
use std::collections::BTreeMap;

/// CI metadata reported by `/_info`.
#[derive(Debug, Serialize)]
pub struct CiInfo {
    pub circle: String,
}

/// System information consumed by the monitoring dashboard.
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub system: String,
    pub checks: BTreeMap<String, serde_json::Value>,
    pub metrics: BTreeMap<String, serde_json::Value>,
    pub ci: CiInfo,
    pub network_only: bool,
    pub title: String,
    pub show_on_homepage: bool,
    pub icon: String,
}

/// System information
///
/// GET /_info
pub async fn info() -> Json<InfoResponse> {
    Json(InfoResponse {
        system: "lucos_arachne".to_string(),
        checks: BTreeMap::new(),
        metrics: BTreeMap::new(),
        ci: CiInfo {
            circle: "gh/lucas42/lucos_arachne".to_string(),
        },
        network_only: true,
        title: "Arachne".to_string(),
        show_on_homepage: true,
        icon: "/icon.png".to_string(),
    })
}

/// Endpoint listing returned by the index.
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub title: String,
    pub version: String,
    pub endpoints: Vec<EndpointDto>,
}

/// One endpoint of the service.
#[derive(Debug, Serialize)]
pub struct EndpointDto {
    pub path: &'static str,
    pub description: &'static str,
}

/// Index of the service
///
/// GET /
pub async fn index() -> Json<IndexResponse> {
    let mut endpoints = vec![
        EndpointDto {
            path: "/item?uri=",
            description: "Outgoing relationships of an entity",
        },
        EndpointDto {
            path: "/search?q=&page=",
            description: "Free-text search",
        },
        EndpointDto {
            path: "/basic-search?q=&page=&types=&exclude_types=&ids=",
            description: "Free-text search with an API key",
        },
    ];
    if cfg!(feature = "proxy") {
        endpoints.push(EndpointDto {
            path: "/sparql",
            description: "SPARQL endpoint of the triplestore",
        });
    }

    Json(IndexResponse {
        title: "Arachne".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}

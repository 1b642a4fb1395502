//! Service info and liveness handlers.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Serialize)]
pub struct RootResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub route: &'static str,
    pub description: &'static str,
}

const ENDPOINTS: &[(&str, &str)] = &[
    ("GET /health", "Service liveness check"),
    ("POST /quality", "Score a dataset from its shape metrics"),
    ("POST /quality-from-csv", "Score an uploaded CSV file from its shape metrics"),
    (
        "POST /quality-flags-from-csv",
        "Run every quality heuristic over an uploaded CSV file",
    ),
];

/// Describe the service and its endpoints.
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        service: state.info.name,
        version: state.info.version,
        endpoints: ENDPOINTS
            .iter()
            .map(|&(route, description)| EndpointInfo { route, description })
            .collect(),
    })
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: state.info.name,
    })
}

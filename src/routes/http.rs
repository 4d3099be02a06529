// GET handlers: version and interface counters

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::AppState;
use crate::models::InterfaceRecord;
use crate::netstat::io_counters_all;

/// GET /version: service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

fn no_sample_yet() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, "no sample taken yet").into_response()
}

/// GET /api/interfaces: latest snapshot.
pub(super) async fn interfaces_handler(State(state): State<AppState>) -> Response {
    match state.latest.read().await.as_ref() {
        Some(snapshot) => Json(snapshot.clone()).into_response(),
        None => no_sample_yet(),
    }
}

/// GET /api/interfaces/all: every interface summed into one record.
pub(super) async fn all_handler(State(state): State<AppState>) -> Response {
    match state.latest.read().await.as_ref() {
        Some(snapshot) => Json(io_counters_all(&snapshot.interfaces)).into_response(),
        None => no_sample_yet(),
    }
}

/// GET /api/interfaces/{name}: records with that name. More than one when
/// netstat truncated several interfaces to the same name.
pub(super) async fn interface_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    let guard = state.latest.read().await;
    let Some(snapshot) = guard.as_ref() else {
        return no_sample_yet();
    };
    let matching: Vec<InterfaceRecord> = snapshot
        .interfaces
        .iter()
        .filter(|r| r.name == name)
        .cloned()
        .collect();
    if matching.is_empty() {
        (StatusCode::NOT_FOUND, format!("no interface named {name}")).into_response()
    } else {
        Json(matching).into_response()
    }
}

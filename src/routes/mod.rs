// HTTP + WebSocket routes

mod http;
mod ws;

use axum::{Router, routing::get};
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};

use crate::models::NetworkSnapshot;
use crate::worker::LatestSnapshot;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) stats_tx: broadcast::Sender<NetworkSnapshot>,
    pub(crate) latest: LatestSnapshot,
    pub(crate) ws_network_connections: Arc<AtomicUsize>,
}

pub fn app(
    stats_tx: broadcast::Sender<NetworkSnapshot>,
    latest: LatestSnapshot,
    ws_network_connections: Arc<AtomicUsize>,
) -> Router {
    let state = AppState {
        stats_tx,
        latest,
        ws_network_connections,
    };
    Router::new()
        .route("/", get(|| async { "ifcounters" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/interfaces", get(http::interfaces_handler)) // GET /api/interfaces
        .route("/api/interfaces/all", get(http::all_handler)) // GET /api/interfaces/all
        .route("/api/interfaces/{name}", get(http::interface_handler)) // GET /api/interfaces/{name}
        .route("/ws/network", get(ws::ws_network)) // WS /ws/network
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

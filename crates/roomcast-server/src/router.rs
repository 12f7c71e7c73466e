//! Axum router wiring (HTTP -> WS upgrade).
//!
//! Two upgrade routes, one per endpoint kind, plus liveness.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{routing::get, Router};

use crate::{app_state::AppState, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ws/chat/:room", get(transport::ws::chat_upgrade))
        .route("/ws/presence/:room", get(transport::ws::presence_upgrade))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

use axum::{Json, Router, response::IntoResponse, routing::get};
use serde_json::json;
use util::{config, state::AppState};

use crate::response::ApiResponse;

/// GET /api/health
///
/// Liveness probe; reports the project name and environment.
async fn health() -> impl IntoResponse {
    Json(ApiResponse::success(
        json!({
            "project": config::project_name(),
            "env": config::env(),
        }),
        "Service is healthy",
    ))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}

//! Health check endpoint
//!
//! Reports whether the roster has loaded and, if a load failed, why.

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok" once loaded, "loading" before, "error" after a failed load
    pub status: String,
    /// Module name ("roster-web")
    pub module: String,
    /// Crate version from Cargo.toml
    pub version: String,
    /// Seconds since service started
    pub uptime_seconds: u64,
    /// Indexed member records (0 until loaded)
    pub members: usize,
    /// Last load error, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// GET /health
///
/// Always answers 200; the status field carries the load state.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.startup_time);
    let uptime_seconds = uptime.num_seconds().max(0) as u64;

    let controller = state.controller.read().await;
    let last_error = controller.last_error().map(str::to_string);
    let status = if controller.is_ready() {
        "ok"
    } else if last_error.is_some() {
        "error"
    } else {
        "loading"
    };

    Json(HealthResponse {
        status: status.to_string(),
        module: "roster-web".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
        members: controller.index().map_or(0, |index| index.member_count()),
        last_error,
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

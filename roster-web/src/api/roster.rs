//! Roster JSON API
//!
//! Read-only: these endpoints never change the selected year.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::controller::YearOption;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Year selector contents
#[derive(Debug, Serialize)]
pub struct YearsResponse {
    pub selected: Option<i32>,
    pub years: Vec<YearOption>,
}

/// GET /api/years
pub async fn get_years(State(state): State<AppState>) -> ApiResult<Json<YearsResponse>> {
    let controller = state.controller.read().await;
    Ok(Json(YearsResponse {
        selected: controller.selected_year(),
        years: controller.year_options()?,
    }))
}

/// GET /api/roster/:year
///
/// Officers, members, section visibility and the resolved banner photo.
pub async fn get_roster(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> ApiResult<Json<Value>> {
    let controller = state.controller.read().await;
    let view = controller.view(year)?;
    let body = serde_json::to_value(&view)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize roster: {}", e)))?;
    Ok(Json(body))
}

//! Roster page
//!
//! `GET /` renders the latest year; `GET /?year=Y` renders year Y. The year
//! comes from the request alone, so one visitor's choice never leaks into
//! another visitor's page.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use roster_common::Error;
use serde::Deserialize;

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub year: Option<i32>,
}

/// GET /
pub async fn roster_page(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Response {
    let controller = state.controller.read().await;

    if !controller.is_ready() {
        let html = state.renderer.render_unavailable(controller.last_error());
        return (StatusCode::SERVICE_UNAVAILABLE, Html(html)).into_response();
    }

    let options = match controller.year_options() {
        Ok(options) => options,
        Err(e) => return ApiError::from(e).into_response(),
    };

    let view = controller
        .landing_year()
        .and_then(|latest| controller.view(query.year.unwrap_or(latest)));

    match view {
        Ok(view) => Html(state.renderer.render_page(&options, &view)).into_response(),
        Err(Error::UnknownYear(year)) => (
            StatusCode::NOT_FOUND,
            Html(format!("<!DOCTYPE html><p>No members recorded for {}.</p><a href=\"/\">Back</a>", year)),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

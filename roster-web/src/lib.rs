//! roster-web library - Member roster service
//!
//! Fetches the member and group photo collections once at startup, then
//! serves the roster page and a small JSON API from memory.

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use roster_common::config::RosterConfig;
use roster_common::image::SanityImageUrlBuilder;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod api;
pub mod controller;
pub mod error;
pub mod render;
pub mod source;

use controller::{fetch_index, YearSelectorController};
use render::PageRenderer;
use source::RecordSource;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Year selector; write-locked for selection changes
    pub controller: Arc<RwLock<YearSelectorController>>,
    /// HTML renderer
    pub renderer: Arc<PageRenderer>,
    /// Service start time
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(controller: YearSelectorController, renderer: PageRenderer) -> Self {
        Self {
            controller: Arc::new(RwLock::new(controller)),
            renderer: Arc::new(renderer),
            startup_time: Utc::now(),
        }
    }

    /// State wired from configuration, roster not yet loaded
    pub fn from_config(config: &RosterConfig) -> Self {
        let images = SanityImageUrlBuilder::new(config.project_id.clone(), config.dataset.clone());
        Self::new(
            YearSelectorController::from_config(config),
            PageRenderer::new(Arc::new(images), config.placeholder_image.clone()),
        )
    }
}

/// Load the roster in the background
///
/// Fetching happens without holding the controller lock, so health checks
/// and the loading page keep answering meanwhile.
pub fn spawn_initial_load(state: AppState, source: Arc<dyn RecordSource>) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Fetching roster records");
        let result = fetch_index(source.as_ref()).await;

        let mut controller = state.controller.write().await;
        match result {
            Ok(index) => {
                // Failure is recorded on the controller
                let _ = controller.on_loaded(index);
            }
            Err(e) => controller.report_failure(&e),
        }
    })
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/", get(api::roster_page))
        .route("/api/years", get(api::get_years))
        .route("/api/roster/:year", get(api::get_roster))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

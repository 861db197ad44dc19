//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{OptimizerService, RunStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub optimizer: Arc<OptimizerService>,
    pub store: RunStore,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let config = Arc::new(config);
        Self {
            optimizer: Arc::new(OptimizerService::new(config.clone())),
            config,
            store: RunStore::new(),
        }
    }
}

/// Create application state from an asset loader.
pub fn create_app_state(asset_loader: &AssetLoader) -> AppState {
    AppState::new(AppConfig::load_from_assets(asset_loader))
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/optimize", post(api::handle_optimize))
        .route("/api/last", get(api::handle_last))
        .route("/api/cancel", post(api::handle_cancel))
        .route("/api/simulate", post(api::handle_simulate))
        .route("/api/spaces", get(api::handle_spaces))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async { ApiError::NotFound })
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

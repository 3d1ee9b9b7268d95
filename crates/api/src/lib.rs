//! HTTP API layer with Axum routes for report generation.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - JSON error responses mapped from `AppError`
//! - Binary artifact responses with download headers

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use nexus_core::ReportGenerator;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Validates requests, renders artifacts, and owns the subject directory.
    pub generator: Arc<ReportGenerator>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

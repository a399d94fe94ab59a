//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Session CRUD
        .route("/sessions", get(handlers::list_sessions))
        .route("/sessions", post(handlers::create_session))
        // Teachers
        .route("/teachers", get(handlers::list_teachers))
        .route("/teachers", post(handlers::create_teacher))
        // Timetable import and optimization
        .route("/timetable/import", post(handlers::import_timetable))
        .route("/timetable/optimize", post(handlers::optimize_timetable))
        // Resolution audit log
        .route("/optimization/logs", get(handlers::list_resolution_logs));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

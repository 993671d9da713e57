//! geoasset-api - REST API layer for the GeoAsset service
//!
//! Exposes the asset store over HTTP: multipart upload, listing with an
//! optional company filter, and an SSE change feed.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use geoasset_api::{create_router, ApiConfig, AppState};
//! use geoasset_core::AssetStore;
//!
//! let state = AppState::with_config(Arc::new(AssetStore::new()), ApiConfig::default());
//! let router = create_router(state);
//! axum::serve(listener, router).await?;
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::{ApiConfig, AppState};

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the GeoAsset REST API router with the given application state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = DefaultBodyLimit::max(state.config().max_upload_bytes);

    Router::new()
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Asset routes
        .route(
            "/assets",
            get(handlers::assets::list_assets).post(handlers::assets::upload_assets),
        )
        // Change feed (SSE)
        .route("/assets/events", get(handlers::events::stream_events))
        // Middleware
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

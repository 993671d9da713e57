//! Application state for the GeoAsset API

use std::sync::Arc;

use geoasset_core::{AssetStore, CoordinatePolicy};

/// Default request body limit for uploads (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Tunables for the HTTP layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiConfig {
    /// Largest accepted request body for `POST /assets`
    pub max_upload_bytes: usize,
    /// Coordinate checking applied to uploads
    pub coordinates: CoordinatePolicy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            coordinates: CoordinatePolicy::default(),
        }
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// The one asset store for this process
    store: Arc<AssetStore>,
    config: ApiConfig,
}

impl AppState {
    /// Create a new AppState over `store` with default settings
    pub fn new(store: Arc<AssetStore>) -> Self {
        Self::with_config(store, ApiConfig::default())
    }

    /// Create a new AppState with explicit settings
    pub fn with_config(store: Arc<AssetStore>, config: ApiConfig) -> Self {
        Self { store, config }
    }

    /// Get the asset store
    pub fn store(&self) -> &AssetStore {
        &self.store
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

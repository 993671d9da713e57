//! GeoAsset Client Library
//!
//! Provides a typed HTTP client for the GeoAsset service.
//!
//! # Example
//!
//! ```rust,no_run
//! use geoasset_client::AssetClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AssetClient::new("http://localhost:3000")?;
//!
//!     // Replace acme's assets with the content of a file
//!     let result = client.upload_file("acme", "assets.json").await?;
//!     println!("uploaded {}", result.count);
//!
//!     // Read them back
//!     let assets = client.list_assets(Some("acme")).await?;
//!     println!("{} assets", assets.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module provides utilities for integration testing:
//!
//! ```rust,ignore
//! use geoasset_client::testing::TestServer;
//! use geoasset_api::{create_router, AppState};
//!
//! let server = TestServer::start(create_router(state)).await?;
//! let assets = server.client.list_assets(None).await?;
//! ```

mod client;
mod error;
pub mod feed;
pub mod testing;

pub use client::AssetClient;
pub use error::{AssetClientError, Result};

// Re-export feed types for convenience
pub use feed::{ChangeFeed, FeedError};

// Re-export core types for convenience
pub use geoasset_core::{Asset, StoreEvent, UploadResponse};

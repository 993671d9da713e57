//! Change feed support
//!
//! Follows the server's SSE change feed and yields one [`StoreEvent`] per
//! successful upload.
//!
//! # Example
//!
//! ```no_run
//! use geoasset_client::AssetClient;
//! use futures::StreamExt;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AssetClient::new("http://localhost:3000")?;
//! let mut feed = client.watch(Some("acme")).await?;
//!
//! while let Some(event) = feed.next().await {
//!     println!("{:?}", event?);
//!     // Re-fetch the listing here
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`StoreEvent`]: geoasset_core::StoreEvent

mod parser;
mod change_feed;

pub use change_feed::ChangeFeed;

use thiserror::Error;

/// Errors that can occur while following the change feed
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP/connection error
    #[error("Connection error: {0}")]
    Connection(#[from] reqwest::Error),

    /// Failed to parse an SSE event
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type for feed operations
pub type FeedResult<T> = std::result::Result<T, FeedError>;

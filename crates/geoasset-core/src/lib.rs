//! geoasset-core - Asset model, store and ingestion rules
//!
//! This crate holds everything the GeoAsset service knows about assets,
//! independent of the HTTP layer: the record types, the in-memory
//! [`AssetStore`], payload validation and the ingestion pipeline that ties
//! them together.

pub mod error;
pub mod ingest;
pub mod models;
pub mod store;
pub mod validate;

pub use error::{IngestError, IngestResult, ValidationError};
pub use ingest::{ingest, FilePart, UploadForm};
pub use models::*;
pub use store::AssetStore;
pub use validate::{parse_payload, CoordinatePolicy};

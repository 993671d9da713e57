//! HTTP request handlers for the GeoAsset API

pub mod assets;
pub mod events;

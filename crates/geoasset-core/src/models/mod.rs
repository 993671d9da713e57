//! Shared data models for the GeoAsset service

mod asset;
mod event;

pub use asset::*;
pub use event::*;

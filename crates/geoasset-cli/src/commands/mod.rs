//! Command implementations for geoasset-cli

pub mod list;
pub mod upload;
pub mod watch;

pub use list::list;
pub use upload::upload;
pub use watch::watch;

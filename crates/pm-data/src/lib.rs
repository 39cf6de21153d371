//! GeoJSON loading for proportional-symbol maps

pub mod convert;
pub mod sources;

use thiserror::Error;
use tokio::task::JoinError;

// Re-exports
pub use convert::parse_feature_collection;
pub use sources::{FeatureSource, GeoJsonSource};

/// Errors that can occur while loading feature data
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GeoJSON parsing error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported GeoJSON object: {0}")]
    UnsupportedObject(String),

    #[error("Join error: {0}")]
    Join(#[from] JoinError),
}

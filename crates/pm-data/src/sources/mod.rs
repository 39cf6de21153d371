pub mod geojson_source;

use async_trait::async_trait;
use pm_core::FeatureCollection;

pub use geojson_source::GeoJsonSource;

/// Trait for feature sources
#[async_trait]
pub trait FeatureSource: Send + Sync {
    /// Load every feature into memory
    async fn load(&self) -> anyhow::Result<FeatureCollection>;

    /// Get the source name/path
    fn source_name(&self) -> &str;
}

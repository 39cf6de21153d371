use std::path::{Path, PathBuf};
use async_trait::async_trait;
use pm_core::FeatureCollection;

use super::FeatureSource;
use crate::convert::parse_feature_collection;
use crate::DataError;

/// GeoJSON file on disk
pub struct GeoJsonSource {
    path: PathBuf,
}

impl GeoJsonSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file
    pub async fn read(&self) -> Result<FeatureCollection, DataError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        tracing::debug!("Read {} bytes from {}", text.len(), self.path.display());

        // Parsing large collections is CPU-bound
        let collection = tokio::task::spawn_blocking(move || parse_feature_collection(&text)).await??;

        tracing::info!("Loaded {} features from {}", collection.len(), self.source_name());
        Ok(collection)
    }
}

#[async_trait]
impl FeatureSource for GeoJsonSource {
    async fn load(&self) -> anyhow::Result<FeatureCollection> {
        self.read().await.map_err(|e| e.into())
    }

    fn source_name(&self) -> &str {
        self.path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.geojson")
    }
}

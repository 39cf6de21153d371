//! Demo mode
//! Replays the bundled datasets through the sequence control

use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use tracing::{debug, info};

use pm_core::{ControlEvent, DatasetConfig, FeatureBinding, ViewSession, ViewUpdate};
use pm_data::{FeatureSource, GeoJsonSource};

/// A bundled GeoJSON file and the configuration it is shown with
pub struct DemoDataset {
    pub file: &'static str,
    pub config: DatasetConfig,
}

/// Datasets shipped under `demos/data`
pub fn bundled() -> Vec<DemoDataset> {
    vec![
        DemoDataset {
            file: "Migration.geojson",
            config: DatasetConfig::net_migration(),
        },
        DemoDataset {
            file: "MegaCities.geojson",
            config: DatasetConfig::mega_cities(),
        },
    ]
}

pub fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/data")
}

/// Load a dataset and open a view session on it
pub async fn open(dataset: &DemoDataset, dir: &Path) -> Result<ViewSession> {
    let source = GeoJsonSource::new(dir.join(dataset.file));
    let collection = source.load().await?;

    ViewSession::load(collection, dataset.config.clone())
        .with_context(|| format!("Failed to set up view for {}", source.source_name()))
}

/// Initial view, a full forward cycle, a wrap backwards, a slider jump and a reset
pub fn replay(session: &mut ViewSession) -> Result<Vec<ViewUpdate>> {
    let count = session.attributes().len();
    let mut updates = vec![session.render()];

    for _ in 0..count {
        updates.push(session.handle(ControlEvent::Forward)?);
    }
    updates.push(session.handle(ControlEvent::Reverse)?);
    updates.push(session.handle(ControlEvent::SliderInput(count / 2))?);
    updates.push(session.reset());

    for update in &updates {
        log_update(update);
    }
    Ok(updates)
}

fn log_update(update: &ViewUpdate) {
    info!(
        "[{}/{}] '{}': {} symbols drawn, {} skipped",
        update.index,
        update.slider.max,
        update.attribute,
        update.rendered_count(),
        update.skipped_count()
    );

    for binding in &update.bindings {
        match binding {
            FeatureBinding::Rendered(attrs) => {
                debug!("  r={:.2} {}", attrs.radius, attrs.label.popup_text().replace('\n', " | "));
            }
            FeatureBinding::Skipped(err) => debug!("  skipped: {}", err),
        }
    }

    if let Some(legend) = &update.legend {
        let rows: Vec<&str> = legend.symbols.iter().map(|s| s.text.as_str()).collect();
        info!("  legend '{}': {}", legend.heading, rows.join(" / "));
    }
}

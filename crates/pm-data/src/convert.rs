//! GeoJSON to core feature model

use geojson::GeoJson;
use pm_core::{Feature, FeatureCollection, PropertyValue};

use crate::DataError;

/// Parse GeoJSON text into a feature collection.
///
/// A bare feature becomes a one-feature collection; a bare geometry has no
/// properties to map and is rejected.
pub fn parse_feature_collection(text: &str) -> Result<FeatureCollection, DataError> {
    let parsed: GeoJson = text.parse()?;

    let features = match parsed {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => {
            return Err(DataError::UnsupportedObject("bare geometry".to_string()))
        }
    };

    features
        .into_iter()
        .map(convert_feature)
        .collect::<Result<Vec<_>, _>>()
        .map(FeatureCollection::new)
}

fn convert_feature(feature: geojson::Feature) -> Result<Feature, DataError> {
    let properties = feature
        .properties
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| (key, PropertyValue::from(value)))
        .collect();

    let mut converted = Feature::new(properties);
    if let Some(geometry) = feature.geometry {
        converted = converted.with_geometry(serde_json::to_value(&geometry)?);
    }
    Ok(converted)
}

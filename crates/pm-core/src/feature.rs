//! In-memory feature model
//!
//! A trimmed-down view of a GeoJSON feature: ordered properties and an opaque
//! geometry that only the rendering side looks at.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
    Null,
}

impl PropertyValue {
    /// Numeric reading of the value.
    ///
    /// Text is trimmed and parsed; empty text, `null` and non-finite results
    /// are not numeric.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            PropertyValue::Number(n) => *n,
            PropertyValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()?
            }
            PropertyValue::Null => return None,
        };

        value.is_finite().then_some(value)
    }

    /// Text used when the value is printed in a label
    pub fn display_text(&self) -> String {
        match self {
            PropertyValue::Number(n) => n.to_string(),
            PropertyValue::Text(s) => s.clone(),
            PropertyValue::Null => String::new(),
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<serde_json::Value> for PropertyValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => PropertyValue::Null,
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => PropertyValue::Number(f),
                None => PropertyValue::Text(n.to_string()),
            },
            serde_json::Value::String(s) => PropertyValue::Text(s),
            other => PropertyValue::Text(other.to_string()),
        }
    }
}

/// Ordered property mapping; iteration follows source insertion order
pub type Properties = IndexMap<String, PropertyValue>;

/// A geographic feature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub properties: Properties,
    /// Geometry as read from the source, untouched by the core
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<serde_json::Value>,
}

impl Feature {
    pub fn new(properties: Properties) -> Self {
        Self {
            properties,
            geometry: None,
        }
    }

    /// Attach a geometry
    pub fn with_geometry(mut self, geometry: serde_json::Value) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Numeric value of `key`, if present and numeric
    pub fn number(&self, key: &str) -> Option<f64> {
        self.property(key).and_then(PropertyValue::as_number)
    }
}

/// Ordered sequence of features
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn first(&self) -> Option<&Feature> {
        self.features.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

/// Build a [`Properties`] map from key/value pairs, keeping their order
pub fn properties<K, V, I>(pairs: I) -> Properties
where
    K: Into<String>,
    V: Into<PropertyValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_reading() {
        assert_eq!(PropertyValue::Number(-10.0).as_number(), Some(-10.0));
        assert_eq!(PropertyValue::from(" 12.5 ").as_number(), Some(12.5));
        assert_eq!(PropertyValue::from("").as_number(), None);
        assert_eq!(PropertyValue::from("Haiti").as_number(), None);
        assert_eq!(PropertyValue::Null.as_number(), None);
        assert_eq!(PropertyValue::from("NaN").as_number(), None);
    }

    #[test]
    fn test_properties_keep_insertion_order() {
        let props = properties([
            ("Country", PropertyValue::from("X")),
            ("1960", PropertyValue::from(5.0)),
            ("1965", PropertyValue::from(7.0)),
        ]);
        let keys: Vec<_> = props.keys().cloned().collect();
        assert_eq!(keys, vec!["Country", "1960", "1965"]);
    }

    #[test]
    fn test_json_conversion() {
        assert_eq!(
            PropertyValue::from(serde_json::json!(3)),
            PropertyValue::Number(3.0)
        );
        assert_eq!(
            PropertyValue::from(serde_json::json!(true)),
            PropertyValue::Text("true".to_string())
        );
        assert_eq!(PropertyValue::from(serde_json::Value::Null), PropertyValue::Null);
    }
}

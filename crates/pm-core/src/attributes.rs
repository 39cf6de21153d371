//! Time-series attribute extraction
//!
//! Every feature is assumed to share the first feature's property schema.
//! That assumption is not checked; only the first feature's keys are read.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SymbolError};
use crate::feature::FeatureCollection;

/// Ordered list of time-series attribute keys
pub type AttributeList = Vec<String>;

/// Decides whether a property key names a time-series attribute
pub trait AttributePredicate {
    fn matches(&self, key: &str) -> bool;
}

impl<F> AttributePredicate for F
where
    F: Fn(&str) -> bool,
{
    fn matches(&self, key: &str) -> bool {
        self(key)
    }
}

/// Built-in attribute rules that can live in a dataset configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttributeRule {
    /// The whole key parses as a number, e.g. `"1965"`
    NumericKey,
    /// The key contains a marker substring, e.g. `"Pop"` in `"Pop_2005"`
    ContainsMarker { marker: String },
}

impl AttributeRule {
    pub fn contains(marker: impl Into<String>) -> Self {
        AttributeRule::ContainsMarker {
            marker: marker.into(),
        }
    }
}

impl Default for AttributeRule {
    fn default() -> Self {
        AttributeRule::NumericKey
    }
}

impl AttributePredicate for AttributeRule {
    fn matches(&self, key: &str) -> bool {
        match self {
            AttributeRule::NumericKey => is_numeric_key(key),
            AttributeRule::ContainsMarker { marker } => key.contains(marker.as_str()),
        }
    }
}

fn is_numeric_key(key: &str) -> bool {
    let trimmed = key.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().map_or(false, f64::is_finite)
}

/// Derive the attribute list from the first feature of `collection`
pub fn extract<P>(collection: &FeatureCollection, predicate: &P) -> Result<AttributeList>
where
    P: AttributePredicate + ?Sized,
{
    let first = collection.first().ok_or(SymbolError::EmptyCollection)?;

    let attributes: AttributeList = first
        .properties
        .keys()
        .filter(|key| predicate.matches(key))
        .cloned()
        .collect();

    if attributes.is_empty() {
        tracing::warn!(
            "None of {} property keys matched the attribute rule",
            first.properties.len()
        );
        return Err(SymbolError::NoMatchingAttributes);
    }

    tracing::debug!("Extracted {} attributes: {:?}", attributes.len(), attributes);
    Ok(attributes)
}

//! Legend statistics and layout

use serde::{Deserialize, Serialize};

use crate::binder::LabelTemplate;
use crate::error::{Result, SymbolError};
use crate::feature::FeatureCollection;
use crate::radius::RadiusModel;

/// Summary of the active attribute across all loaded features
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendStats {
    pub max: f64,
    /// Midpoint of the range, `(max + min) / 2`, not the average of the values
    pub mean: f64,
    pub min: f64,
}

impl LegendStats {
    /// Values in legend order: max, mean, min
    pub fn entries(&self) -> [(LegendRow, f64); 3] {
        [
            (LegendRow::Max, self.max),
            (LegendRow::Mean, self.mean),
            (LegendRow::Min, self.min),
        ]
    }
}

/// Scan `collection` for the range of `attribute`.
///
/// Missing and non-numeric values are skipped. Fails when the collection is
/// empty or no feature carries a numeric value.
pub fn summarize(collection: &FeatureCollection, attribute: &str) -> Result<LegendStats> {
    if collection.is_empty() {
        return Err(SymbolError::NoFeatures);
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut counted = 0usize;

    for value in collection.iter().filter_map(|f| f.number(attribute)) {
        min = min.min(value);
        max = max.max(value);
        counted += 1;
    }

    if counted == 0 {
        tracing::warn!("No feature has a numeric value for '{}'", attribute);
        return Err(SymbolError::NoFeatures);
    }

    tracing::debug!(
        "Legend for '{}' from {} of {} features: min={}, max={}",
        attribute,
        counted,
        collection.len(),
        min,
        max
    );

    Ok(LegendStats {
        max,
        mean: (max + min) / 2.0,
        min,
    })
}

/// Which legend row a symbol belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendRow {
    Max,
    Mean,
    Min,
}

/// Placement constants for the nested-circle legend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendLayout {
    pub width: f64,
    pub height: f64,
    /// Circle centre x
    pub circle_x: f64,
    /// Bottom edge shared by all circles; centres sit one radius above it
    pub baseline: f64,
    pub text_x: f64,
    /// Text y for the max, mean and min rows
    pub text_rows: [f64; 3],
}

impl Default for LegendLayout {
    fn default() -> Self {
        Self {
            width: 160.0,
            height: 60.0,
            circle_x: 40.0,
            baseline: 40.0,
            text_x: 65.0,
            text_rows: [20.0, 40.0, 60.0],
        }
    }
}

/// One circle plus its caption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendSymbol {
    pub row: LegendRow,
    pub value: f64,
    /// `None` when the value has no radius under the dataset's scale factor
    pub radius: Option<f64>,
    pub cx: f64,
    pub cy: f64,
    pub text_x: f64,
    pub text_y: f64,
    pub text: String,
}

/// Full legend for the active attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    /// e.g. `Net migration in 1965`
    pub heading: String,
    pub stats: LegendStats,
    pub symbols: Vec<LegendSymbol>,
}

/// Builds legends for one dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegendModel {
    pub radius: RadiusModel,
    pub template: LabelTemplate,
    pub layout: LegendLayout,
}

impl LegendModel {
    pub fn new(radius: RadiusModel, template: LabelTemplate, layout: LegendLayout) -> Self {
        Self {
            radius,
            template,
            layout,
        }
    }

    pub fn summarize(&self, collection: &FeatureCollection, attribute: &str) -> Result<LegendStats> {
        summarize(collection, attribute)
    }

    /// Summarize and lay out the legend for `attribute`
    pub fn build(&self, collection: &FeatureCollection, attribute: &str) -> Result<Legend> {
        let stats = summarize(collection, attribute)?;

        let symbols = stats
            .entries()
            .into_iter()
            .zip(self.layout.text_rows)
            .map(|((row, value), text_y)| {
                let radius = match self.radius.radius(value) {
                    Ok(r) => Some(r),
                    Err(err) => {
                        tracing::warn!("Legend {:?} circle not drawn: {}", row, err);
                        None
                    }
                };

                LegendSymbol {
                    row,
                    value,
                    radius,
                    cx: self.layout.circle_x,
                    cy: self.layout.baseline - radius.unwrap_or(0.0),
                    text_x: self.layout.text_x,
                    text_y,
                    text: self.template.with_unit_suffix(&round_hundredths(value).to_string()),
                }
            })
            .collect();

        Ok(Legend {
            heading: self.template.heading(attribute),
            stats,
            symbols,
        })
    }
}

/// Two-decimal rounding with halves going towards positive infinity
fn round_hundredths(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{properties, Feature, PropertyValue};

    fn collection(values: &[f64]) -> FeatureCollection {
        values
            .iter()
            .map(|v| Feature::new(properties([("1965", *v)])))
            .collect()
    }

    #[test]
    fn test_midpoint_stats() {
        let stats = summarize(&collection(&[-10.0, -40.0, -25.0]), "1965").unwrap();
        assert_eq!(stats, LegendStats { max: -10.0, mean: -25.0, min: -40.0 });
    }

    #[test]
    fn test_mean_is_midpoint_not_average() {
        let stats = summarize(&collection(&[0.0, 1.0, 1.0, 10.0]), "1965").unwrap();
        assert_eq!(stats.mean, 5.0);
    }

    #[test]
    fn test_idempotent_and_order_independent() {
        let forward = collection(&[3.0, 9.5, -2.0, 7.0, 0.5]);
        let shuffled = collection(&[7.0, -2.0, 0.5, 9.5, 3.0]);

        let first = summarize(&forward, "1965").unwrap();
        assert_eq!(first, summarize(&forward, "1965").unwrap());
        assert_eq!(first, summarize(&shuffled, "1965").unwrap());
    }

    #[test]
    fn test_missing_and_non_numeric_values_are_skipped() {
        let mut features = collection(&[-10.0, -40.0]).features;
        features.push(Feature::new(properties([("1960", -99.0)])));
        features.push(Feature::new(properties([("1965", PropertyValue::from("n/a"))])));
        let stats = summarize(&FeatureCollection::new(features), "1965").unwrap();

        assert_eq!(stats.max, -10.0);
        assert_eq!(stats.min, -40.0);
    }

    #[test]
    fn test_no_features() {
        assert_eq!(summarize(&FeatureCollection::default(), "1965"), Err(SymbolError::NoFeatures));
        assert_eq!(summarize(&collection(&[1.0]), "1970"), Err(SymbolError::NoFeatures));
    }

    #[test]
    fn test_legend_layout() {
        let model = LegendModel::new(
            RadiusModel::new(-0.002),
            LabelTemplate::new("Country", "Net migration").with_unit("million"),
            LegendLayout::default(),
        );
        let legend = model.build(&collection(&[-10.0, -40.0, -25.0]), "1965").unwrap();

        assert_eq!(legend.heading, "Net migration in 1965");
        assert_eq!(legend.symbols.len(), 3);

        let max = &legend.symbols[0];
        assert_eq!(max.row, LegendRow::Max);
        assert_eq!(max.text, "-10 million");
        assert_eq!(max.text_y, 20.0);

        let min = &legend.symbols[2];
        let r = min.radius.unwrap();
        assert!((r - 0.1596).abs() < 1e-4);
        assert_eq!(min.cy, 40.0 - r);
        assert_eq!(min.text_y, 60.0);
    }

    #[test]
    fn test_undrawable_legend_circle() {
        let model = LegendModel::new(
            RadiusModel::new(-0.002),
            LabelTemplate::default(),
            LegendLayout::default(),
        );
        let legend = model.build(&collection(&[5.0, -5.0]), "1965").unwrap();

        assert_eq!(legend.symbols[0].radius, None);
        assert_eq!(legend.symbols[0].cy, 40.0);
        assert_eq!(legend.symbols[1].radius, Some(0.0));
        assert!(legend.symbols[2].radius.is_some());
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_hundredths(1.234), 1.23);
        assert_eq!(round_hundredths(-2.5), -2.5);
        assert_eq!(round_hundredths(18.456), 18.46);
    }
}

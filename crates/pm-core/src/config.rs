//! Dataset configuration

use serde::{Deserialize, Serialize};

use crate::attributes::AttributeRule;
use crate::binder::{FeatureLayerBinder, LabelTemplate, PeriodRule};
use crate::feature::Feature;
use crate::legend::{LegendLayout, LegendModel};
use crate::radius::RadiusModel;

/// Keeps features whose numeric `key` is strictly above `threshold`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureFilter {
    pub key: String,
    pub threshold: f64,
}

impl FeatureFilter {
    pub fn greater_than(key: impl Into<String>, threshold: f64) -> Self {
        Self {
            key: key.into(),
            threshold,
        }
    }

    /// Features without a numeric value for the key are dropped
    pub fn accepts(&self, feature: &Feature) -> bool {
        feature
            .number(&self.key)
            .map_or(false, |value| value > self.threshold)
    }
}

/// Everything that varies between datasets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub name: String,
    pub attribute_rule: AttributeRule,
    pub scale_factor: f64,
    pub label: LabelTemplate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FeatureFilter>,
    #[serde(default)]
    pub legend: LegendLayout,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            name: "dataset".to_string(),
            attribute_rule: AttributeRule::default(),
            scale_factor: 1.0,
            label: LabelTemplate::default(),
            filter: None,
            legend: LegendLayout::default(),
        }
    }
}

impl DatasetConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute_rule(mut self, rule: AttributeRule) -> Self {
        self.attribute_rule = rule;
        self
    }

    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_label(mut self, label: LabelTemplate) -> Self {
        self.label = label;
        self
    }

    pub fn with_filter(mut self, filter: FeatureFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_legend(mut self, legend: LegendLayout) -> Self {
        self.legend = legend;
        self
    }

    /// Year-keyed net migration by country, in negative values
    pub fn net_migration() -> Self {
        Self::new("net_migration")
            .with_attribute_rule(AttributeRule::NumericKey)
            .with_scale_factor(-0.002)
            .with_label(LabelTemplate::new("Country", "Net migration").with_unit("million"))
    }

    /// City populations keyed `Pop_<year>`, limited to the largest cities
    pub fn mega_cities() -> Self {
        Self::new("mega_cities")
            .with_attribute_rule(AttributeRule::contains("Pop"))
            .with_scale_factor(50.0)
            .with_label(
                LabelTemplate::new("City", "Population")
                    .with_unit("million")
                    .with_period(PeriodRule::token("_", 1)),
            )
            .with_filter(FeatureFilter::greater_than("Pop_2005", 16.0))
    }

    pub fn radius_model(&self) -> RadiusModel {
        RadiusModel::new(self.scale_factor)
    }

    pub fn binder(&self) -> FeatureLayerBinder {
        FeatureLayerBinder::new(self.radius_model(), self.label.clone())
    }

    pub fn legend_model(&self) -> LegendModel {
        LegendModel::new(self.radius_model(), self.label.clone(), self.legend.clone())
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

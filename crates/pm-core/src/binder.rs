//! Per-feature symbol binding
//!
//! For the active attribute, each feature gets a circle radius and the text
//! shown in its popup and in the side panel.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SymbolError};
use crate::feature::{Feature, FeatureCollection};
use crate::radius::RadiusModel;

/// How the human-readable period is read out of an attribute key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PeriodRule {
    /// The key is the period, e.g. `"1965"`
    WholeKey,
    /// One token of the key split on `separator`, e.g. token 1 of `"Pop_2005"`
    Token { separator: String, position: usize },
    /// The run of digits ending the key
    TrailingDigits,
}

impl PeriodRule {
    pub fn token(separator: impl Into<String>, position: usize) -> Self {
        PeriodRule::Token {
            separator: separator.into(),
            position,
        }
    }

    /// Period text for `key`; falls back to the whole key when nothing matches
    pub fn period(&self, key: &str) -> String {
        let period = match self {
            PeriodRule::WholeKey => {
                return match key.trim().parse::<f64>() {
                    Ok(n) if n.is_finite() => n.to_string(),
                    _ => key.to_string(),
                }
            }
            PeriodRule::Token { separator, position } => key
                .split(separator.as_str())
                .nth(*position)
                .unwrap_or_default(),
            PeriodRule::TrailingDigits => {
                let digits = key
                    .chars()
                    .rev()
                    .take_while(|c| c.is_ascii_digit())
                    .count();
                &key[key.len() - digits..]
            }
        };

        if period.is_empty() {
            key.to_string()
        } else {
            period.to_string()
        }
    }
}

impl Default for PeriodRule {
    fn default() -> Self {
        PeriodRule::WholeKey
    }
}

/// Label formatting for one dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelTemplate {
    /// Property holding the feature's name
    pub name_field: String,
    /// Caption printed before the name
    pub name_caption: String,
    /// Caption printed before the period, e.g. "Population"
    pub value_caption: String,
    /// Suffix printed after values, e.g. "million"
    pub unit: String,
    pub period: PeriodRule,
}

impl LabelTemplate {
    pub fn new(name_field: impl Into<String>, value_caption: impl Into<String>) -> Self {
        let name_field = name_field.into();
        Self {
            name_caption: name_field.clone(),
            name_field,
            value_caption: value_caption.into(),
            unit: String::new(),
            period: PeriodRule::default(),
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_period(mut self, period: PeriodRule) -> Self {
        self.period = period;
        self
    }

    pub fn with_name_caption(mut self, caption: impl Into<String>) -> Self {
        self.name_caption = caption.into();
        self
    }

    /// `"<value caption> in <period>"`, also used as the legend heading
    pub fn heading(&self, attribute: &str) -> String {
        format!("{} in {}", self.value_caption, self.period.period(attribute))
    }

    /// Value followed by the unit, when there is one
    pub fn with_unit_suffix(&self, value: &str) -> String {
        if self.unit.is_empty() {
            value.to_string()
        } else {
            format!("{} {}", value, self.unit)
        }
    }
}

impl Default for LabelTemplate {
    fn default() -> Self {
        Self::new("name", "Value")
    }
}

/// Text attached to a single symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolLabel {
    /// Bare feature name
    pub name: String,
    /// Captioned name, e.g. `Country: Haiti`
    pub title: String,
    /// e.g. `Net migration in 1965: -35000 million`
    pub detail: String,
}

impl SymbolLabel {
    /// Short form for the hover popup
    pub fn popup_text(&self) -> String {
        format!("{}\n{}", self.name, self.detail)
    }

    /// Full form for the side panel
    pub fn panel_text(&self) -> String {
        format!("{}\n{}", self.title, self.detail)
    }
}

impl fmt::Display for SymbolLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.panel_text())
    }
}

/// Everything the map layer needs to draw one feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderAttributes {
    pub attribute: String,
    pub value: f64,
    pub radius: f64,
    pub label: SymbolLabel,
    /// Popup anchor relative to the circle centre, in pixels
    pub popup_offset: (f64, f64),
}

/// Outcome of binding one feature
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureBinding {
    Rendered(RenderAttributes),
    /// The feature stays unstyled for this attribute
    Skipped(SymbolError),
}

impl FeatureBinding {
    pub fn rendered(&self) -> Option<&RenderAttributes> {
        match self {
            FeatureBinding::Rendered(attrs) => Some(attrs),
            FeatureBinding::Skipped(_) => None,
        }
    }
}

/// Binds features to the active attribute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureLayerBinder {
    pub radius: RadiusModel,
    pub template: LabelTemplate,
}

impl FeatureLayerBinder {
    pub fn new(radius: RadiusModel, template: LabelTemplate) -> Self {
        Self { radius, template }
    }

    /// Radius and label of `feature` for `attribute`
    pub fn bind(&self, feature: &Feature, attribute: &str) -> Result<RenderAttributes> {
        let raw = feature
            .property(attribute)
            .ok_or_else(|| SymbolError::MissingAttribute(attribute.to_string()))?;
        let value = raw
            .as_number()
            .ok_or_else(|| SymbolError::NonNumericAttribute(attribute.to_string()))?;
        let radius = self.radius.radius(value)?;

        let name = feature
            .property(&self.template.name_field)
            .map(|v| v.display_text())
            .unwrap_or_default();
        let label = SymbolLabel {
            title: format!("{}: {}", self.template.name_caption, name),
            detail: format!(
                "{}: {}",
                self.template.heading(attribute),
                self.template.with_unit_suffix(&raw.display_text())
            ),
            name,
        };

        Ok(RenderAttributes {
            attribute: attribute.to_string(),
            value,
            radius,
            label,
            popup_offset: (0.0, -radius),
        })
    }

    /// Bind every feature, recording the ones that cannot be drawn
    pub fn bind_all(&self, collection: &FeatureCollection, attribute: &str) -> Vec<FeatureBinding> {
        let bindings: Vec<FeatureBinding> = collection
            .iter()
            .map(|feature| match self.bind(feature, attribute) {
                Ok(attrs) => FeatureBinding::Rendered(attrs),
                Err(err) => FeatureBinding::Skipped(err),
            })
            .collect();

        let skipped = bindings
            .iter()
            .filter(|b| matches!(b, FeatureBinding::Skipped(_)))
            .count();
        if skipped > 0 {
            tracing::warn!(
                "Skipped {} of {} features for attribute '{}'",
                skipped,
                bindings.len(),
                attribute
            );
        }

        bindings
    }
}

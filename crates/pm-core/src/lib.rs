//! Core model for proportional-symbol maps
//!
//! This crate turns a loaded feature collection into the data a map layer
//! needs to draw proportional circles over a time series: the ordered list of
//! time-series attributes, a wrapping cursor over them, per-feature radii and
//! labels, and the legend for the active attribute.

pub mod attributes;
pub mod binder;
pub mod config;
pub mod error;
pub mod events;
pub mod feature;
pub mod legend;
pub mod navigation;
pub mod radius;
pub mod session;

// Re-export commonly used types
pub use attributes::{extract, AttributeList, AttributePredicate, AttributeRule};
pub use binder::{FeatureBinding, FeatureLayerBinder, LabelTemplate, PeriodRule, RenderAttributes, SymbolLabel};
pub use config::{DatasetConfig, FeatureFilter};
pub use error::{Result, SymbolError};
pub use events::ControlEvent;
pub use feature::{Feature, FeatureCollection, Properties, PropertyValue};
pub use legend::{summarize, Legend, LegendLayout, LegendModel, LegendRow, LegendStats, LegendSymbol};
pub use navigation::{Direction, SliderState, SymbolIndex};
pub use radius::{radius, RadiusModel};
pub use session::{ViewSession, ViewUpdate};

//! View session
//!
//! Owns one loaded dataset and its sequence cursor. Every control event is
//! answered with a [`ViewUpdate`] the map layer applies; the session itself
//! never draws anything.

use crate::attributes::{self, AttributeList};
use crate::binder::{FeatureBinding, FeatureLayerBinder};
use crate::config::DatasetConfig;
use crate::error::{Result, SymbolError};
use crate::events::ControlEvent;
use crate::feature::FeatureCollection;
use crate::legend::{Legend, LegendModel};
use crate::navigation::{Direction, SliderState, SymbolIndex};

/// State the map layer needs after each event
#[derive(Debug, Clone, PartialEq)]
pub struct ViewUpdate {
    pub attribute: String,
    pub index: usize,
    pub slider: SliderState,
    /// One entry per visible feature, in collection order
    pub bindings: Vec<FeatureBinding>,
    /// `None` when no visible feature has a value for the attribute
    pub legend: Option<Legend>,
}

impl ViewUpdate {
    pub fn rendered_count(&self) -> usize {
        self.bindings.iter().filter(|b| b.rendered().is_some()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.bindings.len() - self.rendered_count()
    }
}

/// One dataset on one map
#[derive(Debug, Clone)]
pub struct ViewSession {
    config: DatasetConfig,
    features: FeatureCollection,
    attributes: AttributeList,
    index: SymbolIndex,
    binder: FeatureLayerBinder,
    legend: LegendModel,
}

impl ViewSession {
    /// Set up a session for a freshly loaded collection.
    ///
    /// Attributes come from the unfiltered collection; the configured feature
    /// filter then decides which features are shown.
    pub fn load(collection: FeatureCollection, config: DatasetConfig) -> Result<Self> {
        let attributes = attributes::extract(&collection, &config.attribute_rule)?;

        let total = collection.len();
        let features: FeatureCollection = match &config.filter {
            Some(filter) => collection
                .features
                .into_iter()
                .filter(|f| filter.accepts(f))
                .collect(),
            None => collection,
        };

        if features.is_empty() {
            tracing::warn!("Filter removed all {} features of '{}'", total, config.name);
            return Err(SymbolError::NoFeatures);
        }

        tracing::info!(
            "Loaded '{}': {} of {} features, {} attributes",
            config.name,
            features.len(),
            total,
            attributes.len()
        );

        Ok(Self {
            index: SymbolIndex::new(attributes.len()),
            binder: config.binder(),
            legend: config.legend_model(),
            config,
            features,
            attributes,
        })
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Features that passed the filter
    pub fn features(&self) -> &FeatureCollection {
        &self.features
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn index(&self) -> usize {
        self.index.current()
    }

    pub fn slider(&self) -> SliderState {
        self.index.slider()
    }

    pub fn current_attribute(&self) -> &str {
        // load guarantees a non-empty list and the index stays in range
        &self.attributes[self.index.current()]
    }

    /// Apply one control event and return the resulting view
    pub fn handle(&mut self, event: ControlEvent) -> Result<ViewUpdate> {
        match event {
            ControlEvent::Forward => self.index.step(Direction::Forward)?,
            ControlEvent::Reverse => self.index.step(Direction::Reverse)?,
            ControlEvent::SliderInput(position) => self.index.seek(position)?,
        };

        tracing::debug!(
            "{:?} -> attribute '{}' ({})",
            event,
            self.current_attribute(),
            self.index.current()
        );
        Ok(self.render())
    }

    pub fn step(&mut self, direction: Direction) -> Result<ViewUpdate> {
        self.handle(direction.into())
    }

    /// Back to the first attribute
    pub fn reset(&mut self) -> ViewUpdate {
        self.index.reset();
        self.render()
    }

    /// View for the current attribute
    pub fn render(&self) -> ViewUpdate {
        let attribute = self.current_attribute();

        let legend = match self.legend.build(&self.features, attribute) {
            Ok(legend) => Some(legend),
            Err(err) => {
                tracing::warn!("No legend for '{}': {}", attribute, err);
                None
            }
        };

        ViewUpdate {
            attribute: attribute.to_string(),
            index: self.index.current(),
            slider: self.index.slider(),
            bindings: self.binder.bind_all(&self.features, attribute),
            legend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{properties, Feature, PropertyValue};

    fn migration() -> FeatureCollection {
        FeatureCollection::new(vec![
            Feature::new(properties([
                ("Country", PropertyValue::from("A")),
                ("1960", PropertyValue::from(-10.0)),
                ("1965", PropertyValue::from(-12.0)),
                ("1970", PropertyValue::from(-30.0)),
            ])),
            Feature::new(properties([
                ("Country", PropertyValue::from("B")),
                ("1960", PropertyValue::from(-40.0)),
                ("1965", PropertyValue::from(-4.0)),
            ])),
            Feature::new(properties([
                ("Country", PropertyValue::from("C")),
                ("1960", PropertyValue::from(-25.0)),
                ("1965", PropertyValue::from(-8.0)),
                ("1970", PropertyValue::from(-20.0)),
            ])),
        ])
    }

    #[test]
    fn test_initial_render() {
        let session = ViewSession::load(migration(), DatasetConfig::net_migration()).unwrap();
        assert_eq!(session.attributes(), ["1960", "1965", "1970"]);

        let view = session.render();
        assert_eq!(view.attribute, "1960");
        assert_eq!(view.index, 0);
        assert_eq!(view.rendered_count(), 3);

        let legend = view.legend.unwrap();
        assert_eq!(legend.stats.max, -10.0);
        assert_eq!(legend.stats.min, -40.0);
        assert_eq!(legend.stats.mean, -25.0);
    }

    #[test]
    fn test_missing_attribute_skipped_everywhere() {
        let mut session = ViewSession::load(migration(), DatasetConfig::net_migration()).unwrap();

        let view = session.handle(ControlEvent::Reverse).unwrap();
        assert_eq!(view.attribute, "1970");
        assert_eq!(view.index, 2);
        assert_eq!(view.skipped_count(), 1);
        assert_eq!(
            view.bindings[1],
            FeatureBinding::Skipped(SymbolError::MissingAttribute("1970".to_string()))
        );

        let stats = view.legend.unwrap().stats;
        assert_eq!((stats.max, stats.min), (-20.0, -30.0));
    }

    #[test]
    fn test_buttons_and_slider() {
        let mut session = ViewSession::load(migration(), DatasetConfig::net_migration()).unwrap();

        assert_eq!(session.handle(ControlEvent::Forward).unwrap().attribute, "1965");
        assert_eq!(session.handle(ControlEvent::Forward).unwrap().attribute, "1970");
        assert_eq!(session.handle(ControlEvent::Forward).unwrap().attribute, "1960");

        let view = session.handle(ControlEvent::SliderInput(2)).unwrap();
        assert_eq!(view.slider.value, 2);
        assert_eq!(view.slider.max, 2);

        let err = session.handle(ControlEvent::SliderInput(3)).unwrap_err();
        assert_eq!(err, SymbolError::PositionOutOfRange { position: 3, len: 3 });
        assert_eq!(session.current_attribute(), "1970");

        assert_eq!(session.reset().attribute, "1960");
    }

    #[test]
    fn test_filter_applies_after_extraction() {
        let cities = FeatureCollection::new(vec![
            Feature::new(properties([
                ("City", PropertyValue::from("Small")),
                ("Pop_1985", PropertyValue::from(5.0)),
                ("Pop_2005", PropertyValue::from(8.0)),
            ])),
            Feature::new(properties([
                ("City", PropertyValue::from("Tokyo")),
                ("Pop_1985", PropertyValue::from(30.3)),
                ("Pop_2005", PropertyValue::from(35.3)),
            ])),
        ]);

        let session = ViewSession::load(cities, DatasetConfig::mega_cities()).unwrap();
        assert_eq!(session.attributes(), ["Pop_1985", "Pop_2005"]);
        assert_eq!(session.features().len(), 1);

        let view = session.render();
        let attrs = view.bindings[0].rendered().unwrap();
        assert_eq!(attrs.label.title, "City: Tokyo");
        assert_eq!(attrs.label.detail, "Population in 1985: 30.3 million");
    }

    #[test]
    fn test_structural_errors_surface_at_load() {
        let err = ViewSession::load(FeatureCollection::default(), DatasetConfig::net_migration())
            .unwrap_err();
        assert_eq!(err, SymbolError::EmptyCollection);

        let no_years = FeatureCollection::new(vec![Feature::new(properties([("Country", "X")]))]);
        let err = ViewSession::load(no_years, DatasetConfig::net_migration()).unwrap_err();
        assert_eq!(err, SymbolError::NoMatchingAttributes);

        let tiny = FeatureCollection::new(vec![Feature::new(properties([("Pop_2005", 1.0)]))]);
        let err = ViewSession::load(tiny, DatasetConfig::mega_cities()).unwrap_err();
        assert_eq!(err, SymbolError::NoFeatures);
    }
}

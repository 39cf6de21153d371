use thiserror::Error;

/// Errors that can occur while building or stepping a proportional-symbol view
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SymbolError {
    #[error("Feature collection contains no features")]
    EmptyCollection,

    #[error("No property key of the first feature matches the attribute rule")]
    NoMatchingAttributes,

    #[error("Radius undefined for value {value} with scale factor {scale_factor} (area {area})")]
    InvalidRadius {
        value: f64,
        scale_factor: f64,
        area: f64,
    },

    #[error("Cannot step an empty attribute index")]
    EmptyIndex,

    #[error("Position {position} out of bounds (attribute count: {len})")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("Feature has no attribute '{0}'")]
    MissingAttribute(String),

    #[error("Attribute '{0}' is not numeric")]
    NonNumericAttribute(String),

    #[error("No features to summarize")]
    NoFeatures,
}

impl SymbolError {
    /// Whether the error concerns a single feature and the view can go on without it
    pub fn is_per_feature(&self) -> bool {
        matches!(
            self,
            SymbolError::MissingAttribute(_)
                | SymbolError::NonNumericAttribute(_)
                | SymbolError::InvalidRadius { .. }
        )
    }
}

pub type Result<T, E = SymbolError> = std::result::Result<T, E>;

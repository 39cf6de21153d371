use serde::{Deserialize, Serialize};

mod index;

pub use index::SymbolIndex;

/// Direction of a single sequence step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Towards the next attribute ("skip" button)
    Forward,
    /// Towards the previous attribute ("reverse" button)
    Reverse,
}

/// Range-input state for the sequence control slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderState {
    pub min: usize,
    pub max: usize,
    pub step: usize,
    pub value: usize,
}

//! Sequence-control input events

use serde::{Deserialize, Serialize};

use crate::navigation::Direction;

/// Input coming from the sequence control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlEvent {
    /// "Skip" button
    Forward,
    /// "Reverse" button
    Reverse,
    /// Slider dragged to a position
    SliderInput(usize),
}

impl From<Direction> for ControlEvent {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Forward => ControlEvent::Forward,
            Direction::Reverse => ControlEvent::Reverse,
        }
    }
}

//! Attribute cursor with wraparound

use super::{Direction, SliderState};
use crate::error::{Result, SymbolError};

/// Cursor over an attribute list of fixed length.
///
/// The position only ever moves by single wrapping steps; `reset` returns it
/// to the first attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolIndex {
    position: usize,
    len: usize,
}

impl SymbolIndex {
    /// Create a cursor at position 0 over `len` attributes
    pub fn new(len: usize) -> Self {
        Self { position: 0, len }
    }

    pub fn current(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Move one attribute in `direction`, wrapping at either end
    pub fn step(&mut self, direction: Direction) -> Result<usize> {
        if self.len == 0 {
            return Err(SymbolError::EmptyIndex);
        }

        self.position = match direction {
            Direction::Forward => (self.position + 1) % self.len,
            Direction::Reverse => (self.position + self.len - 1) % self.len,
        };
        Ok(self.position)
    }

    /// Walk to `target` by single steps, taking the shorter way round.
    ///
    /// Returns the number of steps taken. Out-of-range targets leave the
    /// cursor where it was.
    pub fn seek(&mut self, target: usize) -> Result<usize> {
        if self.len == 0 {
            return Err(SymbolError::EmptyIndex);
        }
        if target >= self.len {
            return Err(SymbolError::PositionOutOfRange {
                position: target,
                len: self.len,
            });
        }

        let forward = (target + self.len - self.position) % self.len;
        let (direction, steps) = if forward <= self.len - forward {
            (Direction::Forward, forward)
        } else {
            (Direction::Reverse, self.len - forward)
        };

        for _ in 0..steps {
            self.step(direction)?;
        }
        Ok(steps)
    }

    /// Slider bounds mirroring the cursor
    pub fn slider(&self) -> SliderState {
        SliderState {
            min: 0,
            max: self.len.saturating_sub(1),
            step: 1,
            value: self.position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraparound_both_ends() {
        let mut index = SymbolIndex::new(12);
        assert_eq!(index.current(), 0);

        assert_eq!(index.step(Direction::Reverse).unwrap(), 11);
        assert_eq!(index.step(Direction::Forward).unwrap(), 0);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        for len in 1..=13 {
            for start in 0..len {
                let mut index = SymbolIndex::new(len);
                index.seek(start).unwrap();

                for _ in 0..len {
                    index.step(Direction::Forward).unwrap();
                }
                assert_eq!(index.current(), start);

                for _ in 0..len {
                    index.step(Direction::Reverse).unwrap();
                }
                assert_eq!(index.current(), start);
            }
        }
    }

    #[test]
    fn test_single_attribute_stays_put() {
        let mut index = SymbolIndex::new(1);
        assert_eq!(index.step(Direction::Forward).unwrap(), 0);
        assert_eq!(index.step(Direction::Reverse).unwrap(), 0);
    }

    #[test]
    fn test_empty_index() {
        let mut index = SymbolIndex::new(0);
        assert_eq!(index.step(Direction::Forward), Err(SymbolError::EmptyIndex));
        assert_eq!(index.seek(0), Err(SymbolError::EmptyIndex));
    }

    #[test]
    fn test_seek_takes_shorter_way() {
        let mut index = SymbolIndex::new(7);
        assert_eq!(index.seek(6).unwrap(), 1);
        assert_eq!(index.current(), 6);
        assert_eq!(index.seek(2).unwrap(), 3);
        assert_eq!(index.current(), 2);
        assert_eq!(index.seek(2).unwrap(), 0);
    }

    #[test]
    fn test_seek_out_of_range() {
        let mut index = SymbolIndex::new(7);
        index.step(Direction::Forward).unwrap();

        let err = index.seek(7).unwrap_err();
        assert_eq!(err, SymbolError::PositionOutOfRange { position: 7, len: 7 });
        assert_eq!(index.current(), 1);
    }

    #[test]
    fn test_reset_and_slider() {
        let mut index = SymbolIndex::new(12);
        index.step(Direction::Reverse).unwrap();

        let slider = index.slider();
        assert_eq!(slider, SliderState { min: 0, max: 11, step: 1, value: 11 });

        index.reset();
        assert_eq!(index.current(), 0);
    }
}

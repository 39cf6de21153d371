//! Proportional symbol sizing
//!
//! Circle area grows linearly with the attribute value, so the radius grows
//! with its square root.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{Result, SymbolError};

/// Radius of the circle whose area is `value * scale_factor`.
///
/// Negative scale factors are meant for datasets whose values are themselves
/// negative; a negative area means the signs disagree and has no radius.
pub fn radius(value: f64, scale_factor: f64) -> Result<f64> {
    let area = value * scale_factor;
    if !area.is_finite() || area < 0.0 {
        return Err(SymbolError::InvalidRadius {
            value,
            scale_factor,
            area,
        });
    }
    // -0.0 from a zero value and a negative scale
    if area == 0.0 {
        return Ok(0.0);
    }

    Ok((area / PI).sqrt())
}

/// Per-dataset radius scaling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusModel {
    pub scale_factor: f64,
}

impl RadiusModel {
    pub fn new(scale_factor: f64) -> Self {
        Self { scale_factor }
    }

    pub fn radius(&self, value: f64) -> Result<f64> {
        radius(value, self.scale_factor)
    }
}

impl Default for RadiusModel {
    fn default() -> Self {
        Self { scale_factor: 1.0 }
    }
}

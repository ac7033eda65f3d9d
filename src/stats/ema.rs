//! Debiased exponential moving average

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Window used by [`ExponentialMovingAverage::default`]
pub const DEFAULT_WINDOW: f64 = 50.0;

/// Exponential moving average with startup bias correction
///
/// With rate `r = 1/window` and `m = 1 - r`, each update computes
/// `average ← m·average + r·value` and `debias ← m·debias + r`, and the
/// reported value is `average / debias`. A window of 1 keeps only the
/// latest value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExponentialMovingAverage {
    rate: f64,
    average: f64,
    debias: f64,
}

impl ExponentialMovingAverage {
    /// # Errors
    ///
    /// [`Error::InvalidWindow`] unless `window` is a whole number ≥ 1.
    pub fn new(window: f64) -> Result<Self> {
        if !window.is_finite() || window < 1.0 || window.fract() != 0.0 {
            return Err(Error::InvalidWindow { window });
        }
        Ok(Self { rate: 1.0 / window, average: 0.0, debias: 0.0 })
    }

    /// Fold in `value` and return the debiased average
    pub fn update(&mut self, value: f64) -> f64 {
        // m rounds to 1.0 for huge windows; r stays positive so debias does too
        let m = self.momentum();
        self.average = m * self.average + self.rate * value;
        self.debias = m * self.debias + self.rate;
        self.value()
    }

    /// Debiased average; NaN before the first update
    pub fn value(&self) -> f64 {
        self.average / self.debias
    }

    /// Decay applied to the previous average, `1 - 1/window`
    pub fn momentum(&self) -> f64 {
        1.0 - self.rate
    }
}

impl Default for ExponentialMovingAverage {
    fn default() -> Self {
        Self { rate: 1.0 / DEFAULT_WINDOW, average: 0.0, debias: 0.0 }
    }
}

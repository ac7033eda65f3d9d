//! Weighted average

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Running weighted mean: `Σ wᵢ·vᵢ / Σ wᵢ`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightedAverage {
    numer: f64,
    denom: f64,
}

impl WeightedAverage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` with `weight` and return the updated mean
    ///
    /// # Errors
    ///
    /// [`Error::InvalidWeight`] for a negative or NaN weight. The average is
    /// left untouched.
    pub fn update(&mut self, value: f64, weight: f64) -> Result<f64> {
        if !(weight >= 0.0) {
            return Err(Error::InvalidWeight { weight });
        }
        self.numer += weight * value;
        self.denom += weight;
        Ok(self.value())
    }

    /// Add `value` with weight 1
    pub fn record(&mut self, value: f64) -> f64 {
        self.numer += value;
        self.denom += 1.0;
        self.value()
    }

    /// Current mean; NaN until a positive weight has been added
    pub fn value(&self) -> f64 {
        self.numer / self.denom
    }

    /// Total weight seen so far
    pub fn weight(&self) -> f64 {
        self.denom
    }
}

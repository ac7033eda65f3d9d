//! Incremental averages for losses and metrics
//!
//! - [`WeightedAverage`] - mean of values weighted by e.g. batch size
//! - [`ExponentialMovingAverage`] - debiased running average over a window

mod ema;
mod weighted;

#[cfg(test)]
mod tests;

pub use ema::{ExponentialMovingAverage, DEFAULT_WINDOW};
pub use weighted::WeightedAverage;

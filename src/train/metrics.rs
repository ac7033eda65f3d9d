//! Evaluation metrics computed per batch

use ndarray::ArrayView1;

/// Trait for evaluation metrics
///
/// Predictions and targets have the same length; the runner checks this
/// before calling [`Metric::compute`].
pub trait Metric {
    /// Compute the metric over one batch
    fn compute(&self, predictions: ArrayView1<'_, f64>, targets: ArrayView1<'_, f64>) -> f64;

    /// Column name used when reporting
    fn name(&self) -> &str;
}

/// Share of predictions that round to their target label
#[derive(Debug, Clone, Copy, Default)]
pub struct Accuracy;

impl Metric for Accuracy {
    fn compute(&self, predictions: ArrayView1<'_, f64>, targets: ArrayView1<'_, f64>) -> f64 {
        if predictions.is_empty() {
            return 0.0;
        }
        let correct = predictions
            .iter()
            .zip(targets.iter())
            .filter(|(p, t)| p.round() == **t)
            .count();
        correct as f64 / predictions.len() as f64
    }

    fn name(&self) -> &str {
        "accuracy"
    }
}

/// Mean absolute error
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanAbsoluteError;

impl Metric for MeanAbsoluteError {
    fn compute(&self, predictions: ArrayView1<'_, f64>, targets: ArrayView1<'_, f64>) -> f64 {
        if predictions.is_empty() {
            return 0.0;
        }
        let total: f64 = predictions.iter().zip(targets.iter()).map(|(p, t)| (p - t).abs()).sum();
        total / predictions.len() as f64
    }

    fn name(&self) -> &str {
        "mae"
    }
}

/// A named closure as a metric
pub struct FnMetric<F> {
    name: String,
    f: F,
}

impl<F> FnMetric<F>
where
    F: Fn(ArrayView1<'_, f64>, ArrayView1<'_, f64>) -> f64,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self { name: name.into(), f }
    }
}

impl<F> Metric for FnMetric<F>
where
    F: Fn(ArrayView1<'_, f64>, ArrayView1<'_, f64>) -> f64,
{
    fn compute(&self, predictions: ArrayView1<'_, f64>, targets: ArrayView1<'_, f64>) -> f64 {
        (self.f)(predictions, targets)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

//! Batch execution lifecycle for training and validation

use super::batch::{Batch, BatchLayout};
use super::metrics::Metric;
use super::report::EpochReport;
use crate::error::{Error, Result};
use crate::hyperparams::HyperparamSink;
use crate::sched::Schedule;
use crate::stats::{ExponentialMovingAverage, WeightedAverage};
use ndarray::Array1;

/// Whether the model is being trained or evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Train,
    Eval,
}

/// Loss and predictions for one batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutput {
    pub loss: f64,
    pub predictions: Array1<f64>,
}

/// A model plus optimizer that can run a batch
///
/// Implementations compute predictions and loss for a batch and, when
/// `with_step` is set, backpropagate and take one optimizer step.
pub trait BatchExecutor {
    fn run(&mut self, batch: &Batch, with_step: bool) -> Result<BatchOutput>;

    /// The optimizer's programmable hyperparameters
    fn hyperparams(&mut self) -> &mut dyn HyperparamSink;

    /// Switch between training and evaluation behavior (dropout etc.)
    fn set_phase(&mut self, _phase: Phase) {}

    /// Clear per-epoch state, e.g. recurrent hidden state
    fn reset(&mut self) {}
}

/// Runs batches through an executor and keeps its schedule in step
///
/// The schedule is stepped once after every optimizer step.
pub struct Manager<E> {
    executor: E,
    schedule: Schedule,
    metrics: Vec<Box<dyn Metric>>,
    layout: BatchLayout,
    running_loss: ExponentialMovingAverage,
}

impl<E: BatchExecutor> Manager<E> {
    /// A manager with the nop schedule, no metrics and batch-first inputs
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            schedule: Schedule::nop(),
            metrics: Vec::new(),
            layout: BatchLayout::BatchFirst,
            running_loss: ExponentialMovingAverage::default(),
        }
    }

    /// Replace the nop schedule
    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Metrics computed by [`Manager::eval_runner`], in column order
    pub fn with_metrics(mut self, metrics: Vec<Box<dyn Metric>>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Which input axis holds the batch
    pub fn with_layout(mut self, layout: BatchLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Window of the running loss returned by [`TrackedRunner::run`]
    /// (default [`DEFAULT_WINDOW`](crate::stats::DEFAULT_WINDOW))
    ///
    /// # Errors
    ///
    /// [`Error::InvalidWindow`] unless `window` is a whole number ≥ 1.
    pub fn with_ema_window(mut self, window: f64) -> Result<Self> {
        self.running_loss = ExponentialMovingAverage::new(window)?;
        Ok(self)
    }

    pub fn set_schedule(&mut self, schedule: Schedule) {
        self.schedule = schedule;
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    pub fn into_executor(self) -> E {
        self.executor
    }

    pub fn layout(&self) -> BatchLayout {
        self.layout
    }

    pub fn metric_names(&self) -> Vec<&str> {
        self.metrics.iter().map(|m| m.name()).collect()
    }

    /// Start the schedule, applying its step-0 values
    pub fn init_training(&mut self) -> Result<()> {
        self.schedule.init_training(self.executor.hyperparams())
    }

    /// Run one batch, stepping the schedule if an optimizer step was taken
    pub fn step(&mut self, batch: &Batch, with_step: bool) -> Result<BatchOutput> {
        let output = self.executor.run(batch, with_step)?;
        if with_step {
            self.schedule.step(self.executor.hyperparams())?;
        }
        Ok(output)
    }

    /// Runner that takes optimizer steps and skips metrics
    pub fn train_runner(&mut self) -> TrackedRunner<'_, E> {
        self.executor.set_phase(Phase::Train);
        self.make_runner(true, false)
    }

    /// Runner that computes metrics without touching the weights
    pub fn eval_runner(&mut self) -> TrackedRunner<'_, E> {
        self.executor.set_phase(Phase::Eval);
        self.make_runner(false, true)
    }

    fn make_runner(&mut self, with_step: bool, with_metrics: bool) -> TrackedRunner<'_, E> {
        self.executor.reset();
        let n_metrics = if with_metrics { self.metrics.len() } else { 0 };
        let running_loss = self.running_loss;
        TrackedRunner {
            manager: self,
            with_step,
            with_metrics,
            avg_loss: WeightedAverage::new(),
            avg_metrics: vec![WeightedAverage::new(); n_metrics],
            running_loss,
        }
    }
}

/// Tracks average loss and metrics across the lifetime of a runner
///
/// Averages are weighted by batch size.
pub struct TrackedRunner<'a, E> {
    manager: &'a mut Manager<E>,
    with_step: bool,
    with_metrics: bool,
    avg_loss: WeightedAverage,
    avg_metrics: Vec<WeightedAverage>,
    running_loss: ExponentialMovingAverage,
}

impl<E: BatchExecutor> TrackedRunner<'_, E> {
    /// Run one batch and return the running (EMA) loss
    ///
    /// # Errors
    ///
    /// [`Error::SizeMismatch`] when a metric runner gets predictions whose
    /// length differs from the targets. The schedule and the averages are
    /// left as they were.
    pub fn run(&mut self, batch: &Batch) -> Result<f64> {
        let manager = &mut *self.manager;
        let output = manager.executor.run(batch, self.with_step)?;
        if self.with_metrics && output.predictions.len() != batch.targets.len() {
            return Err(Error::SizeMismatch {
                param: "predictions".to_string(),
                got: output.predictions.len(),
                expected: batch.targets.len(),
            });
        }
        if self.with_step {
            manager.schedule.step(manager.executor.hyperparams())?;
        }

        let weight = batch.size(manager.layout) as f64;
        self.avg_loss.update(output.loss, weight)?;
        if self.with_metrics {
            for (average, metric) in self.avg_metrics.iter_mut().zip(&manager.metrics) {
                let value = metric.compute(output.predictions.view(), batch.targets.view());
                average.update(value, weight)?;
            }
        }

        Ok(self.running_loss.update(output.loss))
    }

    /// Average loss and metrics over every batch run so far
    pub fn report(&self) -> EpochReport {
        EpochReport {
            loss: self.avg_loss.value(),
            metrics: self.avg_metrics.iter().map(WeightedAverage::value).collect(),
        }
    }

    /// Whether this runner takes optimizer steps
    pub fn with_step(&self) -> bool {
        self.with_step
    }
}

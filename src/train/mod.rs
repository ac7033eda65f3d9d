//! Batch tracking and the epoch loop
//!
//! This module glues a model to the schedule engine:
//! - [`BatchExecutor`] - the model/optimizer pair, supplied by the caller
//! - [`Manager`] - runs batches and steps the schedule after each optimizer step
//! - [`TrackedRunner`] - averages loss and metrics over an epoch
//! - [`fit`] / [`fit_and_finish`] - the epoch loop
//! - [`EpochReporter`] - where per-epoch results go
//!
//! # Example
//!
//! ```no_run
//! use kerosene::train::{fit, Batch, BatchExecutor, Manager, MeanAbsoluteError, TableReporter};
//! # fn demo<E: BatchExecutor>(executor: E, train: Vec<Batch>, val: Vec<Batch>) -> kerosene::Result<()> {
//! let mut manager = Manager::new(executor).with_metrics(vec![Box::new(MeanAbsoluteError)]);
//! let mut reporter = TableReporter::new(std::io::stdout());
//! let last = fit(&mut manager, &train, &val, 10, &mut reporter)?;
//! println!("final validation loss: {}", last.loss);
//! # Ok(())
//! # }
//! ```

mod batch;
mod fit;
mod metrics;
mod report;
mod runner;


pub use batch::{Batch, BatchLayout};
pub use fit::{fit, fit_and_finish, run_epoch, FINISH_MOMENTUMS};
pub use metrics::{Accuracy, FnMetric, MeanAbsoluteError, Metric};
pub use report::{format_row, format_value, EpochReport, EpochReporter, LogReporter, TableReporter};
pub use runner::{BatchExecutor, BatchOutput, Manager, Phase, TrackedRunner};

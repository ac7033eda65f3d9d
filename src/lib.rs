//! Kerosene: programmable hyperparameter schedules for training loops
//!
//! - [`shape`] - composable curves over training progress `[0, 1]`
//! - [`sched`] - schedules that push curve values into an optimizer
//! - [`hyperparams`] - the optimizer-side sink and in-memory parameter groups
//! - [`stats`] - weighted and exponential moving averages
//! - [`train`] - batch tracking and the epoch loop
//! - [`config`] - YAML plans
//!
//! # Example
//!
//! ```
//! use kerosene::hyperparams::{MomentumTerm, ParamGroups};
//! use kerosene::sched::{OneCycleOptions, Schedule};
//!
//! let mut groups = ParamGroups::make(1, MomentumTerm::Classic { momentum: 0.9 }, 0.1, 0.0)?;
//! let mut schedule = Schedule::one_cycle(&groups, 100, OneCycleOptions::default())?;
//! schedule.init_training(&mut groups)?;
//! for _ in 0..100 {
//!     // optimizer.step() ...
//!     schedule.step(&mut groups)?;
//! }
//! assert!(groups.lrs()[0] < 0.001);
//! # Ok::<(), kerosene::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod hyperparams;
pub mod sched;
pub mod shape;
pub mod stats;
pub mod train;

pub use error::{Error, ErrorKind, Result};
pub use hyperparams::{GroupValues, Hyperparam, HyperparamSink, ParamGroups};
pub use sched::Schedule;
pub use shape::Shape;
pub use stats::{ExponentialMovingAverage, WeightedAverage};

//! Programmable optimizer hyperparameters
//!
//! Schedules do not own an optimizer; they push values through the narrow
//! [`HyperparamSink`] capability. A sink exposes one value per parameter
//! group for each of the hyperparameters in [`Hyperparam`].
//!
//! [`ParamGroups`] is the in-memory sink used by the CLI and the tests.

mod groups;


pub use groups::{MomentumTerm, OptimizerKind, ParamGroup, ParamGroups};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hyperparameters a schedule can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hyperparam {
    /// Learning rate
    Lr,
    /// Momentum, or the first-moment coefficient of Adam-style optimizers
    Momentum,
    /// Weight decay applied directly to the weights
    Wd,
}

impl Hyperparam {
    /// All hyperparameters, in application order
    pub const ALL: [Hyperparam; 3] = [Hyperparam::Lr, Hyperparam::Momentum, Hyperparam::Wd];

    /// Short name used in configs and output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lr => "lr",
            Self::Momentum => "momentum",
            Self::Wd => "wd",
        }
    }
}

impl fmt::Display for Hyperparam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Hyperparam {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lr" => Ok(Self::Lr),
            "momentum" => Ok(Self::Momentum),
            "wd" => Ok(Self::Wd),
            other => Err(Error::UnsupportedParameter { name: other.to_string() }),
        }
    }
}

/// Values for a hyperparameter: one for every group, or one per group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupValues {
    /// The same value for every group
    Broadcast(f64),
    /// One value per group, in group order
    PerGroup(Vec<f64>),
}

impl GroupValues {
    /// Expand to exactly `groups` values
    ///
    /// A single-element list broadcasts like a scalar.
    ///
    /// # Errors
    ///
    /// [`Error::SizeMismatch`] if a list has neither one nor `groups` entries.
    pub fn expand(&self, param: &str, groups: usize) -> Result<Vec<f64>> {
        match self {
            Self::Broadcast(value) => Ok(vec![*value; groups]),
            Self::PerGroup(values) if values.len() == 1 => Ok(vec![values[0]; groups]),
            Self::PerGroup(values) if values.len() == groups => Ok(values.clone()),
            Self::PerGroup(values) => Err(Error::SizeMismatch {
                param: param.to_string(),
                got: values.len(),
                expected: groups,
            }),
        }
    }
}

impl From<f64> for GroupValues {
    fn from(value: f64) -> Self {
        Self::Broadcast(value)
    }
}

impl From<Vec<f64>> for GroupValues {
    fn from(values: Vec<f64>) -> Self {
        Self::PerGroup(values)
    }
}

impl From<&[f64]> for GroupValues {
    fn from(values: &[f64]) -> Self {
        Self::PerGroup(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for GroupValues {
    fn from(values: [f64; N]) -> Self {
        Self::PerGroup(values.to_vec())
    }
}

/// Get/set access to an optimizer's hyperparameters, per parameter group
pub trait HyperparamSink {
    /// Number of parameter groups
    fn num_groups(&self) -> usize;

    /// Current values of `param`, one per group
    fn get(&self, param: Hyperparam) -> Result<Vec<f64>>;

    /// Set `param` for every group
    ///
    /// # Errors
    ///
    /// [`Error::SizeMismatch`] if per-group values do not match the groups.
    fn set(&mut self, param: Hyperparam, values: GroupValues) -> Result<()>;
}

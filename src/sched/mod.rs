//! Hyperparameter schedules
//!
//! A [`Schedule`] maps training progress to hyperparameter values. It holds
//! one [`Shape`] per driven hyperparameter, a total step count `nb` and a
//! step counter, and pushes `shape(iter / nb)` into a [`HyperparamSink`] on
//! [`Schedule::init_training`] and on every [`Schedule::step`]:
//! - `lr` - initial learning rate of each group × shape value
//! - `momentum` - shape value, broadcast
//! - `wd` - shape value, broadcast, as decoupled weight decay
//!
//! Like the learning rate schedulers it generalizes, a schedule does not own
//! the optimizer; the sink is passed to each call.
//!
//! # Example
//!
//! ```
//! use kerosene::hyperparams::{MomentumTerm, ParamGroups};
//! use kerosene::sched::{CurveOptions, Schedule};
//!
//! let mut groups = ParamGroups::make(2, MomentumTerm::Classic { momentum: 0.9 }, [1.0, 2.0], 0.0)?;
//! let mut schedule = Schedule::clr(&groups, 4, CurveOptions::default().with_lr_factor(2.0))?;
//!
//! schedule.init_training(&mut groups)?;
//! assert_eq!(groups.lrs(), vec![0.5, 1.0]);
//! schedule.step(&mut groups)?;
//! assert_eq!(groups.lrs(), vec![0.75, 1.5]);
//! # Ok::<(), kerosene::Error>(())
//! ```

mod builders;


pub use builders::{CurveOptions, OneCycleOptions, ParamSpec, SlantedOptions};

use crate::error::{Error, Result};
use crate::hyperparams::{GroupValues, Hyperparam, HyperparamSink};
use crate::shape::Shape;
use log::{debug, trace, warn};
use std::collections::BTreeMap;

/// Lifecycle state of a [`Schedule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleState {
    /// `init_training` has not been called yet
    Unstarted,
    /// Steps remain
    Active,
    /// `iter == nb`; further steps fail
    Exhausted,
}

/// Steppable schedule for programmable hyperparameters
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    nb: usize,
    iter: usize,
    started: bool,
    init_lrs: Vec<f64>,
    curves: BTreeMap<Hyperparam, Shape>,
}

impl Schedule {
    /// Create a schedule over `nb` steps
    ///
    /// The learning rates currently in `sink` are captured as the base that
    /// the `lr` curve multiplies.
    pub fn new<S>(
        sink: &S,
        nb: usize,
        curves: impl IntoIterator<Item = (Hyperparam, Shape)>,
    ) -> Result<Self>
    where
        S: HyperparamSink + ?Sized,
    {
        let curves: BTreeMap<_, _> = curves.into_iter().collect();
        let init_lrs =
            if curves.contains_key(&Hyperparam::Lr) { sink.get(Hyperparam::Lr)? } else { Vec::new() };
        if nb == 0 && !curves.is_empty() {
            warn!("schedule has {} curve(s) but zero steps, values stay at step 0", curves.len());
        }
        Ok(Self { nb, iter: 0, started: false, init_lrs, curves })
    }

    /// Create a schedule from hyperparameter names
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedParameter`] for names other than `lr`, `momentum`, `wd`.
    pub fn from_named<S, K>(
        sink: &S,
        nb: usize,
        curves: impl IntoIterator<Item = (K, Shape)>,
    ) -> Result<Self>
    where
        S: HyperparamSink + ?Sized,
        K: AsRef<str>,
    {
        let curves = curves
            .into_iter()
            .map(|(name, shape)| Ok((name.as_ref().parse::<Hyperparam>()?, shape)))
            .collect::<Result<Vec<_>>>()?;
        Self::new(sink, nb, curves)
    }

    /// A schedule that never changes anything and never runs out
    pub fn nop() -> Self {
        Self { nb: 0, iter: 0, started: false, init_lrs: Vec::new(), curves: BTreeMap::new() }
    }

    /// Reset to step 0 and apply the step-0 values
    pub fn init_training<S>(&mut self, sink: &mut S) -> Result<()>
    where
        S: HyperparamSink + ?Sized,
    {
        self.iter = 0;
        self.started = true;
        if !self.curves.is_empty() {
            debug!(
                "schedule started: {} steps, driving {}",
                self.nb,
                self.curves.keys().map(Hyperparam::as_str).collect::<Vec<_>>().join(", ")
            );
        }
        self.apply(sink)
    }

    /// Advance one step and apply the new values
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfRange`] if all `nb` steps have been taken
    /// - [`Error::NotStarted`] if `init_training` was never called
    pub fn step<S>(&mut self, sink: &mut S) -> Result<()>
    where
        S: HyperparamSink + ?Sized,
    {
        if self.nb == 0 {
            return Ok(());
        }
        if !self.started {
            return Err(Error::NotStarted { nb: self.nb });
        }
        if self.iter >= self.nb {
            return Err(Error::OutOfRange { iter: self.iter, nb: self.nb });
        }
        self.iter += 1;
        self.apply(sink)
    }

    /// Total number of steps
    pub fn nb(&self) -> usize {
        self.nb
    }

    /// Steps taken since `init_training`
    pub fn iter(&self) -> usize {
        self.iter
    }

    /// Where the schedule is in its lifecycle
    pub fn state(&self) -> ScheduleState {
        if !self.started {
            ScheduleState::Unstarted
        } else if self.nb > 0 && self.iter >= self.nb {
            ScheduleState::Exhausted
        } else {
            ScheduleState::Active
        }
    }

    /// `iter / nb`, or 0 for a zero-step schedule
    pub fn progress(&self) -> f64 {
        if self.nb == 0 {
            return 0.0;
        }
        self.iter as f64 / self.nb as f64
    }

    /// The shape driving `param`, if any
    pub fn curve(&self, param: Hyperparam) -> Option<&Shape> {
        self.curves.get(&param)
    }

    /// Driven hyperparameters, in application order
    pub fn params(&self) -> impl Iterator<Item = Hyperparam> + '_ {
        self.curves.keys().copied()
    }

    /// Learning rates captured at construction
    pub fn initial_lrs(&self) -> &[f64] {
        &self.init_lrs
    }

    /// Shape values at the current step, before scaling by the initial lrs
    pub fn current_values(&self) -> Result<Vec<(Hyperparam, f64)>> {
        let x = self.progress();
        self.curves.iter().map(|(param, shape)| Ok((*param, shape.eval(x)?))).collect()
    }

    fn apply<S>(&self, sink: &mut S) -> Result<()>
    where
        S: HyperparamSink + ?Sized,
    {
        for (param, interp) in self.current_values()? {
            let values = match param {
                Hyperparam::Lr => {
                    GroupValues::PerGroup(self.init_lrs.iter().map(|lr| lr * interp).collect())
                }
                Hyperparam::Momentum | Hyperparam::Wd => GroupValues::Broadcast(interp),
            };
            trace!("step {}/{}: {param} <- {values:?}", self.iter, self.nb);
            sink.set(param, values)?;
        }
        Ok(())
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::nop()
    }
}

//! Ready-made schedules: cyclical, slanted, burn-in and one-cycle

use super::Schedule;
use crate::error::Result;
use crate::hyperparams::{Hyperparam, HyperparamSink};
use crate::shape::{self, Shape};
use serde::{Deserialize, Serialize};

/// How a secondary hyperparameter evolves
///
/// A pair `(y0, y1)` is a triangle `y0 → y1 → y0`, a single number is constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamSpec {
    Triangle(f64, f64),
    Constant(f64),
}

impl ParamSpec {
    /// The curve described by this value over [0, 1]
    pub fn shape(&self) -> Result<Shape> {
        match *self {
            Self::Triangle(y0, y1) => shape::triangle(y0, y1),
            Self::Constant(y) => Ok(shape::constant(y)),
        }
    }
}

impl From<f64> for ParamSpec {
    fn from(y: f64) -> Self {
        Self::Constant(y)
    }
}

impl From<(f64, f64)> for ParamSpec {
    fn from((y0, y1): (f64, f64)) -> Self {
        Self::Triangle(y0, y1)
    }
}

/// Options for [`Schedule::clr`] and [`Schedule::burn_in`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CurveOptions {
    /// Ratio between the peak and the lowest learning rate
    pub lr_factor: f64,
    /// Momentum curve; momentum is left alone when `None`
    pub momentums: Option<ParamSpec>,
    /// Decoupled weight decay curve; decay is left alone when `None`
    pub wds: Option<ParamSpec>,
}

impl Default for CurveOptions {
    fn default() -> Self {
        Self { lr_factor: shape::DEFAULT_LR_FACTOR, momentums: None, wds: None }
    }
}

impl CurveOptions {
    pub fn with_lr_factor(mut self, lr_factor: f64) -> Self {
        self.lr_factor = lr_factor;
        self
    }

    pub fn with_momentums(mut self, momentums: impl Into<ParamSpec>) -> Self {
        self.momentums = Some(momentums.into());
        self
    }

    pub fn with_wds(mut self, wds: impl Into<ParamSpec>) -> Self {
        self.wds = Some(wds.into());
        self
    }
}

/// Options for [`Schedule::stlr`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlantedOptions {
    pub lr_factor: f64,
    /// Fraction of the steps spent warming up
    pub up_share: f64,
    pub momentums: Option<ParamSpec>,
    pub wds: Option<ParamSpec>,
}

impl Default for SlantedOptions {
    fn default() -> Self {
        Self {
            lr_factor: shape::DEFAULT_LR_FACTOR,
            up_share: shape::DEFAULT_UP_SHARE,
            momentums: None,
            wds: None,
        }
    }
}

/// Options for [`Schedule::one_cycle`]
///
/// Momentum follows the one-cycle momentum curve unless `momentums` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OneCycleOptions {
    pub lr_factor: f64,
    /// Momentum at the start and at the learning rate peak
    pub momentums: Option<(f64, f64)>,
    /// Fraction of the steps spent in the final annealing phase
    pub anneal_share: f64,
    /// Ratio between the starting rate and the final annealed rate
    pub anneal_factor: f64,
    pub wds: Option<ParamSpec>,
}

impl Default for OneCycleOptions {
    fn default() -> Self {
        Self {
            lr_factor: shape::DEFAULT_LR_FACTOR,
            momentums: Some((0.95, 0.85)),
            anneal_share: shape::DEFAULT_ANNEAL_SHARE,
            anneal_factor: shape::DEFAULT_ANNEAL_FACTOR,
            wds: None,
        }
    }
}

impl Schedule {
    /// Cyclical learning rate: one triangle from `1/lr_factor` to 1 and back
    pub fn clr<S>(sink: &S, nb: usize, options: CurveOptions) -> Result<Self>
    where
        S: HyperparamSink + ?Sized,
    {
        let lr = shape::clr(options.lr_factor)?;
        Self::new(sink, nb, with_secondary(lr, options.momentums, options.wds)?)
    }

    /// Slanted triangular learning rate, peaking at `up_share`
    pub fn stlr<S>(sink: &S, nb: usize, options: SlantedOptions) -> Result<Self>
    where
        S: HyperparamSink + ?Sized,
    {
        let lr = shape::stlr(options.lr_factor, options.up_share)?;
        Self::new(sink, nb, with_secondary(lr, options.momentums, options.wds)?)
    }

    /// Warm-up: learning rate ramps linearly from `1/lr_factor` to 1
    pub fn burn_in<S>(sink: &S, nb: usize, options: CurveOptions) -> Result<Self>
    where
        S: HyperparamSink + ?Sized,
    {
        let lr = shape::line(1.0 / options.lr_factor, 1.0)?;
        Self::new(sink, nb, with_secondary(lr, options.momentums, options.wds)?)
    }

    /// The clr triangle followed by a deep anneal, with inverse momentum
    pub fn one_cycle<S>(sink: &S, nb: usize, options: OneCycleOptions) -> Result<Self>
    where
        S: HyperparamSink + ?Sized,
    {
        let lr = shape::one_cycle(options.lr_factor, options.anneal_share, options.anneal_factor)?;
        let mut curves = with_secondary(lr, None, options.wds)?;
        if let Some((m0, m1)) = options.momentums {
            let momentum = shape::one_cycle_momentum(m0, m1, options.anneal_share)?;
            curves.push((Hyperparam::Momentum, momentum));
        }
        Self::new(sink, nb, curves)
    }
}

/// The lr curve plus whichever optional curves are set
fn with_secondary(
    lr: Shape,
    momentums: Option<ParamSpec>,
    wds: Option<ParamSpec>,
) -> Result<Vec<(Hyperparam, Shape)>> {
    let mut curves = vec![(Hyperparam::Lr, lr)];
    if let Some(spec) = momentums {
        curves.push((Hyperparam::Momentum, spec.shape()?));
    }
    if let Some(spec) = wds {
        curves.push((Hyperparam::Wd, spec.shape()?));
    }
    Ok(curves)
}

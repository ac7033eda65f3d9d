//! Hyperparameter shapes
//!
//! A [`Shape`] is a pure function from training progress `x ∈ [0, 1]` to a
//! scalar, together with the range of values it attains. Shapes compose:
//! - `Shape::one()` - constant 1
//! - `Shape::linear()` - the identity, 0 to 1
//! - [`Shape::shift`] - `δ + s(x)`
//! - [`Shape::scale`] - `k · s(x)`
//! - [`Shape::chain`] - `a` on `[0, share)`, `b` on `[share, 1]`, each renormalized
//!
//! The derived curves in this module (`line`, `triangle`, `clr`, `stlr`,
//! `one_cycle`, `one_cycle_momentum`) are built only from these.
//!
//! # Example
//!
//! ```
//! use kerosene::shape;
//!
//! let tri = shape::triangle(1.0, 3.0).unwrap();
//! assert_eq!(tri.eval(0.25).unwrap(), 2.0);
//! assert_eq!(tri.eval(0.5).unwrap(), 3.0);
//! assert_eq!(tri.range(), (1.0, 3.0));
//! assert!(tri.eval(1.5).is_err());
//! ```

mod curves;


pub use curves::{
    clr, constant, line, one_cycle, one_cycle_momentum, stlr, triangle, DEFAULT_ANNEAL_FACTOR,
    DEFAULT_ANNEAL_SHARE, DEFAULT_LR_FACTOR, DEFAULT_UP_SHARE,
};

use crate::error::{Error, Result};

/// A function from `[0, 1]` to `[lo, hi]`
///
/// Composite shapes own their parts, so a shape can be cloned and reused
/// across schedules freely.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    kind: Kind,
}

#[derive(Debug, Clone, PartialEq)]
enum Kind {
    One,
    Linear,
    Shift { shape: Box<Shape>, shift: f64 },
    Scale { shape: Box<Shape>, scale: f64 },
    Chain { first: Box<Shape>, second: Box<Shape>, first_share: f64 },
}

impl Shape {
    /// The constant shape 1
    pub fn one() -> Self {
        Self { kind: Kind::One }
    }

    /// The linear progression from 0 to 1
    pub fn linear() -> Self {
        Self { kind: Kind::Linear }
    }

    /// This shape, additively shifted by `shift`
    pub fn shift(self, shift: f64) -> Self {
        Self { kind: Kind::Shift { shape: Box::new(self), shift } }
    }

    /// This shape, multiplied by `scale`
    pub fn scale(self, scale: f64) -> Self {
        Self { kind: Kind::Scale { shape: Box::new(self), scale } }
    }

    /// This shape followed by `second`, splitting the domain at `first_share`
    ///
    /// For `x < first_share` the result is `self(x / first_share)`, otherwise
    /// `second((x - first_share) / (1 - first_share))`. The split point itself
    /// belongs to `second`.
    ///
    /// # Errors
    ///
    /// `first_share` must lie strictly inside `(0, 1)`.
    pub fn chain(self, second: Shape, first_share: f64) -> Result<Self> {
        if !(first_share > 0.0 && first_share < 1.0) {
            return Err(Error::InvalidArgument {
                name: "first_share",
                value: first_share,
                reason: "must be in (0, 1)",
            });
        }
        Ok(Self {
            kind: Kind::Chain { first: Box::new(self), second: Box::new(second), first_share },
        })
    }

    /// This shape followed by `second`, 50/50
    pub fn then(self, second: Shape) -> Self {
        Self {
            kind: Kind::Chain { first: Box::new(self), second: Box::new(second), first_share: 0.5 },
        }
    }

    /// Evaluate the shape at `x`, checking that `x ∈ [0, 1]`
    ///
    /// # Errors
    ///
    /// [`Error::Domain`] if `x` is outside `[0, 1]` or NaN.
    pub fn eval(&self, x: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&x) {
            return Err(Error::Domain { x });
        }
        Ok(self.compute(x))
    }

    /// Evaluate the shape at `x` without the domain check
    pub fn compute(&self, x: f64) -> f64 {
        match &self.kind {
            Kind::One => 1.0,
            Kind::Linear => x,
            Kind::Shift { shape, shift } => shift + shape.compute(x),
            Kind::Scale { shape, scale } => scale * shape.compute(x),
            Kind::Chain { first, second, first_share } => {
                if x < *first_share {
                    first.compute(x / first_share)
                } else {
                    second.compute((x - first_share) / (1.0 - first_share))
                }
            }
        }
    }

    /// The `(min, max)` values this shape attains over `[0, 1]`
    pub fn range(&self) -> (f64, f64) {
        match &self.kind {
            Kind::One => (1.0, 1.0),
            Kind::Linear => (0.0, 1.0),
            Kind::Shift { shape, shift } => {
                let (lo, hi) = shape.range();
                (shift + lo, shift + hi)
            }
            Kind::Scale { shape, scale } => {
                let (mut lo, mut hi) = shape.range();
                if *scale < 0.0 {
                    std::mem::swap(&mut lo, &mut hi);
                }
                (scale * lo, scale * hi)
            }
            Kind::Chain { first, second, .. } => {
                let (lo0, hi0) = first.range();
                let (lo1, hi1) = second.range();
                (lo0.min(lo1), hi0.max(hi1))
            }
        }
    }
}

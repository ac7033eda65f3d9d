//! Ready-made curves built from the shape primitives

use super::Shape;
use crate::error::{Error, Result};

/// Ratio between the peak and the floor of the cyclical curves
pub const DEFAULT_LR_FACTOR: f64 = 10.0;

/// Share of the slanted triangle spent ramping up
pub const DEFAULT_UP_SHARE: f64 = 1.0 / 4.0;

/// Share of the one-cycle curve spent in the final anneal
pub const DEFAULT_ANNEAL_SHARE: f64 = 1.0 / 10.0;

/// How far below the cycle floor the one-cycle anneal ends
pub const DEFAULT_ANNEAL_FACTOR: f64 = 100.0;

/// A constant value of `y`
pub fn constant(y: f64) -> Shape {
    Shape::one().scale(y)
}

/// A linear progression from `y0` to `y1`
///
/// # Errors
///
/// Hyperparameter magnitudes are non-negative, so a negative (or non-finite)
/// endpoint is rejected.
pub fn line(y0: f64, y1: f64) -> Result<Shape> {
    check_endpoint("y0", y0)?;
    check_endpoint("y1", y1)?;
    Ok(Shape::linear().scale(y1 - y0).shift(y0))
}

/// A symmetrical triangle from `y0` to `y1` and back
pub fn triangle(y0: f64, y1: f64) -> Result<Shape> {
    Ok(line(y0, y1)?.then(line(y1, y0)?))
}

/// A symmetrical triangle from `1/lr_factor` to 1 and back
pub fn clr(lr_factor: f64) -> Result<Shape> {
    triangle(1.0 / lr_factor, 1.0)
}

/// Slanted triangle: like [`clr`], but the peak sits at `up_share`
pub fn stlr(lr_factor: f64, up_share: f64) -> Result<Shape> {
    let up = line(1.0 / lr_factor, 1.0)?;
    let down = line(1.0, 1.0 / lr_factor)?;
    up.chain(down, up_share)
}

/// The [`clr`] triangle, followed by an anneal down to `1/lr_factor/anneal_factor`
///
/// The anneal takes the last `anneal_share` of the domain.
pub fn one_cycle(lr_factor: f64, anneal_share: f64, anneal_factor: f64) -> Result<Shape> {
    let core = clr(lr_factor)?;
    let finish = line(1.0 / lr_factor, 1.0 / lr_factor / anneal_factor)?;
    core.chain(finish, 1.0 - anneal_share)
}

/// Momentum counterpart of [`one_cycle`]: triangle `y0 → y1 → y0`, then flat at `y0`
pub fn one_cycle_momentum(y0: f64, y1: f64, anneal_share: f64) -> Result<Shape> {
    let core = triangle(y0, y1)?;
    core.chain(constant(y0), 1.0 - anneal_share)
}

fn check_endpoint(name: &'static str, value: f64) -> Result<()> {
    if value.is_nan() || value.is_infinite() {
        return Err(Error::InvalidArgument { name, value, reason: "must be finite" });
    }
    if value < 0.0 {
        return Err(Error::InvalidArgument { name, value, reason: "must not be negative" });
    }
    Ok(())
}

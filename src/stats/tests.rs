//! Tests for averages

use super::*;
use crate::error::Error;
use approx::assert_relative_eq;
use proptest::prelude::*;

#[test]
fn test_exponential_moving_average() {
    let mut ema = ExponentialMovingAverage::new(2.0).unwrap();
    assert_eq!(ema.update(1.0), (1.0 / 2.0) / (1.0 / 2.0));
    assert_eq!(ema.update(2.0), (1.0 / 4.0 + 1.0) / (3.0 / 4.0));
    assert_eq!(ema.update(3.0), (1.0 / 8.0 + 1.0 / 2.0 + 3.0 / 2.0) / (7.0 / 8.0));
}

#[test]
fn test_keep_last_ema() {
    let mut ema = ExponentialMovingAverage::new(1.0).unwrap();
    assert_eq!(ema.momentum(), 0.0);
    assert_eq!(ema.update(1.0), 1.0);
    assert_eq!(ema.update(2.0), 2.0);
    assert_eq!(ema.update(3.0), 3.0);
}

#[test]
fn test_bad_ema_windows() {
    for window in [-1.0, 0.0, 0.5, 2.5, f64::NAN, f64::INFINITY] {
        let err = ExponentialMovingAverage::new(window).unwrap_err();
        assert!(matches!(err, Error::InvalidWindow { .. }), "window {window}");
    }
}

#[test]
fn test_ema_with_huge_window_stays_finite() {
    let window = 2f64.powi(60);
    let mut ema = ExponentialMovingAverage::new(window).unwrap();
    assert_eq!(ema.momentum(), 1.0);
    assert_eq!(ema.update(3.0), 3.0);
    assert_eq!(ema.update(3.0), 3.0);
}

#[test]
fn test_ema_before_update_is_nan() {
    let ema = ExponentialMovingAverage::new(50.0).unwrap();
    assert!(ema.value().is_nan());
}

#[test]
fn test_weighted_average() {
    let mut avg = WeightedAverage::new();
    assert_eq!(avg.record(1.0), 1.0 / 1.0);
    assert_eq!(avg.update(2.0, 2.0).unwrap(), (1.0 + 4.0) / (1.0 + 2.0));
    assert_eq!(avg.update(3.0, 3.0).unwrap(), (1.0 + 4.0 + 9.0) / (1.0 + 2.0 + 3.0));
    assert_eq!(avg.weight(), 6.0);
}

#[test]
fn test_bad_average_weights() {
    let mut avg = WeightedAverage::new();
    avg.record(5.0);
    let err = avg.update(1.0, -1.0).unwrap_err();
    assert!(matches!(err, Error::InvalidWeight { weight } if weight == -1.0));
    assert!(avg.update(1.0, f64::NAN).is_err());
    // Rejected updates leave the average alone
    assert_eq!(avg.value(), 5.0);
}

#[test]
fn test_zero_weight_is_allowed() {
    let mut avg = WeightedAverage::new();
    avg.update(4.0, 2.0).unwrap();
    assert_eq!(avg.update(100.0, 0.0).unwrap(), 4.0);
}

#[test]
fn test_empty_weighted_average_is_nan() {
    assert!(WeightedAverage::default().value().is_nan());
}

proptest! {
    #[test]
    fn prop_weighted_average_within_bounds(
        items in prop::collection::vec((-1e3f64..1e3, 0.1f64..10.0), 1..50)
    ) {
        let mut avg = WeightedAverage::new();
        for &(value, weight) in &items {
            avg.update(value, weight).unwrap();
        }
        let lo = items.iter().map(|(v, _)| *v).fold(f64::INFINITY, f64::min);
        let hi = items.iter().map(|(v, _)| *v).fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(avg.value() >= lo - 1e-9 && avg.value() <= hi + 1e-9);
    }

    #[test]
    fn prop_ema_of_constant_is_constant(value in -1e3f64..1e3, window in 1u32..200, n in 1usize..30) {
        let mut ema = ExponentialMovingAverage::new(f64::from(window)).unwrap();
        for _ in 0..n {
            let avg = ema.update(value);
            assert_relative_eq!(avg, value, epsilon = 1e-9, max_relative = 1e-9);
        }
    }

    #[test]
    fn prop_ema_within_seen_values(
        values in prop::collection::vec(-1e3f64..1e3, 1..50),
        window in 1u32..100,
    ) {
        let mut ema = ExponentialMovingAverage::new(f64::from(window)).unwrap();
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for value in values {
            lo = lo.min(value);
            hi = hi.max(value);
            let avg = ema.update(value);
            prop_assert!(avg >= lo - 1e-6 && avg <= hi + 1e-6);
        }
    }
}

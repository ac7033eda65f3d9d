//! Property tests for the shape algebra
//!
//! - Every shape evaluates to a finite value inside its range on [0, 1]
//! - Evaluation outside [0, 1] always fails
//! - Derived curves hit their endpoints

use approx::assert_abs_diff_eq;
use kerosene::shape::{self, Shape};
use kerosene::Error;
use proptest::prelude::*;

// =============================================================================
// Strategy Helpers
// =============================================================================

fn arb_shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![Just(Shape::one()), Just(Shape::linear())];
    leaf.prop_recursive(4, 16, 2, |inner| {
        prop_oneof![
            (inner.clone(), -10.0f64..10.0).prop_map(|(s, d)| s.shift(d)),
            (inner.clone(), -10.0f64..10.0).prop_map(|(s, k)| s.scale(k)),
            (inner.clone(), inner, 0.01f64..0.99)
                .prop_map(|(a, b, share)| a.chain(b, share).unwrap()),
        ]
    })
}

fn in_domain() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(1.0), Just(0.5), 0.0f64..=1.0]
}

// =============================================================================
// Shape Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    #[test]
    fn prop_eval_within_range(shape in arb_shape(), x in in_domain()) {
        let y = shape.eval(x).unwrap();
        let (lo, hi) = shape.range();
        prop_assert!(y.is_finite());
        prop_assert!(lo <= hi);
        let tol = 1e-9 * (1.0 + lo.abs().max(hi.abs()));
        prop_assert!(y >= lo - tol && y <= hi + tol, "{} not in [{}, {}]", y, lo, hi);
    }

    #[test]
    fn prop_eval_outside_domain_fails(shape in arb_shape(), x in prop_oneof![-10.0f64..-1e-12, 1.0f64 + 1e-12..10.0]) {
        let rejected = matches!(shape.eval(x), Err(Error::Domain { .. }));
        prop_assert!(rejected, "{:?} accepted x = {}", shape, x);
    }

    #[test]
    fn prop_line_endpoints(y0 in 0.0f64..100.0, y1 in 0.0f64..100.0) {
        let line = shape::line(y0, y1).unwrap();
        prop_assert_eq!(line.eval(0.0).unwrap(), y0);
        prop_assert!((line.eval(1.0).unwrap() - y1).abs() < 1e-9);
    }

    #[test]
    fn prop_triangle_peaks_in_the_middle(y0 in 0.0f64..100.0, y1 in 0.0f64..100.0) {
        let tri = shape::triangle(y0, y1).unwrap();
        prop_assert!((tri.eval(0.5).unwrap() - y1).abs() < 1e-9);
        prop_assert!((tri.eval(1.0).unwrap() - y0).abs() < 1e-9);
        let (lo, hi) = tri.range();
        assert_abs_diff_eq!(lo, y0.min(y1), epsilon = 1e-9);
        assert_abs_diff_eq!(hi, y0.max(y1), epsilon = 1e-9);
    }

    #[test]
    fn prop_clr_stays_between_floor_and_one(lr_factor in 1.0f64..1000.0, x in in_domain()) {
        let y = shape::clr(lr_factor).unwrap().eval(x).unwrap();
        prop_assert!(y >= 1.0 / lr_factor - 1e-12 && y <= 1.0 + 1e-12);
    }

    #[test]
    fn prop_negative_line_endpoint_fails(y in -100.0f64..-1e-9) {
        prop_assert!(shape::line(y, 1.0).is_err());
        prop_assert!(shape::line(1.0, y).is_err());
    }
}

#[test]
fn test_triangle_range_tolerates_rounding() {
    for (y0, y1) in [(14.1014086740883, 60.453746260753), (46.45686259042271, 9.186088975698947)] {
        let (lo, hi) = shape::triangle(y0, y1).unwrap().range();
        assert_abs_diff_eq!(lo, y0.min(y1), epsilon = 1e-9);
        assert_abs_diff_eq!(hi, y0.max(y1), epsilon = 1e-9);
    }
}

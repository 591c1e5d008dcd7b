// Copyright 2026 the Skelpen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measurements on curves and curve sequences.
//!
//! A *sequence* is a slice of curves where curve `i` occupies the global
//! parameter interval `[i, i + 1]`. Global parameters outside `[0, len]`
//! extrapolate the first or last curve's polynomial.

use crate::common::{integrate_romberg, solve_bisect};
use crate::{BezierCurve, CurveError, ParamCurve, ParamCurveDeriv, Point, Rect};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Default cap on integrand evaluations for one arc length integral.
pub const DEFAULT_MAX_EVAL: usize = 100_000;

/// Relative accuracy of arc length integration.
pub const LENGTH_ACCURACY: f64 = 1e-6;

/// Absolute accuracy floor of arc length integration.
const LENGTH_ABS_ACCURACY: f64 = 1e-15;

/// Cap on halvings when inverting arc length.
pub const MAX_INVERSION_STEPS: usize = 100;

/// The bounding box of the control points of all `curves`.
///
/// Returns `None` for an empty slice.
pub fn bounds<'a>(curves: impl IntoIterator<Item = &'a BezierCurve>) -> Option<Rect> {
    curves
        .into_iter()
        .map(BezierCurve::bounding_box)
        .reduce(|a, b| a.union(b))
}

/// Arc length of `curve` between parameters `a` and `b`.
///
/// Negative when `a > b`.
pub fn length(curve: &BezierCurve, a: f64, b: f64) -> f64 {
    length_with(curve, a, b, LENGTH_ACCURACY, DEFAULT_MAX_EVAL)
}

/// Arc length of `curve` between `a` and `b` with explicit accuracy and
/// evaluation budget.
///
/// Lines are measured exactly. Higher orders integrate the speed
/// `|curve'(t)|` by Romberg quadrature; if the budget runs out the best
/// estimate is returned.
pub fn length_with(curve: &BezierCurve, a: f64, b: f64, accuracy: f64, max_eval: usize) -> f64 {
    if a == b {
        return 0.0;
    }
    if curve.order() == 1 {
        return curve.start().distance(curve.end()) * (b - a);
    }
    let deriv = curve.deriv();
    let speed = |t: f64| deriv.x.eval(t).hypot(deriv.y.eval(t));
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    let len = integrate_romberg(speed, lo, hi, accuracy, LENGTH_ABS_ACCURACY, max_eval);
    if a > b {
        -len
    } else {
        len
    }
}

/// Arc length of a curve sequence between global parameters `a` and `b`.
///
/// Negative when `a > b`. Zero for an empty sequence.
pub fn sequence_length(curves: &[BezierCurve], a: f64, b: f64) -> f64 {
    sequence_length_with(curves, a, b, DEFAULT_MAX_EVAL)
}

/// [`sequence_length`] with an explicit per-curve evaluation budget.
pub fn sequence_length_with(curves: &[BezierCurve], a: f64, b: f64, max_eval: usize) -> f64 {
    let (Some(first), Some(last)) = (curves.first(), curves.last()) else {
        return 0.0;
    };
    if a == b {
        return 0.0;
    }
    if a > b {
        return -sequence_length_with(curves, b, a, max_eval);
    }
    let n = curves.len() as f64;
    let measure = |c: &BezierCurve, lo: f64, hi: f64| {
        length_with(c, lo, hi, LENGTH_ACCURACY, max_eval)
    };
    let mut total = 0.0;
    let (mut a, mut b) = (a, b);
    if a < 0.0 {
        if b <= 0.0 {
            return measure(first, a, b);
        }
        total += measure(first, a, 0.0);
        a = 0.0;
    }
    if b > n {
        let base = n - 1.0;
        if a >= n {
            return total + measure(last, a - base, b - base);
        }
        total += measure(last, 1.0, b - base);
        b = n;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "a and b lie in [0, len] here"
    )]
    let (i0, i1) = (a.floor() as usize, (b.ceil() as usize).min(curves.len()));
    for (i, curve) in curves.iter().enumerate().take(i1).skip(i0) {
        let offset = i as f64;
        let lo = a.max(offset) - offset;
        let hi = b.min(offset + 1.0) - offset;
        if hi > lo {
            total += measure(curve, lo, hi);
        }
    }
    total
}

/// Global parameter at which the sequence has arc length `target`.
///
/// With `from_start`, length is measured from parameter 0 forward;
/// otherwise from the end of the sequence backward. Targets beyond the
/// total length clamp to the far end of the sequence.
pub fn time_by_length(curves: &[BezierCurve], target: f64, from_start: bool) -> f64 {
    time_by_length_with(curves, target, from_start, 1e-4, DEFAULT_MAX_EVAL)
}

/// [`time_by_length`] with an explicit length tolerance and evaluation budget.
///
/// Bisection stops once the measured length is within `tolerance` of
/// `target`, or after [`MAX_INVERSION_STEPS`] halvings, in which case the
/// best parameter so far is returned.
pub fn time_by_length_with(
    curves: &[BezierCurve],
    target: f64,
    from_start: bool,
    tolerance: f64,
    max_eval: usize,
) -> f64 {
    let n = curves.len() as f64;
    let (near, far) = if from_start { (0.0, n) } else { (n, 0.0) };
    if curves.is_empty() || target <= 0.0 {
        return near;
    }
    let measured = |t: f64| {
        if from_start {
            sequence_length_with(curves, 0.0, t, max_eval)
        } else {
            sequence_length_with(curves, t, n, max_eval)
        }
    };
    if target >= measured(far) {
        return far;
    }
    let (mut lo, mut hi) = (0.0, n);
    for _ in 0..MAX_INVERSION_STEPS {
        let mid = 0.5 * (lo + hi);
        let len = measured(mid);
        if (len - target).abs() < tolerance {
            return mid;
        }
        if from_start == (len < target) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    let mid = 0.5 * (lo + hi);
    log::warn!("arc length inversion for {target} did not converge, using t = {mid}");
    mid
}

/// Root of `f` over `[lo, hi]`, used by extension resolution.
///
/// Thin wrapper over bounded bisection with the budget used elsewhere in
/// this module.
pub(crate) fn find_crossing(f: impl FnMut(f64) -> f64, lo: f64, hi: f64) -> Option<f64> {
    solve_bisect(f, lo, hi, 1e-12, MAX_INVERSION_STEPS)
}

/// Blend two curves of equal order point by point.
///
/// The result has control points `a[i] + (b[i] - a[i]) * t` and the pen
/// data of `a`, with offset vectors blended the same way.
///
/// # Errors
///
/// Returns [`CurveError::MismatchedOrder`] if the orders differ.
pub fn interpolate(a: &BezierCurve, b: &BezierCurve, t: f64) -> Result<BezierCurve, CurveError> {
    if a.order() != b.order() {
        return Err(CurveError::MismatchedOrder {
            left: a.order(),
            right: b.order(),
        });
    }
    // Weighted form so that both t = 0 and t = 1 reproduce the inputs exactly.
    let points = a.points().iter().zip(b.points()).map(|(p, q)| {
        Point::new(p.x * (1.0 - t) + q.x * t, p.y * (1.0 - t) + q.y * t)
    });
    let mut out = BezierCurve::new(points)?;
    out.copy_pen_data(a);
    out.set_offset_vector(a.offset_vector().lerp(b.offset_vector(), t));
    if a.end_offset_vector().is_some() || b.end_offset_vector().is_some() {
        let end_a = a.end_offset_vector().unwrap_or(a.offset_vector());
        let end_b = b.end_offset_vector().unwrap_or(b.offset_vector());
        out.set_end_offset_vector(Some(end_a.lerp(end_b, t)));
    }
    Ok(out)
}

/// Whether two curves have identical control points.
pub fn compare_points(a: &BezierCurve, b: &BezierCurve) -> bool {
    a.points() == b.points()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParamCurveArclen;
    use rand::Rng;

    fn arch() -> BezierCurve {
        BezierCurve::cubic((0.0, 0.0), (1.0, 2.0), (3.0, 2.0), (4.0, 0.0))
    }

    fn random_curve(rng: &mut impl Rng, order: usize) -> BezierCurve {
        BezierCurve::new(
            (0..=order)
                .map(|_| Point::new(rng.random_range(-100.0..100.0), rng.random_range(-100.0..100.0))),
        )
        .unwrap()
    }

    #[test]
    fn line_length_exact() {
        let c = BezierCurve::line((0.0, 0.0), (3.0, 4.0));
        assert!((length(&c, 0.0, 1.0) - 5.0).abs() < 1e-12);
        assert!((length(&c, 0.2, 0.6) - 2.0).abs() < 1e-12);
        assert!((length(&c, 1.0, 0.0) + 5.0).abs() < 1e-12);
        assert_eq!(length(&c, 0.5, 0.5), 0.0);
    }

    #[test]
    fn quadratic_line_length() {
        // A quadratic with a centered control point is a uniformly
        // parametrized line.
        let c = BezierCurve::quad((0.0, 0.0), (5.0, 0.0), (10.0, 0.0));
        assert!((length(&c, 0.0, 1.0) - 10.0).abs() < 1e-9);
        assert!((c.arclen(1e-9) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn length_monotone_and_antisymmetric() {
        let mut rng = rand::rng();
        for _ in 0..20 {
            let c = random_curve(&mut rng, 3);
            let mut prev: f64 = 0.0;
            for i in 1..=10 {
                let t = i as f64 * 0.1;
                let len = length(&c, 0.0, t);
                assert!(len >= prev - 1e-6 * prev.max(1.0), "{len} < {prev}");
                prev = len;
            }
            let a: f64 = rng.random_range(0.0..1.0);
            let b: f64 = rng.random_range(0.0..1.0);
            let ab = length(&c, a, b);
            let ba = length(&c, b, a);
            assert!((ab + ba).abs() < 1e-12, "{ab} vs {ba}");
        }
    }

    #[test]
    fn sequence_length_spans_curves() {
        let curves = [
            BezierCurve::line((0.0, 0.0), (10.0, 0.0)),
            BezierCurve::line((10.0, 0.0), (10.0, 20.0)),
        ];
        let near = |a: f64, b: f64, expected: f64| {
            let len = sequence_length(&curves, a, b);
            assert!((len - expected).abs() < 1e-12, "{a}..{b}: {len}");
        };
        near(0.0, 2.0, 30.0);
        near(0.5, 1.5, 15.0);
        near(1.5, 0.5, -15.0);
        // Extrapolated past both ends.
        near(-0.5, 0.0, 5.0);
        near(-0.5, 2.5, 45.0);
        near(2.0, 2.5, 10.0);
        assert_eq!(sequence_length(&[], 0.0, 1.0), 0.0);
    }

    #[test]
    fn time_by_length_inverts() {
        let curves = [arch(), BezierCurve::line((4.0, 0.0), (4.0, -6.0))];
        let total = sequence_length(&curves, 0.0, 2.0);
        for target in [0.5, 2.0, total - 3.0] {
            let t = time_by_length(&curves, target, true);
            assert!((sequence_length(&curves, 0.0, t) - target).abs() < 1e-4);
            let t = time_by_length(&curves, target, false);
            assert!((sequence_length(&curves, t, 2.0) - target).abs() < 1e-4);
        }
        assert_eq!(time_by_length(&curves, total + 1.0, true), 2.0);
        assert_eq!(time_by_length(&curves, total + 1.0, false), 0.0);
        assert_eq!(time_by_length(&curves, 0.0, false), 2.0);
    }

    #[test]
    fn time_by_length_gives_up_with_best_estimate() {
        // A zero tolerance can never be met, so every halving is spent.
        let curves = [arch(), BezierCurve::line((4.0, 0.0), (4.0, -6.0))];
        let total = sequence_length(&curves, 0.0, 2.0);
        for from_start in [true, false] {
            let t = time_by_length_with(&curves, 3.0, from_start, 0.0, DEFAULT_MAX_EVAL);
            assert!(t.is_finite() && (0.0..=2.0).contains(&t), "{t}");
            let len = if from_start {
                sequence_length(&curves, 0.0, t)
            } else {
                sequence_length(&curves, t, 2.0)
            };
            assert!((len - 3.0).abs() < 1e-4, "{len}");
        }
        assert!(total > 3.0);

        // A collapsed curve has no length to invert.
        let dot = [BezierCurve::joint((1.0, 1.0))];
        assert_eq!(time_by_length(&dot, 1.0, true), 1.0);
        assert_eq!(time_by_length(&dot, 1.0, false), 0.0);
        let t = time_by_length_with(&dot, 0.5, true, 0.0, 16);
        assert!(t.is_finite() && (0.0..=1.0).contains(&t));
    }

    #[test]
    fn inversion_agrees_with_arclen() {
        // Symmetric about its middle, so half the length is at t = 0.5.
        let c = arch();
        let half = 0.5 * c.arclen(1e-9);
        let t = time_by_length(&[c], half, true);
        assert!((t - 0.5).abs() < 1e-4, "{t}");
    }

    #[test]
    fn interpolate_endpoints() {
        let mut rng = rand::rng();
        for order in 1..=3 {
            let a = random_curve(&mut rng, order);
            let b = random_curve(&mut rng, order);
            assert!(compare_points(&interpolate(&a, &b, 0.0).unwrap(), &a));
            assert!(compare_points(&interpolate(&a, &b, 1.0).unwrap(), &b));
        }
        let err = interpolate(&arch(), &BezierCurve::line((0.0, 0.0), (1.0, 1.0)), 0.5);
        assert_eq!(
            err,
            Err(CurveError::MismatchedOrder { left: 3, right: 1 })
        );
    }

    #[test]
    fn interpolate_blends_pen() {
        let a = BezierCurve::builder([(0.0, 0.0), (10.0, 0.0)])
            .with_offset_vector((1.0, 1.0))
            .with_cutoff_end((0.0, 1.0))
            .build()
            .unwrap();
        let b = BezierCurve::builder([(0.0, 10.0), (10.0, 10.0)])
            .with_offset_vector((3.0, 1.0))
            .build()
            .unwrap();
        let m = interpolate(&a, &b, 0.5).unwrap();
        assert_eq!(m.start(), Point::new(0.0, 5.0));
        assert_eq!(m.offset_vector(), crate::Vec2::new(2.0, 1.0));
        assert_eq!(m.cutoff_end(), Some(crate::Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn compare_after_mutation() {
        let c = arch();
        let mut d = c.clone();
        assert!(compare_points(&c, &d));
        d.set_point(2, Point::new(3.0, 2.5)).unwrap();
        assert!(!compare_points(&c, &d));
    }

    #[test]
    fn bounds_of_curves() {
        let curves = [arch(), BezierCurve::line((4.0, 0.0), (4.0, -6.0))];
        assert_eq!(bounds(&curves), Some(Rect::new(0.0, -6.0, 4.0, 2.0)));
        assert_eq!(bounds(&[] as &[BezierCurve]), None);
    }
}

// Copyright 2026 the Skelpen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations

#![allow(
    missing_docs,
    reason = "numeric helpers are documented at their call sites"
)]

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("skelpen requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs;
    fn ceil(self) -> Self => ceil;
    fn floor(self) -> Self => floor;
    fn hypot(self, other: Self) -> Self => hypot;
    fn sqrt(self) -> Self => sqrt;
    fn tan(self) -> Self => tan;
}

/// Binomial coefficient `C(n, k)` as a float.
///
/// Returns 0 when `k > n`.
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut result = 1.0;
    for i in 0..k {
        result = result * (n - i) as f64 / (i + 1) as f64;
    }
    result
}

/// Find a root of `f` in `[a, b]` by bisection.
///
/// Returns `None` when the endpoint values do not bracket a sign change.
/// Stops when the interval is narrower than `epsilon` or after `max_iter`
/// halvings, whichever comes first, returning the current midpoint.
pub fn solve_bisect(
    mut f: impl FnMut(f64) -> f64,
    mut a: f64,
    mut b: f64,
    epsilon: f64,
    max_iter: usize,
) -> Option<f64> {
    let mut fa = f(a);
    let fb = f(b);
    if fa == 0.0 {
        return Some(a);
    }
    if fb == 0.0 {
        return Some(b);
    }
    if fa.is_nan() || fb.is_nan() || (fa > 0.0) == (fb > 0.0) {
        return None;
    }
    for _ in 0..max_iter {
        let mid = 0.5 * (a + b);
        if b - a < epsilon {
            return Some(mid);
        }
        let fm = f(mid);
        if fm == 0.0 {
            return Some(mid);
        }
        if (fm > 0.0) == (fa > 0.0) {
            a = mid;
            fa = fm;
        } else {
            b = mid;
        }
    }
    log::warn!("bisection budget of {max_iter} exhausted on [{a}, {b}]");
    Some(0.5 * (a + b))
}

/// Romberg integration of `f` over `[a, b]`.
///
/// Refines the trapezoid estimate until two consecutive diagonal entries
/// agree within `rel_accuracy` (relative) or `abs_accuracy` (absolute). The
/// number of integrand evaluations is capped at `max_eval`; when the cap is
/// hit the best estimate so far is returned.
pub fn integrate_romberg(
    f: impl Fn(f64) -> f64,
    a: f64,
    b: f64,
    rel_accuracy: f64,
    abs_accuracy: f64,
    max_eval: usize,
) -> f64 {
    const MIN_ROWS: usize = 3;
    const MAX_ROWS: usize = 32;
    let h0 = b - a;
    if h0 == 0.0 {
        return 0.0;
    }
    let mut prev = [0.0; MAX_ROWS];
    let mut cur = [0.0; MAX_ROWS];
    prev[0] = 0.5 * h0 * (f(a) + f(b));
    let mut evals = 2;
    let mut n_new = 1usize;
    for row in 1..MAX_ROWS {
        let h = h0 / (2 * n_new) as f64;
        if evals + n_new > max_eval {
            log::warn!("integration budget of {max_eval} evaluations exhausted");
            return prev[row - 1];
        }
        let mut sum = 0.0;
        for k in 0..n_new {
            sum += f(a + (2 * k + 1) as f64 * h);
        }
        evals += n_new;
        cur[0] = 0.5 * prev[0] + h * sum;
        let mut factor = 1.0;
        for j in 1..=row {
            factor *= 4.0;
            cur[j] = cur[j - 1] + (cur[j - 1] - prev[j - 1]) / (factor - 1.0);
        }
        let delta = (cur[row] - prev[row - 1]).abs();
        if row >= MIN_ROWS
            && (delta <= rel_accuracy * cur[row].abs() || delta <= abs_accuracy)
        {
            return cur[row];
        }
        core::mem::swap(&mut prev, &mut cur);
        n_new *= 2;
    }
    prev[MAX_ROWS - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomials() {
        assert_eq!(binomial(3, 0), 1.0);
        assert_eq!(binomial(3, 1), 3.0);
        assert_eq!(binomial(4, 2), 6.0);
        assert_eq!(binomial(2, 3), 0.0);
    }

    #[test]
    fn bisect_sqrt2() {
        let r = solve_bisect(|x| x * x - 2.0, 0.0, 2.0, 1e-12, 200).unwrap();
        assert!((r - 2f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn bisect_unbracketed() {
        assert!(solve_bisect(|x| x * x + 1.0, -1.0, 1.0, 1e-12, 200).is_none());
    }

    #[test]
    fn romberg_polynomial() {
        let v = integrate_romberg(|x| 3.0 * x * x, 0.0, 2.0, 1e-10, 1e-15, 100_000);
        assert!((v - 8.0).abs() < 1e-9);
    }

    #[test]
    fn romberg_reversed_interval() {
        let v = integrate_romberg(|x| x, 1.0, 0.0, 1e-10, 1e-15, 100_000);
        assert!((v + 0.5).abs() < 1e-12);
    }

    #[test]
    fn romberg_budget() {
        // Too small a budget to converge still yields a finite estimate.
        let v = integrate_romberg(|x| x.sqrt(), 0.0, 1.0, 1e-14, 0.0, 5);
        assert!(v.is_finite());
        assert!((v - 2.0 / 3.0).abs() < 0.1);
    }
}

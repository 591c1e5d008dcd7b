// Copyright 2026 the Skelpen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Power-basis polynomials and planar polynomial curves.

use core::ops::Range;

use smallvec::{smallvec, SmallVec};

use crate::common::binomial;
use crate::{ParamCurve, ParamCurveDeriv, Point, Vec2};

/// A univariate polynomial in the power basis.
///
/// Coefficients are stored lowest degree first, so `Poly([a, b, c])`
/// is `a + b t + c t²`. An empty coefficient list is the zero polynomial.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Poly(SmallVec<[f64; 4]>);

impl Poly {
    /// A polynomial from coefficients, lowest degree first.
    pub fn new(coeffs: impl IntoIterator<Item = f64>) -> Poly {
        Poly(coeffs.into_iter().collect())
    }

    /// The coefficients, lowest degree first.
    #[inline]
    pub fn coeffs(&self) -> &[f64] {
        &self.0
    }

    /// The number of stored coefficients minus one.
    ///
    /// Trailing zero coefficients are not trimmed.
    #[inline]
    pub fn degree(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Evaluate by Horner's rule.
    pub fn eval(&self, t: f64) -> f64 {
        self.0.iter().rev().fold(0.0, |acc, c| acc * t + c)
    }

    /// The derivative polynomial.
    #[must_use]
    pub fn deriv(&self) -> Poly {
        Poly(
            self.0
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, c)| i as f64 * c)
                .collect(),
        )
    }

    /// The polynomial `q(s) = p(a + (b - a) s)`.
    ///
    /// This maps the parameter range `a..b` onto `0..1`.
    #[must_use]
    pub fn reparam(&self, range: Range<f64>) -> Poly {
        let a = range.start;
        let h = range.end - range.start;
        // Horner's rule over polynomials in s.
        let mut q: SmallVec<[f64; 4]> = smallvec![0.0; self.0.len()];
        for (m, &c) in self.0.iter().rev().enumerate() {
            // q := q * (a + h s) + c
            let mut prev = 0.0;
            for coeff in q.iter_mut().take(m + 1) {
                let cur = *coeff;
                *coeff = cur * a + prev * h;
                prev = cur;
            }
            q[0] += c;
        }
        Poly(q)
    }
}

/// A planar curve whose coordinates are power-basis polynomials.
///
/// This is the cached evaluation form of a [`BezierCurve`], and also the
/// result of differentiating one.
///
/// [`BezierCurve`]: crate::BezierCurve
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolyCurve {
    /// The x coordinate polynomial.
    pub x: Poly,
    /// The y coordinate polynomial.
    pub y: Poly,
}

impl PolyCurve {
    /// Convert Bézier control points to power-basis coefficients.
    ///
    /// For `n + 1` control points, coefficient `i` of each coordinate is
    /// `C(n, i) · Σ_{j ≤ i} (-1)^(i + j) · C(i, j) · P_j`.
    pub fn from_bezier(points: &[Point]) -> PolyCurve {
        let n = points.len().saturating_sub(1);
        let mut xs: SmallVec<[f64; 4]> = SmallVec::with_capacity(points.len());
        let mut ys: SmallVec<[f64; 4]> = SmallVec::with_capacity(points.len());
        for i in 0..points.len() {
            let mut sx = 0.0;
            let mut sy = 0.0;
            for (j, p) in points.iter().enumerate().take(i + 1) {
                let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
                let w = sign * binomial(i, j);
                sx += w * p.x;
                sy += w * p.y;
            }
            let c = binomial(n, i);
            xs.push(c * sx);
            ys.push(c * sy);
        }
        PolyCurve {
            x: Poly(xs),
            y: Poly(ys),
        }
    }

    /// Evaluate as a direction vector.
    #[inline]
    pub fn eval_vec(&self, t: f64) -> Vec2 {
        Vec2::new(self.x.eval(t), self.y.eval(t))
    }

    /// Unit vector perpendicular to the curve direction at `t`.
    ///
    /// This is the derivative turned clockwise, so it points to the right of
    /// the direction of travel. Returns the zero vector where the derivative
    /// vanishes.
    pub fn perpendicular(&self, t: f64) -> Vec2 {
        self.deriv().eval_vec(t).turn_cw().normalize()
    }
}

impl ParamCurve for PolyCurve {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        Point::new(self.x.eval(t), self.y.eval(t))
    }

    fn subsegment(&self, range: Range<f64>) -> PolyCurve {
        PolyCurve {
            x: self.x.reparam(range.clone()),
            y: self.y.reparam(range),
        }
    }
}

impl ParamCurveDeriv for PolyCurve {
    type DerivResult = PolyCurve;

    fn deriv(&self) -> PolyCurve {
        PolyCurve {
            x: self.x.deriv(),
            y: self.y.deriv(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn horner() {
        let p = Poly::new([1.0, -2.0, 3.0]);
        assert_near(p.eval(0.0), 1.0);
        assert_near(p.eval(2.0), 9.0);
        assert_eq!(p.deriv(), Poly::new([-2.0, 6.0]));
        assert_eq!(Poly::default().eval(3.0), 0.0);
    }

    #[test]
    fn reparam_matches_direct_eval() {
        let p = Poly::new([0.5, -1.0, 2.0, 4.0]);
        let q = p.reparam(0.25..0.75);
        for i in 0..=10 {
            let s = i as f64 * 0.1;
            assert_near(q.eval(s), p.eval(0.25 + 0.5 * s));
        }
    }

    #[test]
    fn cubic_coefficients() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 2.0),
            Point::new(3.0, 2.0),
            Point::new(4.0, 0.0),
        ];
        let c = PolyCurve::from_bezier(&pts);
        // x(t) = 3t + 3t² - 2t³, y(t) = 6t - 6t²
        assert_eq!(c.x.coeffs(), &[0.0, 3.0, 3.0, -2.0]);
        assert_eq!(c.y.coeffs(), &[0.0, 6.0, -6.0, 0.0]);
        let mid = c.eval(0.5);
        assert_near(mid.x, 2.0);
        assert_near(mid.y, 1.5);
    }

    #[test]
    fn perpendicular_of_line() {
        let c = PolyCurve::from_bezier(&[Point::new(0.0, 0.0), Point::new(0.0, 10.0)]);
        let n = c.perpendicular(0.5);
        assert_near(n.x, 1.0);
        assert_near(n.y, 0.0);
    }
}

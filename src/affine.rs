// Copyright 2026 the Skelpen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Affine transforms.

use core::ops::{Mul, MulAssign};

use crate::{Point, Rect, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A 2D affine transform.
///
/// The width and slant stages of the pipeline are expressed as affine maps
/// applied to control points.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affine([f64; 6]);

impl Affine {
    /// The identity transform.
    pub const IDENTITY: Affine = Affine::scale_non_uniform(1.0, 1.0);

    /// Construct an affine transform from coefficients.
    ///
    /// If the coefficients are `(a, b, c, d, e, f)`, then the resulting
    /// transformation represents this augmented matrix:
    ///
    /// ```text
    /// | a c e |
    /// | b d f |
    /// | 0 0 1 |
    /// ```
    #[inline(always)]
    pub const fn new(c: [f64; 6]) -> Affine {
        Affine(c)
    }

    /// An affine transform representing non-uniform scaling.
    #[inline(always)]
    pub const fn scale_non_uniform(s_x: f64, s_y: f64) -> Affine {
        Affine([s_x, 0.0, 0.0, s_y, 0.0, 0.0])
    }

    /// An affine transform representing translation.
    #[inline(always)]
    pub fn translate<V: Into<Vec2>>(p: V) -> Affine {
        let p = p.into();
        Affine([1.0, 0.0, 0.0, 1.0, p.x, p.y])
    }

    /// An affine transformation representing a skew.
    ///
    /// A horizontal skew of `skew_x` moves each point right by `skew_x * y`.
    #[inline(always)]
    pub fn skew(skew_x: f64, skew_y: f64) -> Affine {
        Affine([1.0, skew_y, skew_x, 1.0, 0.0, 0.0])
    }

    /// Horizontal scale by `factor` about the vertical line through `region`'s center.
    pub fn scale_x_about_center(factor: f64, region: Rect) -> Affine {
        let cx = region.center().x;
        Affine::translate((-cx, 0.0))
            .then_scale_non_uniform(factor, 1.0)
            .then_translate(Vec2::new(cx, 0.0))
    }

    /// Faux-italic slant by `angle` radians, anchored at the baseline `y0`.
    ///
    /// Points on `y = y0` stay fixed; a point is displaced horizontally by
    /// `(y - y0) * tan(angle)`.
    pub fn slant(angle: f64, y0: f64) -> Affine {
        Affine::translate((0.0, -y0))
            .then(Affine::skew(angle.tan(), 0.0))
            .then_translate(Vec2::new(0.0, y0))
    }

    /// A transformation that applies `self` and then `other`.
    #[inline]
    #[must_use]
    pub fn then(self, other: Affine) -> Affine {
        other * self
    }

    /// A transformation that is `self` followed by a non-uniform scale.
    #[inline]
    #[must_use]
    pub fn then_scale_non_uniform(self, sx: f64, sy: f64) -> Self {
        Affine([
            self.0[0] * sx,
            self.0[1] * sy,
            self.0[2] * sx,
            self.0[3] * sy,
            self.0[4] * sx,
            self.0[5] * sy,
        ])
    }

    /// A transformation that is `self` followed by a translation.
    #[inline(always)]
    #[must_use]
    pub fn then_translate(mut self, trans: Vec2) -> Self {
        self.0[4] += trans.x;
        self.0[5] += trans.y;
        self
    }

    /// Map a line normal through the transform, returning a unit vector.
    ///
    /// Normals transform by the inverse transpose of the linear part, so a
    /// line with normal `n` maps to a line with normal `transform_normal(n)`.
    pub fn transform_normal(self, n: Vec2) -> Vec2 {
        let [a, b, c, d, _, _] = self.0;
        let det = a * d - b * c;
        if det == 0.0 {
            return n;
        }
        Vec2::new((d * n.x - b * n.y) / det, (a * n.y - c * n.x) / det).normalize()
    }
}

impl Default for Affine {
    #[inline]
    fn default() -> Affine {
        Affine::IDENTITY
    }
}

impl Mul<Point> for Affine {
    type Output = Point;

    #[inline]
    fn mul(self, other: Point) -> Point {
        Point::new(
            self.0[0] * other.x + self.0[2] * other.y + self.0[4],
            self.0[1] * other.x + self.0[3] * other.y + self.0[5],
        )
    }
}

impl Mul for Affine {
    type Output = Affine;

    #[inline]
    fn mul(self, other: Affine) -> Affine {
        Affine([
            self.0[0] * other.0[0] + self.0[2] * other.0[1],
            self.0[1] * other.0[0] + self.0[3] * other.0[1],
            self.0[0] * other.0[2] + self.0[2] * other.0[3],
            self.0[1] * other.0[2] + self.0[3] * other.0[3],
            self.0[0] * other.0[4] + self.0[2] * other.0[5] + self.0[4],
            self.0[1] * other.0[4] + self.0[3] * other.0[5] + self.0[5],
        ])
    }
}

impl MulAssign for Affine {
    #[inline]
    fn mul_assign(&mut self, other: Affine) {
        *self = self.mul(other);
    }
}

#[cfg(feature = "mint")]
impl From<Affine> for mint::ColumnMatrix2x3<f64> {
    #[inline(always)]
    fn from(a: Affine) -> mint::ColumnMatrix2x3<f64> {
        mint::ColumnMatrix2x3 {
            x: mint::Vector2 {
                x: a.0[0],
                y: a.0[1],
            },
            y: mint::Vector2 {
                x: a.0[2],
                y: a.0[3],
            },
            z: mint::Vector2 {
                x: a.0[4],
                y: a.0[5],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(p0: Point, p1: Point) {
        assert!((p1 - p0).hypot() < 1e-9, "{p0:?} != {p1:?}");
    }

    #[test]
    fn affine_basic() {
        let p = Point::new(3.0, 4.0);
        assert_near(Affine::default() * p, p);
        assert_near(Affine::scale_non_uniform(2.0, 3.0) * p, Point::new(6.0, 12.0));
        assert_near(Affine::translate((5.0, 6.0)) * p, Point::new(8.0, 10.0));
    }

    #[test]
    fn affine_mul() {
        let a1 = Affine::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let a2 = Affine::new([0.1, 1.2, 2.3, 3.4, 4.5, 5.6]);
        let px = Point::new(1.0, 0.0);
        let py = Point::new(0.0, 1.0);
        let pxy = Point::new(1.0, 1.0);
        assert_near(a1 * (a2 * px), (a1 * a2) * px);
        assert_near(a1 * (a2 * py), (a1 * a2) * py);
        assert_near(a1 * (a2 * pxy), (a1 * a2) * pxy);
    }

    #[test]
    fn width_scale_keeps_center() {
        let region = Rect::new(0.0, -200.0, 940.0, 800.0);
        let a = Affine::scale_x_about_center(0.7, region);
        assert_near(a * Point::new(470.0, 100.0), Point::new(470.0, 100.0));
        assert_near(a * Point::new(0.0, 0.0), Point::new(141.0, 0.0));
    }

    #[test]
    fn slant_fixes_baseline() {
        let a = Affine::slant(core::f64::consts::FRAC_PI_4, -200.0);
        assert_near(a * Point::new(10.0, -200.0), Point::new(10.0, -200.0));
        assert_near(a * Point::new(10.0, 0.0), Point::new(210.0, 0.0));
        // Vectors see only the shear.
        let v = a * Point::new(0.0, 1.0) - a * Point::ZERO;
        assert!((v.x - 1.0).abs() < 1e-12 && (v.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn normals_stay_perpendicular() {
        let a = Affine::scale_non_uniform(0.5, 1.0).then(Affine::skew(0.3, 0.0));
        let dir = Vec2::new(1.0, 2.0);
        let n = dir.turn_cw();
        let dir2 = a * dir.to_point() - a * Point::ZERO;
        let n2 = a.transform_normal(n);
        assert!(dir2.dot(n2).abs() < 1e-12);
        assert!((n2.hypot() - 1.0).abs() < 1e-12);
    }
}

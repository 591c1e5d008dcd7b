// Copyright 2026 the Skelpen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offset curve computation.
//!
//! Curves are offset by moving their control polygon (the Tiller-Hanson
//! method): every edge of the polygon is pushed sideways by the pen, and
//! interior control points land where neighbouring pushed edges meet.

use smallvec::SmallVec;

use crate::{BezierCurve, Point, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Below this magnitude of the cross product of two unit edge directions,
/// the edges are treated as parallel and no miter is solved.
const PARALLEL_TOLERANCE: f64 = 1e-4;

/// An elliptical broad-nib pen.
///
/// The pen reaches `delta` units from the centre line, scaled per axis by
/// the curve's offset vector and distorted by `contrast`. A contrast of 1
/// keeps the offset vector's shape; contrast above 1 narrows the pen
/// vertically (thin horizontals) and contrast below 1 narrows it
/// horizontally (thin verticals).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pen {
    /// Signed offset distance; negative offsets to the left of travel.
    pub delta: f64,
    /// Pen contrast, 1 for no contrast.
    pub contrast: f64,
}

impl Pen {
    /// A pen reaching `delta` with the given contrast.
    #[inline]
    pub const fn new(delta: f64, contrast: f64) -> Pen {
        Pen { delta, contrast }
    }

    /// The same pen offsetting to the other side.
    #[inline]
    #[must_use]
    pub fn flip(self) -> Pen {
        Pen {
            delta: -self.delta,
            contrast: self.contrast,
        }
    }

    /// Semi-axes of the pen ellipse for an offset vector.
    pub fn radii(&self, offset_vector: Vec2) -> Vec2 {
        let (ox, oy) = (offset_vector.x.abs(), offset_vector.y.abs());
        if self.contrast >= 1.0 {
            Vec2::new(ox, oy / self.contrast)
        } else {
            Vec2::new(ox * self.contrast, oy)
        }
    }

    /// Length factor of the pen along unit direction `u`.
    ///
    /// This is the distance from the centre of the unit-scaled pen ellipse to
    /// its boundary in direction `u`: `sqrt(1 / ((ux/rx)² + (uy/ry)²))`.
    pub fn reach(&self, offset_vector: Vec2, u: Vec2) -> f64 {
        let r = self.radii(offset_vector);
        let term = |c: f64, r: f64| if c == 0.0 { 0.0 } else { (c / r) * (c / r) };
        let denom = term(u.x, r.x) + term(u.y, r.y);
        if denom == 0.0 {
            return 0.0;
        }
        (1.0 / denom).sqrt()
    }

    /// Displacement of the pen along unit direction `u`.
    #[inline]
    pub fn displacement(&self, offset_vector: Vec2, u: Vec2) -> Vec2 {
        u * (self.delta * self.reach(offset_vector, u))
    }

    /// Offset a point beside an edge with unit direction `dir`.
    #[inline]
    pub fn beside(&self, p: Point, dir: Vec2, offset_vector: Vec2) -> Point {
        p + self.displacement(offset_vector, dir.turn_cw())
    }

    /// Offset position of `cur` given its polygon neighbours.
    ///
    /// `ov_in` is the offset vector on the edge arriving from `prev`, and
    /// `ov_out` the one on the edge leaving towards `next`. With a single
    /// neighbour the point is pushed perpendicular to that edge. With both,
    /// the two pushed edges are intersected (a miter), falling back to the
    /// midpoint of the two candidates when the edges are nearly parallel.
    /// With neither, or with only coincident neighbours, `cur` is returned.
    pub fn offset_point(
        &self,
        cur: Point,
        prev: Option<Point>,
        next: Option<Point>,
        ov_in: Vec2,
        ov_out: Vec2,
    ) -> Point {
        let incoming = prev
            .filter(|p| *p != cur)
            .map(|p| (cur - p).normalize());
        let outgoing = next
            .filter(|p| *p != cur)
            .map(|p| (p - cur).normalize());
        match (incoming, outgoing) {
            (None, None) => cur,
            (Some(t1), None) => self.beside(cur, t1, ov_in),
            (None, Some(t2)) => self.beside(cur, t2, ov_out),
            (Some(t1), Some(t2)) => {
                let a = self.beside(cur, t1, ov_in);
                let b = self.beside(cur, t2, ov_out);
                let cross = t1.cross(t2);
                if cross.abs() < PARALLEL_TOLERANCE {
                    return a.midpoint(b);
                }
                // a + s t1 = b + r t2
                let s = (b - a).cross(t2) / cross;
                a + s * t1
            }
        }
    }
}

/// The nearest control point before `i` that differs from point `i`.
pub(crate) fn distinct_before(points: &[Point], i: usize) -> Option<Point> {
    points[..i].iter().rev().find(|p| **p != points[i]).copied()
}

/// The nearest control point after `i` that differs from point `i`.
pub(crate) fn distinct_after(points: &[Point], i: usize) -> Option<Point> {
    points[i + 1..].iter().find(|p| **p != points[i]).copied()
}

/// Offset a curve by moving its control polygon with `pen`.
///
/// The result has the order of `curve` and the default pen data. Control
/// point `i` uses the offset vector interpolated at `i`.
pub fn offset_curve(curve: &BezierCurve, pen: &Pen) -> BezierCurve {
    let points = curve.points();
    let n = curve.order();
    let offset: SmallVec<[Point; 4]> = (0..points.len())
        .map(|i| {
            let prev = if i == 0 { None } else { distinct_before(points, i) };
            let next = if i == n { None } else { distinct_after(points, i) };
            let ov = curve.offset_vector_at_t(i as f64 / n as f64);
            pen.offset_point(points[i], prev, next, ov, ov)
        })
        .collect();
    BezierCurve::from_points_unchecked(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParamCurve;

    fn assert_near(p0: Point, p1: Point) {
        assert!((p1 - p0).hypot() < 1e-9, "{p0:?} != {p1:?}");
    }

    #[test]
    fn straight_line_offset() {
        let c = BezierCurve::line((0.0, 0.0), (10.0, 0.0));
        let o = offset_curve(&c, &Pen::new(5.0, 1.0));
        assert_eq!(o.start(), Point::new(0.0, -5.0));
        assert_eq!(o.end(), Point::new(10.0, -5.0));
        let other = offset_curve(&c, &Pen::new(-5.0, 1.0));
        assert_eq!(other.start(), Point::new(0.0, 5.0));
    }

    #[test]
    fn isotropic_reach_is_one() {
        let pen = Pen::new(1.0, 1.0);
        let ov = Vec2::new(1.0, 1.0);
        for dir in [
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, -1.0),
            Vec2::new(0.6, 0.8),
        ] {
            assert!((pen.reach(ov, dir) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn contrast_thins_horizontals() {
        let pen = Pen::new(10.0, 1.4);
        let ov = Vec2::new(1.0, 1.0);
        // The thickness of a horizontal stroke is its vertical reach.
        let vertical = pen.reach(ov, Vec2::new(0.0, 1.0));
        let horizontal = pen.reach(ov, Vec2::new(1.0, 0.0));
        assert!((vertical - 1.0 / 1.4).abs() < 1e-12);
        assert!((horizontal - 1.0).abs() < 1e-12);
        let low = Pen::new(10.0, 0.6);
        assert!((low.reach(ov, Vec2::new(1.0, 0.0)) - 0.6).abs() < 1e-12);
        assert!((low.reach(ov, Vec2::new(0.0, 1.0)) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn anisotropic_offset_vector() {
        let c = BezierCurve::builder([(0.0, 0.0), (0.0, 10.0)])
            .with_offset_vector((2.0, 1.0))
            .build()
            .unwrap();
        // A vertical stroke is pushed horizontally, scaled by ox.
        let o = offset_curve(&c, &Pen::new(5.0, 1.0));
        assert_near(o.start(), Point::new(10.0, 0.0));
    }

    #[test]
    fn miter_at_right_angle() {
        let pen = Pen::new(1.0, 1.0);
        let ov = Vec2::new(1.0, 1.0);
        // Travel +x then +y: the right side is outside the corner.
        let p = pen.offset_point(
            Point::new(10.0, 0.0),
            Some(Point::new(0.0, 0.0)),
            Some(Point::new(10.0, 10.0)),
            ov,
            ov,
        );
        assert_near(p, Point::new(11.0, -1.0));
    }

    #[test]
    fn nearly_parallel_uses_midpoint() {
        let pen = Pen::new(1.0, 1.0);
        let ov = Vec2::new(1.0, 1.0);
        let p = pen.offset_point(
            Point::new(5.0, 0.0),
            Some(Point::new(0.0, 0.0)),
            Some(Point::new(10.0, 0.0)),
            ov,
            ov,
        );
        assert_near(p, Point::new(5.0, -1.0));
    }

    #[test]
    fn coincident_neighbours_are_skipped() {
        let c = BezierCurve::cubic((0.0, 0.0), (0.0, 0.0), (10.0, 0.0), (10.0, 0.0));
        let o = offset_curve(&c, &Pen::new(2.0, 1.0));
        for p in o.points() {
            assert!((p.y + 2.0).abs() < 1e-12, "{p:?}");
        }
    }

    #[test]
    fn interior_points_of_arch() {
        let c = BezierCurve::quad((0.0, 0.0), (5.0, 5.0), (10.0, 0.0));
        let o = offset_curve(&c, &Pen::new(1.0, 1.0));
        let s = core::f64::consts::FRAC_1_SQRT_2;
        assert_near(o.start(), Point::new(s, -s));
        // The apex moves straight down by sqrt(2).
        assert_near(o.points()[1], Point::new(5.0, 5.0 - 2f64.sqrt()));
        assert_near(o.end(), Point::new(10.0 - s, -s));
    }
}

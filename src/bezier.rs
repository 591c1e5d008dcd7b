// Copyright 2026 the Skelpen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bézier curves of arbitrary order, carrying pen data.

use alloc::vec::Vec;
use core::ops::{Mul, Range};

use smallvec::SmallVec;

use crate::metrics;
use crate::{
    Affine, CurveError, ParamCurve, ParamCurveArclen, ParamCurveArea, ParamCurveDeriv, Point,
    PolyCurve, Rect, Vec2,
};

/// The default offset vector: an isotropic pen.
pub const DEFAULT_OFFSET_VECTOR: Vec2 = Vec2::new(1.0, 1.0);

/// A Bézier curve of order `n ≥ 1` with `n + 1` control points.
///
/// Alongside its geometry a curve carries the pen data used when it is
/// stroked:
///
/// * an offset vector scaling the pen per axis, optionally varying linearly
///   to a second vector at the end of the curve;
/// * optional cutoff directions at either end, the normals of lines the
///   stroke must terminate flush against;
/// * optional extension references at either end, naming (by relative
///   segment index) the neighbouring segment the end must reach.
///
/// The power-basis coefficients are cached and kept in sync by every
/// mutating method.
///
/// A curve whose control points all coincide is a *joint*: a zero-length
/// corner placeholder between two segments.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "CurveData", into = "CurveData")
)]
pub struct BezierCurve {
    points: SmallVec<[Point; 4]>,
    coeffs: PolyCurve,
    offset_vector: Vec2,
    end_offset_vector: Option<Vec2>,
    cutoff_start: Option<Vec2>,
    cutoff_end: Option<Vec2>,
    extend_start: Option<isize>,
    extend_end: Option<isize>,
}

/// Builder for a [`BezierCurve`] with pen data.
///
/// Created by [`BezierCurve::builder`].
#[derive(Clone, Debug)]
#[must_use]
pub struct BezierBuilder {
    points: SmallVec<[Point; 4]>,
    offset_vector: Vec2,
    end_offset_vector: Option<Vec2>,
    cutoff_start: Option<Vec2>,
    cutoff_end: Option<Vec2>,
    extend_start: Option<isize>,
    extend_end: Option<isize>,
}

impl BezierBuilder {
    /// Set the offset vector at the start of the curve.
    pub fn with_offset_vector(mut self, v: impl Into<Vec2>) -> Self {
        self.offset_vector = v.into();
        self
    }

    /// Set the offset vector at the end of the curve.
    pub fn with_end_offset_vector(mut self, v: impl Into<Vec2>) -> Self {
        self.end_offset_vector = Some(v.into());
        self
    }

    /// Set the cutoff normal at the start of the curve.
    pub fn with_cutoff_start(mut self, v: impl Into<Vec2>) -> Self {
        self.cutoff_start = Some(v.into());
        self
    }

    /// Set the cutoff normal at the end of the curve.
    pub fn with_cutoff_end(mut self, v: impl Into<Vec2>) -> Self {
        self.cutoff_end = Some(v.into());
        self
    }

    /// Extend the start of the curve to the segment `offset` places away.
    pub fn with_extend_start(mut self, offset: isize) -> Self {
        self.extend_start = Some(offset);
        self
    }

    /// Extend the end of the curve to the segment `offset` places away.
    pub fn with_extend_end(mut self, offset: isize) -> Self {
        self.extend_end = Some(offset);
        self
    }

    /// Validate the points and build the curve.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidCurveDefinition`] with fewer than two
    /// points or any non-finite coordinate.
    pub fn build(self) -> Result<BezierCurve, CurveError> {
        if self.points.len() < 2 || !self.points.iter().all(|p| p.is_finite()) {
            return Err(CurveError::InvalidCurveDefinition {
                points: self.points.iter().filter(|p| p.is_finite()).count(),
            });
        }
        Ok(BezierCurve {
            coeffs: PolyCurve::from_bezier(&self.points),
            points: self.points,
            offset_vector: self.offset_vector,
            end_offset_vector: self.end_offset_vector,
            cutoff_start: self.cutoff_start,
            cutoff_end: self.cutoff_end,
            extend_start: self.extend_start,
            extend_end: self.extend_end,
        })
    }
}

impl BezierCurve {
    /// Create a curve from control points with an isotropic pen.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidCurveDefinition`] with fewer than two
    /// points or any non-finite coordinate.
    pub fn new<P: Into<Point>>(points: impl IntoIterator<Item = P>) -> Result<Self, CurveError> {
        Self::builder(points).build()
    }

    /// Start building a curve from control points.
    pub fn builder<P: Into<Point>>(points: impl IntoIterator<Item = P>) -> BezierBuilder {
        BezierBuilder {
            points: points.into_iter().map(Into::into).collect(),
            offset_vector: DEFAULT_OFFSET_VECTOR,
            end_offset_vector: None,
            cutoff_start: None,
            cutoff_end: None,
            extend_start: None,
            extend_end: None,
        }
    }

    /// A curve with default pen data from at least two control points.
    pub(crate) fn from_points_unchecked(points: SmallVec<[Point; 4]>) -> Self {
        BezierCurve {
            coeffs: PolyCurve::from_bezier(&points),
            points,
            offset_vector: DEFAULT_OFFSET_VECTOR,
            end_offset_vector: None,
            cutoff_start: None,
            cutoff_end: None,
            extend_start: None,
            extend_end: None,
        }
    }

    /// A straight line.
    pub fn line(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        Self::from_points_unchecked(SmallVec::from_buf_and_len(
            [p0.into(), p1.into(), Point::ZERO, Point::ZERO],
            2,
        ))
    }

    /// A quadratic curve.
    pub fn quad(p0: impl Into<Point>, p1: impl Into<Point>, p2: impl Into<Point>) -> Self {
        Self::from_points_unchecked(SmallVec::from_buf_and_len(
            [p0.into(), p1.into(), p2.into(), Point::ZERO],
            3,
        ))
    }

    /// A cubic curve.
    pub fn cubic(
        p0: impl Into<Point>,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> Self {
        Self::from_points_unchecked(SmallVec::from_buf([
            p0.into(),
            p1.into(),
            p2.into(),
            p3.into(),
        ]))
    }

    /// A joint marker at `p`: a quadratic with three coincident points.
    pub fn joint(p: impl Into<Point>) -> Self {
        let p = p.into();
        Self::quad(p, p, p)
    }

    /// The order (degree) of the curve.
    #[inline]
    pub fn order(&self) -> usize {
        self.points.len() - 1
    }

    /// All control points.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The interior control points, excluding both endpoints.
    #[inline]
    pub fn control_points(&self) -> &[Point] {
        &self.points[1..self.points.len() - 1]
    }

    /// Control point `i`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::IndexOutOfRange`] if `i > order`.
    pub fn point(&self, i: usize) -> Result<Point, CurveError> {
        self.points
            .get(i)
            .copied()
            .ok_or(CurveError::IndexOutOfRange {
                index: i,
                len: self.points.len(),
            })
    }

    /// The cached power-basis form of the curve.
    #[inline]
    pub fn coefficients(&self) -> &PolyCurve {
        &self.coeffs
    }

    /// Unit vector perpendicular to the curve at `t`, pointing to the right
    /// of the direction of travel.
    pub fn perpendicular(&self, t: f64) -> Vec2 {
        self.coeffs.perpendicular(t)
    }

    /// Unit tangent at the start, skipping coincident leading control points.
    ///
    /// Returns the zero vector for a collapsed curve.
    pub fn start_tangent(&self) -> Vec2 {
        let p0 = self.points[0];
        self.points[1..]
            .iter()
            .find(|p| **p != p0)
            .map_or(Vec2::ZERO, |p| (*p - p0).normalize())
    }

    /// Unit tangent at the end, skipping coincident trailing control points.
    ///
    /// Returns the zero vector for a collapsed curve.
    pub fn end_tangent(&self) -> Vec2 {
        let n = self.order();
        let pn = self.points[n];
        self.points[..n]
            .iter()
            .rev()
            .find(|p| **p != pn)
            .map_or(Vec2::ZERO, |p| (pn - *p).normalize())
    }

    /// The offset vector at the start of the curve.
    #[inline]
    pub fn offset_vector(&self) -> Vec2 {
        self.offset_vector
    }

    /// The offset vector at the end of the curve, if it varies.
    #[inline]
    pub fn end_offset_vector(&self) -> Option<Vec2> {
        self.end_offset_vector
    }

    /// The effective offset vector at control point `i`.
    ///
    /// With an end offset vector this interpolates linearly by `i / order`;
    /// otherwise it is the start offset vector.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::IndexOutOfRange`] if `i > order`.
    pub fn offset_vector_at(&self, i: usize) -> Result<Vec2, CurveError> {
        if i >= self.points.len() {
            return Err(CurveError::IndexOutOfRange {
                index: i,
                len: self.points.len(),
            });
        }
        Ok(self.offset_vector_at_t(i as f64 / self.order() as f64))
    }

    /// The offset vector at parameter fraction `t` along the control polygon.
    pub(crate) fn offset_vector_at_t(&self, t: f64) -> Vec2 {
        match self.end_offset_vector {
            Some(end) => self.offset_vector.lerp(end, t),
            None => self.offset_vector,
        }
    }

    /// The cutoff normal at the start, if any.
    #[inline]
    pub fn cutoff_start(&self) -> Option<Vec2> {
        self.cutoff_start
    }

    /// The cutoff normal at the end, if any.
    #[inline]
    pub fn cutoff_end(&self) -> Option<Vec2> {
        self.cutoff_end
    }

    /// The relative segment index the start must be extended to, if any.
    #[inline]
    pub fn extend_start(&self) -> Option<isize> {
        self.extend_start
    }

    /// The relative segment index the end must be extended to, if any.
    #[inline]
    pub fn extend_end(&self) -> Option<isize> {
        self.extend_end
    }

    /// Whether all control points coincide.
    pub fn is_collapsed(&self) -> bool {
        let p0 = self.points[0];
        self.points[1..].iter().all(|p| *p == p0)
    }

    /// Whether the endpoints coincide, leaving the tangent undefined.
    pub fn is_closed(&self) -> bool {
        self.points[0] == self.points[self.order()]
    }

    /// Split at `t` by De Casteljau subdivision.
    ///
    /// Both halves keep the order of `self`. The offset vector is split at
    /// `t` too; the start cutoff and extension go to the left half and the
    /// end ones to the right half.
    pub fn split(&self, t: f64) -> (BezierCurve, BezierCurve) {
        let n = self.points.len();
        let mut work = self.points.clone();
        let mut left: SmallVec<[Point; 4]> = SmallVec::with_capacity(n);
        let mut right: SmallVec<[Point; 4]> = SmallVec::with_capacity(n);
        left.push(work[0]);
        right.push(work[n - 1]);
        for level in 1..n {
            for i in 0..n - level {
                work[i] = work[i].lerp(work[i + 1], t);
            }
            left.push(work[0]);
            right.push(work[n - 1 - level]);
        }
        right.reverse();
        let mid_vector = self.offset_vector_at_t(t);
        let mut l = Self::from_points_unchecked(left);
        let mut r = Self::from_points_unchecked(right);
        l.offset_vector = self.offset_vector;
        r.offset_vector = mid_vector;
        if self.end_offset_vector.is_some() {
            l.end_offset_vector = Some(mid_vector);
            r.end_offset_vector = self.end_offset_vector;
        }
        l.cutoff_start = self.cutoff_start;
        l.extend_start = self.extend_start;
        r.cutoff_end = self.cutoff_end;
        r.extend_end = self.extend_end;
        (l, r)
    }

    /// The same curve traversed in the opposite direction.
    ///
    /// Offset vectors, cutoffs and extensions swap ends.
    #[must_use]
    pub fn reverse(&self) -> BezierCurve {
        let mut points = self.points.clone();
        points.reverse();
        let mut c = Self::from_points_unchecked(points);
        match self.end_offset_vector {
            Some(end) => {
                c.offset_vector = end;
                c.end_offset_vector = Some(self.offset_vector);
            }
            None => c.offset_vector = self.offset_vector,
        }
        c.cutoff_start = self.cutoff_end;
        c.cutoff_end = self.cutoff_start;
        c.extend_start = self.extend_end;
        c.extend_end = self.extend_start;
        c
    }

    /// Replace control point `i`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::IndexOutOfRange`] if `i > order`.
    pub fn set_point(&mut self, i: usize, p: Point) -> Result<(), CurveError> {
        let len = self.points.len();
        let slot = self
            .points
            .get_mut(i)
            .ok_or(CurveError::IndexOutOfRange { index: i, len })?;
        *slot = p;
        self.coeffs = PolyCurve::from_bezier(&self.points);
        Ok(())
    }

    /// Replace the first control point.
    pub fn set_start_point(&mut self, p: Point) {
        self.points[0] = p;
        self.coeffs = PolyCurve::from_bezier(&self.points);
    }

    /// Replace the last control point.
    pub fn set_end_point(&mut self, p: Point) {
        let n = self.order();
        self.points[n] = p;
        self.coeffs = PolyCurve::from_bezier(&self.points);
    }

    /// Replace the start offset vector.
    pub fn set_offset_vector(&mut self, v: Vec2) {
        self.offset_vector = v;
    }

    /// Replace (or clear) the end offset vector.
    pub fn set_end_offset_vector(&mut self, v: Option<Vec2>) {
        self.end_offset_vector = v;
    }

    /// Replace (or clear) the start cutoff normal.
    pub fn set_cutoff_start(&mut self, v: Option<Vec2>) {
        self.cutoff_start = v;
    }

    /// Replace (or clear) the end cutoff normal.
    pub fn set_cutoff_end(&mut self, v: Option<Vec2>) {
        self.cutoff_end = v;
    }

    /// Replace (or clear) the start extension reference.
    pub fn set_extend_start(&mut self, offset: Option<isize>) {
        self.extend_start = offset;
    }

    /// Replace (or clear) the end extension reference.
    pub fn set_extend_end(&mut self, offset: Option<isize>) {
        self.extend_end = offset;
    }

    /// Copy the pen data (offset vectors, cutoffs and extensions) of `other`.
    pub fn copy_pen_data(&mut self, other: &BezierCurve) {
        self.offset_vector = other.offset_vector;
        self.end_offset_vector = other.end_offset_vector;
        self.cutoff_start = other.cutoff_start;
        self.cutoff_end = other.cutoff_end;
        self.extend_start = other.extend_start;
        self.extend_end = other.extend_end;
    }

    /// The bounding box of the control polygon.
    ///
    /// This contains the curve, but is not necessarily tight.
    pub fn bounding_box(&self) -> Rect {
        let p0 = self.points[0];
        self.points[1..]
            .iter()
            .fold(Rect::from_points(p0, p0), |r, p| r.union_pt(*p))
    }
}

impl ParamCurve for BezierCurve {
    /// Evaluate the curve.
    ///
    /// The endpoints are returned exactly at `t = 0` and `t = 1`.
    #[inline]
    fn eval(&self, t: f64) -> Point {
        if t == 1.0 {
            return self.points[self.order()];
        }
        self.coeffs.eval(t)
    }

    fn subsegment(&self, range: Range<f64>) -> BezierCurve {
        let (_, right) = self.split(range.start);
        if range.start >= 1.0 {
            return right;
        }
        let (left, _) = right.split((range.end - range.start) / (1.0 - range.start));
        left
    }

    #[inline]
    fn start(&self) -> Point {
        self.points[0]
    }

    #[inline]
    fn end(&self) -> Point {
        self.points[self.order()]
    }
}

impl ParamCurveDeriv for BezierCurve {
    type DerivResult = PolyCurve;

    fn deriv(&self) -> PolyCurve {
        self.coeffs.deriv()
    }
}

impl ParamCurveArclen for BezierCurve {
    fn arclen(&self, accuracy: f64) -> f64 {
        metrics::length_with(self, 0.0, 1.0, accuracy, metrics::DEFAULT_MAX_EVAL)
    }
}

impl ParamCurveArea for BezierCurve {
    /// Exact signed area from the power-basis polynomials.
    fn signed_area(&self) -> f64 {
        let x = self.coeffs.x.coeffs();
        let y = self.coeffs.y.coeffs();
        let dx = self.coeffs.x.deriv();
        let dy = self.coeffs.y.deriv();
        let mut area = 0.0;
        // ∫₀¹ (x y' - y x') dt, term by term.
        for (i, (xi, yi)) in x.iter().zip(y).enumerate() {
            for (j, (dxj, dyj)) in dx.coeffs().iter().zip(dy.coeffs()).enumerate() {
                area += (xi * dyj - yi * dxj) / (i + j + 1) as f64;
            }
        }
        0.5 * area
    }
}

impl Mul<&BezierCurve> for Affine {
    type Output = BezierCurve;

    /// Transform the control points.
    ///
    /// Offset vectors describe the pen and are kept as they are; cutoff
    /// normals are carried through the transform so that they stay
    /// perpendicular to their cut lines.
    fn mul(self, c: &BezierCurve) -> BezierCurve {
        let mut out = BezierCurve::from_points_unchecked(c.points.iter().map(|p| self * *p).collect());
        out.copy_pen_data(c);
        out.cutoff_start = c.cutoff_start.map(|n| self.transform_normal(n));
        out.cutoff_end = c.cutoff_end.map(|n| self.transform_normal(n));
        out
    }
}

impl Mul<BezierCurve> for Affine {
    type Output = BezierCurve;

    #[inline]
    fn mul(self, c: BezierCurve) -> BezierCurve {
        self * &c
    }
}

/// The plain data form of a [`BezierCurve`].
///
/// This is the shape a loader hands over: the control points plus whatever
/// pen data the curve carries.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveData {
    /// Control points.
    pub points: Vec<Point>,
    /// Offset vector at the start, isotropic if absent.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub offset_vector: Option<Vec2>,
    /// Offset vector at the end.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub end_offset_vector: Option<Vec2>,
    /// Cutoff normal at the start.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub cutoff_start: Option<Vec2>,
    /// Cutoff normal at the end.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub cutoff_end: Option<Vec2>,
    /// Relative segment index the start extends to.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub extend_start: Option<isize>,
    /// Relative segment index the end extends to.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub extend_end: Option<isize>,
}

impl TryFrom<CurveData> for BezierCurve {
    type Error = CurveError;

    fn try_from(data: CurveData) -> Result<Self, CurveError> {
        let mut b = BezierCurve::builder(data.points);
        b.offset_vector = data.offset_vector.unwrap_or(DEFAULT_OFFSET_VECTOR);
        b.end_offset_vector = data.end_offset_vector;
        b.cutoff_start = data.cutoff_start;
        b.cutoff_end = data.cutoff_end;
        b.extend_start = data.extend_start;
        b.extend_end = data.extend_end;
        b.build()
    }
}

impl From<BezierCurve> for CurveData {
    fn from(c: BezierCurve) -> CurveData {
        CurveData {
            points: c.points.to_vec(),
            offset_vector: (c.offset_vector != DEFAULT_OFFSET_VECTOR).then_some(c.offset_vector),
            end_offset_vector: c.end_offset_vector,
            cutoff_start: c.cutoff_start,
            cutoff_end: c.cutoff_end,
            extend_start: c.extend_start,
            extend_end: c.extend_end,
        }
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for BezierCurve {
    fn schema_name() -> alloc::string::String {
        CurveData::schema_name()
    }

    fn json_schema(r#gen: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        CurveData::json_schema(r#gen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn assert_near(p0: Point, p1: Point, epsilon: f64) {
        assert!((p1 - p0).hypot() < epsilon, "{p0:?} != {p1:?}");
    }

    fn sample_cubic() -> BezierCurve {
        BezierCurve::cubic((0.0, 0.0), (1.0, 2.0), (3.0, 2.0), (4.0, 0.0))
    }

    #[test]
    fn construction_errors() {
        assert_eq!(
            BezierCurve::new([(1.0, 1.0)]),
            Err(CurveError::InvalidCurveDefinition { points: 1 })
        );
        assert_eq!(
            BezierCurve::new([(0.0, 0.0), (f64::NAN, 1.0)]),
            Err(CurveError::InvalidCurveDefinition { points: 1 })
        );
        let c = BezierCurve::new([(0.0, 0.0), (1.0, 0.0), (2.0, 1.0)]).unwrap();
        assert_eq!(c.order(), 2);
        assert_eq!(c.control_points(), &[Point::new(1.0, 0.0)]);
        assert_eq!(
            c.point(3),
            Err(CurveError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn endpoints_exact() {
        let mut rng = rand::rng();
        for order in 1..=5 {
            let pts: Vec<Point> = (0..=order)
                .map(|_| Point::new(rng.random_range(-500.0..500.0), rng.random_range(-500.0..500.0)))
                .collect();
            let c = BezierCurve::new(pts.iter().copied()).unwrap();
            assert_eq!(c.eval(0.0), pts[0]);
            assert_eq!(c.eval(1.0), pts[order]);
        }
    }

    #[test]
    fn split_matches_eval() {
        let c = sample_cubic();
        let (l, r) = c.split(0.3);
        let at = c.eval(0.3);
        assert_near(l.eval(1.0), at, 1e-12);
        assert_near(r.eval(0.0), at, 1e-12);
        assert_eq!(l.order(), 3);
        assert_eq!(r.order(), 3);
        for i in 0..=10 {
            let t = i as f64 * 0.1;
            assert_near(l.eval(t), c.eval(0.3 * t), 1e-12);
            assert_near(r.eval(t), c.eval(0.3 + 0.7 * t), 1e-12);
        }
    }

    #[test]
    fn split_carries_pen_data() {
        let c = BezierCurve::builder([(0.0, 0.0), (10.0, 0.0)])
            .with_offset_vector((1.0, 1.0))
            .with_end_offset_vector((3.0, 1.0))
            .with_cutoff_start((0.0, 1.0))
            .with_extend_end(2)
            .build()
            .unwrap();
        let (l, r) = c.split(0.5);
        assert_eq!(l.offset_vector(), Vec2::new(1.0, 1.0));
        assert_eq!(l.end_offset_vector(), Some(Vec2::new(2.0, 1.0)));
        assert_eq!(r.offset_vector(), Vec2::new(2.0, 1.0));
        assert_eq!(l.cutoff_start(), Some(Vec2::new(0.0, 1.0)));
        assert_eq!(r.cutoff_start(), None);
        assert_eq!(r.extend_end(), Some(2));
        assert_eq!(l.extend_end(), None);
    }

    #[test]
    fn offset_vector_interpolation() {
        let c = BezierCurve::builder([(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)])
            .with_offset_vector((1.0, 2.0))
            .with_end_offset_vector((3.0, 4.0))
            .build()
            .unwrap();
        assert_eq!(c.offset_vector_at(0).unwrap(), Vec2::new(1.0, 2.0));
        assert_eq!(c.offset_vector_at(1).unwrap(), Vec2::new(2.0, 3.0));
        assert_eq!(c.offset_vector_at(2).unwrap(), Vec2::new(3.0, 4.0));
        assert!(c.offset_vector_at(3).is_err());
        let plain = sample_cubic();
        assert_eq!(plain.offset_vector_at(2).unwrap(), DEFAULT_OFFSET_VECTOR);
    }

    #[test]
    fn reverse_swaps_ends() {
        let c = BezierCurve::builder([(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)])
            .with_end_offset_vector((2.0, 2.0))
            .with_cutoff_end((1.0, 0.0))
            .with_extend_start(-1)
            .build()
            .unwrap();
        let r = c.reverse();
        assert_eq!(r.start(), Point::new(2.0, 0.0));
        assert_eq!(r.offset_vector(), Vec2::new(2.0, 2.0));
        assert_eq!(r.end_offset_vector(), Some(DEFAULT_OFFSET_VECTOR));
        assert_eq!(r.cutoff_start(), Some(Vec2::new(1.0, 0.0)));
        assert_eq!(r.extend_end(), Some(-1));
        assert_eq!(r.reverse(), c);
        assert_near(r.eval(0.25), c.eval(0.75), 1e-12);
    }

    #[test]
    fn joints_and_collapse() {
        let j = BezierCurve::joint((5.0, 5.0));
        assert!(j.is_collapsed());
        assert_eq!(j.order(), 2);
        assert!(!sample_cubic().is_collapsed());
        assert_eq!(j.start_tangent(), Vec2::ZERO);
    }

    #[test]
    fn mutation_recomputes_coefficients() {
        let mut c = sample_cubic();
        c.set_point(1, Point::new(0.0, 0.0)).unwrap();
        let fresh = BezierCurve::cubic((0.0, 0.0), (0.0, 0.0), (3.0, 2.0), (4.0, 0.0));
        assert_eq!(c.coefficients(), fresh.coefficients());
        c.set_end_point(Point::new(8.0, 0.0));
        assert_eq!(c.eval(1.0), Point::new(8.0, 0.0));
        assert_near(c.coefficients().eval(1.0), Point::new(8.0, 0.0), 1e-12);
        assert!(c.set_point(4, Point::ZERO).is_err());
    }

    #[test]
    fn tangents_skip_coincident_points() {
        let c = BezierCurve::cubic((0.0, 0.0), (0.0, 0.0), (0.0, 5.0), (5.0, 5.0));
        assert_near(c.start_tangent().to_point(), Point::new(0.0, 1.0), 1e-12);
        assert_near(c.end_tangent().to_point(), Point::new(1.0, 0.0), 1e-12);
    }

    #[test]
    fn perpendicular_rotates_clockwise() {
        let c = BezierCurve::line((0.0, 0.0), (10.0, 0.0));
        assert_near(c.perpendicular(0.5).to_point(), Point::new(0.0, -1.0), 1e-12);
    }

    #[test]
    fn area_of_closed_square() {
        let sides = [
            BezierCurve::line((0.0, 0.0), (2.0, 0.0)),
            BezierCurve::line((2.0, 0.0), (2.0, 2.0)),
            BezierCurve::line((2.0, 2.0), (0.0, 2.0)),
            BezierCurve::line((0.0, 2.0), (0.0, 0.0)),
        ];
        let area: f64 = sides.iter().map(ParamCurveArea::signed_area).sum();
        assert!((area - 4.0).abs() < 1e-12);
    }

    #[test]
    fn area_under_cubic() {
        // Closing the cubic with its chord: area is the integral of y dx.
        let c = sample_cubic();
        let chord = BezierCurve::line((4.0, 0.0), (0.0, 0.0));
        let area = c.signed_area() + chord.signed_area();
        // x' = 3 + 6t - 6t², y = 6t - 6t²; ∫ y x' dt = 4.2, clockwise.
        assert!((area + 4.2).abs() < 1e-12, "{area}");
    }

    #[test]
    fn subsegment_range() {
        let c = sample_cubic();
        let s = c.subsegment(0.2..0.6);
        assert_near(s.start(), c.eval(0.2), 1e-12);
        assert_near(s.end(), c.eval(0.6), 1e-12);
        assert_near(s.eval(0.5), c.eval(0.4), 1e-12);
    }

    #[test]
    fn affine_keeps_pen_data() {
        let c = BezierCurve::builder([(0.0, 0.0), (10.0, 0.0)])
            .with_offset_vector((2.0, 1.0))
            .with_cutoff_end((1.0, 0.0))
            .build()
            .unwrap();
        let t = Affine::scale_non_uniform(2.0, 1.0) * &c;
        assert_eq!(t.end(), Point::new(20.0, 0.0));
        assert_eq!(t.offset_vector(), Vec2::new(2.0, 1.0));
        assert_eq!(t.cutoff_end(), Some(Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn curve_data_round_trip() {
        let c = BezierCurve::builder([(0.0, 0.0), (1.0, 2.0)])
            .with_offset_vector((0.5, 1.0))
            .with_extend_start(1)
            .build()
            .unwrap();
        let data = CurveData::from(c.clone());
        assert_eq!(data.offset_vector, Some(Vec2::new(0.5, 1.0)));
        assert_eq!(BezierCurve::try_from(data).unwrap(), c);
        let bad = CurveData::default();
        assert!(BezierCurve::try_from(bad).is_err());
    }
}

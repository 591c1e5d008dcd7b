// Copyright 2026 the Skelpen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stroking a run of skeleton curves into a closed contour.

use alloc::vec::Vec;

use arrayvec::ArrayVec;

use crate::offset::{distinct_after, distinct_before, offset_curve, Pen};
use crate::{BezierCurve, Contour, ParamCurve, Point, Vec2};

/// Connecting lines shorter than this are omitted.
const MIN_CONNECTOR: f64 = 1e-9;

/// Below this, a cutoff line is treated as parallel to the stroke.
const CUTOFF_PARALLEL: f64 = 1e-9;

/// Describes the pen used to stroke a skeleton.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stroke {
    /// Half the stroke width.
    pub delta: f64,
    /// Corner rounding of open-end caps, from 0 (square) to 1 (round).
    pub roundness: f64,
    /// Broad-nib contrast, 1 for an even pen.
    pub contrast: f64,
}

impl Default for Stroke {
    fn default() -> Self {
        Stroke {
            delta: 1.0,
            roundness: 0.0,
            contrast: 1.0,
        }
    }
}

impl Stroke {
    /// Creates a new stroke reaching `delta` to each side.
    pub fn new(delta: f64) -> Self {
        Self {
            delta,
            ..Default::default()
        }
    }

    /// Builder method for setting the cap roundness.
    #[must_use]
    pub fn with_roundness(mut self, roundness: f64) -> Self {
        self.roundness = roundness;
        self
    }

    /// Builder method for setting the pen contrast.
    #[must_use]
    pub fn with_contrast(mut self, contrast: f64) -> Self {
        self.contrast = contrast;
        self
    }

    /// The pen offsetting to the right of travel.
    pub fn pen(&self) -> Pen {
        Pen::new(self.delta, self.contrast)
    }
}

/// Internal structure used for assembling a contour.
struct StrokeCtx<'a> {
    style: &'a Stroke,
    pen: Pen,
    /// Curves of the skeleton that have a well-defined direction.
    base: Vec<BezierCurve>,
}

/// Expand a run of connected curves into a closed outline.
///
/// The right side of the run is offset forward, the left side backward, and
/// the two sides are joined at each end. A run whose first and last points
/// coincide is joined by miters; an open end is capped flat against its
/// cutoff line if it has one, otherwise by a square cap rounded by
/// `style.roundness`.
///
/// Curves whose endpoints coincide, joint markers among them, are omitted
/// first. If nothing remains the contour is empty.
pub fn stroke(curves: &[BezierCurve], style: &Stroke) -> Contour {
    let base: Vec<BezierCurve> = curves.iter().filter(|c| !c.is_closed()).cloned().collect();
    if base.is_empty() {
        return Contour::new();
    }
    let ctx = StrokeCtx {
        style,
        pen: style.pen(),
        base,
    };
    ctx.assemble()
}

impl StrokeCtx<'_> {
    fn assemble(&self) -> Contour {
        let reversed: Vec<BezierCurve> = self.base.iter().rev().map(BezierCurve::reverse).collect();
        let mut fwd = self.half(&self.base);
        let mut bwd = self.half(&reversed);

        let first = &self.base[0];
        let last = &self.base[self.base.len() - 1];
        let (end_join, start_join) = if first.start() == last.end() {
            (
                self.closing_join(last, first, &fwd, &bwd),
                self.closing_join(&reversed[reversed.len() - 1], &reversed[0], &bwd, &fwd),
            )
        } else {
            let end_join = match (fwd.last_mut(), bwd.first_mut()) {
                (Some(arrive), Some(leave)) => self.cap(
                    arrive,
                    leave,
                    last.end(),
                    last.end_tangent(),
                    last.offset_vector_at_t(1.0),
                    last.cutoff_end(),
                ),
                _ => Vec::new(),
            };
            let start_join = match (bwd.last_mut(), fwd.first_mut()) {
                (Some(arrive), Some(leave)) => self.cap(
                    arrive,
                    leave,
                    first.start(),
                    -first.start_tangent(),
                    first.offset_vector(),
                    first.cutoff_start(),
                ),
                _ => Vec::new(),
            };
            (end_join, start_join)
        };

        let mut out = fwd;
        out.extend(end_join);
        out.extend(bwd);
        out.extend(start_join);
        log::trace!(
            "stroked {} curves into a contour of {} curves",
            self.base.len(),
            out.len()
        );
        Contour::from_vec(out)
    }

    /// Offset one side of a run, with miter connectors at every junction.
    fn half(&self, curves: &[BezierCurve]) -> Vec<BezierCurve> {
        let mut out = Vec::with_capacity(curves.len() * 3);
        for (i, curve) in curves.iter().enumerate() {
            let offset = offset_curve(curve, &self.pen);
            if let Some(next) = curves.get(i + 1) {
                let corner = miter(curve, next, &self.pen);
                let end = offset.end();
                out.push(offset);
                push_polyline(&mut out, &[end, corner, offset_start(next, &self.pen)]);
            } else {
                out.push(offset);
            }
        }
        out
    }

    /// Bridge from one side to the other across the closing point of a
    /// closed run.
    ///
    /// The outline crosses the stroke along the miter at the closing point
    /// and comes back along the same line once the other side is done,
    /// so the two sides bound a ring.
    fn closing_join(
        &self,
        last: &BezierCurve,
        first: &BezierCurve,
        arriving: &[BezierCurve],
        leaving: &[BezierCurve],
    ) -> Vec<BezierCurve> {
        let mut pts: ArrayVec<Point, 4> = ArrayVec::new();
        if let (Some(a), Some(l)) = (arriving.last(), leaving.first()) {
            pts.push(a.end());
            pts.push(miter(last, first, &self.pen));
            pts.push(miter(last, first, &self.pen.flip()));
            pts.push(l.start());
        }
        let mut out = Vec::new();
        push_polyline(&mut out, &pts);
        out
    }

    /// Cap an open end at `base` where the stroke travels along `tangent`.
    ///
    /// `arrive` is the side curve reaching the end and `leave` the side
    /// curve departing from it on the other side. With a cutoff the two
    /// are moved along the tangent until both sit on the cutoff line.
    fn cap(
        &self,
        arrive: &mut BezierCurve,
        leave: &mut BezierCurve,
        base: Point,
        tangent: Vec2,
        offset_vector: Vec2,
        cutoff: Option<Vec2>,
    ) -> Vec<BezierCurve> {
        let mut out = Vec::new();
        if let Some(normal) = cutoff {
            let along = tangent.dot(normal);
            if along.abs() > CUTOFF_PARALLEL {
                let onto_cut = |p: Point| p - tangent * ((p - base).dot(normal) / along);
                arrive.set_end_point(onto_cut(arrive.end()));
                leave.set_start_point(onto_cut(leave.start()));
            } else {
                log::debug!("cutoff at {base:?} runs along the stroke, using a butt cap");
            }
            push_polyline(&mut out, &[arrive.end(), leave.start()]);
            return out;
        }

        let tip = base + self.pen.displacement(offset_vector, tangent);
        let p0 = arrive.end();
        let p1 = self.pen.beside(tip, tangent, offset_vector);
        let p2 = self.pen.flip().beside(tip, tangent, offset_vector);
        let p3 = leave.start();
        let arm = (self.style.delta.abs() * self.style.roundness)
            .min(p0.distance(p1))
            .min(0.5 * p1.distance(p2))
            .min(p2.distance(p3));
        if arm > 0.0 {
            let u01 = (p1 - p0).normalize();
            let u12 = (p2 - p1).normalize();
            let u23 = (p3 - p2).normalize();
            push_polyline(&mut out, &[p0, p1 - u01 * arm]);
            out.push(BezierCurve::quad(p1 - u01 * arm, p1, p1 + u12 * arm));
            push_polyline(&mut out, &[p1 + u12 * arm, p2 - u12 * arm]);
            out.push(BezierCurve::quad(p2 - u12 * arm, p2, p2 + u23 * arm));
            push_polyline(&mut out, &[p2 + u23 * arm, p3]);
        } else {
            push_polyline(&mut out, &[p0, p1, p2, p3]);
        }
        out
    }
}

/// The offset corner where `prev` flows into `next`.
fn miter(prev: &BezierCurve, next: &BezierCurve, pen: &Pen) -> Point {
    pen.offset_point(
        next.start(),
        distinct_before(prev.points(), prev.order()),
        distinct_after(next.points(), 0),
        prev.offset_vector_at_t(1.0),
        next.offset_vector(),
    )
}

/// Start point of the offset of `curve`, without offsetting the rest of it.
fn offset_start(curve: &BezierCurve, pen: &Pen) -> Point {
    pen.offset_point(
        curve.start(),
        None,
        distinct_after(curve.points(), 0),
        curve.offset_vector(),
        curve.offset_vector(),
    )
}

/// Append straight lines through `points`, skipping negligible ones.
fn push_polyline(out: &mut Vec<BezierCurve>, points: &[Point]) {
    for pair in points.windows(2) {
        if pair[0].distance(pair[1]) > MIN_CONNECTOR {
            out.push(BezierCurve::line(pair[0], pair[1]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_chained(contour: &Contour) {
        assert!(contour.is_closed(1e-9), "{contour:?}");
    }

    #[test]
    fn square_cap_area() {
        let line = [BezierCurve::line((0.0, 0.0), (10.0, 0.0))];
        let c = stroke(&line, &Stroke::new(5.0));
        assert_chained(&c);
        // 2 delta L for the body plus a delta by 2 delta box per cap.
        assert!((c.signed_area() - 200.0).abs() < 1e-9, "{}", c.signed_area());
        let bbox = c.bounding_box().unwrap();
        assert!((bbox.x0 + 5.0).abs() < 1e-12 && (bbox.x1 - 15.0).abs() < 1e-12);
        assert!((bbox.y0 + 5.0).abs() < 1e-12 && (bbox.y1 - 5.0).abs() < 1e-12);
    }

    #[test]
    fn round_cap_trims_corners() {
        let line = [BezierCurve::line((0.0, 0.0), (10.0, 0.0))];
        let square = stroke(&line, &Stroke::new(5.0)).signed_area();
        let round = stroke(&line, &Stroke::new(5.0).with_roundness(1.0));
        assert_chained(&round);
        let area = round.signed_area();
        assert!(area < square);
        // Each rounded corner keeps 2/3 of the triangle it cuts off.
        assert!((area - (square - 4.0 * 25.0 / 6.0)).abs() < 1e-9, "{area}");
        assert!(round.iter().any(|c| c.order() == 2));
    }

    #[test]
    fn closed_square_ring() {
        let pts = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
        let sides: Vec<_> = (0..4)
            .map(|i| BezierCurve::line(pts[i], pts[(i + 1) % 4]))
            .collect();
        let c = stroke(&sides, &Stroke::new(1.0));
        assert_chained(&c);
        // Outer 12 × 12 less inner 8 × 8.
        assert!((c.signed_area() - 80.0).abs() < 1e-9, "{}", c.signed_area());
    }

    #[test]
    fn cutoff_end_is_flush() {
        // The end is cut along the line x = 10 + y.
        let normal = Vec2::new(1.0, -1.0).normalize();
        let line = [BezierCurve::builder([(0.0, 0.0), (10.0, 0.0)])
            .with_cutoff_end(normal)
            .build()
            .unwrap()];
        let c = stroke(&line, &Stroke::new(2.0));
        assert_chained(&c);
        let xs: Vec<f64> = c.iter().map(|curve| curve.end().x).collect();
        let max_x = xs.iter().copied().fold(f64::MIN, f64::max);
        assert!((max_x - 12.0).abs() < 1e-9, "{xs:?}");
        assert!(c
            .iter()
            .any(|curve| curve.start().is_near(Point::new(8.0, -2.0), 1e-9)
                || curve.end().is_near(Point::new(8.0, -2.0), 1e-9)));
        // Body 2 × 2 × 10 plus the 2 × 4 start cap, the cut adds nothing net.
        assert!((c.signed_area() - 48.0).abs() < 1e-9, "{}", c.signed_area());
    }

    #[test]
    fn degenerate_curves_are_omitted() {
        let curves = [
            BezierCurve::line((0.0, 0.0), (10.0, 0.0)),
            BezierCurve::joint((10.0, 0.0)),
            BezierCurve::line((10.0, 0.0), (20.0, 0.0)),
        ];
        let c = stroke(&curves, &Stroke::new(1.0));
        assert_chained(&c);
        assert!((c.signed_area() - 44.0).abs() < 1e-9, "{}", c.signed_area());
        assert!(stroke(&[BezierCurve::joint((1.0, 1.0))], &Stroke::new(1.0)).is_empty());
        assert!(stroke(&[], &Stroke::new(1.0)).is_empty());
    }

    #[test]
    fn curved_stroke_is_positive() {
        let arch = [BezierCurve::cubic(
            (0.0, 0.0),
            (0.0, 50.0),
            (100.0, 50.0),
            (100.0, 0.0),
        )];
        let c = stroke(&arch, &Stroke::new(4.0).with_contrast(1.3));
        assert_chained(&c);
        let area = c.signed_area();
        assert!(area > 0.0);
    }
}

// Copyright 2026 the Skelpen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A rectangle.

use crate::Point;

/// An axis-aligned rectangle.
///
/// Used for curve bounds and for the glyph's design region.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// The minimum x coordinate.
    pub x0: f64,
    /// The minimum y coordinate.
    pub y0: f64,
    /// The maximum x coordinate.
    pub x1: f64,
    /// The maximum y coordinate.
    pub y1: f64,
}

impl Rect {
    /// A new rectangle from minimum and maximum coordinates.
    #[inline]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect { x0, y0, x1, y1 }
    }

    /// A new rectangle from two points.
    ///
    /// The result will have non-negative width and height.
    #[inline]
    pub fn from_points(p0: impl Into<Point>, p1: impl Into<Point>) -> Rect {
        let p0 = p0.into();
        let p1 = p1.into();
        Rect {
            x0: p0.x,
            y0: p0.y,
            x1: p1.x,
            y1: p1.y,
        }
        .abs()
    }

    /// The width of the rectangle.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// The height of the rectangle.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// The center point of the rectangle.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(0.5 * (self.x0 + self.x1), 0.5 * (self.y0 + self.y1))
    }

    /// Take absolute value of width and height.
    #[inline]
    pub fn abs(&self) -> Rect {
        let Rect { x0, y0, x1, y1 } = *self;
        Rect::new(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
    }

    /// The smallest rectangle enclosing two rectangles.
    #[inline]
    pub fn union(&self, other: Rect) -> Rect {
        Rect::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    /// Compute the union with one point.
    #[inline]
    pub fn union_pt(&self, pt: Point) -> Rect {
        Rect::new(
            self.x0.min(pt.x),
            self.y0.min(pt.y),
            self.x1.max(pt.x),
            self.y1.max(pt.y),
        )
    }

    /// Scale the x extent about the rectangle's center.
    #[inline]
    #[must_use]
    pub fn scale_x_about_center(&self, factor: f64) -> Rect {
        let cx = 0.5 * (self.x0 + self.x1);
        Rect::new(
            cx + (self.x0 - cx) * factor,
            self.y0,
            cx + (self.x1 - cx) * factor,
            self.y1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_normalizes() {
        let r = Rect::from_points((10.0, 5.0), (0.0, 20.0));
        assert_eq!(r, Rect::new(0.0, 5.0, 10.0, 20.0));
        assert_eq!(r.width(), 10.0);
        assert_eq!(r.height(), 15.0);
        assert_eq!(r.center(), Point::new(5.0, 12.5));
    }

    #[test]
    fn bounds_of_points() {
        let pts = [
            Point::new(1.0, 1.0),
            Point::new(-2.0, 4.0),
            Point::new(3.0, -1.0),
        ];
        let r = pts[1..]
            .iter()
            .fold(Rect::from_points(pts[0], pts[0]), |r, p| r.union_pt(*p));
        assert_eq!(r, Rect::new(-2.0, -1.0, 3.0, 4.0));
        assert_eq!(r.center(), Point::new(0.5, 1.5));
    }

    #[test]
    fn scale_about_center() {
        let r = Rect::new(0.0, -200.0, 940.0, 800.0).scale_x_about_center(0.5);
        assert_eq!(r, Rect::new(235.0, -200.0, 705.0, 800.0));
    }
}

// Copyright 2026 the Skelpen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed outlines produced by stroking.

use alloc::vec::Vec;
use core::ops::Mul;

use crate::metrics;
use crate::{Affine, BezierCurve, ParamCurve, ParamCurveArea, Rect};

/// A closed, ordered list of curves forming a fillable outline.
///
/// Each curve starts where the previous one ends, and the last ends where
/// the first starts. A contour never contains joint markers.
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Contour(Vec<BezierCurve>);

impl Contour {
    /// Create an empty contour.
    pub fn new() -> Contour {
        Default::default()
    }

    /// Create a contour from a vector of curves.
    ///
    /// The curves are expected to be chained end to start and closed.
    pub fn from_vec(curves: Vec<BezierCurve>) -> Contour {
        Contour(curves)
    }

    /// The curves of the contour.
    pub fn curves(&self) -> &[BezierCurve] {
        &self.0
    }

    /// Consume the contour, returning its curves.
    pub fn into_curves(self) -> Vec<BezierCurve> {
        self.0
    }

    /// The number of curves.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Is this contour empty?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the curves.
    pub fn iter(&self) -> core::slice::Iter<'_, BezierCurve> {
        self.0.iter()
    }

    /// Signed area enclosed by the contour.
    ///
    /// Positive for counter-clockwise outlines in a y-up coordinate system.
    pub fn signed_area(&self) -> f64 {
        self.0.iter().map(ParamCurveArea::signed_area).sum()
    }

    /// The bounding box of the control points, or `None` when empty.
    pub fn bounding_box(&self) -> Option<Rect> {
        metrics::bounds(&self.0)
    }

    /// Apply an affine transform to every curve.
    pub fn apply_affine(&mut self, affine: Affine) {
        for curve in &mut self.0 {
            *curve = affine * &*curve;
        }
    }

    /// Whether consecutive curves meet within `tolerance`, including the
    /// wrap from last to first.
    pub fn is_closed(&self, tolerance: f64) -> bool {
        let n = self.0.len();
        (0..n).all(|i| {
            self.0[i]
                .end()
                .is_near(self.0[(i + 1) % n].start(), tolerance)
        })
    }
}

impl<'a> IntoIterator for &'a Contour {
    type Item = &'a BezierCurve;
    type IntoIter = core::slice::Iter<'a, BezierCurve>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Contour {
    type Item = BezierCurve;
    type IntoIter = alloc::vec::IntoIter<BezierCurve>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Mul<Contour> for Affine {
    type Output = Contour;

    fn mul(self, mut other: Contour) -> Contour {
        other.apply_affine(self);
        other
    }
}

impl<'a> Mul<&'a Contour> for Affine {
    type Output = Contour;

    fn mul(self, other: &Contour) -> Contour {
        Contour(other.0.iter().map(|c| self * c).collect())
    }
}

// Copyright 2026 the Skelpen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The centre-line data a glyph is authored as.
//!
//! A glyph owns one or more [`Skeleton`]s. Each skeleton is an ordered list
//! of [`Segment`]s, and each segment an ordered run of curves where every
//! curve starts at the end of the one before it. Two consecutive segments
//! whose shared point coincides meet at a sharp corner.

use alloc::vec::Vec;

use crate::metrics;
use crate::{Affine, BezierCurve, ParamCurve, Point, Rect};

/// A contiguous run of curves.
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Segment(Vec<BezierCurve>);

/// The segments of one stroke loop.
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Skeleton(Vec<Segment>);

/// All the skeleton data of a glyph.
///
/// Besides the fundamental shape, a glyph may have a flattened and an
/// arisen variant: alternative shapes with exactly the same structure that
/// the processor blends towards.
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphSkeleton {
    skeletons: Vec<Skeleton>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    flattened: Option<Vec<Skeleton>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    arisen: Option<Vec<Skeleton>>,
}

impl Segment {
    /// Create a segment from a vector of curves.
    pub fn from_vec(curves: Vec<BezierCurve>) -> Segment {
        Segment(curves)
    }

    /// The curves of the segment.
    pub fn curves(&self) -> &[BezierCurve] {
        &self.0
    }

    /// Consume the segment, returning its curves.
    pub fn into_curves(self) -> Vec<BezierCurve> {
        self.0
    }

    /// Push a curve at the end.
    pub fn push(&mut self, curve: BezierCurve) {
        self.0.push(curve);
    }

    /// Number of curves.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Is this segment empty?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the curves.
    pub fn iter(&self) -> core::slice::Iter<'_, BezierCurve> {
        self.0.iter()
    }

    /// The start point of the first curve.
    pub fn start(&self) -> Option<Point> {
        self.0.first().map(ParamCurve::start)
    }

    /// The end point of the last curve.
    pub fn end(&self) -> Option<Point> {
        self.0.last().map(ParamCurve::end)
    }

    /// Apply an affine transform to every curve.
    pub fn apply_affine(&mut self, affine: Affine) {
        for curve in &mut self.0 {
            *curve = affine * &*curve;
        }
    }

    /// Arc length of the whole segment.
    pub fn length(&self) -> f64 {
        metrics::sequence_length(&self.0, 0.0, self.0.len() as f64)
    }
}

impl Skeleton {
    /// Create a skeleton from a vector of segments.
    pub fn from_vec(segments: Vec<Segment>) -> Skeleton {
        Skeleton(segments)
    }

    /// The segments of the skeleton.
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Consume the skeleton, returning its segments.
    pub fn into_segments(self) -> Vec<Segment> {
        self.0
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Is this skeleton empty?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the segments.
    pub fn iter(&self) -> core::slice::Iter<'_, Segment> {
        self.0.iter()
    }

    /// Iterate over the curves of all segments in order.
    pub fn curves(&self) -> impl Iterator<Item = &BezierCurve> + '_ {
        self.0.iter().flat_map(Segment::iter)
    }

    /// Whether `other` has the same number of segments, each with the same
    /// number of curves.
    pub fn same_structure(&self, other: &Skeleton) -> bool {
        self.0.len() == other.0.len() && self.0.iter().zip(&other.0).all(|(a, b)| a.len() == b.len())
    }
}

impl GlyphSkeleton {
    /// A glyph with only a fundamental shape.
    pub fn new(skeletons: Vec<Skeleton>) -> GlyphSkeleton {
        GlyphSkeleton {
            skeletons,
            flattened: None,
            arisen: None,
        }
    }

    /// Builder method for adding the flattened variant.
    #[must_use]
    pub fn with_flattened(mut self, flattened: Vec<Skeleton>) -> Self {
        self.flattened = Some(flattened);
        self
    }

    /// Builder method for adding the arisen variant.
    #[must_use]
    pub fn with_arisen(mut self, arisen: Vec<Skeleton>) -> Self {
        self.arisen = Some(arisen);
        self
    }

    /// The fundamental skeletons.
    pub fn skeletons(&self) -> &[Skeleton] {
        &self.skeletons
    }

    /// The flattened variant, if the glyph has one.
    pub fn flattened(&self) -> Option<&[Skeleton]> {
        self.flattened.as_deref()
    }

    /// The arisen variant, if the glyph has one.
    pub fn arisen(&self) -> Option<&[Skeleton]> {
        self.arisen.as_deref()
    }

    /// Bounding box of every control point of the fundamental shape.
    pub fn bounding_box(&self) -> Option<Rect> {
        metrics::bounds(self.skeletons.iter().flat_map(Skeleton::curves))
    }

    /// Whether `variant` has the structure of the fundamental shape.
    pub fn matches(&self, variant: &[Skeleton]) -> bool {
        self.skeletons.len() == variant.len()
            && self
                .skeletons
                .iter()
                .zip(variant)
                .all(|(a, b)| a.same_structure(b))
    }
}

impl FromIterator<BezierCurve> for Segment {
    fn from_iter<T: IntoIterator<Item = BezierCurve>>(iter: T) -> Segment {
        Segment(iter.into_iter().collect())
    }
}

impl FromIterator<Segment> for Skeleton {
    fn from_iter<T: IntoIterator<Item = Segment>>(iter: T) -> Skeleton {
        Skeleton(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Segment {
    type Item = &'a BezierCurve;
    type IntoIter = core::slice::Iter<'a, BezierCurve>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Skeleton {
    type Item = &'a Segment;
    type IntoIter = core::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

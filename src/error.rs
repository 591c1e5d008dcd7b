// Copyright 2026 the Skelpen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

/// An error from constructing or accessing a curve.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CurveError {
    /// A curve needs at least two finite control points.
    #[error("invalid curve definition with {points} usable control points")]
    InvalidCurveDefinition {
        /// The number of control points supplied.
        points: usize,
    },
    /// A control point index past the end of the curve.
    #[error("control point index {index} out of range for {len} points")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of control points.
        len: usize,
    },
    /// Two curves of different order can't be interpolated.
    #[error("cannot interpolate curves of order {left} and {right}")]
    MismatchedOrder {
        /// Order of the first curve.
        left: usize,
        /// Order of the second curve.
        right: usize,
    },
}

/// An error from processing a glyph skeleton.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum SkeletonError {
    /// A curve operation failed.
    #[error(transparent)]
    Curve(#[from] CurveError),
    /// A control parameter is NaN or outside `[0, 1]`.
    #[error("parameter `{name}` is {value}, expected a value in [0, 1]")]
    ParameterOutOfRange {
        /// The parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// An alternate skeleton variant doesn't have the fundamental skeleton's shape.
    #[error("skeleton variant does not match the fundamental skeleton's structure")]
    VariantMismatch,
    /// An extension reference points outside every skeleton.
    #[error("segment {segment} of skeleton {skeleton} extends to missing neighbour at offset {offset}")]
    MissingNeighbor {
        /// Index of the skeleton holding the curve.
        skeleton: usize,
        /// Index of the segment holding the curve.
        segment: usize,
        /// The relative segment offset that failed to resolve.
        offset: isize,
    },
    /// The extension line never crosses the referenced neighbour.
    #[error("extension of segment {segment} in skeleton {skeleton} does not cross its neighbour")]
    NoCrossing {
        /// Index of the skeleton holding the curve.
        skeleton: usize,
        /// Index of the segment holding the curve.
        segment: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages() {
        let e = CurveError::IndexOutOfRange { index: 5, len: 3 };
        assert_eq!(e.to_string(), "control point index 5 out of range for 3 points");
        let s: SkeletonError = e.clone().into();
        assert_eq!(s, SkeletonError::Curve(e));
        let p = SkeletonError::ParameterOutOfRange {
            name: "weight",
            value: 1.5,
        };
        assert_eq!(
            p.to_string(),
            "parameter `weight` is 1.5, expected a value in [0, 1]"
        );
    }
}

// Copyright 2026 the Skelpen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Control parameters and processor constants.

use core::f64::consts::FRAC_PI_2;

use crate::{Rect, SkeletonError};

/// The normalized control parameters of a glyph recomputation.
///
/// Every field lies in `[0, 1]`; see [`ProcessorConfig`] for how each maps
/// to a geometric quantity.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Params {
    /// How much arc length is trimmed off sharp corners to round them.
    pub curve: f64,
    /// Stroke weight.
    pub weight: f64,
    /// Roundness of open-end caps.
    pub roundness: f64,
    /// Broad-nib contrast between horizontal and vertical strokes.
    pub contrast: f64,
    /// Horizontal extent of the glyph.
    pub width: f64,
    /// Faux-italic slant.
    pub slant: f64,
    /// Blend towards the flattened variant.
    pub flattening: f64,
    /// Blend towards the arisen variant.
    pub arise: f64,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            curve: 0.0,
            weight: 0.5,
            roundness: 0.0,
            contrast: 0.5,
            width: 0.5,
            slant: 0.0,
            flattening: 0.0,
            arise: 0.0,
        }
    }
}

impl Params {
    /// Builder method for setting the corner curve amount.
    #[must_use]
    pub fn with_curve(mut self, curve: f64) -> Self {
        self.curve = curve;
        self
    }

    /// Builder method for setting the weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Builder method for setting the cap roundness.
    #[must_use]
    pub fn with_roundness(mut self, roundness: f64) -> Self {
        self.roundness = roundness;
        self
    }

    /// Builder method for setting the contrast.
    #[must_use]
    pub fn with_contrast(mut self, contrast: f64) -> Self {
        self.contrast = contrast;
        self
    }

    /// Builder method for setting the width.
    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Builder method for setting the slant.
    #[must_use]
    pub fn with_slant(mut self, slant: f64) -> Self {
        self.slant = slant;
        self
    }

    /// Builder method for setting the flattening blend.
    #[must_use]
    pub fn with_flattening(mut self, flattening: f64) -> Self {
        self.flattening = flattening;
        self
    }

    /// Builder method for setting the arise blend.
    #[must_use]
    pub fn with_arise(mut self, arise: f64) -> Self {
        self.arise = arise;
        self
    }

    /// Check that every parameter is a number in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`SkeletonError::ParameterOutOfRange`] naming the first
    /// offending parameter.
    pub fn validate(&self) -> Result<(), SkeletonError> {
        let fields = [
            ("curve", self.curve),
            ("weight", self.weight),
            ("roundness", self.roundness),
            ("contrast", self.contrast),
            ("width", self.width),
            ("slant", self.slant),
            ("flattening", self.flattening),
            ("arise", self.arise),
        ];
        match fields.iter().find(|(_, v)| !(0.0..=1.0).contains(v)) {
            Some(&(name, value)) => Err(SkeletonError::ParameterOutOfRange { name, value }),
            None => Ok(()),
        }
    }
}

/// The constants of the glyph pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ProcessorConfig {
    /// Arc length trimmed off each side of a corner at `curve = 1`.
    pub curve_max: f64,
    /// Arc length left untouched between two trims of one segment.
    pub curve_gap: f64,
    /// Tolerance of arc length inversion and of parallel-arm detection.
    pub tolerance: f64,
    /// Half stroke width at `weight = 0.5`.
    pub weight_default: f64,
    /// Pen contrast at `contrast = 0`.
    pub contrast_min: f64,
    /// Width factor at `width = 0`.
    pub width_min: f64,
    /// Width factor at `width = 1`.
    pub width_max: f64,
    /// Slant at `slant = 1`, as a fraction of a right angle.
    pub slant_max: f64,
    /// Cap on integrand evaluations per arc length integral.
    pub max_eval: usize,
    /// The design space of the glyph.
    pub region: Rect,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        ProcessorConfig {
            curve_max: 70.0,
            curve_gap: 2.0,
            tolerance: 1e-4,
            weight_default: 32.0,
            contrast_min: 0.6,
            width_min: 0.7,
            width_max: 1.3,
            slant_max: 0.3,
            max_eval: 100_000,
            region: Rect::new(0.0, -200.0, 940.0, 800.0),
        }
    }
}

impl ProcessorConfig {
    /// Arc length to trim off a corner for the `curve` parameter.
    pub fn corner_offset(&self, curve: f64) -> f64 {
        curve * self.curve_max
    }

    /// Half stroke width for the `weight` parameter.
    pub fn delta(&self, weight: f64) -> f64 {
        self.weight_default + (self.weight_default - 1.0) * (weight - 0.5)
    }

    /// Pen contrast for the `contrast` parameter.
    ///
    /// The mapping is symmetric about 1: `contrast = 0.5` is an even pen.
    pub fn contrast(&self, contrast: f64) -> f64 {
        contrast * (2.0 - 2.0 * self.contrast_min) + self.contrast_min
    }

    /// Horizontal scale factor for the `width` parameter.
    pub fn width_factor(&self, width: f64) -> f64 {
        (self.width_max - self.width_min) * width + self.width_min
    }

    /// The region after horizontal scaling for the `width` parameter.
    pub fn width_region(&self, width: f64) -> Rect {
        self.region.scale_x_about_center(self.width_factor(width))
    }

    /// Slant angle in radians for the `slant` parameter.
    pub fn slant_angle(&self, slant: f64) -> f64 {
        slant * FRAC_PI_2 * self.slant_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_out_of_range() {
        assert_eq!(Params::default().validate(), Ok(()));
        assert_eq!(
            Params::default().with_weight(1.5).validate(),
            Err(SkeletonError::ParameterOutOfRange {
                name: "weight",
                value: 1.5
            })
        );
        assert!(Params::default().with_arise(f64::NAN).validate().is_err());
        assert!(Params::default().with_curve(-0.01).validate().is_err());
        assert!(Params::default().with_slant(1.0).with_curve(0.0).validate().is_ok());
    }

    #[test]
    fn mappings() {
        let c = ProcessorConfig::default();
        assert_eq!(c.delta(0.5), 32.0);
        assert_eq!(c.delta(1.0), 47.5);
        assert_eq!(c.delta(0.0), 16.5);
        assert!((c.contrast(0.5) - 1.0).abs() < 1e-12);
        assert!((c.contrast(0.0) - 0.6).abs() < 1e-12);
        assert!((c.contrast(1.0) - 1.4).abs() < 1e-12);
        assert!((c.width_factor(0.5) - 1.0).abs() < 1e-12);
        assert_eq!(c.corner_offset(0.5), 35.0);
        assert!((c.slant_angle(1.0) - 0.3 * FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn width_region_keeps_center() {
        let c = ProcessorConfig::default();
        let r = c.width_region(0.0);
        assert!((r.center().x - 470.0).abs() < 1e-9);
        assert!((r.width() - 940.0 * 0.7).abs() < 1e-9);
        assert_eq!((r.y0, r.y1), (-200.0, 800.0));
    }
}

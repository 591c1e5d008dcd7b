// Copyright 2026 the Skelpen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The glyph recomputation pipeline.
//!
//! A recomputation runs these stages in order, each consuming the output of
//! the one before:
//!
//! 1. [blend](SkeletonProcessor::blend) the fundamental shape with its
//!    flattened or arisen variant;
//! 2. [resolve extensions](SkeletonProcessor::resolve_extensions) of open
//!    ends onto their neighbours;
//! 3. [resolve corners](SkeletonProcessor::resolve_corners), joining each
//!    skeleton into a single run;
//! 4. [apply width](SkeletonProcessor::apply_width) to the runs;
//! 5. [generate contours](SkeletonProcessor::generate_contours) by stroking
//!    each run;
//! 6. [apply slant](SkeletonProcessor::apply_slant) to the contours.

use alloc::vec::Vec;

use crate::corner;
use crate::metrics::{compare_points, interpolate};
use crate::stroke::{stroke, Stroke};
use crate::{
    Affine, Contour, GlyphSkeleton, Params, ProcessorConfig, Rect, Segment, Skeleton,
    SkeletonError,
};

/// Runs the glyph pipeline with a fixed set of constants.
///
/// The processor holds no state besides its configuration, so one instance
/// can serve any number of glyphs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SkeletonProcessor {
    config: ProcessorConfig,
}

/// The result of recomputing a glyph.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphOutline {
    /// One closed outline per non-empty skeleton.
    pub contours: Vec<Contour>,
    /// The processed centre lines the contours were stroked from, one run
    /// per skeleton, before slanting.
    pub skeletons: Vec<Segment>,
    /// The design region after the width transform.
    pub region: Rect,
}

impl GlyphOutline {
    /// Bounding box of the control points of every contour.
    pub fn bounding_box(&self) -> Option<Rect> {
        self.contours
            .iter()
            .filter_map(Contour::bounding_box)
            .reduce(|a, b| a.union(b))
    }
}

/// Recompute a glyph with the default constants.
///
/// # Errors
///
/// See [`SkeletonProcessor::process`].
pub fn recompute(glyph: &GlyphSkeleton, params: &Params) -> Result<GlyphOutline, SkeletonError> {
    SkeletonProcessor::new().process(glyph, params)
}

impl SkeletonProcessor {
    /// A processor with the default constants.
    pub fn new() -> SkeletonProcessor {
        Self::default()
    }

    /// A processor with custom constants.
    pub fn with_config(config: ProcessorConfig) -> SkeletonProcessor {
        SkeletonProcessor { config }
    }

    /// The constants in use.
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Run the whole pipeline.
    ///
    /// # Errors
    ///
    /// [`SkeletonError::ParameterOutOfRange`] for an invalid parameter,
    /// [`SkeletonError::VariantMismatch`] if a variant's structure differs
    /// from the fundamental shape, and the errors of
    /// [`resolve_extensions`](Self::resolve_extensions).
    pub fn process(
        &self,
        glyph: &GlyphSkeleton,
        params: &Params,
    ) -> Result<GlyphOutline, SkeletonError> {
        params.validate()?;
        let blended = self.blend(glyph, params)?;
        let extended = self.resolve_extensions(&blended)?;
        let mut runs = self.resolve_corners(&extended, params);
        let region = self.apply_width(&mut runs, params);
        let mut contours = self.generate_contours(&runs, params);
        self.apply_slant(&mut contours, params, region);
        Ok(GlyphOutline {
            contours,
            skeletons: runs,
            region,
        })
    }

    /// Blend the fundamental shape with one of the glyph's variants.
    ///
    /// A glyph with a flattened variant moves from the fundamental shape
    /// (`flattening = 0`) to the flattened one (`flattening = 1`). Otherwise a
    /// glyph with an arisen variant moves from the arisen shape (`arise = 0`)
    /// to the fundamental one (`arise = 1`). The flattened variant takes
    /// precedence, and `arise` is ignored when it is present. Curves equal to
    /// their variant are copied as they are. Blended curves keep the cutoffs
    /// and extension references of the fundamental curve.
    ///
    /// # Errors
    ///
    /// [`SkeletonError::VariantMismatch`] if a variant's structure differs
    /// from the fundamental shape, or a curve's order differs from its
    /// counterpart.
    pub fn blend(
        &self,
        glyph: &GlyphSkeleton,
        params: &Params,
    ) -> Result<Vec<Skeleton>, SkeletonError> {
        log::debug!(
            "blending: flattening {}, arise {}",
            params.flattening,
            params.arise
        );
        let (variant, amount, from_variant) = match (glyph.flattened(), glyph.arisen()) {
            (Some(flattened), _) => (flattened, params.flattening, false),
            (None, Some(arisen)) => (arisen, params.arise, true),
            (None, None) => return Ok(glyph.skeletons().to_vec()),
        };
        if !glyph.matches(variant) {
            return Err(SkeletonError::VariantMismatch);
        }
        blend_with(glyph.skeletons(), variant, amount, from_variant)
    }

    /// Extend open ends onto the neighbours they reference.
    ///
    /// # Errors
    ///
    /// See [`corner::resolve_extensions`].
    pub fn resolve_extensions(&self, skeletons: &[Skeleton]) -> Result<Vec<Skeleton>, SkeletonError> {
        log::debug!("resolving extensions of {} skeletons", skeletons.len());
        corner::resolve_extensions(skeletons)
    }

    /// Round the corners of each skeleton by `params.curve`, joining it
    /// into one run.
    pub fn resolve_corners(&self, skeletons: &[Skeleton], params: &Params) -> Vec<Segment> {
        let offset = self.config.corner_offset(params.curve);
        log::debug!("resolving corners with offset {offset}");
        skeletons
            .iter()
            .map(|s| corner::resolve_corners(s, offset, &self.config))
            .collect()
    }

    /// Scale the runs horizontally about the centre of the design region
    /// by `params.width`, returning the scaled region.
    pub fn apply_width(&self, runs: &mut [Segment], params: &Params) -> Rect {
        let factor = self.config.width_factor(params.width);
        log::debug!("applying width factor {factor}");
        let affine = Affine::scale_x_about_center(factor, self.config.region);
        for run in runs.iter_mut() {
            run.apply_affine(affine);
        }
        self.config.width_region(params.width)
    }

    /// Stroke each run with the pen given by `params.weight`,
    /// `params.roundness` and `params.contrast`.
    ///
    /// Runs that leave nothing to stroke produce no contour.
    pub fn generate_contours(&self, runs: &[Segment], params: &Params) -> Vec<Contour> {
        let style = Stroke::new(self.config.delta(params.weight))
            .with_roundness(params.roundness)
            .with_contrast(self.config.contrast(params.contrast));
        log::debug!("generating contours with {style:?}");
        runs.iter()
            .map(|run| stroke(run.curves(), &style))
            .filter(|c| !c.is_empty())
            .collect()
    }

    /// Slant the contours by `params.slant`, keeping the bottom of `region`
    /// fixed.
    pub fn apply_slant(&self, contours: &mut [Contour], params: &Params, region: Rect) {
        let angle = self.config.slant_angle(params.slant);
        log::debug!("applying slant of {angle} rad");
        if angle == 0.0 {
            return;
        }
        let affine = Affine::slant(angle, region.y0);
        for contour in contours.iter_mut() {
            contour.apply_affine(affine);
        }
    }
}

/// Blend each curve of `base` with its counterpart in `variant`.
///
/// At `amount = 0` the result is `base`, or `variant` with `from_variant`.
fn blend_with(
    base: &[Skeleton],
    variant: &[Skeleton],
    amount: f64,
    from_variant: bool,
) -> Result<Vec<Skeleton>, SkeletonError> {
    base.iter()
        .zip(variant)
        .map(|(skeleton, target)| {
            skeleton
                .iter()
                .zip(target)
                .map(|(segment, target)| {
                    segment
                        .iter()
                        .zip(target)
                        .map(|(curve, target)| {
                            if compare_points(curve, target) {
                                return Ok(curve.clone());
                            }
                            let (from, to) = if from_variant {
                                (target, curve)
                            } else {
                                (curve, target)
                            };
                            let mut between = interpolate(from, to, amount)
                                .map_err(|_| SkeletonError::VariantMismatch)?;
                            between.set_cutoff_start(curve.cutoff_start());
                            between.set_cutoff_end(curve.cutoff_end());
                            between.set_extend_start(curve.extend_start());
                            between.set_extend_end(curve.extend_end());
                            Ok(between)
                        })
                        .collect::<Result<Segment, _>>()
                })
                .collect::<Result<Skeleton, _>>()
        })
        .collect()
}

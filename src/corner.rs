// Copyright 2026 the Skelpen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Corner rounding and end extension of skeleton segments.
//!
//! Two segments meeting at a point form a sharp corner. Rounding a corner
//! trims a stretch of arc length off both sides and bridges the gap with a
//! joint curve through the intersection of the two trimmed arms.
//!
//! An open end may instead have to reach a neighbouring segment: the end is
//! extended along its tangent to where it crosses the neighbour, and the
//! neighbour's normal there is recorded as the end's cutoff.

use alloc::vec::Vec;

use crate::metrics::{find_crossing, time_by_length_with};
use crate::{
    BezierCurve, ParamCurve, Point, ProcessorConfig, Segment, Skeleton, SkeletonError, Vec2,
};

/// Bridge the gap between two trimmed arms.
///
/// `joint` runs from the end of `left` to the start of `right`, and lends
/// its offset vectors to the result. When the arms are parallel and the
/// gap lies straight ahead, the result is a line; when they are parallel
/// otherwise (a U-turn), a cubic bulging `offset` units along the arms;
/// otherwise a quadratic whose control point is the intersection of the
/// two arm lines.
pub fn adjust_joint(
    joint: &BezierCurve,
    left: &BezierCurve,
    right: &BezierCurve,
    offset: f64,
    tolerance: f64,
) -> BezierCurve {
    let start = joint.start();
    let end = joint.end();
    let arriving = left.end_tangent();
    let leaving = right.start_tangent();
    let cross = arriving.cross(leaving);
    let mut out = if cross.abs() < tolerance {
        let chord = (end - start).normalize();
        if start == end || (chord.dot(leaving) - 1.0).abs() < tolerance {
            BezierCurve::line(start, end)
        } else {
            let bulge = arriving * offset;
            BezierCurve::cubic(start, start + bulge, end + bulge, end)
        }
    } else {
        // start + s * arriving lies on the line through end along leaving.
        let s = (end - start).cross(leaving) / cross;
        BezierCurve::quad(start, start + arriving * s, end)
    };
    out.set_offset_vector(joint.offset_vector());
    out.set_end_offset_vector(joint.end_offset_vector());
    out
}

/// Find the segment `offset` places from segment `segment` of skeleton
/// `skeleton`, continuing into neighbouring skeletons past either end.
fn locate(
    skeletons: &[Skeleton],
    skeleton: usize,
    segment: usize,
    offset: isize,
) -> Option<(usize, usize)> {
    let mut sk = skeleton;
    let mut target = isize::try_from(segment).ok()? + offset;
    loop {
        let len = isize::try_from(skeletons.get(sk)?.len()).ok()?;
        if target < 0 {
            sk = sk.checked_sub(1)?;
            target = isize::try_from(skeletons[sk].len()).ok()? - 1;
        } else if target >= len {
            target -= len;
            sk += 1;
        } else {
            return Some((sk, usize::try_from(target).ok()?));
        }
    }
}

/// The curve index and local parameter of a global parameter, clamped to
/// the curves of a segment.
fn split_param(curves: &[BezierCurve], t: f64) -> (usize, f64) {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "t is clamped to the segment's parameter range"
    )]
    let index = (t.max(0.0).floor() as usize).min(curves.len() - 1);
    (index, t - index as f64)
}

/// Where the line from `end` along `direction` crosses `target`, and the
/// normal of `target` there, oriented along `direction`.
fn crossing(end: Point, direction: Vec2, target: &[BezierCurve]) -> Option<(Point, Vec2)> {
    if target.is_empty() || direction == Vec2::ZERO {
        return None;
    }
    let side = |t: f64| {
        let (i, local) = split_param(target, t);
        direction.cross(target[i].eval(local) - end)
    };
    let t = find_crossing(side, 0.0, target.len() as f64)?;
    let (i, local) = split_param(target, t);
    let mut normal = target[i].perpendicular(local);
    if normal.dot(direction) < 0.0 {
        normal = -normal;
    }
    Some((target[i].eval(local), normal))
}

/// Extend the open ends of every segment that names a neighbour to reach.
///
/// References are resolved against `skeletons` as given, so the order in
/// which segments are visited doesn't matter. A reference of 0 is ignored.
/// When the crossing is away from the end, a line to it is added to the
/// segment and carries the cutoff; otherwise the cutoff goes on the end
/// curve itself. Either way the reference is consumed.
///
/// # Errors
///
/// [`SkeletonError::MissingNeighbor`] if a reference points past every
/// skeleton, and [`SkeletonError::NoCrossing`] if the end's tangent line
/// doesn't cross the neighbour.
pub fn resolve_extensions(skeletons: &[Skeleton]) -> Result<Vec<Skeleton>, SkeletonError> {
    let mut out = Vec::with_capacity(skeletons.len());
    for (s, skeleton) in skeletons.iter().enumerate() {
        let mut segments = Vec::with_capacity(skeleton.len());
        for (j, segment) in skeleton.iter().enumerate() {
            let mut curves = segment.curves().to_vec();
            let target = move |offset: isize| {
                let (ts, tj) = locate(skeletons, s, j, offset).ok_or(
                    SkeletonError::MissingNeighbor {
                        skeleton: s,
                        segment: j,
                        offset,
                    },
                )?;
                Ok::<_, SkeletonError>(skeletons[ts].segments()[tj].curves())
            };
            let no_crossing = SkeletonError::NoCrossing {
                skeleton: s,
                segment: j,
            };

            if let Some(first) = curves.first_mut() {
                if let Some(offset) = first.extend_start().filter(|o| *o != 0) {
                    let start = first.start();
                    let (hit, normal) = crossing(start, -first.start_tangent(), target(offset)?)
                        .ok_or(no_crossing.clone())?;
                    first.set_extend_start(None);
                    log::trace!("skeleton {s} segment {j}: start extends to {hit:?}");
                    if hit.is_near(start, 1e-9) {
                        first.set_cutoff_start(Some(normal));
                    } else {
                        first.set_cutoff_start(None);
                        let mut line = BezierCurve::line(hit, start);
                        line.set_offset_vector(first.offset_vector());
                        line.set_cutoff_start(Some(normal));
                        curves.insert(0, line);
                    }
                }
            }

            if let Some(last) = curves.last_mut() {
                if let Some(offset) = last.extend_end().filter(|o| *o != 0) {
                    let end = last.end();
                    let (hit, normal) = crossing(end, last.end_tangent(), target(offset)?)
                        .ok_or(no_crossing)?;
                    last.set_extend_end(None);
                    log::trace!("skeleton {s} segment {j}: end extends to {hit:?}");
                    if hit.is_near(end, 1e-9) {
                        last.set_cutoff_end(Some(normal));
                    } else {
                        last.set_cutoff_end(None);
                        let mut line = BezierCurve::line(end, hit);
                        line.set_offset_vector(last.offset_vector_at_t(1.0));
                        line.set_cutoff_end(Some(normal));
                        curves.push(line);
                    }
                }
            }
            segments.push(Segment::from_vec(curves));
        }
        out.push(Skeleton::from_vec(segments));
    }
    Ok(out)
}

/// Trim `target` arc length off one end of `curves`.
fn trim(curves: &mut Vec<BezierCurve>, target: f64, from_start: bool, config: &ProcessorConfig) {
    if curves.is_empty() {
        return;
    }
    let t = time_by_length_with(curves, target, from_start, config.tolerance, config.max_eval);
    let (index, local) = split_param(curves, t);
    if from_start {
        curves.drain(..index);
        let (_, right) = curves[0].split(local);
        curves[0] = right;
    } else {
        curves.truncate(index + 1);
        let (left, _) = curves[index].split(local);
        curves[index] = left;
    }
}

/// The joint bridging `left` to `right` around `corner`.
fn corner_joint(
    left: &BezierCurve,
    corner: Point,
    right: &BezierCurve,
    offset: f64,
    config: &ProcessorConfig,
) -> BezierCurve {
    let mut joint = BezierCurve::quad(left.end(), corner, right.start());
    joint.set_offset_vector(left.offset_vector_at_t(1.0));
    joint.set_end_offset_vector(Some(right.offset_vector()));
    adjust_joint(&joint, left, right, offset, config.tolerance)
}

/// Round the corners of a skeleton and join its segments into one run.
///
/// Consecutive segments (including the last and the first) that share an
/// endpoint form a corner. Each side of a corner loses up to `offset` of
/// arc length, but never more than leaves `curve_gap` of the segment, and
/// the joint curve takes its place. With `offset == 0` the segments are
/// joined as they are.
pub fn resolve_corners(skeleton: &Skeleton, offset: f64, config: &ProcessorConfig) -> Segment {
    let segments = skeleton.segments();
    if offset <= 0.0 {
        return skeleton.curves().cloned().collect();
    }
    let m = segments.len();
    let mut out: Vec<BezierCurve> = Vec::new();
    let mut pending: Option<Point> = None;
    for (i, data) in segments.iter().enumerate() {
        if data.is_empty() {
            continue;
        }
        let left = &segments[(i + m - 1) % m];
        let right = &segments[(i + 1) % m];
        let joint_left = m > 1 && left.end() == data.start();
        let joint_right = m > 1 && data.end() == right.start();
        let mut curves = data.curves().to_vec();
        if !joint_left && !joint_right {
            out.extend(curves);
            continue;
        }

        let sides = if joint_left && joint_right { 2.0 } else { 1.0 };
        let target = offset.min((data.length() - config.curve_gap) / sides).max(0.0);
        log::trace!(
            "segment {i}: trimming {target} (left: {joint_left}, right: {joint_right})"
        );
        if joint_left {
            trim(&mut curves, target, true, config);
            if let (Some(corner), Some(prev)) = (pending.take(), out.last()) {
                let joint = corner_joint(prev, corner, &curves[0], offset, config);
                out.push(joint);
            }
        }
        if joint_right {
            trim(&mut curves, target, false, config);
        }
        out.extend(curves);

        if joint_right {
            if let (Some(corner), Some(last), Some(first)) = (data.end(), out.last(), out.first()) {
                if i == m - 1 {
                    let joint = corner_joint(last, corner, first, offset, config);
                    out.push(joint);
                } else {
                    pending = Some(corner);
                }
            }
        }
    }
    Segment::from_vec(out)
}

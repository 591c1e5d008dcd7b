// Copyright 2026 the Skelpen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Print an SVG of a stroked glyph skeleton at a few weights.

use skelpen::{
    BezierCurve, Contour, GlyphSkeleton, ParamCurve, Params, Point, Segment, Skeleton,
    SkeletonProcessor,
};

fn glyph() -> GlyphSkeleton {
    // A lowercase "n": stem, then an arch with a right-angle shoulder.
    let stem = Skeleton::from_vec(vec![Segment::from_vec(vec![BezierCurve::line(
        (200.0, 0.0),
        (200.0, 500.0),
    )])]);
    let arch = Skeleton::from_vec(vec![
        Segment::from_vec(vec![BezierCurve::cubic(
            (200.0, 380.0),
            (260.0, 480.0),
            (340.0, 500.0),
            (420.0, 500.0),
        )]),
        Segment::from_vec(vec![BezierCurve::line((420.0, 500.0), (620.0, 500.0))]),
        Segment::from_vec(vec![BezierCurve::line((620.0, 500.0), (620.0, 0.0))]),
    ]);
    GlyphSkeleton::new(vec![stem, arch])
}

fn fmt_point(p: Point) -> String {
    // Flip y so the baseline sits at the bottom of the image.
    format!("{:.2},{:.2}", p.x, 800.0 - p.y)
}

fn to_svg(contour: &Contour) -> String {
    let mut d = String::new();
    if let Some(first) = contour.curves().first() {
        d.push_str(&format!("M{}", fmt_point(first.start())));
    }
    for curve in contour {
        let pts = curve.points();
        match pts.len() {
            2 => d.push_str(&format!("L{}", fmt_point(pts[1]))),
            3 => d.push_str(&format!("Q{} {}", fmt_point(pts[1]), fmt_point(pts[2]))),
            4 => d.push_str(&format!(
                "C{} {} {}",
                fmt_point(pts[1]),
                fmt_point(pts[2]),
                fmt_point(pts[3])
            )),
            _ => {
                for i in 1..=16 {
                    d.push_str(&format!("L{}", fmt_point(curve.eval(i as f64 / 16.0))));
                }
            }
        }
    }
    d.push('Z');
    d
}

fn main() {
    let glyph = glyph();
    let processor = SkeletonProcessor::new();
    println!("<svg width='2820' height='1000' xmlns='http://www.w3.org/2000/svg'>");
    for (i, weight) in [0.0, 0.5, 1.0].into_iter().enumerate() {
        let params = Params::default()
            .with_weight(weight)
            .with_curve(0.6)
            .with_roundness(0.5);
        let outline = match processor.process(&glyph, &params) {
            Ok(outline) => outline,
            Err(e) => {
                eprintln!("weight {weight}: {e}");
                continue;
            }
        };
        println!("  <g transform='translate({} 0)'>", i as f64 * 940.0);
        for contour in &outline.contours {
            println!("    <path d='{}' fill='#000' />", to_svg(contour));
        }
        println!("  </g>");
    }
    println!("</svg>");
}

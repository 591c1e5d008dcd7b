// Copyright 2026 the Skelpen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parametric glyph outlines from stroke skeletons.
//!
//! A glyph is authored as a [`GlyphSkeleton`]: centre lines made of Bézier
//! curves, grouped into [`Segment`]s and [`Skeleton`]s. Each curve carries
//! pen data that says how wide to draw it and how its open ends are capped.
//! From a set of normalized [`Params`], the [`SkeletonProcessor`] derives
//! the closed [`Contour`]s of the glyph outline.
//!
//! # Examples
//!
//! Stroking a single bar:
//! ```
//! use skelpen::{recompute, BezierCurve, GlyphSkeleton, Params, Segment, Skeleton};
//!
//! let bar = Segment::from_vec(vec![BezierCurve::line((100.0, 300.0), (500.0, 300.0))]);
//! let glyph = GlyphSkeleton::new(vec![Skeleton::from_vec(vec![bar])]);
//!
//! let outline = recompute(&glyph, &Params::default().with_weight(1.0)).unwrap();
//! assert_eq!(outline.contours.len(), 1);
//! let bbox = outline.bounding_box().unwrap();
//! assert!((bbox.height() - 95.0).abs() < 1e-9);
//! ```
//!
//! Rounding a corner:
//! ```
//! use skelpen::{recompute, BezierCurve, GlyphSkeleton, Params, Segment, Skeleton};
//!
//! let ell = Skeleton::from_vec(vec![
//!     Segment::from_vec(vec![BezierCurve::line((200.0, 600.0), (200.0, 100.0))]),
//!     Segment::from_vec(vec![BezierCurve::line((200.0, 100.0), (700.0, 100.0))]),
//! ]);
//! let glyph = GlyphSkeleton::new(vec![ell]);
//!
//! let outline = recompute(&glyph, &Params::default().with_curve(1.0)).unwrap();
//! // The corner became a joint curve between the two trimmed arms.
//! assert_eq!(outline.skeletons[0].len(), 3);
//! ```
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate for
//! math functionality. The `std` feature is enabled by default, but can be
//! disabled, as long as the `libm` feature is enabled. This crate still uses
//! the `alloc` crate regardless.
//!
//! The `serde` and `schemars` features derive serialization and JSON schemas
//! for the data types, and `mint` adds conversions of the math primitives.
//!
//! [`libm`]: https://docs.rs/libm

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::unreadable_literal,
    reason = "quadrature and tolerance constants are written as published"
)]
#![allow(
    clippy::many_single_char_names,
    reason = "geometry code follows the usual p, q, t, u, x, y notation"
)]
#![allow(
    clippy::excessive_precision,
    reason = "constants keep the digits of their reference values"
)]
#![allow(
    clippy::bool_to_int_with_if,
    reason = "branch form reads closer to the geometry it encodes"
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("skelpen requires either the `std` or `libm` feature");

extern crate alloc;

mod affine;
mod bezier;
pub mod common;
mod contour;
mod corner;
mod error;
mod library;
pub mod metrics;
pub mod offset;
mod param_curve;
mod params;
mod point;
mod poly;
mod processor;
mod rect;
mod skeleton;
mod stroke;
mod vec2;

pub use crate::affine::*;
pub use crate::bezier::*;
pub use crate::contour::*;
pub use crate::corner::*;
pub use crate::error::*;
pub use crate::library::*;
pub use crate::param_curve::*;
pub use crate::params::*;
pub use crate::point::*;
pub use crate::poly::*;
pub use crate::processor::*;
pub use crate::rect::*;
pub use crate::skeleton::*;
pub use crate::stroke::*;
pub use crate::vec2::*;

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Exact 2D predicates for the triangulator
//! Adaptive-precision arithmetic comes from the `robust` crate, so signs are exact

use nalgebra::Point2;
use robust::Coord;

macro_rules! coord {
    ($p:expr) => {
        Coord { x: $p.x, y: $p.y }
    };
}

/// Twice the signed area of (a, b, c): positive when counter-clockwise,
/// zero exactly when collinear
pub fn orient2d(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    robust::orient2d(coord!(a), coord!(b), coord!(c))
}

/// Positive when `d` lies strictly inside the circumcircle of the
/// counter-clockwise triangle (a, b, c)
pub fn incircle(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>, d: &Point2<f64>) -> f64 {
    robust::incircle(coord!(a), coord!(b), coord!(c), coord!(d))
}

/// Segments (a, b) and (c, d) cross at a single point interior to both.
/// Touching at an endpoint or overlapping collinearly is not a crossing.
pub fn segments_cross(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>, d: &Point2<f64>) -> bool {
    let o1 = orient2d(a, b, c);
    let o2 = orient2d(a, b, d);
    let o3 = orient2d(c, d, a);
    let o4 = orient2d(c, d, b);
    opposite_signs(o1, o2) && opposite_signs(o3, o4)
}

/// Both values are non-zero with different signs
pub fn opposite_signs(a: f64, b: f64) -> bool {
    (a > 0.0 && b < 0.0) || (a < 0.0 && b > 0.0)
}

/// `p` is collinear with (a, b) and strictly between them
pub fn strictly_between(a: &Point2<f64>, b: &Point2<f64>, p: &Point2<f64>) -> bool {
    if orient2d(a, b, p) != 0.0 {
        return false;
    }
    (p - a).dot(&(b - a)) > 0.0 && (p - b).dot(&(a - b)) > 0.0
}

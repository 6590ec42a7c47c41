// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Boundary primitives: points, rings and polygons with holes

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A 3D coordinate triple
pub type Point = Point3<f64>;

/// Minimum point count of a usable ring: three distinct vertices plus the closing duplicate
pub const MIN_RING_POINTS: usize = 4;

/// Closed loop of points bounding a polygon or one of its holes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub points: Vec<Point>,
}

impl Ring {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn from_coords(coords: &[[f64; 3]]) -> Self {
        Self {
            points: coords.iter().map(|c| Point::new(c[0], c[1], c[2])).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First and last points are exactly equal (no tolerance)
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.points.len() < MIN_RING_POINTS
    }

    /// Close the ring in place by appending a copy of the first point.
    /// Returns `true` when a point had to be appended.
    pub fn close(&mut self) -> bool {
        if self.points.is_empty() || self.is_closed() {
            return false;
        }
        let first = self.points[0];
        self.points.push(first);
        true
    }

    /// Closed view of the ring that leaves `self` untouched
    pub fn closed(&self) -> Cow<'_, Ring> {
        if self.points.is_empty() || self.is_closed() {
            Cow::Borrowed(self)
        } else {
            let mut ring = self.clone();
            ring.close();
            Cow::Owned(ring)
        }
    }

    /// Consecutive point pairs along the ring
    pub fn segments(&self) -> impl Iterator<Item = (&Point, &Point)> {
        self.points.windows(2).map(|w| (&w[0], &w[1]))
    }
}

/// One exterior ring plus zero or more holes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub exterior: Ring,
    pub interiors: Vec<Ring>,
}

impl Polygon {
    pub fn new(exterior: Ring, interiors: Vec<Ring>) -> Self {
        Self { exterior, interiors }
    }

    pub fn from_exterior(exterior: Ring) -> Self {
        Self {
            exterior,
            interiors: Vec::new(),
        }
    }

    /// All rings, exterior first
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }

    pub fn rings_mut(&mut self) -> impl Iterator<Item = &mut Ring> {
        std::iter::once(&mut self.exterior).chain(self.interiors.iter_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_appends_first_point() {
        let mut ring = Ring::from_coords(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        assert!(!ring.is_closed());
        assert!(ring.close());
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.points[0], ring.points[3]);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut ring = Ring::from_coords(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        ring.close();
        let once = ring.clone();
        assert!(!ring.close());
        assert_eq!(ring, once);
    }

    #[test]
    fn test_closure_is_exact() {
        let mut ring = Ring::from_coords(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1e-12],
        ]);
        assert!(ring.close());
        assert_eq!(ring.len(), 5);
    }

    #[test]
    fn test_closed_view_leaves_source() {
        let ring = Ring::from_coords(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let view = ring.closed();
        assert!(view.is_closed());
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn test_degenerate() {
        let ring = Ring::from_coords(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]]);
        assert!(ring.is_degenerate());
        assert!(Ring::default().is_degenerate());
        let mut empty = Ring::default();
        assert!(!empty.close());
    }
}

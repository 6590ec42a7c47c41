// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding box accumulated over every point seen in a session

use super::Point;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Box covering a single point
    pub fn seeded(point: &Point) -> Self {
        Self {
            min: *point,
            max: *point,
        }
    }

    /// Widen the box to include `point`.
    ///
    /// Per axis a coordinate either lowers the minimum or raises the maximum, never both.
    pub fn observe(mut self, point: &Point) -> Self {
        for axis in 0..3 {
            if point[axis] < self.min[axis] {
                self.min[axis] = point[axis];
            } else if point[axis] > self.max[axis] {
                self.max[axis] = point[axis];
            }
        }
        self
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        points.into_iter().fold(None, observe)
    }

    pub fn center(&self) -> Point {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn size(&self) -> nalgebra::Vector3<f64> {
        self.max - self.min
    }
}

/// Fold a point into an optional box; the first point seeds it.
pub fn observe(bounds: Option<BoundingBox>, point: &Point) -> Option<BoundingBox> {
    Some(match bounds {
        Some(bbox) => bbox.observe(point),
        None => BoundingBox::seeded(point),
    })
}

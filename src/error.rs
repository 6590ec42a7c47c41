// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for the tessellation pipeline

use thiserror::Error;

/// Failures of the constrained triangulator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TriangulationError {
    #[error("point ({x}, {y}) lies outside the triangulation bounds")]
    PointOutsideBounds { x: f64, y: f64 },

    #[error("non-finite coordinate in projected boundary")]
    NonFiniteCoordinate,

    #[error("constraint {from}-{to} crosses an existing constrained edge")]
    IntersectingConstraints { from: usize, to: usize },

    #[error("constraint {from}-{to} could not be recovered")]
    ConstraintNotRecovered { from: usize, to: usize },
}

/// Failures while turning a polygon into triangles
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("cannot fit a plane through {distinct} distinct points")]
    DegeneratePlane { distinct: usize },

    #[error("ring has {points} points, at least 4 are required")]
    DegenerateRing { points: usize },

    #[error(transparent)]
    Triangulation(#[from] TriangulationError),
}

pub type GeometryResult<T> = std::result::Result<T, GeometryError>;

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - polygon tessellation and render buffers

mod bbox;
mod labeling;
mod mesh;
mod plane;
mod primitives;
pub mod robust_predicates;
pub mod tessellate;
pub mod triangulation;

pub use bbox::{observe, BoundingBox};
pub use labeling::{label, Labeling};
pub use mesh::{
    EdgeBuffer, TriangleBuffer, Vertex, FLOATS_PER_EDGE, FLOATS_PER_TRIANGLE, FLOATS_PER_VERTEX,
};
pub use plane::Plane;
pub use primitives::{Point, Polygon, Ring, MIN_RING_POINTS};
pub use tessellate::{polygon_edges, tessellate_polygon};
pub use triangulation::ConstrainedTriangulation;

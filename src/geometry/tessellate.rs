// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polygon-with-holes tessellation
//!
//! A polygon goes through: closure check, degenerate rejection, then either
//! the bare-triangle shortcut or plane fitting, constrained triangulation of
//! the projected rings, inside/outside labeling and back-projection to 3D.

use super::labeling::label;
use super::mesh::{EdgeBuffer, TriangleBuffer};
use super::plane::Plane;
use super::primitives::{Point, Polygon, Ring, MIN_RING_POINTS};
use super::triangulation::ConstrainedTriangulation;
use crate::error::{GeometryError, GeometryResult};
use nalgebra::Point2;
use std::borrow::Cow;
use tracing::{debug, warn};

fn closed_ring(ring: &Ring) -> Cow<'_, Ring> {
    let closed = ring.closed();
    if matches!(closed, Cow::Owned(_)) {
        warn!("last point != first, closing ring with a copy of its first point");
    }
    closed
}

/// Append the filled triangles of `polygon` to `out` and return how many were added.
///
/// Vertex order inside each triangle follows the triangulation and is
/// counter-clockwise around the plane normal, which may or may not match the
/// winding of the exterior ring. Degenerate exteriors are reported as
/// [`GeometryError::DegenerateRing`]; nothing is appended on error.
pub fn tessellate_polygon(polygon: &Polygon, out: &mut TriangleBuffer) -> GeometryResult<usize> {
    let exterior = closed_ring(&polygon.exterior);
    if exterior.is_degenerate() {
        return Err(GeometryError::DegenerateRing {
            points: exterior.len(),
        });
    }

    // Bare triangle: keep the input vertex order and skip the triangulator
    if exterior.len() == MIN_RING_POINTS && polygon.interiors.is_empty() {
        let [a, b, c] = [exterior.points[0], exterior.points[1], exterior.points[2]];
        let plane = Plane::through(&a, &b, &c);
        out.push_triangle([a, b, c], &plane.normal());
        return Ok(1);
    }

    let mut rings = vec![exterior];
    for interior in &polygon.interiors {
        let interior = closed_ring(interior);
        if interior.is_degenerate() {
            warn!(points = interior.len(), "interior ring with < 4 points, skipping");
            continue;
        }
        rings.push(interior);
    }

    let points: Vec<Point> = rings.iter().flat_map(|r| r.points.iter().copied()).collect();
    let plane = Plane::fit(&points)?;

    let projected: Vec<Vec<Point2<f64>>> = rings
        .iter()
        .map(|r| r.points.iter().map(|p| plane.to_2d(p)).collect())
        .collect();
    let cdt = ConstrainedTriangulation::from_rings(&projected)?;

    if cdt.finite_face_count() == 0 {
        debug!("degenerate projection produced no triangles, skipping");
        return Ok(0);
    }

    let labeling = label(&cdt);
    let normal = plane.normal();
    let mut added = 0;
    for face in labeling.inside_faces() {
        let corners = cdt.face(face).vertices.map(|v| plane.to_3d(cdt.point(v)));
        out.push_triangle(corners, &normal);
        added += 1;
    }

    debug!(
        rings = rings.len(),
        vertices = cdt.vertex_count(),
        triangles = added,
        "tessellated polygon"
    );
    Ok(added)
}

/// Append one edge per segment of the closed exterior ring (and of the holes when
/// `include_holes` is set). Returns the number of edges added.
pub fn polygon_edges(polygon: &Polygon, include_holes: bool, out: &mut EdgeBuffer) -> usize {
    let exterior = polygon.exterior.closed();
    if exterior.is_degenerate() {
        warn!(points = exterior.len(), "polygon with < 4 points, skipping its edges");
        return 0;
    }

    let mut added = ring_edges(&exterior, out);
    if include_holes {
        for interior in &polygon.interiors {
            let interior = interior.closed();
            if !interior.is_degenerate() {
                added += ring_edges(&interior, out);
            }
        }
    }
    added
}

fn ring_edges(ring: &Ring, out: &mut EdgeBuffer) -> usize {
    let mut added = 0;
    for (from, to) in ring.segments() {
        out.push_edge(from, to);
        added += 1;
    }
    added
}

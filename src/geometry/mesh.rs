// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Flat render buffers for triangles and wireframe edges

use super::Point;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Floats per emitted vertex: position followed by normal
pub const FLOATS_PER_VERTEX: usize = 6;
/// Floats per emitted triangle
pub const FLOATS_PER_TRIANGLE: usize = 3 * FLOATS_PER_VERTEX;
/// Floats per emitted edge: two endpoints
pub const FLOATS_PER_EDGE: usize = 6;

/// Vertex with position and normal, as laid out in a [`TriangleBuffer`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Triangles as `x y z nx ny nz` per vertex, three vertices per triangle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TriangleBuffer {
    data: Vec<f32>,
}

impl TriangleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one triangle, every vertex sharing the same normal
    pub fn push_triangle(&mut self, corners: [Point; 3], normal: &Vector3<f64>) {
        self.data.reserve(FLOATS_PER_TRIANGLE);
        for corner in &corners {
            self.data.extend_from_slice(&[
                corner.x as f32,
                corner.y as f32,
                corner.z as f32,
                normal.x as f32,
                normal.y as f32,
                normal.z as f32,
            ]);
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.data.len() / FLOATS_PER_TRIANGLE
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.data.chunks_exact(FLOATS_PER_VERTEX).map(|v| Vertex {
            position: [v[0], v[1], v[2]],
            normal: [v[3], v[4], v[5]],
        })
    }

    /// Triangles as three vertices each
    pub fn triangles(&self) -> impl Iterator<Item = [Vertex; 3]> + '_ {
        self.data.chunks_exact(FLOATS_PER_TRIANGLE).map(|t| {
            let vertex = |k: usize| Vertex {
                position: [t[6 * k], t[6 * k + 1], t[6 * k + 2]],
                normal: [t[6 * k + 3], t[6 * k + 4], t[6 * k + 5]],
            };
            [vertex(0), vertex(1), vertex(2)]
        })
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

/// Segments as `x0 y0 z0 x1 y1 z1`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeBuffer {
    data: Vec<f32>,
}

impl EdgeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_edge(&mut self, from: &Point, to: &Point) {
        self.data.extend_from_slice(&[
            from.x as f32,
            from.y as f32,
            from.z as f32,
            to.x as f32,
            to.y as f32,
            to.z as f32,
        ]);
    }

    pub fn edge_count(&self) -> usize {
        self.data.len() / FLOATS_PER_EDGE
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn edges(&self) -> impl Iterator<Item = ([f32; 3], [f32; 3])> + '_ {
        self.data
            .chunks_exact(FLOATS_PER_EDGE)
            .map(|e| ([e[0], e[1], e[2]], [e[3], e[4], e[5]]))
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

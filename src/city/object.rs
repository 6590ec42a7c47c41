// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! City objects and their derived render geometry

use super::attributes::is_known_attribute;
use crate::geometry::{
    polygon_edges, tessellate_polygon, EdgeBuffer, Point, Polygon, TriangleBuffer,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// A building, tree or other feature with polygons grouped by surface type.
///
/// `polygons` is the source geometry. `triangles` and `edges` are derived from it by
/// [`CityObject::regenerate`] and can be rebuilt at any time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityObject {
    pub id: String,
    pub object_type: String,
    attributes: BTreeMap<String, String>,
    polygons: BTreeMap<String, Vec<Polygon>>,
    #[serde(skip)]
    triangles: BTreeMap<String, TriangleBuffer>,
    #[serde(skip)]
    edges: EdgeBuffer,
}

/// Outcome of one [`CityObject::regenerate`] pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegenerationSummary {
    pub triangles: usize,
    pub edges: usize,
    /// Polygons that contributed no triangles because tessellation failed
    pub skipped: usize,
}

impl CityObject {
    pub fn new(id: impl Into<String>, object_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            object_type: object_type.into(),
            ..Self::default()
        }
    }

    /// Store an attribute if its name is on the allow-list. Returns whether it was kept.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) -> bool {
        if !is_known_attribute(name) {
            return false;
        }
        self.attributes.insert(name.to_string(), value.into());
        true
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn add_polygon(&mut self, surface_type: impl Into<String>, polygon: Polygon) {
        self.polygons.entry(surface_type.into()).or_default().push(polygon);
    }

    pub fn polygons(&self) -> &BTreeMap<String, Vec<Polygon>> {
        &self.polygons
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.values().map(Vec::len).sum()
    }

    /// Every source point, exterior and interior rings alike
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.polygons
            .values()
            .flatten()
            .flat_map(|polygon| polygon.rings())
            .flat_map(|ring| ring.points.iter())
    }

    /// Close every open source ring in place. Returns how many rings were repaired.
    pub fn close_rings(&mut self) -> usize {
        let mut repaired = 0;
        for (surface_type, polygons) in self.polygons.iter_mut() {
            for ring in polygons.iter_mut().flat_map(Polygon::rings_mut) {
                if ring.close() {
                    warn!(
                        object = %self.id,
                        surface_type = %surface_type,
                        "last point != first, ring closed"
                    );
                    repaired += 1;
                }
            }
        }
        repaired
    }

    pub fn triangles(&self) -> &BTreeMap<String, TriangleBuffer> {
        &self.triangles
    }

    pub fn triangles_for(&self, surface_type: &str) -> Option<&TriangleBuffer> {
        self.triangles.get(surface_type)
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.values().map(TriangleBuffer::triangle_count).sum()
    }

    pub fn edges(&self) -> &EdgeBuffer {
        &self.edges
    }

    /// Drop derived triangles and edges. Source polygons are untouched.
    pub fn clear_geometry(&mut self) {
        self.triangles.clear();
        self.edges.clear();
    }

    /// Rebuild triangles and edges from the source polygons.
    ///
    /// A polygon that fails to tessellate is logged and skipped; its siblings and
    /// its boundary edges are still emitted. Running this twice yields identical
    /// buffers.
    pub fn regenerate(&mut self, hole_edges: bool) -> RegenerationSummary {
        self.clear_geometry();
        let mut summary = RegenerationSummary::default();

        for (surface_type, polygons) in &self.polygons {
            let buffer = self.triangles.entry(surface_type.clone()).or_default();
            for (index, polygon) in polygons.iter().enumerate() {
                match tessellate_polygon(polygon, buffer) {
                    Ok(added) => summary.triangles += added,
                    Err(err) => {
                        warn!(
                            object = %self.id,
                            surface_type = %surface_type,
                            polygon = index,
                            error = %err,
                            "skipping polygon"
                        );
                        summary.skipped += 1;
                    }
                }
                summary.edges += polygon_edges(polygon, hole_edges, &mut self.edges);
            }
        }

        debug!(
            object = %self.id,
            triangles = summary.triangles,
            edges = summary.edges,
            skipped = summary.skipped,
            "regenerated object geometry"
        );
        summary
    }
}

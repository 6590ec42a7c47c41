// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Session API: loaded objects, their bounds and derived geometry

use crate::city::{CityObject, RegenerationSummary};
use crate::config::MeshConfig;
use crate::geometry::{observe, BoundingBox};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Owns every object loaded since the last [`Session::clear`]
#[derive(Debug, Clone, Default)]
pub struct Session {
    objects: Vec<CityObject>,
    bounds: Option<BoundingBox>,
    config: MeshConfig,
}

/// Counts over the whole session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub objects: usize,
    pub polygons: usize,
    pub triangles: usize,
    pub edges: usize,
    pub triangles_by_surface: BTreeMap<String, usize>,
    pub bounds: Option<BoundingBox>,
}

impl Session {
    /// Create an empty session with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MeshConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    /// Take ownership of a parsed object: close its rings and widen the bounds.
    ///
    /// Derived geometry is not built here, see [`Session::regenerate_geometries`].
    pub fn ingest(&mut self, mut object: CityObject) {
        object.close_rings();
        self.bounds = object.points().fold(self.bounds, observe);
        self.objects.push(object);
    }

    /// Rebuild triangles and edges of every object from its source polygons
    pub fn regenerate_geometries(&mut self) -> RegenerationSummary {
        let hole_edges = self.config.hole_edges;
        let summaries: Vec<RegenerationSummary> = if self.config.parallel {
            self.objects
                .par_iter_mut()
                .map(|object| object.regenerate(hole_edges))
                .collect()
        } else {
            self.objects
                .iter_mut()
                .map(|object| object.regenerate(hole_edges))
                .collect()
        };

        let total = summaries
            .into_iter()
            .fold(RegenerationSummary::default(), |acc, s| RegenerationSummary {
                triangles: acc.triangles + s.triangles,
                edges: acc.edges + s.edges,
                skipped: acc.skipped + s.skipped,
            });
        debug!(
            objects = self.objects.len(),
            triangles = total.triangles,
            skipped = total.skipped,
            parallel = self.config.parallel,
            "regenerated session geometry"
        );
        total
    }

    /// Discard all objects and reset the bounds
    pub fn clear(&mut self) {
        self.objects.clear();
        self.bounds = None;
    }

    /// Bounds of every point ingested so far, `None` before the first point
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    pub fn objects(&self) -> &[CityObject] {
        &self.objects
    }

    pub fn object(&self, id: &str) -> Option<&CityObject> {
        self.objects.iter().find(|object| object.id == id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn stats(&self) -> SessionStats {
        let mut stats = SessionStats {
            objects: self.objects.len(),
            bounds: self.bounds,
            ..SessionStats::default()
        };
        for object in &self.objects {
            stats.polygons += object.polygon_count();
            stats.edges += object.edges().edge_count();
            for (surface_type, buffer) in object.triangles() {
                stats.triangles += buffer.triangle_count();
                *stats
                    .triangles_by_surface
                    .entry(surface_type.clone())
                    .or_default() += buffer.triangle_count();
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Polygon, Ring};

    fn building(id: &str, offset: f64) -> CityObject {
        let mut object = CityObject::new(id, "Building");
        object.add_polygon(
            "RoofSurface",
            Polygon::from_exterior(Ring::from_coords(&[
                [offset, 0.0, 5.0],
                [offset + 2.0, 0.0, 5.0],
                [offset + 2.0, 2.0, 5.0],
                [offset, 2.0, 5.0],
            ])),
        );
        object
    }

    #[test]
    fn test_ingest_tracks_bounds() {
        let mut session = Session::new();
        assert_eq!(session.bounds(), None);

        session.ingest(building("a", 0.0));
        session.ingest(building("b", 10.0));

        let bounds = session.bounds().unwrap();
        assert_eq!(bounds.min, Point::new(0.0, 0.0, 5.0));
        assert_eq!(bounds.max, Point::new(12.0, 2.0, 5.0));
        // Ring closed at ingest
        assert!(session.objects()[0].polygons()["RoofSurface"][0].exterior.is_closed());
    }

    #[test]
    fn test_regenerate_and_stats() {
        let mut session = Session::new();
        session.ingest(building("a", 0.0));
        session.ingest(building("b", 10.0));

        let summary = session.regenerate_geometries();
        assert_eq!(summary.triangles, 4);

        let stats = session.stats();
        assert_eq!(stats.objects, 2);
        assert_eq!(stats.polygons, 2);
        assert_eq!(stats.triangles, 4);
        assert_eq!(stats.edges, 8);
        assert_eq!(stats.triangles_by_surface.get("RoofSurface"), Some(&4));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut sequential = Session::new();
        let mut parallel = Session::with_config(MeshConfig {
            parallel: true,
            ..MeshConfig::default()
        });
        for i in 0..8 {
            sequential.ingest(building(&format!("b{i}"), i as f64 * 3.0));
            parallel.ingest(building(&format!("b{i}"), i as f64 * 3.0));
        }
        sequential.regenerate_geometries();
        parallel.regenerate_geometries();

        for (a, b) in sequential.objects().iter().zip(parallel.objects()) {
            assert_eq!(a.triangles(), b.triangles());
            assert_eq!(a.edges(), b.edges());
        }
    }

    #[test]
    fn test_clear_resets_bounds() {
        let mut session = Session::new();
        session.ingest(building("a", 0.0));
        session.clear();
        assert!(session.is_empty());
        assert_eq!(session.bounds(), None);

        session.ingest(building("b", 10.0));
        assert_eq!(session.bounds().unwrap().min, Point::new(10.0, 0.0, 5.0));
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Constrained 2D triangulation over an arena of faces
//!
//! Points are inserted incrementally into a bounding super-triangle and
//! legalized with Lawson flips. Constraints are recovered
//! afterwards by flipping away every edge that crosses them, so all ring
//! segments end up as edges of the triangulation.
//!
//! Faces are addressed by index into a flat arena and store their neighbours
//! by index. Every vertex remembers one incident face, so edge lookups rotate
//! around a vertex and point location walks from the last insertion. Faces incident to one of the three super vertices are the
//! "infinite" faces; together they play the role of the unbounded face that
//! surrounds the convex hull of the real vertices.

use super::robust_predicates::{
    incircle, opposite_signs, orient2d, segments_cross, strictly_between,
};
use crate::error::TriangulationError;
use nalgebra::Point2;
use std::collections::VecDeque;

pub type VertexId = usize;
pub type FaceId = usize;

/// The super-triangle occupies the first three vertex slots
const SUPER_VERTICES: usize = 3;

/// Scale of the super-triangle relative to the extent of the input
const SUPER_SCALE: f64 = 16.0;

/// Triangle of the arena
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Vertices in counter-clockwise order
    pub vertices: [VertexId; 3],
    /// `neighbors[i]` lies across the edge opposite `vertices[i]`
    pub neighbors: [Option<FaceId>; 3],
    /// `constrained[i]` marks the edge opposite `vertices[i]`
    pub constrained: [bool; 3],
}

impl Face {
    fn new(vertices: [VertexId; 3]) -> Self {
        Self {
            vertices,
            neighbors: [None; 3],
            constrained: [false; 3],
        }
    }

    fn index_of(&self, vertex: VertexId) -> Option<usize> {
        self.vertices.iter().position(|&v| v == vertex)
    }

    /// Endpoints of the edge opposite `vertices[i]`, in counter-clockwise order
    pub fn edge(&self, i: usize) -> (VertexId, VertexId) {
        (self.vertices[(i + 1) % 3], self.vertices[(i + 2) % 3])
    }
}

enum Location {
    Inside,
    OnEdge(usize),
    Vertex(VertexId),
}

/// Triangulation of a set of 2D points with required (constrained) edges
#[derive(Debug, Clone)]
pub struct ConstrainedTriangulation {
    points: Vec<Point2<f64>>,
    faces: Vec<Face>,
    /// One face incident to each vertex
    incident: Vec<FaceId>,
    /// Where the last point landed, start of the next walk
    last_face: FaceId,
}

impl ConstrainedTriangulation {
    /// Empty triangulation whose super-triangle encloses every given point
    pub fn enclosing<'a>(
        points: impl IntoIterator<Item = &'a Point2<f64>>,
    ) -> Result<Self, TriangulationError> {
        let mut bounds: Option<(Point2<f64>, Point2<f64>)> = None;
        for p in points {
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(TriangulationError::NonFiniteCoordinate);
            }
            bounds = Some(match bounds {
                Some((min, max)) => (min.inf(p), max.sup(p)),
                None => (*p, *p),
            });
        }
        let (min, max) = bounds.unwrap_or((Point2::origin(), Point2::origin()));

        let center = nalgebra::center(&min, &max);
        let d = (max - min).amax().max(1.0) * SUPER_SCALE;
        let points = vec![
            Point2::new(center.x - 2.0 * d, center.y - d),
            Point2::new(center.x + 2.0 * d, center.y - d),
            Point2::new(center.x, center.y + 2.0 * d),
        ];

        Ok(Self {
            points,
            faces: vec![Face::new([0, 1, 2])],
            incident: vec![0; SUPER_VERTICES],
            last_face: 0,
        })
    }

    /// Triangulate closed rings, constraining every pair of consecutive vertices.
    ///
    /// Consecutive points that land on the same vertex are skipped rather than
    /// inserted as zero-length constraints.
    pub fn from_rings(rings: &[Vec<Point2<f64>>]) -> Result<Self, TriangulationError> {
        let mut cdt = Self::enclosing(rings.iter().flatten())?;
        for ring in rings {
            let mut previous: Option<VertexId> = None;
            for p in ring {
                let current = cdt.insert(*p)?;
                if let Some(previous) = previous.filter(|&v| v != current) {
                    cdt.insert_constraint(previous, current)?;
                }
                previous = Some(current);
            }
        }
        Ok(cdt)
    }

    pub fn point(&self, vertex: VertexId) -> &Point2<f64> {
        &self.points[vertex]
    }

    /// Number of real (non-super) vertices
    pub fn vertex_count(&self) -> usize {
        self.points.len() - SUPER_VERTICES
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face(&self, face: FaceId) -> &Face {
        &self.faces[face]
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Face with only real vertices
    pub fn is_finite(&self, face: FaceId) -> bool {
        self.faces[face].vertices.iter().all(|&v| v >= SUPER_VERTICES)
    }

    pub fn finite_faces(&self) -> impl Iterator<Item = FaceId> + '_ {
        (0..self.faces.len()).filter(move |&f| self.is_finite(f))
    }

    pub fn finite_face_count(&self) -> usize {
        self.finite_faces().count()
    }

    pub fn neighbor(&self, face: FaceId, i: usize) -> Option<FaceId> {
        self.faces[face].neighbors[i]
    }

    pub fn is_constrained(&self, face: FaceId, i: usize) -> bool {
        self.faces[face].constrained[i]
    }

    /// Face and edge index of the edge `(u, v)`, in either direction.
    ///
    /// Rotates around `u` starting from its incident face. The fan of a super
    /// vertex is open, so the rotation runs both ways before giving up.
    pub fn find_edge(&self, u: VertexId, v: VertexId) -> Option<(FaceId, usize)> {
        let start = *self.incident.get(u)?;
        for forward in [true, false] {
            let mut f = start;
            loop {
                let face = &self.faces[f];
                let iu = face.index_of(u)?;
                if let Some(iv) = face.index_of(v) {
                    return Some((f, 3 - iu - iv));
                }
                let across = if forward { (iu + 1) % 3 } else { (iu + 2) % 3 };
                match face.neighbors[across] {
                    Some(g) if g == start => return None,
                    Some(g) => f = g,
                    None => break,
                }
            }
        }
        None
    }

    pub fn is_constrained_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.find_edge(u, v)
            .map(|(f, i)| self.is_constrained(f, i))
            .unwrap_or(false)
    }

    /// Insert a point, returning the existing vertex if one sits at exactly the same place
    pub fn insert(&mut self, p: Point2<f64>) -> Result<VertexId, TriangulationError> {
        if !p.x.is_finite() || !p.y.is_finite() {
            return Err(TriangulationError::NonFiniteCoordinate);
        }
        let outside = TriangulationError::PointOutsideBounds { x: p.x, y: p.y };
        let (face, location) = self.locate(&p).ok_or_else(|| outside.clone())?;

        match location {
            Location::Vertex(v) => Ok(v),
            Location::Inside => {
                let v = self.push_point(p, face);
                self.split_face(face, v);
                self.last_face = face;
                Ok(v)
            }
            Location::OnEdge(i) => {
                if self.faces[face].neighbors[i].is_none() {
                    return Err(outside);
                }
                let v = self.push_point(p, face);
                self.split_edge(face, i, v);
                self.last_face = face;
                Ok(v)
            }
        }
    }

    /// Force the segment `a`-`b` to be an edge of the triangulation and mark it constrained.
    ///
    /// A segment running exactly through another vertex is split there.
    pub fn insert_constraint(&mut self, a: VertexId, b: VertexId) -> Result<(), TriangulationError> {
        if a == b || self.mark_constrained(a, b) {
            return Ok(());
        }

        let pa = self.points[a];
        let pb = self.points[b];
        let through = (SUPER_VERTICES..self.points.len())
            .filter(|&v| v != a && v != b && strictly_between(&pa, &pb, &self.points[v]))
            .min_by(|&u, &v| {
                let du = (self.points[u] - pa).norm_squared();
                let dv = (self.points[v] - pa).norm_squared();
                du.total_cmp(&dv)
            });
        if let Some(c) = through {
            self.insert_constraint(a, c)?;
            return self.insert_constraint(c, b);
        }

        let mut pending = self.crossed_edges(a, b)?;
        let limit = 4 * (pending.len() + 1) * self.faces.len();
        let mut steps = 0;

        while let Some((u, v)) = pending.pop_front() {
            steps += 1;
            if steps > limit {
                return Err(TriangulationError::ConstraintNotRecovered { from: a, to: b });
            }
            let Some((f, i)) = self.find_edge(u, v) else {
                continue;
            };
            let Some((g, j)) = self.mirror(f, i) else {
                return Err(TriangulationError::ConstraintNotRecovered { from: a, to: b });
            };
            let p = self.faces[f].vertices[i];
            let q = self.faces[g].vertices[j];
            let (pp, pq) = (self.points[p], self.points[q]);

            // Only a strictly convex quadrilateral can be flipped
            if opposite_signs(
                orient2d(&pp, &pq, &self.points[u]),
                orient2d(&pp, &pq, &self.points[v]),
            ) {
                self.flip(f, i);
                if segments_cross(&pa, &pb, &pp, &pq) {
                    pending.push_back((p, q));
                }
            } else {
                pending.push_back((u, v));
            }
        }

        if self.mark_constrained(a, b) {
            Ok(())
        } else {
            Err(TriangulationError::ConstraintNotRecovered { from: a, to: b })
        }
    }

    fn push_point(&mut self, p: Point2<f64>, face: FaceId) -> VertexId {
        self.points.push(p);
        self.incident.push(face);
        self.points.len() - 1
    }

    /// Point the incident slot of each vertex of `f` at `f`
    fn touch(&mut self, f: FaceId) {
        for v in self.faces[f].vertices {
            self.incident[v] = f;
        }
    }

    fn locate(&self, p: &Point2<f64>) -> Option<(FaceId, Location)> {
        self.walk(p).or_else(|| {
            (0..self.faces.len()).find_map(|f| {
                let o = self.orientations(f, p);
                self.classify(f, o).map(|location| (f, location))
            })
        })
    }

    /// Visibility walk from the last insertion. The exit edge rotates with the
    /// step count so the walk cannot cycle through non-Delaunay faces forever;
    /// `None` sends the caller to the full scan.
    fn walk(&self, p: &Point2<f64>) -> Option<(FaceId, Location)> {
        let mut f = self.last_face;
        for step in 0..self.faces.len() {
            let o = self.orientations(f, p);
            match (0..3).map(|k| (k + step) % 3).find(|&i| o[i] < 0.0) {
                Some(i) => f = self.faces[f].neighbors[i]?,
                None => return self.classify(f, o).map(|location| (f, location)),
            }
        }
        None
    }

    /// `o[i]` is the orientation of `p` against the edge opposite `vertices[i]`
    fn orientations(&self, f: FaceId, p: &Point2<f64>) -> [f64; 3] {
        let [a, b, c] = self.faces[f].vertices.map(|v| &self.points[v]);
        [orient2d(b, c, p), orient2d(c, a, p), orient2d(a, b, p)]
    }

    fn classify(&self, f: FaceId, o: [f64; 3]) -> Option<Location> {
        if o.iter().any(|&x| x < 0.0) {
            return None;
        }
        let zeros: Vec<usize> = (0..3).filter(|&i| o[i] == 0.0).collect();
        Some(match zeros.as_slice() {
            [] => Location::Inside,
            [i] => Location::OnEdge(*i),
            _ => {
                let k = (0..3).find(|&i| o[i] != 0.0).unwrap_or(0);
                Location::Vertex(self.faces[f].vertices[k])
            }
        })
    }

    /// Neighbour across edge `i` of `face`, and the index of the same edge in it
    fn mirror(&self, face: FaceId, i: usize) -> Option<(FaceId, usize)> {
        let g = self.faces[face].neighbors[i]?;
        let j = self.faces[g].neighbors.iter().position(|&n| n == Some(face))?;
        Some((g, j))
    }

    fn replace_neighbor(&mut self, face: FaceId, old: FaceId, new: FaceId) {
        if let Some(slot) = self.faces[face].neighbors.iter_mut().find(|n| **n == Some(old)) {
            *slot = Some(new);
        }
    }

    fn mark_constrained(&mut self, u: VertexId, v: VertexId) -> bool {
        let Some((f, i)) = self.find_edge(u, v) else {
            return false;
        };
        self.faces[f].constrained[i] = true;
        if let Some((g, j)) = self.mirror(f, i) {
            self.faces[g].constrained[j] = true;
        }
        true
    }

    /// Unconstrained edges properly crossed by the segment `a`-`b`
    fn crossed_edges(
        &self,
        a: VertexId,
        b: VertexId,
    ) -> Result<VecDeque<(VertexId, VertexId)>, TriangulationError> {
        let (pa, pb) = (&self.points[a], &self.points[b]);
        let mut crossed = VecDeque::new();
        for face in &self.faces {
            for i in 0..3 {
                let (u, v) = face.edge(i);
                if u > v || !segments_cross(pa, pb, &self.points[u], &self.points[v]) {
                    continue;
                }
                if face.constrained[i] {
                    return Err(TriangulationError::IntersectingConstraints { from: a, to: b });
                }
                crossed.push_back((u, v));
            }
        }
        Ok(crossed)
    }

    fn split_face(&mut self, f: FaceId, p: VertexId) {
        let old = self.faces[f].clone();
        let [v0, v1, v2] = old.vertices;
        let f1 = self.faces.len();
        let f2 = f1 + 1;

        self.faces[f] = Face {
            vertices: [p, v1, v2],
            neighbors: [old.neighbors[0], Some(f1), Some(f2)],
            constrained: [old.constrained[0], false, false],
        };
        self.faces.push(Face {
            vertices: [p, v2, v0],
            neighbors: [old.neighbors[1], Some(f2), Some(f)],
            constrained: [old.constrained[1], false, false],
        });
        self.faces.push(Face {
            vertices: [p, v0, v1],
            neighbors: [old.neighbors[2], Some(f), Some(f1)],
            constrained: [old.constrained[2], false, false],
        });

        if let Some(n) = old.neighbors[1] {
            self.replace_neighbor(n, f, f1);
        }
        if let Some(n) = old.neighbors[2] {
            self.replace_neighbor(n, f, f2);
        }
        for face in [f, f1, f2] {
            self.touch(face);
        }

        self.legalize(p, vec![f, f1, f2]);
    }

    /// Split edge `i` of `f` (and the face across it) at the new vertex `p`.
    /// Both halves inherit the constraint flag of the split edge.
    fn split_edge(&mut self, f: FaceId, i: usize, p: VertexId) {
        let Some((g, j)) = self.mirror(f, i) else {
            return;
        };
        let fo = self.faces[f].clone();
        let go = self.faces[g].clone();
        let w = fo.vertices[i];
        let a1 = fo.vertices[(i + 1) % 3];
        let a2 = fo.vertices[(i + 2) % 3];
        let q = go.vertices[j];
        let c = fo.constrained[i];
        let f2 = self.faces.len();
        let g2 = f2 + 1;

        self.faces[f] = Face {
            vertices: [w, a1, p],
            neighbors: [Some(g2), Some(f2), fo.neighbors[(i + 2) % 3]],
            constrained: [c, false, fo.constrained[(i + 2) % 3]],
        };
        self.faces[g] = Face {
            vertices: [q, a2, p],
            neighbors: [Some(f2), Some(g2), go.neighbors[(j + 2) % 3]],
            constrained: [c, false, go.constrained[(j + 2) % 3]],
        };
        self.faces.push(Face {
            vertices: [w, p, a2],
            neighbors: [Some(g), fo.neighbors[(i + 1) % 3], Some(f)],
            constrained: [c, fo.constrained[(i + 1) % 3], false],
        });
        self.faces.push(Face {
            vertices: [q, p, a1],
            neighbors: [Some(f), go.neighbors[(j + 1) % 3], Some(g)],
            constrained: [c, go.constrained[(j + 1) % 3], false],
        });

        if let Some(n) = fo.neighbors[(i + 1) % 3] {
            self.replace_neighbor(n, f, f2);
        }
        if let Some(n) = go.neighbors[(j + 1) % 3] {
            self.replace_neighbor(n, g, g2);
        }
        for face in [f, g, f2, g2] {
            self.touch(face);
        }

        self.legalize(p, vec![f, g, f2, g2]);
    }

    /// Flip the edge opposite `vertices[i]` of `f`.
    ///
    /// With `p` that vertex, `(a1, a2)` the edge and `q` the apex across it,
    /// `f` becomes `(p, a1, q)` and its neighbour becomes `(q, a2, p)`.
    fn flip(&mut self, f: FaceId, i: usize) {
        let Some((g, j)) = self.mirror(f, i) else {
            return;
        };
        let fo = self.faces[f].clone();
        let go = self.faces[g].clone();
        let p = fo.vertices[i];
        let a1 = fo.vertices[(i + 1) % 3];
        let a2 = fo.vertices[(i + 2) % 3];
        let q = go.vertices[j];

        self.faces[f] = Face {
            vertices: [p, a1, q],
            neighbors: [go.neighbors[(j + 1) % 3], Some(g), fo.neighbors[(i + 2) % 3]],
            constrained: [go.constrained[(j + 1) % 3], false, fo.constrained[(i + 2) % 3]],
        };
        self.faces[g] = Face {
            vertices: [q, a2, p],
            neighbors: [fo.neighbors[(i + 1) % 3], Some(f), go.neighbors[(j + 2) % 3]],
            constrained: [fo.constrained[(i + 1) % 3], false, go.constrained[(j + 2) % 3]],
        };

        if let Some(n) = go.neighbors[(j + 1) % 3] {
            self.replace_neighbor(n, g, f);
        }
        if let Some(n) = fo.neighbors[(i + 1) % 3] {
            self.replace_neighbor(n, f, g);
        }
        self.touch(f);
        self.touch(g);
    }

    /// Lawson flips around a freshly inserted vertex `p`
    fn legalize(&mut self, p: VertexId, mut stack: Vec<FaceId>) {
        while let Some(f) = stack.pop() {
            let Some(k) = self.faces[f].index_of(p) else {
                continue;
            };
            if self.faces[f].constrained[k] {
                continue;
            }
            let Some((g, j)) = self.mirror(f, k) else {
                continue;
            };
            let q = self.faces[g].vertices[j];
            let (a1, a2) = self.faces[f].edge(k);
            let (pp, pq) = (&self.points[p], &self.points[q]);
            // Constraint recovery leaves non-Delaunay edges behind: only convex quads flip
            let convex = opposite_signs(
                orient2d(pp, pq, &self.points[a1]),
                orient2d(pp, pq, &self.points[a2]),
            );
            let [a, b, c] = self.faces[f].vertices.map(|v| &self.points[v]);
            if convex && incircle(a, b, c, pq) > 0.0 {
                self.flip(f, k);
                stack.push(f);
                stack.push(g);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(x0, y0),
            Point2::new(x0 + size, y0),
            Point2::new(x0 + size, y0 + size),
            Point2::new(x0, y0 + size),
            Point2::new(x0, y0),
        ]
    }

    /// Every face is counter-clockwise and its adjacency is symmetric
    fn assert_consistent(cdt: &ConstrainedTriangulation) {
        for (f, face) in cdt.faces().iter().enumerate() {
            let [a, b, c] = face.vertices.map(|v| cdt.point(v));
            assert!(orient2d(a, b, c) > 0.0, "face {f} is not counter-clockwise");
            for i in 0..3 {
                if let Some(g) = face.neighbors[i] {
                    let j = cdt.face(g).neighbors.iter().position(|&n| n == Some(f));
                    let j = j.expect("neighbour does not point back");
                    let (u, v) = face.edge(i);
                    assert_eq!(cdt.face(g).edge(j), (v, u));
                    assert_eq!(face.constrained[i], cdt.face(g).constrained[j]);
                }
            }
        }
    }

    #[test]
    fn test_single_triangle() {
        let ring = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.0, 0.0),
        ];
        let cdt = ConstrainedTriangulation::from_rings(&[ring]).unwrap();
        assert_consistent(&cdt);
        assert_eq!(cdt.vertex_count(), 3);
        assert_eq!(cdt.finite_face_count(), 1);
    }

    #[test]
    fn test_duplicate_point_returns_existing_vertex() {
        let mut cdt = ConstrainedTriangulation::enclosing(&square(0.0, 0.0, 1.0)).unwrap();
        let a = cdt.insert(Point2::new(0.25, 0.5)).unwrap();
        let b = cdt.insert(Point2::new(0.25, 0.5)).unwrap();
        assert_eq!(a, b);
        assert_eq!(cdt.vertex_count(), 1);
    }

    #[test]
    fn test_ring_edges_are_constrained() {
        let outer = square(0.0, 0.0, 10.0);
        let hole = square(3.0, 3.0, 4.0);
        let cdt = ConstrainedTriangulation::from_rings(&[outer.clone(), hole.clone()]).unwrap();
        assert_consistent(&cdt);
        assert_eq!(cdt.vertex_count(), 8);

        for ring in [&outer, &hole] {
            for pair in ring.windows(2) {
                let u = (0..cdt.points.len()).find(|&v| *cdt.point(v) == pair[0]).unwrap();
                let v = (0..cdt.points.len()).find(|&v| *cdt.point(v) == pair[1]).unwrap();
                assert!(cdt.is_constrained_edge(u, v));
            }
        }
    }

    #[test]
    fn test_constraint_recovered_by_flipping() {
        // A long thin diagonal that the Delaunay triangulation does not contain
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(5.0, -1.0),
            Point2::new(5.0, 1.0),
            Point2::new(3.0, 0.4),
            Point2::new(7.0, -0.4),
        ];
        let mut cdt = ConstrainedTriangulation::enclosing(&points).unwrap();
        let ids: Vec<VertexId> = points.iter().map(|p| cdt.insert(*p).unwrap()).collect();
        cdt.insert_constraint(ids[2], ids[3]).unwrap();
        assert_consistent(&cdt);
        assert!(cdt.is_constrained_edge(ids[2], ids[3]));
    }

    #[test]
    fn test_constraint_split_at_collinear_vertex() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(2.0, 3.0),
        ];
        let mut cdt = ConstrainedTriangulation::enclosing(&points).unwrap();
        let ids: Vec<VertexId> = points.iter().map(|p| cdt.insert(*p).unwrap()).collect();
        cdt.insert_constraint(ids[0], ids[2]).unwrap();
        assert_consistent(&cdt);
        assert!(cdt.is_constrained_edge(ids[0], ids[1]));
        assert!(cdt.is_constrained_edge(ids[1], ids[2]));
    }

    #[test]
    fn test_point_on_constrained_edge_splits_constraint() {
        let points = [Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), Point2::new(2.0, 3.0)];
        let mut cdt = ConstrainedTriangulation::enclosing(&points).unwrap();
        let ids: Vec<VertexId> = points.iter().map(|p| cdt.insert(*p).unwrap()).collect();
        cdt.insert_constraint(ids[0], ids[1]).unwrap();
        let mid = cdt.insert(Point2::new(2.0, 0.0)).unwrap();
        assert_consistent(&cdt);
        assert!(cdt.is_constrained_edge(ids[0], mid));
        assert!(cdt.is_constrained_edge(mid, ids[1]));
    }

    #[test]
    fn test_crossing_constraints_are_rejected() {
        let bowtie = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 2.0),
            Point2::new(0.0, 0.0),
        ];
        let result = ConstrainedTriangulation::from_rings(&[bowtie]);
        assert!(matches!(
            result,
            Err(TriangulationError::IntersectingConstraints { .. })
        ));
    }

    #[test]
    fn test_collinear_input_has_no_finite_faces() {
        let line = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 0.0),
        ];
        let cdt = ConstrainedTriangulation::from_rings(&[line]).unwrap();
        assert_consistent(&cdt);
        assert_eq!(cdt.finite_face_count(), 0);
    }

    #[test]
    fn test_edge_lookup_on_long_comb() {
        // 4n + 2 vertices: teeth of height 5 along y = 0, closed along y = -1
        let n = 150;
        let mut ring = vec![Point2::new(0.0, -1.0)];
        for i in 0..n {
            let x = 2.0 * i as f64;
            ring.extend([
                Point2::new(x, 0.0),
                Point2::new(x, 5.0),
                Point2::new(x + 1.0, 5.0),
                Point2::new(x + 1.0, 0.0),
            ]);
        }
        ring.push(Point2::new(2.0 * n as f64 - 1.0, -1.0));
        ring.push(Point2::new(0.0, -1.0));

        let cdt = ConstrainedTriangulation::from_rings(&[ring.clone()]).unwrap();
        assert_consistent(&cdt);
        assert_eq!(cdt.vertex_count(), 4 * n + 2);

        // Ring vertices are inserted in order after the super vertices
        for k in 0..ring.len() - 1 {
            let u = SUPER_VERTICES + k;
            let v = SUPER_VERTICES + (k + 1) % (ring.len() - 1);
            assert!(cdt.is_constrained_edge(u, v), "segment {k} not constrained");
        }

        // The rotating lookup finds every edge the arena holds
        for face in cdt.faces() {
            for i in 0..3 {
                let (u, v) = face.edge(i);
                let (g, j) = cdt.find_edge(u, v).unwrap();
                let (a, b) = cdt.face(g).edge(j);
                assert!((a, b) == (u, v) || (a, b) == (v, u));
            }
        }
        // First and last tooth tops are collinear with every top in between
        assert_eq!(cdt.find_edge(SUPER_VERTICES + 2, SUPER_VERTICES + 4 * n - 1), None);
    }

    #[test]
    fn test_non_finite_point_is_rejected() {
        let ring = vec![Point2::new(0.0, 0.0), Point2::new(f64::NAN, 1.0)];
        assert_eq!(
            ConstrainedTriangulation::from_rings(&[ring]).unwrap_err(),
            TriangulationError::NonFiniteCoordinate
        );
    }
}

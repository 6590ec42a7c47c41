// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Inside/outside classification of triangulated faces
//! Determines which faces belong to the filled area of a polygon with holes

use super::triangulation::{ConstrainedTriangulation, FaceId};
use std::collections::VecDeque;

/// Node of the dual graph: the unbounded face, or a finite face of the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Outer,
    Finite(FaceId),
}

/// Per-face classification produced by [`label`]
#[derive(Debug, Clone, PartialEq)]
pub struct Labeling {
    inside: Vec<bool>,
}

impl Labeling {
    /// Face lies in the filled area. Infinite faces are never inside.
    pub fn is_inside(&self, face: FaceId) -> bool {
        self.inside.get(face).copied().unwrap_or(false)
    }

    /// Faces classified as inside, in arena order
    pub fn inside_faces(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.inside
            .iter()
            .enumerate()
            .filter_map(|(f, &inside)| inside.then_some(f))
    }

    pub fn inside_count(&self) -> usize {
        self.inside.iter().filter(|&&inside| inside).count()
    }
}

/// Flood-fill the dual graph from the unbounded face.
///
/// Crossing a constrained edge toggles the fill state, crossing any other edge
/// keeps it. Holes therefore come out empty and islands inside holes come out
/// filled again, without any containment test.
pub fn label(cdt: &ConstrainedTriangulation) -> Labeling {
    let node_of = |face: Option<FaceId>| match face {
        Some(f) if cdt.is_finite(f) => Node::Finite(f),
        _ => Node::Outer,
    };

    // Slot 0 holds the unbounded face, slot f + 1 the arena face f
    let slot = |node: Node| match node {
        Node::Outer => 0,
        Node::Finite(f) => f + 1,
    };

    let mut visited = vec![false; cdt.face_count() + 1];
    let mut inside = vec![false; cdt.face_count() + 1];

    // Sides of finite faces that border the unbounded face
    let hull_sides: Vec<(FaceId, usize)> = cdt
        .finite_faces()
        .flat_map(|f| (0..3).map(move |i| (f, i)))
        .filter(|&(f, i)| node_of(cdt.neighbor(f, i)) == Node::Outer)
        .collect();

    visited[0] = true;
    inside[0] = false;
    let mut queue = VecDeque::from([Node::Outer]);

    while let Some(node) = queue.pop_front() {
        let current = inside[slot(node)];
        let sides: Vec<(Node, bool)> = match node {
            Node::Outer => hull_sides
                .iter()
                .map(|&(f, i)| (Node::Finite(f), cdt.is_constrained(f, i)))
                .collect(),
            Node::Finite(f) => (0..3)
                .map(|i| (node_of(cdt.neighbor(f, i)), cdt.is_constrained(f, i)))
                .collect(),
        };

        for (neighbor, constrained) in sides {
            let s = slot(neighbor);
            if visited[s] {
                continue;
            }
            visited[s] = true;
            inside[s] = if constrained { !current } else { current };
            queue.push_back(neighbor);
        }
    }

    Labeling {
        inside: inside.into_iter().skip(1).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    fn square(x0: f64, y0: f64, size: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(x0, y0),
            Point2::new(x0 + size, y0),
            Point2::new(x0 + size, y0 + size),
            Point2::new(x0, y0 + size),
            Point2::new(x0, y0),
        ]
    }

    fn inside_area(cdt: &ConstrainedTriangulation, labeling: &Labeling) -> f64 {
        labeling
            .inside_faces()
            .map(|f| {
                let [a, b, c] = cdt.face(f).vertices.map(|v| *cdt.point(v));
                (b - a).perp(&(c - a)) / 2.0
            })
            .sum()
    }

    #[test]
    fn test_plain_square_is_filled() {
        let cdt = ConstrainedTriangulation::from_rings(&[square(0.0, 0.0, 4.0)]).unwrap();
        let labeling = label(&cdt);
        assert_eq!(labeling.inside_count(), 2);
        assert!((inside_area(&cdt, &labeling) - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_hole_is_left_empty() {
        let cdt = ConstrainedTriangulation::from_rings(&[
            square(0.0, 0.0, 10.0),
            square(3.0, 3.0, 4.0),
        ])
        .unwrap();
        let labeling = label(&cdt);
        assert!((inside_area(&cdt, &labeling) - 84.0).abs() < 1e-9);
        assert_eq!(labeling.inside_count(), 8);
    }

    #[test]
    fn test_island_in_hole_is_filled() {
        let cdt = ConstrainedTriangulation::from_rings(&[
            square(0.0, 0.0, 10.0),
            square(2.0, 2.0, 6.0),
            square(4.0, 4.0, 2.0),
        ])
        .unwrap();
        let labeling = label(&cdt);
        assert!((inside_area(&cdt, &labeling) - (100.0 - 36.0 + 4.0)).abs() < 1e-9);
    }

    #[test]
    fn test_infinite_faces_are_outside() {
        let cdt = ConstrainedTriangulation::from_rings(&[square(0.0, 0.0, 1.0)]).unwrap();
        let labeling = label(&cdt);
        for f in 0..cdt.face_count() {
            if !cdt.is_finite(f) {
                assert!(!labeling.is_inside(f));
            }
        }
    }

    #[test]
    fn test_concave_outline() {
        // L-shape: its convex hull filler triangle must be discarded
        let ring = vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 4.0),
            Point2::new(0.0, 4.0),
            Point2::new(0.0, 0.0),
        ];
        let cdt = ConstrainedTriangulation::from_rings(&[ring]).unwrap();
        let labeling = label(&cdt);
        assert!((inside_area(&cdt, &labeling) - 7.0).abs() < 1e-9);
        assert_eq!(labeling.inside_count(), 4);
    }
}

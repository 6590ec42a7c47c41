// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Best-fit planes and the 3D <-> 2D mapping used for triangulation

use super::Point;
use crate::error::{GeometryError, GeometryResult};
use nalgebra::{Matrix3, Point2, Vector3};
use std::collections::HashSet;

/// Plane with an orthonormal in-plane basis.
///
/// `u × v` points along `normal`, so counter-clockwise triangles in the 2D
/// projection wind counter-clockwise around the normal in 3D.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    origin: Point,
    normal: Vector3<f64>,
    u: Vector3<f64>,
    v: Vector3<f64>,
}

impl Plane {
    /// Plane through `origin` with the given (not necessarily unit) normal
    pub fn from_point_and_normal(origin: Point, normal: Vector3<f64>) -> Self {
        let (u, v) = in_plane_basis(&normal);
        Self { origin, normal, u, v }
    }

    /// Plane through three points; the normal is `(b - a) × (c - a)`, unnormalized
    pub fn through(a: &Point, b: &Point, c: &Point) -> Self {
        Self::from_point_and_normal(*a, (b - a).cross(&(c - a)))
    }

    /// Least-squares plane minimizing the squared orthogonal distance to every point.
    ///
    /// Each point carries the same weight. The normal is the eigenvector of the
    /// smallest eigenvalue of the covariance matrix, the origin is the centroid.
    pub fn fit(points: &[Point]) -> GeometryResult<Self> {
        let distinct = points
            .iter()
            .map(|p| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()])
            .collect::<HashSet<_>>()
            .len();
        if distinct < 3 {
            return Err(GeometryError::DegeneratePlane { distinct });
        }

        let n = points.len() as f64;
        let centroid = Point::from(points.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords) / n);

        let mut covariance = Matrix3::zeros();
        for p in points {
            let d = p - centroid;
            covariance += d * d.transpose();
        }

        let eigen = covariance.symmetric_eigen();
        let smallest = eigen.eigenvalues.imin();
        let normal = eigen.eigenvectors.column(smallest).into_owned();

        Ok(Self::from_point_and_normal(centroid, normal))
    }

    /// Orthogonal vector of the plane. Callers must not assume unit length.
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Signed distance along the normal direction, scaled by `|normal|`
    pub fn offset_of(&self, point: &Point) -> f64 {
        self.normal.dot(&(point - self.origin))
    }

    pub fn to_2d(&self, point: &Point) -> Point2<f64> {
        let d = point - self.origin;
        Point2::new(d.dot(&self.u), d.dot(&self.v))
    }

    pub fn to_3d(&self, point: &Point2<f64>) -> Point {
        self.origin + self.u * point.x + self.v * point.y
    }
}

fn in_plane_basis(normal: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let n = match normal.try_normalize(0.0) {
        Some(n) => n,
        None => return (Vector3::x(), Vector3::y()),
    };
    // Seed with the coordinate axis least aligned with the normal
    let seed = match n.iamin() {
        0 => Vector3::x(),
        1 => Vector3::y(),
        _ => Vector3::z(),
    };
    let u = n.cross(&seed).normalize();
    let v = n.cross(&u);
    (u, v)
}

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Solidframe Team

//! Convex polygon with a cached supporting plane and an opaque shared tag

use super::{Plane, Vertex};
use crate::error::CsgError;
use serde::{Deserialize, Serialize};

/// Convex polygon.
///
/// The vertices must be coplanar (within [`super::EPSILON`]) and form a convex
/// loop wound counter-clockwise as seen from the outward side. The supporting
/// plane is derived from the first three vertices at construction and cached.
///
/// `shared` is an opaque caller-owned tag cloned onto every clone and split
/// fragment of the polygon; the kernel never inspects it. Use it for
/// per-face metadata such as surface color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon<S = ()> {
    pub vertices: Vec<Vertex>,
    pub shared: S,
    pub plane: Plane,
}

impl<S: Clone> Polygon<S> {
    /// Build a polygon from at least three coplanar vertices.
    ///
    /// Panics on fewer than three vertices and silently produces a degenerate
    /// plane when the first three are collinear; use [`Polygon::try_new`] for
    /// unvalidated input.
    pub fn new(vertices: Vec<Vertex>, shared: S) -> Self {
        let plane = Plane::from_points(
            &vertices[0].position,
            &vertices[1].position,
            &vertices[2].position,
        );
        Self {
            vertices,
            shared,
            plane,
        }
    }

    /// Validating constructor for caller-supplied vertex loops.
    pub fn try_new(vertices: Vec<Vertex>, shared: S) -> Result<Self, CsgError> {
        if vertices.len() < 3 {
            return Err(CsgError::DegeneratePolygon {
                count: vertices.len(),
            });
        }
        let a = &vertices[0].position;
        let b = &vertices[1].position;
        let c = &vertices[2].position;
        if (b - a).cross(&(c - a)).try_normalize(1.0e-12).is_none() {
            return Err(CsgError::CollinearVertices);
        }
        Ok(Self::new(vertices, shared))
    }

    /// Reverse the winding: vertex order, vertex normals, and the cached
    /// plane are all inverted.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for vertex in &mut self.vertices {
            vertex.flip();
        }
        self.plane.flip();
    }

    /// Replace the shared tag, keeping the geometry.
    pub fn map_shared<T: Clone>(self, f: impl FnOnce(S) -> T) -> Polygon<T> {
        Polygon {
            vertices: self.vertices,
            shared: f(self.shared),
            plane: self.plane,
        }
    }
}

impl Polygon<()> {
    /// Untagged polygon from a vertex loop.
    pub fn from_vertices(vertices: Vec<Vertex>) -> Self {
        Self::new(vertices, ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};

    fn triangle() -> Polygon {
        Polygon::from_vertices(vec![
            Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0)),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0)),
            Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::new(0.0, 0.0, 1.0)),
        ])
    }

    #[test]
    fn test_plane_from_first_three_vertices() {
        let poly = triangle();
        assert_relative_eq!(poly.plane.normal, Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(poly.plane.w, 0.0);
    }

    #[test]
    fn test_flip_reverses_winding_and_plane() {
        let mut poly = triangle();
        poly.flip();
        assert_relative_eq!(poly.plane.normal, Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(poly.vertices[0].position, Point3::new(0.0, 1.0, 0.0));
        for v in &poly.vertices {
            assert_eq!(v.normal, Vector3::new(0.0, 0.0, -1.0));
        }
    }

    #[test]
    fn test_double_flip_is_identity() {
        let original = triangle();
        let mut poly = original.clone();
        poly.flip();
        poly.flip();
        assert_eq!(poly, original);
    }

    #[test]
    fn test_try_new_rejects_too_few_vertices() {
        let result = Polygon::try_new(
            vec![
                Vertex::from_position(Point3::new(0.0, 0.0, 0.0)),
                Vertex::from_position(Point3::new(1.0, 0.0, 0.0)),
            ],
            (),
        );
        assert_eq!(result.unwrap_err(), CsgError::DegeneratePolygon { count: 2 });
    }

    #[test]
    fn test_try_new_rejects_collinear_vertices() {
        let result = Polygon::try_new(
            vec![
                Vertex::from_position(Point3::new(0.0, 0.0, 0.0)),
                Vertex::from_position(Point3::new(1.0, 0.0, 0.0)),
                Vertex::from_position(Point3::new(2.0, 0.0, 0.0)),
            ],
            (),
        );
        assert_eq!(result.unwrap_err(), CsgError::CollinearVertices);
    }

    #[test]
    fn test_map_shared() {
        let poly = triangle().map_shared(|_| "lid");
        assert_eq!(poly.shared, "lid");
        assert_eq!(poly.vertices.len(), 3);
    }
}

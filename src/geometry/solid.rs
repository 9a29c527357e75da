// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Solidframe Team

//! Solid boundary representation and Boolean set operations
//!
//! A [`Solid`] is a thin façade over a list of convex polygons describing a
//! closed boundary. Boolean operations never mutate their inputs: each one
//! clones both polygon lists into transient BSP trees, runs a fixed
//! clip/invert/build script, and collects the surviving polygons into a new
//! solid. The in-place transforms (`translate`, `rotate`) are the one
//! deliberate exception to the otherwise immutable surface.

use super::{BSPNode, BoundingBox, Plane, Polygon, Vertex};
use crate::error::CsgError;
use ahash::AHashMap;
use nalgebra::{Point3, Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};

/// Closed solid described by its boundary polygons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solid<S = ()> {
    polygons: Vec<Polygon<S>>,
}

impl<S> Default for Solid<S> {
    fn default() -> Self {
        Self {
            polygons: Vec::new(),
        }
    }
}

impl<S: Clone> Solid<S> {
    /// Wrap an existing polygon list. The polygons are owned exclusively by
    /// the new solid.
    pub fn from_polygons(polygons: Vec<Polygon<S>>) -> Self {
        Self { polygons }
    }

    /// Solid with no boundary.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The boundary polygons.
    pub fn polygons(&self) -> &[Polygon<S>] {
        &self.polygons
    }

    /// Consume the solid and return its polygons.
    pub fn into_polygons(self) -> Vec<Polygon<S>> {
        self.polygons
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Space in either `self` or `other`.
    ///
    /// The plain two-sided clip would keep two copies of faces the solids
    /// share; clipping the complement of `b` against `a` removes the copy
    /// held by `b` before the trees are merged.
    pub fn union(&self, other: &Self) -> Self {
        let mut a = BSPNode::from_polygons(self.polygons.clone());
        let mut b = BSPNode::from_polygons(other.polygons.clone());
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(b.all_polygons());
        Self::from_polygons(a.all_polygons())
    }

    /// Space in `self` but not in `other`: `A − B = ¬(¬A ∪ B)`, expanded in
    /// place so the complement never materializes separately.
    pub fn subtract(&self, other: &Self) -> Self {
        let mut a = BSPNode::from_polygons(self.polygons.clone());
        let mut b = BSPNode::from_polygons(other.polygons.clone());
        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(b.all_polygons());
        a.invert();
        Self::from_polygons(a.all_polygons())
    }

    /// Space in both `self` and `other`: `A ∩ B = ¬(¬A ∪ ¬B)`.
    pub fn intersect(&self, other: &Self) -> Self {
        let mut a = BSPNode::from_polygons(self.polygons.clone());
        let mut b = BSPNode::from_polygons(other.polygons.clone());
        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.build(b.all_polygons());
        a.invert();
        Self::from_polygons(a.all_polygons())
    }

    /// Solid and empty space switched. No tree is built; every polygon of
    /// the clone is flipped.
    pub fn inverse(&self) -> Self {
        let mut solid = self.clone();
        for polygon in &mut solid.polygons {
            polygon.flip();
        }
        solid
    }

    /// Move the solid by `displacement`, in place.
    ///
    /// The cached polygon planes stay valid: translating by `d` shifts a
    /// plane offset by `n · d` while the normal is unchanged.
    pub fn translate(&mut self, displacement: Vector3<f64>) {
        for polygon in &mut self.polygons {
            for vertex in &mut polygon.vertices {
                vertex.position += displacement;
            }
            polygon.plane.w += polygon.plane.normal.dot(&displacement);
        }
    }

    /// Rotate the solid about `axis` through the origin by `angle_deg`
    /// degrees, in place. Positions, vertex normals, and the cached polygon
    /// planes are all rotated, so subsequent Boolean operations classify
    /// against the transformed geometry.
    pub fn rotate(&mut self, axis: Vector3<f64>, angle_deg: f64) -> Result<(), CsgError> {
        let axis = Unit::try_new(axis, 1.0e-12).ok_or(CsgError::ZeroLengthAxis)?;
        let rotation = Rotation3::from_axis_angle(&axis, angle_deg.to_radians());
        for polygon in &mut self.polygons {
            for vertex in &mut polygon.vertices {
                vertex.position = rotation * vertex.position;
                vertex.normal = rotation * vertex.normal;
            }
            // Rotation about the origin preserves n · p, so w is untouched.
            polygon.plane = Plane::new(rotation * polygon.plane.normal, polygon.plane.w);
        }
        Ok(())
    }

    /// Deduplicated vertex/index export.
    ///
    /// Vertices are merged by exact position bit pattern; face index lists
    /// preserve each polygon's winding. The third value is the total number
    /// of indices across all faces.
    pub fn to_vertices_and_polygons(&self) -> (Vec<[f64; 3]>, Vec<Vec<usize>>, usize) {
        // -0.0 and 0.0 are the same position but different bit patterns;
        // fold them to one key so cancellation cannot duplicate a vertex.
        let canonical = |c: f64| if c == 0.0 { 0.0 } else { c };
        let mut index_of: AHashMap<[u64; 3], usize> = AHashMap::new();
        let mut vertices: Vec<[f64; 3]> = Vec::new();
        let mut faces: Vec<Vec<usize>> = Vec::new();
        let mut index_count = 0;
        for polygon in &self.polygons {
            let mut face = Vec::with_capacity(polygon.vertices.len());
            for vertex in &polygon.vertices {
                let p = vertex.position;
                let key = [
                    canonical(p.x).to_bits(),
                    canonical(p.y).to_bits(),
                    canonical(p.z).to_bits(),
                ];
                let index = *index_of.entry(key).or_insert_with(|| {
                    vertices.push([p.x, p.y, p.z]);
                    vertices.len() - 1
                });
                face.push(index);
                index_count += 1;
            }
            faces.push(face);
        }
        (vertices, faces, index_count)
    }

    /// Subdivide every polygon into quads around its centroid: one quad per
    /// original vertex, spanning the vertex, the midpoints of its two edges,
    /// and the centroid. Shared tags carry over to every quad.
    pub fn refine(&self) -> Self {
        let mut polygons = Vec::with_capacity(self.polygons.len() * 4);
        for polygon in &self.polygons {
            let verts = &polygon.vertices;
            let count = verts.len();
            let mut centroid = Vector3::zeros();
            for vertex in verts {
                centroid += vertex.position.coords;
            }
            let center = Vertex::new(
                Point3::from(centroid / count as f64),
                polygon.plane.normal,
            );
            let mids: Vec<Vertex> = (0..count)
                .map(|i| verts[i].interpolate(&verts[(i + 1) % count], 0.5))
                .collect();
            for i in 0..count {
                let prev = (i + count - 1) % count;
                polygons.push(Polygon::new(
                    vec![verts[i], mids[i], center, mids[prev]],
                    polygon.shared.clone(),
                ));
            }
        }
        Self::from_polygons(polygons)
    }

    /// Axis-aligned bounds of every vertex.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(
            self.polygons
                .iter()
                .flat_map(|polygon| polygon.vertices.iter().map(|vertex| vertex.position)),
        )
    }

    /// Attach one shared tag to every polygon, replacing the existing tags.
    pub fn with_shared<T: Clone>(self, shared: T) -> Solid<T> {
        Solid {
            polygons: self
                .polygons
                .into_iter()
                .map(|polygon| {
                    let tag = shared.clone();
                    polygon.map_shared(move |_| tag)
                })
                .collect(),
        }
    }
}

impl<S: Clone> std::ops::Add for &Solid<S> {
    type Output = Solid<S>;

    fn add(self, other: Self) -> Solid<S> {
        self.union(other)
    }
}

impl<S: Clone> std::ops::Sub for &Solid<S> {
    type Output = Solid<S>;

    fn sub(self, other: Self) -> Solid<S> {
        self.subtract(other)
    }
}

impl<S: Clone> std::ops::Mul for &Solid<S> {
    type Output = Solid<S>;

    fn mul(self, other: Self) -> Solid<S> {
        self.intersect(other)
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Solidframe Team

//! Oriented splitting plane and the polygon splitter

use super::{Polygon, Vertex};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Tolerance used by [`Plane::split_polygon`] to decide whether a point lies
/// on the plane. Tuned for unit-scale inputs; meshes at radically different
/// scales should be normalized before Boolean operations.
pub const EPSILON: f64 = 1e-5;

const COPLANAR: u8 = 0;
const FRONT: u8 = 1;
const BACK: u8 = 2;
const SPANNING: u8 = 3;

/// Oriented plane `normal · x = w`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vector3<f64>,
    pub w: f64,
}

/// Output lists of one splitting pass.
///
/// The splitter appends whole polygons or fragments to these four lists;
/// callers decide how to fold them (the BSP `build` keeps both coplanar lists
/// at the node, clipping folds them into front/back).
#[derive(Debug)]
pub struct SplitLists<S> {
    pub coplanar_front: Vec<Polygon<S>>,
    pub coplanar_back: Vec<Polygon<S>>,
    pub front: Vec<Polygon<S>>,
    pub back: Vec<Polygon<S>>,
}

impl<S> Default for SplitLists<S> {
    fn default() -> Self {
        Self {
            coplanar_front: Vec::new(),
            coplanar_back: Vec::new(),
            front: Vec::new(),
            back: Vec::new(),
        }
    }
}

impl Plane {
    pub fn new(normal: Vector3<f64>, w: f64) -> Self {
        Self { normal, w }
    }

    /// Plane through three points, with `normal = unit((b-a) × (c-a))`.
    ///
    /// Collinear points yield a degenerate (NaN) plane; callers constructing
    /// polygons from arbitrary input should go through `Polygon::try_new`.
    pub fn from_points(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Self {
        let normal = (b - a).cross(&(c - a)).normalize();
        Self {
            normal,
            w: normal.dot(&a.coords),
        }
    }

    /// Signed distance of `point` from the plane (positive on the front side).
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        self.normal.dot(&point.coords) - self.w
    }

    /// Reverse orientation while keeping the point set identical.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Split `polygon` by this plane if needed and append the polygon or its
    /// fragments to the appropriate lists in `out`.
    ///
    /// Coplanar polygons go to `coplanar_front` or `coplanar_back` depending
    /// on their orientation relative to this plane; polygons entirely on one
    /// side go to `front` or `back` unchanged; spanning polygons are cut along
    /// the plane with interpolated crossing vertices, and a fragment is only
    /// emitted when it still has at least three vertices. The `shared` tag is
    /// cloned onto every fragment.
    pub fn split_polygon<S: Clone>(&self, polygon: &Polygon<S>, out: &mut SplitLists<S>) {
        // Classify each vertex as well as the entire polygon into one of the
        // four classes; the aggregate is the bitwise OR of the vertex codes.
        let mut polygon_type = COPLANAR;
        let mut types = Vec::with_capacity(polygon.vertices.len());
        for vertex in &polygon.vertices {
            let t = self.signed_distance(&vertex.position);
            let vertex_type = if t < -EPSILON {
                BACK
            } else if t > EPSILON {
                FRONT
            } else {
                COPLANAR
            };
            polygon_type |= vertex_type;
            types.push(vertex_type);
        }

        match polygon_type {
            COPLANAR => {
                // Orientation tie-break: a non-positive dot goes to the back
                // list. Callers relying on a side must orient unambiguously.
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    out.coplanar_front.push(polygon.clone());
                } else {
                    out.coplanar_back.push(polygon.clone());
                }
            }
            FRONT => out.front.push(polygon.clone()),
            BACK => out.back.push(polygon.clone()),
            _ => {
                let mut front_verts: Vec<Vertex> = Vec::new();
                let mut back_verts: Vec<Vertex> = Vec::new();
                let count = polygon.vertices.len();
                for i in 0..count {
                    let j = (i + 1) % count;
                    let ti = types[i];
                    let tj = types[j];
                    let vi = &polygon.vertices[i];
                    let vj = &polygon.vertices[j];
                    if ti != BACK {
                        front_verts.push(*vi);
                    }
                    if ti != FRONT {
                        back_verts.push(*vi);
                    }
                    if (ti | tj) == SPANNING {
                        // One endpoint strictly front, one strictly back, so
                        // the denominator cannot vanish.
                        let t = (self.w - self.normal.dot(&vi.position.coords))
                            / self.normal.dot(&(vj.position - vi.position));
                        let v = vi.interpolate(vj, t);
                        front_verts.push(v);
                        back_verts.push(v);
                    }
                }
                if front_verts.len() >= 3 {
                    out.front
                        .push(Polygon::new(front_verts, polygon.shared.clone()));
                }
                if back_verts.len() >= 3 {
                    out.back
                        .push(Polygon::new(back_verts, polygon.shared.clone()));
                }
            }
        }
    }
}

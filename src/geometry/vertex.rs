// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Solidframe Team

//! Polygon vertex with position and normal

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Vertex with position and normal.
///
/// The normal may be the zero vector when a generator has no meaningful
/// per-vertex normal; the kernel only carries it through splits and flips.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point3<f64>,
    pub normal: Vector3<f64>,
}

impl Vertex {
    pub fn new(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self { position, normal }
    }

    /// Vertex at `position` with a zero normal.
    pub fn from_position(position: Point3<f64>) -> Self {
        Self::new(position, Vector3::zeros())
    }

    /// Invert orientation-specific data. Called when a polygon is flipped.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// New vertex between `self` and `other`, both fields blended linearly.
    ///
    /// Exact at the endpoints: `interpolate(other, 0.0)` returns `self` and
    /// `interpolate(other, 1.0)` returns `other`.
    pub fn interpolate(&self, other: &Vertex, t: f64) -> Vertex {
        Vertex {
            position: Point3::from(self.position.coords.lerp(&other.position.coords, t)),
            normal: self.normal.lerp(&other.normal, t),
        }
    }
}

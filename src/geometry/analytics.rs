// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Solidframe Team

//! Geometry analytics and statistics

use super::{BoundingBox, Solid};
use serde::{Deserialize, Serialize};

/// Aggregate measurements of a solid's boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolidStats {
    /// Enclosed volume in cubic units
    pub volume: f64,
    /// Total surface area in square units
    pub surface_area: f64,
    /// Centroid of the deduplicated vertex cloud [x, y, z]
    pub centroid: [f64; 3],
    /// Axis-aligned bounds of every vertex
    pub bbox: BoundingBox,
    /// Number of unique vertex positions
    pub vertex_count: usize,
    /// Number of boundary polygons
    pub polygon_count: usize,
}

/// Analyze a solid's boundary and compute statistics.
///
/// Volume and area fan-triangulate each convex polygon; the volume is the
/// signed sum of origin tetrahedra, which is exact for a closed, outward
/// oriented boundary.
pub fn analyze<S: Clone>(solid: &Solid<S>) -> SolidStats {
    let (vertices, faces, _) = solid.to_vertices_and_polygons();

    let mut volume = 0.0;
    let mut surface_area = 0.0;
    for face in &faces {
        for i in 1..face.len().saturating_sub(1) {
            let v0 = nalgebra::Vector3::from(vertices[face[0]]);
            let v1 = nalgebra::Vector3::from(vertices[face[i]]);
            let v2 = nalgebra::Vector3::from(vertices[face[i + 1]]);

            volume += v0.dot(&v1.cross(&v2)) / 6.0;
            surface_area += (v1 - v0).cross(&(v2 - v0)).norm() / 2.0;
        }
    }

    let mut centroid = [0.0; 3];
    for vertex in &vertices {
        centroid[0] += vertex[0];
        centroid[1] += vertex[1];
        centroid[2] += vertex[2];
    }
    if !vertices.is_empty() {
        let count = vertices.len() as f64;
        centroid[0] /= count;
        centroid[1] /= count;
        centroid[2] /= count;
    }

    SolidStats {
        volume: volume.abs(),
        surface_area,
        centroid,
        bbox: solid.bounding_box(),
        vertex_count: vertices.len(),
        polygon_count: faces.len(),
    }
}

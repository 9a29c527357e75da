// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Solidframe Team

//! Geometric primitive generators
//!
//! Each generator emits convex polygons with consistent outward winding,
//! ready for Boolean combination. Parameters are validated here, at the
//! collaborator boundary; the kernel itself never checks its inputs.

use super::{Polygon, Solid, Vertex};
use crate::error::CsgError;
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

const DEFAULT_SLICES: u32 = 16;
const DEFAULT_STACKS: u32 = 8;

/// Geometric primitives
#[derive(Debug, Clone)]
pub enum Primitive {
    Cube {
        center: Point3<f64>,
        radius: Vector3<f64>,
    },
    Sphere {
        center: Point3<f64>,
        radius: f64,
        slices: u32,
        stacks: u32,
    },
    Cylinder {
        start: Point3<f64>,
        end: Point3<f64>,
        radius: f64,
        slices: u32,
    },
    Cone {
        start: Point3<f64>,
        end: Point3<f64>,
        radius: f64,
        slices: u32,
    },
}

impl Primitive {
    /// Axis-aligned cuboid with per-axis half-extents.
    pub fn cube(center: Point3<f64>, radius: Vector3<f64>) -> Self {
        Self::Cube { center, radius }
    }

    /// Latitude/longitude sphere. Passing 0 for `slices` or `stacks` selects
    /// the defaults (16 and 8).
    pub fn sphere(center: Point3<f64>, radius: f64, slices: u32, stacks: u32) -> Self {
        Self::Sphere {
            center,
            radius,
            slices: if slices > 0 { slices } else { DEFAULT_SLICES },
            stacks: if stacks > 0 { stacks } else { DEFAULT_STACKS },
        }
    }

    /// Cylinder between `start` and `end`. Passing 0 for `slices` selects
    /// the default (16).
    pub fn cylinder(start: Point3<f64>, end: Point3<f64>, radius: f64, slices: u32) -> Self {
        Self::Cylinder {
            start,
            end,
            radius,
            slices: if slices > 0 { slices } else { DEFAULT_SLICES },
        }
    }

    /// Cone with its base disc at `start` and its tip at `end`. Passing 0
    /// for `slices` selects the default (16).
    pub fn cone(start: Point3<f64>, end: Point3<f64>, radius: f64, slices: u32) -> Self {
        Self::Cone {
            start,
            end,
            radius,
            slices: if slices > 0 { slices } else { DEFAULT_SLICES },
        }
    }

    /// Validate parameters and tessellate into a solid.
    pub fn to_solid(&self) -> Result<Solid, CsgError> {
        match *self {
            Self::Cube { center, radius } => {
                for half_extent in radius.iter() {
                    if *half_extent <= 0.0 {
                        return Err(CsgError::InvalidRadius {
                            radius: *half_extent,
                        });
                    }
                }
                Ok(generate_cube(center, radius))
            }
            Self::Sphere {
                center,
                radius,
                slices,
                stacks,
            } => {
                check_radius(radius)?;
                check_tessellation("slices", 3, slices)?;
                check_tessellation("stacks", 2, stacks)?;
                Ok(generate_sphere(center, radius, slices, stacks))
            }
            Self::Cylinder {
                start,
                end,
                radius,
                slices,
            } => {
                check_radius(radius)?;
                check_tessellation("slices", 3, slices)?;
                let frame = AxisFrame::between(start, end)?;
                Ok(generate_cylinder(start, end, radius, slices, &frame))
            }
            Self::Cone {
                start,
                end,
                radius,
                slices,
            } => {
                check_radius(radius)?;
                check_tessellation("slices", 3, slices)?;
                let frame = AxisFrame::between(start, end)?;
                Ok(generate_cone(start, end, radius, slices, &frame))
            }
        }
    }
}

fn check_radius(radius: f64) -> Result<(), CsgError> {
    if radius <= 0.0 {
        return Err(CsgError::InvalidRadius { radius });
    }
    Ok(())
}

fn check_tessellation(param: &'static str, min: u32, value: u32) -> Result<(), CsgError> {
    if value < min {
        return Err(CsgError::InvalidTessellation { param, min, value });
    }
    Ok(())
}

/// Right-handed frame with `z` along a primitive's axis.
struct AxisFrame {
    x: Vector3<f64>,
    y: Vector3<f64>,
    z: Vector3<f64>,
}

impl AxisFrame {
    fn between(start: Point3<f64>, end: Point3<f64>) -> Result<Self, CsgError> {
        let z = (end - start)
            .try_normalize(1.0e-12)
            .ok_or(CsgError::ZeroLengthAxis)?;
        // Seed axis picked off the dominant component to stay well
        // conditioned.
        let is_y = z.y.abs() > 0.5;
        let seed = Vector3::new(
            if is_y { 1.0 } else { 0.0 },
            if is_y { 0.0 } else { 1.0 },
            0.0,
        );
        let x = seed.cross(&z).normalize();
        let y = x.cross(&z).normalize();
        Ok(Self { x, y, z })
    }

    /// Unit vector pointing outward at `angle` around the axis.
    fn radial(&self, angle: f64) -> Vector3<f64> {
        self.x * angle.cos() + self.y * angle.sin()
    }
}

// Corner index bit i selects the positive or negative half-extent on axis i;
// each face lists its corners in outward CCW order.
const CUBE_FACES: [([usize; 4], [f64; 3]); 6] = [
    ([0, 4, 6, 2], [-1.0, 0.0, 0.0]),
    ([1, 3, 7, 5], [1.0, 0.0, 0.0]),
    ([0, 1, 5, 4], [0.0, -1.0, 0.0]),
    ([2, 6, 7, 3], [0.0, 1.0, 0.0]),
    ([0, 2, 3, 1], [0.0, 0.0, -1.0]),
    ([4, 5, 7, 6], [0.0, 0.0, 1.0]),
];

fn generate_cube(center: Point3<f64>, radius: Vector3<f64>) -> Solid {
    let mut polygons = Vec::with_capacity(6);
    for (corners, normal) in CUBE_FACES {
        let normal = Vector3::from(normal);
        let vertices = corners
            .iter()
            .map(|&corner| {
                let position = Point3::new(
                    center.x + radius.x * (if corner & 1 != 0 { 1.0 } else { -1.0 }),
                    center.y + radius.y * (if corner & 2 != 0 { 1.0 } else { -1.0 }),
                    center.z + radius.z * (if corner & 4 != 0 { 1.0 } else { -1.0 }),
                );
                Vertex::new(position, normal)
            })
            .collect();
        polygons.push(Polygon::new(vertices, ()));
    }
    Solid::from_polygons(polygons)
}

fn generate_sphere(center: Point3<f64>, radius: f64, slices: u32, stacks: u32) -> Solid {
    let d_theta = 2.0 * PI / f64::from(slices);
    let d_phi = PI / f64::from(stacks);

    let vertex = |theta: f64, phi: f64| {
        let direction = Vector3::new(
            theta.cos() * phi.sin(),
            phi.cos(),
            theta.sin() * phi.sin(),
        );
        Vertex::new(center + direction * radius, direction)
    };

    let mut polygons = Vec::with_capacity((slices * stacks) as usize);
    for i in 0..slices {
        for j in 0..stacks {
            let t0 = f64::from(i) * d_theta;
            let t1 = f64::from(i + 1) * d_theta;
            let p0 = f64::from(j) * d_phi;
            let p1 = f64::from(j + 1) * d_phi;

            // Triangles at the poles, quads in between.
            let mut vertices = Vec::with_capacity(4);
            vertices.push(vertex(t0, p0));
            if j > 0 {
                vertices.push(vertex(t1, p0));
            }
            if j < stacks - 1 {
                vertices.push(vertex(t1, p1));
            }
            vertices.push(vertex(t0, p1));
            polygons.push(Polygon::new(vertices, ()));
        }
    }
    Solid::from_polygons(polygons)
}

fn generate_cylinder(
    start: Point3<f64>,
    end: Point3<f64>,
    radius: f64,
    slices: u32,
    frame: &AxisFrame,
) -> Solid {
    let ray = end - start;
    let bottom_center = Vertex::new(start, -frame.z);
    let top_center = Vertex::new(end, frame.z);

    // `stack` selects the bottom or top ring; `normal_blend` fades the
    // normal between radial (0) and axial (±1) for the cap rims.
    let point = |stack: f64, angle: f64, normal_blend: f64| {
        let out = frame.radial(angle);
        let position = start + ray * stack + out * radius;
        let normal = out * (1.0 - normal_blend.abs()) + frame.z * normal_blend;
        Vertex::new(position, normal)
    };

    let dt = 2.0 * PI / f64::from(slices);
    let mut polygons = Vec::with_capacity(3 * slices as usize);
    for i in 0..slices {
        let t0 = f64::from(i) * dt;
        let t1 = f64::from(i + 1) * dt;
        polygons.push(Polygon::new(
            vec![bottom_center, point(0.0, t0, -1.0), point(0.0, t1, -1.0)],
            (),
        ));
        polygons.push(Polygon::new(
            vec![
                point(0.0, t1, 0.0),
                point(0.0, t0, 0.0),
                point(1.0, t0, 0.0),
                point(1.0, t1, 0.0),
            ],
            (),
        ));
        polygons.push(Polygon::new(
            vec![top_center, point(1.0, t1, 1.0), point(1.0, t0, 1.0)],
            (),
        ));
    }
    Solid::from_polygons(polygons)
}

fn generate_cone(
    start: Point3<f64>,
    end: Point3<f64>,
    radius: f64,
    slices: u32,
    frame: &AxisFrame,
) -> Solid {
    let ray = end - start;
    let base_normal = -frame.z;
    let base_center = Vertex::new(start, base_normal);

    let taper_angle = radius.atan2(ray.norm());
    let sin_taper = taper_angle.sin();
    let cos_taper = taper_angle.cos();

    // Rim position plus the side normal tilted by the taper angle.
    let rim = |angle: f64| {
        let out = frame.radial(angle);
        let position = start + out * radius;
        let normal = out * cos_taper + frame.z * sin_taper;
        (position, normal)
    };

    let dt = 2.0 * PI / f64::from(slices);
    let mut polygons = Vec::with_capacity(2 * slices as usize);
    for i in 0..slices {
        let t0 = f64::from(i) * dt;
        let t1 = f64::from(i + 1) * dt;
        let (p0, n0) = rim(t0);
        let (p1, n1) = rim(t1);

        polygons.push(Polygon::new(
            vec![
                base_center,
                Vertex::new(p0, base_normal),
                Vertex::new(p1, base_normal),
            ],
            (),
        ));
        // The tip vertex takes the average of the two rim normals.
        polygons.push(Polygon::new(
            vec![
                Vertex::new(p0, n0),
                Vertex::new(end, (n0 + n1) * 0.5),
                Vertex::new(p1, n1),
            ],
            (),
        ));
    }
    Solid::from_polygons(polygons)
}

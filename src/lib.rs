// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Solidframe Team

//! Solidframe CSG Kernel
//!
//! A constructive solid geometry kernel that combines closed polyhedral
//! solids with Boolean set operations over BSP trees. Overlapping coplanar
//! faces in both operands are handled correctly.
//!
//! ```
//! use nalgebra::{Point3, Vector3};
//! use solidframe::Primitive;
//!
//! let cube = Primitive::cube(Point3::origin(), Vector3::repeat(1.0))
//!     .to_solid()
//!     .unwrap();
//! let sphere = Primitive::sphere(Point3::origin(), 1.3, 16, 8)
//!     .to_solid()
//!     .unwrap();
//! let carved = cube.subtract(&sphere);
//! assert!(!carved.is_empty());
//! ```

pub mod error;
pub mod geometry;
pub mod io;

pub use error::CsgError;
pub use geometry::{
    analyze, BSPNode, BoundingBox, Plane, Polygon, Primitive, Solid, SolidStats, Vertex, EPSILON,
};
pub use io::{export_vtk, write_vtk};

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Solidframe Team

//! Geometry module - CSG kernel types and operations

mod analytics;
mod bbox;
mod bsp;
mod plane;
mod polygon;
mod primitives;
mod solid;
mod vertex;

pub use analytics::{analyze, SolidStats};
pub use bbox::BoundingBox;
pub use bsp::BSPNode;
pub use plane::{Plane, SplitLists, EPSILON};
pub use polygon::Polygon;
pub use primitives::Primitive;
pub use solid::Solid;
pub use vertex::Vertex;

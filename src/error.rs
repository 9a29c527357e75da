// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Solidframe Team

//! Error types for the kernel and the primitive generators

use thiserror::Error;

/// Errors surfaced at the public boundary of the kernel.
///
/// The Boolean core itself does not check arithmetic; these variants cover
/// polygon construction and primitive-generator parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CsgError {
    /// Fewer than three vertices supplied for a polygon
    #[error("polygon needs at least 3 vertices, got {count}")]
    DegeneratePolygon { count: usize },

    /// The first three vertices of a polygon do not span a plane
    #[error("first three polygon vertices are collinear, no supporting plane")]
    CollinearVertices,

    /// Non-positive radius passed to a primitive generator
    #[error("radius must be positive, got {radius}")]
    InvalidRadius { radius: f64 },

    /// Tessellation parameter below the minimum that produces a closed solid
    #[error("{param} must be at least {min}, got {value}")]
    InvalidTessellation {
        param: &'static str,
        min: u32,
        value: u32,
    },

    /// Zero-length axis for a rotation, cylinder, or cone
    #[error("axis has zero length")]
    ZeroLengthAxis,
}

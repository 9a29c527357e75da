// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Solidframe Team

//! Legacy ASCII VTK (POLYDATA) exporter

use crate::geometry::Solid;
use anyhow::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a solid as a legacy ASCII VTK POLYDATA dataset.
///
/// Vertices are deduplicated by exact position; faces keep each polygon's
/// winding. The layout is the version 3.0 legacy format: header, `POINTS`,
/// then `POLYGONS` with per-face index counts.
pub fn write_vtk<S: Clone, W: Write>(solid: &Solid<S>, writer: &mut W, title: &str) -> Result<()> {
    writeln!(writer, "# vtk DataFile Version 3.0")?;
    writeln!(writer, "{title}")?;
    writeln!(writer, "ASCII")?;
    writeln!(writer, "DATASET POLYDATA")?;

    let (vertices, faces, index_count) = solid.to_vertices_and_polygons();

    writeln!(writer, "POINTS {} float", vertices.len())?;
    for [x, y, z] in &vertices {
        writeln!(
            writer,
            "{} {} {}",
            format_coord(*x),
            format_coord(*y),
            format_coord(*z)
        )?;
    }

    writeln!(writer, "POLYGONS {} {}", faces.len(), faces.len() + index_count)?;
    for face in &faces {
        write!(writer, "{}", face.len())?;
        for index in face {
            write!(writer, " {index}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Text form of one coordinate. Whole-valued floats keep a trailing `.0`
/// (`1.0`, not `1`), matching the reference writer's float formatting.
fn format_coord(value: f64) -> String {
    if value == value.trunc() {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Save a solid to a VTK file at `path`.
pub fn export_vtk<S: Clone>(solid: &Solid<S>, path: impl AsRef<Path>, title: &str) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_vtk(solid, &mut writer, title)?;
    writer.flush()?;
    Ok(())
}

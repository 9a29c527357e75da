// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Solidframe Team

//! I/O module - mesh export

mod export_vtk;

pub use export_vtk::{export_vtk, write_vtk};

//! Mesh I/O for AFLR3 UGRID grids.
//!
//! This module provides trait-based readers and writers over arbitrary
//! streams, the filename-driven [`FormatVariant`](variant::FormatVariant)
//! resolver, and the Nastran bulk-data text exporter.

pub mod bdf;
pub mod fields;
pub mod path;
pub mod ugrid;
pub mod variant;

use crate::data::mesh::Mesh;
use crate::mesh_error::UgridError;
use std::io::{Read, Write};

/// Trait for mesh readers that produce a [`Mesh`].
pub trait MeshReader {
    /// Parse a mesh from a reader.
    fn read<R: Read>(&self, reader: R) -> Result<Mesh, UgridError>;
}

/// Trait for mesh writers that serialize a [`Mesh`].
pub trait MeshWriter {
    /// Write a mesh to a writer.
    fn write<W: Write>(&self, writer: W, mesh: &Mesh) -> Result<(), UgridError>;
}

//! UgridError: Unified error type for ugrid-sieve public APIs
//!
//! Every read, write, validation, and export operation returns this error.
//! None of the variants are retried internally; each one aborts the call that
//! produced it.

use crate::topology::cell_type::CellType;
use thiserror::Error;

/// Unified error type for UGRID operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UgridError {
    /// The filename does not carry a usable `<name>.<tag>.ugrid` variant tag.
    #[error("invalid UGRID format tag in {filename:?}: {reason}")]
    InvalidFormatTag { filename: String, reason: String },
    /// A block needs more bytes than the stream has left.
    #[error("truncated UGRID file: block `{block}` needs {expected} bytes, only {available} available")]
    Truncated {
        block: &'static str,
        expected: u64,
        available: u64,
    },
    /// A header count is negative or describes a block too large to address.
    #[error("invalid UGRID header: {field}={value}")]
    HeaderCount { field: &'static str, value: i64 },
    /// A block is too large to be described by a 32-bit header count.
    #[error("cannot write {count} entries for `{block}`: exceeds the 32-bit header limit")]
    CountOverflow { block: &'static str, count: usize },
    /// Node ids used by the elements differ from `1..=node_count`.
    #[error(
        "hanging nodes: node_count={node_count} used={used} unused={unused:?} out_of_range={out_of_range:?}"
    )]
    HangingNodes {
        node_count: usize,
        used: usize,
        /// Ids in `1..=node_count` that no element references.
        unused: Vec<i32>,
        /// Ids referenced by elements but outside `1..=node_count`.
        out_of_range: Vec<i32>,
    },
    /// An element repeats one of its vertex ids.
    #[error("degenerate {cell_type:?} #{index}: vertices {vertices:?} are not distinct")]
    DegenerateElement {
        cell_type: CellType,
        index: usize,
        vertices: Vec<i32>,
    },
    /// An element references a node id below 1.
    #[error("{cell_type:?} block references node id {min_id} (ids are 1-based)")]
    NodeIdRange { cell_type: CellType, min_id: i32 },
    /// The mesh has none of the element classes the caller requires.
    #[error("empty mesh: {0}")]
    EmptyMesh(String),
    /// The surface property ids are not parallel to the surface elements.
    #[error("surface id mismatch: {tris} tris + {quads} quads but {surface_ids} surface ids")]
    SurfaceIdMismatch {
        tris: usize,
        quads: usize,
        surface_ids: usize,
    },
    /// The solid property id would not fit in an `i32`.
    #[error("cannot assign a solid property id above surface id {max_surface_id}")]
    PropertyIdOverflow { max_surface_id: i32 },
    /// No input path was supplied and the file dialog returned nothing.
    #[error("no UGRID file was selected")]
    NoInputPath,
    /// An option value outside the supported set.
    #[error("invalid option: {0}")]
    InvalidOption(String),
    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for UgridError {
    fn from(err: std::io::Error) -> Self {
        UgridError::Io(err.to_string())
    }
}

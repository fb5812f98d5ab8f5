#![cfg_attr(docsrs, feature(doc_cfg))]
//! # ugrid-sieve
//!
//! ugrid-sieve reads and writes AFLR3 binary UGRID meshes, checks them for
//! hanging nodes and degenerate elements, extracts the boundary skin of the
//! volume cells, and exports the mesh as Nastran bulk data.
//!
//! ## Features
//! - Filename-driven format variants (`model.b8.ugrid`, `model.lb4.ugrid`, ...)
//!   covering both byte orders and both coordinate widths
//! - Bulk block I/O: one read or write call per element block
//! - Hanging-node and vertex-uniqueness validation with a non-fatal report mode
//! - Solid skinning through fixed per-cell face templates
//! - Fixed-column Nastran export (`GRID`/`GRID*`, `CTRIA3` ... `CHEXA`)
//!
//! ## Usage
//! ```no_run
//! use ugrid_sieve::prelude::*;
//!
//! # fn main() -> Result<(), UgridError> {
//! let mesh = read_ugrid("wing.b8.ugrid", UgridReadOptions::default())?;
//! let skin = skin_solids(&mesh)?;
//! println!("{} boundary faces", skin.len());
//! // convert to little endian single precision
//! write_ugrid("wing.lb4.ugrid", &mesh, UgridWriteOptions::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//! Progress and diagnostics go through the [`log`] facade; install any
//! logger backend to see them.

pub mod algs;
pub mod data;
pub mod debug_invariants;
pub mod io;
pub mod mesh_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::skin::{SkinnedSurface, skin_face_counts, skin_solids};
    pub use crate::data::mesh::{Mesh, MeshCounts, NodeId};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::io::bdf::{BdfWriteOptions, BdfWriter, FieldWidth, write_bdf};
    pub use crate::io::path::{FileDialog, read_ugrid_or_select};
    pub use crate::io::ugrid::{
        UgridReadOptions, UgridReader, UgridWriteOptions, UgridWriter, read_ugrid, write_ugrid,
    };
    pub use crate::io::variant::{ByteOrder, FloatWidth, FormatVariant};
    pub use crate::io::{MeshReader, MeshWriter};
    pub use crate::mesh_error::UgridError;
    pub use crate::topology::cell_type::CellType;
    pub use crate::topology::validation::{
        HangingNodeReport, check_hanging_nodes, check_node_id_range,
    };
}

//! Top-level module for element topology.
//!
//! This module provides the per-type element metadata (vertex counts, face
//! templates, card names) and the mesh consistency checks built on it.

pub mod cell_type;
pub mod validation;

pub use cell_type::{CellType, Face};
pub use validation::{
    HangingNodeReport, check_element_uniqueness, check_hanging_nodes, check_node_id_range,
};

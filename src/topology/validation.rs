//! Mesh consistency checks.
//!
//! - [`check_node_id_range`]: every element references node ids `>= 1`.
//! - [`check_hanging_nodes`]: the node ids used by elements are exactly
//!   `1..=node_count`, followed by [`check_element_uniqueness`].
//! - [`check_element_uniqueness`]: no element repeats a vertex id. Degenerate
//!   quads are only reported; every other cell type is a hard error.

use crate::data::mesh::{Mesh, NodeId};
use crate::mesh_error::UgridError;
use crate::topology::cell_type::CellType;
use itertools::Itertools;
use std::collections::BTreeSet;

/// Outcome of a hanging-node check that did not abort.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HangingNodeReport {
    /// Declared node count.
    pub node_count: usize,
    /// Distinct node ids referenced by the checked elements.
    pub used: usize,
    /// Ids in `1..=node_count` that no element references, ascending.
    pub unused: Vec<NodeId>,
    /// Referenced ids above `node_count`, ascending.
    pub out_of_range: Vec<NodeId>,
    /// Indices of quads whose vertex ids are not distinct.
    pub degenerate_quads: Vec<usize>,
}

impl HangingNodeReport {
    /// `true` when the used ids are exactly `1..=node_count`.
    pub fn is_clean(&self) -> bool {
        self.unused.is_empty() && self.out_of_range.is_empty()
    }

    /// Symmetric difference between expected and used ids, ascending.
    pub fn diff(&self) -> Vec<NodeId> {
        self.unused
            .iter()
            .merge(self.out_of_range.iter())
            .copied()
            .collect()
    }
}

/// Fail if any element references a node id below 1.
///
/// There is no upper-bound check here; ids above the node count are found by
/// [`check_hanging_nodes`].
pub fn check_node_id_range(mesh: &Mesh) -> Result<(), UgridError> {
    for cell_type in CellType::SURFACE.into_iter().chain(CellType::VOLUME) {
        if let Some(&min_id) = mesh.connectivity(cell_type).iter().min() {
            if min_id < 1 {
                return Err(UgridError::NodeIdRange { cell_type, min_id });
            }
        }
    }
    Ok(())
}

/// Verify that the elements use every node exactly in `1..=node_count`.
///
/// Surface blocks are always checked; volume blocks only when the mesh was
/// read with solids. With `stop_on_mismatch` a non-empty difference fails
/// with [`UgridError::HangingNodes`]; otherwise it is logged and returned in
/// the report. Vertex uniqueness is checked afterwards in both cases.
pub fn check_hanging_nodes(
    mesh: &Mesh,
    stop_on_mismatch: bool,
) -> Result<HangingNodeReport, UgridError> {
    log::debug!("checking hanging nodes");
    check_node_id_range(mesh)?;

    let active: Vec<CellType> = mesh
        .active_cell_types()
        .filter(|&cell_type| !mesh.connectivity(cell_type).is_empty())
        .collect();
    if active.is_empty() {
        return Err(UgridError::EmptyMesh(
            "there are no element node ids to check".into(),
        ));
    }

    let node_count = mesh.nodes().len();
    let mut used = vec![false; node_count];
    let mut out_of_range = BTreeSet::new();
    for &cell_type in &active {
        for &id in mesh.connectivity(cell_type) {
            // ids are >= 1 after the range check
            let index = (id - 1) as usize;
            match used.get_mut(index) {
                Some(slot) => *slot = true,
                None => {
                    out_of_range.insert(id);
                }
            }
        }
    }

    let unused: Vec<NodeId> = used
        .iter()
        .positions(|&is_used| !is_used)
        .map(|index| index as NodeId + 1)
        .collect();
    let mut report = HangingNodeReport {
        node_count,
        used: node_count - unused.len() + out_of_range.len(),
        unused,
        out_of_range: out_of_range.into_iter().collect(),
        degenerate_quads: Vec::new(),
    };

    if !report.is_clean() {
        if stop_on_mismatch {
            return Err(UgridError::HangingNodes {
                node_count: report.node_count,
                used: report.used,
                unused: report.unused,
                out_of_range: report.out_of_range,
            });
        }
        log::warn!(
            "nnodes={} used={} expected-actual={:?} (n={}) actual-expected={:?} (n={})",
            report.node_count,
            report.used,
            report.unused,
            report.unused.len(),
            report.out_of_range,
            report.out_of_range.len(),
        );
    }

    report.degenerate_quads = check_element_uniqueness(mesh)?;
    Ok(report)
}

/// Check that each element's vertex ids are pairwise distinct.
///
/// Returns the indices of degenerate quads, which are logged but tolerated.
/// A repeated vertex in any other cell type fails with
/// [`UgridError::DegenerateElement`].
pub fn check_element_uniqueness(mesh: &Mesh) -> Result<Vec<usize>, UgridError> {
    let mut degenerate_quads = Vec::new();
    for cell_type in mesh.active_cell_types() {
        let n = cell_type.vertex_count();
        for (index, element) in mesh.connectivity(cell_type).chunks_exact(n).enumerate() {
            if element.iter().all_unique() {
                continue;
            }
            if cell_type == CellType::Quadrilateral {
                log::warn!("degenerate quad #{index}: {element:?}");
                degenerate_quads.push(index);
            } else {
                return Err(UgridError::DegenerateElement {
                    cell_type,
                    index,
                    vertices: element.to_vec(),
                });
            }
        }
    }
    Ok(degenerate_quads)
}

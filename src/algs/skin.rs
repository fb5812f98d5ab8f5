//! Solid skinning: boundary triangles and quads from volume connectivity.
//!
//! Every volume cell contributes all faces of its [`CellType::faces`]
//! template. Faces shared by two neighbouring cells are emitted once per
//! owning cell; there is no merge step. Pre-existing surface elements of the
//! mesh are ignored.
//!
//! Output order is face-major per cell type: the first template face of every
//! tet, then the second face of every tet, and so on. Triangles come from
//! tets, pyramids, then prisms; quads from hexes, pyramids, then prisms.

use crate::data::mesh::{Mesh, NodeId};
use crate::mesh_error::UgridError;
use crate::topology::cell_type::{CellType, Face};
use serde::{Deserialize, Serialize};

const SKIN_ORDER: [CellType; 4] = [
    CellType::Tetrahedron,
    CellType::Hexahedron,
    CellType::Pyramid,
    CellType::Prism,
];

/// Boundary faces derived from the volume cells of a mesh.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinnedSurface {
    pub tris: Vec<[NodeId; 3]>,
    pub quads: Vec<[NodeId; 4]>,
}

impl SkinnedSurface {
    pub fn len(&self) -> usize {
        self.tris.len() + self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tris.is_empty() && self.quads.is_empty()
    }
}

/// Exact `(tris, quads)` totals [`skin_solids`] will emit for `mesh`.
pub fn skin_face_counts(mesh: &Mesh) -> (usize, usize) {
    let counts = mesh.counts();
    CellType::VOLUME.iter().fold((0, 0), |(ntris, nquads), &cell_type| {
        let (t, q) = cell_type.face_counts();
        let n = counts.of(cell_type);
        (ntris + t * n, nquads + q * n)
    })
}

/// Find the triangles and quads on the surface of the solid cells.
///
/// Fails with [`UgridError::EmptyMesh`] when the mesh was read without its
/// volume blocks.
pub fn skin_solids(mesh: &Mesh) -> Result<SkinnedSurface, UgridError> {
    if !mesh.solids_read() {
        return Err(UgridError::EmptyMesh(
            "cannot skin a mesh read without solids".into(),
        ));
    }
    let (ntris, nquads) = skin_face_counts(mesh);
    log::info!("ntris={ntris} nquads={nquads}");

    let mut tris = Vec::with_capacity(ntris);
    let mut quads = Vec::with_capacity(nquads);
    for cell_type in SKIN_ORDER {
        let n = cell_type.vertex_count();
        let cells = mesh.connectivity(cell_type);
        for &face in cell_type.faces() {
            match face {
                Face::Tri(local) => tris.extend(
                    cells
                        .chunks_exact(n)
                        .map(|cell| local.map(|i| cell[i])),
                ),
                Face::Quad(local) => quads.extend(
                    cells
                        .chunks_exact(n)
                        .map(|cell| local.map(|i| cell[i])),
                ),
            }
        }
    }
    debug_assert_eq!((tris.len(), quads.len()), (ntris, nquads));
    Ok(SkinnedSurface { tris, quads })
}

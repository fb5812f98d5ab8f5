//! In-memory UGRID mesh.
//!
//! A [`Mesh`] is an immutable snapshot: node coordinates plus one connectivity
//! block per [`CellType`]. Node ids inside element records are stored exactly
//! as the file encodes them (1-based `i32`), so node `i` in [`Mesh::nodes`]
//! has external id `i + 1`.

use crate::topology::cell_type::CellType;
use serde::{Deserialize, Serialize};

/// 1-based node id as stored in a UGRID file.
pub type NodeId = i32;

/// The seven header integers of a UGRID file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MeshCounts {
    pub nodes: usize,
    pub tris: usize,
    pub quads: usize,
    pub tets: usize,
    pub pyramids: usize,
    pub prisms: usize,
    pub hexas: usize,
}

impl MeshCounts {
    /// Number of records in the block for `cell_type`.
    pub fn of(&self, cell_type: CellType) -> usize {
        match cell_type {
            CellType::Triangle => self.tris,
            CellType::Quadrilateral => self.quads,
            CellType::Tetrahedron => self.tets,
            CellType::Pyramid => self.pyramids,
            CellType::Prism => self.prisms,
            CellType::Hexahedron => self.hexas,
        }
    }

    pub fn surface_elements(&self) -> usize {
        self.tris + self.quads
    }

    pub fn volume_elements(&self) -> usize {
        self.tets + self.pyramids + self.prisms + self.hexas
    }
}

/// Surface and volume mesh read from (or destined for) a UGRID file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    nodes: Vec<[f64; 3]>,
    tris: Vec<[NodeId; 3]>,
    quads: Vec<[NodeId; 4]>,
    surface_ids: Vec<i32>,
    tets: Vec<[NodeId; 4]>,
    pyramids: Vec<[NodeId; 5]>,
    prisms: Vec<[NodeId; 6]>,
    hexas: Vec<[NodeId; 8]>,
    solids_read: bool,
}

impl Default for Mesh {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            tris: Vec::new(),
            quads: Vec::new(),
            surface_ids: Vec::new(),
            tets: Vec::new(),
            pyramids: Vec::new(),
            prisms: Vec::new(),
            hexas: Vec::new(),
            solids_read: true,
        }
    }
}

impl Mesh {
    /// Start building a mesh from raw blocks.
    pub fn builder() -> MeshBuilder {
        MeshBuilder::default()
    }

    pub fn nodes(&self) -> &[[f64; 3]] {
        &self.nodes
    }

    pub fn tris(&self) -> &[[NodeId; 3]] {
        &self.tris
    }

    pub fn quads(&self) -> &[[NodeId; 4]] {
        &self.quads
    }

    /// Property id per surface element, tris first then quads.
    pub fn surface_ids(&self) -> &[i32] {
        &self.surface_ids
    }

    pub fn tets(&self) -> &[[NodeId; 4]] {
        &self.tets
    }

    pub fn pyramids(&self) -> &[[NodeId; 5]] {
        &self.pyramids
    }

    pub fn prisms(&self) -> &[[NodeId; 6]] {
        &self.prisms
    }

    pub fn hexas(&self) -> &[[NodeId; 8]] {
        &self.hexas
    }

    /// `false` when the reader skipped the volume blocks.
    pub fn solids_read(&self) -> bool {
        self.solids_read
    }

    /// Flat connectivity of one block, `vertex_count()` ids per element.
    pub fn connectivity(&self, cell_type: CellType) -> &[NodeId] {
        match cell_type {
            CellType::Triangle => self.tris.as_flattened(),
            CellType::Quadrilateral => self.quads.as_flattened(),
            CellType::Tetrahedron => self.tets.as_flattened(),
            CellType::Pyramid => self.pyramids.as_flattened(),
            CellType::Prism => self.prisms.as_flattened(),
            CellType::Hexahedron => self.hexas.as_flattened(),
        }
    }

    /// Cell types whose blocks take part in consistency checks: surfaces
    /// always, volumes only when they were read.
    pub fn active_cell_types(&self) -> impl Iterator<Item = CellType> + '_ {
        CellType::SURFACE
            .into_iter()
            .chain(CellType::VOLUME.into_iter().filter(|_| self.solids_read))
    }

    /// Header counts describing this mesh.
    pub fn counts(&self) -> MeshCounts {
        MeshCounts {
            nodes: self.nodes.len(),
            tris: self.tris.len(),
            quads: self.quads.len(),
            tets: self.tets.len(),
            pyramids: self.pyramids.len(),
            prisms: self.prisms.len(),
            hexas: self.hexas.len(),
        }
    }

    pub fn num_surface_elements(&self) -> usize {
        self.tris.len() + self.quads.len()
    }

    pub fn num_volume_elements(&self) -> usize {
        self.tets.len() + self.pyramids.len() + self.prisms.len() + self.hexas.len()
    }

    /// Largest surface property id, if any surface ids exist.
    pub fn max_surface_id(&self) -> Option<i32> {
        self.surface_ids.iter().copied().max()
    }
}

/// One-shot constructor for [`Mesh`].
///
/// The builder does not validate; run
/// [`crate::topology::validation`] checks or
/// [`DebugInvariants`](crate::DebugInvariants) on the result.
#[derive(Clone, Debug, Default)]
pub struct MeshBuilder {
    mesh: Mesh,
}

impl MeshBuilder {
    pub fn nodes(mut self, nodes: Vec<[f64; 3]>) -> Self {
        self.mesh.nodes = nodes;
        self
    }

    pub fn tris(mut self, tris: Vec<[NodeId; 3]>) -> Self {
        self.mesh.tris = tris;
        self
    }

    pub fn quads(mut self, quads: Vec<[NodeId; 4]>) -> Self {
        self.mesh.quads = quads;
        self
    }

    pub fn surface_ids(mut self, surface_ids: Vec<i32>) -> Self {
        self.mesh.surface_ids = surface_ids;
        self
    }

    pub fn tets(mut self, tets: Vec<[NodeId; 4]>) -> Self {
        self.mesh.tets = tets;
        self
    }

    pub fn pyramids(mut self, pyramids: Vec<[NodeId; 5]>) -> Self {
        self.mesh.pyramids = pyramids;
        self
    }

    pub fn prisms(mut self, prisms: Vec<[NodeId; 6]>) -> Self {
        self.mesh.prisms = prisms;
        self
    }

    pub fn hexas(mut self, hexas: Vec<[NodeId; 8]>) -> Self {
        self.mesh.hexas = hexas;
        self
    }

    /// Mark whether the volume blocks were read. Defaults to `true`.
    pub fn solids_read(mut self, solids_read: bool) -> Self {
        self.mesh.solids_read = solids_read;
        self
    }

    pub fn build(self) -> Mesh {
        self.mesh
    }
}

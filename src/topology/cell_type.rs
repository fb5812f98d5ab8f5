//! Cell type metadata for UGRID elements.
//!
//! Each [`CellType`] supplies its vertex count, the Nastran card name it is
//! exported as, and (for volume cells) the fixed face template used by
//! skinning. All per-type constants live here.

use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;

/// Element classes stored in a UGRID file.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CellType {
    /// 2D simplex (surface triangle).
    Triangle,
    /// 2D tensor-product cell (surface quad).
    Quadrilateral,
    /// 3D simplex (tet).
    Tetrahedron,
    /// 3D pyramid (quad base, apex last).
    Pyramid,
    /// 3D wedge/prism (two triangles, bottom then top).
    Prism,
    /// 3D tensor-product cell (hex).
    Hexahedron,
}

/// A boundary face of a volume cell, as local vertex indices.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Face {
    Tri([usize; 3]),
    Quad([usize; 4]),
}

const TET_FACES: [Face; 4] = [
    Face::Tri([0, 1, 2]),
    Face::Tri([0, 1, 3]),
    Face::Tri([1, 2, 3]),
    Face::Tri([0, 2, 3]),
];

// bottom, top, left, right, front, back
const HEX_FACES: [Face; 6] = [
    Face::Quad([0, 1, 2, 3]),
    Face::Quad([4, 5, 6, 7]),
    Face::Quad([0, 3, 7, 4]),
    Face::Quad([1, 2, 6, 5]),
    Face::Quad([0, 1, 5, 4]),
    Face::Quad([3, 2, 6, 7]),
];

const PYRAMID_FACES: [Face; 5] = [
    Face::Quad([0, 1, 2, 3]),
    Face::Tri([0, 1, 4]),
    Face::Tri([1, 2, 4]),
    Face::Tri([2, 3, 4]),
    Face::Tri([3, 0, 4]),
];

// Uses the prism's own connectivity: triangles (0,1,2) and (3,4,5) joined by
// three quads along the edges 0-3, 1-4, 2-5.
const PRISM_FACES: [Face; 5] = [
    Face::Tri([0, 1, 2]),
    Face::Tri([3, 4, 5]),
    Face::Quad([0, 1, 4, 3]),
    Face::Quad([1, 2, 5, 4]),
    Face::Quad([2, 0, 3, 5]),
];

// Euler: a closed polyhedron has F - E + V = 2.
const_assert_eq!(TET_FACES.len() + 4, 6 + 2);
const_assert_eq!(HEX_FACES.len() + 8, 12 + 2);
const_assert_eq!(PYRAMID_FACES.len() + 5, 8 + 2);
const_assert_eq!(PRISM_FACES.len() + 6, 9 + 2);

impl CellType {
    /// Surface element classes in file order.
    pub const SURFACE: [CellType; 2] = [CellType::Triangle, CellType::Quadrilateral];

    /// Volume element classes in file order.
    pub const VOLUME: [CellType; 4] = [
        CellType::Tetrahedron,
        CellType::Pyramid,
        CellType::Prism,
        CellType::Hexahedron,
    ];

    /// Number of vertex ids in one element record.
    pub const fn vertex_count(self) -> usize {
        match self {
            CellType::Triangle => 3,
            CellType::Quadrilateral | CellType::Tetrahedron => 4,
            CellType::Pyramid => 5,
            CellType::Prism => 6,
            CellType::Hexahedron => 8,
        }
    }

    /// Nastran bulk-data card used by the text exporter.
    pub const fn card_name(self) -> &'static str {
        match self {
            CellType::Triangle => "CTRIA3",
            CellType::Quadrilateral => "CQUAD4",
            CellType::Tetrahedron => "CTETRA",
            CellType::Pyramid => "CPYRAM",
            CellType::Prism => "CPENTA",
            CellType::Hexahedron => "CHEXA",
        }
    }

    /// Block name used in log lines and truncation errors.
    pub const fn block_name(self) -> &'static str {
        match self {
            CellType::Triangle => "tris",
            CellType::Quadrilateral => "quads",
            CellType::Tetrahedron => "tets",
            CellType::Pyramid => "pyramids",
            CellType::Prism => "prisms",
            CellType::Hexahedron => "hexas",
        }
    }

    /// Boundary faces in canonical order; empty for surface cells.
    pub const fn faces(self) -> &'static [Face] {
        match self {
            CellType::Tetrahedron => &TET_FACES,
            CellType::Pyramid => &PYRAMID_FACES,
            CellType::Prism => &PRISM_FACES,
            CellType::Hexahedron => &HEX_FACES,
            CellType::Triangle | CellType::Quadrilateral => &[],
        }
    }

    /// `(triangle faces, quad faces)` produced per cell when skinning.
    pub fn face_counts(self) -> (usize, usize) {
        self.faces().iter().fold((0, 0), |(t, q), face| match face {
            Face::Tri(_) => (t + 1, q),
            Face::Quad(_) => (t, q + 1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_counts_per_volume_type() {
        assert_eq!(CellType::Tetrahedron.face_counts(), (4, 0));
        assert_eq!(CellType::Pyramid.face_counts(), (4, 1));
        assert_eq!(CellType::Prism.face_counts(), (2, 3));
        assert_eq!(CellType::Hexahedron.face_counts(), (0, 6));
        assert_eq!(CellType::Triangle.face_counts(), (0, 0));
    }

    #[test]
    fn face_indices_stay_inside_the_cell() {
        for cell in CellType::VOLUME {
            let n = cell.vertex_count();
            for face in cell.faces() {
                let ok = match face {
                    Face::Tri(ix) => ix.iter().all(|&i| i < n),
                    Face::Quad(ix) => ix.iter().all(|&i| i < n),
                };
                assert!(ok, "{cell:?} face {face:?} out of range");
            }
        }
    }

    #[test]
    fn every_prism_vertex_lies_on_three_faces() {
        let mut hits = [0usize; 6];
        for face in CellType::Prism.faces() {
            match face {
                Face::Tri(ix) => ix.iter().for_each(|&i| hits[i] += 1),
                Face::Quad(ix) => ix.iter().for_each(|&i| hits[i] += 1),
            }
        }
        assert_eq!(hits, [3; 6]);
    }
}

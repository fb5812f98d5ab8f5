#![allow(dead_code)]
use ugrid_sieve::data::mesh::Mesh;

/// Coordinates exactly representable in both `f32` and `f64`.
pub fn node(i: usize) -> [f64; 3] {
    [i as f64 * 0.5, (i % 3) as f64, -(i as f64) / 4.0]
}

/// Fourteen nodes, every element class once, every node used.
pub fn mixed_mesh() -> Mesh {
    Mesh::builder()
        .nodes((1..=14).map(node).collect())
        .tris(vec![[1, 2, 5], [9, 10, 11]])
        .quads(vec![[1, 2, 3, 4]])
        .surface_ids(vec![3, 3, 7])
        .tets(vec![[9, 10, 11, 12]])
        .pyramids(vec![[1, 2, 3, 4, 13]])
        .prisms(vec![[9, 10, 11, 14, 13, 12]])
        .hexas(vec![[1, 2, 3, 4, 5, 6, 7, 8]])
        .build()
}

/// Byte length of `mixed_mesh` with the given coordinate width.
pub fn mixed_mesh_len(float_bytes: u64) -> u64 {
    let ints = 7 + 2 * 3 + 4 + 3 + 4 + 5 + 6 + 8;
    ints * 4 + 14 * 3 * float_bytes
}

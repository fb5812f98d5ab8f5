//! Data module: the in-memory mesh

pub mod mesh;

pub use mesh::{Mesh, MeshBuilder, MeshCounts, NodeId};

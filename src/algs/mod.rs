//! Re-export public algorithms.

pub mod skin;

pub use skin::{SkinnedSurface, skin_face_counts, skin_solids};

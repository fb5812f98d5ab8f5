use crate::data::mesh::Mesh;
use crate::mesh_error::UgridError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), UgridError>;
}

/// Helper macro to run a fallible check and panic on error when invariant
/// checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}

impl DebugInvariants for Mesh {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Mesh");
    }

    /// Surface property ids must run parallel to tris-then-quads.
    fn validate_invariants(&self) -> Result<(), UgridError> {
        if self.surface_ids().len() != self.num_surface_elements() {
            return Err(UgridError::SurfaceIdMismatch {
                tris: self.tris().len(),
                quads: self.quads().len(),
                surface_ids: self.surface_ids().len(),
            });
        }
        Ok(())
    }
}

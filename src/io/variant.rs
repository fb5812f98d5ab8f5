//! UGRID format variants encoded in the filename.
//!
//! AFLR3 names binary grids `<name>.<tag>.ugrid`, where the tag carries the
//! byte order and the floating-point width of the node block:
//!
//! | tag   | byte order | coordinates |
//! |-------|------------|-------------|
//! | `b8`  | big        | `f64`       |
//! | `lb8` | little     | `f64`       |
//! | `b4`  | big        | `f32`       |
//! | `lb4` | little     | `f32`       |
//!
//! Fortran-unformatted (`r`, `lr`) and ASCII grids are rejected.

use crate::mesh_error::UgridError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Byte order of every multi-byte value in the file.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    /// Convert a native integer into its on-disk representation (and back:
    /// the operation is an involution).
    #[inline]
    pub fn swap_i32(self, value: i32) -> i32 {
        match self {
            ByteOrder::Little => value.to_le(),
            ByteOrder::Big => value.to_be(),
        }
    }

    #[inline]
    pub fn swap_u32(self, value: u32) -> u32 {
        match self {
            ByteOrder::Little => value.to_le(),
            ByteOrder::Big => value.to_be(),
        }
    }

    #[inline]
    pub fn swap_u64(self, value: u64) -> u64 {
        match self {
            ByteOrder::Little => value.to_le(),
            ByteOrder::Big => value.to_be(),
        }
    }
}

/// Width of the coordinate values in the node block.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum FloatWidth {
    Single,
    Double,
}

impl FloatWidth {
    pub const fn bytes(self) -> usize {
        match self {
            FloatWidth::Single => 4,
            FloatWidth::Double => 8,
        }
    }
}

/// Binary layout parameters resolved from a filename.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct FormatVariant {
    pub byte_order: ByteOrder,
    pub float_width: FloatWidth,
}

impl FormatVariant {
    pub const fn new(byte_order: ByteOrder, float_width: FloatWidth) -> Self {
        Self {
            byte_order,
            float_width,
        }
    }

    /// Parse a variant tag such as `lb8`.
    pub fn from_tag(tag: &str) -> Result<Self, UgridError> {
        Self::parse_tag(tag).map_err(|reason| UgridError::InvalidFormatTag {
            filename: tag.to_string(),
            reason,
        })
    }

    /// Resolve the variant from a `<name>.<tag>.ugrid` path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<ResolvedPath, UgridError> {
        let path = path.as_ref();
        let invalid = |reason: String| UgridError::InvalidFormatTag {
            filename: path.display().to_string(),
            reason,
        };

        let basename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| invalid("missing file name".into()))?;
        let mut parts = basename.rsplitn(3, '.');
        let ext = parts.next().unwrap_or_default();
        let (tag, stem) = match (parts.next(), parts.next()) {
            (Some(tag), Some(stem)) if !stem.is_empty() => (tag, stem),
            _ => {
                return Err(invalid(
                    "expected a file of the form \"model.b8.ugrid\" or \"model.lb4.ugrid\"".into(),
                ));
            }
        };
        if ext != "ugrid" {
            return Err(invalid(format!("extension={ext:?}")));
        }
        log::debug!("resolving UGRID variant for stem={stem:?} tag={tag:?}");
        let variant = Self::parse_tag(tag).map_err(invalid)?;
        Ok(ResolvedPath {
            variant,
            path: path.to_path_buf(),
        })
    }

    fn parse_tag(tag: &str) -> Result<Self, String> {
        let float_width = match (tag.contains('8'), tag.contains('4')) {
            (true, false) => FloatWidth::Double,
            (false, true) => FloatWidth::Single,
            (true, true) => return Err(format!("tag {tag:?} declares both 4 and 8 byte floats")),
            (false, false) => return Err(format!("tag {tag:?} declares no float width")),
        };
        // `lb` is C binary little endian, a bare `b` is C binary big endian.
        // Fortran-unformatted (`r`/`lr`) records are not supported.
        let byte_order = if tag.contains("lb") {
            ByteOrder::Little
        } else if tag.contains('b') {
            ByteOrder::Big
        } else {
            return Err(format!("tag {tag:?} is not a C binary variant"));
        };
        Ok(Self::new(byte_order, float_width))
    }

    /// Canonical tag for this variant (`b8`, `lb4`, ...).
    pub fn tag(&self) -> &'static str {
        match (self.byte_order, self.float_width) {
            (ByteOrder::Big, FloatWidth::Double) => "b8",
            (ByteOrder::Big, FloatWidth::Single) => "b4",
            (ByteOrder::Little, FloatWidth::Double) => "lb8",
            (ByteOrder::Little, FloatWidth::Single) => "lb4",
        }
    }
}

/// A path together with the variant its name declares.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedPath {
    pub variant: FormatVariant,
    pub path: PathBuf,
}

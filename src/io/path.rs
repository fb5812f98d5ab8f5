//! Input path resolution.
//!
//! Interactive tools may let the user pick a grid when no filename was
//! given. The picker is an external collaborator behind [`FileDialog`]; it is
//! only consulted when the caller supplies no path.

use crate::data::mesh::Mesh;
use crate::io::ugrid::{UgridReadOptions, read_ugrid};
use crate::mesh_error::UgridError;
use std::path::{Path, PathBuf};

pub const DIALOG_TITLE: &str = "Please select an AFLR3 UGRID to load";
pub const DIALOG_FILTER: &str = "AFLR3 UGRID (*.ugrid);;All files (*)";

/// Supplies a path chosen by the user.
pub trait FileDialog {
    fn select_file(&self, title: &str, filter: &str) -> Option<PathBuf>;
}

/// Dialog for non-interactive use; never selects anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDialog;

impl FileDialog for NoDialog {
    fn select_file(&self, _title: &str, _filter: &str) -> Option<PathBuf> {
        None
    }
}

/// Use `path` if given, otherwise ask `dialog`.
pub fn resolve_input_path(
    path: Option<&Path>,
    dialog: &dyn FileDialog,
) -> Result<PathBuf, UgridError> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => {
            log::debug!("no UGRID path given; asking the file dialog");
            dialog
                .select_file(DIALOG_TITLE, DIALOG_FILTER)
                .ok_or(UgridError::NoInputPath)
        }
    }
}

/// [`read_ugrid`] with a dialog fallback for a missing path.
pub fn read_ugrid_or_select(
    path: Option<&Path>,
    dialog: &dyn FileDialog,
    options: UgridReadOptions,
) -> Result<Mesh, UgridError> {
    let path = resolve_input_path(path, dialog)?;
    read_ugrid(path, options)
}

mod util;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use ugrid_sieve::io::path::{DIALOG_FILTER, DIALOG_TITLE, NoDialog};
use ugrid_sieve::prelude::*;

/// Dialog that records its prompts and returns a fixed selection.
struct Picker {
    selection: Option<PathBuf>,
    prompts: RefCell<Vec<(String, String)>>,
}

impl Picker {
    fn new(selection: Option<PathBuf>) -> Self {
        Self {
            selection,
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl FileDialog for Picker {
    fn select_file(&self, title: &str, filter: &str) -> Option<PathBuf> {
        self.prompts
            .borrow_mut()
            .push((title.to_string(), filter.to_string()));
        self.selection.clone()
    }
}

#[test]
fn dialog_selection_is_read() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("picked.lb8.ugrid");
    write_ugrid(&path, &util::mixed_mesh(), UgridWriteOptions::default()).expect("write");

    let picker = Picker::new(Some(path));
    let mesh = read_ugrid_or_select(None, &picker, UgridReadOptions::default()).expect("read");
    assert_eq!(mesh, util::mixed_mesh());
    assert_eq!(
        picker.prompts.borrow().as_slice(),
        &[(DIALOG_TITLE.to_string(), DIALOG_FILTER.to_string())]
    );
}

#[test]
fn given_path_bypasses_the_dialog() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("given.b4.ugrid");
    write_ugrid(&path, &util::mixed_mesh(), UgridWriteOptions::default()).expect("write");

    let picker = Picker::new(Some(PathBuf::from("elsewhere.b8.ugrid")));
    let mesh = read_ugrid_or_select(Some(path.as_path()), &picker, UgridReadOptions::default())
        .expect("read");
    assert_eq!(mesh.counts(), util::mixed_mesh().counts());
    assert!(picker.prompts.borrow().is_empty());
}

#[test]
fn cancelled_selection_reads_nothing() {
    let err = read_ugrid_or_select(None, &NoDialog, UgridReadOptions::default()).unwrap_err();
    assert_eq!(err, UgridError::NoInputPath);
}

#[test]
fn selected_file_still_needs_a_variant_tag() {
    let picker = Picker::new(Some(Path::new("picked.ugrid").to_path_buf()));
    let err = read_ugrid_or_select(None, &picker, UgridReadOptions::default()).unwrap_err();
    assert!(matches!(err, UgridError::InvalidFormatTag { .. }));
}

mod util;

use std::fs;
use tempfile::tempdir;
use ugrid_sieve::prelude::*;

fn mixed_bytes(tag: &str) -> Vec<u8> {
    let variant = FormatVariant::from_tag(tag).expect("tag");
    let mut bytes = Vec::new();
    UgridWriter::new(variant)
        .write(&mut bytes, &util::mixed_mesh())
        .expect("encode");
    bytes
}

#[test]
fn truncated_node_block_in_a_file() {
    let mut bytes = mixed_bytes("b8");
    bytes.truncate(28 + 10);
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("short.b8.ugrid");
    fs::write(&path, &bytes).expect("write bytes");

    let err = read_ugrid(&path, UgridReadOptions::default()).unwrap_err();
    assert_eq!(
        err,
        UgridError::Truncated {
            block: "nodes",
            expected: 14 * 3 * 8,
            available: 10,
        }
    );
}

#[test]
fn truncated_node_block_in_a_stream() {
    let mut bytes = mixed_bytes("b8");
    bytes.truncate(28 + 10);
    let variant = FormatVariant::from_tag("b8").expect("tag");
    let err = UgridReader::new(variant).read(bytes.as_slice()).unwrap_err();
    assert_eq!(
        err,
        UgridError::Truncated {
            block: "nodes",
            expected: 336,
            available: 10,
        }
    );
}

#[test]
fn truncated_last_block() {
    let mut bytes = mixed_bytes("lb4");
    bytes.truncate(bytes.len() - 4);
    let variant = FormatVariant::from_tag("lb4").expect("tag");
    let err = UgridReader::new(variant).read(bytes.as_slice()).unwrap_err();
    assert_eq!(
        err,
        UgridError::Truncated {
            block: "hexas",
            expected: 32,
            available: 28,
        }
    );
}

#[test]
fn surface_only_read_ignores_missing_volume_bytes() {
    let mut bytes = mixed_bytes("lb8");
    // drop everything after the surface ids
    let volume_bytes = (4 + 5 + 6 + 8) * 4;
    bytes.truncate(bytes.len() - volume_bytes);
    let variant = FormatVariant::from_tag("lb8").expect("tag");
    let options = UgridReadOptions {
        read_solids: false,
        ..Default::default()
    };
    let mesh = UgridReader::with_options(variant, options)
        .read(bytes.as_slice())
        .expect("surface read");
    assert_eq!(mesh.surface_ids(), &[3, 3, 7]);
}

#[test]
fn empty_surface_is_refused_before_the_file_exists() {
    let mesh = Mesh::builder()
        .nodes((1..=4).map(util::node).collect())
        .tets(vec![[1, 2, 3, 4]])
        .build();
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("solid.lb8.ugrid");
    let err = write_ugrid(&path, &mesh, UgridWriteOptions::default()).unwrap_err();
    assert!(matches!(err, UgridError::EmptyMesh(_)));
    assert!(!path.exists());

    let options = UgridWriteOptions {
        check_shells: false,
        ..Default::default()
    };
    write_ugrid(&path, &mesh, options).expect("volume-only write");
    assert_eq!(fs::metadata(&path).expect("metadata").len(), 28 + 4 * 24 + 16);
}

#[test]
fn surface_id_count_must_match_shells() {
    let mesh = Mesh::builder()
        .nodes((1..=4).map(util::node).collect())
        .tris(vec![[1, 2, 3], [1, 3, 4]])
        .surface_ids(vec![1])
        .tets(vec![[1, 2, 3, 4]])
        .build();
    let variant = FormatVariant::from_tag("b4").expect("tag");
    let mut out = Vec::new();
    let err = UgridWriter::new(variant).write(&mut out, &mesh).unwrap_err();
    assert_eq!(
        err,
        UgridError::SurfaceIdMismatch {
            tris: 2,
            quads: 0,
            surface_ids: 1,
        }
    );
    assert!(out.is_empty());
}

#[test]
fn oversized_stream_header_fails_without_allocating() {
    let header: Vec<u8> = [0, 0, 0, 0, 0, 0, i32::MAX]
        .iter()
        .flat_map(|count: &i32| count.to_be_bytes())
        .collect();
    let variant = FormatVariant::from_tag("b8").expect("tag");
    let err = UgridReader::new(variant).read(header.as_slice()).unwrap_err();
    assert_eq!(
        err,
        UgridError::Truncated {
            block: "hexas",
            expected: i32::MAX as u64 * 32,
            available: 0,
        }
    );
}

#[test]
fn oversized_stream_node_count_reports_what_arrived() {
    let mut bytes: Vec<u8> = [i32::MAX, 0, 0, 0, 0, 0, 0]
        .iter()
        .flat_map(|count: &i32| count.to_le_bytes())
        .collect();
    bytes.extend_from_slice(&[0u8; 40]);
    let variant = FormatVariant::from_tag("lb4").expect("tag");
    let err = UgridReader::new(variant).read(bytes.as_slice()).unwrap_err();
    assert_eq!(
        err,
        UgridError::Truncated {
            block: "nodes",
            expected: i32::MAX as u64 * 12,
            available: 40,
        }
    );
}

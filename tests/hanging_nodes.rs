mod util;

use tempfile::tempdir;
use ugrid_sieve::prelude::*;

/// Ten nodes, elements only touch 1..=9.
fn mesh_with_hanging_node() -> Mesh {
    Mesh::builder()
        .nodes((1..=10).map(util::node).collect())
        .tris(vec![[1, 2, 3]])
        .surface_ids(vec![1])
        .tets(vec![[5, 6, 7, 9]])
        .hexas(vec![[1, 2, 3, 4, 5, 6, 7, 8]])
        .build()
}

#[test]
fn unused_node_stops_the_check() {
    let err = check_hanging_nodes(&mesh_with_hanging_node(), true).unwrap_err();
    assert_eq!(
        err,
        UgridError::HangingNodes {
            node_count: 10,
            used: 9,
            unused: vec![10],
            out_of_range: vec![],
        }
    );
}

#[test]
fn unused_node_is_reported_without_stopping() {
    let report = check_hanging_nodes(&mesh_with_hanging_node(), false).unwrap();
    assert!(!report.is_clean());
    assert_eq!(report.node_count, 10);
    assert_eq!(report.used, 9);
    assert_eq!(report.diff(), vec![10]);
}

#[test]
fn read_runs_the_check_only_when_asked() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("hanging.lb8.ugrid");
    let unchecked = UgridWriteOptions {
        check: false,
        ..Default::default()
    };
    write_ugrid(&path, &mesh_with_hanging_node(), unchecked).expect("write without check");

    let err = read_ugrid(&path, UgridReadOptions::default()).unwrap_err();
    assert!(matches!(err, UgridError::HangingNodes { unused, .. } if unused == vec![10]));

    let options = UgridReadOptions {
        check: false,
        ..Default::default()
    };
    let mesh = read_ugrid(&path, options).expect("read without check");
    assert_eq!(mesh, mesh_with_hanging_node());
}

#[test]
fn write_check_runs_after_the_bytes() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("hanging.b4.ugrid");
    let err = write_ugrid(&path, &mesh_with_hanging_node(), UgridWriteOptions::default())
        .unwrap_err();
    assert!(matches!(err, UgridError::HangingNodes { .. }));
    assert!(path.exists());
}

#[test]
fn repeated_triangle_vertex_is_fatal() {
    let mesh = Mesh::builder()
        .nodes((1..=4).map(util::node).collect())
        .tris(vec![[1, 2, 3], [1, 1, 2]])
        .surface_ids(vec![1, 1])
        .tets(vec![[1, 2, 3, 4]])
        .build();
    assert_eq!(
        check_hanging_nodes(&mesh, true).unwrap_err(),
        UgridError::DegenerateElement {
            cell_type: CellType::Triangle,
            index: 1,
            vertices: vec![1, 1, 2],
        }
    );
}

#[test]
fn repeated_quad_vertex_is_only_reported() {
    let mesh = Mesh::builder()
        .nodes((1..=5).map(util::node).collect())
        .quads(vec![[1, 2, 3, 3]])
        .surface_ids(vec![2])
        .pyramids(vec![[1, 2, 3, 4, 5]])
        .build();
    let report = check_hanging_nodes(&mesh, true).expect("quads are tolerated");
    assert!(report.is_clean());
    assert_eq!(report.degenerate_quads, vec![0]);
}

#[test]
fn node_id_zero_is_rejected_before_writing() {
    let base = util::mixed_mesh();
    let mesh = Mesh::builder()
        .nodes(base.nodes().to_vec())
        .tris(vec![[0, 2, 5], [9, 10, 11]])
        .quads(base.quads().to_vec())
        .surface_ids(base.surface_ids().to_vec())
        .tets(base.tets().to_vec())
        .pyramids(base.pyramids().to_vec())
        .prisms(base.prisms().to_vec())
        .hexas(base.hexas().to_vec())
        .build();

    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("zero.b8.ugrid");
    let err = write_ugrid(&path, &mesh, UgridWriteOptions::default()).unwrap_err();
    assert_eq!(
        err,
        UgridError::NodeIdRange {
            cell_type: CellType::Triangle,
            min_id: 0,
        }
    );
    assert!(!path.exists());
}

use ugrid_sieve::io::variant::{ByteOrder, FloatWidth, FormatVariant};
use ugrid_sieve::mesh_error::UgridError;

#[test]
fn big_endian_double() {
    let resolved = FormatVariant::from_path("name.b8.ugrid").expect("b8");
    assert_eq!(resolved.variant.byte_order, ByteOrder::Big);
    assert_eq!(resolved.variant.float_width, FloatWidth::Double);
    assert_eq!(resolved.path.to_str(), Some("name.b8.ugrid"));
}

#[test]
fn little_endian_single() {
    let resolved = FormatVariant::from_path("name.lb4.ugrid").expect("lb4");
    assert_eq!(
        resolved.variant,
        FormatVariant::new(ByteOrder::Little, FloatWidth::Single)
    );
    assert_eq!(resolved.variant.float_width.bytes(), 4);
}

#[test]
fn directories_do_not_affect_the_tag() {
    let resolved = FormatVariant::from_path("/data/runs.v1/name.b4.ugrid").expect("b4");
    assert_eq!(
        resolved.variant,
        FormatVariant::new(ByteOrder::Big, FloatWidth::Single)
    );
}

#[test]
fn unknown_tag_is_rejected() {
    let err = FormatVariant::from_path("name.x.ugrid").expect_err("x is not a variant");
    assert!(
        matches!(err, UgridError::InvalidFormatTag { .. }),
        "unexpected error: {err:?}"
    );
}

#[test]
fn missing_tag_is_rejected() {
    for name in ["name.ugrid", "name", "name.b8.msh"] {
        assert!(
            matches!(
                FormatVariant::from_path(name),
                Err(UgridError::InvalidFormatTag { .. })
            ),
            "{name} should be rejected"
        );
    }
}

#[test]
fn width_without_binary_order_is_rejected() {
    // Fortran unformatted and ASCII grids
    for name in ["name.r8.ugrid", "name.lr4.ugrid", "name.8.ugrid"] {
        assert!(FormatVariant::from_path(name).is_err(), "{name}");
    }
}

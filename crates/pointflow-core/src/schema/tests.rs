use crate::schema::{Dimension, Schema};
use pointflow_primitives::DimensionKind;

#[test]
fn equality_is_order_sensitive() {
    let xy = Schema::new(vec![
        Dimension::new("X", DimensionKind::Float64),
        Dimension::new("Y", DimensionKind::Float64),
    ]);
    let yx = Schema::new(vec![
        Dimension::new("Y", DimensionKind::Float64),
        Dimension::new("X", DimensionKind::Float64),
    ]);

    assert_ne!(xy, yx, "reordered dimensions must not compare equal");
}

#[test]
fn equality_is_kind_sensitive() {
    let wide = Schema::xyz();
    let narrow: Schema = [
        Dimension::new("X", DimensionKind::Float64),
        Dimension::new("Y", DimensionKind::Float64),
        Dimension::new("Z", DimensionKind::Float32),
    ]
    .into_iter()
    .collect();

    assert_ne!(wide, narrow, "same names with different kinds must not compare equal");
}

#[test]
fn position_and_size_follow_layout() {
    let schema = Schema::xyz().with_dimension(Dimension::new("Intensity", DimensionKind::Uint16));

    assert_eq!(schema.dimension_count(), 4);
    assert_eq!(schema.position_of("Intensity"), Some(3));
    assert_eq!(schema.position_of("intensity"), None);
    assert_eq!(schema.point_size_bytes(), 26);
}

#[test]
fn display_lists_dimensions_in_order() {
    assert_eq!(
        Schema::xyz().to_string(),
        "[X:Float64, Y:Float64, Z:Float64]"
    );
    assert_eq!(Schema::empty().to_string(), "[]");
}

#[test]
fn serializes_as_plain_dimension_list() {
    let schema = Schema::new(vec![Dimension::new("X", DimensionKind::Int32)]);
    let json = serde_json::to_string(&schema).expect("schema should serialize");

    assert_eq!(json, r#"[{"name":"X","kind":"Int32"}]"#);

    let decoded: Schema = serde_json::from_str(&json).expect("schema should deserialize");
    assert_eq!(decoded, schema);
}

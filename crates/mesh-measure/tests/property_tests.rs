//! Property-based tests for measurement invariants using `proptest`.

use approx::assert_relative_eq;
use proptest::prelude::*;

use mesh_measure::{bounding_box, is_equal, is_equal_box, surface_area, MeasureError};
use mesh_types::{BoundingBox, Face, GeometryModel, Point3d};

// ---------------------------------------------------------------------------
// Model builders
// ---------------------------------------------------------------------------

/// Axis-aligned box with one corner at `origin`, six quads, alternating winding.
fn box_model(origin: [f64; 3], a: f64, b: f64, c: f64) -> GeometryModel {
    let [x0, y0, z0] = origin;
    let (x1, y1, z1) = (x0 + a, y0 + b, z0 + c);
    let vertices = vec![
        Point3d::new(x0, y0, z0),
        Point3d::new(x1, y0, z0),
        Point3d::new(x1, y1, z0),
        Point3d::new(x0, y1, z0),
        Point3d::new(x0, y0, z1),
        Point3d::new(x1, y0, z1),
        Point3d::new(x1, y1, z1),
        Point3d::new(x0, y1, z1),
    ];
    let faces = vec![
        Face::new(vec![0, 3, 2, 1]),
        Face::new(vec![4, 5, 6, 7]),
        Face::new(vec![0, 4, 7, 3]),
        Face::new(vec![1, 2, 6, 5]),
        Face::new(vec![0, 1, 5, 4]),
        Face::new(vec![3, 7, 6, 2]),
    ];
    GeometryModel::new(vertices, faces).unwrap()
}

/// Regular polygon with `sides` vertices lying in a plane normal to `axis`.
fn regular_polygon(center: [f64; 3], radius: f64, sides: usize, axis: usize) -> Vec<Point3d> {
    (0..sides)
        .map(|i| {
            let t = 2.0 * std::f64::consts::PI * i as f64 / sides as f64;
            let (u, v) = (radius * t.cos(), radius * t.sin());
            let mut p = center;
            p[(axis + 1) % 3] += u;
            p[(axis + 2) % 3] += v;
            Point3d::from_array(p)
        })
        .collect()
}

fn with_faces(model: &GeometryModel, faces: Vec<Face>) -> GeometryModel {
    GeometryModel::new(model.vertices().to_vec(), faces).unwrap()
}

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_coord() -> impl Strategy<Value = [f64; 3]> {
    (-100.0f64..100.0, -100.0f64..100.0, -100.0f64..100.0).prop_map(|(x, y, z)| [x, y, z])
}

/// Convex planar faces (regular polygons) plus occasional 2-index faces.
fn arb_model() -> impl Strategy<Value = GeometryModel> {
    let face = (arb_coord(), 0.01f64..50.0, 3usize..9, 0usize..3, any::<bool>());
    prop::collection::vec(face, 1..12).prop_map(|defs| {
        let mut vertices = Vec::new();
        let mut faces = Vec::new();
        for (center, radius, sides, axis, degenerate) in defs {
            let start = vertices.len();
            vertices.extend(regular_polygon(center, radius, sides, axis));
            if degenerate {
                faces.push(Face::new(vec![start, start + 1]));
            } else {
                faces.push(Face::new((start..start + sides).collect()));
            }
        }
        // Stray vertex far outside every face.
        vertices.push(Point3d::new(1e6, -1e6, 1e6));
        GeometryModel::new(vertices, faces).unwrap()
    })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

// ---------------------------------------------------------------------------
// 1. Bounding box ignores face order and winding
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn bounding_box_invariant_under_reorder_and_reversal(
        model in arb_model(),
        rotate in 0usize..12,
        flips in prop::collection::vec(any::<bool>(), 12),
    ) {
        let base = bounding_box(&model).unwrap();

        let mut faces: Vec<Face> = model
            .faces()
            .iter()
            .zip(flips.iter())
            .map(|(f, &flip)| if flip { f.reversed() } else { f.clone() })
            .collect();
        let n = faces.len();
        faces.rotate_left(rotate % n);
        faces.reverse();

        let other = bounding_box(&with_faces(&model, faces)).unwrap();
        prop_assert_eq!(base, other);
    }
}

// ---------------------------------------------------------------------------
// 2. Surface area is non-negative and ignores face order and winding
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn surface_area_invariant_under_reorder_and_reversal(
        model in arb_model(),
        flips in prop::collection::vec(any::<bool>(), 12),
    ) {
        let base = surface_area(&model);
        prop_assert!(base >= 0.0);

        let mut faces: Vec<Face> = model
            .faces()
            .iter()
            .zip(flips.iter())
            .map(|(f, &flip)| if flip { f.reversed() } else { f.clone() })
            .collect();
        faces.reverse();

        let other = surface_area(&with_faces(&model, faces));
        prop_assert!(other >= 0.0);
        prop_assert!(close(base, other), "area changed: {} vs {}", base, other);
    }
}

proptest! {
    #[test]
    fn triangle_soup_area_is_non_negative(
        points in prop::collection::vec(arb_coord(), 3..30),
        picks in prop::collection::vec((0usize..30, 0usize..30, 0usize..30), 1..20),
    ) {
        let n = points.len();
        let faces = picks
            .into_iter()
            .map(|(a, b, c)| Face::new(vec![a % n, b % n, c % n]))
            .collect();
        let model = GeometryModel::new(points.into_iter().map(Point3d::from_array).collect(), faces)
            .unwrap();
        prop_assert!(surface_area(&model) >= 0.0);
    }
}

// ---------------------------------------------------------------------------
// 3. Rectangular box area = 2(ab + bc + ac)
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn box_surface_area_formula(
        origin in arb_coord(),
        a in 0.01f64..100.0,
        b in 0.01f64..100.0,
        c in 0.01f64..100.0,
    ) {
        let model = box_model(origin, a, b, c);
        let expected = 2.0 * (a * b + b * c + a * c);
        prop_assert!(close(surface_area(&model), expected));
    }
}

// ---------------------------------------------------------------------------
// 4. Tolerance comparison is reflexive and symmetric
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn tolerance_reflexive(x in -1e6f64..1e6, e in 0.0f64..1.0) {
        prop_assert!(is_equal(x, x, e));
    }

    #[test]
    fn tolerance_symmetric(x in -1e3f64..1e3, y in -1e3f64..1e3, e in 0.0f64..10.0) {
        prop_assert_eq!(is_equal(x, y, e), is_equal(y, x, e));
    }
}

// ---------------------------------------------------------------------------
// Concrete scenarios
// ---------------------------------------------------------------------------

#[test]
fn unit_cube_box_and_area() {
    let model = box_model([0.0, 0.0, 0.0], 1.0, 1.0, 1.0);
    assert_eq!(model.vertex_count(), 8);
    assert_eq!(model.face_count(), 6);

    let bb = bounding_box(&model).unwrap();
    let expected = BoundingBox::new(Point3d::new(0.0, 0.0, 0.0), Point3d::new(1.0, 1.0, 1.0));
    assert!(is_equal_box(&bb, &expected, 0.0));
    assert_relative_eq!(surface_area(&model), 6.0, epsilon = 1e-12);
}

#[test]
fn simple_box_reference_values() {
    let model = box_model([0.0, 0.0, 0.0], 3.0, 2.0, 1.0);
    let bb = bounding_box(&model).unwrap();
    assert_eq!(bb.max, Point3d::new(3.0, 2.0, 1.0));
    assert_relative_eq!(surface_area(&model), 22.0, epsilon = 1e-12);
}

#[test]
fn two_index_face_is_tolerated() {
    let cube = box_model([0.0, 0.0, 0.0], 1.0, 1.0, 1.0);
    let mut faces = cube.faces().to_vec();
    faces.push(Face::new(vec![0, 6]));
    let model = with_faces(&cube, faces);

    assert_relative_eq!(surface_area(&model), 6.0, epsilon = 1e-12);
    let bb = bounding_box(&model).unwrap();
    assert_eq!(bb.max, Point3d::new(1.0, 1.0, 1.0));
}

#[test]
fn empty_model_reports_error() {
    let cube = box_model([0.0, 0.0, 0.0], 1.0, 1.0, 1.0);
    let model = with_faces(&cube, vec![]);
    assert_eq!(bounding_box(&model), Err(MeasureError::EmptyModel));
    assert_eq!(surface_area(&model), 0.0);
}

use mesh_types::{Face, GeometryModel, Point3d};
use tracing::debug;

/// Area of the triangle (a, b, c): half the cross product magnitude.
pub fn triangle_area(a: Point3d, b: Point3d, c: Point3d) -> f64 {
    (b - a).cross(&(c - a)).length() / 2.0
}

/// Area of one face, triangulated as a fan around its first vertex.
///
/// Exact for triangles and convex polygons. Non-convex or self-intersecting
/// faces are not handled. Faces with fewer than 3 vertices have area 0.
pub fn face_area(model: &GeometryModel, face: &Face) -> f64 {
    if face.is_degenerate() {
        return 0.0;
    }
    let points: Vec<Point3d> = model.face_points(face).collect();
    let anchor = points[0];
    points[1..]
        .windows(2)
        .map(|w| triangle_area(anchor, w[0], w[1]))
        .sum()
}

/// Total surface area: the exact sum of all face areas, no tolerance applied.
pub fn surface_area(model: &GeometryModel) -> f64 {
    let mut area = 0.0f64;
    let mut skipped = 0usize;
    for face in model.faces() {
        if face.is_degenerate() {
            skipped += 1;
            continue;
        }
        area += face_area(model, face);
    }
    debug!(area, skipped_degenerate = skipped, "computed surface area");
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_model(indices: Vec<usize>) -> GeometryModel {
        GeometryModel::new(
            vec![
                Point3d::new(0.0, 0.0, 0.0),
                Point3d::new(2.0, 0.0, 0.0),
                Point3d::new(2.0, 3.0, 0.0),
                Point3d::new(0.0, 3.0, 0.0),
            ],
            vec![Face::new(indices)],
        )
        .unwrap()
    }

    #[test]
    fn right_triangle() {
        let a = triangle_area(
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 0.0, 0.0),
            Point3d::new(0.0, 1.0, 0.0),
        );
        assert!((a - 0.5).abs() < 1e-15);
    }

    #[test]
    fn quad_fan_area() {
        let model = quad_model(vec![0, 1, 2, 3]);
        assert!((surface_area(&model) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn reversed_quad_same_area() {
        let model = quad_model(vec![3, 2, 1, 0]);
        assert!((surface_area(&model) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn two_index_face_contributes_nothing() {
        let model = quad_model(vec![0, 1]);
        assert_eq!(surface_area(&model), 0.0);
    }

    #[test]
    fn collinear_triangle_has_zero_area() {
        let model = GeometryModel::new(
            vec![
                Point3d::new(0.0, 0.0, 0.0),
                Point3d::new(1.0, 1.0, 1.0),
                Point3d::new(2.0, 2.0, 2.0),
            ],
            vec![Face::new(vec![0, 1, 2])],
        )
        .unwrap();
        assert!(surface_area(&model).abs() < 1e-15);
    }
}

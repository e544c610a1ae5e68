use mesh_types::GeometryModel;

/// Element counts of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshStats {
    pub vertex_count: usize,
    pub face_count: usize,
    /// Triangles the fan decomposition produces.
    pub triangle_count: usize,
    pub degenerate_faces: usize,
    pub unreferenced_vertices: usize,
}

impl MeshStats {
    pub fn of(model: &GeometryModel) -> Self {
        let faces = model.faces();
        Self {
            vertex_count: model.vertex_count(),
            face_count: faces.len(),
            triangle_count: faces.iter().map(|f| f.len().saturating_sub(2)).sum(),
            degenerate_faces: faces.iter().filter(|f| f.is_degenerate()).count(),
            unreferenced_vertices: model.unreferenced_vertex_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{Face, Point3d};

    #[test]
    fn counts_mixed_faces() {
        let model = GeometryModel::new(
            (0..6).map(|i| Point3d::new(i as f64, 0.0, 0.0)).collect(),
            vec![
                Face::new(vec![0, 1, 2, 3]),
                Face::new(vec![0, 1]),
                Face::new(vec![1, 2, 3]),
            ],
        )
        .unwrap();
        let stats = MeshStats::of(&model);
        assert_eq!(stats.vertex_count, 6);
        assert_eq!(stats.face_count, 3);
        assert_eq!(stats.triangle_count, 3);
        assert_eq!(stats.degenerate_faces, 1);
        assert_eq!(stats.unreferenced_vertices, 2);
    }
}

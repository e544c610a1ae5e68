//! GeometryModel — the immutable polygon model one export produces.

use std::collections::HashSet;

use crate::face::{Face, Material};
use crate::point::Point3d;

/// Errors from model construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("face {face} references vertex {index} (vertex count = {vertex_count})")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// Vertices and faces of one imported mesh.
///
/// Every face index is guaranteed to be in `[0, vertex_count)`.
/// The model is read-only once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryModel {
    vertices: Vec<Point3d>,
    faces: Vec<Face>,
    materials: Vec<Material>,
}

impl GeometryModel {
    /// Build a model, checking that every face index is in range.
    pub fn new(vertices: Vec<Point3d>, faces: Vec<Face>) -> Result<Self, ModelError> {
        Self::with_materials(vertices, faces, Vec::new())
    }

    pub fn with_materials(
        vertices: Vec<Point3d>,
        faces: Vec<Face>,
        materials: Vec<Material>,
    ) -> Result<Self, ModelError> {
        let vertex_count = vertices.len();
        for (fi, face) in faces.iter().enumerate() {
            if let Some(&index) = face.indices.iter().find(|&&i| i >= vertex_count) {
                return Err(ModelError::IndexOutOfRange {
                    face: fi,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(Self {
            vertices,
            faces,
            materials,
        })
    }

    pub fn vertex_at(&self, index: usize) -> Option<Point3d> {
        self.vertices.get(index).copied()
    }

    pub fn vertices(&self) -> &[Point3d] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Positions of a face's vertices, in winding order.
    pub fn face_points<'a>(&'a self, face: &'a Face) -> impl Iterator<Item = Point3d> + 'a {
        face.indices.iter().map(move |&i| self.vertices[i])
    }

    /// Vertices referenced by at least one face, each once, in first-reference order.
    pub fn referenced_vertices(&self) -> Vec<Point3d> {
        let mut seen = HashSet::new();
        self.faces
            .iter()
            .flat_map(|f| f.indices.iter().copied())
            .filter(|&i| seen.insert(i))
            .map(|i| self.vertices[i])
            .collect()
    }

    /// Number of vertices no face refers to.
    pub fn unreferenced_vertex_count(&self) -> usize {
        let referenced: HashSet<usize> = self
            .faces
            .iter()
            .flat_map(|f| f.indices.iter().copied())
            .collect();
        self.vertices.len() - referenced.len()
    }
}

use serde::{Deserialize, Serialize};

/// A polygon referencing vertices of its model by 0-based position.
///
/// Index order defines winding. Winding is not assumed consistent across
/// the faces of a model. Faces with fewer than 3 indices are kept as-is;
/// measurement code treats them as degenerate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub indices: Vec<usize>,
    /// Name of the material active when the face was declared.
    pub material: Option<String>,
}

impl Face {
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices,
            material: None,
        }
    }

    pub fn with_material(indices: Vec<usize>, material: impl Into<String>) -> Self {
        Self {
            indices,
            material: Some(material.into()),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// A face with fewer than 3 vertices has no area.
    pub fn is_degenerate(&self) -> bool {
        self.indices.len() < 3
    }

    /// The same polygon with opposite winding.
    pub fn reversed(&self) -> Self {
        let mut indices = self.indices.clone();
        indices.reverse();
        Self {
            indices,
            material: self.material.clone(),
        }
    }
}

/// A named material from the companion material file.
///
/// Only the name takes part in validation; the colour is carried through
/// so that written files keep it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub diffuse: Option<[f64; 3]>,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            diffuse: None,
        }
    }

    pub fn with_diffuse(name: impl Into<String>, diffuse: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            diffuse: Some(diffuse),
        }
    }
}

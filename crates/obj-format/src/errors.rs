use std::fmt;
use std::path::PathBuf;

/// Errors that make an imported mesh unusable for comparison.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ImportError {
    #[error("cannot read {path}: {message}")]
    Unreadable { path: PathBuf, message: String },

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("line {line}: vertex reference {index} out of range (vertex count = {vertex_count})")]
    IndexOutOfRange {
        line: usize,
        index: i64,
        vertex_count: usize,
    },

    #[error("geometry file contains no faces")]
    NoFaces,
}

/// Errors while writing an OBJ/MTL pair.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportError {
    #[error("cannot write {path}: {message}")]
    Write { path: PathBuf, message: String },

    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteVertex { index: usize },

    #[error("material name {name:?} cannot be written to a usemtl/newmtl line")]
    InvalidMaterialName { name: String },

    #[error("model has no face with vertex references")]
    NoFaces,
}

/// Non-fatal findings about material consistency.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationNote {
    MaterialFileUnreadable { path: PathBuf, message: String },
    MalformedMaterialLine { line: usize, reason: String },
    /// Faces use a material the material file never declares.
    UndeclaredMaterial { name: String, faces: usize },
    /// The geometry file names a different material library.
    MaterialLibraryMismatch { declared: String, expected: String },
    /// `usemtl` without a name; the faces after it carry no material.
    UnnamedMaterial { line: usize },
}

impl fmt::Display for ValidationNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaterialFileUnreadable { path, message } => {
                write!(f, "material file {} unreadable: {}", path.display(), message)
            }
            Self::MalformedMaterialLine { line, reason } => {
                write!(f, "material file line {}: {}", line, reason)
            }
            Self::UndeclaredMaterial { name, faces } => {
                write!(f, "material \"{}\" used by {} faces is not declared", name, faces)
            }
            Self::MaterialLibraryMismatch { declared, expected } => {
                write!(f, "geometry references library \"{}\", expected \"{}\"", declared, expected)
            }
            Self::UnnamedMaterial { line } => {
                write!(f, "line {}: usemtl without a material name", line)
            }
        }
    }
}

//! Helper functions: error types and reference model builders.

use mesh_measure::MeasureError;
use mesh_types::{Face, GeometryModel, Point3d};
use obj_format::ImportError;

use crate::tool::ToolError;

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
///
/// `ToolInvocation`, `Import` and `EmptyModel` mean the harness or the tool
/// broke; `ComparisonFailure` means the kernel output changed. A result
/// directory that cannot be prepared or removed counts as a tool invocation
/// failure and aborts the whole run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HarnessError {
    #[error("tool invocation failed: {0}")]
    ToolInvocation(#[from] ToolError),

    #[error("import failed: {0}")]
    Import(#[from] ImportError),

    #[error("{0}")]
    EmptyModel(#[from] MeasureError),

    #[error("comparison failed: {}", .checks.join("; "))]
    ComparisonFailure { checks: Vec<String> },

    #[error("fixture error: {reason}")]
    Fixture { reason: String },

    #[error("result directory {path}: {message}")]
    ResultDir { path: String, message: String },
}

impl HarnessError {
    /// Short category label used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ToolInvocation(_) => "ToolInvocationError",
            Self::Import(_) => "ImportError",
            Self::EmptyModel(_) => "EmptyModelError",
            Self::ComparisonFailure { .. } => "ComparisonFailure",
            Self::Fixture { .. } => "FixtureError",
            Self::ResultDir { .. } => "ToolInvocationError",
        }
    }
}

// ── Model Builders ──────────────────────────────────────────────────────────

/// Axis-aligned box with corners `min` and `min + size`, as six quads.
///
/// Faces alternate winding so measurement code cannot rely on consistent
/// orientation.
pub fn box_model(min: [f64; 3], size: [f64; 3]) -> GeometryModel {
    let [x0, y0, z0] = min;
    let [x1, y1, z1] = [x0 + size[0], y0 + size[1], z0 + size[2]];
    let vertices = vec![
        Point3d::new(x0, y0, z0), // 0
        Point3d::new(x1, y0, z0), // 1
        Point3d::new(x1, y1, z0), // 2
        Point3d::new(x0, y1, z0), // 3
        Point3d::new(x0, y0, z1), // 4
        Point3d::new(x1, y0, z1), // 5
        Point3d::new(x1, y1, z1), // 6
        Point3d::new(x0, y1, z1), // 7
    ];
    let faces = vec![
        Face::new(vec![0, 3, 2, 1]), // z = z0
        Face::new(vec![4, 7, 6, 5]), // z = z1, inward
        Face::new(vec![0, 4, 7, 3]), // x = x0
        Face::new(vec![1, 5, 6, 2]), // x = x1, inward
        Face::new(vec![0, 1, 5, 4]), // y = y0
        Face::new(vec![3, 2, 6, 7]), // y = y1, inward
    ];
    GeometryModel::new(vertices, faces).expect("box indices are in range")
}

/// Unit cube at the origin: box ([0,0,0], [1,1,1]), area 6.
pub fn unit_cube() -> GeometryModel {
    box_model([0.0, 0.0, 0.0], [1.0, 1.0, 1.0])
}

/// Same geometry with every face fan-split into triangles.
pub fn triangulated(model: &GeometryModel) -> GeometryModel {
    let faces = model
        .faces()
        .iter()
        .flat_map(|f| {
            (1..f.len().saturating_sub(1)).map(move |i| Face {
                indices: vec![f.indices[0], f.indices[i], f.indices[i + 1]],
                material: f.material.clone(),
            })
        })
        .collect();
    GeometryModel::with_materials(model.vertices().to_vec(), faces, model.materials().to_vec())
        .expect("triangles reuse in-range indices")
}

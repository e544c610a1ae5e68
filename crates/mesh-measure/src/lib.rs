//! Geometric properties of an imported mesh and tolerant comparison.
//!
//! - [`bounding_box`] — axis-aligned box over the vertices faces reference
//! - [`surface_area`] — fan-triangulated polygon area sum
//! - [`tolerance`] — absolute-difference comparison of scalars, points and boxes
//! - [`MeshStats`] — counts used in logs and reports

pub mod area;
pub mod bounds;
pub mod stats;
pub mod tolerance;

pub use area::{face_area, surface_area, triangle_area};
pub use bounds::bounding_box;
pub use stats::MeshStats;
pub use tolerance::{
    is_equal, is_equal_box, is_equal_point, InvalidTolerance, Tolerance, DEFAULT_TOLERANCE,
};

/// Errors from property extraction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeasureError {
    #[error("model is empty: no face references any vertex")]
    EmptyModel,
}

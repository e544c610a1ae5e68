use mesh_types::{BoundingBox, GeometryModel};
use tracing::debug;

use crate::MeasureError;

/// Axis-aligned bounding box of the vertices referenced by at least one face.
///
/// Stray vertices no face uses are ignored. Face order and winding do not
/// affect the result.
pub fn bounding_box(model: &GeometryModel) -> Result<BoundingBox, MeasureError> {
    let mut bb = BoundingBox::empty();
    let mut referenced = 0usize;
    for face in model.faces() {
        for p in model.face_points(face) {
            bb.expand_to_include(&p);
            referenced += 1;
        }
    }

    if referenced == 0 {
        return Err(MeasureError::EmptyModel);
    }

    debug!(
        min = ?bb.min.to_array(),
        max = ?bb.max.to_array(),
        references = referenced,
        "computed bounding box"
    );
    Ok(bb)
}

//! Wavefront OBJ/MTL import and export for exported CAD meshes.
//!
//! Import is lenient: every line is classified into a fixed set of record
//! kinds and anything unrecognised is skipped. Material problems become
//! [`ValidationNote`]s; only geometry problems fail the import.

pub mod classify;
pub mod errors;
pub mod load;
pub mod save;

pub use classify::{classify_mtl_line, classify_obj_line, FaceRef, MtlRecord, ObjRecord};
pub use errors::{ExportError, ImportError, ValidationNote};
pub use load::{import_model, parse_mtl, parse_obj, ImportedModel, ParsedObj};
pub use save::{save_model, write_mtl, write_obj};

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use mesh_types::{Face, GeometryModel, Material, ModelError, Point3d};
use tracing::{debug, info, instrument, warn};

use crate::classify::{classify_mtl_line, classify_obj_line, MtlRecord, ObjRecord};
use crate::errors::{ImportError, ValidationNote};

/// Geometry records of an OBJ file with every face reference resolved.
#[derive(Debug, Clone)]
pub struct ParsedObj {
    pub vertices: Vec<Point3d>,
    pub faces: Vec<Face>,
    /// 1-based source line of each face, parallel to `faces`.
    pub face_lines: Vec<usize>,
    pub material_library: Option<String>,
    /// Non-fatal material findings from the geometry file itself.
    pub notes: Vec<ValidationNote>,
}

impl ParsedObj {
    /// Attach materials and build the immutable model.
    pub fn into_model(self, materials: Vec<Material>) -> Result<GeometryModel, ImportError> {
        let face_lines = self.face_lines;
        GeometryModel::with_materials(self.vertices, self.faces, materials).map_err(|e| match e {
            ModelError::IndexOutOfRange {
                face,
                index,
                vertex_count,
            } => ImportError::IndexOutOfRange {
                line: face_lines.get(face).copied().unwrap_or_default(),
                index: index as i64 + 1,
                vertex_count,
            },
        })
    }
}

/// A model plus the non-fatal findings collected while importing it.
#[derive(Debug, Clone)]
pub struct ImportedModel {
    pub model: GeometryModel,
    pub notes: Vec<ValidationNote>,
}

/// Parse the text of a geometry file.
///
/// Fails on malformed vertex/face records, on references outside the vertex
/// list, and when no face record exists.
pub fn parse_obj(text: &str) -> Result<ParsedObj, ImportError> {
    let mut vertices = Vec::new();
    // (line, [(as written, resolved 1-based)], material)
    let mut raw_faces: Vec<(usize, Vec<(i64, i64)>, Option<String>)> = Vec::new();
    let mut material: Option<String> = None;
    let mut material_library = None;
    let mut notes = Vec::new();
    let mut ignored = 0usize;

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        match classify_obj_line(line) {
            ObjRecord::Vertex(xyz) => vertices.push(Point3d::from_array(xyz)),
            ObjRecord::Face(refs) => {
                // Relative references count back from the vertices read so far.
                let seen = vertices.len() as i64;
                let resolved = refs
                    .iter()
                    .map(|r| {
                        let one_based = if r.vertex < 0 { seen + r.vertex + 1 } else { r.vertex };
                        (r.vertex, one_based)
                    })
                    .collect();
                raw_faces.push((line_no, resolved, material.clone()));
            }
            ObjRecord::UseMaterial(name) => material = Some(name),
            ObjRecord::ClearMaterial => {
                material = None;
                notes.push(ValidationNote::UnnamedMaterial { line: line_no });
            }
            ObjRecord::MaterialLibrary(name) => material_library = Some(name),
            ObjRecord::Malformed { reason } => {
                return Err(ImportError::Malformed {
                    line: line_no,
                    reason,
                })
            }
            ObjRecord::Unrecognized => ignored += 1,
        }
    }

    if raw_faces.is_empty() {
        return Err(ImportError::NoFaces);
    }

    let vertex_count = vertices.len();
    let mut faces = Vec::with_capacity(raw_faces.len());
    let mut face_lines = Vec::with_capacity(raw_faces.len());
    for (line, refs, material) in raw_faces {
        let mut indices = Vec::with_capacity(refs.len());
        for (written, one_based) in refs {
            if one_based < 1 || one_based as usize > vertex_count {
                return Err(ImportError::IndexOutOfRange {
                    line,
                    index: written,
                    vertex_count,
                });
            }
            indices.push(one_based as usize - 1);
        }
        faces.push(Face { indices, material });
        face_lines.push(line);
    }

    debug!(
        vertices = vertex_count,
        faces = faces.len(),
        ignored_lines = ignored,
        "parsed geometry"
    );
    Ok(ParsedObj {
        vertices,
        faces,
        face_lines,
        material_library,
        notes,
    })
}

/// Parse the text of a material file.
///
/// Never fails: unusable lines are reported as notes.
pub fn parse_mtl(text: &str) -> (Vec<Material>, Vec<ValidationNote>) {
    let mut materials: Vec<Material> = Vec::new();
    let mut notes = Vec::new();

    for (i, line) in text.lines().enumerate() {
        match classify_mtl_line(line) {
            MtlRecord::MaterialDeclaration(name) => materials.push(Material::new(name)),
            MtlRecord::Diffuse(rgb) => {
                if let Some(current) = materials.last_mut() {
                    current.diffuse = Some(rgb);
                }
            }
            MtlRecord::Malformed { reason } => notes.push(ValidationNote::MalformedMaterialLine {
                line: i + 1,
                reason,
            }),
            MtlRecord::Unrecognized => {}
        }
    }

    (materials, notes)
}

/// Materials faces use that `declared` does not contain, with face counts.
fn undeclared_materials(faces: &[Face], declared: &[Material]) -> Vec<ValidationNote> {
    let names: HashSet<&str> = declared.iter().map(|m| m.name.as_str()).collect();
    let mut missing: BTreeMap<&str, usize> = BTreeMap::new();
    for face in faces {
        if let Some(name) = face.material.as_deref() {
            if !names.contains(name) {
                *missing.entry(name).or_insert(0) += 1;
            }
        }
    }
    missing
        .into_iter()
        .map(|(name, faces)| ValidationNote::UndeclaredMaterial {
            name: name.to_string(),
            faces,
        })
        .collect()
}

/// Import an exported model from its material and geometry files.
///
/// Only the geometry file is required. Material problems are returned as
/// notes next to the model.
#[instrument(skip_all, fields(obj = %obj_path.display()))]
pub fn import_model(mtl_path: &Path, obj_path: &Path) -> Result<ImportedModel, ImportError> {
    let text = fs::read_to_string(obj_path).map_err(|e| ImportError::Unreadable {
        path: obj_path.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut parsed = parse_obj(&text)?;
    let mut notes = std::mem::take(&mut parsed.notes);

    let materials = match fs::read_to_string(mtl_path) {
        Ok(mtl_text) => {
            let (materials, mtl_notes) = parse_mtl(&mtl_text);
            notes.extend(mtl_notes);
            materials
        }
        Err(e) => {
            notes.push(ValidationNote::MaterialFileUnreadable {
                path: mtl_path.to_path_buf(),
                message: e.to_string(),
            });
            Vec::new()
        }
    };

    if let (Some(declared), Some(expected)) = (
        parsed.material_library.as_deref(),
        mtl_path.file_name().and_then(|n| n.to_str()),
    ) {
        if declared != expected {
            notes.push(ValidationNote::MaterialLibraryMismatch {
                declared: declared.to_string(),
                expected: expected.to_string(),
            });
        }
    }
    notes.extend(undeclared_materials(&parsed.faces, &materials));

    let model = parsed.into_model(materials)?;
    for note in &notes {
        warn!(%note, "material validation");
    }
    info!(
        vertices = model.vertex_count(),
        faces = model.face_count(),
        materials = model.materials().len(),
        notes = notes.len(),
        "imported model"
    );
    Ok(ImportedModel { model, notes })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

    #[test]
    fn one_based_to_zero_based() {
        let parsed = parse_obj(TRIANGLE).unwrap();
        assert_eq!(parsed.faces[0].indices, vec![0, 1, 2]);
        assert_eq!(parsed.face_lines, vec![4]);
    }

    #[test]
    fn relative_references() {
        let parsed = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\nv 5 5 5\nf -4 -1 -2\n").unwrap();
        assert_eq!(parsed.faces[0].indices, vec![0, 1, 2]);
        assert_eq!(parsed.faces[1].indices, vec![0, 3, 2]);
    }

    #[test]
    fn zero_reference_out_of_range() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n").unwrap_err();
        assert_eq!(
            err,
            ImportError::IndexOutOfRange {
                line: 4,
                index: 0,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn relative_reference_out_of_range_keeps_written_value() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nf 1 2 -3\n").unwrap_err();
        assert_eq!(
            err,
            ImportError::IndexOutOfRange {
                line: 3,
                index: -3,
                vertex_count: 2
            }
        );
    }

    #[test]
    fn bare_usemtl_clears_material_with_note() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl a\nf 1 2 3\nusemtl\nf 1 2 3\n";
        let parsed = parse_obj(text).unwrap();
        let mats: Vec<Option<&str>> = parsed.faces.iter().map(|f| f.material.as_deref()).collect();
        assert_eq!(mats, vec![Some("a"), None]);
        assert_eq!(parsed.notes, vec![ValidationNote::UnnamedMaterial { line: 6 }]);
    }

    #[test]
    fn active_material_applies_until_changed() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nusemtl a\nf 1 2 3\nf 3 2 1\nusemtl b\nf 1 3 2\n";
        let parsed = parse_obj(text).unwrap();
        let mats: Vec<Option<&str>> = parsed.faces.iter().map(|f| f.material.as_deref()).collect();
        assert_eq!(mats, vec![None, Some("a"), Some("a"), Some("b")]);
    }

    #[test]
    fn malformed_vertex_reports_line() {
        let err = parse_obj("v 0 0 0\nv 1 0\nf 1 1 1\n").unwrap_err();
        assert!(matches!(err, ImportError::Malformed { line: 2, .. }));
    }

    #[test]
    fn vertices_only_has_no_faces() {
        assert_eq!(parse_obj("v 0 0 0\nv 1 1 1\n").unwrap_err(), ImportError::NoFaces);
        assert_eq!(parse_obj("").unwrap_err(), ImportError::NoFaces);
    }

    #[test]
    fn mtl_collects_names_and_colours() {
        let (mats, notes) = parse_mtl("# header\nnewmtl red\nKd 1 0 0\nnewmtl plain\nnewmtl\n");
        assert_eq!(mats.len(), 2);
        assert_eq!(mats[0], Material::with_diffuse("red", [1.0, 0.0, 0.0]));
        assert_eq!(mats[1], Material::new("plain"));
        assert_eq!(
            notes,
            vec![ValidationNote::MalformedMaterialLine {
                line: 5,
                reason: "newmtl without material name".to_string()
            }]
        );
    }

    #[test]
    fn undeclared_material_counted_per_name() {
        let faces = vec![
            Face::with_material(vec![0, 1, 2], "ghost"),
            Face::with_material(vec![0, 1, 2], "red"),
            Face::with_material(vec![0, 2, 1], "ghost"),
            Face::new(vec![0, 1, 2]),
        ];
        let notes = undeclared_materials(&faces, &[Material::new("red")]);
        assert_eq!(
            notes,
            vec![ValidationNote::UndeclaredMaterial {
                name: "ghost".to_string(),
                faces: 2
            }]
        );
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use mesh_types::{GeometryModel, Material};
use tracing::debug;

use crate::errors::ExportError;

/// Whether `name` survives a `usemtl`/`newmtl` line unchanged: non-empty,
/// no surrounding whitespace, no comment marker or line break.
fn is_writable_name(name: &str) -> bool {
    !name.is_empty()
        && name.trim() == name
        && !name.contains(|c: char| matches!(c, '#' | '\n' | '\r'))
}

fn check_name(name: &str) -> Result<(), ExportError> {
    if is_writable_name(name) {
        Ok(())
    } else {
        Err(ExportError::InvalidMaterialName {
            name: name.to_string(),
        })
    }
}

/// Serialize a model as OBJ text.
///
/// Coordinates use the shortest representation that parses back to the same
/// `f64`, so a written model re-imports exactly. A `usemtl` line is emitted
/// whenever the face material changes; a bare `usemtl` switches back to no
/// material. Faces without indices are not written.
///
/// Fails when the text would not re-import as the same geometry: a
/// non-finite coordinate, a material name that does not fit on one line, or
/// no face left to write.
pub fn write_obj(model: &GeometryModel, mtl_file_name: Option<&str>) -> Result<String, ExportError> {
    let mut out = String::with_capacity(model.vertex_count() * 32 + model.face_count() * 24);
    out.push_str("# exported mesh\n");
    if let Some(lib) = mtl_file_name {
        out.push_str(&format!("mtllib {}\n", lib));
    }

    for (index, v) in model.vertices().iter().enumerate() {
        if !(v.x.is_finite() && v.y.is_finite() && v.z.is_finite()) {
            return Err(ExportError::NonFiniteVertex { index });
        }
        out.push_str(&format!("v {} {} {}\n", v.x, v.y, v.z));
    }

    let mut active: Option<&str> = None;
    let mut written = 0usize;
    for face in model.faces() {
        if face.is_empty() {
            continue;
        }
        let material = face.material.as_deref();
        if material != active {
            match material {
                Some(name) => {
                    check_name(name)?;
                    out.push_str(&format!("usemtl {}\n", name));
                }
                None => out.push_str("usemtl\n"),
            }
            active = material;
        }
        out.push('f');
        for &i in &face.indices {
            out.push_str(&format!(" {}", i + 1));
        }
        out.push('\n');
        written += 1;
    }

    if written == 0 {
        return Err(ExportError::NoFaces);
    }
    Ok(out)
}

/// Serialize materials as MTL text.
pub fn write_mtl(materials: &[Material]) -> Result<String, ExportError> {
    let mut out = String::from("# exported materials\n");
    for m in materials {
        check_name(&m.name)?;
        out.push_str(&format!("newmtl {}\n", m.name));
        // Non-finite colours would be dropped on re-import anyway.
        if let Some([r, g, b]) = m.diffuse.filter(|c| c.iter().all(|v| v.is_finite())) {
            out.push_str(&format!("Kd {} {} {}\n", r, g, b));
        }
    }
    Ok(out)
}

fn write_file(path: &Path, text: &str) -> Result<(), ExportError> {
    fs::write(path, text).map_err(|e| ExportError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write `<base_name>.obj` and `<base_name>.mtl` into `dir`.
///
/// Returns the (material, geometry) paths. Nothing is written when the
/// model cannot be serialized.
pub fn save_model(
    model: &GeometryModel,
    dir: &Path,
    base_name: &str,
) -> Result<(PathBuf, PathBuf), ExportError> {
    let mtl_name = format!("{}.mtl", base_name);
    let mtl_path = dir.join(&mtl_name);
    let obj_path = dir.join(format!("{}.obj", base_name));

    let obj_text = write_obj(model, Some(&mtl_name))?;
    let mtl_text = write_mtl(model.materials())?;
    write_file(&mtl_path, &mtl_text)?;
    write_file(&obj_path, &obj_text)?;

    debug!(
        obj = %obj_path.display(),
        vertices = model.vertex_count(),
        faces = model.face_count(),
        "saved model"
    );
    Ok((mtl_path, obj_path))
}

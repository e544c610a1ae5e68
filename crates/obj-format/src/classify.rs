//! Line classifier: one pure pattern match per input line.

/// A vertex reference as written in a face record.
///
/// `vertex` is the raw OBJ index: 1-based when positive, relative to the
/// vertices read so far when negative. Texture and normal references are
/// accepted but not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRef {
    pub vertex: i64,
}

/// Record kinds of a geometry (`.obj`) file.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjRecord {
    Vertex([f64; 3]),
    Face(Vec<FaceRef>),
    UseMaterial(String),
    /// `usemtl` without a name: faces that follow have no material.
    ClearMaterial,
    MaterialLibrary(String),
    /// Recognised keyword with an unusable payload.
    Malformed { reason: String },
    /// Comments, blank lines, and every keyword this importer does not use.
    Unrecognized,
}

/// Record kinds of a material (`.mtl`) file.
#[derive(Debug, Clone, PartialEq)]
pub enum MtlRecord {
    MaterialDeclaration(String),
    Diffuse([f64; 3]),
    Malformed { reason: String },
    Unrecognized,
}

/// Split off a trailing `#` comment and surrounding whitespace.
fn content(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => line[..pos].trim(),
        None => line.trim(),
    }
}

/// Keyword and the remainder of the line.
fn split_keyword(line: &str) -> Option<(&str, &str)> {
    let line = content(line);
    if line.is_empty() {
        return None;
    }
    match line.split_once(char::is_whitespace) {
        Some((kw, rest)) => Some((kw, rest.trim())),
        None => Some((line, "")),
    }
}

fn parse_triple(rest: &str) -> Result<[f64; 3], String> {
    let mut out = [0.0f64; 3];
    let mut tokens = rest.split_whitespace();
    for (i, slot) in out.iter_mut().enumerate() {
        let token = tokens
            .next()
            .ok_or_else(|| format!("expected 3 coordinates, found {}", i))?;
        *slot = token
            .parse::<f64>()
            .map_err(|e| format!("bad coordinate '{}': {}", token, e))?;
        if !slot.is_finite() {
            return Err(format!("non-finite coordinate '{}'", token));
        }
    }
    Ok(out)
}

fn parse_face_ref(token: &str) -> Result<FaceRef, String> {
    let vertex = token.split('/').next().unwrap_or_default();
    vertex
        .parse::<i64>()
        .map(|vertex| FaceRef { vertex })
        .map_err(|e| format!("bad vertex reference '{}': {}", token, e))
}

/// Classify one line of a geometry file.
pub fn classify_obj_line(line: &str) -> ObjRecord {
    let Some((keyword, rest)) = split_keyword(line) else {
        return ObjRecord::Unrecognized;
    };
    match keyword {
        "v" => match parse_triple(rest) {
            Ok(xyz) => ObjRecord::Vertex(xyz),
            Err(reason) => ObjRecord::Malformed { reason },
        },
        "f" => {
            let refs: Result<Vec<FaceRef>, String> =
                rest.split_whitespace().map(parse_face_ref).collect();
            match refs {
                Ok(refs) if refs.is_empty() => ObjRecord::Malformed {
                    reason: "face without vertex references".to_string(),
                },
                Ok(refs) => ObjRecord::Face(refs),
                Err(reason) => ObjRecord::Malformed { reason },
            }
        }
        "usemtl" if rest.is_empty() => ObjRecord::ClearMaterial,
        "usemtl" => ObjRecord::UseMaterial(rest.to_string()),
        "mtllib" if !rest.is_empty() => ObjRecord::MaterialLibrary(rest.to_string()),
        _ => ObjRecord::Unrecognized,
    }
}

/// Classify one line of a material file.
pub fn classify_mtl_line(line: &str) -> MtlRecord {
    let Some((keyword, rest)) = split_keyword(line) else {
        return MtlRecord::Unrecognized;
    };
    match keyword {
        "newmtl" if rest.is_empty() => MtlRecord::Malformed {
            reason: "newmtl without material name".to_string(),
        },
        "newmtl" => MtlRecord::MaterialDeclaration(rest.to_string()),
        // Colour is informational only; an unreadable one is skipped.
        "Kd" => parse_triple(rest)
            .map(MtlRecord::Diffuse)
            .unwrap_or(MtlRecord::Unrecognized),
        _ => MtlRecord::Unrecognized,
    }
}

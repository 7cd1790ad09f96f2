use crate::data::{Corner, Face, MeshData};
use glam::{Vec2, Vec3};
use meshview_common::MathError;
use std::path::Path;

/// Errors from mesh import.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: malformed {kind} entry: {text:?}")]
    Malformed {
        line: usize,
        kind: &'static str,
        text: String,
    },
    #[error("line {line}: face index {index} out of range (1-{max})")]
    IndexOutOfRange { line: usize, index: i64, max: usize },
    #[error("line {line}: face needs at least 3 corners")]
    ShortFace { line: usize },
    #[error("degenerate mesh: {0}")]
    Degenerate(#[from] MathError),
}

/// A face corner as written in the file: 1-based indices, not yet validated.
#[derive(Clone, Copy)]
struct RawCorner {
    position: i64,
    uv: Option<i64>,
}

/// Load a Wavefront-OBJ file. The mesh name defaults to the file stem unless
/// the file carries an `o` statement.
pub fn load_obj(path: impl AsRef<Path>) -> Result<MeshData, MeshError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mesh".into());
    let mesh = parse_obj(&stem, &text)?;
    tracing::info!(
        "loaded {} from {}: {} vertices, {} uvs, {} faces",
        mesh.name,
        path.display(),
        mesh.vertex_count(),
        mesh.uvs.len(),
        mesh.face_count()
    );
    Ok(mesh)
}

/// Parse OBJ text. Supported statements: `v`, `vt`, `f`, `o`; everything else
/// (normals, groups, materials) is skipped.
pub fn parse_obj(name: &str, text: &str) -> Result<MeshData, MeshError> {
    let mut mesh_name = name.to_string();
    let mut positions: Vec<Vec3> = Vec::new();
    let mut uvs: Vec<Vec2> = Vec::new();
    // Faces keep their 1-based indices until all vertex arrays are known.
    let mut raw_faces: Vec<(Vec<RawCorner>, usize)> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut tokens = trimmed.split_whitespace();
        match tokens.next() {
            Some("v") => {
                positions.push(Vec3::new(
                    parse_float(tokens.next(), line, "v", raw)?,
                    parse_float(tokens.next(), line, "v", raw)?,
                    parse_float(tokens.next(), line, "v", raw)?,
                ));
            }
            Some("vt") => {
                uvs.push(Vec2::new(
                    parse_float(tokens.next(), line, "vt", raw)?,
                    parse_float(tokens.next(), line, "vt", raw)?,
                ));
            }
            Some("f") => {
                let corners = tokens
                    .map(|token| parse_corner(token, line, raw))
                    .collect::<Result<Vec<_>, _>>()?;
                if corners.len() < 3 {
                    return Err(MeshError::ShortFace { line });
                }
                raw_faces.push((corners, line));
            }
            Some("o") => {
                if let Some(obj_name) = tokens.next() {
                    mesh_name = obj_name.to_string();
                }
            }
            // vn / g / s / usemtl / mtllib and friends
            _ => {}
        }
    }

    let mut faces = Vec::with_capacity(raw_faces.len());
    for (corners, line) in raw_faces {
        let face = corners
            .into_iter()
            .map(|corner| {
                let position = rebase_index(corner.position, positions.len(), line)?;
                let uv = corner
                    .uv
                    .map(|uv| rebase_index(uv, uvs.len(), line))
                    .transpose()?;
                Ok(Corner { position, uv })
            })
            .collect::<Result<Vec<_>, MeshError>>()?;
        faces.push(Face(face));
    }

    Ok(MeshData {
        name: mesh_name,
        positions,
        uvs,
        faces,
    })
}

fn parse_float(
    token: Option<&str>,
    line: usize,
    kind: &'static str,
    raw: &str,
) -> Result<f32, MeshError> {
    token
        .and_then(|t| t.parse::<f32>().ok())
        .ok_or_else(|| MeshError::Malformed {
            line,
            kind,
            text: raw.trim().to_string(),
        })
}

/// A face corner token: `v`, `v/vt`, `v/vt/vn`, or `v//vn`.
fn parse_corner(token: &str, line: usize, raw: &str) -> Result<RawCorner, MeshError> {
    let malformed = || MeshError::Malformed {
        line,
        kind: "f",
        text: raw.trim().to_string(),
    };
    let mut parts = token.split('/');
    let position = parts
        .next()
        .and_then(|p| p.parse::<i64>().ok())
        .ok_or_else(malformed)?;
    let uv = match parts.next() {
        None | Some("") => None,
        Some(p) => Some(p.parse::<i64>().map_err(|_| malformed())?),
    };
    Ok(RawCorner { position, uv })
}

/// Convert a 1-based file index to a 0-based array index, rejecting zero,
/// negative, and out-of-range values.
fn rebase_index(index: i64, max: usize, line: usize) -> Result<u32, MeshError> {
    if index < 1 || index as usize > max {
        return Err(MeshError::IndexOutOfRange { line, index, max });
    }
    Ok((index - 1) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const QUAD_OBJ: &str = "\
# a textured quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
f 1/1 2/2 3/3 4/4
";

    #[test]
    fn parses_positions_uvs_and_faces() {
        let mesh = parse_obj("quad", QUAD_OBJ).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.uvs.len(), 4);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.triangles().len(), 2);

        let face = &mesh.faces[0];
        assert_eq!(face.0[0], Corner::with_uv(0, 0));
        assert_eq!(face.0[3], Corner::with_uv(3, 3));
    }

    #[test]
    fn corner_forms_with_and_without_uv() {
        let mesh = parse_obj(
            "forms",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1 2/1 3//7\n",
        );
        // `3//7` carries a normal index, which is ignored; no vn data exists
        // and that must not be an error.
        let mesh = mesh.unwrap();
        let face = &mesh.faces[0];
        assert_eq!(face.0[0].uv, None);
        assert_eq!(face.0[1].uv, Some(0));
        assert_eq!(face.0[2].uv, None);
    }

    #[test]
    fn object_name_overrides_default() {
        let mesh = parse_obj("file_stem", "o frog\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.name, "frog");
    }

    #[test]
    fn unknown_statements_are_skipped() {
        let mesh = parse_obj(
            "skip",
            "mtllib scene.mtl\nvn 0 1 0\ns off\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        )
        .unwrap();
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn index_zero_is_rejected() {
        let err = parse_obj("bad", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n").unwrap_err();
        match err {
            MeshError::IndexOutOfRange { index: 0, line: 4, .. } => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let err = parse_obj("bad", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9\n").unwrap_err();
        match err {
            MeshError::IndexOutOfRange { index: 9, max: 3, .. } => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_vertex_is_rejected_with_line() {
        let err = parse_obj("bad", "v 0 0\n").unwrap_err();
        match err {
            MeshError::Malformed { line: 1, kind: "v", .. } => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn short_face_is_rejected() {
        let err = parse_obj("bad", "v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err();
        assert!(matches!(err, MeshError::ShortFace { line: 3 }));
    }

    #[test]
    fn load_from_file_uses_stem_as_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.obj");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();

        let mesh = load_obj(&path).unwrap();
        assert_eq!(mesh.name, "tri");
        assert_eq!(mesh.face_count(), 1);
    }
}

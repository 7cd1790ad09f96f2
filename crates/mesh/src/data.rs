use crate::obj::MeshError;
use glam::{Vec2, Vec3};
use meshview_common::checked_div;
use serde::{Deserialize, Serialize};

/// One corner of a face: a position index and an optional UV index, both
/// zero-based into the owning mesh's arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corner {
    pub position: u32,
    pub uv: Option<u32>,
}

impl Corner {
    pub fn new(position: u32) -> Self {
        Self { position, uv: None }
    }

    pub fn with_uv(position: u32, uv: u32) -> Self {
        Self {
            position,
            uv: Some(uv),
        }
    }
}

/// A polygon face as an ordered corner list (triangles and quads in practice).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face(pub Vec<Corner>);

/// Mesh data as imported: vertex positions, optional UVs, polygon faces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub name: String,
    pub positions: Vec<Vec3>,
    /// Empty when the source carries no texture coordinates.
    pub uvs: Vec<Vec2>,
    pub faces: Vec<Face>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty()
    }

    /// Fan-triangulate every face for GPU submission.
    pub fn triangles(&self) -> Vec<[Corner; 3]> {
        let mut tris = Vec::new();
        for face in &self.faces {
            let corners = &face.0;
            for i in 1..corners.len().saturating_sub(1) {
                tris.push([corners[0], corners[i], corners[i + 1]]);
            }
        }
        tris
    }

    /// Axis-aligned bounds, or `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        let mut min = first;
        let mut max = first;
        for p in &self.positions[1..] {
            min = min.min(*p);
            max = max.max(*p);
        }
        Some((min, max))
    }

    /// Mean vertex position. An empty mesh divides by zero and is an error.
    pub fn center(&self) -> Result<Vec3, MeshError> {
        let sum: Vec3 = self.positions.iter().copied().sum();
        Ok(checked_div(sum, self.positions.len() as f32)?)
    }

    /// Built-in unit cube: 8 vertices, 6 quad faces, per-face UVs.
    pub fn unit_cube() -> Self {
        let p = 0.5_f32;
        let positions = vec![
            Vec3::new(-p, -p, -p),
            Vec3::new(p, -p, -p),
            Vec3::new(p, p, -p),
            Vec3::new(-p, p, -p),
            Vec3::new(-p, -p, p),
            Vec3::new(p, -p, p),
            Vec3::new(p, p, p),
            Vec3::new(-p, p, p),
        ];
        let uvs = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        #[rustfmt::skip]
        let quads: [[u32; 4]; 6] = [
            [4, 5, 6, 7], // +Z
            [1, 0, 3, 2], // -Z
            [5, 1, 2, 6], // +X
            [0, 4, 7, 3], // -X
            [7, 6, 2, 3], // +Y
            [0, 1, 5, 4], // -Y
        ];
        let faces = quads
            .iter()
            .map(|q| {
                Face(
                    q.iter()
                        .enumerate()
                        .map(|(i, &position)| Corner::with_uv(position, i as u32))
                        .collect(),
                )
            })
            .collect();
        Self {
            name: "unit_cube".into(),
            positions,
            uvs,
            faces,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshview_common::MathError;

    #[test]
    fn unit_cube_shape() {
        let cube = MeshData::unit_cube();
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.face_count(), 6);
        assert!(cube.has_uvs());
        // Two triangles per quad face.
        assert_eq!(cube.triangles().len(), 12);
    }

    #[test]
    fn unit_cube_bounds_and_center() {
        let cube = MeshData::unit_cube();
        let (min, max) = cube.bounds().unwrap();
        assert_eq!(min, Vec3::splat(-0.5));
        assert_eq!(max, Vec3::splat(0.5));
        assert!(cube.center().unwrap().length() < 1e-6);
    }

    #[test]
    fn empty_mesh_center_is_an_error() {
        let empty = MeshData {
            name: "empty".into(),
            positions: vec![],
            uvs: vec![],
            faces: vec![],
        };
        assert!(empty.bounds().is_none());
        match empty.center() {
            Err(MeshError::Degenerate(MathError::DivisionByZero)) => {}
            other => panic!("expected division error, got {other:?}"),
        }
    }

    #[test]
    fn triangulation_fans_from_first_corner() {
        let face = Face(vec![
            Corner::new(0),
            Corner::new(1),
            Corner::new(2),
            Corner::new(3),
            Corner::new(4),
        ]);
        let mesh = MeshData {
            name: "pentagon".into(),
            positions: vec![Vec3::ZERO; 5],
            uvs: vec![],
            faces: vec![face],
        };
        let tris = mesh.triangles();
        assert_eq!(tris.len(), 3);
        assert!(tris.iter().all(|t| t[0].position == 0));
        assert_eq!(tris[2][2].position, 4);
    }
}

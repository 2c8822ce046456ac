//! OBJ mesh import.
//!
//! Converts externally parsed indexed triangle meshes into flat
//! (non-indexed) [`MeshData`], synthesizing flat face normals when the
//! source carries none.

use std::path::Path;

use crate::mesh::MeshData;
use crate::normals::triangle_normal;
use crate::vertex::{ModelVertex, OPAQUE_WHITE};

/// Per-corner attribute indices into an [`IndexedMesh`]'s arrays.
///
/// The normal and texcoord indices are independent of the other corners
/// of the same triangle and may each be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerIndex {
    pub position: u32,
    pub normal: Option<u32>,
    pub texcoord: Option<u32>,
}

/// An externally parsed triangulated mesh with separate per-corner
/// indices into each attribute array.
///
/// All indices must be in range for their arrays; out-of-range indices
/// are a programming error in the producing parser.
#[derive(Debug, Clone, Default)]
pub struct IndexedMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub texcoords: Vec<[f32; 2]>,
    /// Three entries per triangle.
    pub corners: Vec<CornerIndex>,
}

impl IndexedMesh {
    pub fn triangle_count(&self) -> usize {
        self.corners.len() / 3
    }
}

/// Errors reported by the mesh importer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ImportError {
    /// The parse succeeded but produced no triangles.
    #[error("mesh has no triangles")]
    EmptyMesh,
    /// The underlying parse failed (missing file, malformed content).
    #[error("failed to parse mesh: {0}")]
    ParseFailure(String),
}

/// Flattens an indexed mesh into renderable vertex data.
///
/// Every triangle gets three independent vertices (no shared-vertex
/// indexing). Corners without a texcoord sample the texture center
/// (0.5, 0.5) so untextured meshes avoid edge artifacts; vertex colors
/// are opaque white so the renderer's uniform tint applies unmodified.
/// When the mesh carries no normals at all, or a triangle's first corner
/// has none, the triangle receives a flat face normal shared by all
/// three of its corners; no smoothing happens across triangles.
pub fn flatten(mesh: &IndexedMesh) -> Result<MeshData, ImportError> {
    if mesh.triangle_count() == 0 {
        return Err(ImportError::EmptyMesh);
    }

    let mut vertices = Vec::with_capacity(mesh.triangle_count() * 3);
    for triangle in mesh.corners.chunks_exact(3) {
        for corner in triangle {
            vertices.push(ModelVertex {
                position: mesh.positions[corner.position as usize],
                normal: corner
                    .normal
                    .map(|i| mesh.normals[i as usize])
                    .unwrap_or([0.0; 3]),
                uv: corner
                    .texcoord
                    .map(|i| mesh.texcoords[i as usize])
                    .unwrap_or([0.5, 0.5]),
                color: OPAQUE_WHITE,
            });
        }

        if mesh.normals.is_empty() || triangle[0].normal.is_none() {
            let base = vertices.len() - 3;
            let normal = triangle_normal(
                vertices[base].position,
                vertices[base + 1].position,
                vertices[base + 2].position,
            );
            for vertex in &mut vertices[base..] {
                vertex.normal = normal;
            }
        }
    }

    Ok(MeshData::triangles(vertices).with_cull(true))
}

/// Loads a 3D model from an OBJ file.
///
/// Faces are triangulated during parsing and all objects in the file are
/// merged into a single mesh. Missing files and malformed content are
/// reported as [`ImportError::ParseFailure`]; a file without faces is
/// [`ImportError::EmptyMesh`]. The caller decides what to do on failure;
/// no default shape is substituted.
pub fn load_obj(path: impl AsRef<Path>) -> Result<MeshData, ImportError> {
    let path = path.as_ref();
    let options = tobj::LoadOptions {
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    };
    let (models, _materials) =
        tobj::load_obj(path, &options).map_err(|e| ImportError::ParseFailure(e.to_string()))?;

    let mut mesh = IndexedMesh::default();
    for model in &models {
        let m = &model.mesh;
        let base_pos = mesh.positions.len() as u32;
        let base_norm = mesh.normals.len() as u32;
        let base_uv = mesh.texcoords.len() as u32;
        mesh.positions
            .extend(m.positions.chunks_exact(3).map(|p| [p[0], p[1], p[2]]));
        mesh.normals
            .extend(m.normals.chunks_exact(3).map(|n| [n[0], n[1], n[2]]));
        mesh.texcoords
            .extend(m.texcoords.chunks_exact(2).map(|t| [t[0], t[1]]));

        let has_normals = m.normal_indices.len() == m.indices.len() && !m.normals.is_empty();
        let has_uvs = m.texcoord_indices.len() == m.indices.len() && !m.texcoords.is_empty();
        for (i, &pi) in m.indices.iter().enumerate() {
            mesh.corners.push(CornerIndex {
                position: base_pos + pi,
                normal: has_normals.then(|| base_norm + m.normal_indices[i]),
                texcoord: has_uvs.then(|| base_uv + m.texcoord_indices[i]),
            });
        }
    }

    let data = flatten(&mesh)?;
    tracing::info!(
        "Loaded OBJ model {:?} ({} triangles)",
        path,
        data.triangle_count()
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    fn corner(position: u32) -> CornerIndex {
        CornerIndex {
            position,
            normal: None,
            texcoord: None,
        }
    }

    #[test]
    fn test_flatten_synthesizes_flat_normal() {
        let mesh = IndexedMesh {
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            corners: vec![corner(0), corner(1), corner(2)],
            ..Default::default()
        };

        let data = flatten(&mesh).unwrap();
        assert!(data.solid);
        assert!(data.cull);
        assert_eq!(data.vertex_count(), 3);
        for v in &data.vertices {
            assert_relative_eq!(v.normal[0], 0.0);
            assert_relative_eq!(v.normal[1], 0.0);
            assert_relative_eq!(v.normal[2], 1.0);
            assert_eq!(v.uv, [0.5, 0.5]);
            assert_eq!(v.color, OPAQUE_WHITE);
        }
    }

    #[test]
    fn test_flatten_degenerate_triangle_keeps_zero_normal() {
        let mesh = IndexedMesh {
            positions: vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]],
            corners: vec![corner(0), corner(1), corner(2)],
            ..Default::default()
        };

        let data = flatten(&mesh).unwrap();
        for v in &data.vertices {
            assert_eq!(v.normal, [0.0; 3]);
            assert!(v.normal.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn test_flatten_keeps_parsed_normals_and_uvs() {
        let mesh = IndexedMesh {
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            normals: vec![[0.0, 1.0, 0.0]],
            texcoords: vec![[0.25, 0.75]],
            corners: (0..3)
                .map(|i| CornerIndex {
                    position: i,
                    normal: Some(0),
                    texcoord: Some(0),
                })
                .collect(),
        };

        let data = flatten(&mesh).unwrap();
        for v in &data.vertices {
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
            assert_eq!(v.uv, [0.25, 0.75]);
        }
    }

    #[test]
    fn test_flatten_empty_mesh_is_an_error() {
        let mesh = IndexedMesh::default();
        assert!(matches!(flatten(&mesh), Err(ImportError::EmptyMesh)));
    }

    #[test]
    fn test_load_obj_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triangle.obj");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "v 0 0 0").unwrap();
        writeln!(file, "v 1 0 0").unwrap();
        writeln!(file, "v 0 1 0").unwrap();
        writeln!(file, "f 1 2 3").unwrap();
        drop(file);

        let data = load_obj(&path).unwrap();
        assert_eq!(data.vertex_count(), 3);
        assert_eq!(data.triangle_count(), 1);
        for v in &data.vertices {
            assert_eq!(v.uv, [0.5, 0.5]);
            assert_relative_eq!(v.normal[2], 1.0);
        }
    }

    #[test]
    fn test_load_obj_missing_file_is_parse_failure() {
        let result = load_obj("no/such/model.obj");
        assert!(matches!(result, Err(ImportError::ParseFailure(_))));
    }

    #[test]
    fn test_load_obj_without_faces_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.obj");
        std::fs::write(&path, "v 0 0 0\nv 1 0 0\n").unwrap();

        assert!(matches!(load_obj(&path), Err(ImportError::EmptyMesh)));
    }
}

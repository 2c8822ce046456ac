//! Procedural shape constructors.
//!
//! Every constructor is pure and deterministic: identical parameters
//! always produce an identical vertex sequence, in content and order.
//! Shapes span canonical extents (the cube covers [-1, 1]^3, rects and
//! grids the unit square) and are placed by the caller's model
//! transform. Invalid parameters (zero subdivisions) are programming
//! errors, not runtime errors.

use std::f32::consts::TAU;

use crate::mesh::MeshData;
use crate::normals::triangle_normal;
use crate::vertex::{ModelVertex, OPAQUE_WHITE};

/// Corner positions of the unit cube, shared by `cube` and `wire_cube`.
const CUBE_CORNERS: [[i32; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 0, 1],
    [0, 0, 1],
    [0, 1, 0],
    [1, 1, 0],
    [1, 1, 1],
    [0, 1, 1],
];

/// Corner indices of each cube face, wound counter-clockwise as seen
/// from outside the cube.
const CUBE_FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [5, 4, 7, 6],
    [1, 5, 6, 2],
    [4, 0, 3, 7],
    [4, 5, 1, 0],
    [3, 2, 6, 7],
];

const CUBE_FACE_NORMALS: [[f32; 3]; 6] = [
    [0.0, -1.0, 0.0],
    [0.0, 1.0, 0.0],
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 0.0, -1.0],
    [0.0, 0.0, 1.0],
];

/// Triangulation order for a 4-corner face.
const QUAD_TRIANGLES: [usize; 6] = [0, 1, 2, 2, 3, 0];

/// Position of one cube face corner, mapped from the unit cube onto
/// [-1, 1].
fn cube_corner(face: usize, corner: usize) -> [f32; 3] {
    let p = CUBE_CORNERS[CUBE_FACES[face][corner]];
    [
        (p[0] as f32 - 0.5) * 2.0,
        (p[1] as f32 - 0.5) * 2.0,
        (p[2] as f32 - 0.5) * 2.0,
    ]
}

/// Solid cube spanning [-1, 1]^3: 6 faces, 2 triangles each.
pub fn cube() -> MeshData {
    let mut vertices = Vec::with_capacity(36);
    for face in 0..6 {
        for &corner in &QUAD_TRIANGLES {
            vertices.push(ModelVertex {
                position: cube_corner(face, corner),
                normal: CUBE_FACE_NORMALS[face],
                color: OPAQUE_WHITE,
                ..Default::default()
            });
        }
    }
    MeshData::triangles(vertices).with_cull(true)
}

/// Cube edges as a line list, one 8-vertex edge loop per face.
pub fn wire_cube() -> MeshData {
    const EDGES: [usize; 8] = [0, 1, 1, 2, 2, 3, 3, 0];
    let mut vertices = Vec::with_capacity(48);
    for face in 0..6 {
        for &corner in &EDGES {
            vertices.push(ModelVertex {
                position: cube_corner(face, corner),
                uv: [0.5, 0.5],
                color: OPAQUE_WHITE,
                ..Default::default()
            });
        }
    }
    MeshData::lines(vertices).with_cull(true)
}

/// Unit sphere subdivided into `stacks` latitude bands of `slices`
/// quads, two triangles per quad with no shared-vertex indexing.
/// Normals equal positions.
///
/// Both `slices` and `stacks` must be greater than zero.
pub fn sphere(slices: u32, stacks: u32) -> MeshData {
    let mut vertices = Vec::with_capacity((slices * stacks * 6) as usize);
    for stack in 0..stacks {
        let z0 = -1.0 + stack as f32 * 2.0 / stacks as f32;
        let z1 = -1.0 + (stack + 1) as f32 * 2.0 / stacks as f32;
        let r0 = (1.0 - z0 * z0).max(0.0).sqrt();
        let r1 = (1.0 - z1 * z1).max(0.0).sqrt();
        for slice in 0..slices {
            let a0 = slice as f32 * TAU / slices as f32;
            let a1 = (slice + 1) as f32 * TAU / slices as f32;
            let quad = [
                [r0 * a0.cos(), r0 * a0.sin(), z0],
                [r0 * a1.cos(), r0 * a1.sin(), z0],
                [r1 * a0.cos(), r1 * a0.sin(), z1],
                [r1 * a1.cos(), r1 * a1.sin(), z1],
                [r1 * a0.cos(), r1 * a0.sin(), z1],
                [r0 * a1.cos(), r0 * a1.sin(), z0],
            ];
            for position in quad {
                vertices.push(ModelVertex {
                    position,
                    normal: position,
                    color: OPAQUE_WHITE,
                    ..Default::default()
                });
            }
        }
    }
    MeshData::triangles(vertices).with_cull(true)
}

/// Reference grid over the unit square in the XY plane, as a line list
/// of `nx + 1` vertical and `ny + 1` horizontal lines.
///
/// Border lines are fully opaque; interior lines are drawn at reduced
/// opacity so the outline reads distinctly from the subdivisions.
/// `nx` and `ny` must be greater than zero.
pub fn grid(nx: u32, ny: u32) -> MeshData {
    const INTERIOR: [u8; 4] = [255, 255, 255, 160];
    let mut vertices = Vec::with_capacity(((nx + ny + 2) * 2) as usize);
    for i in 0..=nx {
        let color = if i == 0 || i == nx { OPAQUE_WHITE } else { INTERIOR };
        let x = i as f32 / nx as f32 - 0.5;
        for y in [-0.5, 0.5] {
            vertices.push(ModelVertex {
                position: [x, y, 0.0],
                color,
                ..Default::default()
            });
        }
    }
    for i in 0..=ny {
        let color = if i == 0 || i == ny { OPAQUE_WHITE } else { INTERIOR };
        let y = i as f32 / ny as f32 - 0.5;
        for x in [-0.5, 0.5] {
            vertices.push(ModelVertex {
                position: [x, y, 0.0],
                color,
                ..Default::default()
            });
        }
    }
    MeshData::lines(vertices)
}

/// Unit segment from (-0.5, 0, 0) to (0.5, 0, 0).
pub fn line() -> MeshData {
    let vertices = [-0.5f32, 0.5]
        .iter()
        .map(|&x| ModelVertex {
            position: [x, 0.0, 0.0],
            color: OPAQUE_WHITE,
            ..Default::default()
        })
        .collect();
    MeshData::lines(vertices)
}

/// Corner position and uv of the unit quad. V grows downward, so uv
/// (0, 0) sits at the top-left corner under the renderer's sampling
/// convention.
const RECT_POS_UV: [([f32; 2], [f32; 2]); 4] = [
    ([-0.5, -0.5], [0.0, 1.0]),
    ([0.5, -0.5], [1.0, 1.0]),
    ([0.5, 0.5], [1.0, 0.0]),
    ([-0.5, 0.5], [0.0, 0.0]),
];

/// Unit quad in the XY plane, facing +Z.
pub fn rect() -> MeshData {
    let mut vertices = Vec::with_capacity(6);
    for &corner in &QUAD_TRIANGLES {
        let (pos, uv) = RECT_POS_UV[corner];
        vertices.push(ModelVertex {
            position: [pos[0], pos[1], 0.0],
            normal: [0.0, 0.0, 1.0],
            uv,
            color: OPAQUE_WHITE,
        });
    }
    MeshData::triangles(vertices)
}

/// Outline of the unit quad as a line list.
pub fn wire_rect() -> MeshData {
    let mut vertices = Vec::with_capacity(8);
    for i in 0..8usize {
        let (pos, uv) = RECT_POS_UV[((i + 1) / 2) % 4];
        vertices.push(ModelVertex {
            position: [pos[0], pos[1], 0.0],
            uv,
            color: OPAQUE_WHITE,
            ..Default::default()
        });
    }
    MeshData::lines(vertices)
}

/// Cone with its apex at z = 1 and a radius-1 base ring at z = 0, built
/// from 8 radial segments: a base fan around the ring center and a side
/// fan from the apex. Each triangle carries its flat face normal.
pub fn cone() -> MeshData {
    const SEGMENTS: u32 = 8;
    let da = TAU / SEGMENTS as f32;
    let mut vertices = Vec::with_capacity((2 * 3 * SEGMENTS) as usize);
    for tip in 0..2u32 {
        for seg in 0..SEGMENTS {
            let center = [0.0, 0.0, tip as f32];
            let p1 = [(da * seg as f32).cos(), (da * seg as f32).sin(), 0.0];
            let p2 = [
                (da * (seg + 1) as f32).cos(),
                (da * (seg + 1) as f32).sin(),
                0.0,
            ];
            let normal = triangle_normal(center, p1, p2);
            for position in [center, p1, p2] {
                vertices.push(ModelVertex {
                    position,
                    normal,
                    color: OPAQUE_WHITE,
                    ..Default::default()
                });
            }
        }
    }
    MeshData::triangles(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constructors_are_deterministic() {
        assert_eq!(cube(), cube());
        assert_eq!(wire_cube(), wire_cube());
        assert_eq!(sphere(16, 8), sphere(16, 8));
        assert_eq!(grid(4, 5), grid(4, 5));
        assert_eq!(line(), line());
        assert_eq!(rect(), rect());
        assert_eq!(wire_rect(), wire_rect());
        assert_eq!(cone(), cone());
    }

    #[test]
    fn test_cube_vertex_census() {
        let mesh = cube();
        assert!(mesh.solid);
        assert!(mesh.cull);
        assert_eq!(mesh.vertex_count(), 36);
        for v in &mesh.vertices {
            for c in v.position {
                assert!((-1.0..=1.0).contains(&c));
            }
        }
        // Each signed unit axis appears as the normal of exactly one
        // face, i.e. 6 vertices.
        for axis in CUBE_FACE_NORMALS {
            let count = mesh.vertices.iter().filter(|v| v.normal == axis).count();
            assert_eq!(count, 6, "normal {axis:?}");
        }
    }

    #[test]
    fn test_cube_faces_wind_outward() {
        let mesh = cube();
        for triangle in mesh.vertices.chunks_exact(3) {
            let n = triangle_normal(
                triangle[0].position,
                triangle[1].position,
                triangle[2].position,
            );
            for i in 0..3 {
                assert_relative_eq!(n[i], triangle[0].normal[i], epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_wire_cube_is_line_list() {
        let mesh = wire_cube();
        assert!(!mesh.solid);
        assert!(mesh.cull);
        assert_eq!(mesh.vertex_count(), 48);
        assert!(mesh.vertices.iter().all(|v| v.uv == [0.5, 0.5]));
    }

    #[test]
    fn test_sphere_positions_are_normals_on_unit_radius() {
        let (slices, stacks) = (12, 6);
        let mesh = sphere(slices, stacks);
        assert!(mesh.solid);
        assert_eq!(mesh.vertex_count(), (slices * stacks * 6) as usize);
        for v in &mesh.vertices {
            let r = (v.position[0] * v.position[0]
                + v.position[1] * v.position[1]
                + v.position[2] * v.position[2])
                .sqrt();
            assert_relative_eq!(r, 1.0, epsilon = 1e-4);
            assert_eq!(v.normal, v.position);
        }
    }

    #[test]
    fn test_grid_border_and_interior_alpha() {
        let (nx, ny) = (4, 3);
        let mesh = grid(nx, ny);
        assert!(!mesh.solid);
        assert_eq!(mesh.vertex_count(), ((nx + ny + 2) * 2) as usize);
        let opaque = mesh.vertices.iter().filter(|v| v.color[3] == 255).count();
        let faded = mesh.vertices.iter().filter(|v| v.color[3] == 160).count();
        // Two border lines per direction, two vertices per line.
        assert_eq!(opaque, 8);
        assert_eq!(opaque + faded, mesh.vertex_count());
    }

    #[test]
    fn test_rect_uv_v_grows_downward() {
        let mesh = rect();
        assert!(mesh.solid);
        assert!(!mesh.cull);
        assert_eq!(mesh.vertex_count(), 6);
        for v in &mesh.vertices {
            let expected_v = if v.position[1] > 0.0 { 0.0 } else { 1.0 };
            assert_eq!(v.uv[1], expected_v);
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_wire_rect_closes_the_loop() {
        let mesh = wire_rect();
        assert!(!mesh.solid);
        assert_eq!(mesh.vertex_count(), 8);
        // Segment end points chain around the quad and back to the start.
        assert_eq!(mesh.vertices[0].position, mesh.vertices[7].position);
        for i in (1..7).step_by(2) {
            assert_eq!(mesh.vertices[i].position, mesh.vertices[i + 1].position);
        }
    }

    #[test]
    fn test_cone_has_flat_finite_normals() {
        let mesh = cone();
        assert!(mesh.solid);
        assert_eq!(mesh.vertex_count(), 48);
        for triangle in mesh.vertices.chunks_exact(3) {
            assert_eq!(triangle[0].normal, triangle[1].normal);
            assert_eq!(triangle[0].normal, triangle[2].normal);
            let len_sq: f32 = triangle[0].normal.iter().map(|c| c * c).sum();
            assert_relative_eq!(len_sq, 1.0, epsilon = 1e-4);
        }
        let apex = mesh
            .vertices
            .iter()
            .filter(|v| v.position == [0.0, 0.0, 1.0])
            .count();
        assert_eq!(apex, 8);
    }
}

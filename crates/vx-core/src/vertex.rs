//! Vertex layout shared by procedural shapes, imported meshes, and the
//! renderer's vertex buffers.

use bytemuck::{Pod, Zeroable};

/// Opaque white, the neutral color under the renderer's tint multiply.
pub const OPAQUE_WHITE: [u8; 4] = [255, 255, 255, 255];

/// One mesh vertex: position, normal, texture coordinates, and an RGBA
/// color with 0-255 channels.
///
/// The layout is GPU-ready (36 bytes, no padding) and uploaded verbatim.
/// Default is all zeroes, so unset normals and uvs stay at the zero
/// vector and unset colors at transparent black.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub color: [u8; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_size_matches_gpu_layout() {
        // position (12) + normal (12) + uv (8) + color (4)
        assert_eq!(std::mem::size_of::<ModelVertex>(), 36);
        assert_eq!(std::mem::align_of::<ModelVertex>(), 4);
    }

    #[test]
    fn test_default_vertex_is_zeroed() {
        let v = ModelVertex::default();
        assert_eq!(v.position, [0.0; 3]);
        assert_eq!(v.normal, [0.0; 3]);
        assert_eq!(v.uv, [0.0; 2]);
        assert_eq!(v.color, [0; 4]);
    }
}

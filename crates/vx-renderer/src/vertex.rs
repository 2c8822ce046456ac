//! GPU vertex layout for [`ModelVertex`].

use std::mem;

use vx_core::ModelVertex;

const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
    0 => Float32x3,  // position
    1 => Float32x3,  // normal
    2 => Float32x2,  // uv
    3 => Unorm8x4,   // color
];

/// Vertex buffer layout matching `ModelVertex`.
pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRIBUTES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_covers_the_whole_vertex() {
        let layout = vertex_layout();
        assert_eq!(layout.array_stride, 36);
        assert_eq!(layout.attributes.len(), 4);
        let last = layout.attributes.last().unwrap();
        assert_eq!(last.offset, 32);
        assert_eq!(last.format, wgpu::VertexFormat::Unorm8x4);
    }
}

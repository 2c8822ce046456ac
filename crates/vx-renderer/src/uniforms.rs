//! Per-draw uniform block and its GPU binding.

use bytemuck::{Pod, Zeroable};

use crate::context::RenderContext;

/// Uniform block layout; must match `ModelUniforms` in
/// shaders/model3d.wgsl.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub(crate) struct ModelUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    /// Inverse of the clip box matrix; identity when clipping is off.
    pub clip: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// xyz: light direction, w: unused.
    pub light_dir: [f32; 4],
    /// x: emissive weight, y: diffuse weight, z: grid overlay alpha,
    /// w: 1.0 when the clip volume applies.
    pub shading: [f32; 4],
}

/// Uniform buffer plus bind group owned by one model.
pub(crate) struct UniformBinding {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl UniformBinding {
    pub(crate) fn new(ctx: &RenderContext) -> Self {
        let buffer = ctx.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("Model3d Uniform Buffer"),
            size: std::mem::size_of::<ModelUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = ctx.device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Model3d Uniform Bind Group"),
            layout: ctx.uniform_layout(),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }
}

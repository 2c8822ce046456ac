//! Stateless draw routine for [`Model3d`] meshes.

use glam::{Mat4, Vec3};

use vx_core::{Box3, OPAQUE_WHITE};

use crate::context::RenderContext;
use crate::effects::RenderEffects;
use crate::model::{GpuError, Model3d};
use crate::pipeline::{PipelineCache, PipelineKey};
use crate::texture::Texture2d;
use crate::uniforms::ModelUniforms;

/// Emissive/diffuse weights used when a light direction is supplied.
const LIT_EMISSIVE: f32 = 0.2;
const LIT_DIFFUSE: f32 = 0.8;
const GRID_OVERLAY_ALPHA: f32 = 0.05;

/// Errors reported by the draw routine.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Gpu(#[from] GpuError),
}

/// Paint state for one draw call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawParams<'a> {
    pub model: Mat4,
    pub view: Mat4,
    pub proj: Mat4,
    /// Tint multiplied into per-vertex colors; opaque white when None.
    pub color: Option<[u8; 4]>,
    /// Texture bound for sampling; the context's white fallback when
    /// None, so untextured meshes use the same shader path.
    pub texture: Option<&'a Texture2d>,
    /// Diffuse light direction; the draw is fully emissive when None.
    pub light: Option<Vec3>,
    /// Clip volume; fragments outside it are discarded. Degenerate
    /// boxes disable clipping.
    pub clip: Option<Box3>,
    pub effects: RenderEffects,
}

impl<'a> DrawParams<'a> {
    pub fn new(model: Mat4, view: Mat4, proj: Mat4) -> Self {
        Self {
            model,
            view,
            proj,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: [u8; 4]) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_texture(mut self, texture: &'a Texture2d) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_light(mut self, light: Vec3) -> Self {
        self.light = Some(light);
        self
    }

    pub fn with_clip(mut self, clip: Box3) -> Self {
        self.clip = Some(clip);
        self
    }

    pub fn with_effects(mut self, effects: RenderEffects) -> Self {
        self.effects = effects;
        self
    }
}

/// Stateless model draw routine.
///
/// All fixed-function state is derived per call from the mesh flags and
/// effects; nothing persists between draws except the cached pipeline
/// variants. Each call encodes exactly one draw into its own render
/// pass over the given targets (loading their previous contents), so
/// draws from multiple models stack.
pub struct ModelRenderer {
    pipelines: PipelineCache,
}

impl ModelRenderer {
    pub fn new() -> Self {
        Self {
            pipelines: PipelineCache::new(),
        }
    }

    /// Draws `model` into `color_view`/`depth_view`, uploading its
    /// vertex buffer first if the mesh is dirty.
    pub fn render(
        &mut self,
        ctx: &RenderContext,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        model: &mut Model3d,
        params: &DrawParams<'_>,
    ) -> Result<(), RenderError> {
        model.upload(ctx)?;
        let gpu = match model.gpu() {
            Some(gpu) => gpu,
            // Upload either succeeded or returned above.
            None => return Err(GpuError::EmptyMesh.into()),
        };

        let uniforms = build_uniforms(model, params);
        ctx.write_buffer(&gpu.uniforms.buffer, 0, bytemuck::bytes_of(&uniforms));

        let texture = params.texture.unwrap_or_else(|| ctx.white_texture());
        let key = PipelineKey {
            solid: model.data().solid,
            cull: model.data().cull,
            see_back: params.effects.see_back,
            depth_test: !params.effects.no_depth_test,
        };
        let pipeline = self.pipelines.get(ctx, key);

        let mut encoder = ctx
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Model3d Draw"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Model3d Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(pipeline);
            pass.set_bind_group(0, &gpu.uniforms.bind_group, &[]);
            pass.set_bind_group(1, texture.bind_group(), &[]);
            pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
            pass.draw(0..model.vertex_count(), 0..1);
        }
        ctx.queue().submit([encoder.finish()]);
        Ok(())
    }
}

impl Default for ModelRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn build_uniforms(model: &Model3d, params: &DrawParams<'_>) -> ModelUniforms {
    let tint = params.color.unwrap_or(OPAQUE_WHITE);
    let color = [
        tint[0] as f32 / 255.0,
        tint[1] as f32 / 255.0,
        tint[2] as f32 / 255.0,
        tint[3] as f32 / 255.0,
    ];

    let (clip, clip_enabled) = match params.clip {
        Some(b) if !b.is_empty() => (b.to_matrix().inverse(), 1.0),
        _ => (Mat4::IDENTITY, 0.0),
    };

    let lit = params.light.is_some() && !params.effects.no_shading && model.data().solid;
    let (emissive, diffuse) = if lit {
        (LIT_EMISSIVE, LIT_DIFFUSE)
    } else {
        (1.0, 0.0)
    };

    let mut light_dir = params.light.unwrap_or(Vec3::Z);
    if params.effects.see_back {
        light_dir = -light_dir;
    }

    let grid_alpha = if params.effects.grid {
        GRID_OVERLAY_ALPHA
    } else {
        0.0
    };

    ModelUniforms {
        model: params.model.to_cols_array_2d(),
        view: params.view.to_cols_array_2d(),
        proj: params.proj.to_cols_array_2d(),
        clip: clip.to_cols_array_2d(),
        color,
        light_dir: [light_dir.x, light_dir.y, light_dir.z, 0.0],
        shading: [emissive, diffuse, grid_alpha, clip_enabled],
    }
}

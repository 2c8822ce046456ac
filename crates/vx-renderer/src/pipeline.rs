//! Pipeline variants for the model renderer.
//!
//! Blend, depth, cull, and topology state live inside the pipeline on
//! wgpu, so each combination the draw routine can request gets its own
//! lazily built, cached variant. Blending is always standard
//! non-premultiplied alpha-over.

use std::collections::HashMap;

use crate::context::RenderContext;
use crate::vertex::vertex_layout;

/// Fixed-function state selecting one pipeline variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    /// Triangle list when set, line list otherwise.
    pub solid: bool,
    /// Face culling enabled.
    pub cull: bool,
    /// Cull front faces instead of back faces.
    pub see_back: bool,
    /// Depth test (less-or-equal) and depth writes enabled.
    pub depth_test: bool,
}

/// Lazily built cache of the pipeline variants.
#[derive(Default)]
pub struct PipelineCache {
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
}

impl PipelineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pipeline for `key`, building it on first use.
    pub fn get(&mut self, ctx: &RenderContext, key: PipelineKey) -> &wgpu::RenderPipeline {
        self.pipelines
            .entry(key)
            .or_insert_with(|| build_pipeline(ctx, key))
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }
}

fn build_pipeline(ctx: &RenderContext, key: PipelineKey) -> wgpu::RenderPipeline {
    let layout = ctx
        .device()
        .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Model3d Pipeline Layout"),
            bind_group_layouts: &[ctx.uniform_layout(), ctx.texture_layout()],
            push_constant_ranges: &[],
        });

    let blend = wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    };

    let cull_mode = if key.cull {
        Some(if key.see_back {
            wgpu::Face::Front
        } else {
            wgpu::Face::Back
        })
    } else {
        None
    };

    ctx.device()
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Model3d Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: ctx.shader(),
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[vertex_layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: ctx.shader(),
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.color_format(),
                    blend: Some(blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: if key.solid {
                    wgpu::PrimitiveTopology::TriangleList
                } else {
                    wgpu::PrimitiveTopology::LineList
                },
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: ctx.depth_format(),
                depth_write_enabled: key.depth_test,
                depth_compare: if key.depth_test {
                    // Multi-pass overlays at equal depth still draw.
                    wgpu::CompareFunction::LessEqual
                } else {
                    wgpu::CompareFunction::Always
                },
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
}

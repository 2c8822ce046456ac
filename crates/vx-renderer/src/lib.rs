//! VX Editor Renderer
//!
//! wgpu-based rendering for the voxel editor's model-substitution
//! subsystem:
//!
//! - [`context::RenderContext`] - shared GPU resources (shader module,
//!   fallback texture, bind group layouts)
//! - [`model::Model3d`] - CPU vertices paired with their GPU buffer and
//!   dirty flag
//! - [`model_renderer::ModelRenderer`] - the single-draw-call paint
//!   routine
//! - [`registry::ModelRegistry`] - fixed-capacity id to model table
//!
//! # Example
//!
//! ```ignore
//! use vx_renderer::{DrawParams, Model3d, ModelRenderer, RenderContext};
//!
//! let ctx = RenderContext::new(device, queue, surface_format);
//! let mut renderer = ModelRenderer::new();
//! let mut model = Model3d::new(vx_core::shapes::cube());
//!
//! renderer.render(&ctx, &color_view, &depth_view, &mut model,
//!     &DrawParams::new(model_mat, view_mat, proj_mat))?;
//! ```

pub mod context;
pub mod effects;
pub mod model;
pub mod model_renderer;
pub mod pipeline;
pub mod registry;
pub mod texture;
mod uniforms;
pub mod vertex;

pub use context::RenderContext;
pub use effects::RenderEffects;
pub use model::{GpuError, Model3d};
pub use model_renderer::{DrawParams, ModelRenderer, RenderError};
pub use registry::{MAX_MODELS, ModelRegistry, RegistryError};
pub use texture::Texture2d;

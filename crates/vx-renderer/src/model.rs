//! GPU-resident mesh: CPU vertices paired with a lazily uploaded
//! vertex buffer.

use vx_core::MeshData;

use crate::context::RenderContext;
use crate::uniforms::UniformBinding;

/// GPU resource failures surfaced to the caller instead of aborting.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GpuError {
    #[error("mesh has no vertices to upload")]
    EmptyMesh,
    #[error("vertex buffer allocation failed: {0}")]
    BufferAllocation(String),
}

pub(crate) struct ModelGpu {
    pub vertex_buffer: wgpu::Buffer,
    pub uniforms: UniformBinding,
}

/// A drawable mesh owning both its CPU vertex storage and its GPU
/// buffer.
///
/// The two storages live and die together: dropping a Model3d releases
/// the wgpu buffer along with the vertex vector, and there is no way to
/// free one without the other. The model starts dirty; the renderer
/// uploads it on the first draw and again whenever the vertices are
/// touched through [`Model3d::data_mut`].
///
/// Uploads must not interleave with concurrent mutation of the same
/// model; mutate, then hand the model to the render thread.
pub struct Model3d {
    data: MeshData,
    gpu: Option<ModelGpu>,
    dirty: bool,
}

impl Model3d {
    pub fn new(data: MeshData) -> Self {
        Self {
            data,
            gpu: None,
            dirty: true,
        }
    }

    pub fn data(&self) -> &MeshData {
        &self.data
    }

    /// Mutable vertex access; marks the model dirty so the next draw
    /// re-uploads.
    pub fn data_mut(&mut self) -> &mut MeshData {
        self.dirty = true;
        &mut self.data
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn vertex_count(&self) -> u32 {
        self.data.vertex_count() as u32
    }

    pub(crate) fn gpu(&self) -> Option<&ModelGpu> {
        self.gpu.as_ref()
    }

    /// (Re)creates the vertex buffer from the full vertex array if the
    /// model is dirty; a clean model with a live buffer is a no-op.
    ///
    /// The dirty flag is cleared only after the allocation succeeds.
    pub fn upload(&mut self, ctx: &RenderContext) -> Result<(), GpuError> {
        if !self.dirty && self.gpu.is_some() {
            return Ok(());
        }
        if self.data.is_empty() {
            return Err(GpuError::EmptyMesh);
        }

        ctx.device()
            .push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        let vertex_buffer = ctx.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Model3d Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        if let Some(error) = pollster::block_on(ctx.device().pop_error_scope()) {
            return Err(GpuError::BufferAllocation(error.to_string()));
        }

        let uniforms = match self.gpu.take() {
            Some(prev) => prev.uniforms,
            None => UniformBinding::new(ctx),
        };
        self.gpu = Some(ModelGpu {
            vertex_buffer,
            uniforms,
        });
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vx_core::shapes;

    #[test]
    fn test_new_model_starts_dirty_without_gpu_state() {
        let model = Model3d::new(shapes::cube());
        assert!(model.is_dirty());
        assert!(model.gpu().is_none());
        assert_eq!(model.vertex_count(), 36);
    }

    #[test]
    fn test_mutation_marks_dirty() {
        let mut model = Model3d::new(shapes::line());
        // Simulate a clean model; uploads are exercised with a live
        // device elsewhere.
        model.dirty = false;
        model.data_mut().vertices.clear();
        assert!(model.is_dirty());
    }
}

//! Command-list trait for recorded per-frame work
//!
//! Commands are recorded CPU-side and executed later by the backend that
//! owns the command list. Recording is infallible; a bad binding surfaces
//! when the backend executes the list, not in the frame loop.

use crate::render::api::device::{BufferHandle, PipelineHandle, SamplerHandle};
use crate::render::api::texture::TextureView;

/// Recorded command interface implemented by rendering backends
pub trait GraphicsCommandList {
    /// Upload `data` into `buffer` starting at `offset_bytes`
    fn update_buffer(&mut self, buffer: BufferHandle, offset_bytes: usize, data: &[u8]);

    /// Bind a pipeline state
    fn set_pipeline(&mut self, pipeline: PipelineHandle);

    /// Bind a constant buffer to a shader slot
    fn set_constant_buffer(&mut self, slot: u32, buffer: BufferHandle);

    /// Bind a sampler state to a shader slot
    fn set_sampler(&mut self, slot: u32, sampler: SamplerHandle);

    /// Bind a texture view to a shader slot
    fn set_texture(&mut self, slot: u32, texture: &TextureView);

    /// Clear a texture slot binding
    fn unset_texture(&mut self, slot: u32);

    /// Bind a vertex buffer to an input slot
    fn set_vertex_buffer(&mut self, slot: u32, buffer: BufferHandle);

    /// Record an indexed, instanced draw
    ///
    /// `base_instance` offsets reads from per-instance vertex buffers so a
    /// batch window can live anywhere inside a larger instance buffer.
    fn draw_indexed_instanced(
        &mut self,
        index_buffer: BufferHandle,
        index_count: u32,
        instance_count: u32,
        start_index: u32,
        base_instance: u32,
    );
}

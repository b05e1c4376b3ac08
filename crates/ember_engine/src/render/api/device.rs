//! Device trait and opaque resource handles
//!
//! Resource creation goes through [`RenderDevice`]; recorded per-frame work
//! goes through [`super::GraphicsCommandList`]. Handles are opaque `u64`
//! values minted by the backend that owns the underlying objects.

use crate::render::api::pipeline::{PipelineDescription, SamplerDescription};
use crate::render::api::texture::{SurfaceFormat, TextureView};
use crate::render::RenderError;

/// Result type for backend operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Handle to a vertex, index, instance, or constant buffer owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u64);

/// Handle to a sampler state owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplerHandle(pub u64);

/// Handle to a compiled pipeline state owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineHandle(pub u64);

/// Handle to a texture or render target owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Resource-creation interface implemented by rendering backends
///
/// All methods are fallible; creation happens outside the frame loop. The
/// recorded draw path is the infallible [`super::GraphicsCommandList`].
pub trait RenderDevice {
    /// Create an immutable vertex buffer from raw bytes
    fn create_vertex_buffer(&mut self, data: &[u8], stride: usize) -> RenderResult<BufferHandle>;

    /// Create a dynamic vertex buffer with capacity for `element_count`
    /// elements of `stride` bytes, updated per frame via the command list
    fn create_dynamic_vertex_buffer(
        &mut self,
        element_count: usize,
        stride: usize,
    ) -> RenderResult<BufferHandle>;

    /// Create an immutable 16-bit index buffer
    fn create_index_buffer(&mut self, indices: &[u16]) -> RenderResult<BufferHandle>;

    /// Create a dynamic constant buffer of `size_bytes`
    fn create_constant_buffer(&mut self, size_bytes: usize) -> RenderResult<BufferHandle>;

    /// Create a sampler state
    fn create_sampler(&mut self, desc: &SamplerDescription) -> RenderResult<SamplerHandle>;

    /// Create a pipeline state
    fn create_pipeline(&mut self, desc: &PipelineDescription) -> RenderResult<PipelineHandle>;

    /// Create a 2D texture and return its view
    fn create_texture_2d(
        &mut self,
        width: u32,
        height: u32,
        format: SurfaceFormat,
    ) -> RenderResult<TextureView>;

    /// Create a render target and return its view
    fn create_render_target(
        &mut self,
        width: u32,
        height: u32,
        format: SurfaceFormat,
    ) -> RenderResult<TextureView>;
}

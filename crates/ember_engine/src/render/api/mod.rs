//! Backend abstraction for the rendering system
//!
//! This module defines the traits that rendering backends must implement
//! to provide a consistent interface for the high-level renderer, along
//! with the opaque handles and resource descriptions shared by all
//! backends.

pub mod command_list;
pub mod device;
pub mod pipeline;
pub mod texture;

pub use command_list::GraphicsCommandList;
pub use device::{
    BufferHandle, PipelineHandle, RenderDevice, RenderResult, SamplerHandle, TextureHandle,
};
pub use pipeline::{
    BlendState, CullMode, DepthStencilState, InputClass, InputElementFormat,
    InputLayoutDescription, PipelineDescription, PixelShaderMode, PrimitiveTopology,
    SamplerDescription, TextureAddressMode, TextureFilter,
};
pub use texture::{SurfaceFormat, TextureKind, TextureView};

//! GPU-packed per-sprite instance data

use crate::render::api::SurfaceFormat;

bitflags::bitflags! {
    /// Channel sourcing/compensation mask stored per instance
    ///
    /// Tells the pixel shader which channels to sample from the texture and
    /// which to synthesize, so single-channel formats render predictably.
    /// Compensated channels default to 1.0 in the shader.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ColorChannelFlags: u32 {
        /// Sample RGB from the texture
        const SOURCE_RGB = 1;
        /// Sample alpha from the texture
        const SOURCE_ALPHA = 2;
        /// Synthesize RGB as 1.0
        const COMPENSATE_RGB = 4;
        /// Synthesize alpha as 1.0
        const COMPENSATE_ALPHA = 8;
    }
}

impl ColorChannelFlags {
    /// Derive the channel mask for a texture's pixel format
    ///
    /// RGB-only formats cannot source alpha; alpha-only formats cannot
    /// source RGB. Everything else samples all four channels.
    pub fn for_format(format: SurfaceFormat) -> Self {
        match format {
            SurfaceFormat::R8UNorm
            | SurfaceFormat::R8G8UNorm
            | SurfaceFormat::R16G16Float
            | SurfaceFormat::R11G11B10Float
            | SurfaceFormat::R32Float => Self::SOURCE_RGB | Self::COMPENSATE_ALPHA,
            SurfaceFormat::A8UNorm => Self::SOURCE_ALPHA | Self::COMPENSATE_RGB,
            SurfaceFormat::R8G8B8A8UNorm
            | SurfaceFormat::R10G10B10A2UNorm
            | SurfaceFormat::B8G8R8A8UNorm
            | SurfaceFormat::R16G16B16A16Float
            | SurfaceFormat::R32G32B32A32Float
            | SurfaceFormat::BlockComp1UNorm
            | SurfaceFormat::BlockComp2UNorm
            | SurfaceFormat::BlockComp3UNorm => Self::SOURCE_RGB | Self::SOURCE_ALPHA,
        }
    }
}

/// One element of the per-instance vertex buffer
///
/// Five float4 lanes, matching the instance input slot declared by the
/// sprite pipeline. Copied by value into the batch queue.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteInstance {
    /// {xy} = position, {zw} = scale
    pub translation: [f32; 4],

    /// {xy} = source rect origin, {zw} = source rect size, in texels
    pub source_rect: [f32; 4],

    /// {xy} = origin pivot, {z} = rotation in radians, {w} = layer depth
    pub origin_rotation_depth: [f32; 4],

    /// RGBA color
    pub color: [f32; 4],

    /// {xy} = 1 / texture size, {z} = `ColorChannelFlags` bits, {w} = unused
    pub inverse_texture_size: [f32; 4],
}

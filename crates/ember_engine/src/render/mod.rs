//! # Rendering System
//!
//! The rendering core is a batched instance renderer recorded against
//! abstract device and command-list traits. Native GPU backends plug in
//! behind `api`; the crate ships a headless backend for tests and CI.
//!
//! ## Architecture
//!
//! - **api**: Backend traits, opaque resource handles, texture and pipeline
//!   descriptions
//! - **sprite**: Per-instance sprite data and the batching renderer
//! - **backends**: Backend implementations (currently headless)

pub mod api;
pub mod backends;
pub mod sprite;

pub use api::{
    BufferHandle, GraphicsCommandList, PipelineHandle, RenderDevice, RenderResult, SamplerHandle,
    SurfaceFormat, TextureHandle, TextureKind, TextureView,
};
pub use sprite::{SpriteBatch, SpriteBatchConfig, SpriteBatchSession, SpriteInstance};

use thiserror::Error;

/// Errors that can occur while creating rendering resources
///
/// The per-frame draw path never returns errors; malformed draws are
/// silently dropped so a visual glitch never becomes a crash.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A backend failed to create a GPU resource
    #[error("failed to create {kind} resource: {reason}")]
    ResourceCreation {
        /// Resource kind, e.g. "vertex buffer"
        kind: &'static str,
        /// Backend-specific failure description
        reason: String,
    },

    /// A buffer was created with no data
    #[error("buffer data must not be empty")]
    EmptyBufferData,

    /// A texture was created with a degenerate size
    #[error("invalid texture dimensions {width}x{height}")]
    InvalidTextureSize {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },
}

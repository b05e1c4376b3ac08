//! Texture views and surface formats

use crate::render::api::device::TextureHandle;

/// Pixel format of a texture surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SurfaceFormat {
    /// 8-bit single red channel
    R8UNorm,
    /// 8-bit red/green channels
    R8G8UNorm,
    /// 16-bit float red/green channels
    R16G16Float,
    /// Packed 11/11/10-bit float RGB
    R11G11B10Float,
    /// 32-bit float single red channel
    R32Float,
    /// 8-bit alpha-only
    A8UNorm,
    /// 8-bit RGBA
    R8G8B8A8UNorm,
    /// Packed 10/10/10/2-bit RGBA
    R10G10B10A2UNorm,
    /// 8-bit BGRA
    B8G8R8A8UNorm,
    /// 16-bit float RGBA
    R16G16B16A16Float,
    /// 32-bit float RGBA
    R32G32B32A32Float,
    /// BC1 block compression
    BlockComp1UNorm,
    /// BC2 block compression
    BlockComp2UNorm,
    /// BC3 block compression
    BlockComp3UNorm,
}

/// Whether a view refers to a plain texture or a render target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    /// A sampled 2D texture
    Texture2D,
    /// A render target sampled as a texture
    RenderTarget2D,
}

/// A copyable view of a 2D texture or render target
///
/// Carries the identity and the metadata the sprite renderer needs per
/// draw, so the hot path never calls back into the device. Two views refer
/// to the same texture exactly when their handles are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureView {
    handle: TextureHandle,
    kind: TextureKind,
    width: u32,
    height: u32,
    format: SurfaceFormat,
}

impl TextureView {
    /// Create a view from backend-supplied parts
    ///
    /// Backends call this when they mint textures; width and height must be
    /// non-zero.
    pub fn new(
        handle: TextureHandle,
        kind: TextureKind,
        width: u32,
        height: u32,
        format: SurfaceFormat,
    ) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self {
            handle,
            kind,
            width,
            height,
            format,
        }
    }

    /// Backend handle identifying the underlying texture
    pub fn handle(&self) -> TextureHandle {
        self.handle
    }

    /// Whether this is a plain texture or a render target
    pub fn kind(&self) -> TextureKind {
        self.kind
    }

    /// Texture width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Texture height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel format of the surface
    pub fn format(&self) -> SurfaceFormat {
        self.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_the_handle() {
        let a = TextureView::new(
            TextureHandle(7),
            TextureKind::Texture2D,
            64,
            64,
            SurfaceFormat::R8G8B8A8UNorm,
        );
        let b = TextureView::new(
            TextureHandle(7),
            TextureKind::Texture2D,
            64,
            64,
            SurfaceFormat::R8G8B8A8UNorm,
        );
        let c = TextureView::new(
            TextureHandle(8),
            TextureKind::Texture2D,
            64,
            64,
            SurfaceFormat::R8G8B8A8UNorm,
        );
        assert_eq!(a.handle(), b.handle());
        assert_ne!(a.handle(), c.handle());
    }
}

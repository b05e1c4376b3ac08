//! Math utilities and types
//!
//! Provides fundamental math types for 2D graphics and game development.

pub use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Axis-aligned integer rectangle, used for texture source regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Rectangle {
    /// Left edge in pixels
    pub x: i32,

    /// Top edge in pixels
    pub y: i32,

    /// Width in pixels
    pub width: i32,

    /// Height in pixels
    pub height: i32,
}

impl Rectangle {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check whether the rectangle covers zero area
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

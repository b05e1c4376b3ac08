//! RGBA color type used by the renderer

use crate::foundation::math::Vec4;

/// An RGBA color with floating point components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red component
    pub r: f32,

    /// Green component
    pub g: f32,

    /// Blue component
    pub b: f32,

    /// Alpha component
    pub a: f32,
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Opaque black
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Opaque red
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);

    /// Opaque green
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);

    /// Opaque blue
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Create a new color from components
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit components
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            1.0,
        )
    }

    /// Pack the color into a `Vec4` for GPU upload
    pub fn to_vector4(self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgb_u8() {
        let color = Color::from_rgb_u8(255, 0, 127);
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert_eq!(color.a, 1.0);
        assert!((color.b - 127.0 / 255.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_to_vector4() {
        let v = Color::new(0.1, 0.2, 0.3, 0.4).to_vector4();
        assert_eq!(v, Vec4::new(0.1, 0.2, 0.3, 0.4));
    }
}

//! Packed texture-atlas regions

use crate::foundation::math::{Rectangle, Vec2};

/// A sprite's region inside a packed texture atlas
///
/// `subrect` is where the trimmed sprite lives in the atlas; the offsets and
/// untrimmed size describe how it sat in its original image before packing
/// trimmed away transparent borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextureRegion {
    /// Trimmed sprite bounds inside the atlas
    pub subrect: Rectangle,

    /// Horizontal offset of the trimmed bounds in the untrimmed image
    pub x_offset: i32,

    /// Vertical offset of the trimmed bounds in the untrimmed image
    pub y_offset: i32,

    /// Untrimmed sprite width
    pub width: i32,

    /// Untrimmed sprite height
    pub height: i32,
}

impl TextureRegion {
    /// Create a region whose trimmed and untrimmed bounds coincide
    pub fn new(subrect: Rectangle) -> Self {
        Self {
            subrect,
            x_offset: 0,
            y_offset: 0,
            width: subrect.width,
            height: subrect.height,
        }
    }

    /// Origin offset that makes `origin_pivot` address the untrimmed image
    ///
    /// The batch renderer pivots sprites around `origin_pivot` in subrect
    /// units; this rebases the pivot so trimmed sprites rotate around the
    /// same point they would have before packing. Empty subrects yield zero.
    pub fn sprite_offset(&self, origin_pivot: Vec2) -> Vec2 {
        if self.subrect.width <= 0 || self.subrect.height <= 0 {
            return Vec2::zeros();
        }

        let region_size = Vec2::new(self.width as f32, self.height as f32);
        let base_offset = region_size.component_mul(&origin_pivot);

        let w = self.subrect.width as f32;
        let h = self.subrect.height as f32;

        let offset = Vec2::new(
            self.x_offset as f32,
            region_size.y - (self.y_offset as f32 + h),
        );
        (base_offset - offset).component_div(&Vec2::new(w, h))
    }
}

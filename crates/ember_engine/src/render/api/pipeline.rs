//! Pipeline, sampler, and input-layout descriptions
//!
//! Backends compile these descriptions into whatever native state objects
//! they use. Defaults match the sprite renderer's needs: non-premultiplied
//! alpha blending, no culling, no depth testing, linear-wrap sampling.

/// Fixed-function blend state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendState {
    /// No blending, source overwrites destination
    Opaque,
    /// Premultiplied alpha blending
    AlphaBlend,
    /// Additive blending
    Additive,
    /// Straight (non-premultiplied) alpha blending
    #[default]
    NonPremultiplied,
}

/// Triangle culling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullMode {
    /// Draw both faces
    #[default]
    None,
    /// Cull clockwise faces
    ClockwiseFace,
    /// Cull counter-clockwise faces
    CounterClockwiseFace,
}

/// Depth/stencil state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthStencilState {
    /// No depth testing or writing
    #[default]
    None,
    /// Depth test and write
    ReadWriteDepth,
    /// Depth test without writing
    ReadOnlyDepth,
}

/// Primitive assembly topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveTopology {
    /// Separate triangles
    #[default]
    TriangleList,
    /// Triangle strip
    TriangleStrip,
    /// Separate lines
    LineList,
}

/// Which built-in pixel shading path a pipeline uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelShaderMode {
    /// Plain textured sprites
    #[default]
    Default,
    /// Signed-distance-field rendering with smoothing/weight parameters
    DistanceField,
}

/// Texture sampling filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureFilter {
    /// Bilinear filtering
    #[default]
    Linear,
    /// Nearest-neighbor filtering
    Point,
}

/// Texture coordinate addressing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureAddressMode {
    /// Repeat the texture
    #[default]
    Wrap,
    /// Clamp to the edge texel
    Clamp,
    /// Mirror on each repeat
    Mirror,
}

/// Sampler state description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamplerDescription {
    /// Minification/magnification filter
    pub filter: TextureFilter,
    /// Addressing in u
    pub address_u: TextureAddressMode,
    /// Addressing in v
    pub address_v: TextureAddressMode,
}

impl SamplerDescription {
    /// Bilinear filtering with wrapping coordinates
    pub fn linear_wrap() -> Self {
        Self::default()
    }

    /// Bilinear filtering with clamped coordinates
    pub fn linear_clamp() -> Self {
        Self {
            filter: TextureFilter::Linear,
            address_u: TextureAddressMode::Clamp,
            address_v: TextureAddressMode::Clamp,
        }
    }

    /// Nearest-neighbor filtering with wrapping coordinates
    pub fn point_wrap() -> Self {
        Self {
            filter: TextureFilter::Point,
            ..Self::default()
        }
    }
}

/// Scalar format of one vertex input element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputElementFormat {
    /// Two 32-bit floats
    Float2,
    /// Three 32-bit floats
    Float3,
    /// Four 32-bit floats
    Float4,
}

/// How an input slot advances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputClass {
    /// Advance per vertex
    PerVertex,
    /// Advance once per `step_rate` instances
    PerInstance {
        /// Instances drawn per element
        step_rate: u32,
    },
}

/// One vertex-buffer input slot: a class plus its ordered elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSlot {
    /// Per-vertex or per-instance stepping
    pub class: InputClass,
    /// Ordered element formats within the slot
    pub elements: Vec<InputElementFormat>,
}

/// Vertex input layout across all bound slots
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputLayoutDescription {
    /// Input slots in binding order
    pub slots: Vec<InputSlot>,
}

impl InputLayoutDescription {
    /// Start building a layout
    pub fn builder() -> InputLayoutBuilder {
        InputLayoutBuilder { slots: Vec::new() }
    }
}

/// Chained builder for [`InputLayoutDescription`]
#[derive(Debug)]
pub struct InputLayoutBuilder {
    slots: Vec<InputSlot>,
}

impl InputLayoutBuilder {
    /// Open a new input slot
    pub fn slot(mut self, class: InputClass) -> Self {
        self.slots.push(InputSlot {
            class,
            elements: Vec::new(),
        });
        self
    }

    /// Append a float4 element to the current slot
    pub fn float4(mut self) -> Self {
        self.push(InputElementFormat::Float4);
        self
    }

    /// Append a float3 element to the current slot
    pub fn float3(mut self) -> Self {
        self.push(InputElementFormat::Float3);
        self
    }

    /// Append a float2 element to the current slot
    pub fn float2(mut self) -> Self {
        self.push(InputElementFormat::Float2);
        self
    }

    /// Finish the layout
    pub fn build(self) -> InputLayoutDescription {
        InputLayoutDescription { slots: self.slots }
    }

    fn push(&mut self, format: InputElementFormat) {
        debug_assert!(!self.slots.is_empty(), "open a slot before adding elements");
        if let Some(slot) = self.slots.last_mut() {
            slot.elements.push(format);
        }
    }
}

/// Full pipeline state description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineDescription {
    /// Blend state
    pub blend: BlendState,
    /// Cull mode
    pub cull: CullMode,
    /// Depth/stencil state
    pub depth_stencil: DepthStencilState,
    /// Primitive topology
    pub topology: PrimitiveTopology,
    /// Pixel shading path
    pub pixel_shader: PixelShaderMode,
    /// Vertex input layout
    pub input_layout: InputLayoutDescription,
}

impl Default for PipelineDescription {
    fn default() -> Self {
        Self {
            blend: BlendState::default(),
            cull: CullMode::default(),
            depth_stencil: DepthStencilState::default(),
            topology: PrimitiveTopology::default(),
            pixel_shader: PixelShaderMode::default(),
            input_layout: InputLayoutDescription::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_builder_orders_slots() {
        let layout = InputLayoutDescription::builder()
            .slot(InputClass::PerVertex)
            .float4()
            .slot(InputClass::PerInstance { step_rate: 1 })
            .float4()
            .float4()
            .build();

        assert_eq!(layout.slots.len(), 2);
        assert_eq!(layout.slots[0].class, InputClass::PerVertex);
        assert_eq!(layout.slots[0].elements.len(), 1);
        assert_eq!(
            layout.slots[1].class,
            InputClass::PerInstance { step_rate: 1 }
        );
        assert_eq!(layout.slots[1].elements.len(), 2);
    }

    #[test]
    fn test_defaults_match_sprite_pipeline() {
        let desc = PipelineDescription::default();
        assert_eq!(desc.blend, BlendState::NonPremultiplied);
        assert_eq!(desc.cull, CullMode::None);
        assert_eq!(desc.depth_stencil, DepthStencilState::None);
    }
}

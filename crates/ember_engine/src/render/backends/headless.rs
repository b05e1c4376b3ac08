//! Headless recording backend
//!
//! Implements the device and command-list traits without touching a GPU.
//! Resources are bookkeeping records keyed by slotmap; recorded commands
//! are kept in submission order for inspection.

use slotmap::{Key, KeyData, SlotMap};

use crate::render::api::{
    BufferHandle, GraphicsCommandList, PipelineDescription, PipelineHandle, RenderDevice,
    RenderResult, SamplerDescription, SamplerHandle, SurfaceFormat, TextureHandle, TextureKind,
    TextureView,
};
use crate::render::RenderError;

slotmap::new_key_type! {
    struct BufferKey;
    struct SamplerKey;
    struct PipelineKey;
    struct TextureKey;
}

/// What a headless buffer was created as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// Immutable vertex data
    Vertex,
    /// Dynamic per-instance vertex data
    DynamicVertex,
    /// Immutable 16-bit indices
    Index,
    /// Dynamic constant data
    Constant,
}

#[derive(Debug)]
struct BufferRecord {
    kind: BufferKind,
    capacity_bytes: usize,
}

#[derive(Debug)]
struct TextureRecord {
    kind: TextureKind,
    format: SurfaceFormat,
}

/// Device that mints bookkeeping resources instead of GPU objects
#[derive(Debug, Default)]
pub struct HeadlessDevice {
    buffers: SlotMap<BufferKey, BufferRecord>,
    samplers: SlotMap<SamplerKey, SamplerDescription>,
    pipelines: SlotMap<PipelineKey, PipelineDescription>,
    textures: SlotMap<TextureKey, TextureRecord>,
}

impl HeadlessDevice {
    /// Create an empty device
    pub fn new() -> Self {
        Self::default()
    }

    /// Capacity in bytes of a buffer, if the handle is live
    pub fn buffer_capacity(&self, handle: BufferHandle) -> Option<usize> {
        self.buffers
            .get(BufferKey::from(KeyData::from_ffi(handle.0)))
            .map(|record| record.capacity_bytes)
    }

    /// Kind of a buffer, if the handle is live
    pub fn buffer_kind(&self, handle: BufferHandle) -> Option<BufferKind> {
        self.buffers
            .get(BufferKey::from(KeyData::from_ffi(handle.0)))
            .map(|record| record.kind)
    }

    /// Description a pipeline was compiled from, if the handle is live
    pub fn pipeline_description(&self, handle: PipelineHandle) -> Option<&PipelineDescription> {
        self.pipelines
            .get(PipelineKey::from(KeyData::from_ffi(handle.0)))
    }

    /// Number of live textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Kind of a texture, if the handle is live
    pub fn texture_kind(&self, handle: TextureHandle) -> Option<TextureKind> {
        self.textures
            .get(TextureKey::from(KeyData::from_ffi(handle.0)))
            .map(|record| record.kind)
    }

    /// Format of a texture, if the handle is live
    pub fn texture_format(&self, handle: TextureHandle) -> Option<SurfaceFormat> {
        self.textures
            .get(TextureKey::from(KeyData::from_ffi(handle.0)))
            .map(|record| record.format)
    }

    fn insert_buffer(&mut self, kind: BufferKind, capacity_bytes: usize) -> BufferHandle {
        let key = self.buffers.insert(BufferRecord {
            kind,
            capacity_bytes,
        });
        BufferHandle(key.data().as_ffi())
    }

    fn insert_texture(
        &mut self,
        kind: TextureKind,
        width: u32,
        height: u32,
        format: SurfaceFormat,
    ) -> RenderResult<TextureView> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidTextureSize { width, height });
        }
        let key = self.textures.insert(TextureRecord { kind, format });
        Ok(TextureView::new(
            TextureHandle(key.data().as_ffi()),
            kind,
            width,
            height,
            format,
        ))
    }
}

impl RenderDevice for HeadlessDevice {
    fn create_vertex_buffer(&mut self, data: &[u8], stride: usize) -> RenderResult<BufferHandle> {
        if data.is_empty() || stride == 0 {
            return Err(RenderError::EmptyBufferData);
        }
        Ok(self.insert_buffer(BufferKind::Vertex, data.len()))
    }

    fn create_dynamic_vertex_buffer(
        &mut self,
        element_count: usize,
        stride: usize,
    ) -> RenderResult<BufferHandle> {
        if element_count == 0 || stride == 0 {
            return Err(RenderError::EmptyBufferData);
        }
        Ok(self.insert_buffer(BufferKind::DynamicVertex, element_count * stride))
    }

    fn create_index_buffer(&mut self, indices: &[u16]) -> RenderResult<BufferHandle> {
        if indices.is_empty() {
            return Err(RenderError::EmptyBufferData);
        }
        Ok(self.insert_buffer(BufferKind::Index, std::mem::size_of_val(indices)))
    }

    fn create_constant_buffer(&mut self, size_bytes: usize) -> RenderResult<BufferHandle> {
        if size_bytes == 0 {
            return Err(RenderError::EmptyBufferData);
        }
        Ok(self.insert_buffer(BufferKind::Constant, size_bytes))
    }

    fn create_sampler(&mut self, desc: &SamplerDescription) -> RenderResult<SamplerHandle> {
        let key = self.samplers.insert(*desc);
        Ok(SamplerHandle(key.data().as_ffi()))
    }

    fn create_pipeline(&mut self, desc: &PipelineDescription) -> RenderResult<PipelineHandle> {
        let key = self.pipelines.insert(desc.clone());
        Ok(PipelineHandle(key.data().as_ffi()))
    }

    fn create_texture_2d(
        &mut self,
        width: u32,
        height: u32,
        format: SurfaceFormat,
    ) -> RenderResult<TextureView> {
        self.insert_texture(TextureKind::Texture2D, width, height, format)
    }

    fn create_render_target(
        &mut self,
        width: u32,
        height: u32,
        format: SurfaceFormat,
    ) -> RenderResult<TextureView> {
        self.insert_texture(TextureKind::RenderTarget2D, width, height, format)
    }
}

/// One command recorded by a [`HeadlessCommandList`]
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCommand {
    /// Bytes uploaded into a buffer
    UpdateBuffer {
        /// Destination buffer
        buffer: BufferHandle,
        /// Destination offset in bytes
        offset_bytes: usize,
        /// Uploaded bytes
        data: Vec<u8>,
    },
    /// Pipeline binding
    SetPipeline(PipelineHandle),
    /// Constant-buffer binding
    SetConstantBuffer {
        /// Shader slot
        slot: u32,
        /// Bound buffer
        buffer: BufferHandle,
    },
    /// Sampler binding
    SetSampler {
        /// Shader slot
        slot: u32,
        /// Bound sampler
        sampler: SamplerHandle,
    },
    /// Texture binding
    SetTexture {
        /// Shader slot
        slot: u32,
        /// Bound texture
        texture: TextureHandle,
    },
    /// Texture slot cleared
    UnsetTexture {
        /// Shader slot
        slot: u32,
    },
    /// Vertex-buffer binding
    SetVertexBuffer {
        /// Input slot
        slot: u32,
        /// Bound buffer
        buffer: BufferHandle,
    },
    /// Indexed, instanced draw
    DrawIndexedInstanced {
        /// Index buffer used by the draw
        index_buffer: BufferHandle,
        /// Number of indices
        index_count: u32,
        /// Number of instances
        instance_count: u32,
        /// First index
        start_index: u32,
        /// First instance read from per-instance buffers
        base_instance: u32,
    },
}

/// Command list that records instead of executing
#[derive(Debug, Default)]
pub struct HeadlessCommandList {
    recorded: Vec<RecordedCommand>,
}

impl HeadlessCommandList {
    /// Create an empty command list
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands in submission order
    pub fn recorded(&self) -> &[RecordedCommand] {
        &self.recorded
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.recorded.clear();
    }
}

impl GraphicsCommandList for HeadlessCommandList {
    fn update_buffer(&mut self, buffer: BufferHandle, offset_bytes: usize, data: &[u8]) {
        self.recorded.push(RecordedCommand::UpdateBuffer {
            buffer,
            offset_bytes,
            data: data.to_vec(),
        });
    }

    fn set_pipeline(&mut self, pipeline: PipelineHandle) {
        self.recorded.push(RecordedCommand::SetPipeline(pipeline));
    }

    fn set_constant_buffer(&mut self, slot: u32, buffer: BufferHandle) {
        self.recorded
            .push(RecordedCommand::SetConstantBuffer { slot, buffer });
    }

    fn set_sampler(&mut self, slot: u32, sampler: SamplerHandle) {
        self.recorded
            .push(RecordedCommand::SetSampler { slot, sampler });
    }

    fn set_texture(&mut self, slot: u32, texture: &TextureView) {
        self.recorded.push(RecordedCommand::SetTexture {
            slot,
            texture: texture.handle(),
        });
    }

    fn unset_texture(&mut self, slot: u32) {
        self.recorded.push(RecordedCommand::UnsetTexture { slot });
    }

    fn set_vertex_buffer(&mut self, slot: u32, buffer: BufferHandle) {
        self.recorded
            .push(RecordedCommand::SetVertexBuffer { slot, buffer });
    }

    fn draw_indexed_instanced(
        &mut self,
        index_buffer: BufferHandle,
        index_count: u32,
        instance_count: u32,
        start_index: u32,
        base_instance: u32,
    ) {
        self.recorded.push(RecordedCommand::DrawIndexedInstanced {
            index_buffer,
            index_count,
            instance_count,
            start_index,
            base_instance,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_records_keep_kind_and_capacity() {
        let mut device = HeadlessDevice::new();
        let vertices = device
            .create_vertex_buffer(&[0u8; 64], 16)
            .expect("vertex buffer");
        let instances = device
            .create_dynamic_vertex_buffer(128, 80)
            .expect("instance buffer");

        assert_eq!(device.buffer_kind(vertices), Some(BufferKind::Vertex));
        assert_eq!(device.buffer_capacity(vertices), Some(64));
        assert_eq!(
            device.buffer_kind(instances),
            Some(BufferKind::DynamicVertex)
        );
        assert_eq!(device.buffer_capacity(instances), Some(128 * 80));
    }

    #[test]
    fn test_empty_resources_are_rejected() {
        let mut device = HeadlessDevice::new();
        assert!(device.create_vertex_buffer(&[], 16).is_err());
        assert!(device.create_index_buffer(&[]).is_err());
        assert!(device.create_constant_buffer(0).is_err());
        assert!(device
            .create_texture_2d(0, 64, SurfaceFormat::R8G8B8A8UNorm)
            .is_err());
    }

    #[test]
    fn test_textures_get_distinct_handles() {
        let mut device = HeadlessDevice::new();
        let a = device
            .create_texture_2d(16, 16, SurfaceFormat::R8G8B8A8UNorm)
            .expect("texture a");
        let b = device
            .create_texture_2d(16, 16, SurfaceFormat::R8G8B8A8UNorm)
            .expect("texture b");
        assert_ne!(a.handle(), b.handle());
        assert_eq!(device.texture_count(), 2);
        assert_eq!(
            device.texture_kind(a.handle()),
            Some(TextureKind::Texture2D)
        );
        assert_eq!(
            device.texture_format(b.handle()),
            Some(SurfaceFormat::R8G8B8A8UNorm)
        );
    }

    #[test]
    fn test_command_list_preserves_order() {
        let mut device = HeadlessDevice::new();
        let buffer = device.create_constant_buffer(16).expect("constant buffer");

        let mut commands = HeadlessCommandList::new();
        commands.update_buffer(buffer, 0, &[1, 2, 3]);
        commands.set_constant_buffer(0, buffer);

        assert_eq!(
            commands.recorded(),
            &[
                RecordedCommand::UpdateBuffer {
                    buffer,
                    offset_bytes: 0,
                    data: vec![1, 2, 3],
                },
                RecordedCommand::SetConstantBuffer { slot: 0, buffer },
            ]
        );
    }
}

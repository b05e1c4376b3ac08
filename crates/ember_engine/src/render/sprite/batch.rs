//! Instanced sprite batch renderer
//!
//! Draws are queued per texture and flushed as one instanced draw call per
//! contiguous texture run. The instance buffer is a fixed-capacity window:
//! each flush uploads the queue at `start_instance_location` and advances
//! the window, wrapping to the front once the buffer is exhausted.

use crate::foundation::color::Color;
use crate::foundation::math::{Mat4, Rectangle, Vec2};
use crate::render::api::{
    BlendState, BufferHandle, CullMode, GraphicsCommandList, InputClass, InputLayoutDescription,
    PipelineDescription, PipelineHandle, PixelShaderMode, RenderDevice, RenderResult,
    SamplerDescription, SamplerHandle, TextureView,
};
use crate::render::sprite::instance::{ColorChannelFlags, SpriteInstance};
use crate::render::sprite::region::TextureRegion;

/// Configuration for a [`SpriteBatch`]
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteBatchConfig {
    /// Hard capacity of the instance buffer, in sprites
    pub max_batch_size: usize,

    /// Initial queue capacity; the queue grows lazily up to the maximum
    pub min_batch_size: usize,

    /// Blend state compiled into the sprite pipeline
    pub blend: BlendState,

    /// Cull mode compiled into the sprite pipeline
    pub cull: CullMode,

    /// Sampler bound alongside the sprite texture
    pub sampler: SamplerDescription,

    /// Pixel shading path
    pub pixel_shader: PixelShaderMode,
}

impl Default for SpriteBatchConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 2048,
            min_batch_size: 128,
            blend: BlendState::NonPremultiplied,
            cull: CullMode::None,
            sampler: SamplerDescription::linear_wrap(),
            pixel_shader: PixelShaderMode::Default,
        }
    }
}

/// Smoothing parameters for distance-field rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceFieldParameters {
    /// Edge smoothing radius
    pub smoothing: f32,

    /// Distance threshold for the glyph edge
    pub weight: f32,
}

impl Default for DistanceFieldParameters {
    fn default() -> Self {
        Self {
            smoothing: 0.25,
            weight: 0.65,
        }
    }
}

/// Per-session constants uploaded at `begin`
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct SpriteBatchConstants {
    view_projection: [[f32; 4]; 4],

    // {x} = smoothing, {y} = weight, {zw} = unused
    distance_field: [f32; 4],
}

/// Batched instance renderer for 2D sprites
///
/// Owns the static quad geometry, the per-instance buffer, the session
/// constant buffer, and the compiled pipeline. Recording happens through a
/// [`SpriteBatchSession`] obtained from [`SpriteBatch::begin`]; the borrow
/// guard enforces the begin/draw/end ordering at compile time.
pub struct SpriteBatch {
    queue: Vec<SpriteInstance>,
    current_texture: Option<TextureView>,
    inverse_texture_size: Vec2,
    start_instance_location: usize,
    draw_call_count: u32,
    max_batch_size: usize,

    plane_vertices: BufferHandle,
    plane_indices: BufferHandle,
    instance_buffer: BufferHandle,
    constant_buffer: BufferHandle,
    pipeline: PipelineHandle,
    sampler: SamplerHandle,
}

impl SpriteBatch {
    /// Create a sprite batch and its GPU resources
    pub fn new(
        device: &mut dyn RenderDevice,
        config: SpriteBatchConfig,
    ) -> RenderResult<Self> {
        let max_batch_size = config.max_batch_size.max(config.min_batch_size).max(1);
        let min_batch_size = config.min_batch_size.min(max_batch_size);

        // Unit quad as position.xy + texcoord.zw, wound as two triangles.
        let quad: [[f32; 4]; 4] = [
            [0.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 0.0],
            [1.0, 1.0, 1.0, 0.0],
            [1.0, 0.0, 1.0, 1.0],
        ];
        let plane_vertices = device.create_vertex_buffer(
            bytemuck::cast_slice(&quad),
            std::mem::size_of::<[f32; 4]>(),
        )?;
        let plane_indices = device.create_index_buffer(&[0, 1, 2, 2, 3, 0])?;

        let instance_buffer = device
            .create_dynamic_vertex_buffer(max_batch_size, std::mem::size_of::<SpriteInstance>())?;
        let constant_buffer =
            device.create_constant_buffer(std::mem::size_of::<SpriteBatchConstants>())?;
        let sampler = device.create_sampler(&config.sampler)?;

        let input_layout = InputLayoutDescription::builder()
            .slot(InputClass::PerVertex)
            .float4()
            .slot(InputClass::PerInstance { step_rate: 1 })
            .float4()
            .float4()
            .float4()
            .float4()
            .float4()
            .build();
        let pipeline = device.create_pipeline(&PipelineDescription {
            blend: config.blend,
            cull: config.cull,
            pixel_shader: config.pixel_shader,
            input_layout,
            ..PipelineDescription::default()
        })?;

        log::debug!(
            "created sprite batch: capacity {} instances, {} byte stride",
            max_batch_size,
            std::mem::size_of::<SpriteInstance>()
        );

        Ok(Self {
            queue: Vec::with_capacity(min_batch_size),
            current_texture: None,
            inverse_texture_size: Vec2::zeros(),
            start_instance_location: 0,
            draw_call_count: 0,
            max_batch_size,
            plane_vertices,
            plane_indices,
            instance_buffer,
            constant_buffer,
            pipeline,
            sampler,
        })
    }

    /// Begin a batch session with the default shading constants
    pub fn begin<'a>(
        &'a mut self,
        commands: &'a mut dyn GraphicsCommandList,
        view_projection: Mat4,
    ) -> SpriteBatchSession<'a> {
        self.begin_session(commands, view_projection, None)
    }

    /// Begin a batch session with explicit distance-field parameters
    pub fn begin_with_distance_field<'a>(
        &'a mut self,
        commands: &'a mut dyn GraphicsCommandList,
        view_projection: Mat4,
        parameters: DistanceFieldParameters,
    ) -> SpriteBatchSession<'a> {
        self.begin_session(commands, view_projection, Some(parameters))
    }

    fn begin_session<'a>(
        &'a mut self,
        commands: &'a mut dyn GraphicsCommandList,
        view_projection: Mat4,
        distance_field: Option<DistanceFieldParameters>,
    ) -> SpriteBatchSession<'a> {
        let df = distance_field.unwrap_or_default();
        let constants = SpriteBatchConstants {
            // Shader-side constant buffers consume the matrix row-major.
            view_projection: view_projection.transpose().into(),
            distance_field: [df.smoothing, df.weight, 0.0, 0.0],
        };
        commands.update_buffer(self.constant_buffer, 0, bytemuck::bytes_of(&constants));

        self.queue.clear();
        self.current_texture = None;
        self.start_instance_location = 0;
        self.draw_call_count = 0;

        SpriteBatchSession {
            batch: self,
            commands,
        }
    }

    /// Number of instanced draw calls issued by the most recent session
    pub fn draw_call_count(&self) -> u32 {
        self.draw_call_count
    }

    /// Hard instance capacity of this batch
    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }
}

/// Borrow-scoped recording session for a [`SpriteBatch`]
///
/// Created by [`SpriteBatch::begin`]; consume with [`end`](Self::end) to
/// flush the final batch and release the command-list borrow.
pub struct SpriteBatchSession<'a> {
    batch: &'a mut SpriteBatch,
    commands: &'a mut dyn GraphicsCommandList,
}

impl SpriteBatchSession<'_> {
    /// Queue a sprite with centered pivot, unit scale, and no rotation
    pub fn draw(
        &mut self,
        texture: &TextureView,
        position: Vec2,
        source_rect: Rectangle,
        color: Color,
    ) {
        self.draw_ext(
            texture,
            position,
            source_rect,
            color,
            0.0,
            Vec2::new(0.5, 0.5),
            Vec2::new(1.0, 1.0),
            0.0,
        );
    }

    /// Queue a sprite from a packed atlas region
    ///
    /// The origin pivot addresses the untrimmed image, so trimmed sprites
    /// rotate around the point the artist authored.
    pub fn draw_region(
        &mut self,
        texture: &TextureView,
        position: Vec2,
        region: &TextureRegion,
        color: Color,
        rotation: f32,
        origin_pivot: Vec2,
        scale: Vec2,
    ) {
        let offset = region.sprite_offset(origin_pivot);
        self.draw_ext(
            texture,
            position,
            region.subrect,
            color,
            rotation,
            offset,
            scale,
            0.0,
        );
    }

    /// Queue a sprite with full control over every instance parameter
    ///
    /// Degenerate draws (empty source rect, zero scale component) are
    /// dropped silently; they contribute no geometry.
    pub fn draw_ext(
        &mut self,
        texture: &TextureView,
        position: Vec2,
        source_rect: Rectangle,
        color: Color,
        rotation: f32,
        origin_pivot: Vec2,
        scale: Vec2,
        layer_depth: f32,
    ) {
        if source_rect.width == 0 || source_rect.height == 0 {
            return;
        }
        if scale.x == 0.0 || scale.y == 0.0 {
            return;
        }

        if self.batch.start_instance_location + self.batch.queue.len()
            >= self.batch.max_batch_size
        {
            self.flush();
            if self.batch.start_instance_location >= self.batch.max_batch_size {
                // Instance window exhausted; wrap to the front of the buffer.
                self.batch.start_instance_location = 0;
            }
            if self.batch.start_instance_location + self.batch.queue.len()
                >= self.batch.max_batch_size
            {
                log::warn!(
                    "sprite batch capacity ({}) exhausted, dropping draw",
                    self.batch.max_batch_size
                );
                return;
            }
        }

        let flags = ColorChannelFlags::for_format(texture.format());

        self.compare_texture(texture);

        let instance = SpriteInstance {
            translation: [position.x, position.y, scale.x, scale.y],
            source_rect: [
                source_rect.x as f32,
                source_rect.y as f32,
                source_rect.width as f32,
                source_rect.height as f32,
            ],
            origin_rotation_depth: [origin_pivot.x, origin_pivot.y, rotation, layer_depth],
            color: [color.r, color.g, color.b, color.a],
            inverse_texture_size: [
                self.batch.inverse_texture_size.x,
                self.batch.inverse_texture_size.y,
                flags.bits() as f32,
                0.0,
            ],
        };
        self.batch.queue.push(instance);

        debug_assert!(
            self.batch.start_instance_location + self.batch.queue.len()
                <= self.batch.max_batch_size
        );
    }

    /// Drain the pending queue with one instanced draw call
    ///
    /// No-op when the queue is empty.
    pub fn flush(&mut self) {
        if self.batch.queue.is_empty() {
            return;
        }
        let Some(texture) = self.batch.current_texture else {
            debug_assert!(false, "non-empty queue without an active texture");
            return;
        };

        let batch = &mut *self.batch;
        let instance_offset_bytes =
            std::mem::size_of::<SpriteInstance>() * batch.start_instance_location;
        self.commands.update_buffer(
            batch.instance_buffer,
            instance_offset_bytes,
            bytemuck::cast_slice(&batch.queue),
        );

        self.commands.set_texture(0, &texture);
        self.commands.set_sampler(0, batch.sampler);
        self.commands.set_pipeline(batch.pipeline);
        self.commands.set_constant_buffer(0, batch.constant_buffer);
        self.commands.set_vertex_buffer(0, batch.plane_vertices);
        self.commands.set_vertex_buffer(1, batch.instance_buffer);

        self.commands.draw_indexed_instanced(
            batch.plane_indices,
            6,
            batch.queue.len() as u32,
            0,
            batch.start_instance_location as u32,
        );

        batch.start_instance_location += batch.queue.len();
        debug_assert!(batch.start_instance_location <= batch.max_batch_size);

        batch.queue.clear();
        batch.current_texture = None;
        batch.draw_call_count += 1;
    }

    /// Flush the final batch and close the session
    ///
    /// Unbinds the sprite texture slot if any draw call was issued.
    pub fn end(mut self) {
        self.flush();
        if self.batch.draw_call_count > 0 {
            self.commands.unset_texture(0);
        }
    }

    /// Latch a new active texture, flushing the batch the old one owns
    fn compare_texture(&mut self, texture: &TextureView) {
        let changed = self
            .batch
            .current_texture
            .map_or(true, |current| current.handle() != texture.handle());
        if !changed {
            return;
        }

        if self.batch.current_texture.is_some() {
            self.flush();
        }
        debug_assert!(self.batch.queue.is_empty());

        self.batch.current_texture = Some(*texture);

        let w = texture.width() as f32;
        let h = texture.height() as f32;
        self.batch.inverse_texture_size = Vec2::new(
            if w > 0.0 { 1.0 / w } else { 0.0 },
            if h > 0.0 { 1.0 / h } else { 0.0 },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backends::headless::{HeadlessCommandList, HeadlessDevice, RecordedCommand};
    use crate::render::api::SurfaceFormat;

    struct Fixture {
        device: HeadlessDevice,
        batch: SpriteBatch,
        texture_a: TextureView,
        texture_b: TextureView,
    }

    fn fixture_with_config(config: SpriteBatchConfig) -> Fixture {
        let mut device = HeadlessDevice::new();
        let batch = SpriteBatch::new(&mut device, config).expect("sprite batch creation");
        let texture_a = device
            .create_texture_2d(64, 64, SurfaceFormat::R8G8B8A8UNorm)
            .expect("texture a");
        let texture_b = device
            .create_texture_2d(128, 32, SurfaceFormat::R8G8B8A8UNorm)
            .expect("texture b");
        Fixture {
            device,
            batch,
            texture_a,
            texture_b,
        }
    }

    fn fixture() -> Fixture {
        fixture_with_config(SpriteBatchConfig::default())
    }

    fn rect() -> Rectangle {
        Rectangle::new(0, 0, 16, 16)
    }

    fn draw_calls(commands: &HeadlessCommandList) -> Vec<(u32, u32)> {
        commands
            .recorded()
            .iter()
            .filter_map(|command| match command {
                RecordedCommand::DrawIndexedInstanced {
                    instance_count,
                    base_instance,
                    ..
                } => Some((*instance_count, *base_instance)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_single_texture_run_is_one_draw_call() {
        let mut f = fixture();
        let mut commands = HeadlessCommandList::new();
        let mut session = f.batch.begin(&mut commands, Mat4::identity());
        for i in 0..5 {
            session.draw(
                &f.texture_a,
                Vec2::new(i as f32, 0.0),
                rect(),
                Color::WHITE,
            );
        }
        session.end();

        assert_eq!(draw_calls(&commands), vec![(5, 0)]);
        assert_eq!(f.batch.draw_call_count(), 1);
    }

    #[test]
    fn test_texture_switch_flushes_per_run() {
        let mut f = fixture();
        let mut commands = HeadlessCommandList::new();
        let mut session = f.batch.begin(&mut commands, Mat4::identity());
        session.draw(&f.texture_a, Vec2::zeros(), rect(), Color::WHITE);
        session.draw(&f.texture_a, Vec2::zeros(), rect(), Color::WHITE);
        session.draw(&f.texture_b, Vec2::zeros(), rect(), Color::WHITE);
        session.draw(&f.texture_a, Vec2::zeros(), rect(), Color::WHITE);
        session.end();

        // Three contiguous texture runs: A x2, B x1, A x1.
        assert_eq!(draw_calls(&commands), vec![(2, 0), (1, 2), (1, 3)]);
        assert_eq!(f.batch.draw_call_count(), 3);
    }

    #[test]
    fn test_degenerate_draws_never_enqueue() {
        let mut f = fixture();
        let mut commands = HeadlessCommandList::new();
        let mut session = f.batch.begin(&mut commands, Mat4::identity());
        session.draw(
            &f.texture_a,
            Vec2::zeros(),
            Rectangle::new(0, 0, 0, 16),
            Color::WHITE,
        );
        session.draw(
            &f.texture_a,
            Vec2::zeros(),
            Rectangle::new(0, 0, 16, 0),
            Color::WHITE,
        );
        session.draw_ext(
            &f.texture_a,
            Vec2::zeros(),
            rect(),
            Color::WHITE,
            0.0,
            Vec2::new(0.5, 0.5),
            Vec2::new(0.0, 1.0),
            0.0,
        );
        session.end();

        assert!(draw_calls(&commands).is_empty());
        assert_eq!(f.batch.draw_call_count(), 0);
    }

    #[test]
    fn test_end_without_draws_leaves_texture_slot_untouched() {
        let mut f = fixture();
        let mut commands = HeadlessCommandList::new();
        let session = f.batch.begin(&mut commands, Mat4::identity());
        session.end();

        assert!(!commands
            .recorded()
            .iter()
            .any(|c| matches!(c, RecordedCommand::UnsetTexture { .. })));
    }

    #[test]
    fn test_end_after_draws_unbinds_texture() {
        let mut f = fixture();
        let mut commands = HeadlessCommandList::new();
        let mut session = f.batch.begin(&mut commands, Mat4::identity());
        session.draw(&f.texture_a, Vec2::zeros(), rect(), Color::WHITE);
        session.end();

        assert!(commands
            .recorded()
            .iter()
            .any(|c| matches!(c, RecordedCommand::UnsetTexture { slot: 0 })));
    }

    #[test]
    fn test_manual_flush_advances_instance_window() {
        let mut f = fixture();
        let mut commands = HeadlessCommandList::new();
        let mut session = f.batch.begin(&mut commands, Mat4::identity());
        for _ in 0..3 {
            session.draw(&f.texture_a, Vec2::zeros(), rect(), Color::WHITE);
        }
        session.flush();
        for _ in 0..2 {
            session.draw(&f.texture_a, Vec2::zeros(), rect(), Color::WHITE);
        }
        session.end();

        assert_eq!(draw_calls(&commands), vec![(3, 0), (2, 3)]);
    }

    #[test]
    fn test_flush_on_empty_queue_is_noop() {
        let mut f = fixture();
        let mut commands = HeadlessCommandList::new();
        let mut session = f.batch.begin(&mut commands, Mat4::identity());
        session.flush();
        session.flush();
        session.end();

        assert!(draw_calls(&commands).is_empty());
    }

    #[test]
    fn test_capacity_overflow_flushes_and_keeps_overflow_draw() {
        let mut f = fixture();
        let mut commands = HeadlessCommandList::new();
        let mut session = f.batch.begin(&mut commands, Mat4::identity());
        for _ in 0..2049 {
            session.draw(&f.texture_a, Vec2::zeros(), rect(), Color::WHITE);
        }
        session.end();

        // Draw #2049 forces the flush of the first 2048 and survives into a
        // fresh queue at the front of the wrapped instance window.
        assert_eq!(draw_calls(&commands), vec![(2048, 0), (1, 0)]);
        assert_eq!(f.batch.draw_call_count(), 2);
    }

    #[test]
    fn test_small_capacity_wraps_window() {
        let mut f = fixture_with_config(SpriteBatchConfig {
            max_batch_size: 4,
            min_batch_size: 2,
            ..SpriteBatchConfig::default()
        });
        let mut commands = HeadlessCommandList::new();
        let mut session = f.batch.begin(&mut commands, Mat4::identity());
        for _ in 0..10 {
            session.draw(&f.texture_a, Vec2::zeros(), rect(), Color::WHITE);
        }
        session.end();

        assert_eq!(draw_calls(&commands), vec![(4, 0), (4, 0), (2, 0)]);
    }

    #[test]
    fn test_session_constants_uploaded_at_begin() {
        let mut f = fixture();
        let mut commands = HeadlessCommandList::new();
        let session = f.batch.begin(&mut commands, Mat4::identity());
        session.end();

        let uploaded = commands
            .recorded()
            .iter()
            .find_map(|command| match command {
                RecordedCommand::UpdateBuffer { data, .. } => Some(data.clone()),
                _ => None,
            })
            .expect("constant upload");
        let constants = bytemuck::pod_read_unaligned::<SpriteBatchConstants>(&uploaded);
        assert_eq!(constants.distance_field[0], 0.25);
        assert_eq!(constants.distance_field[1], 0.65);
    }

    #[test]
    fn test_instance_packing_includes_color_flags() {
        let mut f = fixture();
        let alpha_only = f
            .device
            .create_texture_2d(32, 32, SurfaceFormat::A8UNorm)
            .expect("alpha texture");

        let mut commands = HeadlessCommandList::new();
        let mut session = f.batch.begin(&mut commands, Mat4::identity());
        session.draw(&alpha_only, Vec2::new(1.0, 2.0), rect(), Color::RED);
        session.end();

        // The instance buffer is whatever ended up bound to vertex slot 1.
        let instance_buffer = commands
            .recorded()
            .iter()
            .find_map(|command| match command {
                RecordedCommand::SetVertexBuffer { slot: 1, buffer } => Some(*buffer),
                _ => None,
            })
            .expect("instance buffer binding");
        let instances: Vec<SpriteInstance> = commands
            .recorded()
            .iter()
            .filter_map(|command| match command {
                RecordedCommand::UpdateBuffer { buffer, data, .. } if *buffer == instance_buffer => {
                    Some(bytemuck::pod_read_unaligned::<SpriteInstance>(data))
                }
                _ => None,
            })
            .collect();
        assert_eq!(instances.len(), 1);

        let instance = instances[0];
        assert_eq!(instance.translation, [1.0, 2.0, 1.0, 1.0]);
        assert_eq!(instance.source_rect, [0.0, 0.0, 16.0, 16.0]);
        assert_eq!(instance.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(
            instance.inverse_texture_size[2] as u32,
            (ColorChannelFlags::SOURCE_ALPHA | ColorChannelFlags::COMPENSATE_RGB).bits()
        );
        assert_eq!(instance.inverse_texture_size[0], 1.0 / 32.0);
    }
}

//! # Ember Engine
//!
//! A 2D game engine core written in Rust.
//!
//! ## Features
//!
//! - **Batched Sprite Rendering**: Instanced sprite batching with automatic
//!   flush on texture change and capacity pressure
//! - **Skeletal Animation**: Blend-tree evaluation with clip sampling,
//!   parameterized blending, and cross-fade state transitions
//! - **Backend Agnostic**: Rendering is recorded against abstract device and
//!   command-list traits, with a headless backend for tests and CI
//! - **Asset Descriptions**: Animation graphs loadable from RON descriptions
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ember_engine::prelude::*;
//! use ember_engine::render::backends::{HeadlessCommandList, HeadlessDevice};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut device = HeadlessDevice::new();
//!     let mut batch = SpriteBatch::new(&mut device, SpriteBatchConfig::default())?;
//!
//!     let texture = device.create_texture_2d(256, 256, SurfaceFormat::R8G8B8A8UNorm)?;
//!
//!     let mut commands = HeadlessCommandList::new();
//!     let mut session = batch.begin(&mut commands, Mat4::identity());
//!     session.draw(&texture, Vec2::new(10.0, 20.0), Rectangle::new(0, 0, 32, 32), Color::WHITE);
//!     session.end();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;

pub mod animation;
pub mod assets;
pub mod render;

mod frame_loop_tests;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        animation::{
            AnimationClip, AnimationGraph, AnimationTime, Animator, Joint, JointIndex, JointPose,
            Skeleton, SkeletonPose, Skin,
        },
        assets::load_animation_graph,
        foundation::{
            color::Color,
            math::{Mat4, Rectangle, Vec2, Vec4},
        },
        render::{
            api::{GraphicsCommandList, RenderDevice, SurfaceFormat, TextureView},
            sprite::{SpriteBatch, SpriteBatchConfig},
        },
    };
}

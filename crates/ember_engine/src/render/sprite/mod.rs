//! # Batched Sprite Rendering
//!
//! Sprites are accumulated into a bounded per-texture queue and flushed to
//! the GPU as single instanced draw calls. A flush happens when the bound
//! texture changes, when the instance window fills, and at the end of a
//! session.
//!
//! ## Architecture
//!
//! - **SpriteInstance**: GPU-packed per-sprite data (one instance-buffer
//!   element)
//! - **SpriteBatch**: Owns the GPU resources and the pending queue
//! - **SpriteBatchSession**: Borrow-scoped Begin/End guard that records
//!   draws into a command list

pub mod batch;
pub mod instance;
pub mod region;

pub use batch::{DistanceFieldParameters, SpriteBatch, SpriteBatchConfig, SpriteBatchSession};
pub use instance::{ColorChannelFlags, SpriteInstance};
pub use region::TextureRegion;

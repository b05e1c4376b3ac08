//! Foundation utilities shared by every subsystem
//!
//! Math aliases, colors, and the animation time type live here so the
//! renderer and animation modules agree on the same primitives.

pub mod color;
pub mod math;
pub mod time;

pub use color::Color;
pub use math::{Mat4, Rectangle, Vec2, Vec4};
pub use time::AnimationTime;

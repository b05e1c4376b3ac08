//! Rendering backend implementations
//!
//! Native GPU backends live behind the `api` traits and are supplied by
//! platform crates. The built-in headless backend records commands without
//! a GPU, for unit tests, CI, and server-side use.

pub mod headless;

pub use headless::{HeadlessCommandList, HeadlessDevice, RecordedCommand};

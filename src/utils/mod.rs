//! Utility helpers: a generational arena, logging and frame profiling.

pub mod arena;
pub mod logging;
pub mod profiling;

pub use arena::{Arena, Handle};
pub use profiling::FrameProfile;

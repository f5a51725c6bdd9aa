//! Utility helpers: generational arena, scoped timers and frame profiling.

pub mod allocator;
pub mod logging;
pub mod profiling;

pub use allocator::{Arena, EntityId, GenerationalId};
pub use profiling::FrameProfiler;

//! Core types shared by the simulation contract, the bridge and the scene.

pub mod record;
pub mod types;

pub use record::ParticleRecord;
pub use types::{Axis, Extents, ForceParam, Transform, Tunable, TunableTarget};

//! Particle Bridge – keeps a 3D scene in lock-step with a particle simulation.
//!
//! The simulation owns a growable linear memory holding a flat array of
//! particle records. This crate reads that array in place through a
//! generation-checked view, mirrors every particle onto a scene proxy each
//! frame, keeps a wireframe boundary box congruent with the simulation's
//! corner-anchored volume, and routes live parameter edits back into the
//! simulation.

pub mod bridge;
pub mod config;
pub mod core;
pub mod error;
pub mod host;
pub mod memory;
pub mod scene;
pub mod session;
pub mod sim;
pub mod utils;

pub use glam::{Mat4, Quat, Vec3};

pub use bridge::{
    box_transform, BoundaryProxy, FrameBudget, FrameDriver, FrameReport, FrameScheduler,
    ParamChange, ParameterBridge, ParticleSlice, ParticleView, Throttle, VisualMirror,
};
pub use config::{ClockPolicy, SessionConfig, WorldConfig};
pub use crate::core::{Axis, Extents, ForceParam, ParticleRecord, Transform, Tunable, TunableTarget};
pub use error::{BridgeError, Result};
pub use host::SimulationHost;
pub use memory::{BufferHandle, LinearMemory, SharedMemory};
pub use scene::{
    Camera, CameraControls, ControlPanel, FixedControls, HeadlessRenderer, OrbitControls, Scene,
    SceneRenderer,
};
pub use session::{Command, CommandQueue, PumpSummary, Session};
pub use sim::ParticleWorld;

//! Simulation–view synchronisation: particle view, visual mirror, boundary
//! proxy, parameter bridge and the frame driver that ties them together.

pub mod boundary;
pub mod driver;
pub mod mirror;
pub mod params;
pub mod view;

pub use boundary::{box_transform, validate_extent, BoundaryProxy};
pub use driver::{
    DriverState, FrameBudget, FrameClock, FrameDriver, FrameReport, FrameScheduler, FrameTargets,
    Throttle,
};
pub use mirror::VisualMirror;
pub use params::{validate_force_param, ParamChange, ParameterBridge};
pub use view::{ParticleSlice, ParticleView};

//! Contract consumed from the external particle simulation.

use crate::core::types::{Axis, ForceParam};
use crate::error::Result;
use crate::memory::{BufferHandle, LinearMemory};

/// Minimum surface the bridge needs from a particle simulation.
///
/// The simulation owns its linear memory and is the only writer to the
/// particle array. `tick` and `resolve_collisions` may allocate and
/// therefore move memory; callers must re-query [`SimulationHost::particles_buffer`]
/// (or revalidate a view) after either of them.
pub trait SimulationHost {
    type Memory: LinearMemory;

    /// Number of particles; fixed for the lifetime of the simulation.
    fn particle_count(&self) -> usize;

    /// Where the particle array currently lives.
    fn particles_buffer(&self) -> BufferHandle;

    fn memory(&self) -> &Self::Memory;

    /// Advances simulation time by `dt`.
    fn tick(&mut self, dt: f32) -> Result<()>;

    /// Resolves collisions against the bounding volume for the current frame.
    fn resolve_collisions(&mut self) -> Result<()>;

    fn extent(&self, axis: Axis) -> f32;

    fn set_extent(&mut self, axis: Axis, value: f32);

    fn force_param(&self, param: ForceParam) -> f32;

    fn set_force_param(&mut self, param: ForceParam, value: f32);
}

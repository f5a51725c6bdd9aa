//! Reference particle simulation honouring the [`SimulationHost`](crate::host::SimulationHost) contract.

pub mod collision;
pub mod forces;
pub mod world;

pub use forces::{GravityForce, ParticleForce, RepulsionForce};
pub use world::ParticleWorld;

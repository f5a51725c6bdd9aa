use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::config::RECORD_STRIDE;

/// Fixed-layout particle record as it sits in the simulation's linear memory.
///
/// Record `i` occupies floats `i * 6 ..= i * 6 + 5`: position first, then
/// velocity.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleRecord {
    pub position: [f32; 3],
    pub velocity: [f32; 3],
}

const _: () = assert!(std::mem::size_of::<ParticleRecord>() == RECORD_STRIDE * 4);

impl ParticleRecord {
    /// Size of one record in bytes.
    pub const BYTES: usize = std::mem::size_of::<ParticleRecord>();

    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position: position.to_array(),
            velocity: velocity.to_array(),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        Vec3::from_array(self.velocity)
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position.to_array();
    }

    #[inline]
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity.to_array();
    }
}

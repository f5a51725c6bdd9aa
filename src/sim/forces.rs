use glam::Vec3;

use crate::core::record::ParticleRecord;

/// Force field contribution to a particle's velocity over one tick.
pub trait ParticleForce: Send + Sync {
    /// Velocity change for `particle`, read against the pre-tick `snapshot`.
    fn velocity_delta(&self, particle: &ParticleRecord, snapshot: &[ParticleRecord], dt: f32)
        -> Vec3;
}

/// Uniform downward acceleration along world Y.
#[derive(Debug, Clone, Copy)]
pub struct GravityForce {
    pub gravity: f32,
}

impl GravityForce {
    pub fn new(gravity: f32) -> Self {
        Self { gravity }
    }
}

impl ParticleForce for GravityForce {
    fn velocity_delta(&self, _particle: &ParticleRecord, _snapshot: &[ParticleRecord], dt: f32) -> Vec3 {
        Vec3::new(0.0, -self.gravity * dt, 0.0)
    }
}

/// Inverse-square repulsion between nearby particles.
///
/// Each neighbour within `cutoff` (Manhattan distance) pushes with
/// `strength / r²` along the offset normalised by its Manhattan length.
/// The impulse is not scaled by `dt`.
#[derive(Debug, Clone, Copy)]
pub struct RepulsionForce {
    pub strength: f32,
    pub cutoff: f32,
}

impl RepulsionForce {
    pub fn new(strength: f32, cutoff: f32) -> Self {
        Self { strength, cutoff }
    }
}

impl ParticleForce for RepulsionForce {
    fn velocity_delta(&self, particle: &ParticleRecord, snapshot: &[ParticleRecord], _dt: f32) -> Vec3 {
        if self.strength == 0.0 {
            return Vec3::ZERO;
        }

        let position = particle.position();
        let mut delta = Vec3::ZERO;
        for other in snapshot {
            let diff = position - other.position();
            if diff == Vec3::ZERO {
                continue;
            }

            let manhattan = diff.abs().element_sum();
            if manhattan > self.cutoff {
                continue;
            }

            let force = self.strength / diff.length_squared();
            delta += force * diff / manhattan;
        }
        delta
    }
}

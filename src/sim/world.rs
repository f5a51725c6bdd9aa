use glam::Vec3;
use log::{debug, info};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    config::{WorldConfig, RECORD_STRIDE},
    core::{
        record::ParticleRecord,
        types::{Axis, Extents, ForceParam},
    },
    error::Result,
    host::SimulationHost,
    memory::{BufferHandle, LinearMemory, SharedMemory},
    sim::{
        collision::reflect_into_box,
        forces::{GravityForce, ParticleForce, RepulsionForce},
    },
    utils::logging::ScopedTimer,
};

/// In-process particle simulation that keeps its particles in linear memory.
///
/// Every tick copies the particle array into scratch space allocated in the
/// same memory. When the scratch does not fit, memory grows and any view of
/// the particle array taken before the tick is stale.
pub struct ParticleWorld {
    memory: SharedMemory,
    particles_offset: usize,
    count: usize,
    origin: Vec3,
    edge: Vec3,
    gravity: GravityForce,
    repulsion: RepulsionForce,
    restitution: f32,
    parallel_enabled: bool,
}

impl ParticleWorld {
    pub fn new(config: &WorldConfig) -> Result<Self> {
        config.validate()?;

        let mut memory = SharedMemory::new(config.initial_pages, config.max_pages);
        let particles_offset = memory.alloc(
            config.particle_count * ParticleRecord::BYTES,
            std::mem::align_of::<ParticleRecord>(),
        )?;

        let edge = config.extents.to_vec3();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        for record in memory.records_mut(particles_offset, config.particle_count)? {
            let position = Vec3::new(
                rng.gen::<f32>() * edge.x,
                rng.gen::<f32>() * edge.y,
                rng.gen::<f32>() * edge.z,
            );
            let velocity = Vec3::new(rng.gen(), rng.gen(), rng.gen()) * config.max_initial_speed;
            *record = ParticleRecord::new(position, velocity);
        }

        info!(
            "particle world created: {} particles in {:?}, {} pages",
            config.particle_count,
            edge,
            memory.pages()
        );

        Ok(Self {
            memory,
            particles_offset,
            count: config.particle_count,
            origin: Vec3::ZERO,
            edge,
            gravity: GravityForce::new(config.gravity),
            repulsion: RepulsionForce::new(config.repulsion, config.interaction_cutoff),
            restitution: config.restitution,
            parallel_enabled: cfg!(feature = "parallel"),
        })
    }

    /// Enables or disables the rayon pass for pairwise forces.
    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.parallel_enabled = enabled && cfg!(feature = "parallel");
    }

    pub fn parallel_enabled(&self) -> bool {
        self.parallel_enabled
    }

    pub fn extents(&self) -> Extents {
        Extents::from_vec3(self.edge - self.origin)
    }

    pub fn particles(&self) -> Result<&[ParticleRecord]> {
        self.memory.records(self.particles_offset, self.count)
    }

    /// Mutable access to the particle array, for seeding scenarios.
    pub fn particles_mut(&mut self) -> Result<&mut [ParticleRecord]> {
        self.memory.records_mut(self.particles_offset, self.count)
    }
}

fn integrate(
    particles: &mut [ParticleRecord],
    snapshot: &[ParticleRecord],
    forces: &[&dyn ParticleForce],
    parallel: bool,
    dt: f32,
) {
    let step = |record: &mut ParticleRecord| {
        let current = &*record;
        let velocity = forces.iter().fold(current.velocity(), |v, force| {
            v + force.velocity_delta(current, snapshot, dt)
        });
        record.set_velocity(velocity);
        record.set_position(record.position() + velocity * dt);
    };

    #[cfg(feature = "parallel")]
    if parallel {
        particles.par_iter_mut().for_each(step);
        return;
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    particles.iter_mut().for_each(step);
}

impl SimulationHost for ParticleWorld {
    type Memory = SharedMemory;

    fn particle_count(&self) -> usize {
        self.count
    }

    fn particles_buffer(&self) -> BufferHandle {
        BufferHandle::new(
            self.particles_offset,
            self.count * RECORD_STRIDE,
            self.memory.generation(),
        )
    }

    fn memory(&self) -> &SharedMemory {
        &self.memory
    }

    fn tick(&mut self, dt: f32) -> Result<()> {
        let _timer = ScopedTimer::new("world::tick");
        let bytes = self.count * ParticleRecord::BYTES;
        let mark = self.memory.mark();
        let scratch = self
            .memory
            .alloc(bytes, std::mem::align_of::<ParticleRecord>())?;

        self.memory
            .bytes_mut()
            .copy_within(self.particles_offset..self.particles_offset + bytes, scratch);

        let (gravity, repulsion, parallel) = (self.gravity, self.repulsion, self.parallel_enabled);
        let forces: [&dyn ParticleForce; 2] = [&gravity, &repulsion];
        let result = self
            .memory
            .records_split_mut(self.particles_offset, scratch, self.count)
            .map(|(particles, snapshot)| integrate(particles, snapshot, &forces, parallel, dt));
        self.memory.release(mark);
        result
    }

    fn resolve_collisions(&mut self) -> Result<()> {
        let (origin, edge, restitution) = (self.origin, self.edge, self.restitution);
        let mut hits = 0usize;
        for record in self.particles_mut()? {
            if reflect_into_box(record, origin, edge, restitution) {
                hits += 1;
            }
        }
        if hits > 0 {
            debug!("{hits} particles bounced off the walls");
        }
        Ok(())
    }

    fn extent(&self, axis: Axis) -> f32 {
        self.edge[axis.component()] - self.origin[axis.component()]
    }

    fn set_extent(&mut self, axis: Axis, value: f32) {
        self.edge[axis.component()] = self.origin[axis.component()] + value;
    }

    fn force_param(&self, param: ForceParam) -> f32 {
        match param {
            ForceParam::Gravity => self.gravity.gravity,
            ForceParam::Repulsion => self.repulsion.strength,
        }
    }

    fn set_force_param(&mut self, param: ForceParam, value: f32) {
        match param {
            ForceParam::Gravity => self.gravity.gravity = value,
            ForceParam::Repulsion => self.repulsion.strength = value,
        }
    }
}

//! Typed, generation-checked view of the simulation's particle array.

use glam::Vec3;
use log::debug;

use crate::config::RECORD_STRIDE;
use crate::core::record::ParticleRecord;
use crate::error::{BridgeError, Result};
use crate::host::SimulationHost;
use crate::memory::{cast_records, BufferHandle, LinearMemory};

/// Non-owning handle to `count` particle records inside simulation memory.
///
/// The view remembers the memory generation it was taken at. Every read goes
/// through [`ParticleView::bind`], which refuses to overlay memory that has
/// moved since; [`ParticleView::revalidate`] re-derives the view from a fresh
/// buffer handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleView {
    handle: BufferHandle,
    count: usize,
}

impl ParticleView {
    /// Takes a view of the host's particle array as it is right now.
    pub fn acquire<H: SimulationHost>(host: &H) -> Result<Self> {
        Self::from_handle(host.memory(), host.particles_buffer(), host.particle_count())
    }

    /// Checks `handle` against `memory` and the record layout.
    ///
    /// Length, bounds and alignment violations are fatal configuration errors.
    pub fn from_handle<M: LinearMemory>(
        memory: &M,
        handle: BufferHandle,
        count: usize,
    ) -> Result<Self> {
        let expected = count * RECORD_STRIDE;
        if handle.len != expected {
            return Err(BridgeError::BufferLengthMismatch {
                expected,
                actual: handle.len,
            });
        }
        if handle.generation != memory.generation() {
            return Err(BridgeError::StaleView {
                view_generation: handle.generation,
                memory_generation: memory.generation(),
            });
        }
        cast_records(memory.bytes(), handle.offset, count)?;
        Ok(Self { handle, count })
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn handle(&self) -> BufferHandle {
        self.handle
    }

    pub fn generation(&self) -> u32 {
        self.handle.generation
    }

    pub fn is_current<M: LinearMemory>(&self, memory: &M) -> bool {
        self.handle.generation == memory.generation()
    }

    /// Re-derives the view if the host's memory or buffer moved.
    ///
    /// Must be called after any host operation that may allocate. Returns
    /// whether the view was re-acquired.
    pub fn revalidate<H: SimulationHost>(&mut self, host: &H) -> Result<bool> {
        let handle = host.particles_buffer();
        if handle == self.handle && self.is_current(host.memory()) {
            return Ok(false);
        }

        let fresh = Self::from_handle(host.memory(), handle, host.particle_count())?;
        if fresh.count != self.count {
            return Err(BridgeError::BufferLengthMismatch {
                expected: self.count * RECORD_STRIDE,
                actual: fresh.handle.len,
            });
        }
        debug!(
            "particle buffer moved: offset {} gen {} -> offset {} gen {}",
            self.handle.offset, self.handle.generation, fresh.handle.offset, fresh.handle.generation
        );
        *self = fresh;
        Ok(true)
    }

    /// Overlays the records onto `memory` without copying.
    pub fn bind<'m, M: LinearMemory>(&self, memory: &'m M) -> Result<ParticleSlice<'m>> {
        if !self.is_current(memory) {
            return Err(BridgeError::StaleView {
                view_generation: self.handle.generation,
                memory_generation: memory.generation(),
            });
        }
        let records = cast_records(memory.bytes(), self.handle.offset, self.count)?;
        Ok(ParticleSlice { records })
    }

    /// Position of particle `index`.
    pub fn position<M: LinearMemory>(&self, memory: &M, index: usize) -> Result<Vec3> {
        self.bind(memory)?
            .get(index)
            .ok_or(BridgeError::BufferOutOfBounds {
                offset: self.handle.offset + index * ParticleRecord::BYTES,
                bytes: ParticleRecord::BYTES,
                memory_bytes: self.handle.offset + self.count * ParticleRecord::BYTES,
            })
    }
}

/// Particle records bound to live memory for the duration of a borrow.
#[derive(Debug, Clone, Copy)]
pub struct ParticleSlice<'m> {
    records: &'m [ParticleRecord],
}

impl<'m> ParticleSlice<'m> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// # Panics
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn position(&self, index: usize) -> Vec3 {
        self.records[index].position()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.records.get(index).map(ParticleRecord::position)
    }

    pub fn positions(&self) -> impl ExactSizeIterator<Item = Vec3> + 'm {
        self.records.iter().map(ParticleRecord::position)
    }

    pub fn records(&self) -> &'m [ParticleRecord] {
        self.records
    }
}

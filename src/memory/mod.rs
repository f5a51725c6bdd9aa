//! Linear memory shared between the simulation (sole writer) and the bridge (reader).

pub mod shared;

pub use shared::{SharedMemory, PAGE_SIZE};

use serde::{Deserialize, Serialize};

use crate::core::record::ParticleRecord;
use crate::error::{BridgeError, Result};

/// Read access to a block of linear memory owned by the simulation.
///
/// `generation` must change whenever the backing allocation moves or is
/// resized. Views taken at an older generation are stale.
pub trait LinearMemory {
    fn bytes(&self) -> &[u8];
    fn generation(&self) -> u32;
}

/// Location of the particle array inside linear memory, as reported by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferHandle {
    /// Byte offset of record 0.
    pub offset: usize,
    /// Length of the array in `f32` elements.
    pub len: usize,
    /// Memory generation the handle was queried at.
    pub generation: u32,
}

impl BufferHandle {
    pub fn new(offset: usize, len: usize, generation: u32) -> Self {
        Self {
            offset,
            len,
            generation,
        }
    }
}

/// Typed overlay of `count` records starting at `offset`, without copying.
pub(crate) fn cast_records(bytes: &[u8], offset: usize, count: usize) -> Result<&[ParticleRecord]> {
    let range = record_range(bytes.len(), offset, count)?;
    bytemuck::try_cast_slice(&bytes[range]).map_err(|_| BridgeError::MisalignedBuffer { offset })
}

pub(crate) fn cast_records_mut(
    bytes: &mut [u8],
    offset: usize,
    count: usize,
) -> Result<&mut [ParticleRecord]> {
    let range = record_range(bytes.len(), offset, count)?;
    bytemuck::try_cast_slice_mut(&mut bytes[range])
        .map_err(|_| BridgeError::MisalignedBuffer { offset })
}

fn record_range(memory_bytes: usize, offset: usize, count: usize) -> Result<std::ops::Range<usize>> {
    if offset % std::mem::align_of::<ParticleRecord>() != 0 {
        return Err(BridgeError::MisalignedBuffer { offset });
    }
    let bytes = count * ParticleRecord::BYTES;
    match offset.checked_add(bytes) {
        Some(end) if end <= memory_bytes => Ok(offset..end),
        _ => Err(BridgeError::BufferOutOfBounds {
            offset,
            bytes,
            memory_bytes,
        }),
    }
}

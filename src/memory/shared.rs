use log::debug;

use crate::core::record::ParticleRecord;
use crate::error::{BridgeError, Result};
use crate::memory::{cast_records, cast_records_mut, LinearMemory};

/// Growth granularity, matching WebAssembly pages.
pub const PAGE_SIZE: usize = 64 * 1024;

const WORD_BYTES: usize = std::mem::size_of::<u64>();

/// Growable paged linear memory with a bump allocator.
///
/// Growing always moves the backing allocation and bumps the generation, so
/// any view taken before the growth is stale afterwards.
pub struct SharedMemory {
    // u64 words keep every 4-byte aligned offset valid for f32 access
    words: Vec<u64>,
    generation: u32,
    top: usize,
    max_pages: usize,
}

impl SharedMemory {
    pub fn new(initial_pages: usize, max_pages: usize) -> Self {
        let pages = initial_pages.max(1);
        Self {
            words: vec![0; pages * PAGE_SIZE / WORD_BYTES],
            generation: 0,
            top: 0,
            max_pages: max_pages.max(pages),
        }
    }

    pub fn pages(&self) -> usize {
        self.len_bytes() / PAGE_SIZE
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    pub fn len_bytes(&self) -> usize {
        self.words.len() * WORD_BYTES
    }

    /// Bytes handed out by the allocator so far.
    pub fn used_bytes(&self) -> usize {
        self.top
    }

    /// Grows memory by `delta_pages`, returning the previous page count.
    pub fn grow(&mut self, delta_pages: usize) -> Result<usize> {
        let old_pages = self.pages();
        let new_pages = old_pages + delta_pages;
        if new_pages > self.max_pages {
            return Err(BridgeError::MemoryExhausted {
                requested_pages: new_pages,
                max_pages: self.max_pages,
            });
        }

        let mut words = vec![0u64; new_pages * PAGE_SIZE / WORD_BYTES];
        words[..self.words.len()].copy_from_slice(&self.words);
        self.words = words;
        self.generation = self.generation.wrapping_add(1);
        debug!(
            "linear memory grew {old_pages} -> {new_pages} pages (generation {})",
            self.generation
        );
        Ok(old_pages)
    }

    /// Reserves `bytes` bytes aligned to `align`, growing memory when needed.
    pub fn alloc(&mut self, bytes: usize, align: usize) -> Result<usize> {
        let align = align.max(1);
        let start = self.top.div_ceil(align) * align;
        let end = start + bytes;
        if end > self.len_bytes() {
            let missing = end - self.len_bytes();
            self.grow(missing.div_ceil(PAGE_SIZE))?;
        }
        self.top = end;
        Ok(start)
    }

    /// Current allocator position, for a later [`SharedMemory::release`].
    pub fn mark(&self) -> usize {
        self.top
    }

    /// Frees everything allocated after `mark`. Memory never shrinks.
    pub fn release(&mut self, mark: usize) {
        self.top = self.top.min(mark);
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(&mut self.words)
    }

    pub fn records(&self, offset: usize, count: usize) -> Result<&[ParticleRecord]> {
        cast_records(self.bytes(), offset, count)
    }

    pub fn records_mut(&mut self, offset: usize, count: usize) -> Result<&mut [ParticleRecord]> {
        cast_records_mut(self.bytes_mut(), offset, count)
    }

    /// Borrows a writable block at `dst` and a read-only block at `src`.
    ///
    /// `src` must start at or after the end of the `dst` block.
    pub fn records_split_mut(
        &mut self,
        dst: usize,
        src: usize,
        count: usize,
    ) -> Result<(&mut [ParticleRecord], &[ParticleRecord])> {
        let dst_end = dst + count * ParticleRecord::BYTES;
        if src < dst_end {
            return Err(BridgeError::BufferOutOfBounds {
                offset: src,
                bytes: count * ParticleRecord::BYTES,
                memory_bytes: dst_end,
            });
        }
        let (head, tail) = self.bytes_mut().split_at_mut(src);
        let dst_records = cast_records_mut(head, dst, count)?;
        let src_records = cast_records(tail, 0, count).map_err(|err| match err {
            BridgeError::BufferOutOfBounds {
                bytes,
                memory_bytes,
                ..
            } => BridgeError::BufferOutOfBounds {
                offset: src,
                bytes,
                memory_bytes: memory_bytes + src,
            },
            other => other,
        })?;
        Ok((dst_records, src_records))
    }
}

impl LinearMemory for SharedMemory {
    fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.words)
    }

    fn generation(&self) -> u32 {
        self.generation
    }
}

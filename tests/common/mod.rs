#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use particle_bridge::*;

/// Shared, ordered record of collaborator calls.
pub type CallLog = Rc<RefCell<Vec<&'static str>>>;

pub fn call_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Scripted simulation over a real `SharedMemory`.
///
/// Positions only move when `drift` is set; every contract call is logged.
pub struct MockHost {
    pub memory: SharedMemory,
    pub offset: usize,
    pub count: usize,
    pub extents: Extents,
    pub gravity: f32,
    pub repulsion: f32,
    /// Added to every position on each tick.
    pub drift: Vec3,
    /// Applied to the extents at the end of each tick.
    pub tick_extent_change: Option<(Axis, f32)>,
    /// Grow memory by one page on each tick.
    pub grow_on_tick: bool,
    /// Move the particle array to a fresh allocation on each tick.
    pub relocate_on_tick: bool,
    pub log: CallLog,
}

impl MockHost {
    /// `count` zeroed particles in a 100^3 box.
    pub fn new(count: usize) -> Self {
        Self::with_log(count, call_log())
    }

    pub fn with_log(count: usize, log: CallLog) -> Self {
        let mut memory = SharedMemory::new(1, 64);
        // keep record 0 away from byte 0 so offsets are exercised
        memory.alloc(64, 4).expect("padding fits");
        let offset = memory
            .alloc(count * ParticleRecord::BYTES, 4)
            .expect("particles fit");
        Self {
            memory,
            offset,
            count,
            extents: Extents::splat(100.0),
            gravity: 9.81,
            repulsion: 1.0,
            drift: Vec3::ZERO,
            tick_extent_change: None,
            grow_on_tick: false,
            relocate_on_tick: false,
            log,
        }
    }

    pub fn set_position(&mut self, index: usize, position: Vec3) {
        let records = self
            .memory
            .records_mut(self.offset, self.count)
            .expect("particle records");
        records[index].set_position(position);
    }

    pub fn records(&self) -> Vec<ParticleRecord> {
        self.memory
            .records(self.offset, self.count)
            .expect("particle records")
            .to_vec()
    }

    fn relocate(&mut self) {
        let bytes = self.count * ParticleRecord::BYTES;
        let fresh = self.memory.alloc(bytes, 4).expect("relocation fits");
        self.memory
            .bytes_mut()
            .copy_within(self.offset..self.offset + bytes, fresh);
        self.offset = fresh;
    }
}

impl SimulationHost for MockHost {
    type Memory = SharedMemory;

    fn particle_count(&self) -> usize {
        self.count
    }

    fn particles_buffer(&self) -> BufferHandle {
        BufferHandle::new(self.offset, self.count * 6, self.memory.generation())
    }

    fn memory(&self) -> &SharedMemory {
        &self.memory
    }

    fn tick(&mut self, _dt: f32) -> Result<()> {
        self.log.borrow_mut().push("tick");
        if self.drift != Vec3::ZERO {
            let drift = self.drift;
            for record in self.memory.records_mut(self.offset, self.count)? {
                record.set_position(record.position() + drift);
            }
        }
        if let Some((axis, value)) = self.tick_extent_change {
            self.extents.set(axis, value);
        }
        if self.grow_on_tick {
            self.memory.grow(1)?;
        }
        if self.relocate_on_tick {
            self.relocate();
        }
        Ok(())
    }

    fn resolve_collisions(&mut self) -> Result<()> {
        self.log.borrow_mut().push("resolve_collisions");
        Ok(())
    }

    fn extent(&self, axis: Axis) -> f32 {
        self.log.borrow_mut().push("extent");
        self.extents.get(axis)
    }

    fn set_extent(&mut self, axis: Axis, value: f32) {
        self.log.borrow_mut().push("set_extent");
        self.extents.set(axis, value);
    }

    fn force_param(&self, param: ForceParam) -> f32 {
        self.log.borrow_mut().push("force_param");
        match param {
            ForceParam::Gravity => self.gravity,
            ForceParam::Repulsion => self.repulsion,
        }
    }

    fn set_force_param(&mut self, param: ForceParam, value: f32) {
        self.log.borrow_mut().push("set_force_param");
        match param {
            ForceParam::Gravity => self.gravity = value,
            ForceParam::Repulsion => self.repulsion = value,
        }
    }
}

/// Renderer that only logs that it was asked to draw.
pub struct LoggingRenderer {
    pub log: CallLog,
    pub frames: u64,
}

impl LoggingRenderer {
    pub fn new(log: CallLog) -> Self {
        Self { log, frames: 0 }
    }
}

impl SceneRenderer for LoggingRenderer {
    fn name(&self) -> &str {
        "logging"
    }

    fn render(&mut self, _scene: &Scene, _camera: &Camera) -> Result<()> {
        self.log.borrow_mut().push("render");
        self.frames += 1;
        Ok(())
    }
}

/// Camera controls that only log their updates.
pub struct LoggingControls {
    pub log: CallLog,
}

impl CameraControls for LoggingControls {
    fn update(&mut self, _camera: &mut Camera, _dt: f32) {
        self.log.borrow_mut().push("controls");
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

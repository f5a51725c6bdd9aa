//! Per-frame loop: tick, collide, mirror, camera controls, render.

use std::time::{Duration, Instant};

use log::info;

use crate::bridge::{mirror::VisualMirror, view::ParticleView};
use crate::config::ClockPolicy;
use crate::error::Result;
use crate::host::SimulationHost;
use crate::scene::{Camera, CameraControls, Scene, SceneRenderer};
use crate::utils::{
    logging::{warn_if_frame_budget_exceeded, ScopedTimer},
    profiling::FrameProfiler,
};

/// Supplies the timestep for each tick according to a [`ClockPolicy`].
#[derive(Debug, Clone)]
pub struct FrameClock {
    policy: ClockPolicy,
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new(policy: ClockPolicy) -> Self {
        Self { policy, last: None }
    }

    pub fn policy(&self) -> ClockPolicy {
        self.policy
    }

    pub fn next_dt(&mut self) -> f32 {
        self.next_dt_at(Instant::now())
    }

    /// Timestep for a frame starting at `now`.
    pub fn next_dt_at(&mut self, now: Instant) -> f32 {
        match self.policy {
            ClockPolicy::Fixed { dt } => dt,
            ClockPolicy::Throttled { target_fps, max_dt } => {
                let dt = match self.last {
                    Some(last) => now.saturating_duration_since(last).as_secs_f32(),
                    None => 1.0 / target_fps,
                };
                self.last = Some(now);
                dt.min(max_dt)
            }
        }
    }
}

/// Host scheduling mechanism that hands out frame slots.
pub trait FrameScheduler {
    /// Waits for the next frame slot; `false` once the host has been torn down.
    fn wait_for_frame(&mut self) -> bool;
}

/// Grants a fixed number of frames back to back.
#[derive(Debug, Clone, Copy)]
pub struct FrameBudget {
    remaining: u64,
}

impl FrameBudget {
    pub fn new(frames: u64) -> Self {
        Self { remaining: frames }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl FrameScheduler for FrameBudget {
    fn wait_for_frame(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Sleeps before each frame slot to hold a target rate.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    next_slot: Option<Instant>,
    remaining: Option<u64>,
}

impl Throttle {
    pub fn new(target_fps: f32) -> Self {
        Self {
            interval: Duration::from_secs_f32(1.0 / target_fps.max(1e-3)),
            next_slot: None,
            remaining: None,
        }
    }

    /// Stops after `frames` slots.
    pub fn with_limit(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl FrameScheduler for Throttle {
    fn wait_for_frame(&mut self) -> bool {
        match self.remaining.as_mut() {
            Some(0) => return false,
            Some(remaining) => *remaining -= 1,
            None => {}
        }

        let now = Instant::now();
        let slot = match self.next_slot {
            Some(slot) if slot > now => {
                std::thread::sleep(slot - now);
                slot
            }
            _ => now,
        };
        self.next_slot = Some(slot + self.interval);
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// No frame has run yet.
    Idle,
    /// Steady per-frame loop.
    Running,
}

/// Everything a frame touches, borrowed for the duration of one iteration.
pub struct FrameTargets<'a, H, R, C: ?Sized> {
    pub host: &'a mut H,
    pub view: &'a mut ParticleView,
    pub mirror: &'a VisualMirror,
    pub scene: &'a mut Scene,
    pub camera: &'a mut Camera,
    pub controls: &'a mut C,
    pub renderer: &'a mut R,
}

/// Outcome of one driver iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// 1-based index of the frame that just ran.
    pub frame: u64,
    pub dt: f32,
    pub view_reacquired: bool,
    pub elapsed: Duration,
}

pub struct FrameDriver {
    state: DriverState,
    clock: FrameClock,
    frame: u64,
    budget_ms: f32,
    profiler: FrameProfiler,
}

impl FrameDriver {
    pub fn new(policy: ClockPolicy, budget_ms: f32) -> Self {
        Self {
            state: DriverState::Idle,
            clock: FrameClock::new(policy),
            frame: 0,
            budget_ms,
            profiler: FrameProfiler::default(),
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn profiler(&self) -> &FrameProfiler {
        &self.profiler
    }

    /// Runs one frame. The view is revalidated after the simulation steps
    /// because either step may have moved its memory.
    pub fn advance<H, R, C>(&mut self, targets: FrameTargets<'_, H, R, C>) -> Result<FrameReport>
    where
        H: SimulationHost,
        R: SceneRenderer,
        C: CameraControls + ?Sized,
    {
        let FrameTargets {
            host,
            view,
            mirror,
            scene,
            camera,
            controls,
            renderer,
        } = targets;

        if self.state == DriverState::Idle {
            info!(
                "frame driver running: {} particles, clock {:?}, renderer {}",
                view.len(),
                self.clock.policy(),
                renderer.name()
            );
            self.state = DriverState::Running;
        }

        let start = Instant::now();
        let dt = self.clock.next_dt_at(start);

        {
            let _timer = ScopedTimer::accumulate("frame::tick", &mut self.profiler.tick_time);
            host.tick(dt)?;
        }
        {
            let _timer =
                ScopedTimer::accumulate("frame::collisions", &mut self.profiler.collision_time);
            host.resolve_collisions()?;
        }
        let view_reacquired = {
            let _timer = ScopedTimer::accumulate("frame::mirror", &mut self.profiler.mirror_time);
            let reacquired = view.revalidate(&*host)?;
            let particles = view.bind(host.memory())?;
            mirror.refresh(&particles, scene)?;
            reacquired
        };
        {
            let _timer = ScopedTimer::accumulate("frame::controls", &mut self.profiler.controls_time);
            controls.update(camera, dt);
        }
        {
            let _timer = ScopedTimer::accumulate("frame::render", &mut self.profiler.render_time);
            renderer.render(scene, camera)?;
        }

        self.frame += 1;
        let elapsed = start.elapsed();
        self.profiler.frames += 1;
        self.profiler.total_time += elapsed;
        if view_reacquired {
            self.profiler.view_reacquisitions += 1;
        }
        if warn_if_frame_budget_exceeded(self.frame, elapsed, self.budget_ms) {
            self.profiler.over_budget_frames += 1;
        }

        Ok(FrameReport {
            frame: self.frame,
            dt,
            view_reacquired,
            elapsed,
        })
    }
}

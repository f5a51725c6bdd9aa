use std::time::Duration;

/// Accumulated timings of the frame driver's stages.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameProfiler {
    pub tick_time: Duration,
    pub collision_time: Duration,
    pub mirror_time: Duration,
    pub controls_time: Duration,
    pub render_time: Duration,
    pub total_time: Duration,

    pub frames: u64,
    pub over_budget_frames: u64,
    /// Times the particle view had to be re-derived after memory moved.
    pub view_reacquisitions: u64,
}

impl FrameProfiler {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn report(&self) {
        let total_us = self.total_time.as_micros() as f32;
        if total_us < 1.0 {
            return;
        }

        let share = |stage: Duration| (stage.as_micros() as f32 / total_us) * 100.0;
        log::info!(
            "frames: {}, over budget: {}, view re-acquisitions: {}",
            self.frames,
            self.over_budget_frames,
            self.view_reacquisitions
        );
        log::info!(
            "total {:.2} ms | tick {:.1}% | collisions {:.1}% | mirror {:.1}% | controls {:.1}% | render {:.1}%",
            self.total_time.as_secs_f32() * 1000.0,
            share(self.tick_time),
            share(self.collision_time),
            share(self.mirror_time),
            share(self.controls_time),
            share(self.render_time),
        );
    }
}

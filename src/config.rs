//! Default constants and the serde-backed session configuration.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::types::{Axis, Extents, Tunable};
use crate::error::{BridgeError, Result};

/// Number of `f32` fields in one particle record (3 position + 3 velocity).
pub const RECORD_STRIDE: usize = 6;

/// Particle count used when none is configured.
pub const DEFAULT_PARTICLE_COUNT: usize = 1000;

/// Default length of every bounding-volume edge.
pub const DEFAULT_EXTENT: f32 = 200.0;

/// Default downward acceleration applied by the simulation.
pub const DEFAULT_GRAVITY: f32 = 9.81;

/// Default inverse-square repulsion constant.
pub const DEFAULT_REPULSION: f32 = 1.0;

/// Nominal timestep handed to the simulation every frame.
pub const DEFAULT_TIME_STEP: f32 = 0.1;

/// Fraction of velocity kept (and reversed) when a particle hits a wall.
pub const DEFAULT_RESTITUTION: f32 = 0.8;

/// Manhattan distance beyond which particles stop interacting.
pub const DEFAULT_INTERACTION_CUTOFF: f32 = 40.0;

/// Upper bound of the random initial velocity on each axis.
pub const DEFAULT_MAX_INITIAL_SPEED: f32 = 10.0;

/// Radius of the sphere drawn for each particle.
pub const DEFAULT_PROXY_RADIUS: f32 = 0.25;

/// Frame budget used for over-budget warnings (60 Hz).
pub const DEFAULT_FRAME_BUDGET_MS: f32 = 1000.0 / 60.0;

pub const DEFAULT_CAMERA_POSITION: [f32; 3] = [50.0, 1.0, 100.0];
pub const DEFAULT_CAMERA_FOV_DEGREES: f32 = 75.0;
pub const DEFAULT_CAMERA_NEAR: f32 = 0.1;
pub const DEFAULT_CAMERA_FAR: f32 = 1000.0;

/// Parameters of the in-process reference simulation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub particle_count: usize,
    pub seed: u64,
    pub extents: Extents,
    pub gravity: f32,
    pub repulsion: f32,
    pub restitution: f32,
    pub interaction_cutoff: f32,
    pub max_initial_speed: f32,
    /// Initial size of the simulation's linear memory, in 64 KiB pages.
    pub initial_pages: usize,
    /// Hard cap on linear memory growth, in pages.
    pub max_pages: usize,
}

impl WorldConfig {
    pub fn validate(&self) -> Result<()> {
        if self.particle_count == 0 {
            return Err(BridgeError::InvalidConfig(
                "particle_count must be at least 1".into(),
            ));
        }
        for axis in Axis::ALL {
            let value = self.extents.get(axis);
            if !(value.is_finite() && value > 0.0) {
                return Err(BridgeError::InvalidExtent { axis, value });
            }
        }
        for (name, value) in [
            ("gravity", self.gravity),
            ("repulsion", self.repulsion),
            ("restitution", self.restitution),
        ] {
            if !value.is_finite() {
                return Err(BridgeError::InvalidConfig(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.initial_pages == 0 || self.max_pages < self.initial_pages {
            return Err(BridgeError::InvalidConfig(format!(
                "memory pages must satisfy 0 < initial ({}) <= max ({})",
                self.initial_pages, self.max_pages
            )));
        }
        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            seed: 0x5eed,
            extents: Extents::splat(DEFAULT_EXTENT),
            gravity: DEFAULT_GRAVITY,
            repulsion: DEFAULT_REPULSION,
            restitution: DEFAULT_RESTITUTION,
            interaction_cutoff: DEFAULT_INTERACTION_CUTOFF,
            max_initial_speed: DEFAULT_MAX_INITIAL_SPEED,
            initial_pages: 1,
            max_pages: 16 * 1024,
        }
    }
}

/// How the frame driver picks the timestep for each tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ClockPolicy {
    /// Same nominal step every frame, decoupled from wall-clock time.
    Fixed { dt: f32 },
    /// Measured wall-clock interval, clamped to `max_dt`.
    Throttled { target_fps: f32, max_dt: f32 },
}

impl Default for ClockPolicy {
    fn default() -> Self {
        Self::Fixed {
            dt: DEFAULT_TIME_STEP,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    /// Orbit target; `None` aims at the centre of the bounding volume.
    pub target: Option<Vec3>,
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Fraction of the pending orbit motion applied per controls update.
    pub damping: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::from_array(DEFAULT_CAMERA_POSITION),
            target: None,
            fov_degrees: DEFAULT_CAMERA_FOV_DEGREES,
            aspect: 16.0 / 9.0,
            near: DEFAULT_CAMERA_NEAR,
            far: DEFAULT_CAMERA_FAR,
            damping: 0.1,
        }
    }
}

/// Slider range for one tunable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PanelConfig {
    pub extent: ParamRange,
    pub gravity: ParamRange,
    pub repulsion: ParamRange,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            extent: ParamRange::new(10.0, 1000.0, 1.0),
            gravity: ParamRange::new(-50.0, 50.0, 0.01),
            repulsion: ParamRange::new(0.0, 100.0, 0.1),
        }
    }
}

impl PanelConfig {
    pub fn range_for(&self, tunable: Tunable) -> ParamRange {
        match tunable {
            Tunable::Height | Tunable::Width | Tunable::Depth => self.extent,
            Tunable::Gravity => self.gravity,
            Tunable::Repulsion => self.repulsion,
        }
    }
}

/// Top-level configuration for a bridge session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub world: WorldConfig,
    pub clock: ClockPolicy,
    pub camera: CameraConfig,
    pub panel: PanelConfig,
    pub proxy_radius: f32,
    pub frame_budget_ms: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            clock: ClockPolicy::default(),
            camera: CameraConfig::default(),
            panel: PanelConfig::default(),
            proxy_radius: DEFAULT_PROXY_RADIUS,
            frame_budget_ms: DEFAULT_FRAME_BUDGET_MS,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON document; missing fields fall back to defaults.
    pub fn from_json(source: &str) -> Result<Self> {
        let config: SessionConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// World and session checks together.
    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;
        self.validate_session()
    }

    /// Checks that only concern the bridge, whatever simulation it drives.
    pub fn validate_session(&self) -> Result<()> {
        match self.clock {
            ClockPolicy::Fixed { dt } if !(dt.is_finite() && dt > 0.0) => {
                return Err(BridgeError::InvalidConfig(format!(
                    "fixed timestep must be positive, got {dt}"
                )));
            }
            ClockPolicy::Throttled { target_fps, max_dt }
                if !(target_fps > 0.0 && max_dt > 0.0) =>
            {
                return Err(BridgeError::InvalidConfig(format!(
                    "throttled clock needs positive target_fps and max_dt, got {target_fps} / {max_dt}"
                )));
            }
            _ => {}
        }
        for tunable in Tunable::ALL {
            let range = self.panel.range_for(tunable);
            if !(range.min < range.max) {
                return Err(BridgeError::InvalidConfig(format!(
                    "panel range for {} is empty: [{}, {}]",
                    tunable.name(),
                    range.min,
                    range.max
                )));
            }
            if tunable.axis().is_some() && range.min <= 0.0 {
                return Err(BridgeError::InvalidConfig(format!(
                    "extent slider for {} must stay above zero",
                    tunable.name()
                )));
            }
        }
        if !(self.proxy_radius > 0.0) {
            return Err(BridgeError::InvalidConfig(
                "proxy_radius must be positive".into(),
            ));
        }
        Ok(())
    }
}

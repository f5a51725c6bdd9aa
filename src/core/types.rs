use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// One of the three bounding-volume dimensions.
///
/// Width runs along world X, height along world Y and depth along world Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Height,
    Width,
    Depth,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Height, Axis::Width, Axis::Depth];

    /// Index of the world-space component this axis maps to.
    pub fn component(self) -> usize {
        match self {
            Axis::Width => 0,
            Axis::Height => 1,
            Axis::Depth => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::Height => "height",
            Axis::Width => "width",
            Axis::Depth => "depth",
        }
    }
}

/// Size of the corner-anchored bounding volume `[0, width] x [0, height] x [0, depth]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extents {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Extents {
    pub const fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Height => self.height,
            Axis::Width => self.width,
            Axis::Depth => self.depth,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Height => self.height = value,
            Axis::Width => self.width = value,
            Axis::Depth => self.depth = value,
        }
    }

    /// Far corner of the volume in world space.
    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth)
    }

    pub fn from_vec3(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    /// Centre of the volume in world space.
    pub fn center(&self) -> Vec3 {
        self.to_vec3() * 0.5
    }
}

impl Default for Extents {
    fn default() -> Self {
        Self::splat(crate::config::DEFAULT_EXTENT)
    }
}

/// Scalar force-field constants owned by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceParam {
    /// Uniform downward acceleration.
    Gravity,
    /// Inverse-square repulsion constant between particles.
    Repulsion,
}

impl ForceParam {
    pub fn name(self) -> &'static str {
        match self {
            ForceParam::Gravity => "gravity",
            ForceParam::Repulsion => "repulsion",
        }
    }
}

/// Every property the control panel can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tunable {
    Height,
    Width,
    Depth,
    Gravity,
    Repulsion,
}

/// What a tunable writes to on the simulation side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TunableTarget {
    Extent(Axis),
    Force(ForceParam),
}

impl Tunable {
    pub const ALL: [Tunable; 5] = [
        Tunable::Height,
        Tunable::Width,
        Tunable::Depth,
        Tunable::Gravity,
        Tunable::Repulsion,
    ];

    pub fn target(self) -> TunableTarget {
        match self {
            Tunable::Height => TunableTarget::Extent(Axis::Height),
            Tunable::Width => TunableTarget::Extent(Axis::Width),
            Tunable::Depth => TunableTarget::Extent(Axis::Depth),
            Tunable::Gravity => TunableTarget::Force(ForceParam::Gravity),
            Tunable::Repulsion => TunableTarget::Force(ForceParam::Repulsion),
        }
    }

    /// The bounding-volume axis driven by this tunable, if any.
    pub fn axis(self) -> Option<Axis> {
        match self.target() {
            TunableTarget::Extent(axis) => Some(axis),
            TunableTarget::Force(_) => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self.target() {
            TunableTarget::Extent(axis) => axis.name(),
            TunableTarget::Force(param) => param.name(),
        }
    }
}

/// Position, orientation, and non-uniform scale of a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_scale_translation(scale: Vec3, position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale,
        }
    }
}

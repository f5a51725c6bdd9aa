//! Perspective camera and the per-frame camera controls.

use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

/// Perspective camera looking from `position` at `target`. Right-handed, Y-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3, aspect: f32) -> Self {
        let defaults = CameraConfig::default();
        Self {
            position,
            target,
            up: Vec3::Y,
            fov_y: defaults.fov_degrees.to_radians(),
            aspect,
            near: defaults.near,
            far: defaults.far,
        }
    }

    /// Builds a camera from configuration, aiming at `default_target` unless one is configured.
    pub fn from_config(config: &CameraConfig, default_target: Vec3) -> Self {
        Self {
            position: config.position,
            target: config.target.unwrap_or(default_target),
            up: Vec3::Y,
            fov_y: config.fov_degrees.to_radians(),
            aspect: config.aspect,
            near: config.near,
            far: config.far,
        }
    }

    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect.max(1e-6), self.near, self.far)
    }

    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Camera interaction advanced once per frame, after the scene is mirrored.
pub trait CameraControls {
    fn update(&mut self, camera: &mut Camera, dt: f32);
}

/// Controls that never move the camera.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedControls;

impl CameraControls for FixedControls {
    fn update(&mut self, _camera: &mut Camera, _dt: f32) {}
}

/// Orbit controls with damping: input queues motion, each update applies a fraction of it.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Fraction of pending motion applied per update, in `(0, 1]`.
    pub damping: f32,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_zoom: f32,
}

const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;
const SETTLE_EPSILON: f32 = 1e-6;

impl OrbitControls {
    /// Starts orbiting `camera.target` from the camera's current position.
    pub fn new(camera: &Camera, damping: f32) -> Self {
        let offset = camera.position - camera.target;
        let distance = offset.length().max(1e-3);
        Self {
            target: camera.target,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
            min_distance: 1.0,
            max_distance: camera.far,
            damping: damping.clamp(1e-3, 1.0),
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 0.0,
        }
    }

    /// Queues a rotation in radians.
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        self.pending_yaw += yaw;
        self.pending_pitch += pitch;
    }

    /// Queues a dolly; positive values move the camera closer.
    pub fn zoom(&mut self, amount: f32) {
        self.pending_zoom += amount;
    }

    pub fn is_settled(&self) -> bool {
        self.pending_yaw.abs() < SETTLE_EPSILON
            && self.pending_pitch.abs() < SETTLE_EPSILON
            && self.pending_zoom.abs() < SETTLE_EPSILON
    }

    /// Camera position implied by the current orbit state.
    pub fn eye(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }
}

impl CameraControls for OrbitControls {
    fn update(&mut self, camera: &mut Camera, _dt: f32) {
        if self.is_settled() {
            return;
        }

        let yaw = self.pending_yaw * self.damping;
        let pitch = self.pending_pitch * self.damping;
        let zoom = self.pending_zoom * self.damping;
        self.pending_yaw -= yaw;
        self.pending_pitch -= pitch;
        self.pending_zoom -= zoom;

        self.yaw += yaw;
        self.pitch = (self.pitch + pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.distance = (self.distance - zoom).clamp(self.min_distance, self.max_distance);

        camera.target = self.target;
        camera.position = self.eye();
    }
}

//! Orbit camera with damped rotation.

use glam::{Mat4, Vec2, Vec3};

use crate::shading::CameraMatrices;

/// Closest the camera may get to its target.
pub const MIN_DISTANCE: f32 = 0.1;
/// Farthest the camera may get from its target.
pub const MAX_DISTANCE: f32 = 30.0;

/// Orbit camera looking at a target point.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Fraction of pending rotation applied per update.
    pub damping: f32,
    pending_yaw: f32,
    pending_pitch: f32,
}

impl OrbitCamera {
    /// Camera at (0, 0, 5) looking at the origin.
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 5.0,
            target: Vec3::ZERO,
            fov_y: 75f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            damping: 0.05,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
        }
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far)
    }

    /// View, projection and viewport for a render target of `viewport` pixels.
    pub fn matrices(&self, viewport: Vec2) -> CameraMatrices {
        let aspect = if viewport.y > 0.0 { viewport.x / viewport.y } else { 1.0 };
        CameraMatrices {
            view: self.view_matrix(),
            projection: self.projection_matrix(aspect),
            viewport,
        }
    }

    /// Queue a rotation from a pointer drag of `(dx, dy)` pixels.
    pub fn rotate_by_drag(&mut self, dx: f32, dy: f32) {
        self.pending_yaw -= dx * 0.005;
        self.pending_pitch += dy * 0.005;
    }

    /// Set the distance, clamped to the zoom limits.
    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Apply a share of the pending rotation and decay the remainder.
    ///
    /// Call once per frame.
    pub fn update(&mut self) {
        self.yaw += self.pending_yaw * self.damping;
        self.pitch = (self.pitch + self.pending_pitch * self.damping).clamp(-1.5, 1.5);
        self.pending_yaw *= 1.0 - self.damping;
        self.pending_pitch *= 1.0 - self.damping;
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

//! # First-Person Camera
//!
//! Euler-angle camera: pitch and yaw drive an orthonormal forward/right/up basis
//! that is re-derived after every angle change.
//!
//! ```text
//! forward = normalize(cos p · cos y, sin p, cos p · sin y)
//! right   = normalize(forward × world_up)
//! up      = normalize(right × forward)
//! ```
//!
//! Angles are exposed in degrees and stored in radians. Pitch is clamped to
//! ±89° so the basis never degenerates; yaw wraps freely.

mod controller;

pub use controller::{CameraController, FrameInput};

use voxview_shared::{Mat4, Vec2, Vec3};

use crate::integration::FrameTransforms;

/// Near clip plane distance.
pub const NEAR_PLANE: f32 = 0.01;

/// Far clip plane distance.
pub const FAR_PLANE: f32 = 1000.0;

/// Pitch limit in degrees, both directions.
pub const PITCH_LIMIT_DEG: f32 = 89.0;

/// Narrowest field of view in degrees.
pub const FOV_MIN_DEG: f32 = 1.0;

/// Widest field of view in degrees.
pub const FOV_MAX_DEG: f32 = 45.0;

/// Initial yaw in degrees; looks down -Z.
pub const INITIAL_YAW_DEG: f32 = -90.0;

/// Camera translation directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    /// Along `forward`
    Forward,
    /// Against `forward`
    Backward,
    /// Against `right`
    Left,
    /// Along `right`
    Right,
    /// Along the camera's `up`
    Up,
    /// Against the camera's `up`
    Down,
}

/// First-person camera.
#[derive(Debug, Clone)]
pub struct FpsCamera {
    position: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    /// Radians, within ±89°.
    pitch: f32,
    /// Radians, unbounded.
    yaw: f32,
    /// Radians, within [1°, 45°].
    fov: f32,
    aspect_ratio: f32,
    speed: f32,
    sensitivity: f32,
    last_pointer: Vec2,
    has_moved: bool,
}

impl FpsCamera {
    /// Creates a camera at `position` looking down -Z with a 45° field of view.
    ///
    /// `speed` is in units per second, `sensitivity` in degrees per pointer unit.
    /// An aspect ratio [`Self::set_aspect_ratio`] would reject falls back to 1.
    #[must_use]
    pub fn new(position: Vec3, aspect_ratio: f32, speed: f32, sensitivity: f32) -> Self {
        let mut camera = Self {
            position,
            forward: -Vec3::Z,
            right: Vec3::X,
            up: Vec3::Y,
            pitch: 0.0,
            yaw: INITIAL_YAW_DEG.to_radians(),
            fov: FOV_MAX_DEG.to_radians(),
            aspect_ratio: 1.0,
            speed,
            sensitivity,
            last_pointer: Vec2::ZERO,
            has_moved: false,
        };
        camera.set_aspect_ratio(aspect_ratio);
        camera.recompute_basis();
        camera
    }

    // =========================================================================
    // ORIENTATION
    // =========================================================================

    /// Pitch in degrees.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch.to_degrees()
    }

    /// Sets pitch, clamped to ±89°.
    pub fn set_pitch(&mut self, degrees: f32) {
        self.pitch = degrees
            .clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG)
            .to_radians();
        self.recompute_basis();
    }

    /// Yaw in degrees.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw.to_degrees()
    }

    /// Sets yaw. Not clamped.
    pub fn set_yaw(&mut self, degrees: f32) {
        self.yaw = degrees.to_radians();
        self.recompute_basis();
    }

    /// Vertical field of view in degrees.
    #[must_use]
    pub fn fov(&self) -> f32 {
        self.fov.to_degrees()
    }

    /// Sets the field of view, clamped to [1°, 45°]. The basis is unaffected.
    pub fn set_fov(&mut self, degrees: f32) {
        self.fov = degrees.clamp(FOV_MIN_DEG, FOV_MAX_DEG).to_radians();
    }

    fn recompute_basis(&mut self) {
        let (sin_p, cos_p) = self.pitch.sin_cos();
        let (sin_y, cos_y) = self.yaw.sin_cos();

        self.forward = Vec3::new(cos_p * cos_y, sin_p, cos_p * sin_y).normalize();
        self.right = self.forward.cross(Vec3::Y).normalize();
        self.up = self.right.cross(self.forward).normalize();
    }

    // =========================================================================
    // POSITION
    // =========================================================================

    /// Camera position.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit view direction.
    #[must_use]
    pub const fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Unit right vector.
    #[must_use]
    pub const fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit up vector.
    #[must_use]
    pub const fn up(&self) -> Vec3 {
        self.up
    }

    /// Translates by `±basis * speed * dt`.
    pub fn move_in(&mut self, direction: MoveDirection, dt: f32) {
        let step = self.speed * dt;
        match direction {
            MoveDirection::Forward => self.position += self.forward * step,
            MoveDirection::Backward => self.position -= self.forward * step,
            MoveDirection::Right => self.position += self.right * step,
            MoveDirection::Left => self.position -= self.right * step,
            MoveDirection::Up => self.position += self.up * step,
            MoveDirection::Down => self.position -= self.up * step,
        }
    }

    // =========================================================================
    // POINTER
    // =========================================================================

    /// Feeds an absolute pointer position.
    ///
    /// The first call after creation or [`Self::reset_pointer`] only records
    /// the position. Later calls turn by the delta: moving right increases yaw,
    /// moving down decreases pitch.
    pub fn on_pointer_move(&mut self, pos: Vec2) {
        if !self.has_moved {
            self.last_pointer = pos;
            self.has_moved = true;
            return;
        }

        let delta = pos - self.last_pointer;
        self.set_pitch(self.pitch() - delta.y * self.sensitivity);
        self.set_yaw(self.yaw() + delta.x * self.sensitivity);
        self.last_pointer = pos;
    }

    /// Re-arms the first-move guard so the next pointer sample does not turn
    /// the camera.
    pub fn reset_pointer(&mut self) {
        self.has_moved = false;
    }

    // =========================================================================
    // MATRICES
    // =========================================================================

    /// Current aspect ratio.
    #[must_use]
    pub const fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Updates the aspect ratio. Non-positive or non-finite values are ignored.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            self.aspect_ratio = aspect_ratio;
        } else {
            tracing::warn!(aspect_ratio, "ignoring invalid aspect ratio");
        }
    }

    /// Look-at from `position` towards `position + forward`.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position + self.forward, self.up)
    }

    /// Perspective projection with near 0.01 and far 1000.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect_ratio, NEAR_PLANE, FAR_PLANE)
    }

    /// View and projection for the current frame.
    #[must_use]
    pub fn transforms(&self) -> FrameTransforms {
        FrameTransforms {
            view: self.view_matrix(),
            projection: self.projection_matrix(),
        }
    }
}

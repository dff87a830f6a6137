//! # Engine Defaults
//!
//! Values used when no configuration file overrides them.

use crate::math::Vec3;

// =============================================================================
// WINDOW
// =============================================================================

/// Default window width in pixels.
pub const DEFAULT_WINDOW_WIDTH: u32 = 1200;

/// Default window height in pixels.
pub const DEFAULT_WINDOW_HEIGHT: u32 = 800;

// =============================================================================
// CAMERA
// =============================================================================

/// Initial camera position, backed off the origin along +Z.
pub const DEFAULT_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 15.0);

/// Camera translation speed in units per second.
pub const DEFAULT_CAMERA_SPEED: f32 = 1.5;

/// Degrees of rotation per pixel of pointer motion.
pub const DEFAULT_CAMERA_SENSITIVITY: f32 = 0.3;

// =============================================================================
// SCENE
// =============================================================================

/// Side length of the synthetic test chunk.
pub const DEFAULT_SYNTHETIC_SIZE: usize = 16;

/// Largest grid side length. Voxel coordinates in a model are `u8`, so no
/// model can address more cells per axis.
pub const MAX_GRID_SIZE: usize = 256;

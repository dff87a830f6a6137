//! # VOXVIEW Shared
//!
//! Common types used by the decoder, the voxel grid, the mesher and the camera.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - `wgpu`
//! - Any GPU or window-related crate
//!
//! If you need graphics types, put them in `voxview_rendering`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod color;
pub mod constants;
pub mod math;

pub use color::{Rgb, Rgba};
pub use constants::{
    DEFAULT_CAMERA_POSITION, DEFAULT_CAMERA_SENSITIVITY, DEFAULT_CAMERA_SPEED,
    DEFAULT_SYNTHETIC_SIZE, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, MAX_GRID_SIZE,
};
pub use math::{Mat4, Vec2, Vec3};

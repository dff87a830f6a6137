//! # VOXVIEW
//!
//! The viewer application crate: configuration, logging and the frame driver.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  ViewerConfig (TOML) ──► load_scene ──► VoxelChunk           │
//! │          │                                  │                │
//! │          └──► FpsCamera ◄── FrameInput      ▼                │
//! │                   │                    RenderTarget          │
//! │                   └── FrameTransforms ──────►                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: TOML configuration and validation
//! - `viewer`: scene loading and the per-frame driver

pub mod config;
pub mod viewer;

pub use voxview_rendering as rendering;
pub use voxview_shared as shared;

pub use config::{CameraConfig, ConfigError, SceneConfig, ViewerConfig, WindowConfig};
pub use viewer::{load_scene, Viewer, ViewerError, ViewerResult};

/// Installs `env_logger` with `default_filter`, overridden by `RUST_LOG` when set.
///
/// Library crates log through `tracing`, which forwards to `log` when no
/// subscriber is installed.
///
/// # Errors
///
/// Returns error if a global logger is already installed.
pub fn init_logging(default_filter: &str) -> Result<(), log::SetLoggerError> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
    env_logger::Builder::new().parse_filters(&filter).try_init()
}

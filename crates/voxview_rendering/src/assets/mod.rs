//! # Asset Pipeline
//!
//! Reading and writing `.vox` model containers.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  .vox bytes  →  VoxLoader  →  VoxelModel     │
//! │                                  ↓           │
//! │  .vox bytes  ←  VoxWriter  ←─────┘           │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! `VoxelModel` is produced once per decode and owned by the caller; the grid
//! builder only borrows it.

mod vox_loader;
mod vox_writer;

pub use vox_loader::{
    VoxLoader, VoxPalette, VoxVoxel, VoxelModel, VOX_MAGIC, VOX_MAX_VERSION,
};
pub use vox_writer::VoxWriter;

//! # VOXVIEW Rendering
//!
//! CPU-side voxel pipeline for the viewer:
//! - decode `.vox` containers into a sparse [`VoxelModel`]
//! - expand the model into a dense [`VoxelGrid`]
//! - emit one independent cube per active voxel ([`CubeMesher`])
//! - drive a first-person [`FpsCamera`]
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  .vox bytes → VoxLoader → VoxelModel → VoxelGrid            │
//! │                                           ↓                 │
//! │                         CubeMesher → ChunkMesh              │
//! │                                           ↓                 │
//! │  FrameInput → CameraController → FpsCamera → RenderTarget   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is single-threaded and synchronous; only `VoxLoader::load`
//! touches the filesystem. No GPU device is created in this crate.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod assets;
pub mod camera;
pub mod error;
pub mod integration;
pub mod voxel;

pub use assets::{VoxLoader, VoxPalette, VoxVoxel, VoxWriter, VoxelModel};
pub use camera::{CameraController, FpsCamera, FrameInput, MoveDirection};
pub use error::{FormatError, FormatResult, GridError, GridResult};
pub use integration::{FrameTransforms, MeshId, RecordingTarget, RenderTarget};
pub use voxel::{ChunkMesh, ColorVertex, CubeMesher, Voxel, VoxelChunk, VoxelGrid};

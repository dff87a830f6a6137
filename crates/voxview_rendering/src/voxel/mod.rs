//! Voxel data structures and meshing.
//!
//! `VoxelGrid` holds dense occupancy and color, `CubeMesher` turns it into a
//! vertex + index buffer, and `VoxelChunk` ties both to a render target.

mod chunk;
mod cube_mesher;
mod grid;

pub use chunk::VoxelChunk;
pub use cube_mesher::{
    ChunkMesh, ColorVertex, CubeMesher, INDICES_PER_VOXEL, VERTICES_PER_VOXEL,
};
pub use grid::{Voxel, VoxelGrid};

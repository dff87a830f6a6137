//! Voxel chunk: a grid, its mesh, and the device handle for that mesh.
//!
//! ```text
//! new ──► load(target) ──► render(target, transforms)* ──► unload(target)
//!              │                                              │
//!        build + upload                            release + drop buffers
//! ```

use crate::assets::VoxelModel;
use crate::error::GridResult;
use crate::integration::{FrameTransforms, RenderTarget, VERTEX_ATTRIBUTES};

use super::cube_mesher::{ChunkMesh, CubeMesher};
use super::grid::VoxelGrid;

/// A renderable cube of voxels.
///
/// `H` is the handle type of the [`RenderTarget`] the chunk is loaded into.
#[derive(Debug)]
pub struct VoxelChunk<H> {
    /// Voxel data.
    grid: VoxelGrid,
    /// CPU-side mesh, present while loaded.
    mesh: Option<ChunkMesh>,
    /// Device handle, present while loaded.
    handle: Option<H>,
}

impl<H> VoxelChunk<H> {
    /// Wraps an existing grid. Nothing is built until [`Self::load`].
    #[must_use]
    pub fn new(grid: VoxelGrid) -> Self {
        Self {
            grid,
            mesh: None,
            handle: None,
        }
    }

    /// Creates a fully active chunk with seeded random colors.
    ///
    /// # Errors
    ///
    /// Returns error if `size` is larger than a grid may be.
    pub fn synthetic(size: usize, seed: u64) -> GridResult<Self> {
        VoxelGrid::synthetic(size, seed).map(Self::new)
    }

    /// Creates a chunk from a decoded model.
    ///
    /// # Errors
    ///
    /// Returns error if the model is too large, or a voxel lies outside the
    /// grid or has color index 0.
    pub fn from_model(model: &VoxelModel) -> GridResult<Self> {
        VoxelGrid::from_model(model).map(Self::new)
    }

    /// Returns the voxel grid.
    #[inline]
    #[must_use]
    pub const fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// Returns the mesh while loaded.
    #[inline]
    #[must_use]
    pub fn mesh(&self) -> Option<&ChunkMesh> {
        self.mesh.as_ref()
    }

    /// Returns true between `load` and `unload`.
    #[inline]
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.handle.is_some()
    }

    /// Builds the mesh and uploads it. Does nothing if already loaded.
    pub fn load<T>(&mut self, target: &mut T)
    where
        T: RenderTarget<MeshHandle = H>,
    {
        if self.is_loaded() {
            tracing::trace!("chunk already loaded");
            return;
        }

        let mesh = CubeMesher::build(&self.grid);
        let handle = target.upload_mesh(&mesh, &VERTEX_ATTRIBUTES);

        tracing::info!(
            size = self.grid.size(),
            voxels = self.grid.active_count(),
            vertices = mesh.vertex_count(),
            indices = mesh.index_count(),
            "chunk loaded"
        );

        self.mesh = Some(mesh);
        self.handle = Some(handle);
    }

    /// Draws the uploaded mesh. Returns false if the chunk is not loaded.
    pub fn render<T>(&self, target: &mut T, transforms: &FrameTransforms) -> bool
    where
        T: RenderTarget<MeshHandle = H>,
    {
        match (&self.handle, &self.mesh) {
            (Some(handle), Some(mesh)) => {
                target.draw(handle, mesh.index_count(), transforms);
                true
            }
            _ => false,
        }
    }

    /// Releases the device handle and drops the CPU-side mesh. The grid is kept,
    /// so the chunk can be loaded again.
    pub fn unload<T>(&mut self, target: &mut T)
    where
        T: RenderTarget<MeshHandle = H>,
    {
        if let Some(handle) = self.handle.take() {
            target.release(handle);
            tracing::debug!("chunk unloaded");
        }
        self.mesh = None;
    }
}

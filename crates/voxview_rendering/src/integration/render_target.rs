//! Render Target - the seam to the graphics collaborator
//!
//! Meshes cross this boundary as an interleaved `(x, y, z, r, g, b)` f32 vertex
//! stream plus a u32 triangle-list index stream. Shader compilation, buffer
//! objects and uniform upload all live on the other side.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut target = RecordingTarget::default();
//! let handle = target.upload_mesh(&mesh, &VERTEX_ATTRIBUTES);
//! target.draw(&handle, mesh.index_count(), &camera.transforms());
//! target.release(handle);
//! ```

use voxview_shared::Mat4;

use crate::voxel::ChunkMesh;

/// Floats per interleaved vertex.
pub const VERTEX_STRIDE_FLOATS: u32 = 6;

/// A named vertex attribute within the interleaved stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttributeBinding {
    /// Shader attribute name
    pub name: &'static str,
    /// Shader location
    pub location: u32,
    /// Number of f32 components
    pub components: u32,
    /// Offset from the start of the vertex, in floats
    pub offset_floats: u32,
    /// Distance between consecutive vertices, in floats
    pub stride_floats: u32,
}

impl VertexAttributeBinding {
    /// Offset in bytes.
    #[must_use]
    pub const fn offset_bytes(&self) -> u64 {
        self.offset_floats as u64 * 4
    }
}

/// Position attribute: 3 floats at offset 0.
pub const POSITION_ATTRIBUTE: VertexAttributeBinding = VertexAttributeBinding {
    name: "aPosition",
    location: 0,
    components: 3,
    offset_floats: 0,
    stride_floats: VERTEX_STRIDE_FLOATS,
};

/// Color attribute: 3 floats at offset 3.
pub const COLOR_ATTRIBUTE: VertexAttributeBinding = VertexAttributeBinding {
    name: "aColor",
    location: 1,
    components: 3,
    offset_floats: 3,
    stride_floats: VERTEX_STRIDE_FLOATS,
};

/// Both attribute bindings, in location order.
pub const VERTEX_ATTRIBUTES: [VertexAttributeBinding; 2] = [POSITION_ATTRIBUTE, COLOR_ATTRIBUTE];

/// View and projection matrices for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTransforms {
    /// World to view space
    pub view: Mat4,
    /// View to clip space
    pub projection: Mat4,
}

impl FrameTransforms {
    /// Combined `projection * view`.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Graphics collaborator that owns device-side mesh buffers.
pub trait RenderTarget {
    /// Opaque handle to uploaded vertex and index buffers.
    type MeshHandle;

    /// Uploads a mesh and describes its vertex layout.
    fn upload_mesh(
        &mut self,
        mesh: &ChunkMesh,
        attributes: &[VertexAttributeBinding],
    ) -> Self::MeshHandle;

    /// Draws `index_count` indices of an uploaded mesh as a triangle list.
    fn draw(&mut self, handle: &Self::MeshHandle, index_count: usize, transforms: &FrameTransforms);

    /// Releases the buffers behind a handle.
    fn release(&mut self, handle: Self::MeshHandle);
}

// =============================================================================
// HEADLESS TARGET
// =============================================================================

/// Handle issued by [`RecordingTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub u32);

/// What a [`RecordingTarget`] kept from an upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRecord {
    /// Handle issued
    pub id: MeshId,
    /// Vertex stream size in bytes
    pub vertex_bytes: usize,
    /// Index stream length
    pub index_count: usize,
    /// Attribute names in the order given
    pub attribute_names: Vec<&'static str>,
}

/// What a [`RecordingTarget`] kept from a draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRecord {
    /// Mesh drawn
    pub id: MeshId,
    /// Indices drawn
    pub index_count: usize,
    /// Transforms in effect
    pub transforms: FrameTransforms,
}

/// Headless render target that records every call.
///
/// Used by tests and the inspection CLI in place of a GPU device.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    next_id: u32,
    /// Uploads, in order
    pub uploads: Vec<UploadRecord>,
    /// Draw calls, in order
    pub draws: Vec<DrawRecord>,
    /// Handles released, in order
    pub released: Vec<MeshId>,
}

impl RecordingTarget {
    /// Creates an empty target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handles uploaded and not yet released.
    #[must_use]
    pub fn live_meshes(&self) -> usize {
        self.uploads.len() - self.released.len()
    }

    /// Total bytes uploaded (vertex and index streams).
    #[must_use]
    pub fn bytes_uploaded(&self) -> usize {
        self.uploads
            .iter()
            .map(|u| u.vertex_bytes + u.index_count * std::mem::size_of::<u32>())
            .sum()
    }
}

impl RenderTarget for RecordingTarget {
    type MeshHandle = MeshId;

    fn upload_mesh(
        &mut self,
        mesh: &ChunkMesh,
        attributes: &[VertexAttributeBinding],
    ) -> MeshId {
        let id = MeshId(self.next_id);
        self.next_id += 1;
        self.uploads.push(UploadRecord {
            id,
            vertex_bytes: mesh.vertex_bytes().len(),
            index_count: mesh.index_count(),
            attribute_names: attributes.iter().map(|a| a.name).collect(),
        });
        id
    }

    fn draw(&mut self, handle: &MeshId, index_count: usize, transforms: &FrameTransforms) {
        self.draws.push(DrawRecord {
            id: *handle,
            index_count,
            transforms: *transforms,
        });
    }

    fn release(&mut self, handle: MeshId) {
        self.released.push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::ColorVertex;

    #[test]
    fn test_attribute_bindings_match_vertex_layout() {
        let layout = ColorVertex::desc();
        assert_eq!(layout.array_stride, u64::from(VERTEX_STRIDE_FLOATS) * 4);
        for (binding, attr) in VERTEX_ATTRIBUTES.iter().zip(layout.attributes) {
            assert_eq!(binding.location, attr.shader_location);
            assert_eq!(binding.offset_bytes(), attr.offset);
        }
        assert_eq!(POSITION_ATTRIBUTE.name, "aPosition");
        assert_eq!(COLOR_ATTRIBUTE.offset_floats, 3);
    }

    #[test]
    fn test_recording_target_tracks_handles() {
        let mut target = RecordingTarget::new();
        let mesh = ChunkMesh::default();

        let a = target.upload_mesh(&mesh, &VERTEX_ATTRIBUTES);
        let b = target.upload_mesh(&mesh, &VERTEX_ATTRIBUTES);
        assert_ne!(a, b);
        assert_eq!(target.live_meshes(), 2);

        target.draw(&a, 0, &FrameTransforms::default());
        target.release(a);
        assert_eq!(target.live_meshes(), 1);
        assert_eq!(target.draws.len(), 1);
        assert_eq!(target.uploads[0].attribute_names, vec!["aPosition", "aColor"]);
    }
}

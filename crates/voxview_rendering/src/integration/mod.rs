//! # Rendering Integration Layer
//!
//! Hand-off points between the CPU-side pipeline and its collaborators.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  VoxelChunk ── ChunkMesh ──► RenderTarget::upload_mesh   │
//! │  FpsCamera ── FrameTransforms ──► RenderTarget::draw     │
//! │  FrameInput ──► CameraController ──► FpsCamera           │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod render_target;

pub use render_target::{
    DrawRecord, FrameTransforms, MeshId, RecordingTarget, RenderTarget, UploadRecord,
    VertexAttributeBinding, COLOR_ATTRIBUTE, POSITION_ATTRIBUTE, VERTEX_ATTRIBUTES,
    VERTEX_STRIDE_FLOATS,
};

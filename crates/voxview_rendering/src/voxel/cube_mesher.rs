//! Cube Mesher - one independent cube per active voxel
//!
//! Every active voxel emits 8 corner vertices and 6 faces (36 indices), with no
//! adjacency check: faces shared by neighbouring voxels are emitted twice.
//!
//! Vertex layout is interleaved `(x, y, z, r, g, b)` as f32, indices are a u32
//! triangle list.

use bytemuck::{Pod, Zeroable};
use voxview_shared::Rgb;

use super::grid::VoxelGrid;

/// Vertices emitted per voxel.
pub const VERTICES_PER_VOXEL: usize = 8;

/// Indices emitted per voxel (6 faces x 2 triangles x 3).
pub const INDICES_PER_VOXEL: usize = 36;

/// Corner offsets added to `(x, y, -z)`.
///
/// Corners 0-3 lie on the `-z` plane, 4-7 one unit towards +Z.
const CUBE_CORNERS: [[f32; 3]; VERTICES_PER_VOXEL] = [
    [1.0, 0.0, 0.0], // front bottom right
    [0.0, 0.0, 0.0], // front bottom left
    [0.0, 1.0, 0.0], // front top left
    [1.0, 1.0, 0.0], // front top right
    [1.0, 0.0, 1.0], // back bottom right
    [0.0, 0.0, 1.0], // back bottom left
    [0.0, 1.0, 1.0], // back top left
    [1.0, 1.0, 1.0], // back top right
];

/// Corner indices per face, in emission order: front, top, right, left, bottom, back.
const CUBE_FACES: [u32; INDICES_PER_VOXEL] = [
    0, 1, 3, 2, 3, 1, // front
    3, 2, 7, 6, 7, 2, // top
    4, 0, 7, 3, 7, 0, // right
    1, 5, 2, 6, 2, 5, // left
    4, 5, 0, 1, 0, 5, // bottom
    5, 4, 6, 7, 6, 4, // back
];

// =============================================================================
// VERTEX FORMAT
// =============================================================================

/// Position + color vertex, 24 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    /// Position in model space [x, y, z]
    pub position: [f32; 3],
    /// Color with channels divided by 256 [r, g, b]
    pub color: [f32; 3],
}

impl ColorVertex {
    /// Vertex buffer layout for WGPU
    pub const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,  // aPosition
        1 => Float32x3,  // aColor
    ];

    /// Vertex buffer layout descriptor
    #[must_use]
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColorVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

// =============================================================================
// MESH OUTPUT
// =============================================================================

/// Complete mesh data for a grid (vertices + indices)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    /// Vertex buffer data
    pub vertices: Vec<ColorVertex>,
    /// Index buffer data (u32 triangle list)
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    /// Check if mesh is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Get triangle count
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get vertex count
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get index count
    #[must_use]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Vertices as a flat `x, y, z, r, g, b, ...` float slice.
    #[must_use]
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Vertex data as bytes for buffer upload.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as bytes for buffer upload.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

// =============================================================================
// MESHER
// =============================================================================

/// Builds per-voxel cube meshes.
pub struct CubeMesher;

impl CubeMesher {
    /// Walks the grid in x, then y, then z order and emits one cube per active
    /// voxel. The n-th active voxel owns vertices `8n..8n + 8`.
    #[must_use]
    pub fn build(grid: &VoxelGrid) -> ChunkMesh {
        let active = grid.active_count();
        let mut mesh = ChunkMesh {
            vertices: Vec::with_capacity(active * VERTICES_PER_VOXEL),
            indices: Vec::with_capacity(active * INDICES_PER_VOXEL),
        };

        for (counter, (x, y, z, color)) in grid.iter_active().enumerate() {
            Self::emit_cube(&mut mesh, [x as f32, y as f32, z as f32], color, counter);
        }

        tracing::debug!(
            voxels = active,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "built cube mesh"
        );

        mesh
    }

    fn emit_cube(mesh: &mut ChunkMesh, [x, y, z]: [f32; 3], color: Rgb, counter: usize) {
        let color = color.to_unit_floats();
        mesh.vertices
            .extend(CUBE_CORNERS.iter().map(|[dx, dy, dz]| ColorVertex {
                position: [dx + x, dy + y, dz - z],
                color,
            }));

        let base = (counter * VERTICES_PER_VOXEL) as u32;
        mesh.indices.extend(CUBE_FACES.iter().map(|i| base + i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::Voxel;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<ColorVertex>(), 24);
        let layout = ColorVertex::desc();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[1].shader_location, 1);
    }

    #[test]
    fn test_empty_grid_gives_empty_mesh() {
        let mesh = CubeMesher::build(&VoxelGrid::empty(4).unwrap());
        assert!(mesh.is_empty());
        assert_eq!(mesh.index_count(), 0);
    }

    #[test]
    fn test_single_voxel_cube() {
        let grid = VoxelGrid::synthetic(1, 0).unwrap();
        let mesh = CubeMesher::build(&grid);

        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.index_count(), 36);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.indices.iter().all(|&i| i < 8));
        assert_eq!(&mesh.indices[..6], &[0, 1, 3, 2, 3, 1]);
    }

    #[test]
    fn test_corner_positions_negate_z() {
        let grid = VoxelGrid::synthetic(3, 0).unwrap();
        let mesh = CubeMesher::build(&grid);

        // Voxel (0, 0, 2) is the third active cell.
        let cube = &mesh.vertices[2 * 8..3 * 8];
        assert_eq!(cube[0].position, [1.0, 0.0, -2.0]);
        assert_eq!(cube[1].position, [0.0, 0.0, -2.0]);
        assert_eq!(cube[6].position, [0.0, 1.0, -1.0]);
        assert_eq!(cube[7].position, [1.0, 1.0, -1.0]);
    }

    #[test]
    fn test_color_divided_by_256() {
        let grid = VoxelGrid::synthetic(1, 3).unwrap();
        let Voxel { color, .. } = grid.get(0, 0, 0);
        let mesh = CubeMesher::build(&grid);

        for vertex in &mesh.vertices {
            assert_eq!(vertex.color, color.to_unit_floats());
        }
    }

    #[test]
    fn test_adjacent_voxels_are_not_culled() {
        let grid = VoxelGrid::synthetic(2, 1).unwrap();
        let mesh = CubeMesher::build(&grid);

        assert_eq!(mesh.vertex_count(), 8 * 8);
        assert_eq!(mesh.index_count(), 36 * 8);
        // Second cube's indices are offset by 8.
        assert_eq!(mesh.indices[36], 8);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn test_flat_float_view() {
        let mesh = CubeMesher::build(&VoxelGrid::synthetic(1, 0).unwrap());
        let floats = mesh.as_floats();
        assert_eq!(floats.len(), 8 * 6);
        assert_eq!(&floats[..3], &[1.0, 0.0, 0.0]);
        assert_eq!(mesh.vertex_bytes().len(), 8 * 24);
        assert_eq!(mesh.index_bytes().len(), 36 * 4);
    }
}

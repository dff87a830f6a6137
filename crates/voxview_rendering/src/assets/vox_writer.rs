//! VOX container writer.
//!
//! Emits a single-model container: `MAIN` followed by `SIZE`, `XYZI` and `RGBA`.
//! Used for test fixtures, benchmarks and exporting synthetic scenes.

use std::io::{self, Write};

use super::vox_loader::{chunk_len, VoxelModel, VOX_MAGIC, VOX_MAX_VERSION};

/// VOX file writer.
pub struct VoxWriter;

impl VoxWriter {
    /// Encodes a model into an in-memory container.
    ///
    /// # Errors
    ///
    /// Returns error if the model has more voxels than an `XYZI` count can hold.
    pub fn encode(model: &VoxelModel) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(8 + chunk_len(Self::children_size(model)?) as usize);
        Self::write(&mut out, model)?;
        Ok(out)
    }

    /// Writes a model to any sink.
    ///
    /// # Errors
    ///
    /// Returns error if the sink fails or the model is too large to encode.
    pub fn write<W: Write>(mut w: W, model: &VoxelModel) -> io::Result<()> {
        let children_size = Self::children_size(model)?;

        w.write_all(&VOX_MAGIC)?;
        w.write_all(&VOX_MAX_VERSION.to_le_bytes())?;

        // MAIN chunk header, children follow inline
        Self::write_chunk_header(&mut w, b"MAIN", 0, children_size)?;

        // SIZE chunk
        Self::write_chunk_header(&mut w, b"SIZE", 12, 0)?;
        for dim in [model.size_x, model.size_y, model.size_z] {
            w.write_all(&Self::to_i32(u64::from(dim))?.to_le_bytes())?;
        }

        // XYZI chunk
        let count = model.voxels.len() as u64;
        Self::write_chunk_header(&mut w, b"XYZI", 4 + count * 4, 0)?;
        w.write_all(&Self::to_i32(count)?.to_le_bytes())?;
        for v in &model.voxels {
            w.write_all(&[v.x, v.y, v.z, v.color_index])?;
        }

        // RGBA chunk
        Self::write_chunk_header(&mut w, b"RGBA", 256 * 4, 0)?;
        for c in &model.palette.colors {
            w.write_all(&[c.r, c.g, c.b, c.a])?;
        }

        Ok(())
    }

    fn children_size(model: &VoxelModel) -> io::Result<u64> {
        let xyzi = 4 + model.voxels.len() as u64 * 4;
        let total = chunk_len(12) + chunk_len(xyzi) + chunk_len(256 * 4);
        Self::to_i32(total)?;
        Ok(total)
    }

    fn write_chunk_header<W: Write>(
        w: &mut W,
        tag: &[u8; 4],
        content_size: u64,
        children_size: u64,
    ) -> io::Result<()> {
        w.write_all(tag)?;
        w.write_all(&Self::to_i32(content_size)?.to_le_bytes())?;
        w.write_all(&Self::to_i32(children_size)?.to_le_bytes())
    }

    fn to_i32(value: u64) -> io::Result<i32> {
        i32::try_from(value).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("value {value} does not fit a VOX length field"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{VoxLoader, VoxVoxel};
    use voxview_shared::Rgba;

    #[test]
    fn test_encoded_model_decodes_back() {
        let mut model = VoxelModel {
            size_x: 3,
            size_y: 1,
            size_z: 2,
            voxels: vec![VoxVoxel::new(0, 0, 0, 1), VoxVoxel::new(2, 0, 1, 9)],
            ..VoxelModel::default()
        };
        model.palette.colors[8] = Rgba::new(10, 20, 30, 255);

        let bytes = VoxWriter::encode(&model).unwrap();
        assert_eq!(&bytes[..4], b"VOX ");

        let decoded = VoxLoader::decode(&bytes).unwrap();
        assert_eq!(decoded, model);
    }

    #[test]
    fn test_main_children_size_covers_rest_of_file() {
        let model = VoxelModel {
            size_x: 1,
            size_y: 1,
            size_z: 1,
            voxels: vec![VoxVoxel::new(0, 0, 0, 1)],
            ..VoxelModel::default()
        };
        let bytes = VoxWriter::encode(&model).unwrap();

        let children = i32::from_le_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        assert_eq!(children as usize, bytes.len() - 20);
    }
}

//! MagicaVoxel VOX File Loader
//!
//! Decoder for the chunk-tagged `.vox` container.
//!
//! ## VOX Format Reference
//!
//! ```text
//! VOX File Structure:
//! ├── "VOX " (4 bytes) - Magic number
//! ├── Version (i32) - at most 150
//! └── Chunks until end of data
//!     ├── tag[4], content size (i32), children size (i32)
//!     ├── MAIN - no content, children follow inline
//!     ├── SIZE - 3 x i32 dimensions
//!     ├── XYZI - i32 count, then count x (x, y, z, color index) bytes
//!     └── RGBA - 256 x (r, g, b, a) (optional)
//! ```
//!
//! Chunks are read as a flat sequence; children are never recursed into. Unknown
//! tags are skipped by their declared content size.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use voxview_rendering::assets::VoxLoader;
//!
//! let model = VoxLoader::load("assets/models/monument.vox")?;
//! println!("{} voxels", model.voxel_count());
//! ```

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use voxview_shared::Rgba;

use crate::error::{FormatError, FormatResult};

/// VOX file magic number.
pub const VOX_MAGIC: [u8; 4] = *b"VOX ";

/// Highest container version the decoder accepts.
pub const VOX_MAX_VERSION: i32 = 150;

/// Chunk header size: tag + content size + children size.
const CHUNK_HEADER_SIZE: u64 = 12;

/// Bytes per `XYZI` record.
const XYZI_RECORD_SIZE: u64 = 4;

/// Bytes in an `RGBA` chunk payload.
const RGBA_PAYLOAD_SIZE: u64 = 256 * 4;

/// Default MagicaVoxel palette (256 colors), indexed by color index.
///
/// Entry 0 is the unused "empty" slot; `VoxPalette::default` rotates it to the end.
static DEFAULT_PALETTE: &[u32; 256] = &[
    0x00000000, 0xffffffff, 0xffccffff, 0xff99ffff, 0xff66ffff, 0xff33ffff, 0xff00ffff, 0xffffccff,
    0xffccccff, 0xff99ccff, 0xff66ccff, 0xff33ccff, 0xff00ccff, 0xffff99ff, 0xffcc99ff, 0xff9999ff,
    0xff6699ff, 0xff3399ff, 0xff0099ff, 0xffff66ff, 0xffcc66ff, 0xff9966ff, 0xff6666ff, 0xff3366ff,
    0xff0066ff, 0xffff33ff, 0xffcc33ff, 0xff9933ff, 0xff6633ff, 0xff3333ff, 0xff0033ff, 0xffff00ff,
    0xffcc00ff, 0xff9900ff, 0xff6600ff, 0xff3300ff, 0xff0000ff, 0xffffffcc, 0xffccffcc, 0xff99ffcc,
    0xff66ffcc, 0xff33ffcc, 0xff00ffcc, 0xffffcccc, 0xffcccccc, 0xff99cccc, 0xff66cccc, 0xff33cccc,
    0xff00cccc, 0xffff99cc, 0xffcc99cc, 0xff9999cc, 0xff6699cc, 0xff3399cc, 0xff0099cc, 0xffff66cc,
    0xffcc66cc, 0xff9966cc, 0xff6666cc, 0xff3366cc, 0xff0066cc, 0xffff33cc, 0xffcc33cc, 0xff9933cc,
    0xff6633cc, 0xff3333cc, 0xff0033cc, 0xffff00cc, 0xffcc00cc, 0xff9900cc, 0xff6600cc, 0xff3300cc,
    0xff0000cc, 0xffffff99, 0xffccff99, 0xff99ff99, 0xff66ff99, 0xff33ff99, 0xff00ff99, 0xffffcc99,
    0xffcccc99, 0xff99cc99, 0xff66cc99, 0xff33cc99, 0xff00cc99, 0xffff9999, 0xffcc9999, 0xff999999,
    0xff669999, 0xff339999, 0xff009999, 0xffff6699, 0xffcc6699, 0xff996699, 0xff666699, 0xff336699,
    0xff006699, 0xffff3399, 0xffcc3399, 0xff993399, 0xff663399, 0xff333399, 0xff003399, 0xffff0099,
    0xffcc0099, 0xff990099, 0xff660099, 0xff330099, 0xff000099, 0xffffff66, 0xffccff66, 0xff99ff66,
    0xff66ff66, 0xff33ff66, 0xff00ff66, 0xffffcc66, 0xffcccc66, 0xff99cc66, 0xff66cc66, 0xff33cc66,
    0xff00cc66, 0xffff9966, 0xffcc9966, 0xff999966, 0xff669966, 0xff339966, 0xff009966, 0xffff6666,
    0xffcc6666, 0xff996666, 0xff666666, 0xff336666, 0xff006666, 0xffff3366, 0xffcc3366, 0xff993366,
    0xff663366, 0xff333366, 0xff003366, 0xffff0066, 0xffcc0066, 0xff990066, 0xff660066, 0xff330066,
    0xff000066, 0xffffff33, 0xffccff33, 0xff99ff33, 0xff66ff33, 0xff33ff33, 0xff00ff33, 0xffffcc33,
    0xffcccc33, 0xff99cc33, 0xff66cc33, 0xff33cc33, 0xff00cc33, 0xffff9933, 0xffcc9933, 0xff999933,
    0xff669933, 0xff339933, 0xff009933, 0xffff6633, 0xffcc6633, 0xff996633, 0xff666633, 0xff336633,
    0xff006633, 0xffff3333, 0xffcc3333, 0xff993333, 0xff663333, 0xff333333, 0xff003333, 0xffff0033,
    0xffcc0033, 0xff990033, 0xff660033, 0xff330033, 0xff000033, 0xffffff00, 0xffccff00, 0xff99ff00,
    0xff66ff00, 0xff33ff00, 0xff00ff00, 0xffffcc00, 0xffcccc00, 0xff99cc00, 0xff66cc00, 0xff33cc00,
    0xff00cc00, 0xffff9900, 0xffcc9900, 0xff999900, 0xff669900, 0xff339900, 0xff009900, 0xffff6600,
    0xffcc6600, 0xff996600, 0xff666600, 0xff336600, 0xff006600, 0xffff3300, 0xffcc3300, 0xff993300,
    0xff663300, 0xff333300, 0xff003300, 0xffff0000, 0xffcc0000, 0xff990000, 0xff660000, 0xff330000,
    0xff0000ee, 0xff0000dd, 0xff0000bb, 0xff0000aa, 0xff000088, 0xff000077, 0xff000055, 0xff000044,
    0xff000022, 0xff000011, 0xff00ee00, 0xff00dd00, 0xff00bb00, 0xff00aa00, 0xff008800, 0xff007700,
    0xff005500, 0xff004400, 0xff002200, 0xff001100, 0xffee0000, 0xffdd0000, 0xffbb0000, 0xffaa0000,
    0xff880000, 0xff770000, 0xff550000, 0xff440000, 0xff220000, 0xff110000, 0xffeeeeee, 0xffdddddd,
    0xffbbbbbb, 0xffaaaaaa, 0xff888888, 0xff777777, 0xff555555, 0xff444444, 0xff222222, 0xff111111,
];

/// Model palette (256 colors) in file order.
///
/// Entry `i` is the color for color index `i + 1`, the same layout an `RGBA`
/// chunk stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoxPalette {
    /// Color entries.
    pub colors: [Rgba; 256],
}

impl Default for VoxPalette {
    fn default() -> Self {
        let mut colors = [Rgba::default(); 256];
        for (i, slot) in colors.iter_mut().enumerate() {
            *slot = Rgba::from_packed(DEFAULT_PALETTE[(i + 1) % 256]);
        }
        Self { colors }
    }
}

impl VoxPalette {
    /// Gets the color stored at a 0-based palette slot.
    #[inline]
    #[must_use]
    pub fn get(&self, slot: u8) -> Rgba {
        self.colors[usize::from(slot)]
    }

    /// Resolves a 1-based color index. Index 0 has no color.
    #[inline]
    #[must_use]
    pub fn resolve(&self, color_index: u8) -> Option<Rgba> {
        color_index.checked_sub(1).map(|slot| self.get(slot))
    }
}

/// Single voxel record from an `XYZI` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoxVoxel {
    /// X position.
    pub x: u8,
    /// Y position.
    pub y: u8,
    /// Z position.
    pub z: u8,
    /// Color index (1-based palette reference).
    pub color_index: u8,
}

impl VoxVoxel {
    /// Creates a voxel record.
    #[inline]
    #[must_use]
    pub const fn new(x: u8, y: u8, z: u8, color_index: u8) -> Self {
        Self { x, y, z, color_index }
    }
}

/// Decoded model: dimensions, sparse voxels and palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelModel {
    /// Model width (X).
    pub size_x: u32,
    /// Model height (Y).
    pub size_y: u32,
    /// Model depth (Z).
    pub size_z: u32,
    /// Sparse voxel records in file order.
    pub voxels: Vec<VoxVoxel>,
    /// Color palette.
    pub palette: VoxPalette,
}

impl Default for VoxelModel {
    fn default() -> Self {
        Self {
            size_x: 0,
            size_y: 0,
            size_z: 0,
            voxels: Vec::new(),
            palette: VoxPalette::default(),
        }
    }
}

impl VoxelModel {
    /// Returns the number of voxel records.
    #[inline]
    #[must_use]
    pub fn voxel_count(&self) -> usize {
        self.voxels.len()
    }

    /// Largest of the three dimensions. The dense grid is a cube of this side.
    #[inline]
    #[must_use]
    pub fn max_dimension(&self) -> u32 {
        self.size_x.max(self.size_y).max(self.size_z)
    }
}

/// Bounded reader over a container: tracks the position and total length so
/// end-of-data and truncation can be decided before a read is attempted.
struct ChunkStream<'a, R> {
    reader: &'a mut R,
    pos: u64,
    len: u64,
}

impl<'a, R: Read + Seek> ChunkStream<'a, R> {
    fn new(reader: &'a mut R) -> FormatResult<Self> {
        let pos = reader.stream_position()?;
        let len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(pos))?;
        Ok(Self { reader, pos, len })
    }

    #[inline]
    fn at_end(&self) -> bool {
        self.pos >= self.len
    }

    #[inline]
    fn remaining(&self) -> u64 {
        self.len.saturating_sub(self.pos)
    }

    fn read_bytes<const N: usize>(&mut self) -> FormatResult<[u8; N]> {
        if self.pos + N as u64 > self.len {
            return Err(FormatError::Truncated { offset: self.pos });
        }
        let mut buf = [0u8; N];
        self.reader.read_exact(&mut buf).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => FormatError::Truncated { offset: self.pos },
            _ => FormatError::Io(e),
        })?;
        self.pos += N as u64;
        Ok(buf)
    }

    fn read_i32(&mut self) -> FormatResult<i32> {
        self.read_bytes::<4>().map(i32::from_le_bytes)
    }

    fn read_u8(&mut self) -> FormatResult<u8> {
        self.read_bytes::<1>().map(|[b]| b)
    }

    fn skip(&mut self, count: u64) -> FormatResult<()> {
        if count == 0 {
            return Ok(());
        }
        if self.pos + count > self.len {
            return Err(FormatError::Truncated { offset: self.len });
        }
        let offset = i64::try_from(count).map_err(|_| FormatError::Truncated { offset: self.len })?;
        self.reader.seek(SeekFrom::Current(offset))?;
        self.pos += count;
        Ok(())
    }
}

/// Header of one chunk, lengths already checked for sign.
struct ChunkHeader {
    tag: [u8; 4],
    content_size: u64,
}

impl ChunkHeader {
    fn tag_name(&self) -> String {
        String::from_utf8_lossy(&self.tag).into_owned()
    }
}

/// VOX file loader.
pub struct VoxLoader;

impl VoxLoader {
    /// Loads a VOX file from disk.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or has invalid format.
    pub fn load<P: AsRef<Path>>(path: P) -> FormatResult<VoxelModel> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading vox model");

        let file = File::open(path)?;
        let mut reader = io::BufReader::new(file);

        Self::read(&mut reader)
    }

    /// Decodes a VOX container held in memory.
    ///
    /// # Errors
    ///
    /// Returns error if data has invalid format.
    pub fn decode(bytes: &[u8]) -> FormatResult<VoxelModel> {
        let mut cursor = io::Cursor::new(bytes);
        Self::read(&mut cursor)
    }

    /// Decodes a VOX container from any seekable reader, starting at its
    /// current position and reading to the end.
    ///
    /// # Errors
    ///
    /// Returns error on a bad header, a malformed chunk, or truncated data.
    /// No partial model is returned.
    pub fn read<R: Read + Seek>(reader: &mut R) -> FormatResult<VoxelModel> {
        let mut stream = ChunkStream::new(reader)?;

        Self::read_header(&mut stream)?;

        let mut model = VoxelModel::default();
        while !stream.at_end() {
            Self::read_chunk(&mut stream, &mut model)?;
        }

        tracing::debug!(
            size_x = model.size_x,
            size_y = model.size_y,
            size_z = model.size_z,
            voxels = model.voxel_count(),
            "decoded vox model"
        );

        Ok(model)
    }

    fn read_header<R: Read + Seek>(stream: &mut ChunkStream<'_, R>) -> FormatResult<()> {
        let magic = stream.read_bytes::<4>()?;
        if magic != VOX_MAGIC {
            return Err(FormatError::BadMagic { found: magic });
        }

        let version = stream.read_i32()?;
        if version > VOX_MAX_VERSION {
            return Err(FormatError::UnsupportedVersion {
                version,
                max: VOX_MAX_VERSION,
            });
        }
        tracing::trace!(version, "vox header accepted");
        Ok(())
    }

    fn read_chunk_header<R: Read + Seek>(
        stream: &mut ChunkStream<'_, R>,
    ) -> FormatResult<ChunkHeader> {
        let tag = stream.read_bytes::<4>()?;
        let content_size = stream.read_i32()?;
        let children_size = stream.read_i32()?;

        let check = |field: &'static str, value: i32| {
            u64::try_from(value).map_err(|_| FormatError::NegativeLength {
                tag: String::from_utf8_lossy(&tag).into_owned(),
                field,
                value,
            })
        };
        let content_size = check("content size", content_size)?;
        check("children size", children_size)?;

        Ok(ChunkHeader { tag, content_size })
    }

    /// Reads one chunk and folds it into `model`. On return the stream sits
    /// exactly at the end of the chunk's declared content.
    fn read_chunk<R: Read + Seek>(
        stream: &mut ChunkStream<'_, R>,
        model: &mut VoxelModel,
    ) -> FormatResult<()> {
        let header = Self::read_chunk_header(stream)?;
        if header.content_size > stream.remaining() {
            return Err(FormatError::Truncated { offset: stream.len });
        }
        let content_start = stream.pos;

        match &header.tag {
            b"MAIN" => {
                if header.content_size != 0 {
                    return Err(FormatError::MalformedMain {
                        content_size: i32::try_from(header.content_size).unwrap_or(i32::MAX),
                    });
                }
            }
            b"SIZE" => {
                Self::require(&header, 12)?;
                let mut dims = [0u32; 3];
                for dim in &mut dims {
                    let value = stream.read_i32()?;
                    *dim = u32::try_from(value).map_err(|_| FormatError::NegativeLength {
                        tag: header.tag_name(),
                        field: "dimension",
                        value,
                    })?;
                }
                [model.size_x, model.size_y, model.size_z] = dims;
            }
            b"XYZI" => {
                Self::require(&header, 4)?;
                let count = stream.read_i32()?;
                let count = u64::try_from(count).map_err(|_| FormatError::NegativeLength {
                    tag: header.tag_name(),
                    field: "voxel count",
                    value: count,
                })?;
                Self::require(&header, 4 + count * XYZI_RECORD_SIZE)?;

                model.voxels.clear();
                model.voxels.reserve(count as usize);
                for _ in 0..count {
                    let [x, y, z, color_index] = stream.read_bytes::<4>()?;
                    model.voxels.push(VoxVoxel::new(x, y, z, color_index));
                }
            }
            b"RGBA" => {
                Self::require(&header, RGBA_PAYLOAD_SIZE)?;
                for slot in &mut model.palette.colors {
                    let r = stream.read_u8()?;
                    let g = stream.read_u8()?;
                    let b = stream.read_u8()?;
                    let a = stream.read_u8()?;
                    *slot = Rgba::new(r, g, b, a);
                }
            }
            _ => {
                tracing::trace!(
                    tag = %header.tag_name(),
                    bytes = header.content_size,
                    "skipping unknown chunk"
                );
            }
        }

        // Whatever a known chunk did not consume is skipped, unknown chunks entirely.
        let consumed = stream.pos - content_start;
        stream.skip(header.content_size - consumed)
    }

    /// Fails if a payload of `needed` bytes does not fit the declared content.
    fn require(header: &ChunkHeader, needed: u64) -> FormatResult<()> {
        if needed > header.content_size {
            return Err(FormatError::ChunkOverrun {
                tag: header.tag_name(),
                needed,
                declared: header.content_size,
            });
        }
        Ok(())
    }
}

/// Size in bytes of a chunk with `content_size` bytes of payload, header included.
#[must_use]
pub(crate) const fn chunk_len(content_size: u64) -> u64 {
    CHUNK_HEADER_SIZE + content_size
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(tag: &[u8; 4], content: &[u8], children: i32) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(tag);
        out.extend_from_slice(&(content.len() as i32).to_le_bytes());
        out.extend_from_slice(&children.to_le_bytes());
        out.extend_from_slice(content);
        out
    }

    fn header(version: i32) -> Vec<u8> {
        let mut out = b"VOX ".to_vec();
        out.extend_from_slice(&version.to_le_bytes());
        out
    }

    fn size_content(x: i32, y: i32, z: i32) -> Vec<u8> {
        [x, y, z].iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    fn minimal_container() -> Vec<u8> {
        let mut rgba = vec![0u8; 1024];
        rgba[..4].copy_from_slice(&[255, 0, 0, 255]);

        let mut xyzi = 1i32.to_le_bytes().to_vec();
        xyzi.extend_from_slice(&[0, 0, 0, 1]);

        let mut children = chunk(b"SIZE", &size_content(2, 2, 2), 0);
        children.extend(chunk(b"XYZI", &xyzi, 0));
        children.extend(chunk(b"RGBA", &rgba, 0));

        let mut out = header(150);
        out.extend(chunk(b"MAIN", &[], children.len() as i32));
        out.extend(children);
        out
    }

    #[test]
    fn test_decode_minimal_container() {
        let model = VoxLoader::decode(&minimal_container()).unwrap();
        assert_eq!((model.size_x, model.size_y, model.size_z), (2, 2, 2));
        assert_eq!(model.voxels, vec![VoxVoxel::new(0, 0, 0, 1)]);
        assert_eq!(model.palette.get(0), Rgba::new(255, 0, 0, 255));
    }

    #[test]
    fn test_default_palette() {
        let palette = VoxPalette::default();
        // Color index 1 is white
        assert_eq!(palette.resolve(1), Some(Rgba::new(255, 255, 255, 255)));
        // The transparent slot lands at the end
        assert_eq!(palette.get(255).a, 0);
        assert_eq!(palette.resolve(0), None);
    }

    #[test]
    fn test_bad_magic() {
        let result = VoxLoader::decode(b"invalid data");
        assert!(matches!(result, Err(FormatError::BadMagic { .. })));
    }

    #[test]
    fn test_version_above_max_rejected() {
        let result = VoxLoader::decode(&header(151));
        assert!(matches!(
            result,
            Err(FormatError::UnsupportedVersion { version: 151, .. })
        ));
    }

    #[test]
    fn test_older_version_accepted() {
        let model = VoxLoader::decode(&header(100)).unwrap();
        assert_eq!(model.voxel_count(), 0);
    }

    #[test]
    fn test_main_with_content_is_malformed() {
        let mut data = header(150);
        data.extend(chunk(b"MAIN", &[0, 0, 0, 0], 0));
        assert!(matches!(
            VoxLoader::decode(&data),
            Err(FormatError::MalformedMain { content_size: 4 })
        ));
    }

    #[test]
    fn test_unknown_chunk_advances_by_content_size() {
        let data = chunk(b"nTRN", &[7u8; 28], 0);
        let mut cursor = io::Cursor::new(data.as_slice());
        let mut stream = ChunkStream::new(&mut cursor).unwrap();
        let mut model = VoxelModel::default();

        VoxLoader::read_chunk(&mut stream, &mut model).unwrap();

        assert_eq!(stream.pos, chunk_len(28));
        assert!(stream.at_end());
        assert_eq!(model, VoxelModel::default());
    }

    #[test]
    fn test_truncated_header() {
        let mut data = header(150);
        data.extend_from_slice(b"MAI");
        assert!(matches!(
            VoxLoader::decode(&data),
            Err(FormatError::Truncated { offset: 8 })
        ));
    }

    #[test]
    fn test_unknown_chunk_past_end_is_truncated() {
        let mut data = header(150);
        let mut skipped = chunk(b"MATL", &[1u8; 16], 0);
        skipped.truncate(skipped.len() - 4);
        data.extend(skipped);
        assert!(matches!(
            VoxLoader::decode(&data),
            Err(FormatError::Truncated { .. })
        ));
    }

    #[test]
    fn test_content_past_end_rejected_before_payload() {
        let count = 500_000_000i32;
        let mut data = header(150);
        data.extend_from_slice(b"XYZI");
        data.extend_from_slice(&(4 + count * 4).to_le_bytes());
        data.extend_from_slice(&0i32.to_le_bytes());
        data.extend_from_slice(&count.to_le_bytes());
        data.extend_from_slice(&[0, 0, 0, 1]);

        assert!(matches!(
            VoxLoader::decode(&data),
            Err(FormatError::Truncated { offset: 28 })
        ));
    }

    #[test]
    fn test_negative_content_size() {
        let mut data = header(150);
        data.extend_from_slice(b"SIZE");
        data.extend_from_slice(&(-1i32).to_le_bytes());
        data.extend_from_slice(&0i32.to_le_bytes());
        assert!(matches!(
            VoxLoader::decode(&data),
            Err(FormatError::NegativeLength { value: -1, .. })
        ));
    }

    #[test]
    fn test_xyzi_count_exceeding_content_is_overrun() {
        let mut xyzi = 5i32.to_le_bytes().to_vec();
        xyzi.extend_from_slice(&[0, 0, 0, 1]);
        let mut data = header(150);
        data.extend(chunk(b"XYZI", &xyzi, 0));
        assert!(matches!(
            VoxLoader::decode(&data),
            Err(FormatError::ChunkOverrun { needed: 24, declared: 8, .. })
        ));
    }

    #[test]
    fn test_oversized_known_chunk_skips_remainder() {
        let mut content = size_content(3, 4, 5);
        content.extend_from_slice(&[0xAA; 8]);
        let mut data = header(150);
        data.extend(chunk(b"SIZE", &content, 0));
        data.extend(chunk(b"SIZE", &size_content(6, 7, 8), 0));

        let model = VoxLoader::decode(&data).unwrap();
        assert_eq!((model.size_x, model.size_y, model.size_z), (6, 7, 8));
    }
}

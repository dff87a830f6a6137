//! # Rendering Error Types
//!
//! Errors raised while decoding a model container or building a voxel grid.

use std::io;

use thiserror::Error;

/// Errors that can occur while decoding a `.vox` container.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Underlying reader failed for a reason other than running out of bytes.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The first four bytes are not `"VOX "`.
    #[error("bad magic: expected \"VOX \", found {found:?}")]
    BadMagic {
        /// Bytes actually found.
        found: [u8; 4],
    },

    /// Container version newer than the decoder understands.
    #[error("unsupported version {version} (maximum {max})")]
    UnsupportedVersion {
        /// Version read from the header.
        version: i32,
        /// Highest supported version.
        max: i32,
    },

    /// The `MAIN` chunk declared content bytes.
    #[error("MAIN chunk must have no content, declared {content_size} bytes")]
    MalformedMain {
        /// Declared content length.
        content_size: i32,
    },

    /// A length or count field was negative.
    #[error("negative {field} in {tag} chunk: {value}")]
    NegativeLength {
        /// Chunk tag, lossily decoded.
        tag: String,
        /// Which field was negative.
        field: &'static str,
        /// Value read.
        value: i32,
    },

    /// The stream ended in the middle of a header or payload.
    #[error("unexpected end of data at offset {offset}")]
    Truncated {
        /// Byte offset where more data was expected.
        offset: u64,
    },

    /// A known chunk's payload ran past its declared content length.
    #[error("{tag} chunk payload is {needed} bytes, declared {declared}")]
    ChunkOverrun {
        /// Chunk tag, lossily decoded.
        tag: String,
        /// Bytes the payload requires.
        needed: u64,
        /// Declared content length.
        declared: u64,
    },
}

/// Result type for decoding operations.
pub type FormatResult<T> = Result<T, FormatError>;

/// Errors that can occur while building a dense grid from a model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A sparse record addressed a cell outside the grid.
    #[error("voxel ({x}, {y}, {z}) is outside a grid of size {size}")]
    RangeViolation {
        /// X coordinate.
        x: usize,
        /// Y coordinate.
        y: usize,
        /// Z coordinate.
        z: usize,
        /// Grid side length.
        size: usize,
    },

    /// Requested grid side exceeds what a model can address.
    #[error("grid size {size} exceeds maximum {max}")]
    SizeTooLarge {
        /// Requested side length.
        size: usize,
        /// Largest allowed side length.
        max: usize,
    },

    /// A sparse record used palette index 0, which has no palette entry.
    #[error("voxel ({x}, {y}, {z}) uses color index 0")]
    PaletteIndexZero {
        /// X coordinate.
        x: usize,
        /// Y coordinate.
        y: usize,
        /// Z coordinate.
        z: usize,
    },
}

/// Result type for grid construction.
pub type GridResult<T> = Result<T, GridError>;

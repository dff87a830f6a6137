//! Color types.
//!
//! Palette entries are stored as 8-bit RGBA; voxels only keep RGB.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 8-bit RGB color.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Black
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Creates a new color
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled into `[0, 1)` by dividing by 256.
    ///
    /// The divisor is 256, not 255, so full intensity maps just below 1.0.
    #[must_use]
    pub fn to_unit_floats(self) -> [f32; 3] {
        [
            f32::from(self.r) / 256.0,
            f32::from(self.g) / 256.0,
            f32::from(self.b) / 256.0,
        ]
    }
}

/// 8-bit RGBA color, as stored in a model palette.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Rgba {
    /// Creates a new color
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpacks a `0xAABBGGRR` word (little-endian RGBA byte order).
    #[inline]
    #[must_use]
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            r: (packed & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: ((packed >> 16) & 0xFF) as u8,
            a: ((packed >> 24) & 0xFF) as u8,
        }
    }

    /// Drops the alpha channel.
    #[inline]
    #[must_use]
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_packed() {
        let color = Rgba::from_packed(0xFF11_2233);
        assert_eq!(color, Rgba::new(0x33, 0x22, 0x11, 0xFF));
        assert_eq!(color.rgb(), Rgb::new(0x33, 0x22, 0x11));
    }

    #[test]
    fn test_unit_floats_divide_by_256() {
        let [r, g, b] = Rgb::new(255, 128, 0).to_unit_floats();
        assert!((r - 255.0 / 256.0).abs() < 1e-6);
        assert!((g - 0.5).abs() < 1e-6);
        assert_eq!(b, 0.0);
        assert!(r < 1.0);
    }
}

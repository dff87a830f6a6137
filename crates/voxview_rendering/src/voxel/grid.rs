//! Dense voxel grid.
//!
//! A cube of `size³` cells stored flat as `voxels[(x * size + y) * size + z]`, so
//! a linear walk visits cells in x, then y, then z order.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use voxview_shared::{Rgb, Rgba, MAX_GRID_SIZE};

use crate::assets::{VoxVoxel, VoxelModel};
use crate::error::{GridError, GridResult};

/// A single grid cell. `color` is meaningful only when `active`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Voxel {
    /// Whether the cell is solid.
    pub active: bool,
    /// Cell color.
    pub color: Rgb,
}

impl Voxel {
    /// Inactive cell.
    pub const EMPTY: Self = Self {
        active: false,
        color: Rgb::BLACK,
    };

    /// Creates an active cell with the given color.
    #[inline]
    #[must_use]
    pub const fn solid(color: Rgb) -> Self {
        Self {
            active: true,
            color,
        }
    }
}

/// Dense cubic voxel grid. Allocated fully at creation and never resized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    /// Side length.
    size: usize,
    /// Cells, flat-indexed.
    voxels: Box<[Voxel]>,
    /// Number of active cells.
    active_count: usize,
}

impl VoxelGrid {
    /// Creates a grid with every cell inactive.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::SizeTooLarge`] if `size` exceeds [`MAX_GRID_SIZE`].
    pub fn empty(size: usize) -> GridResult<Self> {
        Ok(Self {
            size,
            voxels: vec![Voxel::EMPTY; cell_count(size)?].into_boxed_slice(),
            active_count: 0,
        })
    }

    /// Creates a fully active grid with random per-voxel colors.
    ///
    /// The same `seed` always yields the same colors.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::SizeTooLarge`] if `size` exceeds [`MAX_GRID_SIZE`].
    pub fn synthetic(size: usize, seed: u64) -> GridResult<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let voxels: Box<[Voxel]> = (0..cell_count(size)?)
            .map(|_| {
                Voxel::solid(Rgb::new(
                    rng.gen_range(0..255),
                    rng.gen_range(0..255),
                    rng.gen_range(0..255),
                ))
            })
            .collect();

        tracing::debug!(size, seed, "built synthetic grid");

        Ok(Self {
            size,
            active_count: voxels.len(),
            voxels,
        })
    }

    /// Builds a grid from a decoded model.
    ///
    /// The side length is the largest model dimension. Each sparse record
    /// activates its cell with `palette[color_index - 1]`; a later record for
    /// the same cell overwrites the earlier one.
    ///
    /// # Errors
    ///
    /// - [`GridError::SizeTooLarge`] if a dimension exceeds [`MAX_GRID_SIZE`].
    /// - [`GridError::RangeViolation`] if a record lies outside the grid.
    /// - [`GridError::PaletteIndexZero`] if a record uses color index 0.
    pub fn from_model(model: &VoxelModel) -> GridResult<Self> {
        let size = usize::try_from(model.max_dimension()).unwrap_or(usize::MAX);
        let mut grid = Self::empty(size)?;

        for record in &model.voxels {
            let (x, y, z) = (
                usize::from(record.x),
                usize::from(record.y),
                usize::from(record.z),
            );
            if x >= size || y >= size || z >= size {
                return Err(GridError::RangeViolation { x, y, z, size });
            }
            let color = model
                .palette
                .resolve(record.color_index)
                .ok_or(GridError::PaletteIndexZero { x, y, z })?;

            grid.activate(x, y, z, color.rgb());
        }

        tracing::debug!(
            size,
            records = model.voxel_count(),
            active = grid.active_count,
            "built grid from model"
        );

        Ok(grid)
    }

    fn activate(&mut self, x: usize, y: usize, z: usize, color: Rgb) {
        let idx = self.index(x, y, z);
        if !self.voxels[idx].active {
            self.active_count += 1;
        }
        self.voxels[idx] = Voxel::solid(color);
    }

    /// Calculates the linear index for a cell.
    #[inline]
    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < self.size && y < self.size && z < self.size);
        (x * self.size + y) * self.size + z
    }

    /// Side length of the grid.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Number of active cells.
    #[inline]
    #[must_use]
    pub const fn active_count(&self) -> usize {
        self.active_count
    }

    /// Returns true if no cell is active.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.active_count == 0
    }

    /// Gets the cell at the given position.
    ///
    /// # Panics
    /// Panics if any coordinate is `>= size()`.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Voxel {
        assert!(
            x < self.size && y < self.size && z < self.size,
            "({x}, {y}, {z}) outside grid of size {}",
            self.size
        );
        self.voxels[self.index(x, y, z)]
    }

    /// Gets the cell at the given position, or None if out of bounds.
    #[inline]
    #[must_use]
    pub fn try_get(&self, x: usize, y: usize, z: usize) -> Option<Voxel> {
        if x < self.size && y < self.size && z < self.size {
            Some(self.voxels[self.index(x, y, z)])
        } else {
            None
        }
    }

    /// Converts the grid back into a sparse model.
    ///
    /// Colors are added to the palette in first-seen order. Once all 255
    /// usable slots are taken, further colors reuse the nearest existing entry.
    #[must_use]
    pub fn to_model(&self) -> VoxelModel {
        let mut model = VoxelModel {
            size_x: self.size as u32,
            size_y: self.size as u32,
            size_z: self.size as u32,
            voxels: Vec::with_capacity(self.active_count),
            ..VoxelModel::default()
        };
        let mut used: Vec<Rgb> = Vec::new();

        for (x, y, z, color) in self.iter_active() {
            let slot = match used.iter().position(|&c| c == color) {
                Some(slot) => slot,
                None if used.len() < 255 => {
                    model.palette.colors[used.len()] = Rgba::new(color.r, color.g, color.b, 255);
                    used.push(color);
                    used.len() - 1
                }
                None => nearest(&used, color),
            };
            model
                .voxels
                .push(VoxVoxel::new(x as u8, y as u8, z as u8, slot as u8 + 1));
        }

        model
    }

    /// Iterates active cells as `(x, y, z, color)` in x, then y, then z order.
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, usize, usize, Rgb)> + '_ {
        let size = self.size;
        self.voxels
            .iter()
            .enumerate()
            .filter(|(_, voxel)| voxel.active)
            .map(move |(idx, voxel)| {
                let z = idx % size;
                let y = (idx / size) % size;
                let x = idx / (size * size);
                (x, y, z, voxel.color)
            })
    }
}

/// Number of cells in a grid of side `size`.
fn cell_count(size: usize) -> GridResult<usize> {
    let too_large = GridError::SizeTooLarge {
        size,
        max: MAX_GRID_SIZE,
    };
    if size > MAX_GRID_SIZE {
        return Err(too_large);
    }
    size.checked_mul(size).and_then(|n| n.checked_mul(size)).ok_or(too_large)
}

/// Index of the palette color closest to `color` in RGB space.
fn nearest(palette: &[Rgb], color: Rgb) -> usize {
    let dist = |c: &Rgb| {
        let d = |a: u8, b: u8| (i32::from(a) - i32::from(b)).pow(2);
        d(c.r, color.r) + d(c.g, color.g) + d(c.b, color.b)
    };
    palette
        .iter()
        .enumerate()
        .min_by_key(|(_, c)| dist(c))
        .map_or(0, |(i, _)| i)
}

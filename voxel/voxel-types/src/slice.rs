//! Two-dimensional raster for one Z slice of a field.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A grayscale raster holding one Z slice of signed distance values.
///
/// Cells are stored row-major: `x` selects the column, `y` the row. Values
/// `<= 0` are inside the shape.
///
/// The raster is meant to be allocated once and handed to
/// [`VoxelField::slice`](crate::VoxelField::slice) repeatedly; every
/// extraction overwrites all cells.
///
/// # Example
///
/// ```
/// use voxel_types::GrayscaleSlice;
///
/// let mut slice = GrayscaleSlice::new(3, 2);
/// slice.set(2, 1, -0.5);
/// assert_eq!(slice.value(2, 1), Some(-0.5));
/// assert_eq!(slice.value(3, 0), None);
/// assert_eq!(slice.cells().filter(|&(_, _, v)| v <= 0.0).count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GrayscaleSlice {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl GrayscaleSlice {
    /// Allocate a `width` x `height` raster with every cell outside (`+inf`).
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            values: vec![f32::INFINITY; width.saturating_mul(height)],
        }
    }

    /// Width (columns).
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height (rows).
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Value at column `x`, row `y`.
    #[must_use]
    pub fn value(&self, x: usize, y: usize) -> Option<f32> {
        self.index(x, y).map(|i| self.values[i])
    }

    /// Set the value at column `x`, row `y`.
    ///
    /// Returns the previous value, or `None` (and does nothing) if the cell
    /// is outside the raster.
    pub fn set(&mut self, x: usize, y: usize, value: f32) -> Option<f32> {
        let i = self.index(x, y)?;
        Some(std::mem::replace(&mut self.values[i], value))
    }

    /// Overwrite every cell.
    pub fn fill(&mut self, value: f32) {
        self.values.fill(value);
    }

    /// Row-major cell values.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Mutable row-major cell values, for engines filling the raster.
    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }

    /// Iterate `(x, y, value)` over all cells, x fastest.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        let width = self.width.max(1);
        self.values
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i % width, i / width, v))
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

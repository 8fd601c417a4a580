//! Grid coordinates and dimensions.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A discrete 3D coordinate in voxel space.
///
/// Signed so that traversal can step one voxel past either edge of a grid
/// and still be represented.
///
/// # Example
///
/// ```
/// use voxel_types::VoxelCoord;
///
/// let coord = VoxelCoord::new(1, 2, 3);
/// assert_eq!(coord.as_array(), [1, 2, 3]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoxelCoord {
    /// X index (column of a slice).
    pub x: i32,
    /// Y index (row of a slice).
    pub y: i32,
    /// Z index (slice number).
    pub z: i32,
}

impl VoxelCoord {
    /// Creates a new voxel coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the coordinate as an array.
    #[must_use]
    pub const fn as_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// Returns the 6 face-adjacent neighbors.
    ///
    /// # Example
    ///
    /// ```
    /// use voxel_types::VoxelCoord;
    ///
    /// let neighbors = VoxelCoord::new(0, 0, 0).face_neighbors();
    /// assert!(neighbors.contains(&VoxelCoord::new(-1, 0, 0)));
    /// assert!(neighbors.contains(&VoxelCoord::new(0, 0, 1)));
    /// ```
    #[must_use]
    pub const fn face_neighbors(self) -> [Self; 6] {
        [
            Self::new(self.x.wrapping_add(1), self.y, self.z),
            Self::new(self.x.wrapping_sub(1), self.y, self.z),
            Self::new(self.x, self.y.wrapping_add(1), self.z),
            Self::new(self.x, self.y.wrapping_sub(1), self.z),
            Self::new(self.x, self.y, self.z.wrapping_add(1)),
            Self::new(self.x, self.y, self.z.wrapping_sub(1)),
        ]
    }
}

impl From<[i32; 3]> for VoxelCoord {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// Voxel counts along each axis of a field.
///
/// A slice of the field is `x` columns by `y` rows, and there are `z`
/// slices.
///
/// # Example
///
/// ```
/// use voxel_types::GridDimensions;
///
/// let dims = GridDimensions::new(4, 3, 2);
/// assert_eq!(dims.voxel_count(), 24);
/// assert_eq!(dims.slice_len(), 12);
/// assert!(!dims.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridDimensions {
    /// Voxels along X.
    pub x: usize,
    /// Voxels along Y.
    pub y: usize,
    /// Voxels along Z.
    pub z: usize,
}

impl GridDimensions {
    /// Creates new grid dimensions.
    #[must_use]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Same count along every axis.
    #[must_use]
    pub const fn cube(n: usize) -> Self {
        Self::new(n, n, n)
    }

    /// Total number of voxels.
    #[must_use]
    pub const fn voxel_count(&self) -> usize {
        self.x.saturating_mul(self.y).saturating_mul(self.z)
    }

    /// Number of cells in one Z slice.
    #[must_use]
    pub const fn slice_len(&self) -> usize {
        self.x.saturating_mul(self.y)
    }

    /// Returns `true` if any axis has no voxels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.x == 0 || self.y == 0 || self.z == 0
    }

    /// Returns `true` if `coord` lies inside `0..x`, `0..y`, `0..z`.
    #[must_use]
    pub fn contains(&self, coord: VoxelCoord) -> bool {
        let within = |v: i32, n: usize| usize::try_from(v).is_ok_and(|v| v < n);
        within(coord.x, self.x) && within(coord.y, self.y) && within(coord.z, self.z)
    }

    /// Flat index of `coord` in x-fastest order, or `None` if outside.
    #[must_use]
    pub fn linear_index(&self, coord: VoxelCoord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        let x = usize::try_from(coord.x).ok()?;
        let y = usize::try_from(coord.y).ok()?;
        let z = usize::try_from(coord.z).ok()?;
        Some(x + self.x * (y + self.y * z))
    }

    /// Coordinate for a flat index produced by [`linear_index`](Self::linear_index).
    ///
    /// Returns `None` if the index is past the end or does not fit in `i32`.
    #[must_use]
    pub fn coord_of(&self, index: usize) -> Option<VoxelCoord> {
        if index >= self.voxel_count() {
            return None;
        }
        let x = index % self.x;
        let y = (index / self.x) % self.y;
        let z = index / self.slice_len();
        Some(VoxelCoord::new(
            i32::try_from(x).ok()?,
            i32::try_from(y).ok()?,
            i32::try_from(z).ok()?,
        ))
    }
}

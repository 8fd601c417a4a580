//! Centre-of-gravity parameters and presets.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a voxel index is mapped to a world position inside the bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Interpolation {
    /// `min + (index / count) * size`.
    ///
    /// Places each voxel at its minimum corner, so results sit about half a
    /// voxel toward `min` on every axis. Matches the historical output of
    /// this measurement.
    #[default]
    IndexRatio,

    /// `min + ((index + 0.5) / count) * size`, the voxel centre.
    VoxelCenter,
}

impl Interpolation {
    /// Fraction along an axis of `count` voxels for voxel `index`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(self, index: usize, count: usize) -> f64 {
        let offset = match self {
            Self::IndexRatio => 0.0,
            Self::VoxelCenter => 0.5,
        };
        (index as f64 + offset) / count as f64
    }
}

/// Parameters for [`centre_of_gravity_with`](crate::centre_of_gravity_with).
///
/// # Example
///
/// ```
/// use voxel_measure::{CentroidParams, Interpolation};
///
/// let params = CentroidParams::default();
/// assert_eq!(params.interpolation, Interpolation::IndexRatio);
///
/// let centred = CentroidParams::voxel_centered().with_inside_threshold(0.1);
/// assert_eq!(centred.interpolation, Interpolation::VoxelCenter);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CentroidParams {
    /// Index to position mapping.
    pub interpolation: Interpolation,

    /// Raster values `<=` this count as inside.
    pub inside_threshold: f32,
}

impl Default for CentroidParams {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::IndexRatio,
            inside_threshold: 0.0,
        }
    }
}

impl CentroidParams {
    /// Sample voxels at their centres instead of their minimum corners.
    #[must_use]
    pub fn voxel_centered() -> Self {
        Self {
            interpolation: Interpolation::VoxelCenter,
            ..Default::default()
        }
    }

    /// Replace the interpolation mode.
    #[must_use]
    pub const fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Replace the inside threshold.
    #[must_use]
    pub const fn with_inside_threshold(mut self, threshold: f32) -> Self {
        self.inside_threshold = threshold;
        self
    }
}

//! Error types for voxel field construction and slice extraction.

use thiserror::Error;

/// Result type alias for voxel field construction.
pub type VoxelResult<T> = Result<T, VoxelError>;

/// Errors that can occur while building a voxel field.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VoxelError {
    /// The voxel size must be positive and finite.
    #[error("voxel size must be positive, got {0}")]
    InvalidVoxelSize(f64),

    /// Every grid axis needs at least one voxel.
    #[error("invalid grid dimensions: {x}x{y}x{z}")]
    InvalidDimensions {
        /// Voxel count along X.
        x: usize,
        /// Voxel count along Y.
        y: usize,
        /// Voxel count along Z.
        z: usize,
    },
}

/// Failure to extract a single Z slice from a voxel field.
///
/// Returned by [`VoxelField::slice`](crate::VoxelField::slice). Callers that
/// iterate over slices can recover from this error and keep going, since it
/// only describes the one slice that was requested.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SliceError {
    /// The requested slice index is past the end of the Z axis.
    #[error("slice {index} is out of range for a field {depth} voxels deep")]
    OutOfRange {
        /// Requested slice index.
        index: usize,
        /// Number of slices along Z.
        depth: usize,
    },

    /// The destination raster does not match the field's X/Y extent.
    #[error("slice buffer is {}x{}, expected {}x{}", .actual.0, .actual.1, .expected.0, .expected.1)]
    SizeMismatch {
        /// Width and height the field produces.
        expected: (usize, usize),
        /// Width and height of the supplied buffer.
        actual: (usize, usize),
    },

    /// The engine could not produce the slice.
    #[error("slice {index} unavailable: {reason}")]
    Unavailable {
        /// Requested slice index.
        index: usize,
        /// Engine-specific description.
        reason: String,
    },
}

impl SliceError {
    /// Create an engine-specific extraction failure.
    #[must_use]
    pub fn unavailable(index: usize, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            index,
            reason: reason.into(),
        }
    }
}

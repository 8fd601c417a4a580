//! Error types for voxel measurement operations.

use nalgebra::{Point3, Vector3};
use thiserror::Error;

/// Result type alias for measurement operations.
pub type MeasureResult<T> = Result<T, MeasureError>;

/// Errors that can occur during measurement operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MeasureError {
    /// The engine found no surface point near the query point.
    #[error("no surface point found for query point {point}")]
    NoSurfacePoint {
        /// The query point.
        point: Point3<f64>,
    },

    /// The ray never crosses the field surface.
    #[error("ray from {origin} along {direction} does not reach the surface")]
    NoRayIntersection {
        /// Ray origin.
        origin: Point3<f64>,
        /// Ray direction as given by the caller.
        direction: Vector3<f64>,
    },

    /// No voxel of the field is inside the shape.
    #[error("voxel field has no inside voxels")]
    EmptyField,

    /// The engine reported a bounding box with NaN or infinite coordinates.
    #[error("voxel field reported non-finite bounds: min {min}, max {max}")]
    NonFiniteBounds {
        /// Reported minimum corner.
        min: Point3<f64>,
        /// Reported maximum corner.
        max: Point3<f64>,
    },

    /// Invalid measurement parameters.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

impl MeasureError {
    /// Create an invalid params error.
    #[must_use]
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::InvalidParams(details.into())
    }
}

//! The voxel engine seam.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bounds::Aabb;
use crate::coord::GridDimensions;
use crate::error::SliceError;
use crate::slice::GrayscaleSlice;

/// Volume and extent of the occupied part of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldProperties {
    /// Total occupied volume in world units cubed.
    pub volume: f64,
    /// Bounding box reported by the engine.
    pub bounds: Aabb,
}

/// Primitives a voxel geometry engine exposes to the measurement utilities.
///
/// Implementations own the volumetric representation and its algorithms
/// (distance queries, ray marching, slice extraction). Every method takes
/// `&self`: queries never mutate the field.
///
/// Queries that can fail to find an answer return `Option`, so an invalid
/// point can never be observed by a caller.
pub trait VoxelField {
    /// Nearest point on the field's surface to `point`.
    ///
    /// `point` may be inside, outside or on the surface. Returns `None` when
    /// the field has no surface (for example when it is empty).
    fn closest_surface_point(&self, point: &Point3<f64>) -> Option<Point3<f64>>;

    /// First surface crossing along the ray `origin + t * direction`, `t >= 0`.
    ///
    /// `direction` need not be normalized. Returns `None` if the ray never
    /// crosses the surface.
    fn raycast_to_surface(&self, origin: &Point3<f64>, direction: &Vector3<f64>)
    -> Option<Point3<f64>>;

    /// Occupied volume and bounding box.
    fn properties(&self) -> FieldProperties;

    /// Voxel counts along X, Y and Z.
    fn voxel_dimensions(&self) -> GridDimensions;

    /// Write Z slice `z` into `buffer`.
    ///
    /// `buffer` must be `dims.x` wide and `dims.y` tall.
    ///
    /// # Errors
    ///
    /// Returns a [`SliceError`] if this one slice cannot be produced. The
    /// buffer contents are unspecified after a failure.
    fn slice(&self, z: usize, buffer: &mut GrayscaleSlice) -> Result<(), SliceError>;
}

impl<T: VoxelField + ?Sized> VoxelField for &T {
    fn closest_surface_point(&self, point: &Point3<f64>) -> Option<Point3<f64>> {
        (**self).closest_surface_point(point)
    }

    fn raycast_to_surface(
        &self,
        origin: &Point3<f64>,
        direction: &Vector3<f64>,
    ) -> Option<Point3<f64>> {
        (**self).raycast_to_surface(origin, direction)
    }

    fn properties(&self) -> FieldProperties {
        (**self).properties()
    }

    fn voxel_dimensions(&self) -> GridDimensions {
        (**self).voxel_dimensions()
    }

    fn slice(&self, z: usize, buffer: &mut GrayscaleSlice) -> Result<(), SliceError> {
        (**self).slice(z, buffer)
    }
}

impl<T: VoxelField + ?Sized> VoxelField for Box<T> {
    fn closest_surface_point(&self, point: &Point3<f64>) -> Option<Point3<f64>> {
        (**self).closest_surface_point(point)
    }

    fn raycast_to_surface(
        &self,
        origin: &Point3<f64>,
        direction: &Vector3<f64>,
    ) -> Option<Point3<f64>> {
        (**self).raycast_to_surface(origin, direction)
    }

    fn properties(&self) -> FieldProperties {
        (**self).properties()
    }

    fn voxel_dimensions(&self) -> GridDimensions {
        (**self).voxel_dimensions()
    }

    fn slice(&self, z: usize, buffer: &mut GrayscaleSlice) -> Result<(), SliceError> {
        (**self).slice(z, buffer)
    }
}

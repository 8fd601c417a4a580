//! Bounding box and volume of a field.

use voxel_types::{Aabb, VoxelField};

/// Bounding box of the field, exactly as the engine reports it.
///
/// An empty field yields the engine's degenerate box; for
/// [`DenseVoxelField`](voxel_types::DenseVoxelField) that is
/// [`Aabb::empty`].
///
/// # Example
///
/// ```
/// use voxel_types::{DenseVoxelField, GridDimensions, VoxelCoord};
/// use voxel_measure::bounding_box;
/// use nalgebra::Point3;
///
/// let mut field = DenseVoxelField::new(GridDimensions::cube(2), 0.5, Point3::origin());
/// assert!(bounding_box(&field).is_empty());
///
/// field.set(VoxelCoord::new(0, 0, 0), -1.0);
/// assert_eq!(bounding_box(&field).max, Point3::new(1.0, 1.0, 1.0));
/// ```
#[must_use]
pub fn bounding_box<F>(field: &F) -> Aabb
where
    F: VoxelField + ?Sized,
{
    field.properties().bounds
}

/// Occupied volume of the field, in world units cubed.
#[must_use]
pub fn occupied_volume<F>(field: &F) -> f64
where
    F: VoxelField + ?Sized,
{
    field.properties().volume
}

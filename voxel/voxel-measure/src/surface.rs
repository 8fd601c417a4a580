//! Surface point queries.

use nalgebra::{Point3, Vector3};
use tracing::debug;
use voxel_types::VoxelField;

use crate::error::{MeasureError, MeasureResult};

/// Nearest point on the field's surface to `point`.
///
/// `point` may be inside, outside or on the surface. Precision is the
/// engine's: [`DenseVoxelField`](voxel_types::DenseVoxelField) quantises the
/// result to voxel centres, up to half a voxel inside the true surface.
///
/// # Errors
///
/// Returns [`MeasureError::NoSurfacePoint`] if the field has no surface to
/// project onto (for example an empty field).
///
/// # Example
///
/// ```
/// use voxel_types::{DenseVoxelField, GridDimensions, VoxelCoord};
/// use voxel_measure::closest_surface_point;
/// use nalgebra::Point3;
///
/// let mut field = DenseVoxelField::new(GridDimensions::cube(4), 1.0, Point3::origin());
/// field.set(VoxelCoord::new(1, 1, 1), -1.0);
///
/// let p = closest_surface_point(&field, &Point3::new(10.0, 1.5, 1.5)).unwrap();
/// assert_eq!(p, Point3::new(1.5, 1.5, 1.5));
/// ```
pub fn closest_surface_point<F>(field: &F, point: &Point3<f64>) -> MeasureResult<Point3<f64>>
where
    F: VoxelField + ?Sized,
{
    field.closest_surface_point(point).ok_or_else(|| {
        debug!(?point, "no closest surface point");
        MeasureError::NoSurfacePoint { point: *point }
    })
}

/// Point where the ray from `point` along `direction` meets the surface.
///
/// `direction` does not need to be normalized.
///
/// # Errors
///
/// Returns [`MeasureError::InvalidParams`] for a zero or non-finite
/// direction, and [`MeasureError::NoRayIntersection`] if the ray never
/// reaches the surface.
///
/// # Example
///
/// ```
/// use voxel_types::{DenseVoxelField, GridDimensions, VoxelCoord};
/// use voxel_measure::projected_surface_point;
/// use nalgebra::{Point3, Vector3};
///
/// let mut field = DenseVoxelField::new(GridDimensions::cube(4), 1.0, Point3::origin());
/// field.set(VoxelCoord::new(3, 0, 0), -1.0);
///
/// let hit = projected_surface_point(&field, &Point3::new(0.5, 0.5, 0.5), &Vector3::x()).unwrap();
/// assert_eq!(hit, Point3::new(3.0, 0.5, 0.5));
/// ```
pub fn projected_surface_point<F>(
    field: &F,
    point: &Point3<f64>,
    direction: &Vector3<f64>,
) -> MeasureResult<Point3<f64>>
where
    F: VoxelField + ?Sized,
{
    let norm = direction.norm();
    if !norm.is_finite() || norm < f64::EPSILON {
        return Err(MeasureError::invalid_params(format!(
            "projection direction must be non-zero and finite, got {direction}"
        )));
    }

    field.raycast_to_surface(point, direction).ok_or_else(|| {
        debug!(origin = ?point, ?direction, "ray does not reach the surface");
        MeasureError::NoRayIntersection {
            origin: *point,
            direction: *direction,
        }
    })
}

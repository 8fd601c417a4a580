//! Centre of gravity by Z-slice summation.
//!
//! The field is read one Z slice at a time into a single reusable raster.
//! Every inside cell contributes its interpolated world position to a
//! running mean. A slice the engine fails to produce is skipped: it adds
//! nothing to the sum or the count, and the rest of the field is still
//! measured.

use nalgebra::{Point3, Vector3};
use tracing::{debug, warn};
use voxel_types::{GrayscaleSlice, VoxelField};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MeasureError, MeasureResult};
use crate::params::CentroidParams;

/// Outcome of a centre-of-gravity measurement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CentroidReport {
    /// Mean position of all inside voxels that were read.
    pub centre: Point3<f64>,
    /// Number of inside voxels accumulated.
    pub inside_voxels: usize,
    /// Number of slices read successfully.
    pub slices_processed: usize,
    /// Z indices the engine failed to produce, in ascending order.
    pub skipped_slices: Vec<usize>,
}

impl CentroidReport {
    /// `true` if every slice was read.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped_slices.is_empty()
    }
}

/// Approximate the volumetric centroid of a field's inside voxels.
///
/// Uses [`CentroidParams::default`]: values `<= 0` are inside and voxel
/// indices map to positions with [`Interpolation::IndexRatio`].
///
/// [`Interpolation::IndexRatio`]: crate::Interpolation::IndexRatio
///
/// # Errors
///
/// Returns [`MeasureError::EmptyField`] if no inside voxel is found and
/// [`MeasureError::NonFiniteBounds`] if the engine's bounds are not finite.
///
/// # Example
///
/// ```
/// use voxel_types::{DenseVoxelField, GridDimensions, VoxelCoord};
/// use voxel_measure::centre_of_gravity;
/// use nalgebra::Point3;
///
/// let mut field = DenseVoxelField::new(GridDimensions::cube(4), 1.0, Point3::origin());
/// field.set(VoxelCoord::new(1, 2, 3), -1.0);
///
/// // Index ratio: min + (index / 4) * size, with a 4-unit box.
/// let centre = centre_of_gravity(&field).unwrap();
/// assert_eq!(centre, Point3::new(1.0, 2.0, 3.0));
/// ```
pub fn centre_of_gravity<F>(field: &F) -> MeasureResult<Point3<f64>>
where
    F: VoxelField + ?Sized,
{
    centre_of_gravity_with(field, &CentroidParams::default()).map(|report| report.centre)
}

/// Approximate the volumetric centroid with explicit parameters.
///
/// Returns a [`CentroidReport`] that also lists any slices the engine could
/// not produce.
///
/// # Errors
///
/// Returns [`MeasureError::EmptyField`] if no inside voxel is found in the
/// slices that could be read, including when the field has no voxels or
/// every slice failed. Returns [`MeasureError::NonFiniteBounds`] if the
/// engine's bounding box has a NaN or infinite coordinate.
pub fn centre_of_gravity_with<F>(field: &F, params: &CentroidParams) -> MeasureResult<CentroidReport>
where
    F: VoxelField + ?Sized,
{
    let dims = field.voxel_dimensions();
    let bounds = field.properties().bounds;

    debug!(
        x = dims.x,
        y = dims.y,
        z = dims.z,
        interpolation = ?params.interpolation,
        "Starting centre of gravity"
    );

    if dims.is_empty() || bounds.is_empty() {
        return Err(MeasureError::EmptyField);
    }
    let finite = |p: &Point3<f64>| p.coords.iter().all(|v| v.is_finite());
    if !finite(&bounds.min) || !finite(&bounds.max) {
        warn!(min = ?bounds.min, max = ?bounds.max, "Non-finite field bounds");
        return Err(MeasureError::NonFiniteBounds {
            min: bounds.min,
            max: bounds.max,
        });
    }

    let min = bounds.min;
    let size = bounds.size();
    let interpolation = params.interpolation;

    let mut buffer = GrayscaleSlice::new(dims.x, dims.y);
    let mut sum = Vector3::<f64>::zeros();
    let mut count = 0usize;
    let mut slices_processed = 0usize;
    let mut skipped_slices = Vec::new();

    for z in 0..dims.z {
        if let Err(err) = field.slice(z, &mut buffer) {
            warn!(slice = z, error = %err, "Skipping slice");
            skipped_slices.push(z);
            continue;
        }
        slices_processed += 1;

        let fz = size.z.mul_add(interpolation.ratio(z, dims.z), min.z);
        for (i, j, value) in buffer.cells() {
            if value > params.inside_threshold {
                continue;
            }
            sum += Vector3::new(
                size.x.mul_add(interpolation.ratio(i, dims.x), min.x),
                size.y.mul_add(interpolation.ratio(j, dims.y), min.y),
                fz,
            );
            count += 1;
        }
    }

    debug!(
        inside_voxels = count,
        skipped = skipped_slices.len(),
        "Centre of gravity complete"
    );

    if count == 0 {
        return Err(MeasureError::EmptyField);
    }

    #[allow(clippy::cast_precision_loss)]
    let centre = Point3::from(sum / count as f64);

    Ok(CentroidReport {
        centre,
        inside_voxels: count,
        slices_processed,
        skipped_slices,
    })
}

//! Dense reference implementation of [`VoxelField`].

use nalgebra::{Point3, Vector3};

use crate::bounds::Aabb;
use crate::coord::{GridDimensions, VoxelCoord};
use crate::error::{SliceError, VoxelError, VoxelResult};
use crate::field::{FieldProperties, VoxelField};
use crate::raycast::{Ray, VoxelTraversal};
use crate::slice::GrayscaleSlice;

/// A regular grid of signed distance samples.
///
/// Voxel `(x, y, z)` covers the world-space cube starting at
/// `origin + (x, y, z) * voxel_size`. A sample `<= 0` means the voxel is
/// inside the shape.
///
/// This is a straightforward engine: every query scans or walks the dense
/// array. It is meant for tests, tools and small fields.
///
/// # Example
///
/// ```
/// use voxel_types::{DenseVoxelField, GridDimensions, VoxelCoord, VoxelField};
/// use nalgebra::Point3;
///
/// // A sphere of radius 3 sampled on a 10^3 grid of unit voxels.
/// let center = Point3::new(5.0, 5.0, 5.0);
/// let field = DenseVoxelField::from_fn(GridDimensions::cube(10), 1.0, Point3::origin(), |p| {
///     ((p - center).norm() - 3.0) as f32
/// })
/// .unwrap();
///
/// assert!(field.is_inside(VoxelCoord::new(5, 5, 5)));
/// assert!(!field.is_inside(VoxelCoord::new(0, 0, 0)));
/// assert!(field.properties().volume > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct DenseVoxelField {
    dims: GridDimensions,
    voxel_size: f64,
    origin: Point3<f64>,
    /// Samples in x-fastest order.
    values: Vec<f32>,
}

impl DenseVoxelField {
    /// Create a field with every voxel outside (`+inf`).
    ///
    /// An invalid voxel size is replaced by its absolute value (at least
    /// `f64::EPSILON`); use [`try_new`](Self::try_new) to reject it instead.
    #[must_use]
    pub fn new(dims: GridDimensions, voxel_size: f64, origin: Point3<f64>) -> Self {
        let voxel_size = if voxel_size.is_finite() {
            voxel_size.abs().max(f64::EPSILON)
        } else {
            1.0
        };
        Self {
            dims,
            voxel_size,
            origin,
            values: vec![f32::INFINITY; dims.voxel_count()],
        }
    }

    /// Create an all-outside field, validating the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`VoxelError::InvalidVoxelSize`] if `voxel_size` is not
    /// positive and finite, and [`VoxelError::InvalidDimensions`] if any
    /// axis is zero.
    pub fn try_new(dims: GridDimensions, voxel_size: f64, origin: Point3<f64>) -> VoxelResult<Self> {
        if voxel_size <= 0.0 || !voxel_size.is_finite() {
            return Err(VoxelError::InvalidVoxelSize(voxel_size));
        }
        if dims.is_empty() {
            return Err(VoxelError::InvalidDimensions {
                x: dims.x,
                y: dims.y,
                z: dims.z,
            });
        }
        Ok(Self::new(dims, voxel_size, origin))
    }

    /// Create a field by sampling `sdf` at every voxel centre.
    ///
    /// # Errors
    ///
    /// Same as [`try_new`](Self::try_new).
    pub fn from_fn<F>(
        dims: GridDimensions,
        voxel_size: f64,
        origin: Point3<f64>,
        mut sdf: F,
    ) -> VoxelResult<Self>
    where
        F: FnMut(Point3<f64>) -> f32,
    {
        let mut field = Self::try_new(dims, voxel_size, origin)?;
        for index in 0..field.values.len() {
            if let Some(coord) = dims.coord_of(index) {
                field.values[index] = sdf(field.voxel_center(coord));
            }
        }
        Ok(field)
    }

    /// Grid dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    /// Edge length of one voxel.
    #[must_use]
    pub const fn voxel_size(&self) -> f64 {
        self.voxel_size
    }

    /// World position of the grid's minimum corner.
    #[must_use]
    pub const fn origin(&self) -> &Point3<f64> {
        &self.origin
    }

    /// World-space box covered by the whole grid.
    #[must_use]
    pub fn grid_bounds(&self) -> Aabb {
        #[allow(clippy::cast_precision_loss)]
        let extent = Vector3::new(self.dims.x as f64, self.dims.y as f64, self.dims.z as f64)
            * self.voxel_size;
        Aabb::from_min_size(self.origin, extent)
    }

    /// Returns `true` if `coord` addresses a voxel of this grid.
    #[must_use]
    pub fn in_grid(&self, coord: VoxelCoord) -> bool {
        self.dims.contains(coord)
    }

    /// Sample at `coord`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, coord: VoxelCoord) -> Option<f32> {
        self.dims.linear_index(coord).map(|i| self.values[i])
    }

    /// Store a sample, returning the previous one.
    ///
    /// Returns `None` and does nothing if `coord` is outside the grid.
    pub fn set(&mut self, coord: VoxelCoord, value: f32) -> Option<f32> {
        let i = self.dims.linear_index(coord)?;
        Some(std::mem::replace(&mut self.values[i], value))
    }

    /// Returns `true` if `coord` is in the grid and its sample is `<= 0`.
    #[must_use]
    pub fn is_inside(&self, coord: VoxelCoord) -> bool {
        self.get(coord).is_some_and(|v| v <= 0.0)
    }

    /// Number of inside voxels.
    #[must_use]
    pub fn inside_count(&self) -> usize {
        self.values.iter().filter(|v| **v <= 0.0).count()
    }

    /// World-space centre of a voxel.
    #[must_use]
    pub fn voxel_center(&self, coord: VoxelCoord) -> Point3<f64> {
        let half = self.voxel_size * 0.5;
        Point3::new(
            f64::from(coord.x).mul_add(self.voxel_size, self.origin.x) + half,
            f64::from(coord.y).mul_add(self.voxel_size, self.origin.y) + half,
            f64::from(coord.z).mul_add(self.voxel_size, self.origin.z) + half,
        )
    }

    /// Voxel containing a world-space point. May lie outside the grid.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn world_to_grid(&self, point: &Point3<f64>) -> VoxelCoord {
        let relative = (point - self.origin) / self.voxel_size;
        VoxelCoord::new(
            relative.x.floor() as i32,
            relative.y.floor() as i32,
            relative.z.floor() as i32,
        )
    }

    /// An inside voxel with at least one face neighbour that is outside or
    /// off the grid.
    fn is_surface(&self, coord: VoxelCoord) -> bool {
        self.is_inside(coord)
            && coord
                .face_neighbors()
                .into_iter()
                .any(|n| !self.is_inside(n))
    }

    fn surface_voxels(&self) -> impl Iterator<Item = VoxelCoord> + '_ {
        (0..self.values.len())
            .filter_map(|i| self.dims.coord_of(i))
            .filter(|c| self.is_surface(*c))
    }

    /// Clamp a coordinate onto the grid, axis by axis.
    fn clamp_to_grid(&self, coord: VoxelCoord) -> VoxelCoord {
        let clamp = |v: i32, n: usize| {
            let hi = i32::try_from(n.saturating_sub(1)).unwrap_or(i32::MAX);
            v.clamp(0, hi)
        };
        VoxelCoord::new(
            clamp(coord.x, self.dims.x),
            clamp(coord.y, self.dims.y),
            clamp(coord.z, self.dims.z),
        )
    }
}

impl Default for DenseVoxelField {
    fn default() -> Self {
        Self::new(GridDimensions::cube(1), 1.0, Point3::origin())
    }
}

impl VoxelField for DenseVoxelField {
    /// Centre of the nearest surface voxel.
    ///
    /// The result is quantised to voxel centres, so it lies up to half a
    /// voxel inside the true surface.
    fn closest_surface_point(&self, point: &Point3<f64>) -> Option<Point3<f64>> {
        let mut best: Option<(f64, Point3<f64>)> = None;
        for coord in self.surface_voxels() {
            let center = self.voxel_center(coord);
            let dist_sq = (center - point).norm_squared();
            if best.is_none_or(|(d, _)| dist_sq < d) {
                best = Some((dist_sq, center));
            }
        }
        best.map(|(_, p)| p)
    }

    /// Entry point of the first voxel whose inside state differs from the
    /// voxel the ray starts in. Off-grid space counts as outside, so the grid
    /// boundary is a surface wherever solid voxels touch it.
    fn raycast_to_surface(
        &self,
        origin: &Point3<f64>,
        direction: &Vector3<f64>,
    ) -> Option<Point3<f64>> {
        let ray = Ray::new(*origin, *direction);
        if ray.is_degenerate() || self.dims.is_empty() {
            return None;
        }

        let (t_enter, t_exit) = self.grid_bounds().ray_interval(origin, direction)?;
        let start = self.clamp_to_grid(self.world_to_grid(&ray.point_at(t_enter)));

        // A ray starting off the grid starts in empty space.
        let mut started_inside = (t_enter > 0.0).then_some(false);

        let walk = VoxelTraversal::starting_at(&ray, self.voxel_size, &self.origin, start, t_enter);
        for (coord, t) in walk {
            if t > t_exit || !self.in_grid(coord) {
                break;
            }
            let inside = self.is_inside(coord);
            match started_inside {
                None => started_inside = Some(inside),
                Some(state) if state != inside => return Some(ray.point_at(t)),
                Some(_) => {}
            }
        }

        // Off-grid cells are outside, so leaving the grid from solid crosses
        // the surface at the grid boundary.
        (started_inside == Some(true)).then(|| ray.point_at(t_exit))
    }

    fn properties(&self) -> FieldProperties {
        let inside = self.inside_count();
        #[allow(clippy::cast_precision_loss)]
        let volume = inside as f64 * self.voxel_size.powi(3);
        let bounds = if inside > 0 {
            self.grid_bounds()
        } else {
            Aabb::empty()
        };
        FieldProperties { volume, bounds }
    }

    fn voxel_dimensions(&self) -> GridDimensions {
        self.dims
    }

    fn slice(&self, z: usize, buffer: &mut GrayscaleSlice) -> Result<(), SliceError> {
        if z >= self.dims.z {
            return Err(SliceError::OutOfRange {
                index: z,
                depth: self.dims.z,
            });
        }
        let expected = (self.dims.x, self.dims.y);
        if buffer.dimensions() != expected {
            return Err(SliceError::SizeMismatch {
                expected,
                actual: buffer.dimensions(),
            });
        }

        let len = self.dims.slice_len();
        let start = z * len;
        buffer
            .values_mut()
            .copy_from_slice(&self.values[start..start + len]);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// 4x4x4 unit grid with a 2x2x2 solid block at indices 1..=2.
    fn block() -> DenseVoxelField {
        let mut field = DenseVoxelField::new(GridDimensions::cube(4), 1.0, Point3::origin());
        for z in 1..=2 {
            for y in 1..=2 {
                for x in 1..=2 {
                    field.set(VoxelCoord::new(x, y, z), -1.0);
                }
            }
        }
        field
    }

    #[test]
    fn test_try_new_validation() {
        assert!(DenseVoxelField::try_new(GridDimensions::cube(2), 0.5, Point3::origin()).is_ok());
        assert!(matches!(
            DenseVoxelField::try_new(GridDimensions::cube(2), 0.0, Point3::origin()),
            Err(VoxelError::InvalidVoxelSize(_))
        ));
        assert!(matches!(
            DenseVoxelField::try_new(GridDimensions::cube(2), f64::NAN, Point3::origin()),
            Err(VoxelError::InvalidVoxelSize(_))
        ));
        assert!(matches!(
            DenseVoxelField::try_new(GridDimensions::new(2, 0, 2), 1.0, Point3::origin()),
            Err(VoxelError::InvalidDimensions { x: 2, y: 0, z: 2 })
        ));
    }

    #[test]
    fn test_new_sanitizes_voxel_size() {
        let field = DenseVoxelField::new(GridDimensions::cube(1), -2.0, Point3::origin());
        assert_relative_eq!(field.voxel_size(), 2.0);
    }

    #[test]
    fn test_from_fn_samples_centres() {
        let field = DenseVoxelField::from_fn(
            GridDimensions::new(2, 1, 1),
            2.0,
            Point3::new(10.0, 0.0, 0.0),
            |p| p.x as f32,
        )
        .unwrap();
        assert_eq!(field.get(VoxelCoord::new(0, 0, 0)), Some(11.0));
        assert_eq!(field.get(VoxelCoord::new(1, 0, 0)), Some(13.0));
    }

    #[test]
    fn test_get_set() {
        let mut field = DenseVoxelField::default();
        assert_eq!(field.set(VoxelCoord::new(0, 0, 0), -1.0), Some(f32::INFINITY));
        assert!(field.is_inside(VoxelCoord::new(0, 0, 0)));
        assert_eq!(field.set(VoxelCoord::new(1, 0, 0), -1.0), None);
        assert_eq!(field.get(VoxelCoord::new(0, -1, 0)), None);
    }

    #[test]
    fn test_world_to_grid_and_center() {
        let field = DenseVoxelField::new(GridDimensions::cube(4), 0.5, Point3::new(1.0, 1.0, 1.0));
        let coord = field.world_to_grid(&Point3::new(1.6, 1.1, 2.9));
        assert_eq!(coord, VoxelCoord::new(1, 0, 3));
        assert_relative_eq!(field.voxel_center(coord), Point3::new(1.75, 1.25, 2.75));
        assert_eq!(
            field.world_to_grid(&Point3::new(0.9, 1.0, 1.0)),
            VoxelCoord::new(-1, 0, 0)
        );
    }

    #[test]
    fn test_properties() {
        let field = block();
        let props = field.properties();
        assert_relative_eq!(props.volume, 8.0);
        assert_eq!(props.bounds, field.grid_bounds());
        assert_eq!(props.bounds.max, Point3::new(4.0, 4.0, 4.0));
    }

    #[test]
    fn test_properties_empty_field() {
        let field = DenseVoxelField::new(GridDimensions::cube(3), 1.0, Point3::origin());
        let props = field.properties();
        assert_relative_eq!(props.volume, 0.0);
        assert!(props.bounds.is_empty());
    }

    #[test]
    fn test_closest_surface_point() {
        let field = block();
        let p = field
            .closest_surface_point(&Point3::new(-5.0, 1.5, 1.5))
            .unwrap();
        assert_relative_eq!(p, Point3::new(1.5, 1.5, 1.5));

        let p = field
            .closest_surface_point(&Point3::new(2.6, 2.6, 10.0))
            .unwrap();
        assert_relative_eq!(p, Point3::new(2.5, 2.5, 2.5));
    }

    #[test]
    fn test_closest_surface_point_empty() {
        let field = DenseVoxelField::new(GridDimensions::cube(3), 1.0, Point3::origin());
        assert!(field.closest_surface_point(&Point3::origin()).is_none());
    }

    #[test]
    fn test_interior_voxels_are_not_surface() {
        let mut field = DenseVoxelField::new(GridDimensions::cube(5), 1.0, Point3::origin());
        for i in 0..field.values.len() {
            let c = field.dims.coord_of(i).unwrap();
            if (1..=3).contains(&c.x) && (1..=3).contains(&c.y) && (1..=3).contains(&c.z) {
                field.set(c, -1.0);
            }
        }
        assert!(!field.is_surface(VoxelCoord::new(2, 2, 2)));
        assert!(field.is_surface(VoxelCoord::new(1, 2, 2)));
        assert_eq!(field.surface_voxels().count(), 26);
    }

    #[test]
    fn test_raycast_from_outside_grid() {
        let field = block();
        let hit = field
            .raycast_to_surface(&Point3::new(-3.0, 1.5, 1.5), &Vector3::new(2.0, 0.0, 0.0))
            .unwrap();
        assert_relative_eq!(hit, Point3::new(1.0, 1.5, 1.5), epsilon = 1e-12);
    }

    #[test]
    fn test_raycast_from_inside_exits() {
        let field = block();
        let hit = field
            .raycast_to_surface(&Point3::new(2.0, 2.0, 2.0), &Vector3::z())
            .unwrap();
        assert_relative_eq!(hit, Point3::new(2.0, 2.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_raycast_through_far_face() {
        let field = block();
        let hit = field
            .raycast_to_surface(&Point3::new(9.0, 2.5, 2.5), &-Vector3::x())
            .unwrap();
        assert_relative_eq!(hit, Point3::new(3.0, 2.5, 2.5), epsilon = 1e-12);
    }

    #[test]
    fn test_raycast_misses() {
        let field = block();
        assert!(
            field
                .raycast_to_surface(&Point3::new(-1.0, 0.5, 0.5), &Vector3::x())
                .is_none()
        );
        assert!(
            field
                .raycast_to_surface(&Point3::new(-1.0, 1.5, 1.5), &-Vector3::x())
                .is_none()
        );
        assert!(
            field
                .raycast_to_surface(&Point3::new(1.5, 1.5, 1.5), &Vector3::zeros())
                .is_none()
        );
    }

    #[test]
    fn test_raycast_solid_grid_boundary_entry() {
        let mut field = DenseVoxelField::new(GridDimensions::cube(2), 1.0, Point3::origin());
        field.values.fill(-1.0);
        let hit = field
            .raycast_to_surface(&Point3::new(1.0, 1.0, -4.0), &Vector3::z())
            .unwrap();
        assert_relative_eq!(hit, Point3::new(1.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_raycast_solid_grid_boundary_exit() {
        let mut field = DenseVoxelField::new(GridDimensions::cube(2), 1.0, Point3::origin());
        field.values.fill(-1.0);

        let hit = field
            .raycast_to_surface(&Point3::new(1.0, 1.0, 1.0), &Vector3::z())
            .unwrap();
        assert_relative_eq!(hit, Point3::new(1.0, 1.0, 2.0), epsilon = 1e-12);

        // Same face the closest point query treats as surface.
        let closest = field
            .closest_surface_point(&Point3::new(0.5, 0.5, 1.9))
            .unwrap();
        assert_relative_eq!(closest, Point3::new(0.5, 0.5, 1.5), epsilon = 1e-12);
    }

    #[test]
    fn test_raycast_exits_block_interior_to_grid_edge() {
        let mut field = DenseVoxelField::new(GridDimensions::new(4, 1, 1), 0.5, Point3::origin());
        field.values.fill(-1.0);
        let hit = field
            .raycast_to_surface(&Point3::new(0.6, 0.25, 0.25), &-Vector3::x())
            .unwrap();
        assert_relative_eq!(hit, Point3::new(0.0, 0.25, 0.25), epsilon = 1e-12);
    }

    #[test]
    fn test_slice_extraction() {
        let field = block();
        let mut buffer = GrayscaleSlice::new(4, 4);

        field.slice(0, &mut buffer).unwrap();
        assert!(buffer.values().iter().all(|v| *v > 0.0));

        field.slice(1, &mut buffer).unwrap();
        assert_eq!(buffer.value(1, 2), Some(-1.0));
        assert_eq!(buffer.value(0, 2), Some(f32::INFINITY));
        assert_eq!(buffer.cells().filter(|c| c.2 <= 0.0).count(), 4);
    }

    #[test]
    fn test_slice_errors() {
        let field = block();
        let mut buffer = GrayscaleSlice::new(4, 4);
        assert_eq!(
            field.slice(4, &mut buffer),
            Err(SliceError::OutOfRange { index: 4, depth: 4 })
        );

        let mut wrong = GrayscaleSlice::new(4, 3);
        assert_eq!(
            field.slice(0, &mut wrong),
            Err(SliceError::SizeMismatch {
                expected: (4, 4),
                actual: (4, 3),
            })
        );
    }

    #[test]
    fn test_field_through_reference_and_box() {
        let field = block();
        let by_ref: &dyn VoxelField = &field;
        assert_eq!(by_ref.voxel_dimensions(), GridDimensions::cube(4));
        let boxed: Box<dyn VoxelField> = Box::new(field.clone());
        assert_relative_eq!(boxed.properties().volume, 8.0);
    }
}

//! Ray traversal through a regular voxel lattice.
//!
//! Uses the Amanatides & Woo DDA: for each axis track the parametric
//! distance to the next voxel boundary and always step across the nearest
//! one, so every voxel the ray touches is visited exactly once.

use nalgebra::{Point3, Vector3};

use crate::coord::VoxelCoord;

/// A ray `origin + t * direction`.
///
/// The direction does not need to be normalized.
///
/// # Example
///
/// ```
/// use voxel_types::Ray;
/// use nalgebra::{Point3, Vector3};
///
/// let ray = Ray::new(Point3::origin(), Vector3::new(2.0, 0.0, 0.0));
/// assert_eq!(ray.point_at(1.5), Point3::new(3.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start of the ray.
    pub origin: Point3<f64>,
    /// Direction (not necessarily normalized).
    pub direction: Vector3<f64>,
}

impl Ray {
    /// Creates a new ray.
    #[must_use]
    pub const fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }

    /// `true` if the direction is zero or not finite, so the ray goes nowhere.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let norm = self.direction.norm();
        !norm.is_finite() || norm < f64::EPSILON
    }

    /// Voxels along this ray for a lattice with the given voxel size and
    /// origin, starting with the voxel containing the ray origin.
    #[must_use]
    pub fn traverse(&self, voxel_size: f64, grid_origin: &Point3<f64>) -> VoxelTraversal {
        VoxelTraversal::new(self, voxel_size, grid_origin)
    }
}

/// Iterator over the voxels pierced by a ray.
///
/// Yields `(VoxelCoord, t)` where `t` is the ray parameter at which the ray
/// enters that voxel. The iterator is unbounded; callers stop it once `t`
/// passes their exit distance.
///
/// # Example
///
/// ```
/// use voxel_types::{Ray, VoxelCoord};
/// use nalgebra::{Point3, Vector3};
///
/// let ray = Ray::new(Point3::new(0.5, 0.5, 0.5), Vector3::x());
/// let visited: Vec<_> = ray.traverse(1.0, &Point3::origin()).take(3).collect();
/// assert_eq!(visited[0], (VoxelCoord::new(0, 0, 0), 0.0));
/// assert_eq!(visited[2].0, VoxelCoord::new(2, 0, 0));
/// ```
#[derive(Debug, Clone)]
pub struct VoxelTraversal {
    current: [i32; 3],
    step: [i32; 3],
    t_max: [f64; 3],
    t_delta: [f64; 3],
    t_current: f64,
    first: bool,
}

impl VoxelTraversal {
    /// Start at the voxel containing the ray origin.
    #[must_use]
    pub fn new(ray: &Ray, voxel_size: f64, grid_origin: &Point3<f64>) -> Self {
        let size = voxel_size.abs().max(f64::EPSILON);
        let relative = ray.origin - grid_origin;
        #[allow(clippy::cast_possible_truncation)]
        let start = VoxelCoord::new(
            (relative.x / size).floor() as i32,
            (relative.y / size).floor() as i32,
            (relative.z / size).floor() as i32,
        );
        Self::starting_at(ray, voxel_size, grid_origin, start, 0.0)
    }

    /// Start at an explicit voxel entered at ray parameter `t_start`.
    ///
    /// Used when the ray has been clipped against a grid: the entry point
    /// lies on a grid face and the caller knows which voxel it belongs to.
    #[must_use]
    pub fn starting_at(
        ray: &Ray,
        voxel_size: f64,
        grid_origin: &Point3<f64>,
        start: VoxelCoord,
        t_start: f64,
    ) -> Self {
        let size = voxel_size.abs().max(f64::EPSILON);
        let relative = ray.origin - grid_origin;
        let current = start.as_array();

        let mut step = [0i32; 3];
        let mut t_max = [f64::INFINITY; 3];
        let mut t_delta = [f64::INFINITY; 3];

        for axis in 0..3 {
            let d = ray.direction[axis];
            if d.abs() <= f64::EPSILON {
                continue;
            }
            let cell = f64::from(current[axis]);
            let boundary = if d > 0.0 { (cell + 1.0) * size } else { cell * size };
            step[axis] = if d > 0.0 { 1 } else { -1 };
            t_delta[axis] = (size / d).abs();
            t_max[axis] = (boundary - relative[axis]) / d;
        }

        Self {
            current,
            step,
            t_max,
            t_delta,
            t_current: t_start,
            first: true,
        }
    }
}

impl Iterator for VoxelTraversal {
    type Item = (VoxelCoord, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.first {
            self.first = false;
            return Some((VoxelCoord::from(self.current), self.t_current));
        }

        let axis = if self.t_max[0] < self.t_max[1] {
            if self.t_max[0] < self.t_max[2] { 0 } else { 2 }
        } else if self.t_max[1] < self.t_max[2] {
            1
        } else {
            2
        };

        if !self.t_max[axis].is_finite() {
            return None;
        }

        self.t_current = self.t_max[axis];
        self.current[axis] = self.current[axis].wrapping_add(self.step[axis]);
        self.t_max[axis] += self.t_delta[axis];

        Some((VoxelCoord::from(self.current), self.t_current))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_at() {
        let ray = Ray::new(Point3::new(1.0, 1.0, 1.0), Vector3::new(0.0, -2.0, 0.0));
        assert_relative_eq!(ray.point_at(0.5), Point3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_degenerate() {
        assert!(Ray::new(Point3::origin(), Vector3::zeros()).is_degenerate());
        assert!(Ray::new(Point3::origin(), Vector3::new(f64::NAN, 0.0, 0.0)).is_degenerate());
        assert!(!Ray::new(Point3::origin(), Vector3::z()).is_degenerate());
    }

    #[test]
    fn test_traverse_axis_aligned() {
        let ray = Ray::new(Point3::new(0.5, 0.5, 0.5), Vector3::x());
        let voxels: Vec<_> = ray.traverse(1.0, &Point3::origin()).take(4).collect();
        for (i, (coord, t)) in voxels.iter().enumerate() {
            assert_eq!(*coord, VoxelCoord::new(i32::try_from(i).unwrap(), 0, 0));
            if i > 0 {
                assert_relative_eq!(*t, i as f64 - 0.5);
            }
        }
    }

    #[test]
    fn test_traverse_negative_direction() {
        let ray = Ray::new(Point3::new(2.5, 0.5, 0.5), -Vector3::x());
        let coords: Vec<_> = ray
            .traverse(1.0, &Point3::origin())
            .take(3)
            .map(|(c, _)| c)
            .collect();
        assert_eq!(
            coords,
            vec![
                VoxelCoord::new(2, 0, 0),
                VoxelCoord::new(1, 0, 0),
                VoxelCoord::new(0, 0, 0)
            ]
        );
    }

    #[test]
    fn test_traverse_diagonal_is_connected() {
        let ray = Ray::new(Point3::new(0.1, 0.2, 0.3), Vector3::new(1.0, 0.7, 0.4));
        let voxels: Vec<_> = ray.traverse(0.5, &Point3::origin()).take(20).collect();
        for pair in voxels.windows(2) {
            let (a, ta) = pair[0];
            let (b, tb) = pair[1];
            let dist = (a.x - b.x).abs() + (a.y - b.y).abs() + (a.z - b.z).abs();
            assert_eq!(dist, 1);
            assert!(tb >= ta);
        }
    }

    #[test]
    fn test_starting_at_on_far_face() {
        // Enter a 4-voxel-wide grid through its max X face moving -X.
        let ray = Ray::new(Point3::new(6.0, 0.5, 0.5), -Vector3::x());
        let mut walk =
            VoxelTraversal::starting_at(&ray, 1.0, &Point3::origin(), VoxelCoord::new(3, 0, 0), 2.0);
        assert_eq!(walk.next(), Some((VoxelCoord::new(3, 0, 0), 2.0)));
        let (coord, t) = walk.next().unwrap();
        assert_eq!(coord, VoxelCoord::new(2, 0, 0));
        assert_relative_eq!(t, 3.0);
    }

    #[test]
    fn test_zero_direction_stops() {
        let ray = Ray::new(Point3::new(0.5, 0.5, 0.5), Vector3::zeros());
        let voxels: Vec<_> = ray.traverse(1.0, &Point3::origin()).take(5).collect();
        assert_eq!(voxels.len(), 1);
    }
}

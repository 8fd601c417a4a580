//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB) in world space.
///
/// Defined by minimum and maximum corners. Engines usually describe the
/// box as a minimum corner plus a size; [`Aabb::from_min_size`] and
/// [`Aabb::size`] convert between the two forms.
///
/// # Example
///
/// ```
/// use voxel_types::Aabb;
/// use nalgebra::{Point3, Vector3};
///
/// let aabb = Aabb::from_min_size(Point3::new(1.0, 2.0, 3.0), Vector3::new(2.0, 2.0, 2.0));
/// assert_eq!(aabb.max, Point3::new(3.0, 4.0, 5.0));
/// assert_eq!(aabb.center(), Point3::new(2.0, 3.0, 4.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3<f64>,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a new AABB from two corners.
    ///
    /// The corners are reordered per axis if needed.
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Create an AABB from its minimum corner and size.
    #[must_use]
    pub fn from_min_size(min: Point3<f64>, size: Vector3<f64>) -> Self {
        Self::new(min, min + size)
    }

    /// The degenerate box: min is `+inf`, max is `-inf`.
    ///
    /// Contains nothing and reports itself as empty.
    ///
    /// # Example
    ///
    /// ```
    /// use voxel_types::Aabb;
    ///
    /// assert!(Aabb::empty().is_empty());
    /// ```
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Check if the AABB has min > max on any axis.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Extent along each axis.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Geometric centre.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Enclosed volume, zero for an empty box.
    #[must_use]
    pub fn volume(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let s = self.size();
        s.x * s.y * s.z
    }

    /// Check whether a point lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Parametric interval `[t_enter, t_exit]` where `origin + t * direction`
    /// is inside the box, clamped to `t >= 0`.
    ///
    /// Returns `None` if the ray misses the box or the box is empty.
    #[must_use]
    pub fn ray_interval(&self, origin: &Point3<f64>, direction: &Vector3<f64>) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }

        let mut t_enter = 0.0_f64;
        let mut t_exit = f64::INFINITY;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < f64::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let t0 = (lo - o) / d;
            let t1 = (hi - o) / d;
            let (near, far) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
            t_enter = t_enter.max(near);
            t_exit = t_exit.min(far);
            if t_enter > t_exit {
                return None;
            }
        }

        Some((t_enter, t_exit))
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_reorders_corners() {
        let aabb = Aabb::new(Point3::new(2.0, 0.0, 5.0), Point3::new(0.0, 3.0, 1.0));
        assert_eq!(aabb.min, Point3::new(0.0, 0.0, 1.0));
        assert_eq!(aabb.max, Point3::new(2.0, 3.0, 5.0));
    }

    #[test]
    fn test_min_size_roundtrip() {
        let min = Point3::new(-1.0, 0.5, 2.0);
        let size = Vector3::new(4.0, 1.0, 0.25);
        let aabb = Aabb::from_min_size(min, size);
        assert_eq!(aabb.min, min);
        assert_relative_eq!(aabb.size(), size);
    }

    #[test]
    fn test_empty() {
        let aabb = Aabb::empty();
        assert!(aabb.is_empty());
        assert!(!aabb.contains(&Point3::origin()));
        assert_relative_eq!(aabb.volume(), 0.0);
        assert_eq!(Aabb::default(), aabb);
    }

    #[test]
    fn test_center_and_volume() {
        let aabb = Aabb::new(Point3::origin(), Point3::new(2.0, 4.0, 6.0));
        assert_relative_eq!(aabb.center(), Point3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(aabb.volume(), 48.0);
    }

    #[test]
    fn test_ray_interval_hit() {
        let aabb = Aabb::new(Point3::new(1.0, -1.0, -1.0), Point3::new(3.0, 1.0, 1.0));
        let (t0, t1) = aabb
            .ray_interval(&Point3::origin(), &Vector3::new(2.0, 0.0, 0.0))
            .unwrap();
        assert_relative_eq!(t0, 0.5);
        assert_relative_eq!(t1, 1.5);
    }

    #[test]
    fn test_ray_interval_from_inside() {
        let aabb = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let (t0, t1) = aabb.ray_interval(&Point3::origin(), &Vector3::z()).unwrap();
        assert_relative_eq!(t0, 0.0);
        assert_relative_eq!(t1, 1.0);
    }

    #[test]
    fn test_ray_interval_miss() {
        let aabb = Aabb::new(Point3::new(1.0, 1.0, 1.0), Point3::new(2.0, 2.0, 2.0));
        assert!(aabb.ray_interval(&Point3::origin(), &-Vector3::x()).is_none());
        assert!(
            aabb.ray_interval(&Point3::new(0.0, 5.0, 1.5), &Vector3::x())
                .is_none()
        );
        assert!(Aabb::empty().ray_interval(&Point3::origin(), &Vector3::x()).is_none());
    }
}

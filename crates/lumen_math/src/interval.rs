use crate::Ray;

/// A closed range of ray parameters `[min, max]`.
///
/// Intersection routines accept a hit at `t` only if the interval strictly
/// surrounds it, which keeps hits at the ray origin (`t = 0`) out when `min`
/// is a small positive epsilon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// The valid hit range of `ray`: from `near` to the ray's maximum distance.
    pub fn along(ray: &Ray, near: f32) -> Self {
        Self::new(near, ray.max_distance())
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Same lower bound, upper bound moved in to `max`.
    ///
    /// Used while searching for the nearest hit: each accepted hit shrinks
    /// the window the remaining objects must beat.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3;

    #[test]
    fn test_interval_surrounds() {
        let interval = Interval::new(0.0, 10.0);

        // Exclusive bounds - endpoints NOT included
        assert!(!interval.surrounds(0.0));
        assert!(!interval.surrounds(10.0));
        assert!(interval.surrounds(5.0));
        assert!(!interval.surrounds(f32::NAN));
    }

    #[test]
    fn test_interval_along_ray() {
        let unbounded = Ray::new(Vec3::ZERO, Vec3::X);
        let shadow = Ray::with_max_distance(Vec3::ZERO, Vec3::X, 3.0);

        assert_eq!(Interval::along(&unbounded, 1e-3).max, f32::INFINITY);
        assert_eq!(Interval::along(&shadow, 1e-3), Interval::new(1e-3, 3.0));
    }

    #[test]
    fn test_with_max() {
        let shrunk = Interval::new(0.001, f32::INFINITY).with_max(2.0);
        assert_eq!(shrunk, Interval::new(0.001, 2.0));
    }
}

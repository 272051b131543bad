use crate::Vec3;

/// A ray in 3D space with origin, unit direction, and maximum travel distance.
///
/// The direction is normalized on construction. Camera and sampling rays are
/// unbounded; shadow rays are truncated at the distance to the light so that
/// geometry behind the light does not occlude it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
}

impl Ray {
    /// Create an unbounded ray.
    ///
    /// A zero-length direction normalizes to `Vec3::ZERO`; such a ray never
    /// intersects anything.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self::with_max_distance(origin, direction, f32::INFINITY)
    }

    /// Create a ray that travels at most `max_distance` from its origin.
    pub fn with_max_distance(origin: Vec3, direction: Vec3, max_distance: f32) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            max_distance,
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the unit direction of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the maximum travel distance (`f32::INFINITY` when unbounded).
    #[inline]
    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// True if the direction collapsed to zero during normalization.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.direction == Vec3::ZERO
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let ray = Ray::new(origin, Vec3::new(0.0, 3.0, 0.0));

        assert_eq!(ray.origin(), origin);
        assert_eq!(ray.direction(), Vec3::Y);
        assert_eq!(ray.max_distance(), f32::INFINITY);
    }

    #[test]
    fn test_direction_is_normalized() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));
        assert!((ray.direction().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_shadow_ray_distance() {
        let ray = Ray::with_max_distance(Vec3::ZERO, Vec3::Z, 4.5);
        assert_eq!(ray.max_distance(), 4.5);
    }

    #[test]
    fn test_zero_direction_is_degenerate() {
        let ray = Ray::new(Vec3::ONE, Vec3::ZERO);

        assert!(ray.is_degenerate());
        assert!(!ray.direction().is_nan());
        assert_eq!(ray.at(10.0), Vec3::ONE);
    }
}

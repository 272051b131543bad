//! Sphere primitive for ray tracing.

use crate::{Brdf, Hittable, SurfaceHit};
use lumen_math::{Color, Interval, Ray, Vec3};

/// A sphere primitive.
pub struct Sphere<B: Brdf> {
    center: Vec3,
    radius: f32,
    brdf: B,
    emission: Color,
}

impl<B: Brdf> Sphere<B> {
    /// Create a new non-emissive sphere.
    pub fn new(center: Vec3, radius: f32, brdf: B) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            brdf,
            emission: Color::ZERO,
        }
    }

    /// Make the sphere a constant emitter.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission.max(Color::ZERO);
        self
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl<B: Brdf> Hittable for Sphere<B> {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let point = ray.at(root);
        Some(SurfaceHit {
            t: root,
            point,
            normal: (point - self.center) / self.radius,
        })
    }

    fn brdf(&self) -> &dyn Brdf {
        &self.brdf
    }

    fn emission(&self) -> Color {
        self.emission
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lambertian;

    fn grey_sphere() -> Sphere<Lambertian> {
        Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Lambertian::new(Color::new(0.5, 0.5, 0.5)),
        )
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = grey_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let hit = sphere
            .intersect(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("ray through the centre must hit");
        assert!((hit.t - 0.5).abs() < 0.001); // Should hit at t=0.5
        assert!((hit.normal - Vec3::Z).length() < 0.001);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = grey_sphere();

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere
            .intersect(&ray, Interval::new(0.001, f32::INFINITY))
            .is_none());
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let sphere = grey_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::X);

        let hit = sphere
            .intersect(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("ray from the centre must hit the far wall");
        assert!((hit.t - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_sphere_respects_max_distance() {
        let sphere = grey_sphere();
        let ray = Ray::with_max_distance(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0.25);
        assert!(sphere.intersect(&ray, Interval::along(&ray, 0.001)).is_none());
    }

    #[test]
    fn test_emission() {
        let light = grey_sphere().with_emission(Color::splat(4.0));
        assert_eq!(light.emission(), Color::splat(4.0));
        assert_eq!(grey_sphere().emission(), Color::ZERO);
    }
}

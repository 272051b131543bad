//! Scene facade: geometry, lights, background and camera behind two
//! traversal queries.
//!
//! The scene is immutable while rendering. Both queries only read geometry,
//! so a single `&Scene` can be shared by every render worker.

use lumen_math::{Color, Interval, Ray, Vec3};

use crate::{Camera, EnvironmentMap, HitRecord, Hittable};

/// Near end of every valid hit range. Keeps rays that start on a surface
/// from hitting that same surface ("shadow acne").
pub const HIT_EPSILON: f32 = 1e-3;

/// Isotropic point light. Consumers apply inverse-square falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: Color,
}

impl PointLight {
    pub fn new(position: Vec3, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

/// A complete scene: objects, point lights, ambient term, optional
/// environment map and exactly one camera.
///
/// Object order is iteration order only. The nearest hit always wins and
/// ties go to the object added first.
pub struct Scene {
    objects: Vec<Box<dyn Hittable>>,
    point_lights: Vec<PointLight>,
    ambient: Color,
    environment: Option<Box<dyn EnvironmentMap>>,
    camera: Camera,
}

impl Scene {
    /// Create an empty scene viewed through `camera`.
    pub fn new(camera: Camera) -> Self {
        Self {
            objects: Vec::new(),
            point_lights: Vec::new(),
            ambient: Color::ZERO,
            environment: None,
            camera,
        }
    }

    /// Add an object and return its index.
    pub fn add_object(&mut self, object: Box<dyn Hittable>) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn add_point_light(&mut self, light: PointLight) {
        self.point_lights.push(light);
    }

    pub fn set_ambient(&mut self, ambient: Color) {
        self.ambient = ambient;
    }

    pub fn set_environment_map(&mut self, environment: Box<dyn EnvironmentMap>) {
        self.environment = Some(environment);
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn ambient(&self) -> Color {
        self.ambient
    }

    pub fn point_lights(&self) -> &[PointLight] {
        &self.point_lights
    }

    pub fn environment(&self) -> Option<&dyn EnvironmentMap> {
        self.environment.as_deref()
    }

    pub fn objects(&self) -> &[Box<dyn Hittable>] {
        &self.objects
    }

    /// Get an object by index.
    pub fn object(&self, index: usize) -> Option<&dyn Hittable> {
        self.objects.get(index).map(|o| o.as_ref())
    }

    /// Get the number of objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Radiance from the environment along `direction`; zero without a map.
    pub fn environment_radiance(&self, direction: Vec3) -> Color {
        self.environment()
            .map_or(Color::ZERO, |env| env.get_value(direction))
    }

    /// Nearest intersection in `(HIT_EPSILON, ray.max_distance())`.
    pub fn closest_hit(&self, ray: &Ray) -> Option<HitRecord> {
        if ray.is_degenerate() {
            return None;
        }

        let mut ray_t = Interval::along(ray, HIT_EPSILON);
        let mut closest = None;

        for (index, object) in self.objects.iter().enumerate() {
            if let Some(hit) = object.intersect(ray, ray_t) {
                // Strict `<` inside `surrounds` keeps the earlier index on ties
                ray_t = ray_t.with_max(hit.t);
                closest = Some(HitRecord::new(hit, index));
            }
        }

        closest
    }

    /// True if anything lies in `(HIT_EPSILON, ray.max_distance())`.
    ///
    /// Stops at the first intersection found.
    pub fn any_hit(&self, ray: &Ray) -> bool {
        if ray.is_degenerate() {
            return false;
        }

        let ray_t = Interval::along(ray, HIT_EPSILON);
        self.objects
            .iter()
            .any(|object| object.intersect(ray, ray_t).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConstantEnvironment, Lambertian, Sphere};

    fn grey() -> Lambertian {
        Lambertian::new(Color::splat(0.5))
    }

    fn test_scene() -> Scene {
        let mut scene = Scene::new(Camera::new(16, 16, 60.0).unwrap());
        // Far sphere first so list order and distance order disagree
        scene.add_object(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, grey())));
        scene.add_object(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, grey())));
        scene
    }

    #[test]
    fn test_closest_hit_ignores_list_order() {
        let scene = test_scene();
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);

        let hit = scene.closest_hit(&ray).expect("both spheres are on the axis");
        assert_eq!(hit.object_index, 1);
        assert!((hit.distance - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_ties_go_to_first_object() {
        let mut scene = Scene::new(Camera::new(16, 16, 60.0).unwrap());
        scene.add_object(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, grey())));
        scene.add_object(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, grey())));

        let hit = scene.closest_hit(&Ray::new(Vec3::ZERO, -Vec3::Z)).unwrap();
        assert_eq!(hit.object_index, 0);
    }

    #[test]
    fn test_miss_returns_none() {
        let scene = test_scene();
        assert!(scene.closest_hit(&Ray::new(Vec3::ZERO, Vec3::Z)).is_none());
        assert!(!scene.any_hit(&Ray::new(Vec3::ZERO, Vec3::Z)));
    }

    #[test]
    fn test_any_hit_respects_max_distance() {
        let scene = test_scene();

        let short = Ray::with_max_distance(Vec3::ZERO, -Vec3::Z, 3.5);
        assert!(!scene.any_hit(&short));

        let long = Ray::with_max_distance(Vec3::ZERO, -Vec3::Z, 4.5);
        assert!(scene.any_hit(&long));
    }

    #[test]
    fn test_degenerate_ray_never_hits() {
        let scene = test_scene();
        let ray = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert!(scene.closest_hit(&ray).is_none());
        assert!(!scene.any_hit(&ray));
    }

    #[test]
    fn test_environment_radiance_defaults_to_zero() {
        let mut scene = test_scene();
        assert!(scene.environment().is_none());
        assert_eq!(scene.environment_radiance(Vec3::Y), Color::ZERO);

        scene.set_environment_map(Box::new(ConstantEnvironment::new(Color::ONE)));
        assert_eq!(scene.environment_radiance(Vec3::Y), Color::ONE);
    }

    #[test]
    fn test_object_lookup() {
        let scene = test_scene();
        assert_eq!(scene.object_count(), 2);
        assert!(scene.object(1).is_some());
        assert!(scene.object(2).is_none());
    }
}

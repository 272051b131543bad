use lumen_core::Scene;
use lumen_math::{Color, Ray};
use rand::RngCore;

use super::{hit_kd, Integrator};

/// Phong exponent for the specular lobe.
const SHININESS: i32 = 5;

/// Direct lighting from point lights with the Phong reflection model.
///
/// The specular coefficient equals the diffuse one. Environment maps are
/// ignored; ambient light stands in for everything that is not a point
/// light.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhongIntegrator;

impl Integrator for PhongIntegrator {
    fn tag(&self) -> String {
        "_Phong".to_string()
    }

    fn compute_color(&self, scene: &Scene, ray: &Ray, _rng: &mut dyn RngCore) -> Color {
        let Some(hit) = scene.closest_hit(ray) else {
            return Color::ZERO;
        };

        let kd = hit_kd(scene, hit.object_index);
        let ks = kd;
        let normal = hit.unit_normal();
        let w_o = -ray.direction();

        let mut color = kd * scene.ambient();

        for light in scene.point_lights() {
            let to_light = light.position - hit.point;
            let distance = to_light.length();
            if distance <= 0.0 {
                continue;
            }
            let w_i = to_light / distance;

            // Geometry behind the light must not occlude it
            let shadow_ray = Ray::with_max_distance(hit.point, w_i, distance);
            if scene.any_hit(&shadow_ray) {
                continue;
            }

            let incident = light.intensity / (distance * distance);
            let n_dot_l = normal.dot(w_i);
            let diffuse = kd * incident * n_dot_l.max(0.0);

            let r = (2.0 * n_dot_l * normal - w_i).normalize_or_zero();
            let specular = ks * incident * r.dot(w_o).max(0.0).powi(SHININESS);

            color += diffuse + specular;
        }

        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrators::test_scenes;
    use lumen_core::{Camera, ConstantEnvironment, Lambertian, Parallelogram, PointLight, Sphere};
    use lumen_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const FLOOR_KD: Color = Color::new(0.2, 0.8, 0.2);
    const AMBIENT: Color = Color::new(0.1, 0.1, 0.1);

    fn lit_floor() -> Scene {
        let mut scene = Scene::new(Camera::new(16, 16, 60.0).unwrap());
        scene.add_object(Box::new(Parallelogram::new(
            Vec3::new(-4.0, -2.0, -1.0),
            Vec3::new(8.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -8.0),
            Lambertian::new(FLOOR_KD),
        )));
        scene.add_point_light(PointLight::new(Vec3::new(0.0, 5.0, -5.0), Color::splat(49.0)));
        scene.set_ambient(AMBIENT);
        scene
    }

    #[test]
    fn test_ambient_only() {
        let mut scene = test_scenes::sphere();
        scene.set_ambient(Color::splat(0.5));
        let mut rng = StdRng::seed_from_u64(0);

        let color = PhongIntegrator.compute_color(&scene, &Ray::new(Vec3::ZERO, -Vec3::Z), &mut rng);
        assert_eq!(color, test_scenes::SPHERE_KD * Color::splat(0.5));
    }

    #[test]
    fn test_shadow_removes_direct_light() {
        let mut scene = lit_floor();
        let mut rng = StdRng::seed_from_u64(0);
        // Look up at the underside of the floor so the occluder never blocks the camera
        let ray = Ray::new(Vec3::new(0.0, -3.0, -5.0), Vec3::Y);

        // Light straight overhead at distance 7: diffuse = kd * 49 / 49, no specular
        let lit = PhongIntegrator.compute_color(&scene, &ray, &mut rng);
        assert!((lit - FLOOR_KD * (AMBIENT + Color::ONE)).length() < 1e-4);

        scene.add_object(Box::new(Sphere::new(
            Vec3::new(0.0, 1.5, -5.0),
            0.5,
            Lambertian::new(Color::ONE),
        )));
        let shadowed = PhongIntegrator.compute_color(&scene, &ray, &mut rng);
        assert_eq!(shadowed, FLOOR_KD * AMBIENT);
        assert!(lit.length() > shadowed.length());
    }

    #[test]
    fn test_object_beyond_light_casts_no_shadow() {
        let mut scene = lit_floor();
        scene.add_object(Box::new(Sphere::new(
            Vec3::new(0.0, 8.0, -5.0),
            1.0,
            Lambertian::new(Color::ONE),
        )));
        let mut rng = StdRng::seed_from_u64(0);
        let ray = Ray::new(Vec3::new(0.0, -3.0, -5.0), Vec3::Y);

        let color = PhongIntegrator.compute_color(&scene, &ray, &mut rng);
        assert!((color - FLOOR_KD * (AMBIENT + Color::ONE)).length() < 1e-4);
    }

    #[test]
    fn test_environment_is_ignored() {
        let mut scene = test_scenes::sphere();
        scene.set_environment_map(Box::new(ConstantEnvironment::new(Color::ONE)));
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(
            PhongIntegrator.compute_color(&scene, &Ray::new(Vec3::ZERO, Vec3::Z), &mut rng),
            Color::ZERO
        );
    }
}

use lumen_core::Scene;
use lumen_math::{Color, Ray};
use rand::RngCore;

use super::Integrator;

/// Visualizes unit surface normals remapped from [-1, 1] to [0, 1].
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalIntegrator;

impl Integrator for NormalIntegrator {
    fn tag(&self) -> String {
        "_Normal".to_string()
    }

    fn compute_color(&self, scene: &Scene, ray: &Ray, _rng: &mut dyn RngCore) -> Color {
        match scene.closest_hit(ray) {
            Some(hit) => (hit.unit_normal() + Color::ONE) / 2.0,
            None => Color::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrators::test_scenes;
    use lumen_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_facing_normal() {
        let scene = test_scenes::sphere();
        let mut rng = StdRng::seed_from_u64(0);
        let color = NormalIntegrator.compute_color(&scene, &Ray::new(Vec3::ZERO, -Vec3::Z), &mut rng);

        // Front of the sphere faces +Z
        assert!((color - Color::new(0.5, 0.5, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_unnormalized_normal_is_normalized() {
        // Floor normal is u x v with length 64
        let scene = test_scenes::sphere_on_floor();
        let mut rng = StdRng::seed_from_u64(0);
        let ray = Ray::new(Vec3::new(3.0, 5.0, -2.0), -Vec3::Y);
        let color = NormalIntegrator.compute_color(&scene, &ray, &mut rng);

        assert!((color - Color::new(0.5, 1.0, 0.5)).length() < 1e-5);
    }

    #[test]
    fn test_miss_is_black() {
        let scene = test_scenes::sphere();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            NormalIntegrator.compute_color(&scene, &Ray::new(Vec3::ZERO, Vec3::Z), &mut rng),
            Color::ZERO
        );
    }
}

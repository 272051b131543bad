use lumen_core::Scene;
use lumen_math::{Color, Ray};
use rand::RngCore;

use super::Integrator;

const HIT_COLOR: Color = Color::new(1.0, 0.0, 0.0);

/// Red where the ray hits anything, black elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntersectionIntegrator;

impl Integrator for IntersectionIntegrator {
    fn tag(&self) -> String {
        "_Intersection".to_string()
    }

    fn compute_color(&self, scene: &Scene, ray: &Ray, _rng: &mut dyn RngCore) -> Color {
        if scene.any_hit(ray) {
            HIT_COLOR
        } else {
            Color::ZERO
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
    fn test_hit_is_red_miss_is_black() {
        let scene = test_scenes::sphere();
        let mut rng = StdRng::seed_from_u64(0);

        let hit = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert_eq!(
            IntersectionIntegrator.compute_color(&scene, &hit, &mut rng),
            Color::new(1.0, 0.0, 0.0)
        );

        let miss = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(IntersectionIntegrator.compute_color(&scene, &miss, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_silhouette_boundary() {
        // Rays parallel to the axis, just inside and just outside radius 2
        let scene = test_scenes::sphere();
        let mut rng = StdRng::seed_from_u64(0);

        let grazing_inside = Ray::new(Vec3::new(0.0, 1.9, 0.0), -Vec3::Z);
        assert_eq!(
            IntersectionIntegrator.compute_color(&scene, &grazing_inside, &mut rng),
            HIT_COLOR
        );

        let passing_outside = Ray::new(Vec3::new(0.0, 2.1, 0.0), -Vec3::Z);
        assert_eq!(
            IntersectionIntegrator.compute_color(&scene, &passing_outside, &mut rng),
            Color::ZERO
        );
    }
}

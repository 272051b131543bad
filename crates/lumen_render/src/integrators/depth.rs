use lumen_core::Scene;
use lumen_math::{Color, Ray};
use rand::RngCore;

use super::Integrator;
use crate::{RenderError, RenderResult};

/// Grey ramp: white at the eye, black at `max_depth` and beyond.
#[derive(Debug, Clone, Copy)]
pub struct DepthIntegrator {
    max_depth: f32,
}

impl DepthIntegrator {
    pub const DEFAULT_MAX_DEPTH: f32 = 10.0;

    /// Ramp that reaches black at `max_depth`, which must be finite and
    /// positive.
    pub fn new(max_depth: f32) -> RenderResult<Self> {
        if !max_depth.is_finite() || max_depth <= 0.0 {
            return Err(RenderError::InvalidMaxDepth(max_depth));
        }
        Ok(Self { max_depth })
    }

    pub fn max_depth(&self) -> f32 {
        self.max_depth
    }
}

impl Default for DepthIntegrator {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

impl Integrator for DepthIntegrator {
    fn tag(&self) -> String {
        "_Depth".to_string()
    }

    fn compute_color(&self, scene: &Scene, ray: &Ray, _rng: &mut dyn RngCore) -> Color {
        match scene.closest_hit(ray) {
            Some(hit) => Color::splat((1.0 - hit.distance / self.max_depth).max(0.0)),
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
    fn test_depth_value() {
        // Sphere surface is 3 units down the axis
        let scene = test_scenes::sphere();
        let mut rng = StdRng::seed_from_u64(0);
        let color = DepthIntegrator::default().compute_color(&scene, &Ray::new(Vec3::ZERO, -Vec3::Z), &mut rng);

        assert!((color.x - 0.7).abs() < 1e-4);
        assert_eq!(color.x, color.y);
        assert_eq!(color.y, color.z);
    }

    #[test]
    fn test_depth_clamps_to_black() {
        let scene = test_scenes::sphere();
        let mut rng = StdRng::seed_from_u64(0);
        let color = DepthIntegrator::new(2.0).unwrap().compute_color(&scene, &Ray::new(Vec3::ZERO, -Vec3::Z), &mut rng);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_miss_is_black() {
        let scene = test_scenes::sphere();
        let mut rng = StdRng::seed_from_u64(0);
        let color = DepthIntegrator::default().compute_color(&scene, &Ray::new(Vec3::ZERO, Vec3::Z), &mut rng);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_invalid_max_depth_rejected() {
        for max_depth in [0.0, -5.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                DepthIntegrator::new(max_depth),
                Err(RenderError::InvalidMaxDepth(_))
            ));
        }
        assert_eq!(DepthIntegrator::new(4.0).unwrap().max_depth(), 4.0);
    }
}

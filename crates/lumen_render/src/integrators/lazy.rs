use lumen_core::Scene;
use lumen_math::{Color, Ray};
use rand::RngCore;

use super::Integrator;

/// Black everywhere. Useful for timing the render loop itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct LazyIntegrator;

impl Integrator for LazyIntegrator {
    fn tag(&self) -> String {
        "_Lazy".to_string()
    }

    fn compute_color(&self, _scene: &Scene, _ray: &Ray, _rng: &mut dyn RngCore) -> Color {
        Color::ZERO
    }
}

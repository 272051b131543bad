use lumen_core::Scene;
use lumen_math::{Color, Ray};
use rand::RngCore;

use super::{hit_kd, incoming_radiance, Integrator};
use crate::sampling::{center_around_normal, sample_set_hemisphere, Pdf, UniformPdf};
use crate::{RenderError, RenderResult};

/// Classical Monte Carlo estimate of single-bounce diffuse lighting.
///
/// Draws `n` hemisphere directions around the hit normal, gathers the
/// radiance each one sees and averages `L · kd · cos θ / p`.
pub struct ClassicalMonteCarloIntegrator {
    n_samples: usize,
    pdf: Box<dyn Pdf>,
}

impl ClassicalMonteCarloIntegrator {
    /// Uniform hemisphere sampling with `n_samples` directions per pixel.
    pub fn new(n_samples: usize) -> RenderResult<Self> {
        if n_samples == 0 {
            return Err(RenderError::ZeroSamples("ClassicalMonteCarloIntegrator"));
        }
        Ok(Self {
            n_samples,
            pdf: Box::new(UniformPdf),
        })
    }

    /// Replace the sampling density.
    pub fn with_pdf(mut self, pdf: Box<dyn Pdf>) -> Self {
        self.pdf = pdf;
        self
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }
}

impl Integrator for ClassicalMonteCarloIntegrator {
    fn tag(&self) -> String {
        format!("_MC_{}_samples", self.n_samples)
    }

    fn compute_color(&self, scene: &Scene, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        let Some(hit) = scene.closest_hit(ray) else {
            return scene.environment_radiance(ray.direction());
        };

        let kd = hit_kd(scene, hit.object_index);
        let normal = hit.unit_normal();
        let samples = sample_set_hemisphere(self.n_samples, self.pdf.as_ref(), rng);

        let sum = samples.iter().fold(Color::ZERO, |acc, (local, pdf)| {
            let direction = center_around_normal(local, normal);
            let radiance = incoming_radiance(scene, hit.point, direction);
            let cos_theta = normal.dot(direction).max(0.0);
            acc + radiance * kd * cos_theta / pdf
        });

        sum / self.n_samples as f32
    }
}

use std::f32::consts::PI;

use lumen_core::Scene;
use lumen_math::{Color, Ray, Vec3};
use rand::RngCore;

use super::{hit_kd, incoming_radiance, Integrator};
use crate::gp::RegressionModel;
use crate::sampling::{center_around_normal, gen_f32};
use crate::{RenderError, RenderResult};

/// Bayesian Monte Carlo estimate of single-bounce diffuse lighting.
///
/// Gathers radiance along the regression model's fixed sample directions and
/// lets the model turn those observations into a posterior-mean integral.
/// Each call spins the sample set by a random angle about the normal; the
/// cosine-weighted kernel means are invariant under that rotation, so the
/// model's weights stay valid.
///
/// Quadrature weights can be negative, so a pixel lit along only a few
/// directions may get a negative posterior mean. The estimate is clamped
/// at zero per channel.
pub struct BayesianMonteCarloIntegrator {
    n_samples: usize,
    model: Box<dyn RegressionModel>,
}

impl BayesianMonteCarloIntegrator {
    /// Bind a regression model that was built for exactly `n_samples`
    /// directions.
    pub fn new(n_samples: usize, model: Box<dyn RegressionModel>) -> RenderResult<Self> {
        if n_samples == 0 {
            return Err(RenderError::ZeroSamples("BayesianMonteCarloIntegrator"));
        }
        let expected = model.sample_set().len();
        if expected != n_samples {
            return Err(RenderError::SampleCountMismatch {
                expected,
                actual: n_samples,
            });
        }
        Ok(Self { n_samples, model })
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }
}

/// Rotate a local direction about +Z.
#[inline]
fn spin(v: Vec3, sin: f32, cos: f32) -> Vec3 {
    Vec3::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos, v.z)
}

impl Integrator for BayesianMonteCarloIntegrator {
    fn tag(&self) -> String {
        format!("_BMC_{}_samples", self.n_samples)
    }

    fn compute_color(&self, scene: &Scene, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        let Some(hit) = scene.closest_hit(ray) else {
            return scene.environment_radiance(ray.direction());
        };

        let kd = hit_kd(scene, hit.object_index);
        let normal = hit.unit_normal();
        let (sin, cos) = (2.0 * PI * gen_f32(rng)).sin_cos();

        let values: Vec<Color> = self
            .model
            .sample_set()
            .directions
            .iter()
            .map(|&local| {
                let direction = center_around_normal(spin(local, sin, cos), normal);
                incoming_radiance(scene, hit.point, direction)
            })
            .collect();

        (kd * self.model.integrate(&values)).max(Color::ZERO)
    }
}

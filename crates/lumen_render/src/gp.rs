//! Gaussian-process regression for Bayesian Monte Carlo.
//!
//! The model fixes its sample directions up front. Bayesian quadrature
//! weights depend only on those directions and on the kernel, so they are
//! solved once and every pixel reduces to a weighted sum of the radiance it
//! observes along them.
//!
//! The quantity integrated is `∫ L(ω) cos θ dω` over the local hemisphere.
//! With a zero-mean prior and kernel `k`, its posterior mean is `zᵀ K⁻¹ L`
//! where `K` is the kernel matrix of the samples and `z_i = ∫ k(ω, ω_i)
//! cos θ dω` is the kernel mean of sample `i`.

use std::f64::consts::PI;

use lumen_math::{Color, Vec3};
use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::sampling::{sample_set_hemisphere, CosinePdf, SampleSet, UniformPdf};
use crate::{RenderError, RenderResult};

/// Regression collaborator of the Bayesian Monte Carlo integrator.
pub trait RegressionModel: Send + Sync {
    /// Local hemisphere directions at which the integrand must be observed.
    fn sample_set(&self) -> &SampleSet;

    /// Posterior-mean estimate of `∫ L(ω) cos θ dω` from values observed at
    /// [`sample_set`](Self::sample_set), in the same order.
    fn integrate(&self, values: &[Color]) -> Color;
}

/// Gaussian-process hyper-parameters.
#[derive(Debug, Clone)]
pub struct GaussianProcessConfig {
    /// Number of sample directions
    pub samples: usize,
    /// Squared-exponential length scale (chord distance on the unit sphere)
    pub length_scale: f64,
    /// Prior variance of the integrand
    pub signal_variance: f64,
    /// Added to the kernel diagonal before factorization
    pub jitter: f64,
    /// Monte Carlo samples used to estimate each kernel mean
    pub kernel_mean_samples: usize,
    /// Seed for the sample directions and kernel-mean estimate
    pub seed: u64,
}

impl Default for GaussianProcessConfig {
    fn default() -> Self {
        Self {
            samples: 50,
            length_scale: 0.5,
            signal_variance: 1.0,
            jitter: 1e-4,
            kernel_mean_samples: 4096,
            seed: 0,
        }
    }
}

impl GaussianProcessConfig {
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_length_scale(mut self, length_scale: f64) -> Self {
        self.length_scale = length_scale;
        self
    }

    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Gaussian process with a squared-exponential kernel over hemisphere
/// directions.
pub struct GaussianProcess {
    config: GaussianProcessConfig,
    samples: SampleSet,
    weights: Vec<f32>,
}

impl GaussianProcess {
    /// Draw the sample set and solve for the quadrature weights.
    pub fn new(config: GaussianProcessConfig) -> RenderResult<Self> {
        let n = config.samples;
        if n == 0 {
            return Err(RenderError::ZeroSamples("GaussianProcess"));
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let samples = sample_set_hemisphere(n, &UniformPdf, &mut rng);
        let mean_points = sample_set_hemisphere(config.kernel_mean_samples.max(1), &CosinePdf, &mut rng);

        let kernel = |a: Vec3, b: Vec3| -> f64 {
            let d2 = (a - b).length_squared() as f64;
            config.signal_variance * (-d2 / (2.0 * config.length_scale * config.length_scale)).exp()
        };

        let mut k = DMatrix::from_fn(n, n, |i, j| kernel(samples.directions[i], samples.directions[j]));
        for i in 0..n {
            k[(i, i)] += config.jitter;
        }

        // z_i = π · E_cos[k(ω, ω_i)] since the cosine density is cos θ / π
        let z = DVector::from_iterator(
            n,
            samples.directions.iter().map(|&wi| {
                let sum: f64 = mean_points.directions.iter().map(|&w| kernel(w, wi)).sum();
                PI * sum / mean_points.len() as f64
            }),
        );

        let cholesky = k.cholesky().ok_or(RenderError::SingularKernel(n))?;
        let w = cholesky.solve(&z);
        let weights: Vec<f32> = w.iter().map(|&v| v as f32).collect();

        log::debug!(
            "Gaussian process: {} samples, length scale {}, weight sum {:.4}",
            n,
            config.length_scale,
            weights.iter().sum::<f32>()
        );

        Ok(Self {
            config,
            samples,
            weights,
        })
    }

    pub fn config(&self) -> &GaussianProcessConfig {
        &self.config
    }

    /// Quadrature weights, one per sample direction.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

impl RegressionModel for GaussianProcess {
    fn sample_set(&self) -> &SampleSet {
        &self.samples
    }

    fn integrate(&self, values: &[Color]) -> Color {
        debug_assert_eq!(values.len(), self.weights.len());
        self.weights
            .iter()
            .zip(values)
            .fold(Color::ZERO, |acc, (&w, &value)| acc + value * w)
    }
}

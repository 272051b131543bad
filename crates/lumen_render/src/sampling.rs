//! Hemisphere sampling and probability densities.
//!
//! Samples are generated in a local frame where the hemisphere is `z >= 0`
//! and are moved onto a surface with [`center_around_normal`]. Every density
//! returned here is strictly positive over its support, so estimators can
//! divide by it without checking.

use std::f32::consts::{FRAC_1_PI, PI};

use lumen_math::{Frame, Vec2, Vec3};
use rand::{Rng, RngCore};

/// Smallest density any sampler reports.
pub const PDF_FLOOR: f32 = 1e-6;

/// Uniform random float in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// A distribution over the local +Z hemisphere.
pub trait Pdf: Send + Sync {
    /// Map a point of the unit square to a local direction with `z >= 0`.
    fn sample(&self, u: Vec2) -> Vec3;

    /// Density (per steradian) of a local direction.
    fn value(&self, direction: Vec3) -> f32;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Uniform density `1 / (2π)` over the hemisphere.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformPdf;

impl Pdf for UniformPdf {
    fn sample(&self, u: Vec2) -> Vec3 {
        // z uniform in [0, 1) gives uniform solid angle
        let z = u.x;
        let r = (1.0 - z * z).max(0.0).sqrt();
        let phi = 2.0 * PI * u.y;
        Vec3::new(r * phi.cos(), r * phi.sin(), z)
    }

    fn value(&self, _direction: Vec3) -> f32 {
        1.0 / (2.0 * PI)
    }

    fn name(&self) -> &'static str {
        "uniform"
    }
}

/// Cosine-weighted density `cos θ / π`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosinePdf;

impl Pdf for CosinePdf {
    fn sample(&self, u: Vec2) -> Vec3 {
        // Malley's method: project a uniform disk sample up to the hemisphere
        let r = u.x.sqrt();
        let phi = 2.0 * PI * u.y;
        let z = (1.0 - u.x).max(0.0).sqrt();
        Vec3::new(r * phi.cos(), r * phi.sin(), z)
    }

    fn value(&self, direction: Vec3) -> f32 {
        let cos_theta = direction.normalize_or_zero().z;
        (cos_theta * FRAC_1_PI).max(PDF_FLOOR)
    }

    fn name(&self) -> &'static str {
        "cosine"
    }
}

/// Hemisphere directions paired one-to-one with their densities.
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    pub directions: Vec<Vec3>,
    pub pdfs: Vec<f32>,
}

impl SampleSet {
    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    /// Iterate over `(direction, density)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Vec3, f32)> + '_ {
        self.directions.iter().copied().zip(self.pdfs.iter().copied())
    }
}

/// Draw `n` local hemisphere directions from `pdf`.
pub fn sample_set_hemisphere(n: usize, pdf: &dyn Pdf, rng: &mut dyn RngCore) -> SampleSet {
    let mut directions = Vec::with_capacity(n);
    let mut pdfs = Vec::with_capacity(n);

    for _ in 0..n {
        let u = Vec2::new(gen_f32(rng), gen_f32(rng));
        let direction = pdf.sample(u);
        pdfs.push(pdf.value(direction));
        directions.push(direction);
    }

    SampleSet { directions, pdfs }
}

/// Rotate a +Z-relative vector so that +Z lands on `normal`.
///
/// `normal` need not be unit length. A zero normal leaves the vector in
/// place.
#[inline]
pub fn center_around_normal(local: Vec3, normal: Vec3) -> Vec3 {
    Frame::from_normal(normal).to_world(local)
}

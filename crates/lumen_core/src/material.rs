//! Reflectance models bound to scene objects.

use lumen_math::Color;

/// Trait for surface reflectance models.
///
/// Integrators only need the diffuse coefficient; Phong reuses it as the
/// specular coefficient.
pub trait Brdf: Send + Sync {
    /// Diffuse reflectance.
    fn kd(&self) -> Color;
}

/// Lambertian (diffuse) reflectance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lambertian {
    kd: Color,
}

impl Lambertian {
    /// Create a new Lambertian BRDF. Negative components are clamped to zero.
    pub fn new(kd: Color) -> Self {
        Self {
            kd: kd.max(Color::ZERO),
        }
    }
}

impl Brdf for Lambertian {
    fn kd(&self) -> Color {
        self.kd
    }
}

//! Hittable trait and the primitives shipped with the scene facade.

mod parallelogram;
mod sphere;

pub use parallelogram::Parallelogram;
pub use sphere::Sphere;

use crate::{Brdf, SurfaceHit};
use lumen_math::{Color, Interval, Ray};

/// Trait for objects that can be hit by rays.
///
/// Implementations are read-only during rendering and are queried from many
/// worker threads at once.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object strictly inside `ray_t`.
    ///
    /// Returns the nearest such hit.
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit>;

    /// Reflectance model bound to this object.
    fn brdf(&self) -> &dyn Brdf;

    /// Radiance emitted by the surface. Zero for non-emissive objects.
    fn emission(&self) -> Color {
        Color::ZERO
    }
}

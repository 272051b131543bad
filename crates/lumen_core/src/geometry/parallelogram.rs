//! Parallelogram primitive: a finite plane patch spanned by two edges.

use crate::{Brdf, Hittable, SurfaceHit};
use lumen_math::{Color, Interval, Ray, Vec3};

/// Parallelogram with one corner at `corner` and edges `u` and `v`.
///
/// The reported normal is `u × v` and is left unnormalized.
pub struct Parallelogram<B: Brdf> {
    corner: Vec3,
    u: Vec3,
    v: Vec3,
    normal: Vec3,
    // n / (n . n), used to recover planar coordinates
    w: Vec3,
    brdf: B,
    emission: Color,
}

impl<B: Brdf> Parallelogram<B> {
    pub fn new(corner: Vec3, u: Vec3, v: Vec3, brdf: B) -> Self {
        let normal = u.cross(v);
        let len_sq = normal.length_squared();
        let w = if len_sq > 0.0 { normal / len_sq } else { Vec3::ZERO };
        Self {
            corner,
            u,
            v,
            normal,
            w,
            brdf,
            emission: Color::ZERO,
        }
    }

    /// Make the patch a constant emitter.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission.max(Color::ZERO);
        self
    }
}

impl<B: Brdf> Hittable for Parallelogram<B> {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        let denom = self.normal.dot(ray.direction());

        // Parallel to the plane, or a degenerate (zero-area) patch
        if denom.abs() < 1e-8 {
            return None;
        }

        let t = self.normal.dot(self.corner - ray.origin()) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        let point = ray.at(t);
        let planar = point - self.corner;
        let alpha = self.w.dot(planar.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar));
        if !(0.0..=1.0).contains(&alpha) || !(0.0..=1.0).contains(&beta) {
            return None;
        }

        Some(SurfaceHit {
            t,
            point,
            normal: self.normal,
        })
    }

    fn brdf(&self) -> &dyn Brdf {
        &self.brdf
    }

    fn emission(&self) -> Color {
        self.emission
    }
}

//! Pixel-colour estimators.
//!
//! Every estimator answers one question: what colour does this camera ray
//! see? Deterministic ones shade directly from the nearest hit. Stochastic
//! ones gather radiance over one hemisphere of secondary rays.

mod bmc;
mod cmc;
mod depth;
mod intersection;
mod lazy;
mod normal;
mod phong;

pub use bmc::BayesianMonteCarloIntegrator;
pub use cmc::ClassicalMonteCarloIntegrator;
pub use depth::DepthIntegrator;
pub use intersection::IntersectionIntegrator;
pub use lazy::LazyIntegrator;
pub use normal::NormalIntegrator;
pub use phong::PhongIntegrator;

use lumen_core::Scene;
use lumen_math::{Color, Ray, Vec3};
use rand::RngCore;

/// A pixel-colour estimator.
///
/// Estimators are stateless between calls and shared by every render worker;
/// random state arrives through `rng`.
pub trait Integrator: Send + Sync {
    /// Suffix appended to the output name, e.g. `_Phong`.
    fn tag(&self) -> String;

    /// Estimate the radiance arriving along `ray`.
    fn compute_color(&self, scene: &Scene, ray: &Ray, rng: &mut dyn RngCore) -> Color;
}

/// Radiance arriving at `origin` from `direction` after one bounce.
///
/// The emission of the first surface hit, or the environment lookup on a
/// miss, or zero.
pub(crate) fn incoming_radiance(scene: &Scene, origin: Vec3, direction: Vec3) -> Color {
    let ray = Ray::new(origin, direction);
    match scene.closest_hit(&ray) {
        Some(hit) => scene
            .object(hit.object_index)
            .map_or(Color::ZERO, |object| object.emission()),
        None => scene.environment_radiance(ray.direction()),
    }
}

/// Diffuse reflectance of the struck object, zero if the index is stale.
pub(crate) fn hit_kd(scene: &Scene, object_index: usize) -> Color {
    scene
        .object(object_index)
        .map_or(Color::ZERO, |object| object.brdf().kd())
}

#[cfg(test)]
pub(crate) mod test_scenes {
    use lumen_core::{Camera, ConstantEnvironment, Lambertian, Parallelogram, PointLight, Scene, Sphere};
    use lumen_math::{Color, Vec3};

    pub const SPHERE_KD: Color = Color::new(0.8, 0.8, 0.8);

    /// Grey sphere of radius 2 at (0, 0, -5) seen by a 16x16 camera.
    pub fn sphere() -> Scene {
        let mut scene = Scene::new(Camera::new(16, 16, 60.0).unwrap());
        scene.add_object(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -5.0),
            2.0,
            Lambertian::new(SPHERE_KD),
        )));
        scene
    }

    /// Sphere over a floor, lit by one point light.
    pub fn sphere_on_floor() -> Scene {
        let mut scene = sphere();
        scene.add_object(Box::new(Parallelogram::new(
            Vec3::new(-4.0, -2.0, -1.0),
            Vec3::new(8.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -8.0),
            Lambertian::new(Color::new(0.2, 0.8, 0.2)),
        )));
        scene.add_point_light(PointLight::new(Vec3::new(0.0, 5.0, 0.0), Color::splat(80.0)));
        scene
    }

    /// Large floor under a constant sky of radiance `sky`.
    pub fn floor_under_sky(kd: Color, sky: Color) -> Scene {
        let mut scene = Scene::new(Camera::new(16, 16, 60.0).unwrap());
        scene.add_object(Box::new(Parallelogram::new(
            Vec3::new(-1000.0, -1.0, 1000.0),
            Vec3::new(2000.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -2000.0),
            Lambertian::new(kd),
        )));
        scene.set_environment_map(Box::new(ConstantEnvironment::new(sky)));
        scene
    }
}

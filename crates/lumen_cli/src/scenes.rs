//! Built-in scenes.

use std::path::Path;

use anyhow::{Context, Result};
use lumen_core::{Camera, LatLongEnvironment, Lambertian, Parallelogram, PointLight, Scene, Sphere};
use lumen_math::{Color, Vec3};

/// A white sphere resting on a green square floor, lit by one point light
/// overhead plus ambient light, with an optional environment map.
pub fn sphere_scene(width: u32, height: u32, vertical_fov: f32, env_map: Option<&Path>) -> Result<Scene> {
    let camera = Camera::new(width, height, vertical_fov).context("Invalid camera settings")?;
    let mut scene = Scene::new(camera);
    scene.set_ambient(Color::splat(0.5));

    let white_diffuse = Lambertian::new(Color::new(0.8, 0.8, 0.8));
    let green_diffuse = Lambertian::new(Color::new(0.2, 0.8, 0.2));

    let radius = 2.0;
    scene.add_object(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -5.0), radius, white_diffuse)));

    // Floor is four radii across, centred under the sphere and touching it
    let side = 4.0 * radius;
    let half_side = side / 2.0;
    scene.add_object(Box::new(Parallelogram::new(
        Vec3::new(-half_side, -radius, -5.0 + half_side),
        Vec3::new(side, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -side),
        green_diffuse,
    )));

    scene.add_point_light(PointLight::new(Vec3::new(0.0, 5.0, 0.0), Color::splat(80.0)));

    if let Some(path) = env_map {
        let env = LatLongEnvironment::load(path)
            .with_context(|| format!("Failed to load environment map {}", path.display()))?;
        log::info!("Environment map: {} ({}x{})", env.path, env.width, env.height);
        scene.set_environment_map(Box::new(env));
    }

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::Ray;

    #[test]
    fn test_sphere_scene_layout() {
        let scene = sphere_scene(50, 50, 60.0, None).unwrap();

        assert_eq!(scene.object_count(), 2);
        assert_eq!(scene.point_lights().len(), 1);
        assert!(scene.environment().is_none());

        // Camera looks straight at the sphere
        let hit = scene.closest_hit(&Ray::new(Vec3::ZERO, -Vec3::Z)).unwrap();
        assert_eq!(hit.object_index, 0);
        assert!((hit.distance - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_missing_env_map_is_an_error() {
        assert!(sphere_scene(8, 8, 60.0, Some(Path::new("no/such/map.hdr"))).is_err());
    }
}

//! Lumen Core - Scene description for the single-bounce integrators.
//!
//! This crate provides:
//!
//! - **Scene facade**: `Scene` with nearest-hit and any-hit queries
//! - **Geometry**: `Sphere` and `Parallelogram` behind the `Hittable` trait
//! - **Shading inputs**: `Brdf`, `PointLight`, environment maps
//! - **Camera**: pinhole `Camera` for primary rays
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{Camera, Lambertian, Scene, Sphere};
//! use lumen_math::{Color, Ray, Vec3};
//!
//! let mut scene = Scene::new(Camera::new(500, 500, 60.0)?);
//! scene.add_object(Box::new(Sphere::new(
//!     Vec3::new(0.0, 0.0, -5.0),
//!     2.0,
//!     Lambertian::new(Color::splat(0.8)),
//! )));
//!
//! let hit = scene.closest_hit(&Ray::new(Vec3::ZERO, -Vec3::Z));
//! ```

pub mod camera;
pub mod environment;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod material;
pub mod scene;

// Re-export commonly used types
pub use camera::Camera;
pub use environment::{ConstantEnvironment, EnvironmentMap, LatLongEnvironment};
pub use error::{SceneError, SceneResult};
pub use geometry::{Hittable, Parallelogram, Sphere};
pub use hit::{HitRecord, SurfaceHit};
pub use material::{Brdf, Lambertian};
pub use scene::{PointLight, Scene, HIT_EPSILON};

//! Pinhole camera for primary ray generation.

use crate::{SceneError, SceneResult};
use lumen_math::{Ray, Vec3};

/// Pinhole camera looking down -Z with +Y up.
///
/// Pixel (0, 0) is the top-left corner of the image. There is no lens model
/// and no built-in jitter: one call yields one direction.
#[derive(Debug, Clone)]
pub struct Camera {
    width: u32,
    height: u32,
    vfov: f32, // Vertical field of view in degrees
    position: Vec3,

    // Cached viewport values
    viewport_upper_left: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
}

impl Camera {
    /// Create a camera at the origin.
    ///
    /// Fails if either dimension is zero or the field of view is outside
    /// (0, 180) degrees.
    pub fn new(width: u32, height: u32, vertical_fov: f32) -> SceneResult<Self> {
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidCamera(format!(
                "resolution must be non-zero, got {}x{}",
                width, height
            )));
        }
        if !(vertical_fov > 0.0 && vertical_fov < 180.0) {
            return Err(SceneError::InvalidCamera(format!(
                "vertical field of view must be in (0, 180) degrees, got {}",
                vertical_fov
            )));
        }

        // Viewport at unit distance in front of the eye
        let h = (vertical_fov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = viewport_height * (width as f32 / height as f32);

        let viewport_u = viewport_width * Vec3::X;
        let viewport_v = -viewport_height * Vec3::Y;

        Ok(Self {
            width,
            height,
            vfov: vertical_fov,
            position: Vec3::ZERO,
            viewport_upper_left: -Vec3::Z - viewport_u / 2.0 - viewport_v / 2.0,
            pixel_delta_u: viewport_u / width as f32,
            pixel_delta_v: viewport_v / height as f32,
        })
    }

    /// Move the eye point. Orientation stays fixed.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn vertical_fov(&self) -> f32 {
        self.vfov
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit direction through the centre of pixel (x, y).
    pub fn get_direction(&self, x: u32, y: u32) -> Vec3 {
        self.direction_at(x as f32 + 0.5, y as f32 + 0.5)
    }

    /// Unit direction through continuous image coordinates.
    ///
    /// `(0.0, 0.0)` is the top-left corner of the image and
    /// `(width, height)` the bottom-right one; sub-pixel offsets are the
    /// caller's business.
    pub fn direction_at(&self, px: f32, py: f32) -> Vec3 {
        (self.viewport_upper_left + px * self.pixel_delta_u + py * self.pixel_delta_v).normalize()
    }

    /// Primary ray through the centre of pixel (x, y).
    pub fn ray(&self, x: u32, y: u32) -> Ray {
        Ray::new(self.position, self.get_direction(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_cameras_rejected() {
        assert!(Camera::new(0, 10, 60.0).is_err());
        assert!(Camera::new(10, 0, 60.0).is_err());
        assert!(Camera::new(10, 10, 0.0).is_err());
        assert!(Camera::new(10, 10, 180.0).is_err());
        assert!(Camera::new(10, 10, f32::NAN).is_err());
    }

    #[test]
    fn test_center_ray_looks_down_negative_z() {
        let camera = Camera::new(101, 101, 60.0).unwrap();
        let dir = camera.get_direction(50, 50);

        assert!((dir - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
    }

    #[test]
    fn test_directions_are_unit() {
        let camera = Camera::new(64, 48, 90.0).unwrap();
        for (x, y) in [(0, 0), (63, 0), (0, 47), (63, 47), (20, 30)] {
            assert!((camera.get_direction(x, y).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_image_orientation() {
        let camera = Camera::new(100, 100, 60.0).unwrap();

        let top_left = camera.get_direction(0, 0);
        assert!(top_left.x < 0.0);
        assert!(top_left.y > 0.0);

        let bottom_right = camera.get_direction(99, 99);
        assert!(bottom_right.x > 0.0);
        assert!(bottom_right.y < 0.0);
    }

    #[test]
    fn test_vertical_fov_edge() {
        // The top edge of the image sits at half the vertical FOV
        let camera = Camera::new(10, 10, 90.0).unwrap();
        let edge = camera.direction_at(5.0, 0.0);
        let angle = edge.dot(-Vec3::Z).acos().to_degrees();
        assert!((angle - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_ray_starts_at_position() {
        let camera = Camera::new(8, 8, 60.0)
            .unwrap()
            .with_position(Vec3::new(1.0, 2.0, 3.0));
        let ray = camera.ray(4, 4);
        assert_eq!(ray.origin(), Vec3::new(1.0, 2.0, 3.0));
    }
}

//! Environment maps: radiance arriving from infinitely far away.
//!
//! Integrators treat a scene without an environment map as a black
//! background, so every map here is optional on the [`Scene`](crate::Scene).

use std::f32::consts::PI;
use std::path::Path;

use lumen_math::{Color, Vec3};

use crate::{SceneError, SceneResult};

/// Direction-indexed radiance lookup defined over the full sphere.
pub trait EnvironmentMap: Send + Sync {
    /// Radiance arriving from `direction` (need not be unit length).
    fn get_value(&self, direction: Vec3) -> Color;
}

/// Same radiance from every direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantEnvironment {
    radiance: Color,
}

impl ConstantEnvironment {
    pub fn new(radiance: Color) -> Self {
        Self { radiance }
    }
}

impl EnvironmentMap for ConstantEnvironment {
    fn get_value(&self, _direction: Vec3) -> Color {
        self.radiance
    }
}

/// Equirectangular (latitude/longitude) radiance map.
///
/// Row 0 is straight up (+Y); the horizontal centre of the image looks down
/// -Z, the camera's forward axis.
#[derive(Clone, Debug)]
pub struct LatLongEnvironment {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Linear RGB radiance, row-major
    pixels: Vec<Color>,

    /// Original file path (for debugging)
    pub path: String,
}

impl LatLongEnvironment {
    /// Build a map from linear pixel data.
    pub fn from_pixels(
        width: u32,
        height: u32,
        pixels: Vec<Color>,
        path: impl Into<String>,
    ) -> SceneResult<Self> {
        if width == 0 || height == 0 || pixels.len() != (width * height) as usize {
            return Err(SceneError::EnvironmentLoad(format!(
                "expected {}x{} pixels, got {}",
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
            path: path.into(),
        })
    }

    /// Load an HDR (Radiance `.hdr`, OpenEXR) or LDR image from disk.
    ///
    /// HDR data is taken as linear radiance. 8-bit images are decoded from
    /// sRGB.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| {
            SceneError::EnvironmentLoad(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let is_hdr = matches!(
            img.color(),
            image::ColorType::Rgb32F | image::ColorType::Rgba32F
        );
        let rgb = img.into_rgb32f();
        let (width, height) = rgb.dimensions();

        let pixels: Vec<Color> = rgb
            .pixels()
            .map(|p| {
                let c = Color::new(p[0], p[1], p[2]);
                if is_hdr {
                    c
                } else {
                    Color::new(srgb_to_linear(c.x), srgb_to_linear(c.y), srgb_to_linear(c.z))
                }
            })
            .collect();

        log::debug!(
            "Loaded environment map: {} ({}x{}, hdr={})",
            path.display(),
            width,
            height,
            is_hdr
        );

        Self::from_pixels(width, height, pixels, path.to_string_lossy())
    }

    /// Map a direction to `(u, v)` in [0, 1]^2.
    fn direction_to_uv(direction: Vec3) -> (f32, f32) {
        let d = direction.normalize_or_zero();
        let phi = d.x.atan2(-d.z); // 0 looking down -Z
        let theta = d.y.clamp(-1.0, 1.0).acos(); // 0 straight up
        (0.5 + phi / (2.0 * PI), theta / PI)
    }

    /// Bilinear lookup over pixel centres; wraps horizontally, clamps
    /// vertically.
    ///
    /// Column 0 and the last column are neighbours, so there is no seam
    /// behind the camera.
    fn sample(&self, u: f32, v: f32) -> Color {
        let u = u.rem_euclid(1.0);
        let v = v.clamp(0.0, 1.0);

        let x = u * self.width as f32 - 0.5;
        let y = (v * self.height as f32 - 0.5).clamp(0.0, (self.height - 1) as f32);

        let x_floor = x.floor();
        let fx = x - x_floor;
        let x0 = (x_floor as i64).rem_euclid(self.width as i64) as u32;
        let x1 = (x0 + 1) % self.width;

        let y0 = y.floor() as u32;
        let y1 = (y0 + 1).min(self.height - 1);
        let fy = y - y0 as f32;

        let top = self.get_pixel(x0, y0) * (1.0 - fx) + self.get_pixel(x1, y0) * fx;
        let bottom = self.get_pixel(x0, y1) * (1.0 - fx) + self.get_pixel(x1, y1) * fx;

        top * (1.0 - fy) + bottom * fy
    }

    fn get_pixel(&self, x: u32, y: u32) -> Color {
        let idx = (y * self.width + x) as usize;
        self.pixels.get(idx).copied().unwrap_or(Color::ZERO)
    }
}

impl EnvironmentMap for LatLongEnvironment {
    fn get_value(&self, direction: Vec3) -> Color {
        let (u, v) = Self::direction_to_uv(direction);
        self.sample(u, v)
    }
}

/// Convert an sRGB-encoded value in [0, 1] to linear.
fn srgb_to_linear(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

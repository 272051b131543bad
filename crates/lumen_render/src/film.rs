//! Image buffer, tone mapping and persistence.

use std::path::Path;

use image::{DynamicImage, Rgb, Rgb32FImage, RgbImage, RgbaImage};
use lumen_math::Color;

use crate::{RenderError, RenderResult};

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * linear_to_gamma(color.x).clamp(0.0, 1.0)) as u8;
    let g = (255.0 * linear_to_gamma(color.y).clamp(0.0, 1.0)) as u8;
    let b = (255.0 * linear_to_gamma(color.z).clamp(0.0, 1.0)) as u8;
    [r, g, b, 255]
}

/// Linear-radiance image, row-major with (0, 0) at the top left.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Store `color` at (x, y).
    ///
    /// # Panics
    ///
    /// If (x, y) lies outside the buffer.
    pub fn set_pixel(&mut self, color: Color, x: u32, y: u32) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) out of bounds for {}x{} image",
            x,
            y,
            self.width,
            self.height
        );
        (y * self.width + x) as usize
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 4) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }
}

/// Write `buffer` to `path`. The extension picks the encoding: `.png` is
/// tone-mapped 8-bit, `.exr` keeps linear floats.
pub fn save_image(buffer: &ImageBuffer, path: &Path) -> RenderResult<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => {
            let img = RgbaImage::from_raw(buffer.width, buffer.height, buffer.to_rgba())
                .ok_or(RenderError::SizeMismatch(buffer.width, buffer.height, 0, 0))?;
            img.save(path)?;
        }
        "exr" => {
            let data: Vec<f32> = buffer.pixels.iter().flat_map(|c| c.to_array()).collect();
            let img = Rgb32FImage::from_raw(buffer.width, buffer.height, data)
                .ok_or(RenderError::SizeMismatch(buffer.width, buffer.height, 0, 0))?;
            DynamicImage::ImageRgb32F(img).save(path)?;
        }
        other => return Err(RenderError::UnsupportedFormat(other.to_string())),
    }

    log::info!("Saved image: {}", path.display());
    Ok(())
}

/// Root-mean-square difference between two renders.
///
/// Both images are compared as they would be displayed: tone-mapped to
/// 8-bit channels, so errors are on a 0..255 scale.
#[derive(Debug, Clone)]
pub struct RmseMap {
    pub width: u32,
    pub height: u32,
    /// RMSE over every channel of every pixel
    pub overall: f32,
    /// Per-pixel RMSE across the three channels, row-major
    pub per_pixel: Vec<f32>,
}

/// Compare `image` against `reference`.
pub fn rmse(reference: &ImageBuffer, image: &ImageBuffer) -> RenderResult<RmseMap> {
    if reference.width != image.width || reference.height != image.height {
        return Err(RenderError::SizeMismatch(
            reference.width,
            reference.height,
            image.width,
            image.height,
        ));
    }

    let mut total = 0.0f64;
    let per_pixel: Vec<f32> = reference
        .pixels
        .iter()
        .zip(&image.pixels)
        .map(|(&a, &b)| {
            let a = color_to_rgba(a);
            let b = color_to_rgba(b);
            let squared: f32 = (0..3)
                .map(|c| {
                    let d = a[c] as f32 - b[c] as f32;
                    d * d
                })
                .sum();
            total += squared as f64;
            (squared / 3.0).sqrt()
        })
        .collect();

    let count = (per_pixel.len() * 3).max(1) as f64;
    Ok(RmseMap {
        width: reference.width,
        height: reference.height,
        overall: (total / count).sqrt() as f32,
        per_pixel,
    })
}

/// Jet colour ramp: blue at 0, red at 1.
pub fn jet(t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let channel = |center: f32| ((1.5 - (4.0 * t - center).abs()).clamp(0.0, 1.0) * 255.0) as u8;
    [channel(3.0), channel(2.0), channel(1.0)]
}

/// Colour-map an error map. Values are read on the 0..255 scale and
/// clamped, so images from different sample counts share one ramp.
pub fn error_heatmap(map: &RmseMap) -> RgbImage {
    RgbImage::from_fn(map.width, map.height, |x, y| {
        let value = map.per_pixel[(y * map.width + x) as usize];
        Rgb(jet(value / 255.0))
    })
}

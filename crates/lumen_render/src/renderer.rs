//! Render driver.
//!
//! Walks every pixel, asks the active integrator for its colour and fills an
//! [`ImageBuffer`]. Each pixel draws from its own generator, seeded from the
//! render seed and the pixel coordinates, so the result does not depend on
//! the order pixels are visited in or on how many threads visit them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use lumen_core::Scene;
use lumen_math::{Color, Ray};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::film::ImageBuffer;
use crate::integrators::Integrator;
use crate::sampling::gen_f32;
use crate::{RenderError, RenderResult};

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Worker threads: 1 renders serially, 0 uses the global rayon pool,
    /// anything else builds a dedicated pool of that size
    pub threads: usize,
    /// Base seed for every per-pixel generator
    pub seed: u64,
    /// Bucket edge length in pixels for parallel renders
    pub bucket_size: u32,
    /// Jittered camera rays per pixel. 1 shoots through the pixel centre.
    pub pixel_samples: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
            pixel_samples: 1,
        }
    }
}

impl RenderConfig {
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    pub fn with_pixel_samples(mut self, pixel_samples: u32) -> Self {
        self.pixel_samples = pixel_samples;
        self
    }
}

/// SplitMix64 finalizer.
#[inline]
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seed of the generator that renders pixel (x, y).
pub fn pixel_seed(seed: u64, x: u32, y: u32) -> u64 {
    splitmix64(seed ^ splitmix64(((y as u64) << 32) | x as u64))
}

/// Render a single pixel.
///
/// With one pixel sample the camera ray goes through the pixel centre;
/// more samples jitter inside the pixel and average.
pub fn render_pixel(
    scene: &Scene,
    integrator: &dyn Integrator,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> Color {
    let camera = scene.camera();
    let mut rng = StdRng::seed_from_u64(pixel_seed(config.seed, x, y));

    if config.pixel_samples <= 1 {
        return integrator.compute_color(scene, &camera.ray(x, y), &mut rng);
    }

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.pixel_samples {
        let px = x as f32 + gen_f32(&mut rng);
        let py = y as f32 + gen_f32(&mut rng);
        let ray = Ray::new(camera.position(), camera.direction_at(px, py));
        pixel_color += integrator.compute_color(scene, &ray, &mut rng);
    }

    pixel_color / config.pixel_samples as f32
}

/// One integrator bound to one scene, producing one named image.
///
/// The scene is borrowed, not owned: the `'s` lifetime ties every render to
/// a scene that outlives the session.
pub struct RenderSession<'s> {
    name: String,
    experiment: String,
    integrator: Box<dyn Integrator>,
    scene: Option<&'s Scene>,
    config: RenderConfig,
}

impl<'s> RenderSession<'s> {
    /// Create a session. `name` is the output base name; the integrator's
    /// tag is appended to it.
    pub fn new(name: impl Into<String>, integrator: Box<dyn Integrator>) -> Self {
        Self {
            name: name.into(),
            experiment: String::new(),
            integrator,
            scene: None,
            config: RenderConfig::default(),
        }
    }

    /// Suffix appended after the integrator tag.
    pub fn with_experiment(mut self, experiment: impl Into<String>) -> Self {
        self.experiment = experiment.into();
        self
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Bind the scene to render. A session renders exactly one scene, so a
    /// second call is an error and leaves the first binding in place.
    pub fn add_scene(&mut self, scene: &'s Scene) -> RenderResult<()> {
        if self.scene.is_some() {
            return Err(RenderError::SceneAlreadyBound(self.filename()));
        }
        self.scene = Some(scene);
        Ok(())
    }

    /// Output name: base name, integrator tag, experiment suffix.
    pub fn filename(&self) -> String {
        format!("{}{}{}", self.name, self.integrator.tag(), self.experiment)
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn integrator(&self) -> &dyn Integrator {
        self.integrator.as_ref()
    }

    /// Render the bound scene.
    pub fn render(&self) -> RenderResult<ImageBuffer> {
        self.render_with_progress(&|_: f32| {})
    }

    /// Render the bound scene, reporting completed fraction in [0, 1].
    ///
    /// `progress` is advisory and may be called from worker threads.
    pub fn render_with_progress(&self, progress: &(dyn Fn(f32) + Sync)) -> RenderResult<ImageBuffer> {
        let scene = self
            .scene
            .ok_or_else(|| RenderError::SceneNotBound(self.filename()))?;
        let camera = scene.camera();
        let (width, height) = (camera.width(), camera.height());

        log::info!("Rendering image: {} ({}x{})", self.filename(), width, height);
        if scene.object_count() == 0 {
            log::warn!("Scene has no objects; every camera ray will miss");
        }

        let start = Instant::now();
        let image = match self.config.threads {
            1 => self.render_serial(scene, progress),
            0 => self.render_parallel(scene, progress),
            n => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
                pool.install(|| self.render_parallel(scene, progress))
            }
        };

        log::info!(
            "Finished {} in {:.2}s",
            self.filename(),
            start.elapsed().as_secs_f32()
        );
        Ok(image)
    }

    fn render_serial(&self, scene: &Scene, progress: &(dyn Fn(f32) + Sync)) -> ImageBuffer {
        let camera = scene.camera();
        let (width, height) = (camera.width(), camera.height());
        let mut image = ImageBuffer::new(width, height);

        for y in 0..height {
            for x in 0..width {
                let color = render_pixel(scene, self.integrator.as_ref(), x, y, &self.config);
                image.set_pixel(color, x, y);
            }
            progress((y + 1) as f32 / height as f32);
        }

        image
    }

    fn render_parallel(&self, scene: &Scene, progress: &(dyn Fn(f32) + Sync)) -> ImageBuffer {
        let camera = scene.camera();
        let (width, height) = (camera.width(), camera.height());
        let buckets = generate_buckets(width, height, self.config.bucket_size);
        let total = buckets.len();
        let done = AtomicUsize::new(0);

        log::debug!(
            "{} buckets of {}px on {} threads",
            total,
            self.config.bucket_size,
            rayon::current_num_threads()
        );

        let results: Vec<BucketResult> = buckets
            .par_iter()
            .map(|bucket| {
                let result = render_bucket(bucket, scene, self.integrator.as_ref(), &self.config);
                let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                progress(finished as f32 / total as f32);
                result
            })
            .collect();

        let mut image = ImageBuffer::new(width, height);
        for result in &results {
            result.write_to(&mut image);
        }
        image
    }
}

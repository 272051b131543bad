//! Command-line arguments.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use lumen_render::{
    BayesianMonteCarloIntegrator, ClassicalMonteCarloIntegrator, CosinePdf, DepthIntegrator,
    GaussianProcess, GaussianProcessConfig, Integrator, IntersectionIntegrator, LazyIntegrator,
    NormalIntegrator, Pdf, PhongIntegrator, RenderConfig, UniformPdf,
};

#[derive(Parser, Debug)]
#[command(name = "lumen", version, about = "Single-bounce ray tracer with Monte Carlo integrators")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the sphere scene with one integrator
    Render(RenderArgs),
    /// Measure Monte Carlo error against a high-sample reference
    Convergence(ConvergenceArgs),
}

/// Scene and driver settings shared by every command.
#[derive(Args, Debug, Clone)]
pub struct SceneArgs {
    /// Image width in pixels
    #[arg(long, default_value_t = 500)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 500)]
    pub height: u32,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 60.0)]
    pub fov: f32,

    /// Equirectangular environment map (.hdr, .exr, or LDR image)
    #[arg(long)]
    pub env_map: Option<PathBuf>,

    /// Worker threads: 1 = serial, 0 = all cores
    #[arg(short, long, default_value_t = 0)]
    pub threads: usize,

    /// Base random seed
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Bucket edge length for parallel rendering
    #[arg(long, default_value_t = lumen_render::DEFAULT_BUCKET_SIZE)]
    pub bucket_size: u32,

    /// Jittered camera rays per pixel
    #[arg(long, default_value_t = 1)]
    pub pixel_samples: u32,

    /// Output directory
    #[arg(short, long, default_value = "out")]
    pub out_dir: PathBuf,

    /// Base name of output files
    #[arg(long, default_value = "sphere")]
    pub name: String,

    /// Hemisphere sampling density for classical Monte Carlo
    #[arg(long, value_enum, default_value_t = PdfKind::Uniform)]
    pub pdf: PdfKind,

    /// Gaussian-process kernel length scale for Bayesian Monte Carlo
    #[arg(long, default_value_t = 0.5)]
    pub length_scale: f64,
}

impl SceneArgs {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::default()
            .with_threads(self.threads)
            .with_seed(self.seed)
            .with_bucket_size(self.bucket_size)
            .with_pixel_samples(self.pixel_samples)
    }
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub scene: SceneArgs,

    /// Estimator to render with
    #[arg(short, long, value_enum, default_value_t = IntegratorKind::Phong)]
    pub integrator: IntegratorKind,

    /// Hemisphere samples per pixel (cmc, bmc)
    #[arg(short, long, default_value_t = 100)]
    pub samples: usize,

    /// Distance that maps to black (depth)
    #[arg(long, default_value_t = DepthIntegrator::DEFAULT_MAX_DEPTH)]
    pub max_depth: f32,

    /// Suffix appended after the integrator tag
    #[arg(long, default_value = "")]
    pub experiment: String,

    /// Output encoding
    #[arg(long, value_enum, default_value_t = ImageFormat::Png)]
    pub format: ImageFormat,
}

#[derive(Args, Debug)]
pub struct ConvergenceArgs {
    #[command(flatten)]
    pub scene: SceneArgs,

    /// Estimator under test
    #[arg(long, value_enum, default_value_t = Estimator::Cmc)]
    pub estimator: Estimator,

    /// Sample counts to compare, comma separated
    #[arg(short, long, value_delimiter = ',', default_value = "10,50,100,500")]
    pub samples: Vec<usize>,

    /// Classical Monte Carlo samples for the reference image
    #[arg(long, default_value_t = 1000)]
    pub reference: usize,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegratorKind {
    Lazy,
    Intersection,
    Depth,
    Normal,
    Phong,
    Cmc,
    Bmc,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Estimator {
    Cmc,
    Bmc,
}

impl From<Estimator> for IntegratorKind {
    fn from(estimator: Estimator) -> Self {
        match estimator {
            Estimator::Cmc => IntegratorKind::Cmc,
            Estimator::Bmc => IntegratorKind::Bmc,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfKind {
    Uniform,
    Cosine,
}

impl PdfKind {
    fn build(self) -> Box<dyn Pdf> {
        match self {
            PdfKind::Uniform => Box::new(UniformPdf),
            PdfKind::Cosine => Box::new(CosinePdf),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Exr,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Exr => "exr",
        }
    }
}

/// Build the integrator selected on the command line.
pub fn build_integrator(
    kind: IntegratorKind,
    samples: usize,
    max_depth: f32,
    scene: &SceneArgs,
) -> Result<Box<dyn Integrator>> {
    let integrator: Box<dyn Integrator> = match kind {
        IntegratorKind::Lazy => Box::new(LazyIntegrator),
        IntegratorKind::Intersection => Box::new(IntersectionIntegrator),
        IntegratorKind::Depth => Box::new(DepthIntegrator::new(max_depth)?),
        IntegratorKind::Normal => Box::new(NormalIntegrator),
        IntegratorKind::Phong => Box::new(PhongIntegrator),
        IntegratorKind::Cmc => {
            let pdf = scene.pdf.build();
            log::info!("Classical Monte Carlo: {} samples, {} hemisphere sampling", samples, pdf.name());
            Box::new(ClassicalMonteCarloIntegrator::new(samples)?.with_pdf(pdf))
        }
        IntegratorKind::Bmc => {
            let config = GaussianProcessConfig::default()
                .with_samples(samples)
                .with_length_scale(scene.length_scale)
                .with_seed(scene.seed);
            let gp = GaussianProcess::new(config)?;
            Box::new(BayesianMonteCarloIntegrator::new(samples, Box::new(gp))?)
        }
    };
    Ok(integrator)
}

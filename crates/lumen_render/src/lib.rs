//! Lumen Render - single-bounce integrators and the render driver.
//!
//! Deterministic estimators (depth, normals, Phong) shade straight from the
//! nearest hit. Stochastic ones integrate one hemisphere of incoming light,
//! either with a classical Monte Carlo average or with Bayesian Monte Carlo
//! over a Gaussian-process model.
//!
//! ```ignore
//! use lumen_render::{ClassicalMonteCarloIntegrator, RenderSession, save_image};
//!
//! let mut session = RenderSession::new("out/sphere", Box::new(ClassicalMonteCarloIntegrator::new(100)?));
//! session.add_scene(&scene)?;
//! let image = session.render()?;
//! save_image(&image, format!("{}.png", session.filename()).as_ref())?;
//! ```

pub mod bucket;
pub mod error;
pub mod film;
pub mod gp;
pub mod integrators;
pub mod renderer;
pub mod sampling;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use error::{RenderError, RenderResult};
pub use film::{color_to_rgba, error_heatmap, rmse, save_image, ImageBuffer, RmseMap};
pub use gp::{GaussianProcess, GaussianProcessConfig, RegressionModel};
pub use integrators::{
    BayesianMonteCarloIntegrator, ClassicalMonteCarloIntegrator, DepthIntegrator, Integrator,
    IntersectionIntegrator, LazyIntegrator, NormalIntegrator, PhongIntegrator,
};
pub use renderer::{render_pixel, RenderConfig, RenderSession};
pub use sampling::{center_around_normal, sample_set_hemisphere, CosinePdf, Pdf, SampleSet, UniformPdf};

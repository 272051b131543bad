use thiserror::Error;

/// Errors that abort a render or the persistence step that follows it.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No scene bound to render session '{0}'")]
    SceneNotBound(String),

    #[error("Render session '{0}' already has a scene bound")]
    SceneAlreadyBound(String),

    #[error("{0} requires at least one sample")]
    ZeroSamples(&'static str),

    #[error("Depth range must be finite and positive, got {0}")]
    InvalidMaxDepth(f32),

    #[error("Regression model holds {expected} samples, integrator asked for {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },

    #[error("Kernel matrix is not positive definite (n = {0}); raise the jitter")]
    SingularKernel(usize),

    #[error("Image size mismatch: {0}x{1} vs {2}x{3}")]
    SizeMismatch(u32, u32, u32, u32),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type RenderResult<T> = Result<T, RenderError>;

use thiserror::Error;

/// Errors raised while assembling a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("Failed to load environment map: {0}")]
    EnvironmentLoad(String),
}

pub type SceneResult<T> = Result<T, SceneError>;

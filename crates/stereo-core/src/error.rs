use thiserror::Error;

#[derive(Debug, Error)]
pub enum StereoError {
    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// GPU context, buffer upload, or shader failure reported by the host backend.
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StereoError>;

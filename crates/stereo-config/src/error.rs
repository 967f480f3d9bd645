use std::path::PathBuf;

use stereo_core::StereoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for StereoError {
    fn from(err: ConfigError) -> Self {
        StereoError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_message() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");
    }

    #[test]
    fn test_into_stereo_error() {
        let err: StereoError = ConfigError::ValidationError("camera.near = 0".into()).into();
        assert!(matches!(err, StereoError::Config(ref msg) if msg.contains("camera.near")));
    }
}

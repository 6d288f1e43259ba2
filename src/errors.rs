use stockbook_config::ConfigError;
use stockbook_core::CoreError;
use thiserror::Error;

/// Top-level error for the binaries and bootstrap code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid bind address `{0}`")]
    InvalidBind(String),
}

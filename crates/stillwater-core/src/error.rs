//! Error types for Stillwater

use thiserror::Error;

/// The main error type for Stillwater operations
///
/// Configuration errors (unknown tier, unregistered pattern) are recoverable
/// by design: call sites log them and leave prior state untouched.
#[derive(Debug, Error)]
pub enum StillwaterError {
    #[error("Lake not found: {0}")]
    LakeNotFound(String),

    #[error("Unknown quality tier: {0}")]
    UnknownQualityTier(String),

    #[error("Flow pattern not registered: {0}")]
    UnregisteredFlowPattern(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

/// Result type alias for Stillwater operations
pub type Result<T> = std::result::Result<T, StillwaterError>;

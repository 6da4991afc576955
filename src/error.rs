//! Scene-level error types.
//!
//! Systems propagate failures through [`SceneError`] rather than panicking, so
//! a bad texture or config file degrades into a fallback screen or a log line
//! instead of taking the whole window down.

use std::fmt;

/// Top-level error enum for the solar system viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A texture (or other asset) could not be loaded.
    AssetLoad {
        /// Asset path as passed to the asset server.
        path: String,
        /// Loader-provided reason.
        reason: String,
    },

    /// A body id was referenced that the catalog does not contain.
    UnknownBody {
        /// The id that failed to resolve.
        id: String,
    },

    /// The catalog breaks one of its structural rules (unique ids, one star).
    InvalidCatalog {
        /// Human-readable description of the violation.
        reason: String,
    },

    /// `assets/scene.toml` exists but could not be parsed or holds
    /// out-of-range values.
    Config {
        /// Path of the offending file.
        path: String,
        /// Parser-provided reason.
        reason: String,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::AssetLoad { path, reason } => {
                write!(f, "failed to load asset '{}': {}", path, reason)
            }
            SceneError::UnknownBody { id } => write!(f, "no celestial body with id '{}'", id),
            SceneError::InvalidCatalog { reason } => write!(f, "invalid catalog: {}", reason),
            SceneError::Config { path, reason } => {
                write!(f, "bad config {}: {}", path, reason)
            }
        }
    }
}

impl std::error::Error for SceneError {}

/// Convenience alias: a `Result` using `SceneError` as the error type.
pub type SceneResult<T> = Result<T, SceneError>;

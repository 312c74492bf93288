use std::path::PathBuf;

use crate::foundation::core::FontRole;

/// Convenience result type used across quotecard.
pub type QuoteCardResult<T> = Result<T, QuoteCardError>;

/// Result type of the raster path; every error here is absorbed by the fallback dispatcher.
pub type RasterResult<T> = Result<T, RasterError>;

/// Top-level error taxonomy for configuration, generation and batch IO.
#[derive(thiserror::Error, Debug)]
pub enum QuoteCardError {
    /// Invalid user-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QuoteCardError {
    /// Build a [`QuoteCardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`QuoteCardError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`QuoteCardError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Failure modes of the raster renderer.
#[derive(thiserror::Error, Debug)]
pub enum RasterError {
    /// A font file for `role` could not be read or parsed.
    #[error("{role} font unavailable at '{}': {reason}", path.display())]
    AssetUnavailable {
        /// Role the font was resolved for.
        role: FontRole,
        /// Resolved candidate path.
        path: PathBuf,
        /// Underlying cause.
        reason: String,
    },

    /// The crate was built without the `raster` feature.
    #[error("raster rendering is not compiled in (enable the `raster` feature)")]
    DependencyMissing,

    /// Drawing or encoding failed.
    #[error("raster drawing failed: {0}")]
    DrawingFailure(String),
}

impl RasterError {
    /// Build a [`RasterError::AssetUnavailable`] value.
    pub fn asset(role: FontRole, path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::AssetUnavailable {
            role,
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`RasterError::DrawingFailure`] value.
    pub fn drawing(msg: impl Into<String>) -> Self {
        Self::DrawingFailure(msg.into())
    }
}

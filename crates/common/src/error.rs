//! Error types shared across Varta crates.

use std::path::PathBuf;

/// Top-level error type for Varta operations.
#[derive(Debug, thiserror::Error)]
pub enum VartaError {
    #[error("Crop error: {message}")]
    Crop { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Image error: {message}")]
    Image { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("An export is already in progress")]
    ExportInProgress,

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using VartaError.
pub type VartaResult<T> = Result<T, VartaError>;

impl VartaError {
    pub fn crop(msg: impl Into<String>) -> Self {
        Self::Crop {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export {
            message: msg.into(),
        }
    }

    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }

    /// Whether retrying the same action can succeed without user changes.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Unsupported { .. } | Self::Config { .. })
    }
}

//! Error types shared across Roundscope crates.

use std::path::PathBuf;

/// Top-level error type for Roundscope operations.
#[derive(Debug, thiserror::Error)]
pub enum RoundscopeError {
    #[error("Frame source error: {message}")]
    Source { message: String },

    #[error("Sampling error: {message}")]
    Sampling { message: String },

    #[error("Ingest error: {message}")]
    Ingest { message: String },

    #[error("Analysis error: {message}")]
    Analysis { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

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

/// Result type alias using RoundscopeError.
pub type RoundscopeResult<T> = Result<T, RoundscopeError>;

impl RoundscopeError {
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source {
            message: msg.into(),
        }
    }

    pub fn sampling(msg: impl Into<String>) -> Self {
        Self::Sampling {
            message: msg.into(),
        }
    }

    pub fn ingest(msg: impl Into<String>) -> Self {
        Self::Ingest {
            message: msg.into(),
        }
    }

    pub fn analysis(msg: impl Into<String>) -> Self {
        Self::Analysis {
            message: msg.into(),
        }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export {
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
}

//! Top-level error type for generation runs

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::schema::SchemaError;
use crate::template::TemplateError;

/// Errors that abort a generation run
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Error loading or classifying a template
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Error building the parameter schema
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Error loading generator configuration
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Generated artifact could not be written
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    /// Create a write error
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

//! Error types for registry loading and conversion

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, converting, or writing a registry
///
/// Only structural problems are errors. Entry contents (e.g. whether an
/// invocation names a real program) are never checked here.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Failed to read registry file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML registry: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to serialize registry as TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Failed to serialize registry as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid flag literal '{0}' (expected \"True\" or \"False\")")]
    InvalidFlag(String),

    #[error("Invalid listing pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Legacy listing, line {line}: {message}")]
    Legacy { line: usize, message: String },
}

impl RegistryError {
    pub(crate) fn legacy(line: usize, message: impl Into<String>) -> Self {
        Self::Legacy {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;

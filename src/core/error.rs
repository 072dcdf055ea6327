//! Error types for definition data loading.

use thiserror::Error;

/// Errors that can occur when loading enemy, weapon or player definitions.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// A definition parsed but its values cannot be used.
    #[error("Invalid definition '{name}': {reason}")]
    InvalidDefinition { name: String, reason: String },
}

impl DataLoadError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
